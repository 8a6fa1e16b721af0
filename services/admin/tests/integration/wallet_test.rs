use banquet_admin::error::AdminServiceError;
use banquet_admin::usecase::wallet::{
    GetWalletUseCase, ListRechargesUseCase, RechargeInput, RechargeUseCase,
};
use banquet_domain::brand::LevelType;
use banquet_domain::id::BrandId;
use banquet_domain::money::{Cents, MoneyError, Points};
use banquet_domain::pagination::PageRequest;

use banquet_admin::domain::types::Wallet;

use crate::helpers::{MemoryDb, Row, operator, staff};

fn recharge_uc(db: &MemoryDb) -> RechargeUseCase<MemoryDb, MemoryDb> {
    RechargeUseCase {
        brands: db.clone(),
        wallets: db.clone(),
        points_per_yuan: 10,
    }
}

fn input(brand_id: BrandId, amount: &str) -> RechargeInput {
    RechargeInput {
        brand_id,
        amount: amount.to_owned(),
        remark: Some("annual plan".to_owned()),
    }
}

#[tokio::test]
async fn should_open_wallet_on_first_recharge() {
    let db = MemoryDb::new();
    let brand = db.seed_brand("Mine", LevelType::Standard, None);

    let out = recharge_uc(&db)
        .execute(&operator(), input(brand.id, "12.34"))
        .await
        .unwrap();

    assert_eq!(out.wallet.balance, Cents(1_234));
    assert_eq!(out.wallet.points, Points(12_340));
    assert_eq!(out.record.amount, Cents(1_234));
    assert_eq!(out.record.operator_id, operator().user_id);
    assert_eq!(db.tables().wallets.len(), 1);
}

#[tokio::test]
async fn should_accumulate_balance_and_points() {
    let db = MemoryDb::new();
    let brand = db.seed_brand("Mine", LevelType::Standard, None);
    let uc = recharge_uc(&db);

    uc.execute(&operator(), input(brand.id, "100")).await.unwrap();
    let out = uc.execute(&operator(), input(brand.id, "0.5")).await.unwrap();

    assert_eq!(out.wallet.balance, Cents(10_050));
    assert_eq!(out.wallet.points, Points(100_500));
    assert_eq!(db.tables().recharges.len(), 2);
}

#[tokio::test]
async fn should_reject_recharge_that_overflows_balance() {
    let db = MemoryDb::new();
    let brand = db.seed_brand("Mine", LevelType::Standard, None);
    db.tables().wallets.push(Row::live(Wallet {
        brand_id: brand.id,
        balance: Cents(i64::MAX - 10),
        points: Points(0),
        updated_at: None,
    }));

    let result = recharge_uc(&db)
        .execute(&operator(), input(brand.id, "1"))
        .await;
    assert!(
        matches!(result, Err(AdminServiceError::InvalidAmount(MoneyError::Overflow))),
        "expected InvalidAmount(Overflow), got {result:?}"
    );
    assert!(db.tables().recharges.is_empty());
    assert_eq!(db.tables().wallets[0].value.balance, Cents(i64::MAX - 10));
}

#[tokio::test]
async fn should_reject_non_positive_or_malformed_amounts() {
    let db = MemoryDb::new();
    let brand = db.seed_brand("Mine", LevelType::Standard, None);
    let uc = recharge_uc(&db);

    for (amount, expected) in [
        ("0", MoneyError::NotPositive),
        ("-5", MoneyError::NotPositive),
        ("1.234", MoneyError::TooPrecise),
        ("ten", MoneyError::Malformed),
        ("", MoneyError::Empty),
    ] {
        let result = uc.execute(&operator(), input(brand.id, amount)).await;
        assert!(
            matches!(&result, Err(AdminServiceError::InvalidAmount(e)) if *e == expected),
            "amount {amount:?}: expected {expected:?}, got {result:?}"
        );
    }
    assert!(db.tables().recharges.is_empty());
}

#[tokio::test]
async fn should_forbid_staff_from_recharging() {
    let db = MemoryDb::new();
    let brand = db.seed_brand("Mine", LevelType::Standard, None);

    let result = recharge_uc(&db)
        .execute(&staff(brand.id), input(brand.id, "10"))
        .await;
    assert!(
        matches!(result, Err(AdminServiceError::Forbidden)),
        "expected Forbidden, got {result:?}"
    );
}

#[tokio::test]
async fn should_reject_recharge_for_unknown_brand() {
    let db = MemoryDb::new();
    let result = recharge_uc(&db)
        .execute(&operator(), input(BrandId(404), "10"))
        .await;
    assert!(
        matches!(result, Err(AdminServiceError::BrandNotFound)),
        "expected BrandNotFound, got {result:?}"
    );
}

#[tokio::test]
async fn should_show_empty_wallet_before_any_recharge() {
    let db = MemoryDb::new();
    let brand = db.seed_brand("Mine", LevelType::Standard, None);

    let wallet = GetWalletUseCase {
        brands: db.clone(),
        wallets: db.clone(),
    }
    .execute(&staff(brand.id), brand.id)
    .await
    .unwrap();
    assert_eq!(wallet.balance, Cents(0));
    assert_eq!(wallet.points, Points(0));
}

#[tokio::test]
async fn should_list_recharges_newest_first() {
    let db = MemoryDb::new();
    let brand = db.seed_brand("Mine", LevelType::Standard, None);
    let uc = recharge_uc(&db);
    uc.execute(&operator(), input(brand.id, "1")).await.unwrap();
    uc.execute(&operator(), input(brand.id, "2")).await.unwrap();

    let page = ListRechargesUseCase {
        brands: db.clone(),
        wallets: db.clone(),
    }
    .execute(&staff(brand.id), brand.id, PageRequest::default())
    .await
    .unwrap();
    assert_eq!(page.total, 2);
    assert_eq!(page.items[0].amount, Cents(200));
    assert_eq!(page.items[1].amount, Cents(100));
}
