use chrono::{Duration, Utc};

use banquet_admin::domain::types::BrandChanges;
use banquet_admin::error::AdminServiceError;
use banquet_admin::usecase::brand::{
    CreateBrandInput, CreateBrandUseCase, DeleteBrandUseCase, GetBrandUseCase, ListBrandsUseCase,
    UpdateBrandUseCase,
};
use banquet_admin::usecase::stats::BrandStatsUseCase;
use banquet_admin::usecase::wallet::{RechargeInput, RechargeUseCase};
use banquet_domain::brand::LevelType;
use banquet_domain::id::BrandId;
use banquet_domain::money::{Cents, Points};
use banquet_domain::pagination::PageRequest;

use crate::helpers::{MemoryDb, operator, staff};

fn create_input(name: &str) -> CreateBrandInput {
    CreateBrandInput {
        name: name.to_owned(),
        logo: None,
        contact: Some("Li Wei".to_owned()),
        phone: None,
        level_type: None,
        expired_date: None,
    }
}

#[tokio::test]
async fn should_create_brand_as_trial_by_default() {
    let db = MemoryDb::new();
    let brand = CreateBrandUseCase { brands: db.clone() }
        .execute(&operator(), create_input("Dumpling King"))
        .await
        .unwrap();

    assert_eq!(brand.name, "Dumpling King");
    assert_eq!(brand.level_type, LevelType::Trial);
    assert_eq!(db.tables().brands.len(), 1);
}

#[tokio::test]
async fn should_reject_duplicate_live_brand_name() {
    let db = MemoryDb::new();
    db.seed_brand("Dumpling King", LevelType::Standard, None);

    let result = CreateBrandUseCase { brands: db.clone() }
        .execute(&operator(), create_input("Dumpling King"))
        .await;
    assert!(
        matches!(result, Err(AdminServiceError::BrandAlreadyExists)),
        "expected BrandAlreadyExists, got {result:?}"
    );
}

#[tokio::test]
async fn should_allow_reusing_name_of_deleted_brand() {
    let db = MemoryDb::new();
    let old = db.seed_brand("Dumpling King", LevelType::Standard, None);
    DeleteBrandUseCase { brands: db.clone() }
        .execute(&operator(), old.id)
        .await
        .unwrap();

    let brand = CreateBrandUseCase { brands: db.clone() }
        .execute(&operator(), create_input("Dumpling King"))
        .await
        .unwrap();
    assert_ne!(brand.id, old.id);
}

#[tokio::test]
async fn should_forbid_staff_from_creating_brands() {
    let db = MemoryDb::new();
    let result = CreateBrandUseCase { brands: db }
        .execute(&staff(BrandId(1)), create_input("Hotpot"))
        .await;
    assert!(
        matches!(result, Err(AdminServiceError::Forbidden)),
        "expected Forbidden, got {result:?}"
    );
}

#[tokio::test]
async fn should_confine_staff_to_own_brand() {
    let db = MemoryDb::new();
    let mine = db.seed_brand("Mine", LevelType::Trial, None);
    let theirs = db.seed_brand("Theirs", LevelType::Trial, None);
    let uc = GetBrandUseCase { brands: db.clone() };

    assert_eq!(uc.execute(&staff(mine.id), mine.id).await.unwrap().id, mine.id);
    let result = uc.execute(&staff(mine.id), theirs.id).await;
    assert!(
        matches!(result, Err(AdminServiceError::Forbidden)),
        "expected Forbidden, got {result:?}"
    );
}

#[tokio::test]
async fn should_page_live_brands_only() {
    let db = MemoryDb::new();
    for name in ["A", "B", "C"] {
        db.seed_brand(name, LevelType::Trial, None);
    }
    let gone = db.seed_brand("D", LevelType::Trial, None);
    DeleteBrandUseCase { brands: db.clone() }
        .execute(&operator(), gone.id)
        .await
        .unwrap();

    let page = ListBrandsUseCase { brands: db.clone() }
        .execute(&operator(), PageRequest { per_page: 2, page: 2 })
        .await
        .unwrap();
    assert_eq!(page.total, 3);
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].name, "C");
}

#[tokio::test]
async fn should_update_contact_fields_as_staff() {
    let db = MemoryDb::new();
    let brand = db.seed_brand("Mine", LevelType::Trial, None);

    let updated = UpdateBrandUseCase { brands: db.clone() }
        .execute(
            &staff(brand.id),
            brand.id,
            BrandChanges {
                phone: Some("021-5555".to_owned()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.phone.as_deref(), Some("021-5555"));
    assert_eq!(updated.level_type, LevelType::Trial);
}

#[tokio::test]
async fn should_forbid_staff_from_changing_tier() {
    let db = MemoryDb::new();
    let brand = db.seed_brand("Mine", LevelType::Trial, None);

    let result = UpdateBrandUseCase { brands: db.clone() }
        .execute(
            &staff(brand.id),
            brand.id,
            BrandChanges {
                level_type: Some(LevelType::Premium),
                ..Default::default()
            },
        )
        .await;
    assert!(
        matches!(result, Err(AdminServiceError::Forbidden)),
        "expected Forbidden, got {result:?}"
    );
    assert_eq!(db.brand_row(brand.id).value.level_type, LevelType::Trial);
}

#[tokio::test]
async fn should_let_operator_set_tier_and_expiry() {
    let db = MemoryDb::new();
    let brand = db.seed_brand("Mine", LevelType::Trial, None);
    let until = Utc::now() + Duration::days(30);

    let updated = UpdateBrandUseCase { brands: db.clone() }
        .execute(
            &operator(),
            brand.id,
            BrandChanges {
                level_type: Some(LevelType::Premium),
                expired_date: Some(until),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.level_type, LevelType::Premium);
    assert_eq!(updated.expired_date, Some(until));
}

#[tokio::test]
async fn should_soft_delete_brand_and_cascade_restaurants() {
    let db = MemoryDb::new();
    let brand = db.seed_brand("Mine", LevelType::Trial, None);
    let other = db.seed_brand("Other", LevelType::Trial, None);
    let r1 = db.seed_restaurant(brand.id, "North");
    let r2 = db.seed_restaurant(other.id, "South");

    DeleteBrandUseCase { brands: db.clone() }
        .execute(&operator(), brand.id)
        .await
        .unwrap();

    assert!(!db.brand_row(brand.id).is_live(), "row must remain, stamped");
    assert!(!db.restaurant_row(r1.id).is_live());
    assert!(db.restaurant_row(r2.id).is_live());

    let again = DeleteBrandUseCase { brands: db.clone() }
        .execute(&operator(), brand.id)
        .await;
    assert!(
        matches!(again, Err(AdminServiceError::BrandNotFound)),
        "expected BrandNotFound, got {again:?}"
    );

    let get = GetBrandUseCase { brands: db.clone() }
        .execute(&operator(), brand.id)
        .await;
    assert!(matches!(get, Err(AdminServiceError::BrandNotFound)));
}

#[tokio::test]
async fn should_summarize_brand_stats() {
    let db = MemoryDb::new();
    let brand = db.seed_brand("Mine", LevelType::Standard, None);
    db.seed_restaurant(brand.id, "North");
    db.seed_restaurant(brand.id, "South");
    db.seed_user(Some(brand.id), "cashier", "pw", None);

    let recharge = RechargeUseCase {
        brands: db.clone(),
        wallets: db.clone(),
        points_per_yuan: 1,
    };
    for amount in ["100", "50.5"] {
        recharge
            .execute(
                &operator(),
                RechargeInput {
                    brand_id: brand.id,
                    amount: amount.to_owned(),
                    remark: None,
                },
            )
            .await
            .unwrap();
    }

    let stats = BrandStatsUseCase {
        brands: db.clone(),
        restaurants: db.clone(),
        users: db.clone(),
        wallets: db.clone(),
    }
    .execute(&staff(brand.id), brand.id)
    .await
    .unwrap();

    assert_eq!(stats.restaurants, 2);
    assert_eq!(stats.users, 1);
    assert_eq!(stats.balance, Cents(15_050));
    assert_eq!(stats.total_recharged, Cents(15_050));
    assert_eq!(stats.points, Points(15_050));
}
