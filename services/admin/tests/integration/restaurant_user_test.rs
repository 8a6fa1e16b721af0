use banquet_admin::error::AdminServiceError;
use banquet_admin::usecase::restaurant_user::{
    BootstrapOperatorUseCase, CreateRestaurantUserInput, CreateRestaurantUserUseCase,
    DeleteRestaurantUserUseCase, GetRestaurantUserUseCase, ListRestaurantUsersUseCase,
    UpdateRestaurantUserInput, UpdateRestaurantUserUseCase,
};
use banquet_domain::brand::LevelType;
use banquet_domain::id::{BrandId, RestaurantId};
use banquet_domain::pagination::PageRequest;
use banquet_session::Session;

use crate::helpers::{MemoryDb, TEST_BCRYPT_COST, operator, staff};

fn create_uc(db: &MemoryDb) -> CreateRestaurantUserUseCase<MemoryDb, MemoryDb, MemoryDb> {
    CreateRestaurantUserUseCase {
        brands: db.clone(),
        restaurants: db.clone(),
        users: db.clone(),
        bcrypt_cost: TEST_BCRYPT_COST,
    }
}

fn input(
    brand_id: Option<BrandId>,
    restaurant_id: Option<RestaurantId>,
    account: &str,
) -> CreateRestaurantUserInput {
    CreateRestaurantUserInput {
        brand_id,
        restaurant_id,
        account: account.to_owned(),
        password: "pw".to_owned(),
        name: "Chen".to_owned(),
        phone: None,
    }
}

#[tokio::test]
async fn should_create_staff_with_hashed_password() {
    let db = MemoryDb::new();
    let brand = db.seed_brand("Mine", LevelType::Trial, None);
    let restaurant = db.seed_restaurant(brand.id, "North");

    let user = create_uc(&db)
        .execute(
            &staff(brand.id),
            input(Some(brand.id), Some(restaurant.id), "cashier"),
        )
        .await
        .unwrap();

    assert_eq!(user.brand_id, Some(brand.id));
    assert_eq!(user.restaurant_id, Some(restaurant.id));
    assert_ne!(user.password_hash, "pw");
    assert!(bcrypt::verify("pw", &user.password_hash).unwrap());

    let json = serde_json::to_value(&user).unwrap();
    assert!(json.get("password_hash").is_none(), "hash must never be serialized");
}

#[tokio::test]
async fn should_reject_restaurant_from_another_brand() {
    let db = MemoryDb::new();
    let mine = db.seed_brand("Mine", LevelType::Trial, None);
    let theirs = db.seed_brand("Theirs", LevelType::Trial, None);
    let foreign = db.seed_restaurant(theirs.id, "Branch");

    let result = create_uc(&db)
        .execute(
            &operator(),
            input(Some(mine.id), Some(foreign.id), "cashier"),
        )
        .await;
    assert!(
        matches!(result, Err(AdminServiceError::RestaurantNotFound)),
        "expected RestaurantNotFound, got {result:?}"
    );
}

#[tokio::test]
async fn should_reject_duplicate_account() {
    let db = MemoryDb::new();
    let brand = db.seed_brand("Mine", LevelType::Trial, None);
    db.seed_user(Some(brand.id), "cashier", "pw", None);

    let result = create_uc(&db)
        .execute(&operator(), input(Some(brand.id), None, "cashier"))
        .await;
    assert!(
        matches!(result, Err(AdminServiceError::AccountAlreadyExists)),
        "expected AccountAlreadyExists, got {result:?}"
    );
}

#[tokio::test]
async fn should_forbid_staff_from_creating_platform_operators() {
    let db = MemoryDb::new();
    let brand = db.seed_brand("Mine", LevelType::Trial, None);

    let result = create_uc(&db)
        .execute(&staff(brand.id), input(None, None, "root2"))
        .await;
    assert!(
        matches!(result, Err(AdminServiceError::Forbidden)),
        "expected Forbidden, got {result:?}"
    );
}

#[tokio::test]
async fn should_confine_user_lookup_to_own_brand() {
    let db = MemoryDb::new();
    let mine = db.seed_brand("Mine", LevelType::Trial, None);
    let theirs = db.seed_brand("Theirs", LevelType::Trial, None);
    let outsider = db.seed_user(Some(theirs.id), "outsider", "pw", None);

    let result = GetRestaurantUserUseCase { users: db.clone() }
        .execute(&staff(mine.id), outsider.id)
        .await;
    assert!(
        matches!(result, Err(AdminServiceError::Forbidden)),
        "expected Forbidden, got {result:?}"
    );
}

#[tokio::test]
async fn should_list_brand_users() {
    let db = MemoryDb::new();
    let brand = db.seed_brand("Mine", LevelType::Trial, None);
    db.seed_user(Some(brand.id), "a", "pw", None);
    db.seed_user(Some(brand.id), "b", "pw", None);
    db.seed_user(None, "ops", "pw", None);

    let page = ListRestaurantUsersUseCase {
        brands: db.clone(),
        users: db.clone(),
    }
    .execute(&operator(), brand.id, PageRequest::default())
    .await
    .unwrap();
    assert_eq!(page.total, 2);
}

#[tokio::test]
async fn should_update_profile_and_password() {
    let db = MemoryDb::new();
    let brand = db.seed_brand("Mine", LevelType::Trial, None);
    let user = db.seed_user(Some(brand.id), "cashier", "old", None);

    let updated = UpdateRestaurantUserUseCase {
        restaurants: db.clone(),
        users: db.clone(),
        bcrypt_cost: TEST_BCRYPT_COST,
    }
    .execute(
        &staff(brand.id),
        user.id,
        UpdateRestaurantUserInput {
            name: Some("Zhang".to_owned()),
            phone: None,
            restaurant_id: None,
            password: Some("new".to_owned()),
        },
    )
    .await
    .unwrap();

    assert_eq!(updated.name, "Zhang");
    assert!(bcrypt::verify("new", &updated.password_hash).unwrap());
}

#[tokio::test]
async fn should_reject_empty_update() {
    let db = MemoryDb::new();
    let user = db.seed_user(None, "ops", "pw", None);

    let result = UpdateRestaurantUserUseCase {
        restaurants: db.clone(),
        users: db.clone(),
        bcrypt_cost: TEST_BCRYPT_COST,
    }
    .execute(
        &operator(),
        user.id,
        UpdateRestaurantUserInput {
            name: None,
            phone: None,
            restaurant_id: None,
            password: None,
        },
    )
    .await;
    assert!(
        matches!(result, Err(AdminServiceError::MissingData)),
        "expected MissingData, got {result:?}"
    );
}

#[tokio::test]
async fn should_forbid_deleting_own_account() {
    let db = MemoryDb::new();
    let me = db.seed_user(None, "ops", "pw", None);
    let actor = Session {
        user_id: me.id,
        ..operator()
    };

    let result = DeleteRestaurantUserUseCase { users: db.clone() }
        .execute(&actor, me.id)
        .await;
    assert!(
        matches!(result, Err(AdminServiceError::Forbidden)),
        "expected Forbidden, got {result:?}"
    );
}

#[tokio::test]
async fn should_soft_delete_user_once() {
    let db = MemoryDb::new();
    let brand = db.seed_brand("Mine", LevelType::Trial, None);
    let user = db.seed_user(Some(brand.id), "cashier", "pw", None);
    let uc = DeleteRestaurantUserUseCase { users: db.clone() };

    uc.execute(&staff(brand.id), user.id).await.unwrap();
    let again = uc.execute(&staff(brand.id), user.id).await;
    assert!(
        matches!(again, Err(AdminServiceError::UserNotFound)),
        "expected UserNotFound, got {again:?}"
    );
    assert_eq!(db.tables().users.len(), 1, "row is stamped, not removed");
}

#[tokio::test]
async fn should_bootstrap_operator_once() {
    let db = MemoryDb::new();
    let uc = BootstrapOperatorUseCase {
        users: db.clone(),
        bcrypt_cost: TEST_BCRYPT_COST,
    };

    assert!(uc.execute("root", "pw").await.unwrap());
    assert!(!uc.execute("root", "other").await.unwrap());

    let tables = db.tables();
    assert_eq!(tables.users.len(), 1);
    assert_eq!(tables.users[0].value.brand_id, None);
}
