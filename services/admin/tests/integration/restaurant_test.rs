use banquet_admin::domain::types::RestaurantChanges;
use banquet_admin::error::AdminServiceError;
use banquet_admin::usecase::restaurant::{
    CreateRestaurantInput, CreateRestaurantUseCase, DeleteRestaurantUseCase, GetRestaurantUseCase,
    ListRestaurantsUseCase, UpdateRestaurantUseCase,
};
use banquet_domain::brand::LevelType;
use banquet_domain::pagination::PageRequest;

use crate::helpers::{MemoryDb, operator, staff};

fn input(brand_id: banquet_domain::id::BrandId, name: &str) -> CreateRestaurantInput {
    CreateRestaurantInput {
        brand_id,
        name: name.to_owned(),
        address: Some("88 Nanjing Rd".to_owned()),
        phone: None,
    }
}

#[tokio::test]
async fn should_create_restaurant_under_own_brand() {
    let db = MemoryDb::new();
    let brand = db.seed_brand("Mine", LevelType::Trial, None);

    let restaurant = CreateRestaurantUseCase {
        brands: db.clone(),
        restaurants: db.clone(),
    }
    .execute(&staff(brand.id), input(brand.id, "Flagship"))
    .await
    .unwrap();

    assert_eq!(restaurant.brand_id, brand.id);
    assert_eq!(restaurant.address.as_deref(), Some("88 Nanjing Rd"));
}

#[tokio::test]
async fn should_reject_restaurant_for_deleted_brand() {
    let db = MemoryDb::new();
    let brand = db.seed_brand("Gone", LevelType::Trial, None);
    db.tables().brands[0].delete_at = 1;

    let result = CreateRestaurantUseCase {
        brands: db.clone(),
        restaurants: db.clone(),
    }
    .execute(&operator(), input(brand.id, "Flagship"))
    .await;
    assert!(
        matches!(result, Err(AdminServiceError::BrandNotFound)),
        "expected BrandNotFound, got {result:?}"
    );
}

#[tokio::test]
async fn should_reject_duplicate_name_within_brand_only() {
    let db = MemoryDb::new();
    let a = db.seed_brand("A", LevelType::Trial, None);
    let b = db.seed_brand("B", LevelType::Trial, None);
    db.seed_restaurant(a.id, "Flagship");
    let uc = CreateRestaurantUseCase {
        brands: db.clone(),
        restaurants: db.clone(),
    };

    let dup = uc.execute(&operator(), input(a.id, "Flagship")).await;
    assert!(
        matches!(dup, Err(AdminServiceError::RestaurantAlreadyExists)),
        "expected RestaurantAlreadyExists, got {dup:?}"
    );
    uc.execute(&operator(), input(b.id, "Flagship"))
        .await
        .expect("same name under another brand is allowed");
}

#[tokio::test]
async fn should_hide_other_brands_restaurants_from_staff() {
    let db = MemoryDb::new();
    let mine = db.seed_brand("Mine", LevelType::Trial, None);
    let theirs = db.seed_brand("Theirs", LevelType::Trial, None);
    let r = db.seed_restaurant(theirs.id, "Branch");

    let result = GetRestaurantUseCase {
        restaurants: db.clone(),
    }
    .execute(&staff(mine.id), r.id)
    .await;
    assert!(
        matches!(result, Err(AdminServiceError::Forbidden)),
        "expected Forbidden, got {result:?}"
    );
}

#[tokio::test]
async fn should_list_live_restaurants_of_brand() {
    let db = MemoryDb::new();
    let brand = db.seed_brand("Mine", LevelType::Trial, None);
    db.seed_restaurant(brand.id, "North");
    let south = db.seed_restaurant(brand.id, "South");
    DeleteRestaurantUseCase {
        restaurants: db.clone(),
    }
    .execute(&staff(brand.id), south.id)
    .await
    .unwrap();

    let page = ListRestaurantsUseCase {
        brands: db.clone(),
        restaurants: db.clone(),
    }
    .execute(&staff(brand.id), brand.id, PageRequest::default())
    .await
    .unwrap();
    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].name, "North");
}

#[tokio::test]
async fn should_rename_restaurant_and_refuse_clash() {
    let db = MemoryDb::new();
    let brand = db.seed_brand("Mine", LevelType::Trial, None);
    let north = db.seed_restaurant(brand.id, "North");
    db.seed_restaurant(brand.id, "South");
    let uc = UpdateRestaurantUseCase {
        restaurants: db.clone(),
    };

    let clash = uc
        .execute(
            &staff(brand.id),
            north.id,
            RestaurantChanges {
                name: Some("South".to_owned()),
                ..Default::default()
            },
        )
        .await;
    assert!(
        matches!(clash, Err(AdminServiceError::RestaurantAlreadyExists)),
        "expected RestaurantAlreadyExists, got {clash:?}"
    );

    let renamed = uc
        .execute(
            &staff(brand.id),
            north.id,
            RestaurantChanges {
                name: Some("Riverside".to_owned()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(renamed.name, "Riverside");
}

#[tokio::test]
async fn should_return_not_found_when_deleting_twice() {
    let db = MemoryDb::new();
    let brand = db.seed_brand("Mine", LevelType::Trial, None);
    let r = db.seed_restaurant(brand.id, "North");
    let uc = DeleteRestaurantUseCase {
        restaurants: db.clone(),
    };

    uc.execute(&operator(), r.id).await.unwrap();
    assert!(!db.restaurant_row(r.id).is_live());

    let again = uc.execute(&operator(), r.id).await;
    assert!(
        matches!(again, Err(AdminServiceError::RestaurantNotFound)),
        "expected RestaurantNotFound, got {again:?}"
    );
}
