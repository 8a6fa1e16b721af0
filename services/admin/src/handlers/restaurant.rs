use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;

use banquet_domain::id::{BrandId, RestaurantId};
use banquet_domain::pagination::{Page, PageRequest};

use crate::domain::types::{Restaurant, RestaurantChanges};
use crate::error::AdminServiceError;
use crate::extract::CurrentSession;
use crate::state::AppState;
use crate::usecase::restaurant::{
    CreateRestaurantInput, CreateRestaurantUseCase, DeleteRestaurantUseCase, GetRestaurantUseCase,
    ListRestaurantsUseCase, UpdateRestaurantUseCase,
};

// ── GET /brands/{id}/restaurants ─────────────────────────────────────────────

pub async fn list_restaurants(
    State(state): State<AppState>,
    CurrentSession(actor): CurrentSession,
    Path(brand_id): Path<BrandId>,
    Query(page): Query<PageRequest>,
) -> Result<Json<Page<Restaurant>>, AdminServiceError> {
    let usecase = ListRestaurantsUseCase {
        brands: state.brand_repo(),
        restaurants: state.restaurant_repo(),
    };
    Ok(Json(usecase.execute(&actor, brand_id, page).await?))
}

// ── POST /restaurants ────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateRestaurantRequest {
    pub brand_id: BrandId,
    pub name: String,
    pub address: Option<String>,
    pub phone: Option<String>,
}

pub async fn create_restaurant(
    State(state): State<AppState>,
    CurrentSession(actor): CurrentSession,
    Json(body): Json<CreateRestaurantRequest>,
) -> Result<impl IntoResponse, AdminServiceError> {
    let usecase = CreateRestaurantUseCase {
        brands: state.brand_repo(),
        restaurants: state.restaurant_repo(),
    };
    let restaurant = usecase
        .execute(
            &actor,
            CreateRestaurantInput {
                brand_id: body.brand_id,
                name: body.name,
                address: body.address,
                phone: body.phone,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(restaurant)))
}

// ── GET /restaurants/{id} ────────────────────────────────────────────────────

pub async fn get_restaurant(
    State(state): State<AppState>,
    CurrentSession(actor): CurrentSession,
    Path(id): Path<RestaurantId>,
) -> Result<Json<Restaurant>, AdminServiceError> {
    let usecase = GetRestaurantUseCase {
        restaurants: state.restaurant_repo(),
    };
    Ok(Json(usecase.execute(&actor, id).await?))
}

// ── PATCH /restaurants/{id} ──────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateRestaurantRequest {
    pub name: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
}

pub async fn update_restaurant(
    State(state): State<AppState>,
    CurrentSession(actor): CurrentSession,
    Path(id): Path<RestaurantId>,
    Json(body): Json<UpdateRestaurantRequest>,
) -> Result<Json<Restaurant>, AdminServiceError> {
    let usecase = UpdateRestaurantUseCase {
        restaurants: state.restaurant_repo(),
    };
    let restaurant = usecase
        .execute(
            &actor,
            id,
            RestaurantChanges {
                name: body.name,
                address: body.address,
                phone: body.phone,
            },
        )
        .await?;
    Ok(Json(restaurant))
}

// ── DELETE /restaurants/{id} ─────────────────────────────────────────────────

pub async fn delete_restaurant(
    State(state): State<AppState>,
    CurrentSession(actor): CurrentSession,
    Path(id): Path<RestaurantId>,
) -> Result<StatusCode, AdminServiceError> {
    let usecase = DeleteRestaurantUseCase {
        restaurants: state.restaurant_repo(),
    };
    usecase.execute(&actor, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
