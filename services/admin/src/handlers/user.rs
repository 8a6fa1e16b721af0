use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;

use banquet_domain::id::{BrandId, RestaurantId, UserId};
use banquet_domain::pagination::{Page, PageRequest};

use crate::domain::types::RestaurantUser;
use crate::error::AdminServiceError;
use crate::extract::CurrentSession;
use crate::state::AppState;
use crate::usecase::restaurant_user::{
    CreateRestaurantUserInput, CreateRestaurantUserUseCase, DeleteRestaurantUserUseCase,
    GetRestaurantUserUseCase, ListRestaurantUsersUseCase, UpdateRestaurantUserInput,
    UpdateRestaurantUserUseCase,
};

// ── GET /brands/{id}/users ───────────────────────────────────────────────────

pub async fn list_users(
    State(state): State<AppState>,
    CurrentSession(actor): CurrentSession,
    Path(brand_id): Path<BrandId>,
    Query(page): Query<PageRequest>,
) -> Result<Json<Page<RestaurantUser>>, AdminServiceError> {
    let usecase = ListRestaurantUsersUseCase {
        brands: state.brand_repo(),
        users: state.user_repo(),
    };
    Ok(Json(usecase.execute(&actor, brand_id, page).await?))
}

// ── POST /users ──────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateUserRequest {
    pub brand_id: Option<BrandId>,
    pub restaurant_id: Option<RestaurantId>,
    pub account: String,
    pub password: String,
    pub name: String,
    pub phone: Option<String>,
}

pub async fn create_user(
    State(state): State<AppState>,
    CurrentSession(actor): CurrentSession,
    Json(body): Json<CreateUserRequest>,
) -> Result<impl IntoResponse, AdminServiceError> {
    let usecase = CreateRestaurantUserUseCase {
        brands: state.brand_repo(),
        restaurants: state.restaurant_repo(),
        users: state.user_repo(),
        bcrypt_cost: state.config.bcrypt_cost,
    };
    let user = usecase
        .execute(
            &actor,
            CreateRestaurantUserInput {
                brand_id: body.brand_id,
                restaurant_id: body.restaurant_id,
                account: body.account,
                password: body.password,
                name: body.name,
                phone: body.phone,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(user)))
}

// ── GET /users/{id} ──────────────────────────────────────────────────────────

pub async fn get_user(
    State(state): State<AppState>,
    CurrentSession(actor): CurrentSession,
    Path(id): Path<UserId>,
) -> Result<Json<RestaurantUser>, AdminServiceError> {
    let usecase = GetRestaurantUserUseCase {
        users: state.user_repo(),
    };
    Ok(Json(usecase.execute(&actor, id).await?))
}

// ── PATCH /users/{id} ────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub restaurant_id: Option<RestaurantId>,
    pub password: Option<String>,
}

pub async fn update_user(
    State(state): State<AppState>,
    CurrentSession(actor): CurrentSession,
    Path(id): Path<UserId>,
    Json(body): Json<UpdateUserRequest>,
) -> Result<Json<RestaurantUser>, AdminServiceError> {
    let usecase = UpdateRestaurantUserUseCase {
        restaurants: state.restaurant_repo(),
        users: state.user_repo(),
        bcrypt_cost: state.config.bcrypt_cost,
    };
    let user = usecase
        .execute(
            &actor,
            id,
            UpdateRestaurantUserInput {
                name: body.name,
                phone: body.phone,
                restaurant_id: body.restaurant_id,
                password: body.password,
            },
        )
        .await?;
    Ok(Json(user))
}

// ── DELETE /users/{id} ───────────────────────────────────────────────────────

pub async fn delete_user(
    State(state): State<AppState>,
    CurrentSession(actor): CurrentSession,
    Path(id): Path<UserId>,
) -> Result<StatusCode, AdminServiceError> {
    let usecase = DeleteRestaurantUserUseCase {
        users: state.user_repo(),
    };
    usecase.execute(&actor, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
