use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;

use banquet_domain::brand::LevelType;
use banquet_domain::id::BrandId;
use banquet_domain::pagination::{Page, PageRequest};

use crate::domain::types::{Brand, BrandChanges, BrandStats};
use crate::error::AdminServiceError;
use crate::extract::CurrentSession;
use crate::state::AppState;
use crate::usecase::brand::{
    CreateBrandInput, CreateBrandUseCase, DeleteBrandUseCase, GetBrandUseCase, ListBrandsUseCase,
    UpdateBrandUseCase,
};
use crate::usecase::stats::BrandStatsUseCase;

// ── GET /brands ──────────────────────────────────────────────────────────────

pub async fn list_brands(
    State(state): State<AppState>,
    CurrentSession(actor): CurrentSession,
    Query(page): Query<PageRequest>,
) -> Result<Json<Page<Brand>>, AdminServiceError> {
    let usecase = ListBrandsUseCase {
        brands: state.brand_repo(),
    };
    Ok(Json(usecase.execute(&actor, page).await?))
}

// ── POST /brands ─────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateBrandRequest {
    pub name: String,
    pub logo: Option<String>,
    pub contact: Option<String>,
    pub phone: Option<String>,
    pub level_type: Option<LevelType>,
    #[serde(default, deserialize_with = "banquet_core::serde::from_datetime_opt")]
    pub expired_date: Option<DateTime<Utc>>,
}

pub async fn create_brand(
    State(state): State<AppState>,
    CurrentSession(actor): CurrentSession,
    Json(body): Json<CreateBrandRequest>,
) -> Result<impl IntoResponse, AdminServiceError> {
    let usecase = CreateBrandUseCase {
        brands: state.brand_repo(),
    };
    let brand = usecase
        .execute(
            &actor,
            CreateBrandInput {
                name: body.name,
                logo: body.logo,
                contact: body.contact,
                phone: body.phone,
                level_type: body.level_type,
                expired_date: body.expired_date,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(brand)))
}

// ── GET /brands/{id} ─────────────────────────────────────────────────────────

pub async fn get_brand(
    State(state): State<AppState>,
    CurrentSession(actor): CurrentSession,
    Path(id): Path<BrandId>,
) -> Result<Json<Brand>, AdminServiceError> {
    let usecase = GetBrandUseCase {
        brands: state.brand_repo(),
    };
    Ok(Json(usecase.execute(&actor, id).await?))
}

// ── PATCH /brands/{id} ───────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateBrandRequest {
    pub name: Option<String>,
    pub logo: Option<String>,
    pub contact: Option<String>,
    pub phone: Option<String>,
    pub level_type: Option<LevelType>,
    #[serde(default, deserialize_with = "banquet_core::serde::from_datetime_opt")]
    pub expired_date: Option<DateTime<Utc>>,
}

pub async fn update_brand(
    State(state): State<AppState>,
    CurrentSession(actor): CurrentSession,
    Path(id): Path<BrandId>,
    Json(body): Json<UpdateBrandRequest>,
) -> Result<Json<Brand>, AdminServiceError> {
    let usecase = UpdateBrandUseCase {
        brands: state.brand_repo(),
    };
    let brand = usecase
        .execute(
            &actor,
            id,
            BrandChanges {
                name: body.name,
                logo: body.logo,
                contact: body.contact,
                phone: body.phone,
                level_type: body.level_type,
                expired_date: body.expired_date,
            },
        )
        .await?;
    Ok(Json(brand))
}

// ── DELETE /brands/{id} ──────────────────────────────────────────────────────

pub async fn delete_brand(
    State(state): State<AppState>,
    CurrentSession(actor): CurrentSession,
    Path(id): Path<BrandId>,
) -> Result<StatusCode, AdminServiceError> {
    let usecase = DeleteBrandUseCase {
        brands: state.brand_repo(),
    };
    usecase.execute(&actor, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── GET /brands/{id}/stats ───────────────────────────────────────────────────

pub async fn get_brand_stats(
    State(state): State<AppState>,
    CurrentSession(actor): CurrentSession,
    Path(id): Path<BrandId>,
) -> Result<Json<BrandStats>, AdminServiceError> {
    let usecase = BrandStatsUseCase {
        brands: state.brand_repo(),
        restaurants: state.restaurant_repo(),
        users: state.user_repo(),
        wallets: state.wallet_repo(),
    };
    Ok(Json(usecase.execute(&actor, id).await?))
}
