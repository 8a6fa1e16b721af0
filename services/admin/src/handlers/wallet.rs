use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;

use banquet_domain::id::BrandId;
use banquet_domain::pagination::{Page, PageRequest};

use crate::domain::types::{RechargeRecord, Wallet};
use crate::error::AdminServiceError;
use crate::extract::CurrentSession;
use crate::state::AppState;
use crate::usecase::wallet::{
    GetWalletUseCase, ListRechargesUseCase, RechargeInput, RechargeUseCase,
};

// ── POST /brands/{id}/recharges ──────────────────────────────────────────────

#[derive(Deserialize)]
pub struct RechargeRequest {
    /// Decimal yuan as a string, e.g. `"199.90"`.
    pub amount: String,
    pub remark: Option<String>,
}

pub async fn recharge(
    State(state): State<AppState>,
    CurrentSession(actor): CurrentSession,
    Path(brand_id): Path<BrandId>,
    Json(body): Json<RechargeRequest>,
) -> Result<impl IntoResponse, AdminServiceError> {
    let usecase = RechargeUseCase {
        brands: state.brand_repo(),
        wallets: state.wallet_repo(),
        points_per_yuan: state.config.points_per_yuan,
    };
    let out = usecase
        .execute(
            &actor,
            RechargeInput {
                brand_id,
                amount: body.amount,
                remark: body.remark,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(out)))
}

// ── GET /brands/{id}/recharges ───────────────────────────────────────────────

pub async fn list_recharges(
    State(state): State<AppState>,
    CurrentSession(actor): CurrentSession,
    Path(brand_id): Path<BrandId>,
    Query(page): Query<PageRequest>,
) -> Result<Json<Page<RechargeRecord>>, AdminServiceError> {
    let usecase = ListRechargesUseCase {
        brands: state.brand_repo(),
        wallets: state.wallet_repo(),
    };
    Ok(Json(usecase.execute(&actor, brand_id, page).await?))
}

// ── GET /brands/{id}/wallet ──────────────────────────────────────────────────

pub async fn get_wallet(
    State(state): State<AppState>,
    CurrentSession(actor): CurrentSession,
    Path(brand_id): Path<BrandId>,
) -> Result<Json<Wallet>, AdminServiceError> {
    let usecase = GetWalletUseCase {
        brands: state.brand_repo(),
        wallets: state.wallet_repo(),
    };
    Ok(Json(usecase.execute(&actor, brand_id).await?))
}
