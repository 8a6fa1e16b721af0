use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;

use crate::domain::types::SystemConfig;
use crate::error::AdminServiceError;
use crate::extract::CurrentSession;
use crate::state::AppState;
use crate::usecase::system_config::{
    DeleteConfigUseCase, GetConfigUseCase, ListConfigsUseCase, PutConfigInput, PutConfigUseCase,
};

// ── GET /configs ─────────────────────────────────────────────────────────────

pub async fn list_configs(
    State(state): State<AppState>,
    _session: CurrentSession,
) -> Result<Json<Vec<SystemConfig>>, AdminServiceError> {
    let usecase = ListConfigsUseCase {
        configs: state.config_repo(),
    };
    Ok(Json(usecase.execute().await?))
}

// ── GET /configs/{key} ───────────────────────────────────────────────────────

pub async fn get_config(
    State(state): State<AppState>,
    _session: CurrentSession,
    Path(key): Path<String>,
) -> Result<Json<SystemConfig>, AdminServiceError> {
    let usecase = GetConfigUseCase {
        configs: state.config_repo(),
    };
    Ok(Json(usecase.execute(&key).await?))
}

// ── PUT /configs/{key} ───────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct PutConfigRequest {
    pub value: String,
    pub remark: Option<String>,
}

pub async fn put_config(
    State(state): State<AppState>,
    CurrentSession(actor): CurrentSession,
    Path(key): Path<String>,
    Json(body): Json<PutConfigRequest>,
) -> Result<Json<SystemConfig>, AdminServiceError> {
    let usecase = PutConfigUseCase {
        configs: state.config_repo(),
    };
    let config = usecase
        .execute(
            &actor,
            PutConfigInput {
                key,
                value: body.value,
                remark: body.remark,
            },
        )
        .await?;
    Ok(Json(config))
}

// ── DELETE /configs/{key} ────────────────────────────────────────────────────

pub async fn delete_config(
    State(state): State<AppState>,
    CurrentSession(actor): CurrentSession,
    Path(key): Path<String>,
) -> Result<StatusCode, AdminServiceError> {
    let usecase = DeleteConfigUseCase {
        configs: state.config_repo(),
    };
    usecase.execute(&actor, &key).await?;
    Ok(StatusCode::NO_CONTENT)
}
