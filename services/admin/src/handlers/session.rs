use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use banquet_domain::id::{BrandId, RestaurantId, UserId};
use banquet_session::{Session, SessionToken};

use crate::error::AdminServiceError;
use crate::extract::CurrentSession;
use crate::state::AppState;
use crate::usecase::session::{LoginInput, LoginUseCase, LogoutUseCase, RefreshSessionUseCase};

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    /// Token to send back in `x-banquet-session`.
    pub id: String,
    pub user_id: UserId,
    pub account: String,
    pub brand_id: Option<BrandId>,
    pub restaurant_id: Option<RestaurantId>,
    #[serde(serialize_with = "banquet_core::serde::to_datetime")]
    pub create_at: DateTime<Utc>,
    #[serde(serialize_with = "banquet_core::serde::to_datetime")]
    pub update_at: DateTime<Utc>,
    #[serde(serialize_with = "banquet_core::serde::to_datetime")]
    pub expire_at: DateTime<Utc>,
    pub store: Map<String, Value>,
}

impl From<Session> for SessionResponse {
    fn from(s: Session) -> Self {
        Self {
            id: s.id,
            user_id: s.user_id,
            account: s.account,
            brand_id: s.brand_id,
            restaurant_id: s.restaurant_id,
            create_at: s.create_at,
            update_at: s.update_at,
            expire_at: s.expire_at,
            store: s.store,
        }
    }
}

// ── POST /auth/session ───────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct LoginRequest {
    pub account: String,
    pub password: String,
}

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<impl IntoResponse, AdminServiceError> {
    let usecase = LoginUseCase {
        users: state.user_repo(),
        sessions: state.session_store(),
    };
    let session = usecase
        .execute(LoginInput {
            account: body.account,
            password: body.password,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(SessionResponse::from(session))))
}

// ── GET /auth/session ────────────────────────────────────────────────────────

pub async fn get_session(CurrentSession(session): CurrentSession) -> Json<SessionResponse> {
    Json(SessionResponse::from(session))
}

// ── PATCH /auth/session ──────────────────────────────────────────────────────

pub async fn refresh_session(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
) -> Result<Json<SessionResponse>, AdminServiceError> {
    let usecase = RefreshSessionUseCase {
        users: state.user_repo(),
        sessions: state.session_store(),
    };
    let session = usecase.execute(&session).await?;
    Ok(Json(SessionResponse::from(session)))
}

// ── DELETE /auth/session ─────────────────────────────────────────────────────

pub async fn logout(
    State(state): State<AppState>,
    token: SessionToken,
) -> Result<StatusCode, AdminServiceError> {
    let usecase = LogoutUseCase {
        sessions: state.session_store(),
    };
    usecase.execute(token.as_str()).await?;
    Ok(StatusCode::NO_CONTENT)
}
