use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};

use banquet_domain::captcha::{Channel, Scene};

use crate::error::AdminServiceError;
use crate::extract::CurrentSession;
use crate::state::AppState;
use crate::usecase::session::{ResetPasswordInput, ResetPasswordUseCase};

#[derive(Deserialize)]
pub struct CaptchaTarget {
    pub scene: Scene,
    pub channel: Channel,
    pub receiver: String,
}

// ── POST /auth/captcha ───────────────────────────────────────────────────────

pub async fn send_captcha(
    State(state): State<AppState>,
    Json(body): Json<CaptchaTarget>,
) -> Result<impl IntoResponse, AdminServiceError> {
    let issuer = state.captcha_issuer(body.scene, body.channel);
    let issued = issuer.send(&body.receiver).await?;
    Ok((StatusCode::CREATED, Json(issued)))
}

// ── POST /auth/captcha/verify ────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct VerifyCaptchaRequest {
    #[serde(flatten)]
    pub target: CaptchaTarget,
    pub code: String,
}

#[derive(Serialize)]
pub struct VerifyCaptchaResponse {
    pub valid: bool,
}

pub async fn verify_captcha(
    State(state): State<AppState>,
    Json(body): Json<VerifyCaptchaRequest>,
) -> Result<Json<VerifyCaptchaResponse>, AdminServiceError> {
    let issuer = state.captcha_issuer(body.target.scene, body.target.channel);
    let valid = issuer.verify(&body.target.receiver, &body.code).await?;
    Ok(Json(VerifyCaptchaResponse { valid }))
}

// ── DELETE /auth/captcha ─────────────────────────────────────────────────────

pub async fn clean_captcha(
    State(state): State<AppState>,
    _session: CurrentSession,
    Query(query): Query<CaptchaTarget>,
) -> Result<StatusCode, AdminServiceError> {
    let issuer = state.captcha_issuer(query.scene, query.channel);
    issuer.clean(&query.receiver).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── PATCH /auth/password ─────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct ResetPasswordRequest {
    pub account: String,
    pub code: String,
    pub new_password: String,
}

pub async fn reset_password(
    State(state): State<AppState>,
    Json(body): Json<ResetPasswordRequest>,
) -> Result<StatusCode, AdminServiceError> {
    let usecase = ResetPasswordUseCase {
        users: state.user_repo(),
        captcha: state.captcha_issuer(Scene::ResetPassword, Channel::Sms),
        bcrypt_cost: state.config.bcrypt_cost,
    };
    usecase
        .execute(ResetPasswordInput {
            account: body.account,
            code: body.code,
            new_password: body.new_password,
        })
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
