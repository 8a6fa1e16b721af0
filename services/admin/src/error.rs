use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use banquet_core::error::AppError;
use banquet_domain::money::MoneyError;
use banquet_session::SessionError;

/// Admin service domain error variants.
#[derive(Debug, thiserror::Error)]
pub enum AdminServiceError {
    #[error("brand not found")]
    BrandNotFound,
    #[error("restaurant not found")]
    RestaurantNotFound,
    #[error("user not found")]
    UserNotFound,
    #[error("config not found")]
    ConfigNotFound,
    #[error("brand already exists")]
    BrandAlreadyExists,
    #[error("restaurant already exists")]
    RestaurantAlreadyExists,
    #[error("account already exists")]
    AccountAlreadyExists,
    #[error("invalid account or password")]
    InvalidCredential,
    #[error("session expired")]
    InvalidSession,
    #[error("invalid captcha")]
    InvalidCaptcha,
    #[error("invalid amount: {0}")]
    InvalidAmount(#[from] MoneyError),
    #[error("missing data")]
    MissingData,
    #[error("forbidden")]
    Forbidden,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl AdminServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::BrandNotFound => "BRAND_NOT_FOUND",
            Self::RestaurantNotFound => "RESTAURANT_NOT_FOUND",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::ConfigNotFound => "CONFIG_NOT_FOUND",
            Self::BrandAlreadyExists => "BRAND_ALREADY_EXISTS",
            Self::RestaurantAlreadyExists => "RESTAURANT_ALREADY_EXISTS",
            Self::AccountAlreadyExists => "ACCOUNT_ALREADY_EXISTS",
            Self::InvalidCredential => "INVALID_CREDENTIAL",
            Self::InvalidSession => "INVALID_SESSION",
            Self::InvalidCaptcha => "INVALID_CAPTCHA",
            Self::InvalidAmount(_) => "INVALID_AMOUNT",
            Self::MissingData => "MISSING_DATA",
            Self::Forbidden => "FORBIDDEN",
            Self::Internal(_) => "INTERNAL",
        }
    }
}

impl From<SessionError> for AdminServiceError {
    fn from(e: SessionError) -> Self {
        match e {
            // The key lapsed between lookup and update.
            SessionError::MissingField(_) => Self::InvalidSession,
            e => Self::Internal(e.into()),
        }
    }
}

impl From<AppError> for AdminServiceError {
    fn from(e: AppError) -> Self {
        match e {
            AppError::Unauthorized => Self::InvalidSession,
            AppError::Forbidden => Self::Forbidden,
            AppError::NotFound | AppError::Conflict => Self::Internal(e.into()),
            AppError::Internal(inner) => Self::Internal(inner),
        }
    }
}

impl IntoResponse for AdminServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::BrandNotFound
            | Self::RestaurantNotFound
            | Self::UserNotFound
            | Self::ConfigNotFound => StatusCode::NOT_FOUND,
            Self::BrandAlreadyExists | Self::RestaurantAlreadyExists | Self::AccountAlreadyExists => {
                StatusCode::CONFLICT
            }
            Self::InvalidCredential | Self::InvalidSession | Self::InvalidCaptcha => {
                StatusCode::UNAUTHORIZED
            }
            Self::InvalidAmount(_) | Self::MissingData => StatusCode::BAD_REQUEST,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if let Self::Internal(ref e) = self {
            tracing::error!(error = format!("{e:#}"), kind = "INTERNAL", "internal error");
        }
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}
