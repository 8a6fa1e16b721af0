use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use banquet_session::{Session, SessionToken};

use crate::error::AdminServiceError;
use crate::state::AppState;
use crate::usecase::session::ResolveSessionUseCase;

/// The caller's live session. Rejects with `INVALID_SESSION` when the token
/// is missing, unknown or expired, or its user has been deleted.
pub struct CurrentSession(pub Session);

impl FromRequestParts<AppState> for CurrentSession {
    type Rejection = AdminServiceError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = SessionToken::from_request_parts(parts, state).await?;
        let usecase = ResolveSessionUseCase {
            users: state.user_repo(),
            sessions: state.session_store(),
        };
        let session = usecase.execute(token.as_str()).await?;
        Ok(Self(session))
    }
}
