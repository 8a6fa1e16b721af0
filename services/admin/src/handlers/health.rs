use axum::{extract::State, http::StatusCode};
use deadpool_redis::redis;

use crate::state::AppState;

// ── GET /readyz ──────────────────────────────────────────────────────────────

/// Ready once both Postgres and Redis answer.
pub async fn readyz(State(state): State<AppState>) -> StatusCode {
    if let Err(e) = state.db.ping().await {
        tracing::warn!(error = %e, "readiness: database unreachable");
        return StatusCode::SERVICE_UNAVAILABLE;
    }
    let mut conn = match state.redis.get().await {
        Ok(conn) => conn,
        Err(e) => {
            tracing::warn!(error = %e, "readiness: redis pool unavailable");
            return StatusCode::SERVICE_UNAVAILABLE;
        }
    };
    let pong: redis::RedisResult<String> = redis::cmd("PING").query_async(&mut conn).await;
    match pong {
        Ok(_) => StatusCode::OK,
        Err(e) => {
            tracing::warn!(error = %e, "readiness: redis unreachable");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}
