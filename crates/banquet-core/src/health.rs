use axum::http::StatusCode;

/// `GET /healthz`: the process is up. Dependency checks belong in each
/// service's readiness probe.
pub async fn healthz() -> StatusCode {
    StatusCode::OK
}
