use axum::http::StatusCode;

/// GET / - liveness string the original frontend polls for.
pub async fn liveness() -> (StatusCode, &'static str) {
    (StatusCode::OK, "server is running")
}

/// GET /health - liveness alias for orchestration probes.
pub async fn health_check() -> (StatusCode, &'static str) {
    (StatusCode::OK, "healthy")
}
