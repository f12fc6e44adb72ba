use std::sync::Arc;

use axum::{
    Router,
    http::{HeaderValue, Method, header},
    middleware,
    routing::{get, post},
};
use core_hh::{AuthConfig, get_cors_origin, health_check, liveness};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use data_model_hh::db::DbPool;

use crate::auth;

pub mod houses;
pub mod logging_middleware;
pub mod users;

/// Shared state handed to every handler: the process-wide connection pool and
/// the token signing configuration.
#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub auth: Arc<AuthConfig>,
}

impl AppState {
    pub fn new(pool: DbPool, auth: AuthConfig) -> Self {
        AppState {
            pool,
            auth: Arc::new(auth),
        }
    }
}

//
// Router
//

pub fn router(state: AppState) -> Router {
    // Credentialed CORS for the single frontend origin; cookies require
    // allow_credentials and an explicit (non-wildcard) origin.
    let cors = CorsLayer::new()
        .allow_origin(
            get_cors_origin()
                .parse::<HeaderValue>()
                .expect("CORS_ORIGIN must be a valid header value"),
        )
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true);

    // Session-gated routes
    let protected_routes = Router::new()
        .route("/authenticate", get(auth::get_authenticate))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::require_auth));

    Router::new()
        .route("/", get(liveness))
        .route("/health", get(health_check))
        .route("/register", post(users::post_register))
        .route("/userLogin", post(users::post_user_login))
        .route("/userByEmail/{email}", get(users::get_user_by_email))
        .route("/houses", post(houses::post_house))
        .route("/jwt", post(auth::post_issue_token))
        .route("/logout", post(auth::post_logout))
        .merge(protected_routes)
        .with_state(state)
        .layer(cors)
        // Custom route access logging
        .layer(middleware::from_fn(logging_middleware::log_route_access))
        // Tracing middleware
        .layer(TraceLayer::new_for_http())
}
