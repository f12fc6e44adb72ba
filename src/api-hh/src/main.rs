use core_hh::{check_non_empty_env_vars, get_api_base_url, get_auth_config, get_db_pool, setup_logging};

use api_hh::routes;
use api_hh::routes::AppState;

#[tokio::main]
async fn main() {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    setup_logging("api_hh=debug,tower_http=debug");

    check_non_empty_env_vars(&["DATABASE_URL", "ACCESS_TOKEN_SECRET"]);

    let pool = get_db_pool().await;
    let auth_config = get_auth_config();

    let app = routes::router(AppState::new(pool, auth_config));

    let addr = get_api_base_url().expect("Invalid HOST or PORT");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .unwrap_or_else(|e| panic!("Failed to bind to address {}: {}", addr, e));

    tracing::info!("server is running on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .unwrap();
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c().await.expect("Failed to listen for ctrl-c");
    tracing::info!("shutdown signal received");
}
