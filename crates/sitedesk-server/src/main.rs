// ============================================================================
// SiteDesk Server - Entry Point
// File: crates/sitedesk-server/src/main.rs
// ============================================================================

use std::net::SocketAddr;

use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info};

use sitedesk_api::router::router;
use sitedesk_api::state::AppState;
use sitedesk_infrastructure::database::connection;
use sitedesk_shared::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env
    dotenvy::dotenv().ok();

    // Initialize telemetry
    sitedesk_shared::telemetry::init_telemetry();

    info!("SiteDesk server starting...");

    // Load configuration
    let config = match AppConfig::load() {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    // Connect to Database
    info!("Connecting to database...");
    let pool =
        connection::create_pool(&config.database.url, config.database.max_connections).await?;
    info!("Database connection established.");

    // Bind address is needed after config moves into the state.
    let host: std::net::IpAddr = config.app.host.parse()?;
    let port = config.app.port;

    // Wire services and build the router
    let state = AppState::new(pool, config);
    let app = router(state).layer(
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([
                axum::http::Method::GET,
                axum::http::Method::POST,
                axum::http::Method::PUT,
                axum::http::Method::DELETE,
                axum::http::Method::OPTIONS,
            ])
            .allow_headers([
                axum::http::header::CONTENT_TYPE,
                axum::http::header::AUTHORIZATION,
            ]),
    );

    let addr = SocketAddr::from((host, port));
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
