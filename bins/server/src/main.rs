//! Txlog API Server
//!
//! Main entry point for the Txlog transaction logging service.

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use txlog_api::{AppState, create_router};
use txlog_shared::{AppConfig, TokenService};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "txlog=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load().context("Failed to load configuration")?;

    // Connect to database
    let db = txlog_db::connect_with(&config.database)
        .await
        .context("Failed to connect to database")?;
    info!(
        max_connections = config.database.max_connections,
        "Connected to database"
    );

    if config.database.run_migrations {
        txlog_db::migrate(&db)
            .await
            .context("Failed to run migrations")?;
        info!("Database schema is up to date");
    }

    // Create token service; the secret itself is never logged
    let token_service = TokenService::new(config.jwt.to_token_config());
    info!(
        token_ttl_secs = token_service.token_ttl_secs(),
        "Token service configured"
    );

    // Create application state and router
    let state = AppState::new(db, token_service);
    let app = create_router(state, config.server.request_timeout());

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
