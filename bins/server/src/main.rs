//! Claimdesk API Server
//!
//! Main entry point for the Claimdesk backend service.

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use claimdesk_api::{AppState, create_router};
use claimdesk_db::{connect_with, install};
use claimdesk_shared::{AppConfig, JwtService};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "claimdesk=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::load().context("Failed to load configuration")?;

    let db = connect_with(&config.database)
        .await
        .context("Failed to connect to database")?;
    info!("Connected to database");

    if config.dimensions.sync_on_startup {
        let message = install::after_install(&db)
            .await
            .context("Accounting dimension sync failed")?;
        info!(%message, "Accounting dimension fields in sync");
    }

    let jwt_service = JwtService::from_config(&config.jwt);

    info!(
        cash_mode_of_payment = %config.expense.cash_mode_of_payment,
        "Expense settings loaded"
    );

    let state = AppState::new(db, jwt_service, config.expense.clone());

    let app = create_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
