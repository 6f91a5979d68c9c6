//! Spendwise API Server
//!
//! Main entry point for the Spendwise analytics service.

use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use spendwise_api::source::{InMemoryLedger, LedgerSource};
use spendwise_api::{AppState, create_router};
use spendwise_core::AnalyticsService;
use spendwise_shared::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "spendwise=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load().context("Failed to load configuration")?;
    let analytics = AnalyticsService::from_config(&config.analytics)
        .context("Invalid analytics configuration")?;
    info!(
        timezone = %config.analytics.timezone,
        warning_percent = config.analytics.warning_percent,
        critical_percent = config.analytics.critical_percent,
        currency = %config.analytics.currency,
        "Analytics configured"
    );

    // Ledger source
    let ledger = match &config.data.seed_path {
        Some(path) => InMemoryLedger::from_seed_file(path)
            .await
            .with_context(|| format!("Failed to load seed file {path}"))?,
        None => {
            warn!("No seed file configured, starting with an empty ledger");
            InMemoryLedger::new()
        }
    };
    let source: Arc<dyn LedgerSource> = Arc::new(ledger);

    // Create application state
    let state = AppState::new(source, analytics, &config.cache);

    // Create router
    let app = create_router(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutting down");
}
