// Herbwise Backend Entry Point
// Herb catalog, symptom analysis and recommendation API

mod api;
mod config;
mod database;
mod error;
mod models;
mod nlp;
mod rate_limiter;
mod telemetry;

#[cfg(test)]
mod tests;

use std::sync::Arc;

use api::AppState;
use config::AppConfig;
use nlp::{KnowledgeBase, SymptomAnalyzer};
use rate_limiter::RateLimiter;
use tokio::net::TcpListener;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env()?;
    telemetry::init(config.log_format)?;

    info!("Starting Herbwise backend...");

    // Reference tables are checked once; a broken table must never reach a request
    let knowledge = Arc::new(KnowledgeBase::ayurvedic());
    knowledge.validate()?;
    info!(
        categories = knowledge.categories.len(),
        symptom_keys = knowledge.symptom_herbs.len(),
        "Knowledge base loaded"
    );

    let pool = database::init_db(&config.database_url).await?;

    let state = AppState::new(
        pool,
        SymptomAnalyzer::new(knowledge),
        RateLimiter::new(config.rate_limit, config.rate_window),
    );
    let app = api::build_router(state);

    let listener = TcpListener::bind(config.bind_addr).await?;
    info!("Server listening on http://{}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
