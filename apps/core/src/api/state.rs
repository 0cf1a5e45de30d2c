//! Shared application state for the web server.

use sqlx::sqlite::SqlitePool;
use std::sync::Arc;

use crate::nlp::SymptomAnalyzer;
use crate::rate_limiter::RateLimiter;

/// Shared state injected into every Axum handler.
pub struct AppState {
    pub pool: SqlitePool,
    pub analyzer: SymptomAnalyzer,
    /// Applied to recommendation requests only.
    pub rate_limiter: RateLimiter,
}

impl AppState {
    pub fn new(pool: SqlitePool, analyzer: SymptomAnalyzer, rate_limiter: RateLimiter) -> Self {
        Self {
            pool,
            analyzer,
            rate_limiter,
        }
    }
}

pub type SharedState = Arc<AppState>;
