//! Axum router: maps all URL paths to handlers.

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::api::handlers::{health, herbs, recommend, user};
use crate::api::state::{AppState, SharedState};

/// Build and return the full Axum router.
pub fn build_router(state: AppState) -> Router {
    let shared: SharedState = Arc::new(state);

    Router::new()
        .route("/health", get(health))
        // Catalog
        .route("/api/herbs", get(herbs::list_herbs))
        .route("/api/herbs/{id}", get(herbs::get_herb))
        // Admin
        .route("/api/admin/herbs", post(herbs::create_herb))
        .route(
            "/api/admin/herbs/{id}",
            put(herbs::update_herb).delete(herbs::delete_herb),
        )
        // Recommendations
        .route("/api/ai/recommend", post(recommend::recommend))
        // User data
        .route("/api/user/history", get(user::history))
        .route(
            "/api/user/bookmarks",
            get(user::list_bookmarks).post(user::add_bookmark),
        )
        .route("/api/user/bookmarks/{herb_id}", delete(user::remove_bookmark))
        // Middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(shared)
}
