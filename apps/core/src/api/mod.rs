//! HTTP surface of the service.

pub mod auth;
pub mod handlers;
pub mod router;
pub mod state;

pub use router::build_router;
pub use state::AppState;
