//! HTTP Request Handlers
//!
//! Demonstration routes wired through the Allow header middleware.

pub mod documents;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Create all API routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(documents::routes())
}
