//! API routes module

pub mod auth;
pub mod tools;

use axum::Router;

use crate::api::state::SharedState;

/// Create the combined API router
pub fn router() -> Router<SharedState> {
    Router::new()
        // OAuth routes
        .nest("/auth", auth::router())
        // Voice agent tool routes
        .nest("/tools", tools::router())
}
