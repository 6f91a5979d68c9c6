//! API route definitions.

use axum::Router;

use crate::AppState;

pub mod analytics;
pub mod dashboard;
pub mod health;
pub mod reports;
pub mod snapshots;

/// Creates the API router with all routes.
///
/// Identity is resolved upstream, so every user-scoped route takes the owner
/// as a `{user_id}` path segment.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(analytics::routes())
        .merge(dashboard::routes())
        .merge(reports::routes())
        .merge(snapshots::routes())
}
