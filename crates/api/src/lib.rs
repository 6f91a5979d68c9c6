//! HTTP API layer with Axum routes.
//!
//! This crate provides:
//! - REST analytics routes under `/api/v1`
//! - The `LedgerSource` seam and its in-memory implementation
//! - A per-user snapshot cache
//! - JSON error responses

pub mod cache;
pub mod error;
pub mod params;
pub mod routes;
pub mod source;

use std::sync::Arc;

use axum::Router;
use spendwise_core::AnalyticsService;
use spendwise_shared::config::CacheConfig;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::cache::SnapshotCache;
use crate::source::LedgerSource;

/// Application state shared across handlers.
#[derive(Clone, Debug)]
pub struct AppState {
    /// Ledger snapshots per user.
    pub cache: SnapshotCache,
    /// Analytics settings and operations.
    pub analytics: AnalyticsService,
}

impl AppState {
    /// Creates the state over a ledger source.
    #[must_use]
    pub fn new(
        source: Arc<dyn LedgerSource>,
        analytics: AnalyticsService,
        cache_config: &CacheConfig,
    ) -> Self {
        Self {
            cache: SnapshotCache::new(source, cache_config),
            analytics,
        }
    }
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
