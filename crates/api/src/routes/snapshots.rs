//! Snapshot cache routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::post,
};
use serde::Serialize;

use crate::{AppState, error::ApiResult, params};

/// Creates the cache routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/users/{user_id}/cache/refresh", post(refresh_snapshot))
}

/// Response for a refresh.
#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    /// Always true.
    pub success: bool,
    /// Always true.
    pub refreshed: bool,
    /// Expense records now cached.
    pub expenses: usize,
    /// Income records now cached.
    pub income: usize,
    /// Budgets now cached.
    pub budgets: usize,
}

/// POST /users/{user_id}/cache/refresh
async fn refresh_snapshot(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> ApiResult<Json<RefreshResponse>> {
    let user = params::user_id(&user_id)?;
    let snapshot = state.cache.refresh(user).await?;

    Ok(Json(RefreshResponse {
        success: true,
        refreshed: true,
        expenses: snapshot.expenses.len(),
        income: snapshot.income.len(),
        budgets: snapshot.budgets.len(),
    }))
}
