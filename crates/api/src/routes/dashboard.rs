//! Dashboard route.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use spendwise_core::PeriodKind;
use spendwise_core::analytics::Dashboard;
use tracing::debug;

use crate::{AppState, error::ApiResult, params};

/// Creates the dashboard routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/users/{user_id}/dashboard", get(get_dashboard))
}

/// Query parameters for the dashboard.
#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    /// Period kind, monthly by default.
    pub period: Option<String>,
    /// Instant inside the period; defaults to now.
    pub reference: Option<String>,
}

/// Response for the dashboard.
#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    /// Always true.
    pub success: bool,
    /// Dashboard data.
    #[serde(flatten)]
    pub dashboard: Dashboard,
}

/// GET /users/{user_id}/dashboard
async fn get_dashboard(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Query(query): Query<DashboardQuery>,
) -> ApiResult<Json<DashboardResponse>> {
    let user = params::user_id(&user_id)?;
    let calculator = state.analytics.calculator();
    let period = params::period(query.period.as_deref(), PeriodKind::Monthly)?;
    let reference = params::reference(query.reference.as_deref(), calculator, Utc::now())?;

    debug!(user_id = %user, %period, %reference, "Building dashboard");

    let snapshot = state.cache.snapshot(user).await?;
    let dashboard = state.analytics.dashboard(&snapshot, period, reference)?;

    Ok(Json(DashboardResponse {
        success: true,
        dashboard,
    }))
}
