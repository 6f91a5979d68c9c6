//! Spending analytics routes: trends, category breakdown and budget progress.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use spendwise_core::analytics::{BreakdownReport, TrendReport};
use spendwise_core::budget::BudgetProgress;
use spendwise_core::PeriodKind;
use tracing::debug;

use crate::{AppState, error::ApiResult, params};

/// Creates the analytics routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/users/{user_id}/analytics/trends", get(get_trends))
        .route("/users/{user_id}/analytics/breakdown", get(get_breakdown))
        .route(
            "/users/{user_id}/analytics/budget-progress",
            get(get_budget_progress),
        )
}

// ============================================================================
// Query Parameters
// ============================================================================

/// Query parameters for trends.
#[derive(Debug, Default, Deserialize)]
pub struct TrendsQuery {
    /// Bucket size: daily, weekly, monthly (default) or yearly.
    pub period: Option<String>,
    /// Number of trailing periods.
    pub months: Option<String>,
    /// expense (default) or income.
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// Instant inside the last period; defaults to now.
    pub reference: Option<String>,
}

/// Query parameters for the category breakdown.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BreakdownQuery {
    /// First local date, inclusive.
    pub start_date: Option<String>,
    /// Last local date, inclusive.
    pub end_date: Option<String>,
    /// expense (default) or income.
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// Instant whose month is used for missing dates; defaults to now.
    pub reference: Option<String>,
}

/// Query parameters for budget progress.
#[derive(Debug, Default, Deserialize)]
pub struct ReferenceQuery {
    /// Evaluation instant; defaults to now.
    pub reference: Option<String>,
}

// ============================================================================
// Response Types
// ============================================================================

/// Response for trends.
#[derive(Debug, Serialize)]
pub struct TrendsResponse {
    /// Always true.
    pub success: bool,
    /// Trend data.
    #[serde(flatten)]
    pub report: TrendReport,
}

/// Response for the category breakdown.
#[derive(Debug, Serialize)]
pub struct BreakdownResponse {
    /// Always true.
    pub success: bool,
    /// Breakdown data.
    #[serde(flatten)]
    pub report: BreakdownReport,
}

/// Response for budget progress.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetProgressResponse {
    /// Always true.
    pub success: bool,
    /// Local date the budgets were evaluated on.
    pub period: NaiveDate,
    /// Evaluation instant.
    pub reference: DateTime<Utc>,
    /// One entry per declared budget, daily to yearly.
    pub budget_progress: Vec<BudgetProgress>,
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET /users/{user_id}/analytics/trends
async fn get_trends(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Query(query): Query<TrendsQuery>,
) -> ApiResult<Json<TrendsResponse>> {
    let user = params::user_id(&user_id)?;
    let calculator = state.analytics.calculator();
    let period = params::period(query.period.as_deref(), PeriodKind::Monthly)?;
    let months = params::count(query.months.as_deref(), "months")?;
    let kind = params::transaction_kind(query.kind.as_deref())?;
    let reference = params::reference(query.reference.as_deref(), calculator, Utc::now())?;

    debug!(user_id = %user, %period, ?months, %kind, %reference, "Computing trends");

    let snapshot = state.cache.snapshot(user).await?;
    let report = state
        .analytics
        .trends(&snapshot, period, months, kind, reference)?;

    Ok(Json(TrendsResponse {
        success: true,
        report,
    }))
}

/// GET /users/{user_id}/analytics/breakdown
async fn get_breakdown(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Query(query): Query<BreakdownQuery>,
) -> ApiResult<Json<BreakdownResponse>> {
    let user = params::user_id(&user_id)?;
    let calculator = state.analytics.calculator();
    let start_date = params::date(query.start_date.as_deref(), "startDate", calculator)?;
    let end_date = params::date(query.end_date.as_deref(), "endDate", calculator)?;
    let kind = params::transaction_kind(query.kind.as_deref())?;
    let reference = params::reference(query.reference.as_deref(), calculator, Utc::now())?;

    debug!(user_id = %user, ?start_date, ?end_date, %kind, "Computing category breakdown");

    let snapshot = state.cache.snapshot(user).await?;
    let report = state
        .analytics
        .breakdown(&snapshot, start_date, end_date, kind, reference)?;

    Ok(Json(BreakdownResponse {
        success: true,
        report,
    }))
}

/// GET /users/{user_id}/analytics/budget-progress
async fn get_budget_progress(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Query(query): Query<ReferenceQuery>,
) -> ApiResult<Json<BudgetProgressResponse>> {
    let user = params::user_id(&user_id)?;
    let calculator = state.analytics.calculator();
    let reference = params::reference(query.reference.as_deref(), calculator, Utc::now())?;

    debug!(user_id = %user, %reference, "Computing budget progress");

    let snapshot = state.cache.snapshot(user).await?;
    let budget_progress = state.analytics.budget_progress(&snapshot, reference)?;

    Ok(Json(BudgetProgressResponse {
        success: true,
        period: calculator.local_date(reference),
        reference,
        budget_progress,
    }))
}
