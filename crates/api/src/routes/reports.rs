//! Report routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use spendwise_core::PeriodKind;
use spendwise_core::report::FormattedReport;
use tracing::debug;

use crate::{AppState, error::ApiResult, params};

/// Creates the report routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/users/{user_id}/reports/summary", get(get_summary_report))
}

/// Query parameters for the summary report.
#[derive(Debug, Default, Deserialize)]
pub struct ReportQuery {
    /// Period kind, monthly by default.
    pub period: Option<String>,
    /// Instant inside the period; defaults to now.
    pub reference: Option<String>,
}

/// Response for the summary report.
#[derive(Debug, Serialize)]
pub struct ReportResponse {
    /// Always true.
    pub success: bool,
    /// Period kind reported on.
    pub period: PeriodKind,
    /// Text and structured report.
    pub report: FormattedReport,
}

/// GET /users/{user_id}/reports/summary
///
/// The body is what the email digest sends.
async fn get_summary_report(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Query(query): Query<ReportQuery>,
) -> ApiResult<Json<ReportResponse>> {
    let user = params::user_id(&user_id)?;
    let calculator = state.analytics.calculator();
    let period = params::period(query.period.as_deref(), PeriodKind::Monthly)?;
    let reference = params::reference(query.reference.as_deref(), calculator, Utc::now())?;

    debug!(user_id = %user, %period, %reference, "Rendering summary report");

    let snapshot = state.cache.snapshot(user).await?;
    let report = state.analytics.report(&snapshot, period, reference)?;

    Ok(Json(ReportResponse {
        success: true,
        period,
        report,
    }))
}
