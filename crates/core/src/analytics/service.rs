//! Analytics service.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use spendwise_shared::config::AnalyticsConfig;
use spendwise_shared::types::Currency;

use super::types::{BreakdownReport, Dashboard, LedgerSnapshot, TrendReport};
use crate::bucketing::BucketingEngine;
use crate::budget::{BudgetEvaluator, BudgetProgress, BudgetThresholds};
use crate::category::CategoryAggregator;
use crate::error::{AnalyticsError, AnalyticsResult};
use crate::insights::InsightEngine;
use crate::model::TransactionKind;
use crate::period::{PeriodBounds, PeriodCalculator, PeriodKind};
use crate::report::{FormattedReport, ReportFormatter};
use crate::summary::CashFlowSummary;

/// Longest trend window, in periods.
pub const MAX_TREND_PERIODS: u32 = 60;

/// Number of categories shown on the dashboard.
const TOP_CATEGORIES: usize = 5;

/// Runs the analytics operations with one set of settings.
#[derive(Debug, Clone, Copy)]
pub struct AnalyticsService {
    calculator: PeriodCalculator,
    engine: BucketingEngine,
    evaluator: BudgetEvaluator,
    formatter: ReportFormatter,
    insights: InsightEngine,
    default_trend_periods: u32,
}

impl Default for AnalyticsService {
    fn default() -> Self {
        Self::new(
            PeriodCalculator::default(),
            BudgetThresholds::default(),
            Currency::default(),
            6,
        )
    }
}

impl AnalyticsService {
    /// Creates a service from explicit settings.
    #[must_use]
    pub fn new(
        calculator: PeriodCalculator,
        thresholds: BudgetThresholds,
        currency: Currency,
        default_trend_periods: u32,
    ) -> Self {
        Self {
            calculator,
            engine: BucketingEngine::new(calculator),
            evaluator: BudgetEvaluator::new(thresholds),
            formatter: ReportFormatter::new(currency, calculator),
            insights: InsightEngine::default(),
            default_trend_periods: default_trend_periods.clamp(1, MAX_TREND_PERIODS),
        }
    }

    /// Creates a service from the `analytics` configuration section.
    ///
    /// # Errors
    ///
    /// `InvalidTimezone`, `InvalidThresholds` or `UnknownCurrency` for bad
    /// settings.
    pub fn from_config(config: &AnalyticsConfig) -> AnalyticsResult<Self> {
        let calculator = PeriodCalculator::from_timezone_name(&config.timezone)?;
        let thresholds = BudgetThresholds::new(
            Decimal::from(config.warning_percent),
            Decimal::from(config.critical_percent),
        )?;
        let currency = config
            .currency
            .parse::<Currency>()
            .map_err(|_| AnalyticsError::UnknownCurrency(config.currency.clone()))?;

        Ok(Self::new(
            calculator,
            thresholds,
            currency,
            config.default_trend_months,
        ))
    }

    /// Returns the period calculator.
    #[must_use]
    pub const fn calculator(&self) -> &PeriodCalculator {
        &self.calculator
    }

    /// Buckets the trailing `periods` periods of `kind` ending with the one
    /// containing `reference`, with running totals.
    ///
    /// `periods` defaults to the configured value and is clamped to
    /// `1..=MAX_TREND_PERIODS`.
    ///
    /// # Errors
    ///
    /// `NegativeAmount` for any negative transaction, `DateOutOfRange` if the
    /// window cannot be represented.
    pub fn trends(
        &self,
        snapshot: &LedgerSnapshot,
        kind: PeriodKind,
        periods: Option<u32>,
        tx_kind: TransactionKind,
        reference: DateTime<Utc>,
    ) -> AnalyticsResult<TrendReport> {
        let periods = periods
            .unwrap_or(self.default_trend_periods)
            .clamp(1, MAX_TREND_PERIODS);
        let first = self.calculator.bounds_back(reference, kind, periods - 1)?;
        let current = self.calculator.bounds(reference, kind)?;
        let window = PeriodBounds::new(first.start, current.end)?;

        let buckets =
            self.engine
                .bucketize_window(snapshot.transactions(tx_kind), kind, &window)?;

        Ok(TrendReport {
            period: kind,
            kind: tx_kind,
            window,
            trends: BucketingEngine::with_running_totals(&buckets),
        })
    }

    /// Groups transactions by category over the local dates
    /// `start_date..=end_date`.
    ///
    /// A missing date falls back to the first or last day of the month
    /// containing `reference`.
    ///
    /// # Errors
    ///
    /// `InvalidRange` if the end date is before the start date,
    /// `NegativeAmount` for any negative transaction.
    pub fn breakdown(
        &self,
        snapshot: &LedgerSnapshot,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
        tx_kind: TransactionKind,
        reference: DateTime<Utc>,
    ) -> AnalyticsResult<BreakdownReport> {
        let month = self.calculator.bounds(reference, PeriodKind::Monthly)?;
        let first = start_date.unwrap_or_else(|| self.calculator.local_date(month.start));
        let last = end_date.unwrap_or_else(|| self.calculator.last_local_date(&month));
        let period = self.calculator.date_range(first, last)?;

        let breakdown =
            CategoryAggregator::aggregate_within(snapshot.transactions(tx_kind), &period)?;
        let total = breakdown
            .iter()
            .fold(Decimal::ZERO, |acc, s| acc.saturating_add(s.total));

        Ok(BreakdownReport {
            period,
            kind: tx_kind,
            total,
            breakdown,
        })
    }

    /// Evaluates every declared budget for the periods containing `reference`.
    ///
    /// # Errors
    ///
    /// `NegativeAmount` for a negative budget or expense.
    pub fn budget_progress(
        &self,
        snapshot: &LedgerSnapshot,
        reference: DateTime<Utc>,
    ) -> AnalyticsResult<Vec<BudgetProgress>> {
        self.evaluator.progress(
            &snapshot.budgets,
            &snapshot.expenses,
            &self.calculator,
            reference,
        )
    }

    /// Builds the overview of the `kind` period containing `reference`.
    ///
    /// # Errors
    ///
    /// `NegativeAmount` for any negative amount.
    pub fn dashboard(
        &self,
        snapshot: &LedgerSnapshot,
        kind: PeriodKind,
        reference: DateTime<Utc>,
    ) -> AnalyticsResult<Dashboard> {
        let period = self.calculator.bounds(reference, kind)?;
        let summary = CashFlowSummary::compute(&snapshot.expenses, &snapshot.income, period)?;
        let budget_progress = self.budget_progress(snapshot, reference)?;
        let shares = CategoryAggregator::aggregate_within(&snapshot.expenses, &period)?;

        let evaluations: Vec<_> = budget_progress
            .iter()
            .map(|p| p.evaluation.clone())
            .collect();
        let insights = self.insights.generate(&evaluations, &shares, &summary);

        let mut top_categories = shares;
        top_categories.truncate(TOP_CATEGORIES);

        Ok(Dashboard {
            period_kind: kind,
            period,
            summary,
            budget_progress,
            top_categories,
            insights,
        })
    }

    /// Renders the digest of the `kind` period containing `reference`.
    ///
    /// # Errors
    ///
    /// `NegativeAmount` for any negative amount.
    pub fn report(
        &self,
        snapshot: &LedgerSnapshot,
        kind: PeriodKind,
        reference: DateTime<Utc>,
    ) -> AnalyticsResult<FormattedReport> {
        let period = self.calculator.bounds(reference, kind)?;
        let bucket = self
            .engine
            .bucketize_window(&snapshot.expenses, kind, &period)?
            .into_iter()
            .next()
            .ok_or(AnalyticsError::DateOutOfRange)?;
        let statuses: Vec<_> = self
            .budget_progress(snapshot, reference)?
            .into_iter()
            .map(|p| p.evaluation.status)
            .collect();
        let shares = CategoryAggregator::aggregate_within(&snapshot.expenses, &period)?;

        Ok(self.formatter.format(&bucket, &statuses, &shares))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::budget::BudgetStatusLevel;
    use crate::insights::InsightKind;
    use crate::model::{Budget, Transaction};
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
    }

    fn midnight(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    fn snapshot() -> LedgerSnapshot {
        LedgerSnapshot {
            expenses: vec![
                Transaction::new(dec!(120), at(2024, 1, 20)).with_category("Food"),
                Transaction::new(dec!(80), at(2024, 2, 3)).with_category("Travel"),
                Transaction::new(dec!(300), at(2024, 3, 2)).with_category("Rent"),
                Transaction::new(dec!(120), at(2024, 3, 9)).with_category("Food"),
                Transaction::new(dec!(50), at(2024, 3, 15)),
            ],
            income: vec![Transaction::new(dec!(400), at(2024, 3, 1)).with_category("Salary")],
            budgets: vec![
                Budget::new(PeriodKind::Monthly, dec!(500)),
                Budget::new(PeriodKind::Weekly, dec!(200)),
            ],
        }
    }

    #[test]
    fn test_monthly_trends() {
        let report = AnalyticsService::default()
            .trends(
                &snapshot(),
                PeriodKind::Monthly,
                Some(3),
                TransactionKind::Expense,
                at(2024, 3, 20),
            )
            .unwrap();

        assert_eq!(report.window.start, midnight(2024, 1, 1));
        assert_eq!(report.window.end, midnight(2024, 4, 1));
        let keys: Vec<&str> = report.trends.iter().map(|p| p.bucket.key.as_str()).collect();
        assert_eq!(keys, vec!["2024-01", "2024-02", "2024-03"]);
        let totals: Vec<Decimal> = report.trends.iter().map(|p| p.bucket.total).collect();
        assert_eq!(totals, vec![dec!(120), dec!(80), dec!(470)]);
        assert_eq!(report.trends[2].running_total, dec!(670));
    }

    #[test]
    fn test_trend_periods_clamped() {
        let service = AnalyticsService::default();
        let snapshot = LedgerSnapshot::default();

        let none = service
            .trends(&snapshot, PeriodKind::Daily, Some(0), TransactionKind::Expense, at(2024, 3, 1))
            .unwrap();
        assert_eq!(none.trends.len(), 1);

        let many = service
            .trends(&snapshot, PeriodKind::Weekly, Some(500), TransactionKind::Expense, at(2024, 3, 1))
            .unwrap();
        assert_eq!(many.trends.len(), MAX_TREND_PERIODS as usize);

        let default = service
            .trends(&snapshot, PeriodKind::Monthly, None, TransactionKind::Income, at(2024, 3, 1))
            .unwrap();
        assert_eq!(default.trends.len(), 6);
        assert_eq!(default.kind, TransactionKind::Income);
    }

    #[test]
    fn test_breakdown_defaults_to_current_month() {
        let report = AnalyticsService::default()
            .breakdown(&snapshot(), None, None, TransactionKind::Expense, at(2024, 3, 20))
            .unwrap();

        assert_eq!(report.period.start, midnight(2024, 3, 1));
        assert_eq!(report.period.end, midnight(2024, 4, 1));
        assert_eq!(report.total, dec!(470));
        let names: Vec<&str> = report.breakdown.iter().map(|s| s.category_name.as_str()).collect();
        assert_eq!(names, vec!["Rent", "Food", "Uncategorized"]);
    }

    #[test]
    fn test_breakdown_with_explicit_dates() {
        let report = AnalyticsService::default()
            .breakdown(
                &snapshot(),
                NaiveDate::from_ymd_opt(2024, 1, 1),
                NaiveDate::from_ymd_opt(2024, 2, 29),
                TransactionKind::Expense,
                at(2024, 3, 20),
            )
            .unwrap();

        assert_eq!(report.total, dec!(200));
        assert_eq!(report.breakdown[0].category_name, "Food");
        assert_eq!(report.breakdown[0].percentage, dec!(60));
    }

    #[test]
    fn test_breakdown_inverted_dates_rejected() {
        let result = AnalyticsService::default().breakdown(
            &snapshot(),
            NaiveDate::from_ymd_opt(2024, 3, 10),
            NaiveDate::from_ymd_opt(2024, 3, 1),
            TransactionKind::Expense,
            at(2024, 3, 20),
        );

        assert!(matches!(result, Err(AnalyticsError::InvalidRange { .. })));
    }

    #[test]
    fn test_budget_progress_sorted_by_period() {
        let progress = AnalyticsService::default()
            .budget_progress(&snapshot(), at(2024, 3, 15))
            .unwrap();

        assert_eq!(progress.len(), 2);
        assert_eq!(progress[0].evaluation.status.period_kind, PeriodKind::Weekly);
        // Week of Monday 2024-03-11.
        assert_eq!(progress[0].evaluation.status.spent, dec!(50));
        assert_eq!(progress[0].evaluation.trend.previous, dec!(120));
        assert_eq!(progress[1].evaluation.status.spent, dec!(470));
        assert_eq!(progress[1].evaluation.status.status, BudgetStatusLevel::Warning);
    }

    #[test]
    fn test_dashboard() {
        let dashboard = AnalyticsService::default()
            .dashboard(&snapshot(), PeriodKind::Monthly, at(2024, 3, 20))
            .unwrap();

        assert_eq!(dashboard.summary.total_expenses, dec!(470));
        assert_eq!(dashboard.summary.net, dec!(-70));
        assert_eq!(dashboard.top_categories.len(), 3);
        let kinds: Vec<InsightKind> = dashboard.insights.iter().map(|i| i.kind).collect();
        assert!(kinds.contains(&InsightKind::BudgetWarning));
        assert!(kinds.contains(&InsightKind::NegativeCashFlow));
        assert!(kinds.contains(&InsightKind::SpendingIncrease));
    }

    #[test]
    fn test_report_for_month() {
        let report = AnalyticsService::default()
            .report(&snapshot(), PeriodKind::Monthly, at(2024, 3, 20))
            .unwrap();

        assert!(report.text.starts_with("Spending report 2024-03 (2024-03-01 to 2024-03-31)"));
        assert_eq!(report.structured.total_spent, dec!(470));
        assert_eq!(report.structured.transaction_count, 3);
        assert_eq!(report.structured.budgets.len(), 2);
    }

    #[test]
    fn test_report_for_empty_period() {
        let report = AnalyticsService::default()
            .report(&LedgerSnapshot::default(), PeriodKind::Yearly, at(2023, 6, 1))
            .unwrap();

        assert!(report.structured.is_empty);
        assert!(report.text.contains("No transactions recorded for 2023."));
    }

    #[test]
    fn test_from_config() {
        let mut config = AnalyticsConfig::default();
        assert!(AnalyticsService::from_config(&config).is_ok());

        config.timezone = "Mars/Olympus".to_string();
        assert!(matches!(
            AnalyticsService::from_config(&config),
            Err(AnalyticsError::InvalidTimezone(_))
        ));

        config.timezone = "Asia/Jakarta".to_string();
        config.warning_percent = 120;
        assert!(matches!(
            AnalyticsService::from_config(&config),
            Err(AnalyticsError::InvalidThresholds { .. })
        ));

        config.warning_percent = 80;
        config.currency = "XYZ".to_string();
        assert_eq!(
            AnalyticsService::from_config(&config).err(),
            Some(AnalyticsError::UnknownCurrency("XYZ".to_string()))
        );
    }
}
