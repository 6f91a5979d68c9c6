//! Insight engine.

use rust_decimal::Decimal;

use super::types::{Insight, InsightKind, InsightSeverity};
use crate::budget::{BudgetEvaluation, BudgetStatusLevel, TrendDirection};
use crate::category::CategoryShare;
use crate::summary::CashFlowSummary;

/// Tunable limits for the insight rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InsightRules {
    /// Minimum absolute period-over-period change, in percent, worth reporting.
    pub trend_percent: Decimal,
    /// Minimum share of spend, in percent, for a category to be called out.
    pub dominant_category_percent: Decimal,
}

impl Default for InsightRules {
    fn default() -> Self {
        Self {
            trend_percent: Decimal::TEN,
            dominant_category_percent: Decimal::from(50),
        }
    }
}

/// Turns computed analytics into short, prioritized messages.
#[derive(Debug, Clone, Copy, Default)]
pub struct InsightEngine {
    rules: InsightRules,
}

impl InsightEngine {
    /// Creates an engine with custom rules.
    #[must_use]
    pub const fn new(rules: InsightRules) -> Self {
        Self { rules }
    }

    /// Generates insights, most severe first.
    ///
    /// Within one severity, budget insights come first (in evaluation order),
    /// then trends, then the dominant category, then cash flow.
    #[must_use]
    pub fn generate(
        &self,
        evaluations: &[BudgetEvaluation],
        shares: &[CategoryShare],
        cash_flow: &CashFlowSummary,
    ) -> Vec<Insight> {
        let mut insights = Vec::new();

        for evaluation in evaluations {
            insights.extend(Self::budget_insight(evaluation));
        }
        for evaluation in evaluations {
            insights.extend(self.trend_insight(evaluation));
        }
        insights.extend(self.category_insight(shares));
        if cash_flow.is_deficit() {
            insights.push(Insight {
                kind: InsightKind::NegativeCashFlow,
                severity: InsightSeverity::Warning,
                message: format!(
                    "Expenses exceeded income by {:.2} this period",
                    cash_flow.net.abs()
                ),
            });
        }

        // Stable, so the rule order above breaks ties.
        insights.sort_by(|a, b| b.severity.cmp(&a.severity));
        insights
    }

    fn budget_insight(evaluation: &BudgetEvaluation) -> Option<Insight> {
        let status = &evaluation.status;
        let period = status.period_kind.title();
        match status.status {
            BudgetStatusLevel::Critical => Some(Insight {
                kind: InsightKind::BudgetExceeded,
                severity: InsightSeverity::Critical,
                message: format!(
                    "{period} budget reached: {:.2}% used ({:.2} of {:.2})",
                    status.percentage_used, status.spent, status.budget_amount
                ),
            }),
            BudgetStatusLevel::Warning => Some(Insight {
                kind: InsightKind::BudgetWarning,
                severity: InsightSeverity::Warning,
                message: format!(
                    "{period} budget at {:.2}%, {:.2} remaining",
                    status.percentage_used, status.remaining
                ),
            }),
            BudgetStatusLevel::Normal => None,
        }
    }

    fn trend_insight(&self, evaluation: &BudgetEvaluation) -> Option<Insight> {
        let trend = &evaluation.trend;
        if trend.delta_percent.abs() < self.rules.trend_percent {
            return None;
        }
        let noun = evaluation.status.period_kind.noun();
        match trend.direction {
            TrendDirection::Up => Some(Insight {
                kind: InsightKind::SpendingIncrease,
                severity: InsightSeverity::Warning,
                message: format!(
                    "Spending is up {:.2}% compared with last {noun}",
                    trend.delta_percent
                ),
            }),
            TrendDirection::Down => Some(Insight {
                kind: InsightKind::SpendingDecrease,
                severity: InsightSeverity::Info,
                message: format!(
                    "Spending is down {:.2}% compared with last {noun}",
                    trend.delta_percent.abs()
                ),
            }),
            TrendDirection::Flat => None,
        }
    }

    fn category_insight(&self, shares: &[CategoryShare]) -> Option<Insight> {
        // Shares are sorted, so only the first can dominate.
        let top = shares.first()?;
        if shares.len() < 2 || top.percentage < self.rules.dominant_category_percent {
            return None;
        }
        Some(Insight {
            kind: InsightKind::DominantCategory,
            severity: InsightSeverity::Info,
            message: format!(
                "{} accounts for {:.2}% of spending",
                top.category_name, top.percentage
            ),
        })
    }
}
