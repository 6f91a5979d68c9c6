//! Budget evaluator.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use super::types::{
    BudgetEvaluation, BudgetProgress, BudgetStatus, BudgetThresholds, SpendingTrend,
    TrendDirection,
};
use crate::bucketing::BucketingEngine;
use crate::error::AnalyticsResult;
use crate::model::{Budget, Transaction, ensure_non_negative};
use crate::period::PeriodCalculator;

/// Measures spend against declared budgets.
#[derive(Debug, Clone, Copy, Default)]
pub struct BudgetEvaluator {
    thresholds: BudgetThresholds,
}

impl BudgetEvaluator {
    /// Creates an evaluator with the given thresholds.
    #[must_use]
    pub const fn new(thresholds: BudgetThresholds) -> Self {
        Self { thresholds }
    }

    /// Evaluates a budget against the current and previous period's spend.
    ///
    /// # Errors
    ///
    /// `NegativeAmount` if the budget or either spend is negative.
    pub fn evaluate(
        &self,
        budget: &Budget,
        current_spend: Decimal,
        previous_spend: Decimal,
    ) -> AnalyticsResult<BudgetEvaluation> {
        ensure_non_negative(previous_spend)?;
        Ok(BudgetEvaluation {
            status: self.status(budget, current_spend)?,
            trend: Self::trend(current_spend, previous_spend),
        })
    }

    /// Computes remaining amount, percentage used and status.
    ///
    /// # Errors
    ///
    /// `NegativeAmount` if the budget or the spend is negative.
    pub fn status(&self, budget: &Budget, spent: Decimal) -> AnalyticsResult<BudgetStatus> {
        budget.validate()?;
        ensure_non_negative(spent)?;

        let remaining = budget.amount.saturating_sub(spent).max(Decimal::ZERO);
        let percentage_used = percent_of(spent, budget.amount);

        Ok(BudgetStatus {
            period_kind: budget.period_kind,
            budget_amount: budget.amount,
            spent,
            remaining,
            percentage_used,
            status: self.thresholds.classify(percentage_used),
        })
    }

    /// Compares spend with the previous period.
    #[must_use]
    pub fn trend(current: Decimal, previous: Decimal) -> SpendingTrend {
        let delta = current.saturating_sub(previous);
        let direction = match delta.cmp(&Decimal::ZERO) {
            std::cmp::Ordering::Greater => TrendDirection::Up,
            std::cmp::Ordering::Less => TrendDirection::Down,
            std::cmp::Ordering::Equal => TrendDirection::Flat,
        };

        SpendingTrend {
            current,
            previous,
            delta,
            delta_percent: percent_of(delta, previous),
            direction,
        }
    }

    /// Evaluates every budget for the period containing `reference`.
    ///
    /// Spend is the sum of `expenses` inside the current period and the
    /// immediately preceding one. Results are ordered daily to yearly. Owners
    /// declare at most one budget per kind; the ledger source enforces that.
    ///
    /// # Errors
    ///
    /// `NegativeAmount` for a negative budget, `DateOutOfRange` if a period
    /// boundary cannot be represented.
    pub fn progress(
        &self,
        budgets: &[Budget],
        expenses: &[Transaction],
        calculator: &PeriodCalculator,
        reference: DateTime<Utc>,
    ) -> AnalyticsResult<Vec<BudgetProgress>> {
        let mut ordered: Vec<&Budget> = budgets.iter().collect();
        ordered.sort_by_key(|b| b.period_kind);

        ordered
            .into_iter()
            .map(|budget| {
                let current = calculator.bounds(reference, budget.period_kind)?;
                let previous = calculator.previous_bounds(reference, budget.period_kind)?;
                let evaluation = self.evaluate(
                    budget,
                    BucketingEngine::total_within(expenses, &current),
                    BucketingEngine::total_within(expenses, &previous),
                )?;
                Ok(BudgetProgress {
                    budget_id: budget.id,
                    period: current,
                    evaluation,
                })
            })
            .collect()
    }
}

/// `part / whole * 100` rounded to 2 dp, or 0 when `whole` is not positive
/// or the division overflows.
pub(crate) fn percent_of(part: Decimal, whole: Decimal) -> Decimal {
    if whole <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    part.checked_div(whole)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .map_or(Decimal::ZERO, |p| p.round_dp(2))
}
