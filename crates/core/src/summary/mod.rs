//! Income versus expense summary for one period.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::budget::evaluator::percent_of;
use crate::error::AnalyticsResult;
use crate::model::Transaction;
use crate::period::PeriodBounds;

/// Cash flow over one period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CashFlowSummary {
    /// Period covered.
    pub period: PeriodBounds,
    /// Sum of income.
    pub total_income: Decimal,
    /// Sum of expenses.
    pub total_expenses: Decimal,
    /// `total_income - total_expenses`, may be negative.
    pub net: Decimal,
    /// `net / total_income * 100`, 2 dp; 0 without income.
    pub savings_rate: Decimal,
    /// Income records in the period.
    pub income_count: usize,
    /// Expense records in the period.
    pub expense_count: usize,
    /// `total_expenses / days`, 2 dp.
    pub average_daily_spend: Decimal,
}

impl CashFlowSummary {
    /// Summarizes the transactions dated inside `bounds`.
    ///
    /// # Errors
    ///
    /// `NegativeAmount` for any negative transaction.
    pub fn compute(
        expenses: &[Transaction],
        income: &[Transaction],
        bounds: PeriodBounds,
    ) -> AnalyticsResult<Self> {
        let (total_expenses, expense_count) = sum_within(expenses, &bounds)?;
        let (total_income, income_count) = sum_within(income, &bounds)?;
        let net = total_income.saturating_sub(total_expenses);

        let average_daily_spend = total_expenses
            .checked_div(Decimal::from(bounds.day_count()))
            .map_or(Decimal::ZERO, |avg| avg.round_dp(2));

        Ok(Self {
            period: bounds,
            total_income,
            total_expenses,
            net,
            savings_rate: percent_of(net, total_income),
            income_count,
            expense_count,
            average_daily_spend,
        })
    }

    /// True if more went out than came in.
    #[must_use]
    pub fn is_deficit(&self) -> bool {
        self.net < Decimal::ZERO
    }
}

fn sum_within(
    transactions: &[Transaction],
    bounds: &PeriodBounds,
) -> AnalyticsResult<(Decimal, usize)> {
    let mut total = Decimal::ZERO;
    let mut count = 0;
    for tx in transactions {
        tx.validate()?;
        if bounds.contains(tx.date) {
            total = total.saturating_add(tx.amount);
            count += 1;
        }
    }
    Ok((total, count))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AnalyticsError;
    use chrono::{TimeZone, Utc};
    use rust_decimal_macros::dec;

    fn march() -> PeriodBounds {
        PeriodBounds::new(
            Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2024, 4, 1, 0, 0, 0).unwrap(),
        )
        .unwrap()
    }

    fn on(day: u32, amount: Decimal) -> Transaction {
        Transaction::new(amount, Utc.with_ymd_and_hms(2024, 3, day, 12, 0, 0).unwrap())
    }

    #[test]
    fn test_surplus_month() {
        let expenses = vec![on(2, dec!(310)), on(20, dec!(155))];
        let income = vec![on(1, dec!(1000))];

        let summary = CashFlowSummary::compute(&expenses, &income, march()).unwrap();

        assert_eq!(summary.total_income, dec!(1000));
        assert_eq!(summary.total_expenses, dec!(465));
        assert_eq!(summary.net, dec!(535));
        assert_eq!(summary.savings_rate, dec!(53.5));
        assert_eq!(summary.expense_count, 2);
        assert_eq!(summary.income_count, 1);
        assert_eq!(summary.average_daily_spend, dec!(15));
        assert!(!summary.is_deficit());
    }

    #[test]
    fn test_deficit_has_negative_savings_rate() {
        let summary =
            CashFlowSummary::compute(&[on(3, dec!(150))], &[on(1, dec!(100))], march()).unwrap();

        assert_eq!(summary.net, dec!(-50));
        assert_eq!(summary.savings_rate, dec!(-50));
        assert!(summary.is_deficit());
    }

    #[test]
    fn test_no_income_gives_zero_rate() {
        let summary = CashFlowSummary::compute(&[on(3, dec!(10))], &[], march()).unwrap();

        assert_eq!(summary.savings_rate, dec!(0));
        assert_eq!(summary.net, dec!(-10));
    }

    #[test]
    fn test_empty_period() {
        let summary = CashFlowSummary::compute(&[], &[], march()).unwrap();

        assert_eq!(summary.total_expenses, dec!(0));
        assert_eq!(summary.average_daily_spend, dec!(0));
        assert_eq!(summary.expense_count, 0);
    }

    #[test]
    fn test_out_of_period_ignored() {
        let april = Transaction::new(dec!(99), Utc.with_ymd_and_hms(2024, 4, 1, 0, 0, 0).unwrap());
        let summary = CashFlowSummary::compute(&[april], &[], march()).unwrap();

        assert_eq!(summary.total_expenses, dec!(0));
    }

    #[test]
    fn test_negative_amount_rejected() {
        assert_eq!(
            CashFlowSummary::compute(&[on(3, dec!(-1))], &[], march()),
            Err(AnalyticsError::NegativeAmount(dec!(-1)))
        );
    }
}
