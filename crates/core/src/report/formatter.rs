//! Report formatter.

use rust_decimal::Decimal;
use spendwise_shared::types::{Currency, Money};

use super::types::{FormattedReport, ReportBudgetLine, ReportCategoryLine, ReportData};
use crate::bucketing::PeriodBucket;
use crate::budget::BudgetStatus;
use crate::category::CategoryShare;
use crate::period::PeriodCalculator;

/// Renders period summaries, budget statuses and category shares.
///
/// Pure presentation: every input is accepted, including empty ones.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportFormatter {
    currency: Currency,
    calculator: PeriodCalculator,
}

impl ReportFormatter {
    /// Creates a formatter printing amounts in `currency` and dates on the
    /// calculator's local calendar.
    #[must_use]
    pub const fn new(currency: Currency, calculator: PeriodCalculator) -> Self {
        Self {
            currency,
            calculator,
        }
    }

    /// Formats one period.
    #[must_use]
    pub fn format(
        &self,
        summary: &PeriodBucket,
        budgets: &[BudgetStatus],
        shares: &[CategoryShare],
    ) -> FormattedReport {
        let structured = self.structured(summary, budgets, shares);
        let text = self.text(&structured);
        FormattedReport { text, structured }
    }

    fn structured(
        &self,
        summary: &PeriodBucket,
        budgets: &[BudgetStatus],
        shares: &[CategoryShare],
    ) -> ReportData {
        let bounds = summary.bounds();
        ReportData {
            period_key: summary.key.clone(),
            period_start: self.calculator.local_date(bounds.start),
            period_end: self.calculator.last_local_date(&bounds),
            currency: self.currency,
            total_spent: self.round(summary.total),
            transaction_count: summary.count,
            is_empty: summary.is_empty(),
            budgets: budgets
                .iter()
                .map(|b| ReportBudgetLine {
                    period_kind: b.period_kind,
                    budget_amount: self.round(b.budget_amount),
                    spent: self.round(b.spent),
                    remaining: self.round(b.remaining),
                    percentage_used: b.percentage_used,
                    status: b.status,
                })
                .collect(),
            categories: shares
                .iter()
                .map(|s| ReportCategoryLine {
                    category_name: s.category_name.clone(),
                    total: self.round(s.total),
                    percentage: s.percentage,
                })
                .collect(),
        }
    }

    fn text(&self, data: &ReportData) -> String {
        let mut lines = vec![format!(
            "Spending report {} ({} to {})",
            data.period_key, data.period_start, data.period_end
        )];

        if data.is_empty {
            lines.push(format!("No transactions recorded for {}.", data.period_key));
        } else {
            let noun = if data.transaction_count == 1 {
                "transaction"
            } else {
                "transactions"
            };
            lines.push(format!(
                "Total spent: {} across {} {noun}",
                self.money(data.total_spent),
                data.transaction_count
            ));
        }

        if !data.budgets.is_empty() {
            lines.push(String::new());
            lines.push("Budgets:".to_string());
            for line in &data.budgets {
                lines.push(format!(
                    "- {}: {} of {} ({:.2}%, {}), {} remaining",
                    line.period_kind.title(),
                    self.money(line.spent),
                    self.money(line.budget_amount),
                    line.percentage_used,
                    line.status,
                    self.money(line.remaining)
                ));
            }
        }

        if !data.categories.is_empty() {
            lines.push(String::new());
            lines.push("Categories:".to_string());
            for line in &data.categories {
                lines.push(format!(
                    "- {}: {} ({:.2}%)",
                    line.category_name,
                    self.money(line.total),
                    line.percentage
                ));
            }
        }

        lines.join("\n")
    }

    fn money(&self, amount: Decimal) -> Money {
        Money::new(amount, self.currency)
    }

    fn round(&self, amount: Decimal) -> Decimal {
        self.money(amount).rounded()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::budget::BudgetEvaluator;
    use crate::model::Budget;
    use crate::period::PeriodKind;
    use chrono::{TimeZone, Utc};
    use rust_decimal_macros::dec;

    fn march(total: Decimal, count: usize) -> PeriodBucket {
        let mut bucket = PeriodBucket::empty(
            "2024-03".to_string(),
            Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2024, 4, 1, 0, 0, 0).unwrap(),
        );
        bucket.total = total;
        bucket.count = count;
        bucket
    }

    #[test]
    fn test_empty_period_message() {
        let report = ReportFormatter::default().format(&march(dec!(0), 0), &[], &[]);

        assert_eq!(
            report.text,
            "Spending report 2024-03 (2024-03-01 to 2024-03-31)\nNo transactions recorded for 2024-03."
        );
        assert!(report.structured.is_empty);
        assert!(report.structured.budgets.is_empty());
        assert!(report.structured.categories.is_empty());
    }

    #[test]
    fn test_full_report() {
        let budget = BudgetEvaluator::default()
            .status(&Budget::new(PeriodKind::Monthly, dec!(500)), dec!(420))
            .unwrap();
        let shares = vec![CategoryShare {
            category_name: "Food".to_string(),
            total: dec!(420),
            count: 3,
            percentage: dec!(100),
        }];

        let report = ReportFormatter::default().format(&march(dec!(420), 3), &[budget], &shares);

        let lines: Vec<&str> = report.text.lines().collect();
        assert_eq!(lines[1], "Total spent: USD 420.00 across 3 transactions");
        assert_eq!(lines[3], "Budgets:");
        assert_eq!(
            lines[4],
            "- Monthly: USD 420.00 of USD 500.00 (84.00%, warning), USD 80.00 remaining"
        );
        assert_eq!(lines[7], "- Food: USD 420.00 (100.00%)");
        assert_eq!(report.structured.total_spent, dec!(420));
        assert_eq!(report.structured.budgets[0].remaining, dec!(80));
    }

    #[test]
    fn test_amounts_rounded_to_currency() {
        let formatter = ReportFormatter::new(Currency::Jpy, PeriodCalculator::default());
        let report = formatter.format(&march(dec!(1234.5), 1), &[], &[]);

        assert_eq!(report.structured.total_spent, dec!(1235));
        assert!(report.text.ends_with("Total spent: JPY 1235 across 1 transaction"));
    }

    #[test]
    fn test_dates_follow_local_calendar() {
        let calc = PeriodCalculator::from_timezone_name("Asia/Jakarta").unwrap();
        let bounds = calc
            .bounds(Utc.with_ymd_and_hms(2024, 3, 10, 0, 0, 0).unwrap(), PeriodKind::Monthly)
            .unwrap();
        let bucket = PeriodBucket::empty("2024-03".to_string(), bounds.start, bounds.end);

        let report = ReportFormatter::new(Currency::Idr, calc).format(&bucket, &[], &[]);

        assert_eq!(report.structured.period_start.to_string(), "2024-03-01");
        assert_eq!(report.structured.period_end.to_string(), "2024-03-31");
    }
}
