//! Report data types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use spendwise_shared::types::Currency;

use crate::budget::BudgetStatusLevel;
use crate::period::PeriodKind;

/// A rendered report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormattedReport {
    /// Human-readable body.
    pub text: String,
    /// The same content as data.
    pub structured: ReportData,
}

/// Structured report content. Amounts are rounded to the currency's minor units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportData {
    /// Period label.
    pub period_key: String,
    /// First local date covered.
    pub period_start: NaiveDate,
    /// Last local date covered.
    pub period_end: NaiveDate,
    /// Currency of every amount.
    pub currency: Currency,
    /// Total spent.
    pub total_spent: Decimal,
    /// Number of transactions.
    pub transaction_count: usize,
    /// True when nothing was recorded.
    pub is_empty: bool,
    /// One line per budget.
    pub budgets: Vec<ReportBudgetLine>,
    /// One line per category, largest first.
    pub categories: Vec<ReportCategoryLine>,
}

/// Budget line of a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportBudgetLine {
    /// Budget period.
    pub period_kind: PeriodKind,
    /// Ceiling.
    pub budget_amount: Decimal,
    /// Spent.
    pub spent: Decimal,
    /// Left to spend.
    pub remaining: Decimal,
    /// Percent used.
    pub percentage_used: Decimal,
    /// Status.
    pub status: BudgetStatusLevel,
}

/// Category line of a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportCategoryLine {
    /// Category name.
    pub category_name: String,
    /// Total.
    pub total: Decimal,
    /// Share in percent.
    pub percentage: Decimal,
}
