//! Analytics result types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::bucketing::TrendPoint;
use crate::budget::BudgetProgress;
use crate::category::CategoryShare;
use crate::insights::Insight;
use crate::model::{Budget, Transaction, TransactionKind};
use crate::period::{PeriodBounds, PeriodKind};
use crate::summary::CashFlowSummary;

/// Everything the analytics operations read for one user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerSnapshot {
    /// Expense records.
    #[serde(default)]
    pub expenses: Vec<Transaction>,
    /// Income records.
    #[serde(default)]
    pub income: Vec<Transaction>,
    /// Declared budgets.
    #[serde(default)]
    pub budgets: Vec<Budget>,
}

impl LedgerSnapshot {
    /// Returns the transactions of one kind.
    #[must_use]
    pub fn transactions(&self, kind: TransactionKind) -> &[Transaction] {
        match kind {
            TransactionKind::Expense => &self.expenses,
            TransactionKind::Income => &self.income,
        }
    }
}

/// Trailing per-period totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendReport {
    /// Bucket size.
    pub period: PeriodKind,
    /// Which transactions were bucketed.
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    /// Whole window covered by the buckets.
    pub window: PeriodBounds,
    /// One point per period, oldest first.
    pub trends: Vec<TrendPoint>,
}

/// Category breakdown over a date range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BreakdownReport {
    /// Range covered.
    pub period: PeriodBounds,
    /// Which transactions were grouped.
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    /// Sum over all categories.
    pub total: Decimal,
    /// Shares, largest first.
    pub breakdown: Vec<CategoryShare>,
}

/// Overview of the period containing a reference instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    /// Period kind the overview is built for.
    pub period_kind: PeriodKind,
    /// Current period.
    pub period: PeriodBounds,
    /// Income versus expenses.
    pub summary: CashFlowSummary,
    /// Every declared budget, daily to yearly.
    pub budget_progress: Vec<BudgetProgress>,
    /// Largest expense categories of the period.
    pub top_categories: Vec<CategoryShare>,
    /// Generated insights, most severe first.
    pub insights: Vec<Insight>,
}
