//! Insight types.

use serde::{Deserialize, Serialize};

/// What an insight is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightKind {
    /// Spend reached the critical threshold of a budget.
    BudgetExceeded,
    /// Spend reached the warning threshold of a budget.
    BudgetWarning,
    /// Spend rose noticeably against the previous period.
    SpendingIncrease,
    /// Spend fell noticeably against the previous period.
    SpendingDecrease,
    /// One category takes most of the spend.
    DominantCategory,
    /// Expenses exceeded income.
    NegativeCashFlow,
}

impl InsightKind {
    /// Returns the wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BudgetExceeded => "budget_exceeded",
            Self::BudgetWarning => "budget_warning",
            Self::SpendingIncrease => "spending_increase",
            Self::SpendingDecrease => "spending_decrease",
            Self::DominantCategory => "dominant_category",
            Self::NegativeCashFlow => "negative_cash_flow",
        }
    }
}

impl std::fmt::Display for InsightKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How urgent an insight is. Ordered from least to most urgent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightSeverity {
    /// Informational.
    Info,
    /// Worth attention.
    Warning,
    /// Needs action.
    Critical,
}

/// One generated insight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Insight {
    /// Kind.
    pub kind: InsightKind,
    /// Severity.
    pub severity: InsightSeverity,
    /// Human-readable message.
    pub message: String,
}
