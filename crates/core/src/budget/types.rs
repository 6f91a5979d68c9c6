//! Budget evaluation data types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use spendwise_shared::types::BudgetId;

use crate::error::{AnalyticsError, AnalyticsResult};
use crate::period::{PeriodBounds, PeriodKind};

/// Three-level classification of spend against a ceiling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetStatusLevel {
    /// Below the warning threshold.
    Normal,
    /// At or above warning, below critical.
    Warning,
    /// At or above critical.
    Critical,
}

impl BudgetStatusLevel {
    /// Returns the wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Warning => "warning",
            Self::Critical => "critical",
        }
    }
}

impl std::fmt::Display for BudgetStatusLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Percent-used thresholds for warning and critical status.
///
/// Always satisfies `0 <= warning <= critical`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BudgetThresholds {
    warning: Decimal,
    critical: Decimal,
}

impl Default for BudgetThresholds {
    fn default() -> Self {
        Self {
            warning: Decimal::from(80),
            critical: Decimal::ONE_HUNDRED,
        }
    }
}

impl BudgetThresholds {
    /// Creates thresholds, requiring `0 <= warning <= critical`.
    ///
    /// # Errors
    ///
    /// `InvalidThresholds` otherwise.
    pub fn new(warning: Decimal, critical: Decimal) -> AnalyticsResult<Self> {
        if warning < Decimal::ZERO || warning > critical {
            return Err(AnalyticsError::InvalidThresholds { warning, critical });
        }
        Ok(Self { warning, critical })
    }

    /// Classifies a percent-used value.
    #[must_use]
    pub fn classify(&self, percentage_used: Decimal) -> BudgetStatusLevel {
        if percentage_used >= self.critical {
            BudgetStatusLevel::Critical
        } else if percentage_used >= self.warning {
            BudgetStatusLevel::Warning
        } else {
            BudgetStatusLevel::Normal
        }
    }
}

/// Spend measured against a declared budget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetStatus {
    /// Period the budget applies to.
    pub period_kind: PeriodKind,
    /// Declared ceiling.
    pub budget_amount: Decimal,
    /// Amount spent in the period.
    pub spent: Decimal,
    /// `max(0, budget_amount - spent)`.
    pub remaining: Decimal,
    /// `spent / budget_amount * 100`, 2 dp; 0 for a zero budget.
    pub percentage_used: Decimal,
    /// Classification.
    pub status: BudgetStatusLevel,
}

/// Direction of spend compared with the previous period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    /// Spending went up.
    Up,
    /// Spending went down.
    Down,
    /// No change.
    Flat,
}

/// Comparison of the current period's spend with the previous one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpendingTrend {
    /// Spend in the current period.
    pub current: Decimal,
    /// Spend in the previous period.
    pub previous: Decimal,
    /// `current - previous`.
    pub delta: Decimal,
    /// `delta / previous * 100`, 2 dp; 0 when there was no previous spend.
    pub delta_percent: Decimal,
    /// Sign of `delta`.
    pub direction: TrendDirection,
}

/// Status plus trend for one budget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetEvaluation {
    /// Current status.
    #[serde(flatten)]
    pub status: BudgetStatus,
    /// Trend against the previous period.
    pub trend: SpendingTrend,
}

/// Evaluation of a stored budget for the period containing a reference instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetProgress {
    /// Budget ID.
    pub budget_id: BudgetId,
    /// Current period.
    pub period: PeriodBounds,
    /// Evaluation.
    #[serde(flatten)]
    pub evaluation: BudgetEvaluation,
}
