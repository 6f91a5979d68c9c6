//! Input records consumed by the analytics components.
//!
//! These are loaded by a persistence collaborator and treated as immutable for
//! the duration of one computation.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use spendwise_shared::types::{BudgetId, TransactionId};

use crate::error::{AnalyticsError, AnalyticsResult};
use crate::period::PeriodKind;

/// One expense or one income record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Record ID.
    #[serde(default)]
    pub id: TransactionId,
    /// Amount in major units, never negative.
    pub amount: Decimal,
    /// When the transaction happened.
    pub date: DateTime<Utc>,
    /// Optional category name.
    #[serde(default)]
    pub category_name: Option<String>,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
}

impl Transaction {
    /// Creates an uncategorized transaction with an empty description.
    #[must_use]
    pub fn new(amount: Decimal, date: DateTime<Utc>) -> Self {
        Self {
            id: TransactionId::new(),
            amount,
            date,
            category_name: None,
            description: String::new(),
        }
    }

    /// Sets the category name.
    #[must_use]
    pub fn with_category(mut self, name: impl Into<String>) -> Self {
        self.category_name = Some(name.into());
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Rejects negative amounts.
    pub fn validate(&self) -> AnalyticsResult<()> {
        ensure_non_negative(self.amount)
    }
}

/// Which side of the ledger a set of transactions belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Money spent.
    #[default]
    Expense,
    /// Money received.
    Income,
}

impl TransactionKind {
    /// Returns the wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Expense => "expense",
            Self::Income => "income",
        }
    }
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TransactionKind {
    type Err = AnalyticsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "expense" | "expenses" => Ok(Self::Expense),
            "income" => Ok(Self::Income),
            _ => Err(AnalyticsError::UnknownTransactionKind(s.to_string())),
        }
    }
}

/// A declared spending ceiling for one period kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    /// Budget ID.
    #[serde(default)]
    pub id: BudgetId,
    /// Period the ceiling applies to.
    pub period_kind: PeriodKind,
    /// Ceiling amount, never negative.
    pub amount: Decimal,
}

impl Budget {
    /// Creates a budget with a fresh ID.
    #[must_use]
    pub fn new(period_kind: PeriodKind, amount: Decimal) -> Self {
        Self {
            id: BudgetId::new(),
            period_kind,
            amount,
        }
    }

    /// Rejects negative ceilings.
    pub fn validate(&self) -> AnalyticsResult<()> {
        ensure_non_negative(self.amount)
    }
}

pub(crate) fn ensure_non_negative(amount: Decimal) -> AnalyticsResult<()> {
    if amount < Decimal::ZERO {
        return Err(AnalyticsError::NegativeAmount(amount));
    }
    Ok(())
}
