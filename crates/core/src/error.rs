//! Analytics error types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use spendwise_shared::AppError;
use thiserror::Error;

/// Result type alias using `AnalyticsError`.
pub type AnalyticsResult<T> = Result<T, AnalyticsError>;

/// Errors raised by the analytics core.
///
/// Every variant is a contract violation by the caller. Empty inputs and zero
/// denominators are never errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalyticsError {
    /// Period kind is not one of daily, weekly, monthly, yearly.
    #[error("Unknown period kind: {0}")]
    UnknownPeriodKind(String),

    /// Transaction kind is not one of expense, income.
    #[error("Unknown transaction type: {0}")]
    UnknownTransactionKind(String),

    /// A monetary amount was negative.
    #[error("Amount cannot be negative: {0}")]
    NegativeAmount(Decimal),

    /// Range end lies before range start.
    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidRange {
        /// Range start.
        start: DateTime<Utc>,
        /// Range end.
        end: DateTime<Utc>,
    },

    /// Warning threshold above critical threshold, or a negative threshold.
    #[error("Invalid budget thresholds: warning {warning}% / critical {critical}%")]
    InvalidThresholds {
        /// Warning threshold in percent.
        warning: Decimal,
        /// Critical threshold in percent.
        critical: Decimal,
    },

    /// Currency code is not supported.
    #[error("Unknown currency: {0}")]
    UnknownCurrency(String),

    /// Timezone name could not be resolved.
    #[error("Unknown timezone: {0}")]
    InvalidTimezone(String),

    /// Calendar arithmetic left the representable date range.
    #[error("Date out of supported range")]
    DateOutOfRange,

    /// Requested range would produce more buckets than allowed.
    #[error("Range too large: {buckets} buckets exceeds limit of {limit}")]
    RangeTooLarge {
        /// Buckets the range would need.
        buckets: usize,
        /// Maximum allowed.
        limit: usize,
    },
}

impl From<AnalyticsError> for AppError {
    fn from(err: AnalyticsError) -> Self {
        Self::Validation(err.to_string())
    }
}
