//! Bucket data types.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::period::PeriodBounds;

/// A half-open time interval with the totals of the transactions inside it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodBucket {
    /// Period label (e.g. "2024-03", "2024-W09").
    pub key: String,
    /// Inclusive start.
    pub start: DateTime<Utc>,
    /// Exclusive end (inclusive for the last bucket of a range).
    pub end: DateTime<Utc>,
    /// Sum of amounts.
    pub total: Decimal,
    /// Number of transactions.
    pub count: usize,
    /// Sum of amounts per category name.
    pub by_category: BTreeMap<String, Decimal>,
}

impl PeriodBucket {
    /// Creates an empty bucket.
    #[must_use]
    pub fn empty(key: String, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            key,
            start,
            end,
            total: Decimal::ZERO,
            count: 0,
            by_category: BTreeMap::new(),
        }
    }

    /// Returns the bucket interval.
    #[must_use]
    pub fn bounds(&self) -> PeriodBounds {
        PeriodBounds {
            start: self.start,
            end: self.end,
        }
    }

    /// Returns true if no transaction landed in this bucket.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

/// A bucket together with the cumulative total up to and including it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendPoint {
    /// The bucket.
    #[serde(flatten)]
    pub bucket: PeriodBucket,
    /// Running total across the sequence.
    pub running_total: Decimal,
}
