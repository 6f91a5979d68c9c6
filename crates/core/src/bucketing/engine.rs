//! Bucketing engine.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use super::types::{PeriodBucket, TrendPoint};
use crate::category::category_key;
use crate::error::{AnalyticsError, AnalyticsResult};
use crate::model::Transaction;
use crate::period::{PeriodBounds, PeriodCalculator, PeriodKind};

/// Upper bound on buckets produced by a single call.
pub const MAX_BUCKETS: usize = 20_000;

/// Partitions transactions into consecutive period buckets.
#[derive(Debug, Clone, Copy, Default)]
pub struct BucketingEngine {
    calculator: PeriodCalculator,
}

impl BucketingEngine {
    /// Creates an engine stepping on the calculator's local calendar.
    #[must_use]
    pub const fn new(calculator: PeriodCalculator) -> Self {
        Self { calculator }
    }

    /// Buckets `transactions` into periods of `kind` tiling `[range_start, range_end]`.
    ///
    /// Buckets step from `range_start` by whole periods of `kind` on the local
    /// calendar; the last one is cut at `range_end` and also contains
    /// `range_end` itself. Each bucket is otherwise half-open, so a
    /// transaction dated on a boundary belongs to the bucket starting there.
    /// Transactions outside the range are ignored. Empty periods still get a
    /// bucket. Pass a calendar-aligned `range_start` (see
    /// [`PeriodCalculator::bounds`]) for calendar buckets.
    ///
    /// # Errors
    ///
    /// `InvalidRange` if `range_end < range_start`, `NegativeAmount` for any
    /// negative transaction, `RangeTooLarge` beyond [`MAX_BUCKETS`].
    pub fn bucketize(
        &self,
        transactions: &[Transaction],
        kind: PeriodKind,
        range_start: DateTime<Utc>,
        range_end: DateTime<Utc>,
    ) -> AnalyticsResult<Vec<PeriodBucket>> {
        PeriodBounds::new(range_start, range_end)?;
        self.fill(transactions, kind, range_start, range_end, |date| {
            date >= range_start && date <= range_end
        })
    }

    /// Buckets `transactions` into periods of `kind` tiling the half-open
    /// `window`.
    ///
    /// Same as [`Self::bucketize`] except that a transaction dated exactly at
    /// `window.end` belongs to the next period and is left out.
    ///
    /// # Errors
    ///
    /// `NegativeAmount` for any negative transaction, `RangeTooLarge` beyond
    /// [`MAX_BUCKETS`].
    pub fn bucketize_window(
        &self,
        transactions: &[Transaction],
        kind: PeriodKind,
        window: &PeriodBounds,
    ) -> AnalyticsResult<Vec<PeriodBucket>> {
        self.fill(transactions, kind, window.start, window.end, |date| {
            window.contains(date)
        })
    }

    fn fill(
        &self,
        transactions: &[Transaction],
        kind: PeriodKind,
        range_start: DateTime<Utc>,
        range_end: DateTime<Utc>,
        in_range: impl Fn(DateTime<Utc>) -> bool,
    ) -> AnalyticsResult<Vec<PeriodBucket>> {
        for tx in transactions {
            tx.validate()?;
        }

        let mut buckets = self.empty_buckets(kind, range_start, range_end)?;

        for tx in transactions.iter().filter(|tx| in_range(tx.date)) {
            // buckets[0].start == range_start <= tx.date, so the partition point is >= 1.
            let index = buckets.partition_point(|b| b.start <= tx.date) - 1;
            let bucket = &mut buckets[index];
            bucket.total = bucket.total.saturating_add(tx.amount);
            bucket.count += 1;
            let entry = bucket
                .by_category
                .entry(category_key(tx.category_name.as_deref()).to_string())
                .or_insert(Decimal::ZERO);
            *entry = entry.saturating_add(tx.amount);
        }

        Ok(buckets)
    }

    /// Attaches a running total to each bucket, in order.
    #[must_use]
    pub fn with_running_totals(buckets: &[PeriodBucket]) -> Vec<TrendPoint> {
        let mut running = Decimal::ZERO;
        buckets
            .iter()
            .map(|bucket| {
                running = running.saturating_add(bucket.total);
                TrendPoint {
                    bucket: bucket.clone(),
                    running_total: running,
                }
            })
            .collect()
    }

    /// Sums the amounts of transactions dated inside `bounds` (half-open).
    #[must_use]
    pub fn total_within(transactions: &[Transaction], bounds: &PeriodBounds) -> Decimal {
        transactions
            .iter()
            .filter(|tx| bounds.contains(tx.date))
            .fold(Decimal::ZERO, |acc, tx| acc.saturating_add(tx.amount))
    }

    fn empty_buckets(
        &self,
        kind: PeriodKind,
        range_start: DateTime<Utc>,
        range_end: DateTime<Utc>,
    ) -> AnalyticsResult<Vec<PeriodBucket>> {
        let anchor = self.calculator.to_local(range_start);
        let mut buckets = Vec::new();
        let mut start = range_start;
        let mut step: i32 = 1;

        loop {
            let next = self.calculator.shift(anchor, kind, step)?;
            let key = kind.label(self.calculator.local_date(start));
            if next >= range_end {
                buckets.push(PeriodBucket::empty(key, start, range_end));
                return Ok(buckets);
            }
            if next <= start {
                return Err(AnalyticsError::DateOutOfRange);
            }
            buckets.push(PeriodBucket::empty(key, start, next));
            if buckets.len() >= MAX_BUCKETS {
                return Err(AnalyticsError::RangeTooLarge {
                    buckets: buckets.len() + 1,
                    limit: MAX_BUCKETS,
                });
            }
            start = next;
            step = step.checked_add(1).ok_or(AnalyticsError::DateOutOfRange)?;
        }
    }
}
