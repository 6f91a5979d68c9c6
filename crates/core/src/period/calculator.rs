//! Period boundary calculation in a configured timezone.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use super::kind::PeriodKind;
use crate::error::{AnalyticsError, AnalyticsResult};

const SECONDS_PER_DAY: i64 = 86_400;

/// Half-open `[start, end)` interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PeriodBounds {
    /// Inclusive start.
    pub start: DateTime<Utc>,
    /// Exclusive end.
    pub end: DateTime<Utc>,
}

impl PeriodBounds {
    /// Creates bounds, rejecting `end < start`.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> AnalyticsResult<Self> {
        if end < start {
            return Err(AnalyticsError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Returns true if `at` lies in `[start, end)`.
    #[must_use]
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        at >= self.start && at < self.end
    }

    /// Number of calendar days covered, at least 1.
    ///
    /// Rounds to the nearest whole day so 23 and 25 hour DST days count once.
    #[must_use]
    pub fn day_count(&self) -> i64 {
        let seconds = (self.end - self.start).num_seconds();
        ((seconds + SECONDS_PER_DAY / 2) / SECONDS_PER_DAY).max(1)
    }
}

/// Computes period boundaries on the local calendar of a timezone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodCalculator {
    tz: Tz,
}

impl Default for PeriodCalculator {
    fn default() -> Self {
        Self::new(chrono_tz::UTC)
    }
}

impl PeriodCalculator {
    /// Creates a calculator for the given timezone.
    #[must_use]
    pub const fn new(tz: Tz) -> Self {
        Self { tz }
    }

    /// Creates a calculator from an IANA timezone name such as "Asia/Jakarta".
    pub fn from_timezone_name(name: &str) -> AnalyticsResult<Self> {
        name.parse::<Tz>()
            .map(Self::new)
            .map_err(|_| AnalyticsError::InvalidTimezone(name.to_string()))
    }

    /// Returns the period of `kind` containing `reference`.
    pub fn bounds(&self, reference: DateTime<Utc>, kind: PeriodKind) -> AnalyticsResult<PeriodBounds> {
        self.bounds_back(reference, kind, 0)
    }

    /// Returns the period immediately before the one containing `reference`.
    ///
    /// The result ends exactly where the current period starts.
    pub fn previous_bounds(
        &self,
        reference: DateTime<Utc>,
        kind: PeriodKind,
    ) -> AnalyticsResult<PeriodBounds> {
        self.bounds_back(reference, kind, 1)
    }

    /// Returns the period `steps` periods before the one containing `reference`.
    pub fn bounds_back(
        &self,
        reference: DateTime<Utc>,
        kind: PeriodKind,
        steps: u32,
    ) -> AnalyticsResult<PeriodBounds> {
        let steps = i32::try_from(steps).map_err(|_| AnalyticsError::DateOutOfRange)?;
        let current_start = self.period_start_local(reference, kind);
        let start = self.shift(current_start, kind, -steps)?;
        let end = self.shift(current_start, kind, 1 - steps)?;
        PeriodBounds::new(start, end)
    }

    /// Returns local midnight of `date` as an instant.
    #[must_use]
    pub fn start_of_day(&self, date: NaiveDate) -> DateTime<Utc> {
        self.from_local(date.and_time(NaiveTime::MIN))
    }

    /// Returns the bounds covering the local dates `first..=last`.
    ///
    /// # Errors
    ///
    /// `InvalidRange` if `last` is before `first`, `DateOutOfRange` if the day
    /// after `last` does not exist.
    pub fn date_range(&self, first: NaiveDate, last: NaiveDate) -> AnalyticsResult<PeriodBounds> {
        if last < first {
            return Err(AnalyticsError::InvalidRange {
                start: self.start_of_day(first),
                end: self.start_of_day(last),
            });
        }
        let after_last = last.succ_opt().ok_or(AnalyticsError::DateOutOfRange)?;
        PeriodBounds::new(self.start_of_day(first), self.start_of_day(after_last))
    }

    /// Returns the local calendar date of an instant.
    #[must_use]
    pub fn local_date(&self, at: DateTime<Utc>) -> NaiveDate {
        self.to_local(at).date()
    }

    /// Returns the last local calendar date covered by `bounds`.
    #[must_use]
    pub fn last_local_date(&self, bounds: &PeriodBounds) -> NaiveDate {
        if bounds.end > bounds.start {
            self.local_date(bounds.end - TimeDelta::nanoseconds(1))
        } else {
            self.local_date(bounds.start)
        }
    }

    /// Converts an instant to local wall-clock time.
    #[must_use]
    pub fn to_local(&self, at: DateTime<Utc>) -> NaiveDateTime {
        at.with_timezone(&self.tz).naive_local()
    }

    /// Converts local wall-clock time back to an instant.
    ///
    /// Ambiguous times (DST fall-back) resolve to the earlier instant; times in
    /// a DST gap resolve to one hour later.
    #[must_use]
    pub fn from_local(&self, local: NaiveDateTime) -> DateTime<Utc> {
        let resolved = self.tz.from_local_datetime(&local).earliest().or_else(|| {
            local
                .checked_add_signed(TimeDelta::hours(1))
                .and_then(|shifted| self.tz.from_local_datetime(&shifted).earliest())
        });
        resolved.map_or_else(
            || Utc.from_utc_datetime(&local),
            |dt| dt.with_timezone(&Utc),
        )
    }

    /// Moves a local anchor by `steps` periods and converts it to an instant.
    pub fn shift(
        &self,
        anchor: NaiveDateTime,
        kind: PeriodKind,
        steps: i32,
    ) -> AnalyticsResult<DateTime<Utc>> {
        kind.shift(anchor, steps)
            .map(|local| self.from_local(local))
            .ok_or(AnalyticsError::DateOutOfRange)
    }

    fn period_start_local(&self, reference: DateTime<Utc>, kind: PeriodKind) -> NaiveDateTime {
        let date = self.local_date(reference);
        let start = match kind {
            PeriodKind::Daily => date,
            PeriodKind::Weekly => {
                date - TimeDelta::days(i64::from(date.weekday().num_days_from_monday()))
            }
            PeriodKind::Monthly => date.with_day(1).unwrap_or(date),
            PeriodKind::Yearly => date.with_ordinal(1).unwrap_or(date),
        };
        start.and_time(NaiveTime::MIN)
    }
}
