//! Period kinds and calendar stepping.

use chrono::{Months, NaiveDate, NaiveDateTime, TimeDelta};
use serde::{Deserialize, Serialize};

use crate::error::AnalyticsError;

/// Granularity used to bucket time.
///
/// Ordered from the shortest to the longest period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodKind {
    /// One local calendar day.
    #[serde(alias = "day")]
    Daily,
    /// One ISO week, Monday to Sunday.
    #[serde(alias = "week")]
    Weekly,
    /// One calendar month.
    #[serde(alias = "month")]
    Monthly,
    /// One calendar year.
    #[serde(alias = "year")]
    Yearly,
}

impl PeriodKind {
    /// All period kinds, shortest first.
    pub const ALL: [Self; 4] = [Self::Daily, Self::Weekly, Self::Monthly, Self::Yearly];

    /// Returns the wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
        }
    }

    /// Human-readable adjective used in messages ("Monthly").
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Daily => "Daily",
            Self::Weekly => "Weekly",
            Self::Monthly => "Monthly",
            Self::Yearly => "Yearly",
        }
    }

    /// Noun for the period ("month").
    #[must_use]
    pub const fn noun(self) -> &'static str {
        match self {
            Self::Daily => "day",
            Self::Weekly => "week",
            Self::Monthly => "month",
            Self::Yearly => "year",
        }
    }

    /// Builds the bucket key for a period starting on `date`.
    ///
    /// Daily `2024-03-02`, weekly `2024-W09` (ISO week of the start date),
    /// monthly `2024-03`, yearly `2024`.
    #[must_use]
    pub fn label(self, date: NaiveDate) -> String {
        let format = match self {
            Self::Daily => "%Y-%m-%d",
            Self::Weekly => "%G-W%V",
            Self::Monthly => "%Y-%m",
            Self::Yearly => "%Y",
        };
        date.format(format).to_string()
    }

    /// Moves a local date-time by `steps` periods of this kind.
    ///
    /// Month and year steps clamp to the end of shorter months
    /// (Jan 31 + 1 month = Feb 29 in a leap year). Returns `None` on overflow.
    #[must_use]
    pub fn shift(self, at: NaiveDateTime, steps: i32) -> Option<NaiveDateTime> {
        match self {
            Self::Daily => at.checked_add_signed(TimeDelta::try_days(i64::from(steps))?),
            Self::Weekly => at.checked_add_signed(TimeDelta::try_weeks(i64::from(steps))?),
            Self::Monthly => shift_months(at, steps),
            Self::Yearly => shift_months(at, steps.checked_mul(12)?),
        }
    }
}

fn shift_months(at: NaiveDateTime, months: i32) -> Option<NaiveDateTime> {
    let delta = Months::new(months.unsigned_abs());
    if months >= 0 {
        at.checked_add_months(delta)
    } else {
        at.checked_sub_months(delta)
    }
}

impl std::fmt::Display for PeriodKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PeriodKind {
    type Err = AnalyticsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "daily" | "day" => Ok(Self::Daily),
            "weekly" | "week" => Ok(Self::Weekly),
            "monthly" | "month" => Ok(Self::Monthly),
            "yearly" | "year" => Ok(Self::Yearly),
            _ => Err(AnalyticsError::UnknownPeriodKind(s.to_string())),
        }
    }
}
