//! Query and path parameter parsing.
//!
//! Parameters arrive as raw strings so that malformed values produce the
//! regular JSON validation error instead of a framework rejection.

use chrono::{DateTime, NaiveDate, Utc};
use spendwise_core::{PeriodCalculator, PeriodKind, TransactionKind};
use spendwise_shared::{AppError, AppResult, types::UserId};

/// Parses the `{user_id}` path segment.
pub fn user_id(raw: &str) -> AppResult<UserId> {
    raw.parse()
        .map_err(|_| AppError::Validation(format!("Invalid user id: {raw}")))
}

/// Parses `period`, falling back to `default` when absent or blank.
pub fn period(raw: Option<&str>, default: PeriodKind) -> AppResult<PeriodKind> {
    match non_blank(raw) {
        Some(value) => Ok(value.parse()?),
        None => Ok(default),
    }
}

/// Parses `type`, defaulting to expenses.
pub fn transaction_kind(raw: Option<&str>) -> AppResult<TransactionKind> {
    match non_blank(raw) {
        Some(value) => Ok(value.parse()?),
        None => Ok(TransactionKind::default()),
    }
}

/// Parses `months` as a positive count. Clamping is left to the caller.
pub fn count(raw: Option<&str>, name: &str) -> AppResult<Option<u32>> {
    non_blank(raw)
        .map(|value| {
            value
                .parse::<u32>()
                .map_err(|_| AppError::Validation(format!("Invalid {name}: {value}")))
        })
        .transpose()
}

/// Parses a calendar date (`YYYY-MM-DD`). A full RFC 3339 timestamp is
/// accepted too and reduced to its local date.
pub fn date(
    raw: Option<&str>,
    name: &str,
    calculator: &PeriodCalculator,
) -> AppResult<Option<NaiveDate>> {
    non_blank(raw)
        .map(|value| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .or_else(|_| {
                    DateTime::parse_from_rfc3339(value)
                        .map(|dt| calculator.local_date(dt.with_timezone(&Utc)))
                })
                .map_err(|_| AppError::Validation(format!("Invalid {name}: {value}")))
        })
        .transpose()
}

/// Parses `reference`: an RFC 3339 instant, or a date meaning its local
/// midnight. Defaults to `now`.
pub fn reference(
    raw: Option<&str>,
    calculator: &PeriodCalculator,
    now: DateTime<Utc>,
) -> AppResult<DateTime<Utc>> {
    let Some(value) = non_blank(raw) else {
        return Ok(now);
    };
    if let Ok(instant) = DateTime::parse_from_rfc3339(value) {
        return Ok(instant.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map(|date| calculator.start_of_day(date))
        .map_err(|_| AppError::Validation(format!("Invalid reference: {value}")))
}

fn non_blank(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|value| !value.is_empty())
}
