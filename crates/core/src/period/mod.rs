//! Period boundaries.
//!
//! A period is a half-open `[start, end)` interval aligned to the local
//! calendar of a configured timezone: days start at local midnight, weeks on
//! Monday (ISO 8601), months on the 1st and years on January 1st.

pub mod calculator;
pub mod kind;


pub use calculator::{PeriodBounds, PeriodCalculator};
pub use kind::PeriodKind;
