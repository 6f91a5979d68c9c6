//! Use-case layer combining the components over one ledger snapshot.

pub mod service;
pub mod types;

pub use service::{AnalyticsService, MAX_TREND_PERIODS};
pub use types::{BreakdownReport, Dashboard, LedgerSnapshot, TrendReport};
