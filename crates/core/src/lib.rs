//! Core analytics logic for Spendwise.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! Every component is a synchronous function of its inputs; callers load the
//! transactions and budgets and pass them in.
//!
//! # Modules
//!
//! - `period` - Period kinds and local-calendar boundaries
//! - `bucketing` - Grouping transactions into consecutive period buckets
//! - `budget` - Budget status, thresholds and period-over-period trend
//! - `category` - Per-category totals and percentage shares
//! - `summary` - Income versus expense cash flow
//! - `insights` - Rule-based spending insights
//! - `report` - Text and structured period digests
//! - `analytics` - Operations combining the above over a ledger snapshot

pub mod analytics;
pub mod bucketing;
pub mod budget;
pub mod category;
pub mod error;
pub mod insights;
pub mod model;
pub mod period;
pub mod report;
pub mod summary;

pub use analytics::{AnalyticsService, LedgerSnapshot};
pub use error::{AnalyticsError, AnalyticsResult};
pub use model::{Budget, Transaction, TransactionKind};
pub use period::{PeriodBounds, PeriodCalculator, PeriodKind};
