//! Rule-based spending insights derived from evaluated budgets, category
//! shares and cash flow.

pub mod engine;
pub mod types;

pub use engine::{InsightEngine, InsightRules};
pub use types::{Insight, InsightKind, InsightSeverity};
