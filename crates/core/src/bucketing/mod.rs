//! Period bucketing of dated transactions.

pub mod engine;
pub mod types;


pub use engine::{BucketingEngine, MAX_BUCKETS};
pub use types::{PeriodBucket, TrendPoint};
