//! Category aggregation.

pub mod aggregator;
pub mod types;


pub use aggregator::CategoryAggregator;
pub use types::CategoryShare;

/// Group name for transactions without a usable category.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Returns the grouping key for an optional category name.
///
/// Missing, empty and whitespace-only names map to [`UNCATEGORIZED`];
/// other names are trimmed.
#[must_use]
pub fn category_key(name: Option<&str>) -> &str {
    match name.map(str::trim) {
        Some(trimmed) if !trimmed.is_empty() => trimmed,
        _ => UNCATEGORIZED,
    }
}
