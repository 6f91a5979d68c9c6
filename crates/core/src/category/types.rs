//! Category data types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One category's total and its share of the overall total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryShare {
    /// Category name, or "Uncategorized".
    pub category_name: String,
    /// Sum of amounts.
    pub total: Decimal,
    /// Number of transactions.
    pub count: usize,
    /// Share of the overall total in percent, 2 decimal places.
    pub percentage: Decimal,
}
