//! Budget tracking against daily, weekly, monthly and yearly ceilings.

pub mod evaluator;
pub mod types;

#[cfg(test)]
mod tests;

pub use evaluator::BudgetEvaluator;
pub use types::{
    BudgetEvaluation, BudgetProgress, BudgetStatus, BudgetStatusLevel, BudgetThresholds,
    SpendingTrend, TrendDirection,
};
