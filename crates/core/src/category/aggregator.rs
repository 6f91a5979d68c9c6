//! Category aggregator.

use std::collections::HashMap;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use super::category_key;
use super::types::CategoryShare;
use crate::error::AnalyticsResult;
use crate::model::Transaction;
use crate::period::PeriodBounds;

const ONE_CENT_PERCENT: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Groups transactions by category and computes percentage shares.
pub struct CategoryAggregator;

impl CategoryAggregator {
    /// Aggregates transactions by category, largest total first.
    ///
    /// Equal totals keep the order in which their category was first seen.
    /// Percentages are rounded to 2 decimal places with largest-remainder
    /// apportionment so that they add up to exactly 100 when the overall
    /// total is positive; they are all 0 otherwise.
    ///
    /// # Errors
    ///
    /// `NegativeAmount` for any negative transaction.
    pub fn aggregate(transactions: &[Transaction]) -> AnalyticsResult<Vec<CategoryShare>> {
        Self::aggregate_iter(transactions.iter())
    }

    /// Aggregates only the transactions dated inside `bounds` (half-open).
    pub fn aggregate_within(
        transactions: &[Transaction],
        bounds: &PeriodBounds,
    ) -> AnalyticsResult<Vec<CategoryShare>> {
        Self::aggregate_iter(transactions.iter().filter(|tx| bounds.contains(tx.date)))
    }

    fn aggregate_iter<'a>(
        transactions: impl Iterator<Item = &'a Transaction>,
    ) -> AnalyticsResult<Vec<CategoryShare>> {
        let mut index: HashMap<String, usize> = HashMap::new();
        let mut shares: Vec<CategoryShare> = Vec::new();

        for tx in transactions {
            tx.validate()?;
            let key = category_key(tx.category_name.as_deref());
            let slot = match index.get(key) {
                Some(&slot) => slot,
                None => {
                    index.insert(key.to_string(), shares.len());
                    shares.push(CategoryShare {
                        category_name: key.to_string(),
                        total: Decimal::ZERO,
                        count: 0,
                        percentage: Decimal::ZERO,
                    });
                    shares.len() - 1
                }
            };
            let share = &mut shares[slot];
            share.total = share.total.saturating_add(tx.amount);
            share.count += 1;
        }

        // Stable: equal totals stay in first-seen order.
        shares.sort_by(|a, b| b.total.cmp(&a.total));
        apportion_percentages(&mut shares);
        Ok(shares)
    }
}

fn apportion_percentages(shares: &mut [CategoryShare]) {
    let overall = shares
        .iter()
        .fold(Decimal::ZERO, |acc, s| acc.saturating_add(s.total));
    if overall <= Decimal::ZERO {
        return;
    }

    let mut remainders = Vec::with_capacity(shares.len());
    let mut floored_sum = Decimal::ZERO;
    for (i, share) in shares.iter_mut().enumerate() {
        let exact = share
            .total
            .checked_mul(Decimal::ONE_HUNDRED)
            .and_then(|scaled| scaled.checked_div(overall))
            .unwrap_or(Decimal::ZERO);
        let floored = exact.round_dp_with_strategy(2, RoundingStrategy::ToZero);
        share.percentage = floored;
        floored_sum += floored;
        remainders.push((i, exact - floored));
    }

    let missing_cents = ((Decimal::ONE_HUNDRED - floored_sum) / ONE_CENT_PERCENT)
        .round()
        .to_usize()
        .unwrap_or(0);

    // Stable: equal remainders favour the larger category.
    remainders.sort_by(|a, b| b.1.cmp(&a.1));
    for (i, _) in remainders.into_iter().take(missing_cents) {
        shares[i].percentage += ONE_CENT_PERCENT;
    }
}
