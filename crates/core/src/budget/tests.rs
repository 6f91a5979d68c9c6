//! Property-based tests for budget module.

use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::evaluator::BudgetEvaluator;
use super::types::{BudgetStatusLevel, BudgetThresholds, TrendDirection};
use crate::model::Budget;
use crate::period::PeriodKind;

fn any_kind() -> impl Strategy<Value = PeriodKind> {
    prop::sample::select(PeriodKind::ALL.to_vec())
}

proptest! {
    /// P4: status is monotone in spend and consistent with the thresholds.
    #[test]
    fn test_status_monotone_in_spend(
        kind in any_kind(),
        amount in 1i64..10_000_000,
        lower in 0i64..20_000_000,
        extra in 0i64..20_000_000,
    ) {
        let budget = Budget::new(kind, Decimal::new(amount, 2));
        let evaluator = BudgetEvaluator::default();

        let low = evaluator.status(&budget, Decimal::new(lower, 2)).unwrap();
        let high = evaluator.status(&budget, Decimal::new(lower + extra, 2)).unwrap();

        prop_assert!(low.percentage_used <= high.percentage_used);
        prop_assert!(low.status <= high.status);
        prop_assert!(high.remaining <= low.remaining);

        let expected = if high.percentage_used >= dec!(100) {
            BudgetStatusLevel::Critical
        } else if high.percentage_used >= dec!(80) {
            BudgetStatusLevel::Warning
        } else {
            BudgetStatusLevel::Normal
        };
        prop_assert_eq!(high.status, expected);
    }

    /// Remaining is never negative and adds back up to the budget when under it.
    #[test]
    fn test_remaining_non_negative(
        amount in 0i64..10_000_000,
        spent in 0i64..20_000_000,
    ) {
        let budget = Budget::new(PeriodKind::Monthly, Decimal::new(amount, 2));
        let status = BudgetEvaluator::default()
            .status(&budget, Decimal::new(spent, 2))
            .unwrap();

        prop_assert!(status.remaining >= Decimal::ZERO);
        if status.spent <= status.budget_amount {
            prop_assert_eq!(status.remaining + status.spent, status.budget_amount);
        } else {
            prop_assert!(status.remaining.is_zero());
        }
    }

    /// Custom thresholds classify the same way as the defaults, shifted.
    #[test]
    fn test_custom_thresholds_respected(
        warning in 0i64..150,
        gap in 0i64..100,
        spent in 0i64..300,
    ) {
        let (warning, critical) = (Decimal::from(warning), Decimal::from(warning + gap));
        let thresholds = BudgetThresholds::new(warning, critical).unwrap();
        let budget = Budget::new(PeriodKind::Weekly, dec!(100));
        let status = BudgetEvaluator::new(thresholds)
            .status(&budget, Decimal::from(spent))
            .unwrap();

        let pct = Decimal::from(spent);
        prop_assert_eq!(status.percentage_used, pct);
        if pct >= critical {
            prop_assert_eq!(status.status, BudgetStatusLevel::Critical);
        } else if pct >= warning {
            prop_assert_eq!(status.status, BudgetStatusLevel::Warning);
        } else {
            prop_assert_eq!(status.status, BudgetStatusLevel::Normal);
        }
    }

    /// Trend direction follows the sign of the delta.
    #[test]
    fn test_trend_direction_matches_delta(
        current in 0i64..1_000_000,
        previous in 0i64..1_000_000,
    ) {
        let trend = BudgetEvaluator::trend(Decimal::new(current, 2), Decimal::new(previous, 2));

        prop_assert_eq!(trend.delta, trend.current - trend.previous);
        let expected = match current.cmp(&previous) {
            std::cmp::Ordering::Greater => TrendDirection::Up,
            std::cmp::Ordering::Less => TrendDirection::Down,
            std::cmp::Ordering::Equal => TrendDirection::Flat,
        };
        prop_assert_eq!(trend.direction, expected);
        if previous == 0 {
            prop_assert!(trend.delta_percent.is_zero());
        }
    }

    /// P5: identical inputs give identical outputs.
    #[test]
    fn test_evaluate_idempotent(
        kind in any_kind(),
        amount in 0i64..1_000_000,
        current in 0i64..1_000_000,
        previous in 0i64..1_000_000,
    ) {
        let budget = Budget::new(kind, Decimal::new(amount, 2));
        let evaluator = BudgetEvaluator::default();
        let current = Decimal::new(current, 2);
        let previous = Decimal::new(previous, 2);

        prop_assert_eq!(
            evaluator.evaluate(&budget, current, previous),
            evaluator.evaluate(&budget, current, previous)
        );
    }
}
