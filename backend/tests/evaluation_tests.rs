//! Payout evaluation integration tests
//!
//! Tests for the parametric evaluation core:
//! - rainy-day classification at and around the threshold
//! - the pending -> triggered -> paid payout state machine
//! - monotonicity of both classification and triggering

use proptest::prelude::*;
use rust_decimal::Decimal;
use std::str::FromStr;

use shared::{classify_rainfall, count_rainy_days, evaluate_payout, PayoutStatus, RainfallReading};

// Helper to create Decimal from string
fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn date(s: &str) -> chrono::NaiveDate {
    s.parse().unwrap()
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// Rainfall exactly at the threshold counts as a rainy day
    #[test]
    fn test_classification_boundary_inclusive() {
        assert!(classify_rainfall(dec("5"), dec("5")).unwrap());
        assert!(classify_rainfall(dec("5.01"), dec("5")).unwrap());
        assert!(!classify_rainfall(dec("4.99"), dec("5")).unwrap());
    }

    #[test]
    fn test_classification_zero_threshold() {
        // A zero threshold classifies every day, including a dry one, rainy
        assert!(classify_rainfall(dec("0"), dec("0")).unwrap());
    }

    #[test]
    fn test_classification_rejects_negative_amount() {
        assert!(classify_rainfall(dec("-0.1"), dec("5")).is_err());
    }

    #[test]
    fn test_classification_rejects_negative_threshold() {
        assert!(classify_rainfall(dec("3"), dec("-5")).is_err());
    }

    #[test]
    fn test_count_rainy_days_over_month() {
        let amounts = ["0", "12.5", "5", "4.9", "0", "22", "1.2"];
        let readings: Vec<RainfallReading> = amounts
            .iter()
            .enumerate()
            .map(|(i, mm)| {
                RainfallReading::new(
                    date("2025-06-01") + chrono::Duration::days(i as i64),
                    dec(mm),
                )
                .unwrap()
            })
            .collect();

        assert_eq!(count_rainy_days(&readings, dec("5")).unwrap(), 3);
    }

    #[test]
    fn test_count_rainy_days_propagates_invalid_reading() {
        let readings = vec![RainfallReading {
            date: date("2025-06-01"),
            amount_mm: dec("-3"),
        }];
        assert!(count_rainy_days(&readings, dec("5")).is_err());
    }

    /// Scenario from the policy docs: predicted 8, actual 10
    #[test]
    fn test_exceeded_prediction_triggers_with_excess() {
        let result = evaluate_payout(8, 10, PayoutStatus::Pending).unwrap();
        assert_eq!(result.status, PayoutStatus::Triggered);
        assert_eq!(result.excess_days, 2);
    }

    /// Scenario from the policy docs: predicted 12, actual 8
    #[test]
    fn test_under_prediction_stays_pending() {
        let result = evaluate_payout(12, 8, PayoutStatus::Pending).unwrap();
        assert_eq!(result.status, PayoutStatus::Pending);
        assert_eq!(result.excess_days, 0);
    }

    /// The payout condition is strict: "exceeded", not "met"
    #[test]
    fn test_equal_counts_do_not_trigger() {
        let result = evaluate_payout(10, 10, PayoutStatus::Pending).unwrap();
        assert_eq!(result.status, PayoutStatus::Pending);
    }

    /// Recomputation with fewer rainy days must not un-trigger
    #[test]
    fn test_triggered_does_not_revert() {
        let result = evaluate_payout(10, 3, PayoutStatus::Triggered).unwrap();
        assert_eq!(result.status, PayoutStatus::Triggered);
    }

    /// Paid is terminal for the coverage period
    #[test]
    fn test_paid_is_terminal() {
        for actual in [0, 10, 25] {
            let result = evaluate_payout(10, actual, PayoutStatus::Paid).unwrap();
            assert_eq!(result.status, PayoutStatus::Paid);
        }
    }

    #[test]
    fn test_negative_counts_rejected_not_clamped() {
        assert!(evaluate_payout(-1, 0, PayoutStatus::Pending).is_err());
        assert!(evaluate_payout(0, -1, PayoutStatus::Pending).is_err());
        assert!(evaluate_payout(-5, -5, PayoutStatus::Pending).is_err());
    }

    /// Full lifecycle: rain accumulates day by day, then the claim settles
    #[test]
    fn test_status_lifecycle() {
        let predicted = 3;
        let mut status = PayoutStatus::Pending;

        for actual in 0..=3 {
            status = evaluate_payout(predicted, actual, status).unwrap().status;
            assert_eq!(status, PayoutStatus::Pending);
        }

        status = evaluate_payout(predicted, 4, status).unwrap().status;
        assert_eq!(status, PayoutStatus::Triggered);

        // Settlement happens outside the evaluator
        status = PayoutStatus::Paid;
        status = evaluate_payout(predicted, 9, status).unwrap().status;
        assert_eq!(status, PayoutStatus::Paid);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    /// Strategy for non-negative millimeter amounts with two decimals
    fn mm_strategy() -> impl Strategy<Value = Decimal> {
        (0i64..50_000).prop_map(|n| Decimal::new(n, 2))
    }

    proptest! {
        /// More rain never declassifies a rainy day
        #[test]
        fn prop_monotonic_in_amount(
            amount in mm_strategy(),
            extra in mm_strategy(),
            threshold in mm_strategy(),
        ) {
            let before = classify_rainfall(amount, threshold).unwrap();
            let after = classify_rainfall(amount + extra, threshold).unwrap();
            prop_assert!(!before || after);
        }

        /// A higher threshold never classifies a previously dry day rainy
        #[test]
        fn prop_monotonic_in_threshold(
            amount in mm_strategy(),
            threshold in mm_strategy(),
            extra in mm_strategy(),
        ) {
            let loose = classify_rainfall(amount, threshold).unwrap();
            let strict = classify_rainfall(amount, threshold + extra).unwrap();
            prop_assert!(!strict || loose);
        }

        /// Classification is idempotent: same inputs, same answer
        #[test]
        fn prop_classification_deterministic(
            amount in mm_strategy(),
            threshold in mm_strategy(),
        ) {
            let first = classify_rainfall(amount, threshold).unwrap();
            let second = classify_rainfall(amount, threshold).unwrap();
            prop_assert_eq!(first, second);
        }

        /// Pending iff actual <= predicted, excess always max(0, diff)
        #[test]
        fn prop_pending_iff_within_prediction(
            predicted in 0i32..365,
            actual in 0i32..365,
        ) {
            let result = evaluate_payout(predicted, actual, PayoutStatus::Pending).unwrap();
            prop_assert_eq!(result.status == PayoutStatus::Pending, actual <= predicted);
            prop_assert_eq!(result.excess_days, (actual - predicted).max(0));
        }

        /// Once triggered, no re-evaluation returns pending
        #[test]
        fn prop_trigger_is_one_way(
            predicted in 0i32..365,
            first_actual in 0i32..365,
            second_actual in 0i32..365,
        ) {
            let first = evaluate_payout(predicted, first_actual, PayoutStatus::Pending).unwrap();
            let second = evaluate_payout(predicted, second_actual, first.status).unwrap();
            if first.status == PayoutStatus::Triggered {
                prop_assert_eq!(second.status, PayoutStatus::Triggered);
            }
        }

        /// The evaluator never produces paid on its own
        #[test]
        fn prop_evaluator_never_pays(
            predicted in 0i32..365,
            actual in 0i32..365,
        ) {
            for prior in [PayoutStatus::Pending, PayoutStatus::Triggered] {
                let result = evaluate_payout(predicted, actual, prior).unwrap();
                prop_assert_ne!(result.status, PayoutStatus::Paid);
            }
        }
    }
}
