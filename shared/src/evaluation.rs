//! Payout evaluation core
//!
//! Pure rules behind the parametric rainy-day product: classify a day's
//! rainfall, evaluate a project's payout status against its prediction, and
//! roll per-project evaluations into portfolio statistics. Everything here
//! is synchronous, side-effect free, and safe to call from any context.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::{PayoutStatus, PortfolioSummary, ProjectEvaluation, RainfallReading};

/// Errors produced by the evaluation core
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EvaluationError {
    /// Negative rainfall, threshold, or day counts. Rejected outright,
    /// never clamped.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Decide whether a day's measured rainfall counts as a rainy day.
///
/// The boundary is inclusive: rainfall exactly at the threshold is rainy,
/// the reading most favorable to the insured.
pub fn classify_rainfall(
    amount_mm: Decimal,
    threshold_mm: Decimal,
) -> Result<bool, EvaluationError> {
    if amount_mm < Decimal::ZERO {
        return Err(EvaluationError::InvalidInput(
            "rainfall amount cannot be negative".to_string(),
        ));
    }
    if threshold_mm < Decimal::ZERO {
        return Err(EvaluationError::InvalidInput(
            "rainy-day threshold cannot be negative".to_string(),
        ));
    }
    Ok(amount_mm >= threshold_mm)
}

/// Count the rainy days in a sequence of readings.
///
/// Order of readings does not matter; each day is classified independently.
pub fn count_rainy_days(
    readings: &[RainfallReading],
    threshold_mm: Decimal,
) -> Result<i32, EvaluationError> {
    let mut count = 0;
    for reading in readings {
        if classify_rainfall(reading.amount_mm, threshold_mm)? {
            count += 1;
        }
    }
    Ok(count)
}

/// Result of evaluating one project's payout condition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PayoutEvaluation {
    pub status: PayoutStatus,
    /// Rainy days over the prediction, floored at zero. The natural basis
    /// for a claim amount, though claim intake does not pre-fill from it.
    pub excess_days: i32,
}

/// Evaluate a project's payout status from its predicted and actual
/// rainy-day counts.
///
/// The condition is strict: the prediction must be exceeded, not merely
/// met. Transitions are one-way; a project already `Triggered` or `Paid`
/// never reverts to `Pending` on recomputation, and `Paid` is assigned only
/// by the claims settlement path, never here.
pub fn evaluate_payout(
    predicted: i32,
    actual: i32,
    prior: PayoutStatus,
) -> Result<PayoutEvaluation, EvaluationError> {
    if predicted < 0 {
        return Err(EvaluationError::InvalidInput(
            "predicted rainy days cannot be negative".to_string(),
        ));
    }
    if actual < 0 {
        return Err(EvaluationError::InvalidInput(
            "actual rainy days cannot be negative".to_string(),
        ));
    }

    let status = match prior {
        PayoutStatus::Paid => PayoutStatus::Paid,
        PayoutStatus::Triggered => PayoutStatus::Triggered,
        PayoutStatus::Pending => {
            if actual > predicted {
                PayoutStatus::Triggered
            } else {
                PayoutStatus::Pending
            }
        }
    };

    Ok(PayoutEvaluation {
        status,
        excess_days: (actual - predicted).max(0),
    })
}

/// Roll a collection of project evaluations into portfolio statistics.
///
/// Pure and order-independent; only commutative counts, sums, and a mean.
/// An empty portfolio yields the all-zero summary with the average reported
/// as `None` rather than a division by zero.
pub fn aggregate(evaluations: &[ProjectEvaluation]) -> PortfolioSummary {
    if evaluations.is_empty() {
        return PortfolioSummary::empty();
    }

    let mut active = 0u64;
    let mut triggered = 0u64;
    let mut payout_amount = Decimal::ZERO;
    let mut high_risk = 0u64;
    let mut rainy_day_sum = 0i64;

    for eval in evaluations {
        if eval.coverage_active {
            active += 1;
        }
        if matches!(
            eval.payout_status,
            PayoutStatus::Triggered | PayoutStatus::Paid
        ) {
            triggered += 1;
            payout_amount += eval.coverage_amount;
        }
        if eval.risk_level == crate::models::RiskLevel::High {
            high_risk += 1;
        }
        rainy_day_sum += i64::from(eval.actual_rainy_days);
    }

    let total = evaluations.len() as u64;
    let average = Decimal::from(rainy_day_sum) / Decimal::from(total);

    PortfolioSummary {
        total_projects: total,
        active_projects: active,
        total_payouts_triggered: triggered,
        total_payout_amount: payout_amount,
        average_rainy_days: Some(average),
        high_risk_projects: high_risk,
    }
}
