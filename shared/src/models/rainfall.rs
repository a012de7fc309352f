//! Rainfall observation models

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::evaluation::EvaluationError;

/// Default rainy-day threshold in millimeters.
///
/// A day counts as rainy when measured precipitation meets or exceeds this
/// cutoff. Deployments may override it via configuration; product rules have
/// not yet confirmed the boundary, so the inclusive reading is used as the
/// customer-favorable default.
pub const DEFAULT_RAINY_DAY_THRESHOLD_MM: Decimal = Decimal::from_parts(5, 0, 0, false, 0);

/// One precipitation observation for one calendar day at one location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RainfallReading {
    pub date: NaiveDate,
    pub amount_mm: Decimal,
}

impl RainfallReading {
    /// Create a reading, rejecting negative precipitation amounts
    pub fn new(date: NaiveDate, amount_mm: Decimal) -> Result<Self, EvaluationError> {
        if amount_mm < Decimal::ZERO {
            return Err(EvaluationError::InvalidInput(
                "rainfall amount cannot be negative".to_string(),
            ));
        }
        Ok(Self { date, amount_mm })
    }
}
