//! Insured construction project models

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::GpsCoordinates;

/// An insured construction site with a rainy-day parametric policy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: Uuid,
    pub name: String,
    pub location: String,
    pub coordinates: Option<GpsCoordinates>,
    /// Coverage window
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Contractually expected rainy-day count over the coverage period
    pub predicted_rainy_days: i32,
    /// Running count of days classified rainy so far
    pub actual_rainy_days: i32,
    pub risk_level: RiskLevel,
    pub payout_status: PayoutStatus,
    /// Insured amount paid out in full when the policy triggers
    pub coverage_amount: Decimal,
    pub last_rainfall: Option<LastRainfall>,
}

/// Most recent observation recorded for a project, shown on project cards
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LastRainfall {
    pub date: NaiveDate,
    pub amount_mm: Decimal,
}

impl Project {
    /// Days of coverage remaining as of the given date, never negative
    pub fn days_remaining(&self, as_of: NaiveDate) -> i64 {
        (self.end_date - as_of).num_days().max(0)
    }

    /// Whether the coverage window has not yet ended.
    /// Independent of payout status: a triggered or paid project is still
    /// active while its window is open.
    pub fn is_active(&self, as_of: NaiveDate) -> bool {
        as_of <= self.end_date
    }
}

/// Payout lifecycle for one coverage period
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PayoutStatus {
    /// Rainy days have not exceeded the prediction
    Pending,
    /// Rainy days exceeded the prediction; claim may be filed
    Triggered,
    /// Claim settled. Terminal for the coverage period.
    Paid,
}

impl PayoutStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PayoutStatus::Pending => "pending",
            PayoutStatus::Triggered => "triggered",
            PayoutStatus::Paid => "paid",
        }
    }
}

impl std::str::FromStr for PayoutStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(PayoutStatus::Pending),
            "triggered" => Ok(PayoutStatus::Triggered),
            "paid" => Ok(PayoutStatus::Paid),
            other => Err(format!("unknown payout status: {}", other)),
        }
    }
}

impl std::fmt::Display for PayoutStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Risk category assigned by the external risk model
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        }
    }
}

impl std::str::FromStr for RiskLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(RiskLevel::Low),
            "medium" => Ok(RiskLevel::Medium),
            "high" => Ok(RiskLevel::High),
            other => Err(format!("unknown risk level: {}", other)),
        }
    }
}
