//! Portfolio-level aggregate models

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::project::{PayoutStatus, RiskLevel};

/// Snapshot of one project's evaluation, the unit the portfolio
/// aggregator consumes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectEvaluation {
    pub project_id: Uuid,
    pub payout_status: PayoutStatus,
    pub risk_level: RiskLevel,
    pub actual_rainy_days: i32,
    pub coverage_amount: Decimal,
    /// Coverage window not yet ended as of the evaluation date
    pub coverage_active: bool,
}

/// Read-only aggregate over a set of projects at a point in time.
/// Recomputed on demand, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioSummary {
    pub total_projects: u64,
    pub active_projects: u64,
    /// Projects whose payout condition has been met (triggered or paid)
    pub total_payouts_triggered: u64,
    /// Sum of coverage amounts over triggered and paid projects
    pub total_payout_amount: Decimal,
    /// Mean actual rainy days across all projects; `None` for an empty
    /// portfolio, serialized as null rather than NaN
    pub average_rainy_days: Option<Decimal>,
    pub high_risk_projects: u64,
}

impl PortfolioSummary {
    /// The all-zero summary reported for an empty portfolio
    pub fn empty() -> Self {
        Self {
            total_projects: 0,
            active_projects: 0,
            total_payouts_triggered: 0,
            total_payout_amount: Decimal::ZERO,
            average_rainy_days: None,
            high_risk_projects: 0,
        }
    }
}
