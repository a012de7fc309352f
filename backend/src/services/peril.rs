//! Peril overview service
//!
//! Rainfall figures are computed live from the project portfolio. The
//! remaining perils are catalog placeholders until their products launch,
//! carrying static figures and a purchased flag from configuration.

use chrono::Utc;
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::PgPool;

use crate::error::AppResult;
use crate::services::project::ProjectService;
use shared::{Peril, PerilKind, PerilView};

/// Peril service for the per-peril dashboard figures
#[derive(Clone)]
pub struct PerilService {
    db: PgPool,
    purchased: Vec<PerilKind>,
}

/// Peril figures plus how the dashboard should render them
#[derive(Debug, Serialize)]
pub struct PerilOverview {
    #[serde(flatten)]
    pub peril: Peril,
    pub view: PerilView,
}

impl PerilService {
    /// Create a new PerilService instance
    pub fn new(db: PgPool, purchased: Vec<PerilKind>) -> Self {
        Self { db, purchased }
    }

    /// Figures for every peril, live for rainfall and static otherwise
    pub async fn get_overview(&self) -> AppResult<Vec<PerilOverview>> {
        let evaluations = ProjectService::new(self.db.clone())
            .get_evaluations(Utc::now().date_naive())
            .await?;

        let mut perils = Vec::with_capacity(PerilKind::ALL.len());
        for kind in PerilKind::ALL {
            let purchased = self.purchased.contains(&kind);
            let peril = match kind {
                PerilKind::Rainfall => {
                    let active = evaluations.iter().filter(|e| e.coverage_active).count();
                    let triggered = evaluations
                        .iter()
                        .filter(|e| e.payout_status != shared::PayoutStatus::Pending)
                        .count();
                    let coverage: Decimal =
                        evaluations.iter().map(|e| e.coverage_amount).sum();
                    Peril {
                        kind,
                        active_projects: active as u32,
                        triggered_count: triggered as u32,
                        coverage_amount: coverage,
                        purchased,
                    }
                }
                other => static_figures(other, purchased),
            };
            perils.push(PerilOverview {
                view: peril.view(),
                peril,
            });
        }

        Ok(perils)
    }
}

/// Placeholder figures for perils without live evaluation yet
fn static_figures(kind: PerilKind, purchased: bool) -> Peril {
    let (active, triggered, coverage) = match kind {
        PerilKind::Temperature => (12, 2, 1_800_000),
        PerilKind::Snowfall => (4, 0, 650_000),
        PerilKind::Wind => (9, 1, 1_200_000),
        PerilKind::FireRisk => (6, 0, 2_400_000),
        PerilKind::Rainfall => unreachable!("rainfall figures are computed live"),
    };

    Peril {
        kind,
        active_projects: active,
        triggered_count: triggered,
        coverage_amount: Decimal::from(coverage),
        purchased,
    }
}
