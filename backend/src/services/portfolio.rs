//! Portfolio statistics service

use chrono::Utc;
use sqlx::PgPool;

use crate::error::{AppError, AppResult};
use crate::services::project::ProjectService;
use shared::{aggregate, PortfolioSummary};

/// Portfolio service rolling project evaluations into company-level figures
#[derive(Clone)]
pub struct PortfolioService {
    db: PgPool,
}

impl PortfolioService {
    /// Create a new PortfolioService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Compute the portfolio summary across all projects.
    /// Recomputed on demand; an empty portfolio is a valid, all-zero answer.
    pub async fn get_summary(&self) -> AppResult<PortfolioSummary> {
        let projects = ProjectService::new(self.db.clone());
        let evaluations = projects.get_evaluations(Utc::now().date_naive()).await?;
        Ok(aggregate(&evaluations))
    }

    /// Export a per-project portfolio report as CSV
    pub async fn export_report_csv(&self) -> AppResult<String> {
        let projects = ProjectService::new(self.db.clone()).get_projects().await?;

        let mut writer = csv::Writer::from_writer(Vec::new());
        writer
            .write_record([
                "project_id",
                "name",
                "location",
                "payout_status",
                "predicted_rainy_days",
                "actual_rainy_days",
                "excess_days",
                "risk_level",
                "coverage_amount",
                "days_remaining",
            ])
            .map_err(|e| AppError::Internal(format!("CSV write failed: {}", e)))?;

        for view in projects {
            writer
                .write_record([
                    view.project.id.to_string(),
                    view.project.name.clone(),
                    view.project.location.clone(),
                    view.project.payout_status.to_string(),
                    view.project.predicted_rainy_days.to_string(),
                    view.project.actual_rainy_days.to_string(),
                    view.excess_days.to_string(),
                    view.project.risk_level.as_str().to_string(),
                    view.project.coverage_amount.to_string(),
                    view.days_remaining.to_string(),
                ])
                .map_err(|e| AppError::Internal(format!("CSV write failed: {}", e)))?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| AppError::Internal(format!("CSV write failed: {}", e)))?;
        String::from_utf8(bytes).map_err(|e| AppError::Internal(format!("CSV encoding: {}", e)))
    }
}
