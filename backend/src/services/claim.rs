//! Warranty claim service
//!
//! Claim intake and settlement. Settlement is the only path that moves a
//! project from `triggered` to `paid`; the evaluation core never does.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use std::str::FromStr;
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, AppResult};
use shared::{evaluate_payout, Claim, ClaimStatus, ClaimSubmission, PayoutStatus};

/// Claim service for intake and settlement
#[derive(Clone)]
pub struct ClaimService {
    db: PgPool,
}

/// Claim row as stored
#[derive(Debug, Clone, sqlx::FromRow)]
struct ClaimRecord {
    id: Uuid,
    project_id: Uuid,
    claimant_name: String,
    claimant_email: String,
    claim_amount: Decimal,
    description: String,
    excess_days: i32,
    status: String,
    submitted_at: DateTime<Utc>,
}

impl ClaimRecord {
    fn into_domain(self) -> AppResult<Claim> {
        let status = ClaimStatus::from_str(&self.status).map_err(AppError::Internal)?;
        Ok(Claim {
            id: self.id,
            project_id: self.project_id,
            claimant_name: self.claimant_name,
            claimant_email: self.claimant_email,
            claim_amount: self.claim_amount,
            description: self.description,
            excess_days: self.excess_days,
            status,
            submitted_at: self.submitted_at,
        })
    }
}

impl ClaimService {
    /// Create a new ClaimService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Submit a warranty claim for a triggered project.
    ///
    /// Eligibility is the payout condition itself: the project's rainy days
    /// must have exceeded its prediction. The excess-days figure is captured
    /// on the claim at filing time to justify it.
    pub async fn submit_claim(&self, input: ClaimSubmission) -> AppResult<Claim> {
        input.validate()?;

        let project: ProjectClaimRow = sqlx::query_as(
            r#"
            SELECT id, predicted_rainy_days, actual_rainy_days, payout_status
            FROM projects
            WHERE id = $1
            "#,
        )
        .bind(input.project_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Project".to_string()))?;

        let prior = PayoutStatus::from_str(&project.payout_status).map_err(AppError::Internal)?;
        match prior {
            PayoutStatus::Pending => {
                return Err(AppError::InvalidStateTransition(
                    "Payout has not been triggered for this project".to_string(),
                ));
            }
            PayoutStatus::Paid => {
                return Err(AppError::InvalidStateTransition(
                    "This coverage period has already been settled".to_string(),
                ));
            }
            PayoutStatus::Triggered => {}
        }

        let evaluation = evaluate_payout(
            project.predicted_rainy_days,
            project.actual_rainy_days,
            prior,
        )?;

        let record: ClaimRecord = sqlx::query_as(
            r#"
            INSERT INTO claims (id, project_id, claimant_name, claimant_email,
                                claim_amount, description, excess_days, status,
                                submitted_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, 'submitted', NOW())
            RETURNING id, project_id, claimant_name, claimant_email, claim_amount,
                      description, excess_days, status, submitted_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(input.project_id)
        .bind(&input.claimant_name)
        .bind(&input.claimant_email)
        .bind(input.claim_amount)
        .bind(&input.description)
        .bind(evaluation.excess_days)
        .fetch_one(&self.db)
        .await?;

        record.into_domain()
    }

    /// List all claims, newest first
    pub async fn get_claims(&self) -> AppResult<Vec<Claim>> {
        let records = sqlx::query_as::<_, ClaimRecord>(
            r#"
            SELECT id, project_id, claimant_name, claimant_email, claim_amount,
                   description, excess_days, status, submitted_at
            FROM claims
            ORDER BY submitted_at DESC
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        records.into_iter().map(ClaimRecord::into_domain).collect()
    }

    /// Get a claim by ID
    pub async fn get_claim(&self, claim_id: Uuid) -> AppResult<Claim> {
        let record = sqlx::query_as::<_, ClaimRecord>(
            r#"
            SELECT id, project_id, claimant_name, claimant_email, claim_amount,
                   description, excess_days, status, submitted_at
            FROM claims
            WHERE id = $1
            "#,
        )
        .bind(claim_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Claim".to_string()))?;

        record.into_domain()
    }

    /// Approve a submitted claim, settling the project: triggered -> paid.
    /// Paid is terminal for the coverage period.
    pub async fn approve_claim(&self, claim_id: Uuid) -> AppResult<Claim> {
        let mut tx = self.db.begin().await?;

        let record: ClaimRecord = sqlx::query_as(
            r#"
            SELECT id, project_id, claimant_name, claimant_email, claim_amount,
                   description, excess_days, status, submitted_at
            FROM claims
            WHERE id = $1
            FOR UPDATE
            "#,
        )
        .bind(claim_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound("Claim".to_string()))?;

        let status = ClaimStatus::from_str(&record.status).map_err(AppError::Internal)?;
        if status != ClaimStatus::Submitted {
            return Err(AppError::InvalidStateTransition(format!(
                "Cannot approve a claim in status '{}'",
                record.status
            )));
        }

        let project_status: Option<String> =
            sqlx::query_scalar("SELECT payout_status FROM projects WHERE id = $1 FOR UPDATE")
                .bind(record.project_id)
                .fetch_optional(&mut *tx)
                .await?;
        let project_status =
            project_status.ok_or_else(|| AppError::NotFound("Project".to_string()))?;

        if PayoutStatus::from_str(&project_status).map_err(AppError::Internal)?
            != PayoutStatus::Triggered
        {
            return Err(AppError::InvalidStateTransition(
                "Project payout is not in a triggered state".to_string(),
            ));
        }

        let updated: ClaimRecord = sqlx::query_as(
            r#"
            UPDATE claims
            SET status = 'approved'
            WHERE id = $1
            RETURNING id, project_id, claimant_name, claimant_email, claim_amount,
                      description, excess_days, status, submitted_at
            "#,
        )
        .bind(claim_id)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            "UPDATE projects SET payout_status = 'paid', updated_at = NOW() WHERE id = $1",
        )
        .bind(record.project_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::info!(claim_id = %claim_id, project_id = %record.project_id, "claim approved, project settled");

        updated.into_domain()
    }

    /// Reject a submitted claim; the project stays triggered and a new
    /// claim may be filed
    pub async fn reject_claim(&self, claim_id: Uuid) -> AppResult<Claim> {
        let record = sqlx::query_as::<_, ClaimRecord>(
            r#"
            UPDATE claims
            SET status = 'rejected'
            WHERE id = $1 AND status = 'submitted'
            RETURNING id, project_id, claimant_name, claimant_email, claim_amount,
                      description, excess_days, status, submitted_at
            "#,
        )
        .bind(claim_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| {
            AppError::InvalidStateTransition(
                "Claim not found or not in a submitted state".to_string(),
            )
        })?;

        record.into_domain()
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ProjectClaimRow {
    #[allow(dead_code)]
    id: Uuid,
    predicted_rainy_days: i32,
    actual_rainy_days: i32,
    payout_status: String,
}
