//! Rainfall recording service
//!
//! Stores daily precipitation readings and keeps each project's rainy-day
//! count and payout status in step with them.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use shared::{
    classify_rainfall, count_rainy_days, evaluate_payout, DateRange, PayoutStatus,
    RainfallReading,
};

/// Rainfall service for managing precipitation data
#[derive(Clone)]
pub struct RainfallService {
    db: PgPool,
    threshold_mm: Decimal,
}

/// Stored rainfall reading
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct ReadingRecord {
    pub id: Uuid,
    pub project_id: Uuid,
    pub date: NaiveDate,
    pub amount_mm: Decimal,
    pub created_at: DateTime<Utc>,
}

/// A reading with its classification against the configured threshold.
/// The flag is derived on the way out, never stored.
#[derive(Debug, Clone, Serialize)]
pub struct ReadingView {
    #[serde(flatten)]
    pub reading: ReadingRecord,
    pub is_rainy_day: bool,
}

/// Input for recording a reading
#[derive(Debug, Deserialize)]
pub struct RecordReadingInput {
    pub date: NaiveDate,
    pub amount_mm: Decimal,
}

/// Result of recording a reading: the project's refreshed evaluation
#[derive(Debug, Serialize)]
pub struct ReadingOutcome {
    pub reading: ReadingView,
    pub actual_rainy_days: i32,
    pub payout_status: PayoutStatus,
    pub excess_days: i32,
}

impl RainfallService {
    /// Create a new RainfallService instance
    pub fn new(db: PgPool, threshold_mm: Decimal) -> Self {
        Self { db, threshold_mm }
    }

    /// Record a daily reading and recompute the project's payout status.
    ///
    /// The project row is locked for the duration so concurrent readings
    /// for the same project serialize; the persisted status is the prior
    /// state fed to the evaluator, which is what makes `triggered`
    /// monotonic across recomputations. One reading per project per day;
    /// a corrected figure for the same day replaces the earlier one.
    pub async fn record_reading(
        &self,
        project_id: Uuid,
        input: RecordReadingInput,
    ) -> AppResult<ReadingOutcome> {
        let reading = RainfallReading::new(input.date, input.amount_mm)?;
        let is_rainy = classify_rainfall(reading.amount_mm, self.threshold_mm)?;

        let mut tx = self.db.begin().await?;

        let project: ProjectEvalRow = sqlx::query_as(
            r#"
            SELECT id, start_date, end_date, predicted_rainy_days, payout_status
            FROM projects
            WHERE id = $1
            FOR UPDATE
            "#,
        )
        .bind(project_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound("Project".to_string()))?;

        if reading.date < project.start_date || reading.date > project.end_date {
            return Err(AppError::InvalidInput(
                "reading date falls outside the coverage window".to_string(),
            ));
        }

        let stored: ReadingRecord = sqlx::query_as(
            r#"
            INSERT INTO rainfall_readings (id, project_id, date, amount_mm, created_at)
            VALUES ($1, $2, $3, $4, NOW())
            ON CONFLICT (project_id, date)
            DO UPDATE SET amount_mm = EXCLUDED.amount_mm
            RETURNING id, project_id, date, amount_mm, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(project_id)
        .bind(reading.date)
        .bind(reading.amount_mm)
        .fetch_one(&mut *tx)
        .await?;

        // Recount from the readings themselves rather than incrementing,
        // so corrections and replays converge on the same count
        let readings: Vec<(NaiveDate, Decimal)> = sqlx::query_as(
            r#"
            SELECT date, amount_mm
            FROM rainfall_readings
            WHERE project_id = $1
            "#,
        )
        .bind(project_id)
        .fetch_all(&mut *tx)
        .await?;

        let readings: Vec<RainfallReading> = readings
            .into_iter()
            .map(|(date, amount_mm)| RainfallReading { date, amount_mm })
            .collect();
        let actual = count_rainy_days(&readings, self.threshold_mm)?;

        let prior = PayoutStatus::from_str(&project.payout_status).map_err(AppError::Internal)?;
        let evaluation = evaluate_payout(project.predicted_rainy_days, actual, prior)?;

        sqlx::query(
            r#"
            UPDATE projects
            SET actual_rainy_days = $2,
                payout_status = $3,
                last_rainfall_date = $4,
                last_rainfall_mm = $5,
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(project_id)
        .bind(actual)
        .bind(evaluation.status.as_str())
        .bind(reading.date)
        .bind(reading.amount_mm)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        if evaluation.status == PayoutStatus::Triggered && prior == PayoutStatus::Pending {
            tracing::info!(
                project_id = %project_id,
                actual_rainy_days = actual,
                predicted_rainy_days = project.predicted_rainy_days,
                "payout triggered"
            );
        }

        Ok(ReadingOutcome {
            reading: ReadingView {
                reading: stored,
                is_rainy_day: is_rainy,
            },
            actual_rainy_days: actual,
            payout_status: evaluation.status,
            excess_days: evaluation.excess_days,
        })
    }

    /// List readings for a project, optionally restricted to a date range.
    /// Each reading is classified against the current threshold on the way
    /// out.
    pub async fn get_readings(
        &self,
        project_id: Uuid,
        range: Option<DateRange>,
    ) -> AppResult<Vec<ReadingView>> {
        let records = match range {
            Some(range) => {
                sqlx::query_as::<_, ReadingRecord>(
                    r#"
                    SELECT id, project_id, date, amount_mm, created_at
                    FROM rainfall_readings
                    WHERE project_id = $1 AND date BETWEEN $2 AND $3
                    ORDER BY date ASC
                    "#,
                )
                .bind(project_id)
                .bind(range.start)
                .bind(range.end)
                .fetch_all(&self.db)
                .await?
            }
            None => {
                sqlx::query_as::<_, ReadingRecord>(
                    r#"
                    SELECT id, project_id, date, amount_mm, created_at
                    FROM rainfall_readings
                    WHERE project_id = $1
                    ORDER BY date ASC
                    "#,
                )
                .bind(project_id)
                .fetch_all(&self.db)
                .await?
            }
        };

        records
            .into_iter()
            .map(|reading| {
                let is_rainy_day = classify_rainfall(reading.amount_mm, self.threshold_mm)?;
                Ok(ReadingView {
                    reading,
                    is_rainy_day,
                })
            })
            .collect()
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ProjectEvalRow {
    #[allow(dead_code)]
    id: Uuid,
    start_date: NaiveDate,
    end_date: NaiveDate,
    predicted_rainy_days: i32,
    payout_status: String,
}
