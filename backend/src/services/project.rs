//! Project management service for insured construction sites

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use shared::{
    evaluate_payout, validate_coordinates, validate_coverage_amount, validate_coverage_window,
    validate_predicted_rainy_days, validate_project_name, GpsCoordinates, LastRainfall,
    PayoutStatus, Project, ProjectEvaluation, RiskLevel,
};

/// Project service for managing insured projects
#[derive(Clone)]
pub struct ProjectService {
    db: PgPool,
}

/// Project row as stored
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ProjectRecord {
    pub id: Uuid,
    pub name: String,
    pub location: String,
    pub latitude: Option<Decimal>,
    pub longitude: Option<Decimal>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub predicted_rainy_days: i32,
    pub actual_rainy_days: i32,
    pub risk_level: String,
    pub payout_status: String,
    pub coverage_amount: Decimal,
    pub last_rainfall_date: Option<NaiveDate>,
    pub last_rainfall_mm: Option<Decimal>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ProjectRecord {
    /// Convert the stored row into the domain model
    pub fn into_domain(self) -> AppResult<Project> {
        let risk_level = RiskLevel::from_str(&self.risk_level).map_err(AppError::Internal)?;
        let payout_status =
            PayoutStatus::from_str(&self.payout_status).map_err(AppError::Internal)?;

        let coordinates = match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => Some(GpsCoordinates::new(lat, lon)),
            _ => None,
        };

        let last_rainfall = match (self.last_rainfall_date, self.last_rainfall_mm) {
            (Some(date), Some(amount_mm)) => Some(LastRainfall { date, amount_mm }),
            _ => None,
        };

        Ok(Project {
            id: self.id,
            name: self.name,
            location: self.location,
            coordinates,
            start_date: self.start_date,
            end_date: self.end_date,
            predicted_rainy_days: self.predicted_rainy_days,
            actual_rainy_days: self.actual_rainy_days,
            risk_level,
            payout_status,
            coverage_amount: self.coverage_amount,
            last_rainfall,
        })
    }
}

/// Input for creating a project
#[derive(Debug, Deserialize)]
pub struct CreateProjectInput {
    pub name: String,
    pub location: String,
    pub latitude: Option<Decimal>,
    pub longitude: Option<Decimal>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub predicted_rainy_days: i32,
    pub risk_level: RiskLevel,
    pub coverage_amount: Decimal,
}

/// Input for updating a project
#[derive(Debug, Deserialize)]
pub struct UpdateProjectInput {
    pub name: Option<String>,
    pub location: Option<String>,
    pub latitude: Option<Decimal>,
    pub longitude: Option<Decimal>,
    pub risk_level: Option<RiskLevel>,
}

/// Project with derived evaluation figures, the shape project cards render
#[derive(Debug, Serialize)]
pub struct ProjectView {
    #[serde(flatten)]
    pub project: Project,
    pub days_remaining: i64,
    pub excess_days: i32,
    pub is_payout_triggered: bool,
}

impl ProjectService {
    /// Create a new ProjectService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Get all projects
    pub async fn get_projects(&self) -> AppResult<Vec<ProjectView>> {
        let records = sqlx::query_as::<_, ProjectRecord>(
            r#"
            SELECT id, name, location, latitude, longitude, start_date, end_date,
                   predicted_rainy_days, actual_rainy_days, risk_level, payout_status,
                   coverage_amount, last_rainfall_date, last_rainfall_mm,
                   created_at, updated_at
            FROM projects
            ORDER BY name ASC
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        let today = Utc::now().date_naive();
        records
            .into_iter()
            .map(|r| Self::build_view(r, today))
            .collect()
    }

    /// Get a project by ID
    pub async fn get_project(&self, project_id: Uuid) -> AppResult<ProjectView> {
        let record = self.fetch_record(project_id).await?;
        Self::build_view(record, Utc::now().date_naive())
    }

    /// Create a new project with a pending payout status
    pub async fn create_project(&self, input: CreateProjectInput) -> AppResult<ProjectView> {
        validate_project_name(&input.name)
            .map_err(|e| AppError::InvalidInput(e.to_string()))?;
        validate_coverage_window(input.start_date, input.end_date)
            .map_err(|e| AppError::InvalidInput(e.to_string()))?;
        validate_predicted_rainy_days(input.predicted_rainy_days, input.start_date, input.end_date)
            .map_err(|e| AppError::InvalidInput(e.to_string()))?;
        validate_coverage_amount(input.coverage_amount)
            .map_err(|e| AppError::InvalidInput(e.to_string()))?;
        if let (Some(lat), Some(lon)) = (input.latitude, input.longitude) {
            validate_coordinates(&GpsCoordinates::new(lat, lon))
                .map_err(|e| AppError::InvalidInput(e.to_string()))?;
        }

        let record = sqlx::query_as::<_, ProjectRecord>(
            r#"
            INSERT INTO projects (id, name, location, latitude, longitude, start_date,
                                  end_date, predicted_rainy_days, actual_rainy_days,
                                  risk_level, payout_status, coverage_amount,
                                  created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, 0, $9, 'pending', $10, NOW(), NOW())
            RETURNING id, name, location, latitude, longitude, start_date, end_date,
                      predicted_rainy_days, actual_rainy_days, risk_level, payout_status,
                      coverage_amount, last_rainfall_date, last_rainfall_mm,
                      created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(input.name.trim())
        .bind(&input.location)
        .bind(input.latitude)
        .bind(input.longitude)
        .bind(input.start_date)
        .bind(input.end_date)
        .bind(input.predicted_rainy_days)
        .bind(input.risk_level.as_str())
        .bind(input.coverage_amount)
        .fetch_one(&self.db)
        .await?;

        Self::build_view(record, Utc::now().date_naive())
    }

    /// Update a project's descriptive fields
    pub async fn update_project(
        &self,
        project_id: Uuid,
        input: UpdateProjectInput,
    ) -> AppResult<ProjectView> {
        if let Some(name) = &input.name {
            validate_project_name(name).map_err(|e| AppError::InvalidInput(e.to_string()))?;
        }
        if let (Some(lat), Some(lon)) = (input.latitude, input.longitude) {
            validate_coordinates(&GpsCoordinates::new(lat, lon))
                .map_err(|e| AppError::InvalidInput(e.to_string()))?;
        }

        let record = sqlx::query_as::<_, ProjectRecord>(
            r#"
            UPDATE projects
            SET name = COALESCE($2, name),
                location = COALESCE($3, location),
                latitude = COALESCE($4, latitude),
                longitude = COALESCE($5, longitude),
                risk_level = COALESCE($6, risk_level),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, name, location, latitude, longitude, start_date, end_date,
                      predicted_rainy_days, actual_rainy_days, risk_level, payout_status,
                      coverage_amount, last_rainfall_date, last_rainfall_mm,
                      created_at, updated_at
            "#,
        )
        .bind(project_id)
        .bind(input.name.as_deref().map(str::trim))
        .bind(&input.location)
        .bind(input.latitude)
        .bind(input.longitude)
        .bind(input.risk_level.map(|r| r.as_str()))
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Project".to_string()))?;

        Self::build_view(record, Utc::now().date_naive())
    }

    /// Delete a project and its readings
    pub async fn delete_project(&self, project_id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(project_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Project".to_string()));
        }
        Ok(())
    }

    /// Evaluation snapshots for every project, the aggregator's input
    pub async fn get_evaluations(&self, as_of: NaiveDate) -> AppResult<Vec<ProjectEvaluation>> {
        let records = sqlx::query_as::<_, ProjectRecord>(
            r#"
            SELECT id, name, location, latitude, longitude, start_date, end_date,
                   predicted_rainy_days, actual_rainy_days, risk_level, payout_status,
                   coverage_amount, last_rainfall_date, last_rainfall_mm,
                   created_at, updated_at
            FROM projects
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        records
            .into_iter()
            .map(|r| {
                let project = r.into_domain()?;
                Ok(ProjectEvaluation {
                    project_id: project.id,
                    payout_status: project.payout_status,
                    risk_level: project.risk_level,
                    actual_rainy_days: project.actual_rainy_days,
                    coverage_amount: project.coverage_amount,
                    coverage_active: project.is_active(as_of),
                })
            })
            .collect()
    }

    pub(crate) async fn fetch_record(&self, project_id: Uuid) -> AppResult<ProjectRecord> {
        sqlx::query_as::<_, ProjectRecord>(
            r#"
            SELECT id, name, location, latitude, longitude, start_date, end_date,
                   predicted_rainy_days, actual_rainy_days, risk_level, payout_status,
                   coverage_amount, last_rainfall_date, last_rainfall_mm,
                   created_at, updated_at
            FROM projects
            WHERE id = $1
            "#,
        )
        .bind(project_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Project".to_string()))
    }

    fn build_view(record: ProjectRecord, today: NaiveDate) -> AppResult<ProjectView> {
        let project = record.into_domain()?;
        let evaluation = evaluate_payout(
            project.predicted_rainy_days,
            project.actual_rainy_days,
            project.payout_status,
        )?;

        Ok(ProjectView {
            days_remaining: project.days_remaining(today),
            excess_days: evaluation.excess_days,
            is_payout_triggered: evaluation.status != PayoutStatus::Pending,
            project,
        })
    }
}
