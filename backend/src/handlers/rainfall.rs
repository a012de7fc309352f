//! Rainfall recording HTTP handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;

use crate::services::rainfall::{RainfallService, RecordReadingInput};
use crate::AppState;
use shared::DateRange;

#[derive(Debug, Deserialize)]
pub struct ReadingsQuery {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

fn rainfall_service(state: &AppState) -> RainfallService {
    RainfallService::new(state.db.clone(), state.config.policy.rainy_day_threshold_mm)
}

/// List rainfall readings for a project
pub async fn list_readings(
    State(state): State<AppState>,
    Path(project_id): Path<Uuid>,
    Query(query): Query<ReadingsQuery>,
) -> impl IntoResponse {
    let range = match (query.start, query.end) {
        (Some(start), Some(end)) => Some(DateRange { start, end }),
        _ => None,
    };

    match rainfall_service(&state).get_readings(project_id, range).await {
        Ok(readings) => {
            (StatusCode::OK, Json(serde_json::json!({ "readings": readings }))).into_response()
        }
        Err(e) => e.into_response(),
    }
}

/// Record a daily rainfall reading, refreshing the project's evaluation
pub async fn record_reading(
    State(state): State<AppState>,
    Path(project_id): Path<Uuid>,
    Json(input): Json<RecordReadingInput>,
) -> impl IntoResponse {
    match rainfall_service(&state).record_reading(project_id, input).await {
        Ok(outcome) => (StatusCode::CREATED, Json(outcome)).into_response(),
        Err(e) => e.into_response(),
    }
}
