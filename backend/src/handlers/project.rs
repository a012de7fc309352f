//! Project management HTTP handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::services::project::{CreateProjectInput, ProjectService, UpdateProjectInput};
use crate::AppState;

/// List all projects
pub async fn list_projects(State(state): State<AppState>) -> impl IntoResponse {
    let service = ProjectService::new(state.db.clone());

    match service.get_projects().await {
        Ok(projects) => {
            (StatusCode::OK, Json(serde_json::json!({ "projects": projects }))).into_response()
        }
        Err(e) => e.into_response(),
    }
}

/// Get a specific project with its derived evaluation figures
pub async fn get_project(
    State(state): State<AppState>,
    Path(project_id): Path<Uuid>,
) -> impl IntoResponse {
    let service = ProjectService::new(state.db.clone());

    match service.get_project(project_id).await {
        Ok(project) => (StatusCode::OK, Json(project)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Create a new project
pub async fn create_project(
    State(state): State<AppState>,
    Json(input): Json<CreateProjectInput>,
) -> impl IntoResponse {
    let service = ProjectService::new(state.db.clone());

    match service.create_project(input).await {
        Ok(project) => (StatusCode::CREATED, Json(project)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Update a project
pub async fn update_project(
    State(state): State<AppState>,
    Path(project_id): Path<Uuid>,
    Json(input): Json<UpdateProjectInput>,
) -> impl IntoResponse {
    let service = ProjectService::new(state.db.clone());

    match service.update_project(project_id, input).await {
        Ok(project) => (StatusCode::OK, Json(project)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Delete a project
pub async fn delete_project(
    State(state): State<AppState>,
    Path(project_id): Path<Uuid>,
) -> impl IntoResponse {
    let service = ProjectService::new(state.db.clone());

    match service.delete_project(project_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => e.into_response(),
    }
}

/// Get a project's current payout evaluation
pub async fn get_project_evaluation(
    State(state): State<AppState>,
    Path(project_id): Path<Uuid>,
) -> impl IntoResponse {
    let service = ProjectService::new(state.db.clone());

    match service.get_project(project_id).await {
        Ok(view) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "project_id": view.project.id,
                "payout_status": view.project.payout_status,
                "predicted_rainy_days": view.project.predicted_rainy_days,
                "actual_rainy_days": view.project.actual_rainy_days,
                "excess_days": view.excess_days,
                "days_remaining": view.days_remaining,
            })),
        )
            .into_response(),
        Err(e) => e.into_response(),
    }
}
