//! Warranty claim HTTP handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::services::claim::ClaimService;
use crate::AppState;
use shared::ClaimSubmission;

/// List all claims
pub async fn list_claims(State(state): State<AppState>) -> impl IntoResponse {
    let service = ClaimService::new(state.db.clone());

    match service.get_claims().await {
        Ok(claims) => {
            (StatusCode::OK, Json(serde_json::json!({ "claims": claims }))).into_response()
        }
        Err(e) => e.into_response(),
    }
}

/// Get a specific claim
pub async fn get_claim(
    State(state): State<AppState>,
    Path(claim_id): Path<Uuid>,
) -> impl IntoResponse {
    let service = ClaimService::new(state.db.clone());

    match service.get_claim(claim_id).await {
        Ok(claim) => (StatusCode::OK, Json(claim)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Submit a warranty claim for a triggered project
pub async fn submit_claim(
    State(state): State<AppState>,
    Json(input): Json<ClaimSubmission>,
) -> impl IntoResponse {
    let service = ClaimService::new(state.db.clone());

    match service.submit_claim(input).await {
        Ok(claim) => (StatusCode::CREATED, Json(claim)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Approve a claim, settling the project
pub async fn approve_claim(
    State(state): State<AppState>,
    Path(claim_id): Path<Uuid>,
) -> impl IntoResponse {
    let service = ClaimService::new(state.db.clone());

    match service.approve_claim(claim_id).await {
        Ok(claim) => (StatusCode::OK, Json(claim)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Reject a claim
pub async fn reject_claim(
    State(state): State<AppState>,
    Path(claim_id): Path<Uuid>,
) -> impl IntoResponse {
    let service = ClaimService::new(state.db.clone());

    match service.reject_claim(claim_id).await {
        Ok(claim) => (StatusCode::OK, Json(claim)).into_response(),
        Err(e) => e.into_response(),
    }
}
