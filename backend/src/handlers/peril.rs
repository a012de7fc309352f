//! Peril overview HTTP handlers

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use std::str::FromStr;

use crate::services::peril::PerilService;
use crate::AppState;
use shared::PerilKind;

/// Per-peril dashboard figures
pub async fn get_perils(State(state): State<AppState>) -> impl IntoResponse {
    let purchased: Vec<PerilKind> = state
        .config
        .policy
        .purchased_perils
        .iter()
        .filter_map(|name| PerilKind::from_str(name).ok())
        .collect();

    let service = PerilService::new(state.db.clone(), purchased);

    match service.get_overview().await {
        Ok(perils) => {
            (StatusCode::OK, Json(serde_json::json!({ "perils": perils }))).into_response()
        }
        Err(e) => e.into_response(),
    }
}
