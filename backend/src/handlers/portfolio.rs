//! Portfolio statistics HTTP handlers

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};

use crate::services::portfolio::PortfolioService;
use crate::AppState;

/// Company-level portfolio summary
pub async fn get_summary(State(state): State<AppState>) -> impl IntoResponse {
    let service = PortfolioService::new(state.db.clone());

    match service.get_summary().await {
        Ok(summary) => (StatusCode::OK, Json(summary)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Per-project portfolio report as CSV
pub async fn export_report(State(state): State<AppState>) -> impl IntoResponse {
    let service = PortfolioService::new(state.db.clone());

    match service.export_report_csv().await {
        Ok(csv) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, "text/csv"),
                (
                    header::CONTENT_DISPOSITION,
                    "attachment; filename=\"portfolio_report.csv\"",
                ),
            ],
            csv,
        )
            .into_response(),
        Err(e) => e.into_response(),
    }
}
