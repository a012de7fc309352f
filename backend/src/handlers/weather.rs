//! Weather forecast HTTP handlers

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::external::weather::WeatherClient;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ForecastQuery {
    pub lat: Decimal,
    pub lon: Decimal,
}

/// Precipitation forecast for a location via the external provider
pub async fn get_forecast(
    State(state): State<AppState>,
    Query(query): Query<ForecastQuery>,
) -> impl IntoResponse {
    let client = WeatherClient::new(
        state.config.weather.api_key.clone(),
        state.config.weather.api_endpoint.clone(),
    );

    match client.get_forecast(query.lat, query.lon).await {
        Ok(forecast) => (StatusCode::OK, Json(forecast)).into_response(),
        Err(e) => e.into_response(),
    }
}
