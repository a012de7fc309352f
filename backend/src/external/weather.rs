//! Weather provider client for fetching precipitation data
//!
//! Integrates with OpenWeatherMap for forecasts and recent rainfall.
//! Provider failures are surfaced as retryable errors; the evaluation core
//! never depends on this client being available.

use chrono::{DateTime, NaiveDate, Utc};
use reqwest::Client;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{AppError, AppResult};
use shared::RainfallReading;

/// Weather API client
#[derive(Clone)]
pub struct WeatherClient {
    client: Client,
    api_key: String,
    base_url: String,
}

/// Precipitation forecast for a single interval
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastItem {
    pub timestamp: DateTime<Utc>,
    /// Probability of precipitation, 0-1
    pub pop: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rain_3h_mm: Option<Decimal>,
    pub weather_condition: String,
    pub weather_description: String,
}

/// Multi-day precipitation forecast for a location
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RainForecast {
    pub location_name: String,
    pub latitude: Decimal,
    pub longitude: Decimal,
    pub forecasts: Vec<ForecastItem>,
}

/// OpenWeatherMap API response for forecast
#[derive(Debug, Deserialize)]
struct OwmForecastResponse {
    city: OwmCity,
    list: Vec<OwmForecastItem>,
}

#[derive(Debug, Deserialize)]
struct OwmCity {
    name: String,
    coord: OwmCoord,
}

#[derive(Debug, Deserialize)]
struct OwmCoord {
    lat: f64,
    lon: f64,
}

#[derive(Debug, Deserialize)]
struct OwmForecastItem {
    dt: i64,
    weather: Vec<OwmWeather>,
    pop: f64,
    rain: Option<OwmRain>,
}

#[derive(Debug, Deserialize)]
struct OwmWeather {
    main: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwmRain {
    #[serde(rename = "3h")]
    three_hour: Option<f64>,
}

impl WeatherClient {
    /// Create a new WeatherClient
    pub fn new(api_key: String, base_url: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url,
        }
    }

    /// Fetch the precipitation forecast for a location
    pub async fn get_forecast(
        &self,
        latitude: Decimal,
        longitude: Decimal,
    ) -> AppResult<RainForecast> {
        let url = format!(
            "{}/forecast?lat={}&lon={}&appid={}&units=metric",
            self.base_url, latitude, longitude, self.api_key
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|_| AppError::WeatherServiceUnavailable)?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::warn!("Weather API error: {} - {}", status, body);
            return Err(AppError::WeatherServiceUnavailable);
        }

        let data: OwmForecastResponse = response
            .json()
            .await
            .map_err(|e| AppError::ExternalService(format!("Failed to parse forecast: {}", e)))?;

        Ok(convert_forecast_response(data))
    }

    /// Fetch forecast intervals rolled up into per-day rainfall readings,
    /// the shape the evaluation core consumes
    pub async fn get_daily_readings(
        &self,
        latitude: Decimal,
        longitude: Decimal,
    ) -> AppResult<Vec<RainfallReading>> {
        let forecast = self.get_forecast(latitude, longitude).await?;
        Ok(daily_readings(&forecast))
    }
}

/// Convert OpenWeatherMap forecast response to our format
fn convert_forecast_response(data: OwmForecastResponse) -> RainForecast {
    let forecasts = data
        .list
        .into_iter()
        .map(|item| {
            let weather = item.weather.first();
            ForecastItem {
                timestamp: DateTime::from_timestamp(item.dt, 0).unwrap_or_else(Utc::now),
                pop: Decimal::from_f64_retain(item.pop).unwrap_or_default(),
                rain_3h_mm: item
                    .rain
                    .and_then(|r| r.three_hour)
                    .map(|v| Decimal::from_f64_retain(v).unwrap_or_default()),
                weather_condition: weather.map(|w| w.main.clone()).unwrap_or_default(),
                weather_description: weather.map(|w| w.description.clone()).unwrap_or_default(),
            }
        })
        .collect();

    RainForecast {
        location_name: data.city.name,
        latitude: Decimal::from_f64_retain(data.city.coord.lat).unwrap_or_default(),
        longitude: Decimal::from_f64_retain(data.city.coord.lon).unwrap_or_default(),
        forecasts,
    }
}

/// Sum 3-hour forecast buckets into one reading per calendar day
pub fn daily_readings(forecast: &RainForecast) -> Vec<RainfallReading> {
    let mut by_day: BTreeMap<NaiveDate, Decimal> = BTreeMap::new();
    for item in &forecast.forecasts {
        let day = item.timestamp.date_naive();
        let amount = item.rain_3h_mm.unwrap_or(Decimal::ZERO);
        *by_day.entry(day).or_insert(Decimal::ZERO) += amount;
    }

    by_day
        .into_iter()
        .map(|(date, amount_mm)| RainfallReading { date, amount_mm })
        .collect()
}

/// Check whether any forecast day would classify as rainy
pub fn has_rain_forecast(forecast: &RainForecast, threshold_mm: Decimal) -> bool {
    daily_readings(forecast)
        .iter()
        .any(|r| r.amount_mm >= threshold_mm)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(ts: i64, rain: Option<&str>) -> ForecastItem {
        ForecastItem {
            timestamp: DateTime::from_timestamp(ts, 0).unwrap(),
            pop: Decimal::ZERO,
            rain_3h_mm: rain.map(|r| r.parse().unwrap()),
            weather_condition: "Rain".to_string(),
            weather_description: "light rain".to_string(),
        }
    }

    #[test]
    fn test_daily_readings_sums_buckets_per_day() {
        // Two buckets on 2025-06-01, one on 2025-06-02
        let forecast = RainForecast {
            location_name: "Portland".to_string(),
            latitude: Decimal::ZERO,
            longitude: Decimal::ZERO,
            forecasts: vec![
                item(1748736000, Some("2.5")), // 2025-06-01 00:00
                item(1748746800, Some("3.5")), // 2025-06-01 03:00
                item(1748822400, None),        // 2025-06-02 00:00
            ],
        };

        let readings = daily_readings(&forecast);
        assert_eq!(readings.len(), 2);
        assert_eq!(readings[0].amount_mm, "6.0".parse::<Decimal>().unwrap());
        assert_eq!(readings[1].amount_mm, Decimal::ZERO);
    }

    #[test]
    fn test_has_rain_forecast_uses_inclusive_threshold() {
        let forecast = RainForecast {
            location_name: "Portland".to_string(),
            latitude: Decimal::ZERO,
            longitude: Decimal::ZERO,
            forecasts: vec![item(1748736000, Some("5.0"))],
        };
        assert!(has_rain_forecast(&forecast, Decimal::from(5)));
        assert!(!has_rain_forecast(&forecast, Decimal::from(6)));
    }
}
