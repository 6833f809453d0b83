//! Weather API client for fetching hourly forecasts
//!
//! Integrates with the WeatherAPI.com forecast endpoint. One request per
//! forecast, no retries.

use async_trait::async_trait;
use reqwest::Client;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::Deserialize;
use shared::WeatherSnapshot;

use crate::error::{AppError, AppResult};

/// Source of hourly weather forecasts
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Fetch a `days`-day forecast for `location` and return the given hour of
    /// the last day.
    async fn hourly_forecast(&self, location: &str, days: u32, hour: u32) -> AppResult<WeatherSnapshot>;
}

/// Weather API client
#[derive(Clone)]
pub struct WeatherClient {
    client: Client,
    api_key: String,
    base_url: String,
}

/// WeatherAPI.com forecast response
#[derive(Debug, Deserialize)]
struct WapiForecastResponse {
    forecast: WapiForecast,
}

#[derive(Debug, Deserialize)]
struct WapiForecast {
    forecastday: Vec<WapiForecastDay>,
}

#[derive(Debug, Deserialize)]
struct WapiForecastDay {
    hour: Vec<WapiHour>,
}

#[derive(Debug, Deserialize)]
struct WapiHour {
    time: Option<String>,
    temp_c: f64,
    precip_mm: f64,
    wind_kph: f64,
    cloud: f64,
    humidity: f64,
    pressure_mb: f64,
    condition: Option<WapiCondition>,
}

#[derive(Debug, Deserialize)]
struct WapiCondition {
    text: String,
}

/// Error payload returned alongside non-success statuses
#[derive(Debug, Deserialize)]
struct WapiErrorResponse {
    error: WapiError,
}

#[derive(Debug, Deserialize)]
struct WapiError {
    message: String,
}

impl WeatherClient {
    /// Create a new WeatherClient against `base_url`
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Pick the requested hour out of the last forecast day
    fn select_hour(data: WapiForecastResponse, hour: u32) -> AppResult<WeatherSnapshot> {
        let day = data
            .forecast
            .forecastday
            .into_iter()
            .last()
            .ok_or_else(|| AppError::WeatherLookup("Forecast contained no days".to_string()))?;

        let slot = day
            .hour
            .into_iter()
            .nth(hour as usize)
            .ok_or_else(|| AppError::WeatherLookup(format!("Forecast has no data for hour {}", hour)))?;

        Ok(WeatherSnapshot {
            time: slot.time,
            temp_c: decimal(slot.temp_c),
            precip_mm: decimal(slot.precip_mm),
            wind_kph: decimal(slot.wind_kph),
            cloud: decimal(slot.cloud),
            humidity: decimal(slot.humidity),
            pressure_mb: decimal(slot.pressure_mb),
            condition: slot.condition.map(|c| c.text),
        })
    }
}

#[async_trait]
impl WeatherProvider for WeatherClient {
    async fn hourly_forecast(&self, location: &str, days: u32, hour: u32) -> AppResult<WeatherSnapshot> {
        let url = format!("{}/forecast.json", self.base_url);
        let days = days.to_string();

        let response = self
            .client
            .get(&url)
            .query(&[
                ("key", self.api_key.as_str()),
                ("q", location),
                ("days", days.as_str()),
            ])
            .send()
            .await
            .map_err(|e| AppError::WeatherLookup(format!("Weather API request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            let detail = serde_json::from_str::<WapiErrorResponse>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(AppError::WeatherLookup(format!(
                "Weather API error: {} - {}",
                status, detail
            )));
        }

        let data: WapiForecastResponse = response
            .json()
            .await
            .map_err(|e| AppError::WeatherLookup(format!("Failed to parse forecast response: {}", e)))?;

        Self::select_hour(data, hour)
    }
}

fn decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}
