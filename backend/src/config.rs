//! Configuration management for the Daily Prep forecasting server
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with PREP_ prefix

use config::{ConfigError, Environment, File};
use serde::Deserialize;

use crate::error::{AppError, AppResult};

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Weather API configuration
    pub weather: WeatherConfig,

    /// Pretrained model artifacts and reference data
    pub artifacts: ArtifactsConfig,

    /// Holiday calendar region
    pub holidays: HolidayConfig,

    /// Integrated order-history dataset
    pub data: DataConfig,

    /// Forecast defaults
    pub forecast: ForecastConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct WeatherConfig {
    /// Weather API endpoint
    pub api_endpoint: String,

    /// Weather API key. Read from `api_key_path` when unset.
    pub api_key: Option<String>,

    /// File holding the weather API key
    pub api_key_path: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ArtifactsConfig {
    /// Serialized classifier (JSON)
    pub model_path: String,

    /// Training-time feature column list (JSON array)
    pub columns_path: String,

    /// Holiday calendar (CSV with `date,name`)
    pub holidays_path: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct HolidayConfig {
    /// ISO country code
    pub country: String,

    /// Administrative region code
    pub region: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DataConfig {
    /// Order history exported from the restaurant management system
    pub rms_data_path: String,

    /// Restaurant location used with the integrated dataset
    pub default_location: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ForecastConfig {
    /// Rolling-average window when a request does not set one
    pub default_rolling_window_days: u32,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment = std::env::var("PREP_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 3000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("weather.api_endpoint", "http://api.weatherapi.com/v1")?
            .set_default("weather.api_key_path", "api_key.txt")?
            .set_default("artifacts.model_path", "models/model.json")?
            .set_default("artifacts.columns_path", "models/model_columns.json")?
            .set_default("artifacts.holidays_path", "data/holidays_in_tn.csv")?
            .set_default("holidays.country", "IN")?
            .set_default("holidays.region", "TN")?
            .set_default("data.rms_data_path", "data/rms_order_history.csv")?
            .set_default("data.default_location", "Tamil Nadu")?
            .set_default(
                "forecast.default_rolling_window_days",
                i64::from(shared::DEFAULT_ROLLING_WINDOW_DAYS),
            )?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (PREP_ prefix)
            .add_source(
                Environment::with_prefix("PREP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Resolve the weather API key from config or the key file
    pub fn weather_api_key(&self) -> AppResult<String> {
        if let Some(key) = self.weather.api_key.as_deref().map(str::trim) {
            if !key.is_empty() {
                return Ok(key.to_string());
            }
        }

        let key = std::fs::read_to_string(&self.weather.api_key_path).map_err(|e| {
            AppError::Configuration(format!(
                "Could not read weather API key from '{}': {}",
                self.weather.api_key_path, e
            ))
        })?;
        let key = key.trim();
        if key.is_empty() {
            return Err(AppError::Configuration(format!(
                "Weather API key file '{}' is empty",
                self.weather.api_key_path
            )));
        }
        Ok(key.to_string())
    }
}
