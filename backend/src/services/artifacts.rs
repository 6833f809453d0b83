//! Startup artifacts: feature schema, classifier and holiday calendar
//!
//! Loaded once from configuration and shared read-only. Any failure here is a
//! configuration error and aborts startup.

use chrono::NaiveDate;
use serde::Deserialize;
use shared::forecast::FeatureSchema;
use shared::HolidayCalendar;
use std::path::Path;
use std::sync::Arc;

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::services::scorer::{ClassifierModel, SchemaBoundScorer, Scorer};

/// Everything the pipeline needs besides the request and the weather
#[derive(Clone)]
pub struct ForecastArtifacts {
    pub schema: Arc<FeatureSchema>,
    pub scorer: Arc<dyn Scorer>,
    pub holidays: Arc<HolidayCalendar>,
}

impl ForecastArtifacts {
    /// Load all artifacts named in the configuration
    pub fn load(config: &Config) -> AppResult<Self> {
        let schema = load_schema(&config.artifacts.columns_path)?;
        let model = ClassifierModel::load(&config.artifacts.model_path, &schema)?;
        let holidays = load_holiday_calendar(
            &config.artifacts.holidays_path,
            &config.holidays.country,
            &config.holidays.region,
        )?;

        tracing::info!(
            columns = schema.len(),
            holidays = holidays.len(),
            "Loaded forecast artifacts"
        );

        let scorer = SchemaBoundScorer::new(model, &schema);
        Ok(Self {
            schema: Arc::new(schema),
            scorer: Arc::new(scorer),
            holidays: Arc::new(holidays),
        })
    }
}

/// Read the training-time column list (a JSON array of names)
pub fn load_schema(path: impl AsRef<Path>) -> AppResult<FeatureSchema> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path).map_err(|e| {
        AppError::Configuration(format!("Could not read model columns '{}': {}", path.display(), e))
    })?;
    serde_json::from_str(&raw)
        .map_err(|e| AppError::Configuration(format!("Invalid model columns file: {}", e)))
}

#[derive(Debug, Deserialize)]
struct HolidayRow {
    date: String,
    #[serde(default)]
    name: String,
}

/// Read a `date,name` holiday CSV
pub fn load_holiday_calendar(
    path: impl AsRef<Path>,
    country: &str,
    region: &str,
) -> AppResult<HolidayCalendar> {
    let path = path.as_ref();
    let reader = csv::Reader::from_path(path).map_err(|e| {
        AppError::Configuration(format!("Could not read holiday calendar '{}': {}", path.display(), e))
    })?;
    parse_holiday_calendar(reader, country, region)
}

fn parse_holiday_calendar<R: std::io::Read>(
    mut reader: csv::Reader<R>,
    country: &str,
    region: &str,
) -> AppResult<HolidayCalendar> {
    let mut holidays = Vec::new();
    for (index, row) in reader.deserialize::<HolidayRow>().enumerate() {
        let row = row.map_err(|e| {
            AppError::Configuration(format!("Invalid holiday calendar row {}: {}", index + 1, e))
        })?;
        let date = NaiveDate::parse_from_str(row.date.trim(), "%Y-%m-%d").map_err(|_| {
            AppError::Configuration(format!(
                "Invalid holiday date '{}' on row {}",
                row.date,
                index + 1
            ))
        })?;
        holidays.push((date, row.name));
    }

    Ok(HolidayCalendar::new(country, region, holidays))
}
