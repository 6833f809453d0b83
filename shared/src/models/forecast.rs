//! Forecast request, scenario and result models

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::calendar::CalendarContext;
use crate::models::WeatherSnapshot;
use crate::types::{Channel, DEFAULT_ROLLING_WINDOW_DAYS};
use crate::validation::{parse_target_date, validate_location, RequestError};

/// Forecast request as submitted by a client
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ForecastQuery {
    /// Target date, `YYYY-MM-DD`
    pub date: String,
    #[validate(range(min = 0, max = 23))]
    pub hour: u32,
    #[serde(default)]
    pub is_special_event: bool,
    #[validate(range(min = 0, max = 365))]
    pub rolling_window_days: Option<u32>,
    #[validate(length(min = 1, max = 200))]
    pub location: Option<String>,
}

/// A validated forecast request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ForecastRequest {
    pub location: String,
    pub target_date: NaiveDate,
    pub target_hour: u32,
    pub is_special_event: bool,
    pub rolling_window_days: u32,
}

impl ForecastRequest {
    /// Build a request from a client query, falling back to `default_location`
    /// when the query does not name one.
    pub fn from_query(query: &ForecastQuery, default_location: &str) -> Result<Self, RequestError> {
        let target_date = parse_target_date(&query.date)?;
        crate::validation::validate_hour(query.hour)?;

        let location = query
            .location
            .as_deref()
            .unwrap_or(default_location)
            .trim()
            .to_string();
        validate_location(&location)?;

        Ok(Self {
            location,
            target_date,
            target_hour: query.hour,
            is_special_event: query.is_special_event,
            rolling_window_days: query.rolling_window_days.unwrap_or(DEFAULT_ROLLING_WINDOW_DAYS),
        })
    }
}

/// Shared context every scenario of one request is annotated with
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScenarioContext {
    pub hour: u32,
    pub calendar: CalendarContext,
    pub weather: WeatherSnapshot,
    pub is_special_event: bool,
}

/// One hypothetical (item, category, channel) row to be scored
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Scenario {
    pub food_item_name: String,
    pub food_item_category: String,
    pub channel: Channel,
    pub context: ScenarioContext,
}

/// A scenario with its predicted order probability
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoredScenario {
    pub scenario: Scenario,
    pub probability: f64,
}

/// Overall ranking row: mean probability across channels
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ItemProbability {
    pub food_item_name: String,
    pub probability: f64,
}

/// Channel pivot row
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChannelProbabilities {
    pub food_item_name: String,
    #[serde(rename = "Dine In")]
    pub dine_in: f64,
    #[serde(rename = "Take Away")]
    pub take_away: f64,
}

/// Rolling-average ranking row
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RollingAverageEntry {
    pub food_item_name: String,
    pub rolling_avg_orders: u32,
}

/// Full forecast response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionResult {
    pub request_id: Uuid,
    pub location: String,
    pub target_date: NaiveDate,
    pub target_hour: u32,
    pub calendar: CalendarContext,
    pub weather: WeatherSnapshot,
    pub overall_prediction: Vec<ItemProbability>,
    pub detailed_prediction: Vec<ChannelProbabilities>,
    pub rolling_avg_prediction: Vec<RollingAverageEntry>,
    pub rolling_window_days: u32,
}
