//! Weather lookup for a forecast slot

use chrono::NaiveDate;
use shared::{lookahead_days, WeatherSnapshot};
use std::sync::Arc;

use crate::error::AppResult;
use crate::external::WeatherProvider;

/// Resolves the forecast conditions for one (location, date, hour)
#[derive(Clone)]
pub struct WeatherService {
    provider: Arc<dyn WeatherProvider>,
}

impl WeatherService {
    pub fn new(provider: Arc<dyn WeatherProvider>) -> Self {
        Self { provider }
    }

    /// Fetch the weather at `hour` on `target_date`.
    ///
    /// The provider is only called when the date lies within the supported
    /// lookahead window starting at `today`.
    pub async fn lookup(
        &self,
        location: &str,
        target_date: NaiveDate,
        hour: u32,
        today: NaiveDate,
    ) -> AppResult<WeatherSnapshot> {
        let days = lookahead_days(today, target_date)?;

        tracing::debug!(location, days, hour, "Requesting weather forecast");
        let snapshot = self.provider.hourly_forecast(location, days, hour).await;
        if let Err(e) = &snapshot {
            tracing::warn!(location, %target_date, hour, "Weather lookup failed: {}", e);
        }
        snapshot
    }
}
