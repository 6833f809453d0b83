//! Forecast service: the prediction pipeline entry point
//!
//! weather → calendar → scenarios → aligned features → scores → rankings,
//! plus the rolling-average baseline from the same history.

use chrono::NaiveDate;
use shared::forecast::{build_scenarios, channel_split, overall_ranking, rolling_average};
use shared::{
    CalendarContext, ForecastRequest, OrderHistory, PredictionResult, ScoredScenario,
};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::services::artifacts::ForecastArtifacts;
use crate::services::weather::WeatherService;

/// Generates item-level order forecasts. Holds only read-only artifacts and
/// can serve concurrent requests.
#[derive(Clone)]
pub struct ForecastService {
    artifacts: ForecastArtifacts,
    weather: WeatherService,
}

impl ForecastService {
    pub fn new(artifacts: ForecastArtifacts, weather: WeatherService) -> Self {
        Self { artifacts, weather }
    }

    pub fn artifacts(&self) -> &ForecastArtifacts {
        &self.artifacts
    }

    /// Run the full pipeline for one request
    pub async fn generate(
        &self,
        history: &OrderHistory,
        request: &ForecastRequest,
        today: NaiveDate,
    ) -> AppResult<PredictionResult> {
        let request_id = Uuid::new_v4();
        tracing::info!(
            %request_id,
            location = %request.location,
            date = %request.target_date,
            hour = request.target_hour,
            "Generating forecast"
        );

        let weather = self
            .weather
            .lookup(&request.location, request.target_date, request.target_hour, today)
            .await?;

        let calendar = CalendarContext::resolve(request.target_date, &self.artifacts.holidays);

        let scenarios = build_scenarios(
            history,
            &calendar,
            &weather,
            request.is_special_event,
            request.target_hour,
        );

        let alignment = self.artifacts.schema.align_scenarios(&scenarios);
        if !alignment.dropped_columns.is_empty() {
            tracing::debug!(
                %request_id,
                dropped = alignment.dropped_columns.len(),
                "Columns unknown to the model were dropped"
            );
        }

        let probabilities = self.artifacts.scorer.predict_proba(&alignment.matrix)?;
        if probabilities.len() != scenarios.len() {
            return Err(AppError::Internal(format!(
                "Scorer returned {} probabilities for {} scenarios",
                probabilities.len(),
                scenarios.len()
            )));
        }

        let scored: Vec<ScoredScenario> = scenarios
            .into_iter()
            .zip(probabilities)
            .map(|(scenario, probability)| ScoredScenario {
                scenario,
                probability,
            })
            .collect();

        let overall_prediction = overall_ranking(&scored);
        let detailed_prediction = channel_split(&scored);
        let rolling_avg_prediction = rolling_average(
            history,
            request.target_date,
            request.target_hour,
            request.rolling_window_days,
        );

        tracing::info!(
            %request_id,
            scenarios = scored.len(),
            items = overall_prediction.len(),
            baseline_items = rolling_avg_prediction.len(),
            "Forecast complete"
        );

        Ok(PredictionResult {
            request_id,
            location: request.location.clone(),
            target_date: request.target_date,
            target_hour: request.target_hour,
            calendar,
            weather,
            overall_prediction,
            detailed_prediction,
            rolling_avg_prediction,
            rolling_window_days: request.rolling_window_days,
        })
    }
}
