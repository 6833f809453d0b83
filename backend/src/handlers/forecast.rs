//! HTTP handlers for forecast endpoints

use axum::{
    extract::{rejection::JsonRejection, Multipart, State},
    Json,
};
use chrono::Local;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::models::{ForecastQuery, ForecastRequest, HistorySummary, PredictionResult};
use crate::services::HistoryService;
use crate::AppState;

/// Forecast against the integrated order history
pub async fn create_forecast(
    State(state): State<AppState>,
    payload: Result<Json<ForecastQuery>, JsonRejection>,
) -> AppResult<Json<PredictionResult>> {
    let Json(query) = payload?;
    let request = build_request(&state, query)?;

    let history = state.history.as_ref().ok_or(AppError::DatasetUnavailable)?;
    let today = Local::now().date_naive();
    let result = state.forecaster.generate(history, &request, today).await?;
    Ok(Json(result))
}

/// Forecast against an uploaded order-history CSV
pub async fn upload_forecast(
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<Json<PredictionResult>> {
    let form = UploadForm::read(multipart).await?;
    let (query, file) = form.into_parts()?;
    let request = build_request(&state, query)?;

    let history = HistoryService::load_from_bytes(&file, &request.location)?;
    let today = Local::now().date_naive();
    let result = state.forecaster.generate(&history, &request, today).await?;
    Ok(Json(result))
}

/// Summary of the integrated order history
pub async fn get_history_summary(State(state): State<AppState>) -> AppResult<Json<HistorySummary>> {
    let history = state.history.as_ref().ok_or(AppError::DatasetUnavailable)?;
    Ok(Json(HistorySummary::from(history.as_ref())))
}

/// Validate a query and apply the configured defaults
fn build_request(state: &AppState, mut query: ForecastQuery) -> AppResult<ForecastRequest> {
    query.validate()?;
    if query.rolling_window_days.is_none() {
        query.rolling_window_days = Some(state.config.forecast.default_rolling_window_days);
    }
    Ok(ForecastRequest::from_query(&query, &state.config.data.default_location)?)
}

/// Raw multipart fields of an upload request
#[derive(Debug, Default)]
struct UploadForm {
    file: Option<Vec<u8>>,
    location: Option<String>,
    date: Option<String>,
    hour: Option<String>,
    is_special_event: Option<String>,
    rolling_window_days: Option<String>,
}

impl UploadForm {
    async fn read(mut multipart: Multipart) -> AppResult<Self> {
        let mut form = UploadForm::default();
        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::ValidationError(e.body_text()))?
        {
            let name = field.name().unwrap_or_default().to_string();
            if name == "file" {
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::ValidationError(e.body_text()))?;
                form.file = Some(bytes.to_vec());
                continue;
            }

            let value = field
                .text()
                .await
                .map_err(|e| AppError::ValidationError(e.body_text()))?;
            match name.as_str() {
                "location" => form.location = Some(value),
                "date" => form.date = Some(value),
                "hour" => form.hour = Some(value),
                "is_special_event" => form.is_special_event = Some(value),
                "rolling_window_days" => form.rolling_window_days = Some(value),
                other => tracing::debug!(field = other, "Ignoring unknown upload field"),
            }
        }
        Ok(form)
    }

    fn into_parts(self) -> AppResult<(ForecastQuery, Vec<u8>)> {
        let file = self.file.ok_or_else(|| missing("file"))?;
        let location = self
            .location
            .filter(|l| !l.trim().is_empty())
            .ok_or_else(|| AppError::Validation {
                field: "location".to_string(),
                message: "Please enter the restaurant location.".to_string(),
            })?;
        let date = self.date.ok_or_else(|| missing("date"))?;
        let hour = self.hour.ok_or_else(|| missing("hour"))?;
        let hour = hour.trim().parse::<u32>().map_err(|_| AppError::Validation {
            field: "hour".to_string(),
            message: "Hour must be a whole number between 0 and 23".to_string(),
        })?;
        let is_special_event = match self.is_special_event.as_deref() {
            Some(value) => parse_flag(value)?,
            None => false,
        };
        let rolling_window_days = match self.rolling_window_days.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(value) => Some(value.parse::<u32>().map_err(|_| AppError::Validation {
                field: "rolling_window_days".to_string(),
                message: "Rolling window must be a whole number of days".to_string(),
            })?),
        };

        let query = ForecastQuery {
            date: date.trim().to_string(),
            hour,
            is_special_event,
            rolling_window_days,
            location: Some(location),
        };
        Ok((query, file))
    }
}

fn missing(field: &str) -> AppError {
    AppError::Validation {
        field: field.to_string(),
        message: format!("Missing form field '{}'", field),
    }
}

fn parse_flag(value: &str) -> AppResult<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" | "" => Ok(false),
        _ => Err(AppError::Validation {
            field: "is_special_event".to_string(),
            message: format!("Expected true or false, got '{}'", value),
        }),
    }
}
