//! Error handling for the Daily Prep forecasting server
//!
//! Every failure surfaces once, as a single error object. A response carries
//! either an error or a forecast, never both.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use shared::RequestError;
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Validation errors
    #[error("Validation error: {message}")]
    Validation { field: String, message: String },

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid date format. Please use YYYY-MM-DD.")]
    InvalidDate,

    #[error("Date must be within the next 14 days.")]
    DateOutOfRange,

    // Data shape errors
    #[error("Order history is missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("Order history is not loaded")]
    DatasetUnavailable,

    // External service errors
    #[error("Weather lookup failed: {0}")]
    WeatherLookup(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    // Internal errors
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl From<RequestError> for AppError {
    fn from(err: RequestError) -> Self {
        match err {
            RequestError::InvalidDate => AppError::InvalidDate,
            RequestError::DateOutOfRange => AppError::DateOutOfRange,
            RequestError::InvalidField { field, message } => AppError::Validation { field, message },
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::ValidationError(errors.to_string())
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::ValidationError(rejection.body_text())
    }
}

/// Error response structure
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl AppError {
    /// HTTP status and response body for this error
    pub fn to_parts(&self) -> (StatusCode, ErrorDetail) {
        let (status, code, field) = match self {
            AppError::Validation { field, .. } => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", Some(field.clone()))
            }
            AppError::ValidationError(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", None),
            AppError::InvalidDate => (StatusCode::BAD_REQUEST, "INVALID_DATE", Some("date".to_string())),
            AppError::DateOutOfRange => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "DATE_OUT_OF_RANGE",
                Some("date".to_string()),
            ),
            AppError::MissingColumns(_) => (StatusCode::UNPROCESSABLE_ENTITY, "MISSING_COLUMNS", None),
            AppError::DatasetUnavailable => {
                (StatusCode::SERVICE_UNAVAILABLE, "DATASET_UNAVAILABLE", None)
            }
            AppError::WeatherLookup(_) => (StatusCode::BAD_GATEWAY, "WEATHER_LOOKUP_FAILED", None),
            AppError::Configuration(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "CONFIGURATION_ERROR", None)
            }
            AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", None),
        };

        let message = match self {
            AppError::Validation { message, .. } => message.clone(),
            AppError::ValidationError(msg) => msg.clone(),
            AppError::DatasetUnavailable => {
                "No order history is loaded. Upload a CSV file instead.".to_string()
            }
            AppError::WeatherLookup(msg) => format!("Could not complete forecast: {}", msg),
            AppError::Internal(_) => "An internal server error occurred".to_string(),
            other => other.to_string(),
        };

        (
            status,
            ErrorDetail {
                code: code.to_string(),
                message,
                field,
            },
        )
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_detail) = self.to_parts();

        // Log the error for debugging
        if status.is_server_error() {
            tracing::error!("Error: {:?}", self);
        } else {
            tracing::warn!("Request rejected: {}", self);
        }

        (status, Json(ErrorResponse { error: error_detail })).into_response()
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;
