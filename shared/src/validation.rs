//! Request validation for the forecasting pipeline

use chrono::NaiveDate;
use thiserror::Error;

use crate::types::MAX_LOOKAHEAD_DAYS;

/// Request-scoped validation failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RequestError {
    #[error("Invalid date format. Please use YYYY-MM-DD.")]
    InvalidDate,

    #[error("Date must be within the next 14 days.")]
    DateOutOfRange,

    #[error("{field}: {message}")]
    InvalidField { field: String, message: String },
}

impl RequestError {
    pub fn field(field: &str, message: impl Into<String>) -> Self {
        RequestError::InvalidField {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// Parse an ISO `YYYY-MM-DD` target date
pub fn parse_target_date(value: &str) -> Result<NaiveDate, RequestError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| RequestError::InvalidDate)
}

/// Number of forecast days the provider must return so that the last day is
/// the target date. Valid only when it lies in (0, MAX_LOOKAHEAD_DAYS].
pub fn lookahead_days(today: NaiveDate, target: NaiveDate) -> Result<u32, RequestError> {
    let days = (target - today).num_days() + 1;
    if days > 0 && days <= MAX_LOOKAHEAD_DAYS {
        Ok(days as u32)
    } else {
        Err(RequestError::DateOutOfRange)
    }
}

/// Validate an hour of day
pub fn validate_hour(hour: u32) -> Result<(), RequestError> {
    if hour > 23 {
        return Err(RequestError::field("hour", "Hour must be between 0 and 23"));
    }
    Ok(())
}

/// Validate a location string
pub fn validate_location(location: &str) -> Result<(), RequestError> {
    if location.trim().is_empty() {
        return Err(RequestError::field("location", "Please enter the restaurant location"));
    }
    Ok(())
}
