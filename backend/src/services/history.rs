//! Order-history loading
//!
//! Reads order history exported as CSV, either the integrated restaurant
//! management system export or a file uploaded for a single forecast.

use chrono::{NaiveDate, NaiveDateTime};
use serde::Deserialize;
use shared::{Channel, OrderHistory, OrderRecord};
use std::path::Path;

use crate::error::{AppError, AppResult};

/// Columns every order-history file must carry
pub const REQUIRED_COLUMNS: [&str; 4] = ["food_item_name", "food_item_category", "hour", "date"];

const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%d-%m-%Y", "%m/%d/%Y"];
const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

#[derive(Debug, Deserialize)]
struct OrderRow {
    food_item_name: String,
    food_item_category: String,
    hour: String,
    date: String,
    #[serde(default)]
    order_type: Option<String>,
}

/// Order-history loader
pub struct HistoryService;

impl HistoryService {
    /// Load the integrated dataset from disk
    pub fn load_from_path(path: impl AsRef<Path>, location: &str) -> AppResult<OrderHistory> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|e| {
            AppError::Configuration(format!(
                "Could not find the RMS data file at '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::load_from_reader(file, location)
    }

    /// Load an uploaded CSV file
    pub fn load_from_bytes(bytes: &[u8], location: &str) -> AppResult<OrderHistory> {
        Self::load_from_reader(bytes, location)
    }

    fn load_from_reader<R: std::io::Read>(source: R, location: &str) -> AppResult<OrderHistory> {
        shared::validate_location(location)?;

        let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(source);
        let headers = reader
            .headers()
            .map_err(|e| AppError::ValidationError(format!("Error processing order history: {}", e)))?
            .clone();

        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .filter(|column| !headers.iter().any(|h| h == **column))
            .map(|column| column.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(AppError::MissingColumns(missing));
        }

        let mut records = Vec::new();
        for (index, row) in reader.deserialize::<OrderRow>().enumerate() {
            let row_number = index + 1;
            let row = row.map_err(|e| AppError::Validation {
                field: format!("row {}", row_number),
                message: format!("Error processing order history: {}", e),
            })?;
            records.push(parse_row(row, row_number)?);
        }

        tracing::debug!(records = records.len(), location, "Loaded order history");
        Ok(OrderHistory::new(location.trim(), records))
    }
}

fn parse_row(row: OrderRow, row_number: usize) -> AppResult<OrderRecord> {
    let invalid = |message: String| AppError::Validation {
        field: format!("row {}", row_number),
        message,
    };

    let hour = parse_hour(&row.hour)
        .ok_or_else(|| invalid(format!("Hour must be between 0 and 23, got '{}'", row.hour)))?;
    let date = parse_date(&row.date)
        .ok_or_else(|| invalid(format!("Unrecognized date '{}'", row.date)))?;
    let channel = match row.order_type.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(label) => Some(label.parse::<Channel>().map_err(invalid)?),
    };

    Ok(OrderRecord {
        food_item_name: row.food_item_name,
        food_item_category: row.food_item_category,
        date,
        hour,
        channel,
    })
}

/// Accepts integral values, including exports that write hours as `13.0`
fn parse_hour(value: &str) -> Option<u32> {
    let value = value.trim();
    let hour = value
        .parse::<u32>()
        .ok()
        .or_else(|| {
            value
                .parse::<f64>()
                .ok()
                .filter(|h| h.fract() == 0.0 && *h >= 0.0)
                .map(|h| h as u32)
        })?;
    (hour <= 23).then_some(hour)
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
                .map(|dt| dt.date())
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
order_id,food_item_name,food_item_category,date,hour,order_type
1,Masala Dosa,Breakfast,2024-02-27,9,Dine In
2,Filter Coffee,Beverages,2024-02-27 09:15:00,9,Take Away
3,Masala Dosa,Breakfast,28-02-2024,10.0,
";

    #[test]
    fn test_loads_records_and_ignores_extra_columns() {
        let history = HistoryService::load_from_bytes(SAMPLE.as_bytes(), "Chennai").unwrap();

        assert_eq!(history.location, "Chennai");
        assert_eq!(history.len(), 3);
        assert_eq!(history.records[0].channel, Some(Channel::DineIn));
        assert_eq!(history.records[1].date, NaiveDate::from_ymd_opt(2024, 2, 27).unwrap());
        assert_eq!(history.records[2].hour, 10);
        assert_eq!(history.records[2].channel, None);
        assert_eq!(history.hours(), vec![9, 10]);
    }

    #[test]
    fn test_missing_columns_are_named() {
        let data = "food_item_name,hour\nDosa,9\n";
        match HistoryService::load_from_bytes(data.as_bytes(), "Chennai") {
            Err(AppError::MissingColumns(columns)) => {
                assert_eq!(columns, vec!["food_item_category", "date"]);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_channel_column_is_optional() {
        let data = "food_item_name,food_item_category,hour,date\nDosa,Breakfast,9,2024-02-27\n";
        let history = HistoryService::load_from_bytes(data.as_bytes(), "Chennai").unwrap();
        assert_eq!(history.records[0].channel, None);
    }

    #[test]
    fn test_out_of_range_hour_names_the_row() {
        let data = "food_item_name,food_item_category,hour,date\nDosa,Breakfast,9,2024-02-27\nIdli,Breakfast,24,2024-02-27\n";
        match HistoryService::load_from_bytes(data.as_bytes(), "Chennai") {
            Err(AppError::Validation { field, .. }) => assert_eq!(field, "row 2"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_unknown_channel_is_rejected() {
        let data = "food_item_name,food_item_category,hour,date,order_type\nDosa,Breakfast,9,2024-02-27,Drone\n";
        assert!(HistoryService::load_from_bytes(data.as_bytes(), "Chennai").is_err());
    }

    #[test]
    fn test_empty_location_is_rejected() {
        assert!(matches!(
            HistoryService::load_from_bytes(SAMPLE.as_bytes(), "  "),
            Err(AppError::Validation { .. })
        ));
    }

    #[test]
    fn test_missing_file_is_reported() {
        assert!(HistoryService::load_from_path("no/such/file.csv", "Chennai").is_err());
    }

    #[test]
    fn test_parse_hour_variants() {
        assert_eq!(parse_hour("7"), Some(7));
        assert_eq!(parse_hour("13.0"), Some(13));
        assert_eq!(parse_hour("13.5"), None);
        assert_eq!(parse_hour("-1"), None);
        assert_eq!(parse_hour("24"), None);
    }

    #[test]
    fn test_parse_date_variants() {
        let expected = NaiveDate::from_ymd_opt(2024, 2, 27);
        assert_eq!(parse_date("2024-02-27"), expected);
        assert_eq!(parse_date("27-02-2024"), expected);
        assert_eq!(parse_date("02/27/2024"), expected);
        assert_eq!(parse_date("2024-02-27T18:30:00"), expected);
        assert_eq!(parse_date("yesterday"), None);
    }
}
