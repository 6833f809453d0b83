//! WebAssembly module for the Daily Prep Assistant
//!
//! Provides client-side computation for:
//! - Forecast date window checks
//! - Hour pickers populated from order history
//! - Rolling-average baseline without a server round trip

use chrono::NaiveDate;
use shared::forecast;
use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::models::*;
pub use shared::types::*;
pub use shared::validation::*;

fn parse_date(value: &str) -> Result<NaiveDate, JsValue> {
    parse_target_date(value).map_err(|e| JsValue::from_str(&e.to_string()))
}

fn parse_history(history_json: &str) -> Result<OrderHistory, JsValue> {
    serde_json::from_str(history_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid history JSON: {}", e)))
}

/// Today's date from the browser clock, `YYYY-MM-DD`
#[wasm_bindgen]
pub fn local_today() -> String {
    let now = js_sys::Date::new_0();
    format!(
        "{:04}-{:02}-{:02}",
        now.get_full_year(),
        now.get_month() + 1,
        now.get_date()
    )
}

/// Number of forecast days needed to reach `target`, or an error when the
/// date is outside the forecast window
#[wasm_bindgen]
pub fn lookahead_days(today: &str, target: &str) -> Result<u32, JsValue> {
    shared::lookahead_days(parse_date(today)?, parse_date(target)?)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Dates a user may pick, as a JSON array of `YYYY-MM-DD` strings
#[wasm_bindgen]
pub fn selectable_dates(today: &str) -> Result<String, JsValue> {
    let today = parse_date(today)?;
    let dates: Vec<String> = today
        .iter_days()
        .take(MAX_LOOKAHEAD_DAYS as usize)
        .map(|d| d.format("%Y-%m-%d").to_string())
        .collect();
    serde_json::to_string(&dates).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Distinct hours present in an order history, ascending
#[wasm_bindgen]
pub fn selectable_hours(history_json: &str) -> Result<Vec<u32>, JsValue> {
    Ok(parse_history(history_json)?.hours())
}

/// Rolling-average baseline for a date and hour, as JSON
#[wasm_bindgen]
pub fn rolling_average(
    history_json: &str,
    target_date: &str,
    target_hour: u32,
    window_days: u32,
) -> Result<String, JsValue> {
    let history = parse_history(history_json)?;
    let entries = forecast::rolling_average(&history, parse_date(target_date)?, target_hour, window_days);
    serde_json::to_string(&entries).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Day name and day type of a date, as JSON. Holidays are resolved server-side.
#[wasm_bindgen]
pub fn day_context(date: &str) -> Result<String, JsValue> {
    let context = shared::CalendarContext::without_holidays(parse_date(date)?);
    serde_json::to_string(&context).map_err(|e| JsValue::from_str(&e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const HISTORY: &str = r#"{
        "location": "Chennai",
        "records": [
            {"food_item_name": "Idli", "food_item_category": "Breakfast", "date": "2024-02-29", "hour": 8},
            {"food_item_name": "Idli", "food_item_category": "Breakfast", "date": "2024-02-28", "hour": 8},
            {"food_item_name": "Vada", "food_item_category": "Breakfast", "date": "2024-02-29", "hour": 8, "order_type": "Take Away"},
            {"food_item_name": "Biryani", "food_item_category": "Mains", "date": "2024-02-29", "hour": 13}
        ]
    }"#;

    #[test]
    fn test_lookahead_days() {
        assert_eq!(lookahead_days("2024-03-01", "2024-03-01").unwrap(), 1);
        assert_eq!(lookahead_days("2024-03-01", "2024-03-14").unwrap(), 14);
    }

    #[test]
    fn test_selectable_dates_cover_window() {
        let dates: Vec<String> = serde_json::from_str(&selectable_dates("2024-03-01").unwrap()).unwrap();
        assert_eq!(dates.len(), 14);
        assert_eq!(dates[0], "2024-03-01");
        assert_eq!(dates[13], "2024-03-14");
    }

    #[test]
    fn test_selectable_hours() {
        assert_eq!(selectable_hours(HISTORY).unwrap(), vec![8, 13]);
    }

    #[test]
    fn test_rolling_average() {
        let json = rolling_average(HISTORY, "2024-03-01", 8, 3).unwrap();
        let entries: Vec<RollingAverageEntry> = serde_json::from_str(&json).unwrap();
        assert_eq!(entries[0].food_item_name, "Idli");
        assert_eq!(entries[0].rolling_avg_orders, 2);
        assert_eq!(entries[1].food_item_name, "Vada");
        assert_eq!(entries.len(), 2);
    }

    #[test]
    fn test_rolling_average_with_maximal_window() {
        let json = rolling_average(HISTORY, "2024-03-01", 8, u32::MAX).unwrap();
        let entries: Vec<RollingAverageEntry> = serde_json::from_str(&json).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].rolling_avg_orders, 2);
    }

    #[test]
    fn test_day_context() {
        let context: shared::CalendarContext = serde_json::from_str(&day_context("2024-03-02").unwrap()).unwrap();
        assert_eq!(context.day_of_week, "Saturday");
        assert_eq!(context.day_type, DayType::Weekend);
    }
}
