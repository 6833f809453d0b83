//! Rolling-average baseline
//!
//! Historical frequency of each item at the target hour over a trailing
//! window. Independent of the classifier, weather and calendar.

use chrono::{Duration, NaiveDate};
use std::collections::BTreeMap;

use crate::models::{OrderHistory, RollingAverageEntry};

/// Count orders per item with `date >= target_date - window_days` and
/// `hour == target_hour`, most ordered first, ties by item name. A window
/// reaching past the earliest representable date counts every record.
pub fn rolling_average(
    history: &OrderHistory,
    target_date: NaiveDate,
    target_hour: u32,
    window_days: u32,
) -> Vec<RollingAverageEntry> {
    let start_date = target_date
        .checked_sub_signed(Duration::days(i64::from(window_days)))
        .unwrap_or(NaiveDate::MIN);

    let mut counts: BTreeMap<&str, u32> = BTreeMap::new();
    for record in history
        .records
        .iter()
        .filter(|r| r.date >= start_date && r.hour == target_hour)
    {
        *counts.entry(record.food_item_name.as_str()).or_insert(0) += 1;
    }

    let mut ranking: Vec<RollingAverageEntry> = counts
        .into_iter()
        .map(|(name, count)| RollingAverageEntry {
            food_item_name: name.to_string(),
            rolling_avg_orders: count,
        })
        .collect();

    // BTreeMap iteration is name-ordered and sort_by is stable
    ranking.sort_by(|a, b| b.rolling_avg_orders.cmp(&a.rolling_avg_orders));
    ranking
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::OrderRecord;

    fn order(name: &str, date: NaiveDate, hour: u32) -> OrderRecord {
        OrderRecord {
            food_item_name: name.to_string(),
            food_item_category: "Mains".to_string(),
            date,
            hour,
            channel: None,
        }
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    #[test]
    fn test_counts_within_window_and_hour() {
        let history = OrderHistory::new(
            "Chennai",
            vec![
                order("Biryani", day(8), 13),
                order("Biryani", day(9), 13),
                order("Parotta", day(9), 13),
                order("Parotta", day(9), 20), // other hour
                order("Biryani", day(1), 13), // before window
            ],
        );
        let ranking = rolling_average(&history, day(10), 13, 3);

        assert_eq!(
            ranking,
            vec![
                RollingAverageEntry {
                    food_item_name: "Biryani".to_string(),
                    rolling_avg_orders: 2
                },
                RollingAverageEntry {
                    food_item_name: "Parotta".to_string(),
                    rolling_avg_orders: 1
                },
            ]
        );
    }

    #[test]
    fn test_window_start_is_inclusive() {
        let history = OrderHistory::new("Chennai", vec![order("Dosa", day(7), 9)]);
        assert_eq!(rolling_average(&history, day(10), 9, 3).len(), 1);
        assert!(rolling_average(&history, day(10), 9, 2).is_empty());
    }

    #[test]
    fn test_no_matches_is_empty() {
        let history = OrderHistory::new("Chennai", vec![order("Dosa", day(1), 9)]);
        assert!(rolling_average(&history, day(20), 9, 3).is_empty());
        assert!(rolling_average(&history, day(20), 9, 0).is_empty());
    }

    #[test]
    fn test_equal_counts_order_by_name() {
        let history = OrderHistory::new(
            "Chennai",
            vec![order("Vada", day(9), 9), order("Idli", day(9), 9)],
        );
        let names: Vec<String> = rolling_average(&history, day(10), 9, 3)
            .into_iter()
            .map(|e| e.food_item_name)
            .collect();
        assert_eq!(names, vec!["Idli", "Vada"]);
    }

    #[test]
    fn test_oversized_window_counts_all_history() {
        let history = OrderHistory::new(
            "Chennai",
            vec![
                order("Dosa", day(1), 9),
                order("Dosa", NaiveDate::from_ymd_opt(1900, 1, 1).unwrap(), 9),
            ],
        );
        let ranking = rolling_average(&history, day(2), 9, u32::MAX);
        assert_eq!(ranking.len(), 1);
        assert_eq!(ranking[0].rolling_avg_orders, 2);
    }
}
