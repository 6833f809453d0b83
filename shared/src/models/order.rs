//! Order history models

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};

use crate::types::Channel;

/// One historical order line
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderRecord {
    pub food_item_name: String,
    pub food_item_category: String,
    pub date: NaiveDate,
    pub hour: u32,
    /// Unknown when the source dataset has no channel column
    #[serde(default, rename = "order_type", skip_serializing_if = "Option::is_none")]
    pub channel: Option<Channel>,
}

/// Historical orders for a single restaurant location
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderHistory {
    pub location: String,
    pub records: Vec<OrderRecord>,
}

impl OrderHistory {
    pub fn new(location: impl Into<String>, records: Vec<OrderRecord>) -> Self {
        Self {
            location: location.into(),
            records,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Distinct hours present in the dataset, ascending.
    /// These are the hours offered for selection.
    pub fn hours(&self) -> Vec<u32> {
        self.records
            .iter()
            .map(|r| r.hour)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Distinct (item, category) pairs in order of first appearance
    pub fn distinct_items(&self) -> Vec<(&str, &str)> {
        let mut seen = HashSet::new();
        self.records
            .iter()
            .map(|r| (r.food_item_name.as_str(), r.food_item_category.as_str()))
            .filter(|pair| seen.insert(*pair))
            .collect()
    }
}

/// Summary of a loaded dataset for the selection surface
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistorySummary {
    pub location: String,
    pub record_count: usize,
    pub item_count: usize,
    pub hours: Vec<u32>,
}

impl From<&OrderHistory> for HistorySummary {
    fn from(history: &OrderHistory) -> Self {
        Self {
            location: history.location.clone(),
            record_count: history.len(),
            item_count: history.distinct_items().len(),
            hours: history.hours(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, category: &str, hour: u32) -> OrderRecord {
        OrderRecord {
            food_item_name: name.to_string(),
            food_item_category: category.to_string(),
            date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            hour,
            channel: None,
        }
    }

    #[test]
    fn test_hours_are_sorted_and_distinct() {
        let history = OrderHistory::new(
            "Chennai",
            vec![record("Dosa", "Breakfast", 9), record("Idli", "Breakfast", 8), record("Dosa", "Breakfast", 9)],
        );
        assert_eq!(history.hours(), vec![8, 9]);
    }

    #[test]
    fn test_distinct_items_keeps_first_appearance() {
        let history = OrderHistory::new(
            "Chennai",
            vec![
                record("Vada", "Snacks", 16),
                record("Dosa", "Breakfast", 9),
                record("Vada", "Snacks", 17),
            ],
        );
        assert_eq!(
            history.distinct_items(),
            vec![("Vada", "Snacks"), ("Dosa", "Breakfast")]
        );
    }

    #[test]
    fn test_summary_counts() {
        let history = OrderHistory::new(
            "Chennai",
            vec![record("Vada", "Snacks", 16), record("Vada", "Snacks", 16)],
        );
        let summary = HistorySummary::from(&history);
        assert_eq!(summary.record_count, 2);
        assert_eq!(summary.item_count, 1);
        assert_eq!(summary.hours, vec![16]);
    }
}
