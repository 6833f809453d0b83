//! Feature encoding and schema alignment
//!
//! Each scenario is encoded into named features: numeric context columns plus
//! one-hot indicator columns of the form `<field>_<value>`. The encoded rows
//! are then projected onto the fixed, ordered column list the scoring model
//! was trained on. Column identity decides placement; a column the model
//! expects but the batch never produced stays zero, and a produced column the
//! model does not know is dropped.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

use crate::models::Scenario;

/// Categorical fields expanded into indicator columns
pub const CATEGORICAL_PREFIXES: [&str; 5] = [
    "food_item_name",
    "food_item_category",
    "day_of_the_week",
    "day_type",
    "order_type",
];

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("Feature schema has no columns")]
    Empty,

    #[error("Duplicate feature column: {0}")]
    DuplicateColumn(String),
}

/// Ordered column list expected by the scoring model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureSchema {
    columns: Vec<String>,
    index: HashMap<String, usize>,
}

impl FeatureSchema {
    pub fn new(columns: Vec<String>) -> Result<Self, SchemaError> {
        if columns.is_empty() {
            return Err(SchemaError::Empty);
        }

        let mut index = HashMap::with_capacity(columns.len());
        for (position, column) in columns.iter().enumerate() {
            if index.insert(column.clone(), position).is_some() {
                return Err(SchemaError::DuplicateColumn(column.clone()));
            }
        }

        Ok(Self { columns, index })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Position of a column, if the model knows it
    pub fn position(&self, column: &str) -> Option<usize> {
        self.index.get(column).copied()
    }

    /// Project encoded rows onto this schema
    pub fn align(&self, rows: &[EncodedRow]) -> Alignment {
        let mut values = vec![0.0; rows.len() * self.columns.len()];
        let mut dropped: Vec<String> = Vec::new();

        for (row_index, row) in rows.iter().enumerate() {
            let offset = row_index * self.columns.len();
            for (name, value) in &row.features {
                match self.position(name) {
                    Some(position) => values[offset + position] = *value,
                    None => {
                        if !dropped.contains(name) {
                            dropped.push(name.clone());
                        }
                    }
                }
            }
        }

        Alignment {
            matrix: FeatureMatrix {
                width: self.columns.len(),
                values,
            },
            dropped_columns: dropped,
        }
    }

    /// Encode and align a scenario batch in one step
    pub fn align_scenarios(&self, scenarios: &[Scenario]) -> Alignment {
        let rows: Vec<EncodedRow> = scenarios.iter().map(encode_scenario).collect();
        self.align(&rows)
    }
}

impl Serialize for FeatureSchema {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.columns.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for FeatureSchema {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let columns = Vec::<String>::deserialize(deserializer)?;
        FeatureSchema::new(columns).map_err(serde::de::Error::custom)
    }
}

/// Named features of a single scenario, in production order
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedRow {
    pub features: Vec<(String, f64)>,
}

/// Dense row-major matrix in schema column order
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureMatrix {
    width: usize,
    values: Vec<f64>,
}

impl FeatureMatrix {
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn rows(&self) -> usize {
        if self.width == 0 {
            0
        } else {
            self.values.len() / self.width
        }
    }

    pub fn row(&self, index: usize) -> &[f64] {
        let start = index * self.width;
        &self.values[start..start + self.width]
    }

    pub fn iter_rows(&self) -> impl Iterator<Item = &[f64]> {
        self.values.chunks(self.width.max(1))
    }
}

/// Result of aligning a batch
#[derive(Debug, Clone, PartialEq)]
pub struct Alignment {
    pub matrix: FeatureMatrix,
    /// Produced columns unknown to the schema, first occurrence order
    pub dropped_columns: Vec<String>,
}

/// Encode one scenario into named features
pub fn encode_scenario(scenario: &Scenario) -> EncodedRow {
    let context = &scenario.context;
    let mut features = Vec::with_capacity(9 + CATEGORICAL_PREFIXES.len());

    features.push(("hour".to_string(), context.hour as f64));
    features.extend(
        context
            .weather
            .features()
            .into_iter()
            .map(|(name, value)| (name.to_string(), value)),
    );
    features.push(("is_holiday".to_string(), flag(context.calendar.is_holiday)));
    features.push(("is_special_event".to_string(), flag(context.is_special_event)));

    let categories = [
        scenario.food_item_name.as_str(),
        scenario.food_item_category.as_str(),
        context.calendar.day_of_week.as_str(),
        context.calendar.day_type.label(),
        scenario.channel.label(),
    ];
    for (prefix, value) in CATEGORICAL_PREFIXES.iter().zip(categories) {
        features.push((indicator_column(prefix, value), 1.0));
    }

    EncodedRow { features }
}

/// Indicator column name for a categorical value
pub fn indicator_column(prefix: &str, value: &str) -> String {
    format!("{}_{}", prefix, value)
}

fn flag(value: bool) -> f64 {
    if value {
        1.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::CalendarContext;
    use crate::forecast::build_scenarios;
    use crate::forecast::test_support::{history, snapshot};
    use chrono::NaiveDate;

    fn schema(columns: &[&str]) -> FeatureSchema {
        FeatureSchema::new(columns.iter().map(|c| c.to_string()).collect()).unwrap()
    }

    fn scenarios() -> Vec<Scenario> {
        // 2024-03-02 is a Saturday
        let calendar = CalendarContext::without_holidays(NaiveDate::from_ymd_opt(2024, 3, 2).unwrap());
        build_scenarios(&history(&[("Dosa", "Breakfast", 9)]), &calendar, &snapshot(), true, 9)
    }

    #[test]
    fn test_schema_rejects_duplicates() {
        let result = FeatureSchema::new(vec!["hour".to_string(), "hour".to_string()]);
        assert_eq!(result, Err(SchemaError::DuplicateColumn("hour".to_string())));
    }

    #[test]
    fn test_schema_rejects_empty() {
        assert_eq!(FeatureSchema::new(vec![]), Err(SchemaError::Empty));
    }

    #[test]
    fn test_encoding_produces_indicator_columns() {
        let row = encode_scenario(&scenarios()[0]);
        let names: Vec<&str> = row.features.iter().map(|(n, _)| n.as_str()).collect();
        assert!(names.contains(&"food_item_name_Dosa"));
        assert!(names.contains(&"food_item_category_Breakfast"));
        assert!(names.contains(&"day_of_the_week_Saturday"));
        assert!(names.contains(&"day_type_Weekend"));
        assert!(names.contains(&"order_type_Dine In"));
        assert!(names.contains(&"is_special_event"));
    }

    #[test]
    fn test_alignment_follows_schema_order_and_zero_fills() {
        let schema = schema(&[
            "order_type_Take Away",
            "hour",
            "food_item_name_Idli",
            "order_type_Dine In",
            "is_special_event",
        ]);
        let alignment = schema.align_scenarios(&scenarios());

        assert_eq!(alignment.matrix.rows(), 2);
        assert_eq!(alignment.matrix.width(), 5);
        assert_eq!(alignment.matrix.row(0), &[0.0, 9.0, 0.0, 1.0, 1.0]);
        assert_eq!(alignment.matrix.row(1), &[1.0, 9.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_alignment_drops_unknown_columns() {
        let schema = schema(&["hour"]);
        let alignment = schema.align_scenarios(&scenarios());
        assert!(alignment.dropped_columns.contains(&"food_item_name_Dosa".to_string()));
        assert!(!alignment.dropped_columns.contains(&"hour".to_string()));
        // Each unknown column is reported once across the batch
        let dosa = alignment
            .dropped_columns
            .iter()
            .filter(|c| c.as_str() == "food_item_name_Dosa")
            .count();
        assert_eq!(dosa, 1);
    }

    #[test]
    fn test_alignment_of_empty_batch() {
        let alignment = schema(&["hour"]).align(&[]);
        assert_eq!(alignment.matrix.rows(), 0);
        assert_eq!(alignment.matrix.iter_rows().count(), 0);
    }

    #[test]
    fn test_schema_roundtrips_through_json_array() {
        let schema: FeatureSchema = serde_json::from_str(r#"["hour", "cloud"]"#).unwrap();
        assert_eq!(schema.position("cloud"), Some(1));
        assert!(serde_json::from_str::<FeatureSchema>(r#"["hour", "hour"]"#).is_err());
    }
}
