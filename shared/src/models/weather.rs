//! Weather data models

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Forecast conditions for one hour of one day at one location
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeatherSnapshot {
    /// Provider-local time of the slot, e.g. "2024-03-02 12:00"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    pub temp_c: Decimal,
    pub precip_mm: Decimal,
    pub wind_kph: Decimal,
    pub cloud: Decimal,
    pub humidity: Decimal,
    pub pressure_mb: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
}

impl WeatherSnapshot {
    /// Numeric features in model units, keyed by training-time column name
    pub fn features(&self) -> [(&'static str, f64); 6] {
        [
            ("temperature_c", as_f64(self.temp_c)),
            ("wind_kph", as_f64(self.wind_kph)),
            ("precipitation_mm", as_f64(self.precip_mm)),
            ("cloud", as_f64(self.cloud)),
            ("humidity", as_f64(self.humidity)),
            ("pressure_mb", as_f64(self.pressure_mb)),
        ]
    }
}

fn as_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or(0.0)
}
