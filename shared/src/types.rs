//! Common types used across the platform

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of days the weather provider can forecast ahead (inclusive of today)
pub const MAX_LOOKAHEAD_DAYS: i64 = 14;

/// Default trailing window for the rolling-average baseline
pub const DEFAULT_ROLLING_WINDOW_DAYS: u32 = 3;

/// Order fulfillment mode
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Channel {
    #[serde(rename = "Dine In")]
    DineIn,
    #[serde(rename = "Take Away")]
    TakeAway,
}

impl Channel {
    /// Every channel, in the order scenarios are emitted
    pub const ALL: [Channel; 2] = [Channel::DineIn, Channel::TakeAway];

    /// Label used in the order history and in training-time column names
    pub fn label(&self) -> &'static str {
        match self {
            Channel::DineIn => "Dine In",
            Channel::TakeAway => "Take Away",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Channel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dine in" | "dinein" | "dine_in" => Ok(Channel::DineIn),
            "take away" | "takeaway" | "take_away" => Ok(Channel::TakeAway),
            other => Err(format!("Unknown order channel: {}", other)),
        }
    }
}

/// Weekday/weekend classification of a date
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum DayType {
    Weekday,
    Weekend,
}

impl DayType {
    pub fn label(&self) -> &'static str {
        match self {
            DayType::Weekday => "Weekday",
            DayType::Weekend => "Weekend",
        }
    }
}

impl fmt::Display for DayType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_parsing_accepts_common_spellings() {
        assert_eq!("Dine In".parse::<Channel>(), Ok(Channel::DineIn));
        assert_eq!("take_away".parse::<Channel>(), Ok(Channel::TakeAway));
        assert_eq!(" TakeAway ".parse::<Channel>(), Ok(Channel::TakeAway));
        assert!("delivery".parse::<Channel>().is_err());
    }

    #[test]
    fn test_channel_serializes_with_history_labels() {
        let json = serde_json::to_string(&Channel::DineIn).unwrap();
        assert_eq!(json, "\"Dine In\"");
    }
}
