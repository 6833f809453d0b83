//! Scenario enumeration

use crate::calendar::CalendarContext;
use crate::models::{OrderHistory, Scenario, ScenarioContext, WeatherSnapshot};
use crate::types::Channel;

/// Expand every (item, category) pair seen in `history` into one scenario per
/// channel. Items never ordered historically get no scenario.
pub fn build_scenarios(
    history: &OrderHistory,
    calendar: &CalendarContext,
    weather: &WeatherSnapshot,
    is_special_event: bool,
    target_hour: u32,
) -> Vec<Scenario> {
    let context = ScenarioContext {
        hour: target_hour,
        calendar: calendar.clone(),
        weather: weather.clone(),
        is_special_event,
    };

    history
        .distinct_items()
        .into_iter()
        .flat_map(|(name, category)| {
            let context = &context;
            Channel::ALL.into_iter().map(move |channel| Scenario {
                food_item_name: name.to_string(),
                food_item_category: category.to_string(),
                channel,
                context: context.clone(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forecast::test_support::{history, snapshot};
    use chrono::NaiveDate;

    #[test]
    fn test_two_scenarios_per_item() {
        let history = history(&[("A", "Mains", 12), ("B", "Drinks", 12), ("A", "Mains", 13)]);
        let calendar = CalendarContext::without_holidays(NaiveDate::from_ymd_opt(2024, 3, 2).unwrap());
        let scenarios = build_scenarios(&history, &calendar, &snapshot(), true, 12);

        assert_eq!(scenarios.len(), 4);
        for item in ["A", "B"] {
            let channels: Vec<Channel> = scenarios
                .iter()
                .filter(|s| s.food_item_name == item)
                .map(|s| s.channel)
                .collect();
            assert_eq!(channels, vec![Channel::DineIn, Channel::TakeAway]);
        }
    }

    #[test]
    fn test_scenarios_share_context() {
        let history = history(&[("A", "Mains", 9)]);
        let calendar = CalendarContext::without_holidays(NaiveDate::from_ymd_opt(2024, 3, 4).unwrap());
        let scenarios = build_scenarios(&history, &calendar, &snapshot(), false, 18);

        assert_eq!(scenarios[0].context, scenarios[1].context);
        assert_eq!(scenarios[0].context.hour, 18);
        assert!(!scenarios[0].context.is_special_event);
    }

    #[test]
    fn test_empty_history_has_no_scenarios() {
        let history = history(&[]);
        let calendar = CalendarContext::without_holidays(NaiveDate::from_ymd_opt(2024, 3, 4).unwrap());
        assert!(build_scenarios(&history, &calendar, &snapshot(), false, 12).is_empty());
    }
}
