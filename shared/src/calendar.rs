//! Calendar context for a forecast date
//!
//! Day-of-week, weekday/weekend classification and public holiday membership.
//! Pure lookups; the holiday set is reference data loaded by the caller.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::types::DayType;

/// Public holidays for one country and administrative region
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HolidayCalendar {
    pub country: String,
    pub region: String,
    holidays: BTreeMap<NaiveDate, String>,
}

impl HolidayCalendar {
    pub fn new(
        country: impl Into<String>,
        region: impl Into<String>,
        holidays: impl IntoIterator<Item = (NaiveDate, String)>,
    ) -> Self {
        Self {
            country: country.into(),
            region: region.into(),
            holidays: holidays.into_iter().collect(),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.holidays.contains_key(&date)
    }

    /// Holiday name, if the date is a holiday
    pub fn name_of(&self, date: NaiveDate) -> Option<&str> {
        self.holidays.get(&date).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.holidays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.holidays.is_empty()
    }
}

/// Calendar features of a target date
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CalendarContext {
    pub date: NaiveDate,
    /// Full English day name, e.g. "Saturday"
    pub day_of_week: String,
    pub day_type: DayType,
    pub is_holiday: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub holiday_name: Option<String>,
}

impl CalendarContext {
    /// Resolve the calendar context of `date` against a holiday calendar
    pub fn resolve(date: NaiveDate, holidays: &HolidayCalendar) -> Self {
        let mut context = Self::without_holidays(date);
        context.holiday_name = holidays.name_of(date).map(str::to_string);
        context.is_holiday = context.holiday_name.is_some();
        context
    }

    /// Resolve day-of-week and day type only
    pub fn without_holidays(date: NaiveDate) -> Self {
        Self {
            date,
            day_of_week: date.format("%A").to_string(),
            day_type: day_type(date.weekday()),
            is_holiday: false,
            holiday_name: None,
        }
    }
}

/// Saturday and Sunday are weekend days
pub fn day_type(weekday: Weekday) -> DayType {
    match weekday {
        Weekday::Sat | Weekday::Sun => DayType::Weekend,
        _ => DayType::Weekday,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn pongal() -> HolidayCalendar {
        HolidayCalendar::new(
            "IN",
            "TN",
            vec![(date(2024, 1, 15), "Pongal".to_string())],
        )
    }

    #[test]
    fn test_weekend_classification() {
        // 2024-03-02 is a Saturday, 2024-03-04 a Monday
        let saturday = CalendarContext::resolve(date(2024, 3, 2), &pongal());
        assert_eq!(saturday.day_of_week, "Saturday");
        assert_eq!(saturday.day_type, DayType::Weekend);

        let monday = CalendarContext::resolve(date(2024, 3, 4), &pongal());
        assert_eq!(monday.day_of_week, "Monday");
        assert_eq!(monday.day_type, DayType::Weekday);
    }

    #[test]
    fn test_sunday_is_weekend() {
        assert_eq!(day_type(Weekday::Sun), DayType::Weekend);
        assert_eq!(day_type(Weekday::Fri), DayType::Weekday);
    }

    #[test]
    fn test_holiday_membership() {
        let calendar = pongal();
        let pongal_day = CalendarContext::resolve(date(2024, 1, 15), &calendar);
        assert!(pongal_day.is_holiday);
        assert_eq!(pongal_day.holiday_name.as_deref(), Some("Pongal"));
        assert_eq!(CalendarContext::resolve(date(2024, 1, 16), &calendar).holiday_name, None);
        assert!(!CalendarContext::resolve(date(2024, 1, 16), &calendar).is_holiday);
        assert_eq!(calendar.name_of(date(2024, 1, 15)), Some("Pongal"));
    }

    #[test]
    fn test_without_holidays_never_flags_holiday() {
        assert!(!CalendarContext::without_holidays(date(2024, 1, 15)).is_holiday);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Day type and holiday flag agree with the date for any day in range
            #[test]
            fn prop_context_matches_date(offset in 0i64..3650) {
                let day = date(2020, 1, 1) + chrono::Duration::days(offset);
                let context = CalendarContext::resolve(day, &pongal());

                let weekend = matches!(day.weekday(), Weekday::Sat | Weekday::Sun);
                prop_assert_eq!(context.day_type == DayType::Weekend, weekend);
                prop_assert_eq!(context.is_holiday, day == date(2024, 1, 15));
                prop_assert_eq!(context.date, day);
            }
        }
    }
}
