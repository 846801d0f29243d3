use crate::models::day_type::DayType;
use crate::models::period::is_weekend;
use crate::models::rules::RuleConfiguration;
use chrono::{Datelike, NaiveDate, Weekday};

/// Classify a calendar date. First match wins:
/// public holiday, weekend, early knock-off, Friday, workday.
pub fn classify_day(date: NaiveDate, rules: &RuleConfiguration) -> DayType {
    if rules.is_public_holiday(date) {
        return DayType::PublicHoliday;
    }

    if is_weekend(date) {
        return DayType::Weekend;
    }

    if rules.is_early_knock_off(date) {
        return DayType::EarlyKnockOff;
    }

    if date.weekday() == Weekday::Fri {
        return DayType::FridayShortDay;
    }

    DayType::Workday
}
