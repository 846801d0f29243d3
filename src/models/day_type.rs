use serde::{Deserialize, Serialize};

/// Calendar classification of a single day.
/// Always derived from the date plus the active rules, never edited directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DayType {
    Workday,
    FridayShortDay,
    EarlyKnockOff,
    PublicHoliday,
    Weekend,
}

impl DayType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DayType::Workday => "WORKDAY",
            DayType::FridayShortDay => "FRIDAY_SHORT_DAY",
            DayType::EarlyKnockOff => "EARLY_KNOCK_OFF",
            DayType::PublicHoliday => "PUBLIC_HOLIDAY",
            DayType::Weekend => "WEEKEND",
        }
    }

    /// Short label for table output.
    pub fn short(&self) -> &'static str {
        match self {
            DayType::Workday => "WD",
            DayType::FridayShortDay => "FRI",
            DayType::EarlyKnockOff => "EKO",
            DayType::PublicHoliday => "PH",
            DayType::Weekend => "WE",
        }
    }
}
