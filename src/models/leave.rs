use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannedLeave {
    pub id: String,
    pub date: NaiveDate,
    pub hours: f64,
    #[serde(default)]
    pub note: String,
}

/// Remaining-balance report for one year. Derived, not stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeaveSummary {
    pub year: i32,
    pub entitlement_hours: f64,
    pub taken_hours: f64,
    pub planned_hours: f64,
    pub remaining_after_taken: f64,
    pub remaining_after_planned: f64,
}
