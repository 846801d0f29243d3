//! Derived, ephemeral results of the rules engine. Recomputed on every read.

use super::totals::TimesheetTotals;
use chrono::NaiveDate;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;

/// Content validation outcome of one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationCode {
    InvalidAbsenceCode,
    NegativeTotals,
    CodeHoursConflict,
    ImpossibleHours,
    PhCodeRequired,
    MissingEntryDay,
    ProjectDescriptionRequired,
}

impl ValidationCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValidationCode::InvalidAbsenceCode => "INVALID_ABSENCE_CODE",
            ValidationCode::NegativeTotals => "NEGATIVE_TOTALS",
            ValidationCode::CodeHoursConflict => "CODE_HOURS_CONFLICT",
            ValidationCode::ImpossibleHours => "IMPOSSIBLE_HOURS",
            ValidationCode::PhCodeRequired => "PH_CODE_REQUIRED",
            ValidationCode::MissingEntryDay => "MISSING_ENTRY_DAY",
            ValidationCode::ProjectDescriptionRequired => "PROJECT_DESCRIPTION_REQUIRED",
        }
    }
}

impl Serialize for ValidationCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DayCalculation {
    pub normal_minutes: i64,
    pub overtime_minutes: i64,
    pub ph_worked_minutes: i64,
    pub leave_minutes: i64,
    pub blocking_errors: Vec<ValidationCode>,
    pub warnings: Vec<ValidationCode>,
}

impl DayCalculation {
    pub fn totals(&self) -> TimesheetTotals {
        TimesheetTotals::from_buckets(
            self.normal_minutes,
            self.overtime_minutes,
            self.ph_worked_minutes,
            self.leave_minutes,
        )
    }

    pub fn is_blocked(&self) -> bool {
        !self.blocking_errors.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    Error,
    Warning,
}

/// Period-level exception codes: every day validation code plus the
/// synthetic approval-required markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExceptionCode {
    Validation(ValidationCode),
    OtApprovalRequired,
    PhWorkedApprovalRequired,
}

impl ExceptionCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExceptionCode::Validation(code) => code.as_str(),
            ExceptionCode::OtApprovalRequired => "OT_APPROVAL_REQUIRED",
            ExceptionCode::PhWorkedApprovalRequired => "PH_WORKED_APPROVAL_REQUIRED",
        }
    }
}

impl Serialize for ExceptionCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimesheetException {
    pub code: ExceptionCode,
    pub severity: Severity,
    pub message: String,
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeeklyTotals {
    pub week_label: String,
    pub totals: TimesheetTotals,
}

/// Aggregated view of a whole period.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TimesheetComputed {
    pub by_date: BTreeMap<NaiveDate, DayCalculation>,
    pub weekly: Vec<WeeklyTotals>,
    pub period_totals: TimesheetTotals,
    pub has_blocking_errors: bool,
    pub requires_manager_approval: bool,
    pub exceptions: Vec<TimesheetException>,
}
