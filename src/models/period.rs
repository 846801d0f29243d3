//! Period key and the persisted state of one period.

use super::entry::DayEntry;
use super::signature::ElectronicSignature;
use super::status::WorkflowStatus;
use crate::errors::AppError;
use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifies one assignable period (a calendar month), rendered `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PeriodKey {
    year: i32,
    month: u32,
}

impl PeriodKey {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|_| Self { year, month })
    }

    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// `YYYYMM`, used in batch ids.
    pub fn compact(&self) -> String {
        format!("{:04}{:02}", self.year, self.month)
    }

    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    /// Every calendar day of the month.
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.first_day()
            .iter_days()
            .take_while(|d| d.month() == self.month)
            .collect()
    }

    /// Monday–Friday only.
    pub fn business_days(&self) -> Vec<NaiveDate> {
        self.dates()
            .into_iter()
            .filter(|d| !is_weekend(*d))
            .collect()
    }
}

pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

impl fmt::Display for PeriodKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for PeriodKey {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (y, m) = s
            .split_once('-')
            .ok_or_else(|| AppError::InvalidPeriod(s.to_string()))?;

        if y.len() != 4 || m.len() != 2 {
            return Err(AppError::InvalidPeriod(s.to_string()));
        }

        let year: i32 = y.parse().map_err(|_| AppError::InvalidPeriod(s.to_string()))?;
        let month: u32 = m.parse().map_err(|_| AppError::InvalidPeriod(s.to_string()))?;

        PeriodKey::new(year, month).ok_or_else(|| AppError::InvalidPeriod(s.to_string()))
    }
}

impl TryFrom<String> for PeriodKey {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PeriodKey> for String {
    fn from(value: PeriodKey) -> Self {
        value.to_string()
    }
}

/// Immutable audit-trail entry of the approval workflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApprovalEvent {
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub actor: String,
    pub action: ApprovalAction,
    pub note: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApprovalAction {
    EmployeeESign,
    ManagerESign,
    Submit,
    ManagerApprove,
    ManagerReject,
    PayrollValidate,
    Lock,
    ExportBatch,
}

impl ApprovalAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApprovalAction::EmployeeESign => "EMPLOYEE_E_SIGN",
            ApprovalAction::ManagerESign => "MANAGER_E_SIGN",
            ApprovalAction::Submit => "SUBMIT",
            ApprovalAction::ManagerApprove => "MANAGER_APPROVE",
            ApprovalAction::ManagerReject => "MANAGER_REJECT",
            ApprovalAction::PayrollValidate => "PAYROLL_VALIDATE",
            ApprovalAction::Lock => "LOCK",
            ApprovalAction::ExportBatch => "EXPORT_BATCH",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportBatch {
    pub batch_id: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub line_count: usize,
    pub checksum: String,
}

/// Full persisted state of one period. Never deleted; only appended to and
/// moved through the workflow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodState {
    pub status: WorkflowStatus,
    pub revision_no: u32,
    pub day_entries: Vec<DayEntry>,
    #[serde(default)]
    pub approval_events: Vec<ApprovalEvent>,
    /// Newest first.
    #[serde(default)]
    pub export_batches: Vec<ExportBatch>,
    #[serde(default)]
    pub manager_note: String,
    #[serde(default)]
    pub employee_signature: Option<ElectronicSignature>,
    #[serde(default)]
    pub manager_signature: Option<ElectronicSignature>,
}

impl PeriodState {
    pub fn entry(&self, date: NaiveDate) -> Option<&DayEntry> {
        self.day_entries.iter().find(|e| e.date == date)
    }

    pub fn entry_mut(&mut self, date: NaiveDate) -> Option<&mut DayEntry> {
        self.day_entries.iter_mut().find(|e| e.date == date)
    }

    pub fn has_current_employee_signature(&self) -> bool {
        self.employee_signature
            .as_ref()
            .is_some_and(|s| s.is_current(self.revision_no))
    }

    pub fn has_current_manager_signature(&self) -> bool {
        self.manager_signature
            .as_ref()
            .is_some_and(|s| s.is_current(self.revision_no))
    }

    pub fn clear_signatures(&mut self) {
        self.employee_signature = None;
        self.manager_signature = None;
    }

    /// Number of days that produce a payroll line.
    pub fn reportable_lines(&self) -> usize {
        self.day_entries.iter().filter(|e| e.is_reportable()).count()
    }
}
