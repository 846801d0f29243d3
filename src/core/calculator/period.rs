//! Folds day calculations into weekly and period totals plus the consolidated
//! exception list.

use super::day::calculate_day;
use super::week::week_label;
use crate::models::calculation::{
    ExceptionCode, Severity, TimesheetComputed, TimesheetException, WeeklyTotals,
};
use crate::models::entry::DayEntry;
use crate::models::rules::RuleConfiguration;
use crate::models::totals::TimesheetTotals;
use chrono::NaiveDate;
use std::collections::BTreeMap;

pub fn calculate_period(
    entries: &[DayEntry],
    rules: &RuleConfiguration,
    as_of: Option<NaiveDate>,
) -> TimesheetComputed {
    let mut out = TimesheetComputed::default();
    let mut weekly: BTreeMap<String, TimesheetTotals> = BTreeMap::new();

    for entry in entries {
        let result = calculate_day(entry, rules, as_of);
        let day_totals = result.totals();

        out.period_totals += day_totals;
        *weekly.entry(week_label(entry.date)).or_default() += day_totals;

        for code in &result.blocking_errors {
            out.has_blocking_errors = true;
            out.exceptions.push(TimesheetException {
                code: ExceptionCode::Validation(*code),
                severity: Severity::Error,
                message: code.as_str().to_string(),
                date: Some(entry.date),
            });
        }

        for code in &result.warnings {
            out.exceptions.push(TimesheetException {
                code: ExceptionCode::Validation(*code),
                severity: Severity::Warning,
                message: code.as_str().to_string(),
                date: Some(entry.date),
            });
        }

        if result.overtime_minutes > 0 {
            out.requires_manager_approval = true;
            out.exceptions.push(TimesheetException {
                code: ExceptionCode::OtApprovalRequired,
                severity: Severity::Warning,
                message: "Overtime requires manager approval".to_string(),
                date: Some(entry.date),
            });
        }

        if result.ph_worked_minutes > 0 {
            out.requires_manager_approval = true;
            out.exceptions.push(TimesheetException {
                code: ExceptionCode::PhWorkedApprovalRequired,
                severity: Severity::Warning,
                message: "Public holiday worked requires manager approval".to_string(),
                date: Some(entry.date),
            });
        }

        out.by_date.insert(entry.date, result);
    }

    // BTreeMap iteration is lexicographic, which is chronological for this key format
    out.weekly = weekly
        .into_iter()
        .map(|(week_label, totals)| WeeklyTotals { week_label, totals })
        .collect();

    out
}
