//! Default day-entry set of a freshly created period, and normalization of
//! states read back from storage.

use crate::core::calculator::classify_day;
use crate::models::absence::AbsenceCode;
use crate::models::day_type::DayType;
use crate::models::entry::{DayEntry, ProjectLine};
use crate::models::period::{PeriodKey, PeriodState, is_weekend};
use crate::models::rules::RuleConfiguration;
use crate::models::status::WorkflowStatus;
use chrono::NaiveDate;

fn cap_hours(day_type: DayType, rules: &RuleConfiguration) -> f64 {
    let minutes = match day_type {
        DayType::FridayShortDay => rules.friday_short_day_minutes,
        _ => rules.full_day_minutes,
    };
    minutes as f64 / 60.0
}

fn default_entry(
    date: NaiveDate,
    rules: &RuleConfiguration,
    as_of: Option<NaiveDate>,
    description: &str,
) -> DayEntry {
    let day_type = classify_day(date, rules);
    let mut entry = DayEntry {
        date,
        day_type,
        project_lines: Vec::new(),
        absence_code: String::new(),
        notes: String::new(),
    };

    if day_type == DayType::PublicHoliday {
        entry.absence_code = AbsenceCode::PublicHoliday.code().to_string();
        entry.notes = AbsenceCode::PublicHoliday.describe().to_string();
        return entry;
    }

    let due = as_of.is_none_or(|today| date <= today);
    let id = entry.next_line_id();
    entry.project_lines.push(if due {
        ProjectLine::new(id, description, cap_hours(day_type, rules))
    } else {
        ProjectLine::new(id, "", 0.0)
    });

    entry
}

/// Business days of `key`, pre-filled: past and current days carry one line
/// at the normal cap, future days one empty line, public holidays `PH`.
pub fn build_period(
    key: &PeriodKey,
    rules: &RuleConfiguration,
    as_of: Option<NaiveDate>,
    description: &str,
) -> PeriodState {
    PeriodState {
        status: WorkflowStatus::Draft,
        revision_no: 1,
        day_entries: key
            .business_days()
            .into_iter()
            .map(|d| default_entry(d, rules, as_of, description))
            .collect(),
        approval_events: Vec::new(),
        export_batches: Vec::new(),
        manager_note: String::new(),
        employee_signature: None,
        manager_signature: None,
    }
}

/// Bring a stored state in line with the current rules:
/// weekend and out-of-period entries dropped, entries sorted, day types
/// re-derived, signatures of another revision discarded.
pub fn normalize(key: &PeriodKey, state: &mut PeriodState, rules: &RuleConfiguration) {
    state
        .day_entries
        .retain(|e| key.contains(e.date) && !is_weekend(e.date));
    state.day_entries.sort_by_key(|e| e.date);
    state.day_entries.dedup_by_key(|e| e.date);

    for entry in &mut state.day_entries {
        entry.day_type = classify_day(entry.date, rules);
    }

    if !state.has_current_employee_signature() {
        state.employee_signature = None;
    }
    if !state.has_current_manager_signature() {
        state.manager_signature = None;
    }
}
