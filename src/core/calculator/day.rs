//! Per-day minute calculation and content validation.
//!
//! The checks run in a fixed order and later checks rely on the earlier ones.
//! Nothing here fails: every problem is reported as a `ValidationCode` and a
//! blocked day contributes zero minutes.

use crate::models::absence::AbsenceCode;
use crate::models::calculation::{DayCalculation, ValidationCode};
use crate::models::day_type::DayType;
use crate::models::entry::DayEntry;
use crate::models::rules::RuleConfiguration;
use chrono::NaiveDate;

/// Upper bound of plausible work in one day.
pub const MAX_WORKED_MINUTES: i64 = 16 * 60;

/// Rounded worked minutes of a day (sum of project hours × 60).
pub fn worked_minutes(entry: &DayEntry) -> i64 {
    (entry.worked_hours() * 60.0).round() as i64
}

fn blocked(errors: Vec<ValidationCode>) -> DayCalculation {
    DayCalculation {
        blocking_errors: errors,
        ..DayCalculation::default()
    }
}

/// Calculate one day.
///
/// `as_of` is the reference "today": an empty day strictly after it is not
/// yet due and raises nothing. With `None` every day is considered due.
pub fn calculate_day(
    entry: &DayEntry,
    rules: &RuleConfiguration,
    as_of: Option<NaiveDate>,
) -> DayCalculation {
    let mut errors: Vec<ValidationCode> = Vec::new();

    let code = entry.absence_code.trim();
    let has_absence = !code.is_empty();
    let absence = AbsenceCode::from_code(code);

    // 1. absence code must be known
    if has_absence && absence.is_none() {
        errors.push(ValidationCode::InvalidAbsenceCode);
    }

    // 2. no negative project hours
    if entry.project_lines.iter().any(|l| l.hours < 0.0) {
        errors.push(ValidationCode::NegativeTotals);
    }

    // 3.
    let worked = worked_minutes(entry);

    // 4. absence and hours are exclusive
    if has_absence && worked > 0 {
        errors.push(ValidationCode::CodeHoursConflict);
    }

    // 5.
    if worked > MAX_WORKED_MINUTES {
        errors.push(ValidationCode::ImpossibleHours);
    }

    // 6. absence path
    if has_absence {
        if !errors.is_empty() {
            return blocked(errors);
        }

        if entry.day_type == DayType::PublicHoliday && absence != Some(AbsenceCode::PublicHoliday) {
            errors.push(ValidationCode::PhCodeRequired);
            return blocked(errors);
        }

        let leave_minutes = match absence {
            Some(a) if a.is_paid() => rules.leave_default_paid_minutes,
            _ => 0,
        };

        return DayCalculation {
            leave_minutes,
            ..DayCalculation::default()
        };
    }

    // 7. nothing recorded
    if worked == 0 {
        let not_yet_due = as_of.is_some_and(|today| entry.date > today);

        if !not_yet_due {
            if entry.day_type == DayType::PublicHoliday {
                errors.push(ValidationCode::PhCodeRequired);
            } else {
                errors.push(ValidationCode::MissingEntryDay);
            }
        }

        return blocked(errors);
    }

    // 8. worked lines need a description
    if worked > 0
        && entry
            .project_lines
            .iter()
            .any(|l| l.hours > 0.0 && l.description.trim().is_empty())
    {
        errors.push(ValidationCode::ProjectDescriptionRequired);
    }

    // 9.
    if !errors.is_empty() {
        return blocked(errors);
    }

    // 10. bucket assignment
    assign_buckets(entry.day_type, worked, rules)
}

fn assign_buckets(day_type: DayType, worked: i64, rules: &RuleConfiguration) -> DayCalculation {
    match day_type {
        DayType::PublicHoliday => DayCalculation {
            ph_worked_minutes: worked,
            ..DayCalculation::default()
        },
        DayType::Weekend => DayCalculation {
            overtime_minutes: worked,
            ..DayCalculation::default()
        },
        DayType::EarlyKnockOff if rules.early_knock_off_paid_as_full_day => DayCalculation {
            normal_minutes: rules.full_day_minutes,
            overtime_minutes: (worked - rules.full_day_minutes).max(0),
            ..DayCalculation::default()
        },
        DayType::FridayShortDay | DayType::EarlyKnockOff | DayType::Workday => {
            let normal_cap = if day_type == DayType::FridayShortDay {
                rules.friday_short_day_minutes
            } else {
                rules.full_day_minutes
            };

            DayCalculation {
                normal_minutes: worked.min(normal_cap),
                overtime_minutes: (worked - normal_cap).max(0),
                ..DayCalculation::default()
            }
        }
    }
}
