use crate::models::absence::AbsenceCode;
use crate::models::leave::{LeaveSummary, PlannedLeave};
use crate::models::period::PeriodState;
use crate::models::rules::RuleConfiguration;
use chrono::Datelike;

/// Remaining annual leave for `year`: a fixed entitlement minus the AL days
/// already booked on timesheets and the planned leave of that year.
/// No accrual, no carry-over.
pub fn leave_summary(
    year: i32,
    entitlement_hours: f64,
    periods: &[PeriodState],
    planned: &[PlannedLeave],
    rules: &RuleConfiguration,
) -> LeaveSummary {
    let al_days = periods
        .iter()
        .flat_map(|p| p.day_entries.iter())
        .filter(|e| e.date.year() == year)
        .filter(|e| AbsenceCode::from_code(e.absence_code.trim()) == Some(AbsenceCode::AnnualLeave))
        .count();

    let taken_hours = al_days as f64 * rules.leave_default_paid_minutes as f64 / 60.0;

    let planned_hours: f64 = planned
        .iter()
        .filter(|l| l.date.year() == year && l.hours.is_finite())
        .map(|l| l.hours)
        .sum();

    let remaining_after_taken = entitlement_hours - taken_hours;

    LeaveSummary {
        year,
        entitlement_hours,
        taken_hours,
        planned_hours,
        remaining_after_taken,
        remaining_after_planned: remaining_after_taken - planned_hours,
    }
}
