// src/export/model.rs

use crate::core::service::PeriodView;
use crate::models::period::ExportBatch;
use crate::models::totals::TimesheetTotals;
use crate::utils::formatting::{fmt_hours, mins2hours};
use serde::Serialize;

/// One payroll line: a day that carries hours or an absence.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct PayrollLine {
    pub date: String,
    pub day_type: String,
    pub normal_minutes: i64,
    pub overtime_minutes: i64,
    pub ph_worked_minutes: i64,
    pub leave_minutes: i64,
    pub paid_hours: String,
    pub absence_code: String,
    /// `description (hours)` of each line, `; `-separated.
    pub projects: String,
}

/// Whole export document: batch identity, period totals, lines.
#[derive(Serialize, Clone, Debug)]
pub struct PayrollExport {
    pub period: String,
    pub status: String,
    pub revision_no: u32,
    pub batch_id: String,
    pub checksum: String,
    pub created_at: String,
    pub totals: TimesheetTotals,
    pub lines: Vec<PayrollLine>,
}

pub(crate) fn get_headers() -> Vec<&'static str> {
    vec![
        "date",
        "day_type",
        "normal_minutes",
        "overtime_minutes",
        "ph_worked_minutes",
        "leave_minutes",
        "paid_hours",
        "absence_code",
        "projects",
    ]
}

pub(crate) fn line_to_row(l: &PayrollLine) -> Vec<String> {
    vec![
        l.date.clone(),
        l.day_type.clone(),
        l.normal_minutes.to_string(),
        l.overtime_minutes.to_string(),
        l.ph_worked_minutes.to_string(),
        l.leave_minutes.to_string(),
        l.paid_hours.clone(),
        l.absence_code.clone(),
        l.projects.clone(),
    ]
}

/// Build the export document of `view` for `batch`.
/// The number of lines equals the batch's line count.
pub fn payroll_export(view: &PeriodView, batch: &ExportBatch) -> PayrollExport {
    let lines = view
        .state
        .day_entries
        .iter()
        .filter(|e| e.is_reportable())
        .map(|e| {
            let calc = view.computed.by_date.get(&e.date).cloned().unwrap_or_default();
            let totals = calc.totals();

            let projects = e
                .project_lines
                .iter()
                .filter(|l| l.hours > 0.0)
                .map(|l| format!("{} ({})", l.description.trim(), fmt_hours(l.hours)))
                .collect::<Vec<_>>()
                .join("; ");

            PayrollLine {
                date: e.date_str(),
                day_type: e.day_type.as_str().to_string(),
                normal_minutes: totals.normal_minutes,
                overtime_minutes: totals.overtime_minutes,
                ph_worked_minutes: totals.ph_worked_minutes,
                leave_minutes: totals.leave_minutes,
                paid_hours: mins2hours(totals.paid_minutes),
                absence_code: e.absence_code.trim().to_string(),
                projects,
            }
        })
        .collect();

    PayrollExport {
        period: view.key.to_string(),
        status: view.state.status.as_str().to_string(),
        revision_no: view.state.revision_no,
        batch_id: batch.batch_id.clone(),
        checksum: batch.checksum.clone(),
        created_at: batch.created_at.to_rfc3339(),
        totals: view.computed.period_totals,
        lines,
    }
}
