//! Payroll export checksum and batch ids.

use crate::core::signature::hours_hundredths;
use crate::errors::AppResult;
use crate::models::period::{ExportBatch, PeriodKey, PeriodState};
use crate::models::totals::TimesheetTotals;
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct ExportLine<'a> {
    id: &'a str,
    description: &'a str,
    hours_hundredths: i64,
}

#[derive(Debug, Serialize)]
struct ExportDay<'a> {
    date: String,
    project_lines: Vec<ExportLine<'a>>,
    absence_code: &'a str,
}

#[derive(Debug, Serialize)]
struct ExportSnapshot<'a> {
    period_key: String,
    revision_no: u32,
    status: &'static str,
    totals: &'a TimesheetTotals,
    entries: Vec<ExportDay<'a>>,
    employee_signature_hash: Option<&'a str>,
    manager_signature_hash: Option<&'a str>,
}

/// 32-bit multiplicative rolling hash (`h = h * 31 + unit`) over the UTF-16
/// code units of `input`, as 8 lowercase hex digits. Not cryptographic.
pub fn rolling_hash(input: &str) -> String {
    let hash = input
        .encode_utf16()
        .fold(0u32, |h, unit| h.wrapping_mul(31).wrapping_add(unit as u32));

    format!("{hash:08x}")
}

/// Checksum of the exportable content of a period.
/// Days are sorted by date and lines by id before hashing.
pub fn export_checksum(
    key: &PeriodKey,
    state: &PeriodState,
    totals: &TimesheetTotals,
) -> AppResult<String> {
    let mut days: Vec<_> = state.day_entries.iter().collect();
    days.sort_by_key(|e| e.date);

    let entries = days
        .into_iter()
        .map(|e| {
            let mut lines: Vec<_> = e.project_lines.iter().collect();
            lines.sort_by(|a, b| a.id.cmp(&b.id));

            ExportDay {
                date: e.date_str(),
                project_lines: lines
                    .into_iter()
                    .map(|l| ExportLine {
                        id: &l.id,
                        description: l.description.trim(),
                        hours_hundredths: hours_hundredths(l.hours),
                    })
                    .collect(),
                absence_code: e.absence_code.trim(),
            }
        })
        .collect();

    let snapshot = ExportSnapshot {
        period_key: key.to_string(),
        revision_no: state.revision_no,
        status: state.status.as_str(),
        totals,
        entries,
        employee_signature_hash: state
            .employee_signature
            .as_ref()
            .map(|s| s.signature_hash.as_str()),
        manager_signature_hash: state
            .manager_signature
            .as_ref()
            .map(|s| s.signature_hash.as_str()),
    };

    let json = serde_json::to_string(&snapshot)?;
    Ok(rolling_hash(&json))
}

/// `TSB-YYYYMM-<unix millis>`, suffixed with `-n` when a batch created in the
/// same millisecond already carries that id.
pub fn batch_id(key: &PeriodKey, now: DateTime<Utc>, existing: &[ExportBatch]) -> String {
    let base = format!("TSB-{}-{}", key.compact(), now.timestamp_millis());

    if !existing.iter().any(|b| b.batch_id == base) {
        return base;
    }

    let mut n = 2;
    loop {
        let candidate = format!("{base}-{n}");
        if !existing.iter().any(|b| b.batch_id == candidate) {
            return candidate;
        }
        n += 1;
    }
}
