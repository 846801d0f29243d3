//! Canonical snapshots and the SHA-256 signature hash.
//!
//! The snapshot is built from the stored day entries, never from derived
//! calculation results, and is fully sorted and normalized so the same
//! content always yields the same bytes.

use crate::errors::AppResult;
use crate::models::entry::DayEntry;
use crate::models::period::{PeriodKey, PeriodState};
use crate::models::signature::SignatureRole;
use serde::Serialize;
use sha2::{Digest, Sha256};

/// Hours rounded to two decimals, carried as an integer number of hundredths
/// so no float formatting ever reaches the hash input.
pub fn hours_hundredths(hours: f64) -> i64 {
    if hours.is_finite() {
        (hours * 100.0).round() as i64
    } else {
        0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CanonicalLine {
    pub description: String,
    pub hours_hundredths: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CanonicalDay {
    pub date: String,
    pub absence_code: String,
    pub notes: String,
    pub project_lines: Vec<CanonicalLine>,
}

/// Days sorted by date, lines sorted by id, text trimmed.
pub fn canonical_days(entries: &[DayEntry]) -> Vec<CanonicalDay> {
    let mut days: Vec<&DayEntry> = entries.iter().collect();
    days.sort_by_key(|e| e.date);

    days.into_iter()
        .map(|e| {
            let mut lines: Vec<_> = e.project_lines.iter().collect();
            lines.sort_by(|a, b| a.id.cmp(&b.id));

            CanonicalDay {
                date: e.date_str(),
                absence_code: e.absence_code.trim().to_string(),
                notes: e.notes.trim().to_string(),
                project_lines: lines
                    .into_iter()
                    .map(|l| CanonicalLine {
                        description: l.description.trim().to_string(),
                        hours_hundredths: hours_hundredths(l.hours),
                    })
                    .collect(),
            }
        })
        .collect()
}

#[derive(Debug, Serialize)]
struct SignaturePayload<'a> {
    role: &'static str,
    period_key: String,
    revision_no: u32,
    status: &'static str,
    signed_by: &'a str,
    declaration: &'a str,
    manager_note: &'a str,
    day_entries: Vec<CanonicalDay>,
    employee_signature_hash: Option<&'a str>,
}

/// Hex-encoded SHA-256 of the canonical signing snapshot.
///
/// A manager signature chains to the employee signature hash present on the
/// state at signing time.
pub fn signature_hash(
    role: SignatureRole,
    key: &PeriodKey,
    state: &PeriodState,
    signed_by: &str,
    declaration: &str,
) -> AppResult<String> {
    let employee_signature_hash = match role {
        SignatureRole::Employee => None,
        SignatureRole::Manager => state
            .employee_signature
            .as_ref()
            .map(|s| s.signature_hash.as_str()),
    };

    let payload = SignaturePayload {
        role: role.as_str(),
        period_key: key.to_string(),
        revision_no: state.revision_no,
        status: state.status.as_str(),
        signed_by: signed_by.trim(),
        declaration,
        manager_note: state.manager_note.trim(),
        day_entries: canonical_days(&state.day_entries),
        employee_signature_hash,
    };

    let bytes = serde_json::to_vec(&payload)?;
    Ok(sha256_hex(&bytes))
}

pub fn sha256_hex(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}
