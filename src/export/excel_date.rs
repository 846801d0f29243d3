// src/export/excel_date.rs

use chrono::NaiveDate;

/// Excel serial number of a `YYYY-MM-DD` string, with its number format.
pub(crate) fn parse_to_excel_date(s: &str) -> Option<(&'static str, f64)> {
    let d = NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()?;
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?;
    Some(("yyyy-mm-dd", (d - epoch).num_days() as f64))
}
