// src/export/json_csv.rs

use crate::errors::{AppError, AppResult};
use crate::export::{PayrollExport, notify_export_success};
use crate::ui::messages::info;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Export JSON pretty-printed: the whole document, batch identity included.
pub(crate) fn export_json(doc: &PayrollExport, path: &Path) -> AppResult<()> {
    info(format!("Exporting to JSON: {}", path.display()));

    let json_data = serde_json::to_string_pretty(doc)?;

    let mut file = File::create(path)?;
    file.write_all(json_data.as_bytes())?;

    notify_export_success("JSON", path);
    Ok(())
}

/// Export CSV: one row per payroll line, each carrying batch id and checksum
/// so a single row can be traced back to its batch.
pub(crate) fn export_csv(doc: &PayrollExport, path: &Path) -> AppResult<()> {
    info(format!("Exporting to CSV: {}", path.display()));

    let mut wtr = csv::Writer::from_path(path)
        .map_err(|e| AppError::Export(format!("CSV open error: {e}")))?;

    let mut header = vec!["period", "batch_id", "checksum"];
    header.extend(super::model::get_headers());
    wtr.write_record(&header)
        .map_err(|e| AppError::Export(format!("CSV write error: {e}")))?;

    for line in &doc.lines {
        let mut record = vec![
            doc.period.clone(),
            doc.batch_id.clone(),
            doc.checksum.clone(),
        ];
        record.extend(super::model::line_to_row(line));

        wtr.write_record(&record)
            .map_err(|e| AppError::Export(format!("CSV write error: {e}")))?;
    }

    wtr.flush()?;

    notify_export_success("CSV", path);
    Ok(())
}
