// src/export/logic.rs

use crate::core::service::PeriodView;
use crate::errors::{AppError, AppResult};
use crate::export::ExportFormat;
use crate::export::fs_utils::ensure_writable;
use crate::export::json_csv::{export_csv, export_json};
use crate::export::model::payroll_export;
use crate::export::xlsx::export_xlsx;
use crate::models::period::ExportBatch;
use std::io;
use std::path::{Path, PathBuf};

pub struct ExportLogic;

impl ExportLogic {
    /// Check an explicit output path before anything is recorded.
    ///
    /// The path must be absolute and either free or confirmed for
    /// overwriting; `None` means the default batch-named path is used.
    pub fn prepare_target(file: Option<&str>, force: bool) -> AppResult<Option<PathBuf>> {
        let Some(f) = file else {
            return Ok(None);
        };

        let p = PathBuf::from(f);
        if !p.is_absolute() {
            return Err(AppError::from(io::Error::other(format!(
                "Output file path must be absolute: {f}"
            ))));
        }

        ensure_writable(&p, force)?;
        Ok(Some(p))
    }

    /// Write the payroll lines of `view` for `batch`.
    ///
    /// - `format`: csv | json | xlsx
    /// - `target`: output path already checked by [`Self::prepare_target`];
    ///   when absent the file is named after the batch id and placed in the
    ///   current directory.
    pub fn export(
        view: &PeriodView,
        batch: &ExportBatch,
        format: ExportFormat,
        target: Option<&Path>,
        force: bool,
    ) -> AppResult<PathBuf> {
        let path = match target {
            Some(p) => p.to_path_buf(),
            None => {
                let p = default_path(batch, format)?;
                ensure_writable(&p, force)?;
                p
            }
        };

        let doc = payroll_export(view, batch);

        match format {
            ExportFormat::Csv => export_csv(&doc, &path)?,
            ExportFormat::Json => export_json(&doc, &path)?,
            ExportFormat::Xlsx => export_xlsx(&doc, &path)?,
        }

        Ok(path)
    }
}

fn default_path(batch: &ExportBatch, format: ExportFormat) -> AppResult<PathBuf> {
    let cwd = std::env::current_dir()?;
    Ok(cwd.join(Path::new(&format!(
        "{}.{}",
        batch.batch_id,
        format.as_str()
    ))))
}
