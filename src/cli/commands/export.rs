use crate::cli::commands::{context, open_store, period_key};
use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::core::service::TimesheetService;
use crate::db::log::ttlog;
use crate::errors::{AppError, AppResult};
use crate::export::{ExportFormat, ExportLogic};
use crate::ui::messages::success;

/// Create an export batch; with `--file` or `--format` also write the
/// payroll lines of the batch.
pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let Commands::Export {
        period,
        format,
        file,
        force,
    } = &cli.command
    else {
        return Ok(());
    };

    let ctx = context(cli)?;
    let key = period_key(period.as_deref(), &ctx)?;
    let target = ExportLogic::prepare_target(file.as_deref(), *force)?;
    let mut store = open_store(cfg)?;

    let (batch, view) = {
        let mut service = TimesheetService::new(&mut store, cfg, ctx);

        let batch = service
            .create_export_batch(&key)?
            .map_err(|e| AppError::Refused(e.to_string()))?;

        let view = service
            .get_period(&key)?
            .map_err(|e| AppError::Refused(e.to_string()))?;

        (batch, view)
    };

    let message = format!(
        "Export batch {} created: {} line(s), checksum {}.",
        batch.batch_id, batch.line_count, batch.checksum
    );
    success(&message);
    ttlog(store.conn(), "export_batch", &key.to_string(), &message)?;

    let format = match (format, file) {
        (Some(f), _) => Some(*f),
        (None, Some(path)) => Some(ExportFormat::from_path(path)),
        (None, None) => None,
    };

    if let Some(fmt) = format {
        let path = ExportLogic::export(&view, &batch, fmt, target.as_deref(), *force)?;
        ttlog(
            store.conn(),
            "export",
            &path.to_string_lossy(),
            &format!("Batch {} written as {}", batch.batch_id, fmt.as_str()),
        )?;
    }

    Ok(())
}
