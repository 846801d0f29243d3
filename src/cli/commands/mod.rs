//! One handler per subcommand, plus the plumbing they share: building the
//! acting context, opening the store, and turning outcomes into output.

pub mod audit;
pub mod backup;
pub mod config;
pub mod day;
pub mod export;
pub mod init;
pub mod leave;
pub mod log;
pub mod period;
pub mod profile;
pub mod rules;
pub mod workflow;

use crate::cli::parser::Cli;
use crate::config::Config;
use crate::core::service::{Context, Outcome};
use crate::db::SqliteStore;
use crate::db::log::ttlog;
use crate::errors::{AppError, AppResult};
use crate::models::period::PeriodKey;
use crate::models::role::Role;
use crate::ui::messages::success;
use crate::utils::date::{parse_date, parse_period, today};

/// Acting role, actor and reference date from the global flags.
pub(crate) fn context(cli: &Cli) -> AppResult<Context> {
    let role = Role::from_code(&cli.role).ok_or_else(|| AppError::InvalidRole(cli.role.clone()))?;

    let as_of = match &cli.as_of {
        Some(d) => parse_date(d)?,
        None => today(),
    };

    Ok(Context::new(role, cli.actor.clone()).with_as_of(Some(as_of)))
}

pub(crate) fn open_store(cfg: &Config) -> AppResult<SqliteStore> {
    SqliteStore::open(&cfg.database)
}

/// Period argument, defaulting to the month of the reference date.
pub(crate) fn period_key(period: Option<&str>, ctx: &Context) -> AppResult<PeriodKey> {
    parse_period(period, ctx.as_of.unwrap_or_else(today))
}

/// Print a successful outcome and log it; a refused one becomes
/// `AppError::Refused` so the process exits with its own status code.
pub(crate) fn report(
    store: &SqliteStore,
    operation: &str,
    target: &str,
    outcome: Outcome,
) -> AppResult<()> {
    if !outcome.ok {
        return Err(AppError::Refused(outcome.message));
    }

    success(&outcome.message);
    ttlog(store.conn(), operation, target, &outcome.message)?;
    Ok(())
}
