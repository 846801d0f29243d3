use crate::cli::parser::Cli;
use crate::config::Config;
use crate::core::audit::{AuditEvent, AuditSink};
use crate::core::store::TimesheetStore;
use crate::db::SqliteStore;
use crate::db::log::ttlog;
use crate::db::migrate::applied_versions;
use crate::errors::AppResult;
use crate::ui::messages::{info, success, warning};

/// Handle the `init` command
///
/// This initializes:
///  - the config directory and file (skipped in test mode)
///  - the SQLite database with all pending migrations
///  - the active rules, seeded from the config file when the database has none
pub fn handle(cli: &Cli) -> AppResult<()> {
    let cfg = Config::init_all(cli.db.clone(), cli.test)?;

    info("Initializing rTimesheet…");
    if !cli.test {
        info(format!("Config file : {}", Config::config_file().display()));
    }
    info(format!("Database    : {}", cfg.database));

    let store = SqliteStore::open(&cfg.database)?;
    if let Some(latest) = applied_versions(store.conn())?.last() {
        info(format!("Schema      : {latest}"));
    }

    if store.load_rules()?.is_none() {
        store.save_rules(&cfg.rules)?;
        store.record(
            &AuditEvent::new("rule_settings", "active", "seed")
                .actor("system", "ADMIN")
                .metadata(serde_json::to_value(&cfg.rules)?),
        )?;
        info("Active rules seeded from the configuration file.");
    }

    if let Err(e) = ttlog(
        store.conn(),
        "init",
        "Database initialized",
        &format!("Database initialized at {}", cfg.database),
    ) {
        warning(format!("Failed to write internal log: {e}"));
    }

    success(format!("Database initialized at {}", cfg.database));
    Ok(())
}
