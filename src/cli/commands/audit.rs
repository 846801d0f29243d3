use crate::cli::commands::open_store;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::audit::{load_events, verify_chain};
use crate::db::log::ttlog;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};
use crate::utils::formatting::truncate;
use crate::utils::table::Table;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Audit {
        print,
        verify,
        limit,
    } = cmd
    else {
        return Ok(());
    };

    let store = open_store(cfg)?;

    if *print || !*verify {
        let events = load_events(store.conn(), *limit)?;

        if events.is_empty() {
            info("Audit log is empty.");
        } else {
            let mut table = Table::new(
                &["Id", "When", "Entity", "Key", "Op", "Actor", "Changes", "Reason"],
                &cfg.separator_char,
            );

            for s in &events {
                let ev = &s.event;
                let actor = match (&ev.actor_id, &ev.actor_role) {
                    (Some(id), Some(role)) => format!("{id} [{role}]"),
                    (Some(id), None) => id.clone(),
                    (None, Some(role)) => role.clone(),
                    (None, None) => "-".to_string(),
                };

                table.add_row(vec![
                    s.id.to_string(),
                    s.created_at.clone(),
                    ev.entity_table.clone(),
                    ev.entity_key.clone(),
                    ev.operation.clone(),
                    actor,
                    ev.field_changes.len().to_string(),
                    truncate(ev.reason.as_deref().unwrap_or(""), 40),
                ]);
            }

            print!("{}", table.render());
        }
    }

    if *verify {
        let n = verify_chain(store.conn())?;
        let message = format!("Audit chain intact: {n} event(s) verified.");
        success(&message);
        ttlog(store.conn(), "audit_verify", "audit_event", &message)?;
    }

    Ok(())
}
