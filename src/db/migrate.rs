use crate::db::log::ttlog;
use crate::errors::{AppError, AppResult};
use rusqlite::{Connection, OptionalExtension};

/// One schema step. Applied at most once and recorded in `schema_migrations`
/// and in the `log` table.
struct Migration {
    version: &'static str,
    description: &'static str,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: "20260302_0001_timesheet_core",
        description: "Created rule_settings, periods, planned_leave and signature_profiles",
        sql: r#"
        CREATE TABLE IF NOT EXISTS rule_settings (
            id          INTEGER PRIMARY KEY CHECK (id = 1),
            rules       TEXT NOT NULL,
            updated_at  TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS periods (
            period_key  TEXT PRIMARY KEY,
            status      TEXT NOT NULL,
            revision_no INTEGER NOT NULL,
            state       TEXT NOT NULL,
            updated_at  TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS planned_leave (
            id     TEXT PRIMARY KEY,
            date   TEXT NOT NULL,
            hours  REAL NOT NULL CHECK (hours > 0),
            note   TEXT NOT NULL DEFAULT ''
        );

        CREATE INDEX IF NOT EXISTS idx_planned_leave_date ON planned_leave(date);

        CREATE TABLE IF NOT EXISTS signature_profiles (
            role         TEXT PRIMARY KEY CHECK (role IN ('EMPLOYEE','MANAGER')),
            full_name    TEXT NOT NULL,
            declaration  TEXT NOT NULL,
            updated_at   TEXT NOT NULL
        );
        "#,
    },
    Migration {
        version: "20260302_0002_audit_chain",
        description: "Created audit_event and audit_field_change",
        sql: r#"
        CREATE TABLE IF NOT EXISTS audit_event (
            id               INTEGER PRIMARY KEY AUTOINCREMENT,
            created_at       TEXT NOT NULL,
            entity_table     TEXT NOT NULL,
            entity_key       TEXT NOT NULL,
            operation        TEXT NOT NULL,
            actor_id         TEXT,
            actor_role       TEXT,
            request_id       TEXT,
            reason           TEXT,
            metadata         TEXT NOT NULL DEFAULT '{}',
            prev_event_hash  TEXT,
            event_hash       TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS audit_field_change (
            id              INTEGER PRIMARY KEY AUTOINCREMENT,
            audit_event_id  INTEGER NOT NULL REFERENCES audit_event(id),
            field_path      TEXT NOT NULL,
            old_value       TEXT NOT NULL,
            new_value       TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_audit_event_entity ON audit_event(entity_table, entity_key);
        CREATE INDEX IF NOT EXISTS idx_audit_field_change_event ON audit_field_change(audit_event_id);
        "#,
    },
    Migration {
        version: "20260420_0003_period_status_index",
        description: "Added status index on periods",
        sql: "CREATE INDEX IF NOT EXISTS idx_periods_status ON periods(status);",
    },
];

/// Ensure that the `log` table exists.
fn ensure_log_table(conn: &Connection) -> AppResult<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn ensure_migrations_table(conn: &Connection) -> AppResult<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS schema_migrations (
            version     TEXT PRIMARY KEY,
            applied_at  TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn is_applied(conn: &Connection, version: &str) -> AppResult<bool> {
    let mut chk = conn.prepare("SELECT 1 FROM schema_migrations WHERE version = ?1 LIMIT 1")?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

/// Run all pending migrations and return the versions applied by this call.
///
/// Each migration runs in its own transaction together with its bookkeeping
/// rows, so a failed step leaves nothing half-applied.
pub fn run_pending_migrations(conn: &Connection) -> AppResult<Vec<&'static str>> {
    // 1️⃣ bookkeeping tables
    ensure_log_table(conn)?;
    ensure_migrations_table(conn)?;

    let mut applied = Vec::new();

    // 2️⃣ schema steps, in order
    for m in MIGRATIONS {
        if is_applied(conn, m.version)? {
            continue;
        }

        let tx = conn.unchecked_transaction()?;

        tx.execute_batch(m.sql)
            .map_err(|e| AppError::Migration(format!("{}: {}", m.version, e)))?;

        tx.execute(
            "INSERT INTO schema_migrations (version, applied_at) VALUES (?1, datetime('now'))",
            [m.version],
        )?;
        ttlog(&tx, "migration_applied", m.version, m.description)?;

        tx.commit()?;
        applied.push(m.version);
    }

    Ok(applied)
}

/// Versions recorded as applied, oldest first.
pub fn applied_versions(conn: &Connection) -> AppResult<Vec<String>> {
    ensure_migrations_table(conn)?;

    let mut stmt = conn.prepare("SELECT version FROM schema_migrations ORDER BY version ASC")?;
    let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
