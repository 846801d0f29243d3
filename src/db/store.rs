//! SQLite implementation of the timesheet store.
//!
//! A period is stored as one JSON document; `status` and `revision_no` are
//! duplicated into columns for listing and are cross-checked on load.

use crate::core::audit::{AuditEvent, AuditSink};
use crate::core::store::TimesheetStore;
use crate::db::audit::append_event;
use crate::db::migrate::run_pending_migrations;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::leave::PlannedLeave;
use crate::models::period::{PeriodKey, PeriodState};
use crate::models::rules::RuleConfiguration;
use crate::models::signature::{SignatureProfile, SignatureRole};
use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{Connection, OptionalExtension, params};

pub struct SqliteStore {
    pub pool: DbPool,
}

impl SqliteStore {
    /// Open (or create) the database at `path` and bring its schema up to date.
    pub fn open(path: &str) -> AppResult<Self> {
        let pool = DbPool::new(path)?;
        run_pending_migrations(&pool.conn)?;
        Ok(Self { pool })
    }

    pub fn in_memory() -> AppResult<Self> {
        let pool = DbPool::in_memory()?;
        run_pending_migrations(&pool.conn)?;
        Ok(Self { pool })
    }

    pub fn conn(&self) -> &Connection {
        &self.pool.conn
    }
}

fn corrupt(what: impl Into<String>) -> AppError {
    AppError::CorruptState(what.into())
}

fn parse_date(s: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| AppError::InvalidDate(s.to_string()))
}

fn parse_timestamp(s: &str) -> AppResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| corrupt(format!("invalid timestamp '{s}'")))
}

impl AuditSink for SqliteStore {
    fn record(&self, event: &AuditEvent) -> AppResult<()> {
        append_event(&self.pool.conn, event)?;
        Ok(())
    }
}

impl TimesheetStore for SqliteStore {
    fn load_rules(&self) -> AppResult<Option<RuleConfiguration>> {
        let raw: Option<String> = self
            .pool
            .conn
            .query_row("SELECT rules FROM rule_settings WHERE id = 1", [], |row| {
                row.get(0)
            })
            .optional()?;

        match raw {
            None => Ok(None),
            Some(json) => {
                let rules: RuleConfiguration = serde_json::from_str(&json)
                    .map_err(|e| corrupt(format!("rule_settings: {e}")))?;
                rules.validate()?;
                Ok(Some(rules))
            }
        }
    }

    fn save_rules(&self, rules: &RuleConfiguration) -> AppResult<()> {
        rules.validate()?;
        self.pool.conn.execute(
            "INSERT INTO rule_settings (id, rules, updated_at)
             VALUES (1, ?1, ?2)
             ON CONFLICT(id) DO UPDATE SET rules = excluded.rules, updated_at = excluded.updated_at",
            params![serde_json::to_string(rules)?, Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }

    fn load_period(&self, key: &PeriodKey) -> AppResult<Option<PeriodState>> {
        let row: Option<(String, i64, String)> = self
            .pool
            .conn
            .query_row(
                "SELECT status, revision_no, state FROM periods WHERE period_key = ?1",
                [key.to_string()],
                |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
            )
            .optional()?;

        let Some((status, revision_no, json)) = row else {
            return Ok(None);
        };

        let state: PeriodState =
            serde_json::from_str(&json).map_err(|e| corrupt(format!("period {key}: {e}")))?;

        if state.status.as_str() != status || i64::from(state.revision_no) != revision_no {
            return Err(corrupt(format!(
                "period {key}: columns ({status}, rev {revision_no}) disagree with stored document ({}, rev {})",
                state.status, state.revision_no
            )));
        }

        Ok(Some(state))
    }

    fn save_period(&self, key: &PeriodKey, state: &PeriodState) -> AppResult<()> {
        self.pool.conn.execute(
            "INSERT INTO periods (period_key, status, revision_no, state, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5)
             ON CONFLICT(period_key) DO UPDATE SET
                status = excluded.status,
                revision_no = excluded.revision_no,
                state = excluded.state,
                updated_at = excluded.updated_at",
            params![
                key.to_string(),
                state.status.as_str(),
                state.revision_no,
                serde_json::to_string(state)?,
                Utc::now().to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    fn period_keys(&self) -> AppResult<Vec<PeriodKey>> {
        let mut stmt = self
            .pool
            .conn
            .prepare("SELECT period_key FROM periods ORDER BY period_key ASC")?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

        let mut out = Vec::new();
        for r in rows {
            out.push(r?.parse()?);
        }
        Ok(out)
    }

    fn planned_leave(&self, year: Option<i32>) -> AppResult<Vec<PlannedLeave>> {
        let mut stmt = self.pool.conn.prepare(
            "SELECT id, date, hours, note FROM planned_leave
             WHERE ?1 IS NULL OR substr(date, 1, 4) = ?1
             ORDER BY date ASC, id ASC",
        )?;

        let year_str = year.map(|y| format!("{y:04}"));
        let rows = stmt.query_map([year_str], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, f64>(2)?,
                row.get::<_, String>(3)?,
            ))
        })?;

        let mut out = Vec::new();
        for r in rows {
            let (id, date, hours, note) = r?;
            out.push(PlannedLeave {
                id,
                date: parse_date(&date)?,
                hours,
                note,
            });
        }
        Ok(out)
    }

    fn insert_planned_leave(&self, leave: &PlannedLeave) -> AppResult<()> {
        self.pool.conn.execute(
            "INSERT INTO planned_leave (id, date, hours, note) VALUES (?1, ?2, ?3, ?4)",
            params![
                leave.id,
                leave.date.format("%Y-%m-%d").to_string(),
                leave.hours,
                leave.note
            ],
        )?;
        Ok(())
    }

    fn delete_planned_leave(&self, id: &str) -> AppResult<bool> {
        let n = self
            .pool
            .conn
            .execute("DELETE FROM planned_leave WHERE id = ?1", [id])?;
        Ok(n > 0)
    }

    fn signature_profile(&self, role: SignatureRole) -> AppResult<Option<SignatureProfile>> {
        let row: Option<(String, String, String)> = self
            .pool
            .conn
            .query_row(
                "SELECT full_name, declaration, updated_at FROM signature_profiles WHERE role = ?1",
                [role.as_str()],
                |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
            )
            .optional()?;

        match row {
            None => Ok(None),
            Some((full_name, declaration, updated_at)) => Ok(Some(SignatureProfile {
                role,
                full_name,
                declaration,
                updated_at: parse_timestamp(&updated_at)?,
            })),
        }
    }

    fn save_signature_profile(&self, profile: &SignatureProfile) -> AppResult<()> {
        self.pool.conn.execute(
            "INSERT INTO signature_profiles (role, full_name, declaration, updated_at)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(role) DO UPDATE SET
                full_name = excluded.full_name,
                declaration = excluded.declaration,
                updated_at = excluded.updated_at",
            params![
                profile.role.as_str(),
                profile.full_name,
                profile.declaration,
                profile.updated_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    fn with_transaction<T, F>(&mut self, f: F) -> AppResult<T>
    where
        Self: Sized,
        F: FnOnce(&mut Self) -> AppResult<T>,
    {
        // IMMEDIATE takes the write lock up front: a second writer waits
        // (busy timeout) instead of failing at commit time.
        self.pool.conn.execute_batch("BEGIN IMMEDIATE")?;

        match f(self) {
            Ok(value) => {
                self.pool.conn.execute_batch("COMMIT")?;
                Ok(value)
            }
            Err(e) => {
                let _ = self.pool.conn.execute_batch("ROLLBACK");
                Err(e)
            }
        }
    }
}
