//! Hash-chained audit log.
//!
//! `event_hash = sha256(json(payload + prev_event_hash))`. Every event links
//! to the hash of the event inserted before it, so editing or deleting a row
//! breaks the chain from that point on.

use crate::core::audit::{AuditEvent, FieldChange};
use crate::core::signature::sha256_hex;
use crate::errors::{AppError, AppResult};
use chrono::Utc;
use rusqlite::{Connection, OptionalExtension, params};
use serde::Serialize;
use serde_json::Value;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct HashInput<'a> {
    created_at: &'a str,
    table: &'a str,
    key: &'a str,
    op: &'a str,
    actor: Option<&'a str>,
    role: Option<&'a str>,
    request_id: Option<&'a str>,
    reason: Option<&'a str>,
    metadata: &'a Value,
    field_changes: &'a [FieldChange],
    prev_hash: Option<&'a str>,
}

fn event_hash(created_at: &str, ev: &AuditEvent, prev_hash: Option<&str>) -> AppResult<String> {
    let input = HashInput {
        created_at,
        table: &ev.entity_table,
        key: &ev.entity_key,
        op: &ev.operation,
        actor: ev.actor_id.as_deref(),
        role: ev.actor_role.as_deref(),
        request_id: ev.request_id.as_deref(),
        reason: ev.reason.as_deref(),
        metadata: &ev.metadata,
        field_changes: &ev.field_changes,
        prev_hash,
    };

    Ok(sha256_hex(serde_json::to_string(&input)?.as_bytes()))
}

fn last_hash(conn: &Connection) -> AppResult<Option<String>> {
    Ok(conn
        .query_row(
            "SELECT event_hash FROM audit_event ORDER BY id DESC LIMIT 1",
            [],
            |row| row.get::<_, String>(0),
        )
        .optional()?)
}

/// Append `ev` to the chain. Returns the new event id.
pub fn append_event(conn: &Connection, ev: &AuditEvent) -> AppResult<i64> {
    let created_at = Utc::now().to_rfc3339();
    let prev = last_hash(conn)?;
    let hash = event_hash(&created_at, ev, prev.as_deref())?;

    conn.execute(
        "INSERT INTO audit_event (
            created_at, entity_table, entity_key, operation,
            actor_id, actor_role, request_id, reason,
            metadata, prev_event_hash, event_hash
         ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
        params![
            created_at,
            ev.entity_table,
            ev.entity_key,
            ev.operation,
            ev.actor_id,
            ev.actor_role,
            ev.request_id,
            ev.reason,
            serde_json::to_string(&ev.metadata)?,
            prev,
            hash,
        ],
    )?;

    let id = conn.last_insert_rowid();

    let mut stmt = conn.prepare_cached(
        "INSERT INTO audit_field_change (audit_event_id, field_path, old_value, new_value)
         VALUES (?1, ?2, ?3, ?4)",
    )?;
    for fc in &ev.field_changes {
        stmt.execute(params![
            id,
            fc.field_path,
            serde_json::to_string(&fc.old_value)?,
            serde_json::to_string(&fc.new_value)?,
        ])?;
    }

    Ok(id)
}

/// An audit event as read back from storage.
#[derive(Debug, Clone)]
pub struct StoredEvent {
    pub id: i64,
    pub created_at: String,
    pub event: AuditEvent,
    pub prev_event_hash: Option<String>,
    pub event_hash: String,
}

fn parse_json(id: i64, text: &str) -> AppResult<Value> {
    serde_json::from_str(text).map_err(|e| AppError::AuditChain {
        id,
        reason: format!("unreadable JSON column: {e}"),
    })
}

fn field_changes(conn: &Connection, event_id: i64) -> AppResult<Vec<FieldChange>> {
    let mut stmt = conn.prepare_cached(
        "SELECT field_path, old_value, new_value
         FROM audit_field_change
         WHERE audit_event_id = ?1
         ORDER BY id ASC",
    )?;

    let rows = stmt.query_map([event_id], |row| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, String>(2)?,
        ))
    })?;

    let mut out = Vec::new();
    for r in rows {
        let (field_path, old, new) = r?;
        out.push(FieldChange {
            field_path,
            old_value: parse_json(event_id, &old)?,
            new_value: parse_json(event_id, &new)?,
        });
    }
    Ok(out)
}

/// Stored events, oldest first. `limit` keeps only the newest N.
pub fn load_events(conn: &Connection, limit: Option<usize>) -> AppResult<Vec<StoredEvent>> {
    let mut stmt = conn.prepare(
        "SELECT id, created_at, entity_table, entity_key, operation,
                actor_id, actor_role, request_id, reason, metadata,
                prev_event_hash, event_hash
         FROM audit_event
         ORDER BY id ASC",
    )?;

    let rows = stmt.query_map([], |row| {
        Ok((
            row.get::<_, i64>(0)?,
            row.get::<_, String>(1)?,
            AuditEvent {
                entity_table: row.get(2)?,
                entity_key: row.get(3)?,
                operation: row.get(4)?,
                actor_id: row.get(5)?,
                actor_role: row.get(6)?,
                request_id: row.get(7)?,
                reason: row.get(8)?,
                metadata: Value::Null,
                field_changes: Vec::new(),
            },
            row.get::<_, String>(9)?,
            row.get::<_, Option<String>>(10)?,
            row.get::<_, String>(11)?,
        ))
    })?;

    let mut out = Vec::new();
    for r in rows {
        let (id, created_at, mut event, metadata, prev_event_hash, event_hash) = r?;
        event.metadata = parse_json(id, &metadata)?;
        event.field_changes = field_changes(conn, id)?;

        out.push(StoredEvent {
            id,
            created_at,
            event,
            prev_event_hash,
            event_hash,
        });
    }

    if let Some(n) = limit
        && out.len() > n
    {
        out.drain(..out.len() - n);
    }

    Ok(out)
}

/// Recompute the whole chain. Returns the number of verified events, or the
/// first broken link as `AppError::AuditChain`.
pub fn verify_chain(conn: &Connection) -> AppResult<usize> {
    let events = load_events(conn, None)?;
    let mut expected_prev: Option<String> = None;

    for stored in &events {
        if stored.prev_event_hash != expected_prev {
            return Err(AppError::AuditChain {
                id: stored.id,
                reason: "previous-hash link does not match the preceding event".to_string(),
            });
        }

        let recomputed = event_hash(
            &stored.created_at,
            &stored.event,
            stored.prev_event_hash.as_deref(),
        )?;

        if recomputed != stored.event_hash {
            return Err(AppError::AuditChain {
                id: stored.id,
                reason: "content does not match its stored hash".to_string(),
            });
        }

        expected_prev = Some(stored.event_hash.clone());
    }

    Ok(events.len())
}
