//! Audit events emitted for every state-changing operation.
//!
//! The core only builds and submits events; chaining and verification belong
//! to the sink implementation.

use crate::errors::AppResult;
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldChange {
    pub field_path: String,
    pub old_value: Value,
    pub new_value: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuditEvent {
    pub entity_table: String,
    pub entity_key: String,
    pub operation: String,
    pub actor_id: Option<String>,
    pub actor_role: Option<String>,
    pub request_id: Option<String>,
    pub reason: Option<String>,
    pub metadata: Value,
    pub field_changes: Vec<FieldChange>,
}

impl AuditEvent {
    pub fn new(entity_table: &str, entity_key: impl Into<String>, operation: &str) -> Self {
        Self {
            entity_table: entity_table.to_string(),
            entity_key: entity_key.into(),
            operation: operation.to_string(),
            actor_id: None,
            actor_role: None,
            request_id: None,
            reason: None,
            metadata: Value::Object(Default::default()),
            field_changes: Vec::new(),
        }
    }

    pub fn actor(mut self, id: &str, role: &str) -> Self {
        self.actor_id = Some(id.to_string());
        self.actor_role = Some(role.to_string());
        self
    }

    pub fn request(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }

    pub fn reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    pub fn metadata(mut self, metadata: Value) -> Self {
        self.metadata = metadata;
        self
    }

    /// Record a field change; unchanged values are skipped.
    pub fn change(mut self, field_path: &str, old_value: Value, new_value: Value) -> Self {
        if old_value != new_value {
            self.field_changes.push(FieldChange {
                field_path: field_path.to_string(),
                old_value,
                new_value,
            });
        }
        self
    }
}

/// Append-only destination of audit events.
pub trait AuditSink {
    fn record(&self, event: &AuditEvent) -> AppResult<()>;
}
