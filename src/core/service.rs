//! Command surface of the timesheet core.
//!
//! Every mutating operation:
//! 1. checks the caller's role,
//! 2. runs inside one store transaction (one writer per period at a time),
//! 3. saves the state and emits an audit event only when the guarded
//!    transition succeeded.
//!
//! Guard failures come back as `Outcome { ok: false, .. }`; only storage and
//! serialization faults are `Err`.

use crate::config::Config;
use crate::core::audit::AuditEvent;
use crate::core::calculator::calculate_period;
use crate::core::leave::leave_summary;
use crate::core::store::TimesheetStore;
use crate::core::template::{build_period, normalize};
use crate::core::workflow::{
    GuardError, Guarded, Workflow, apply_rules, require_role, signer_name_ok,
};
use crate::errors::AppResult;
use crate::models::action::Action;
use crate::models::calculation::TimesheetComputed;
use crate::models::entry::{DayPatch, LinePatch};
use crate::models::leave::{LeaveSummary, PlannedLeave};
use crate::models::period::{ExportBatch, PeriodKey, PeriodState};
use crate::models::role::Role;
use crate::models::rules::{RuleConfiguration, RulePatch};
use crate::models::signature::{SignatureProfile, SignatureRole};
use chrono::{DateTime, Local, NaiveDate, Utc};
use serde::Serialize;
use serde_json::json;

/// Who is acting, and when.
#[derive(Debug, Clone)]
pub struct Context {
    pub role: Role,
    pub actor: Option<String>,
    /// Reference "today" for due-day checks.
    pub as_of: Option<NaiveDate>,
    pub now: DateTime<Utc>,
    pub request_id: Option<String>,
}

impl Context {
    pub fn new(role: Role, actor: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            role,
            actor,
            as_of: Some(Local::now().date_naive()),
            now,
            request_id: Some(format!("REQ-{}", now.timestamp_millis())),
        }
    }

    pub fn with_as_of(mut self, as_of: Option<NaiveDate>) -> Self {
        self.as_of = as_of;
        self
    }

    pub fn with_now(mut self, now: DateTime<Utc>) -> Self {
        self.now = now;
        self
    }

    /// Actor label of the approval trail: `Manager` or `Manager (Jane Roe)`.
    pub fn actor_label(&self) -> String {
        match &self.actor {
            Some(name) if !name.trim().is_empty() => {
                format!("{} ({})", self.role.label(), name.trim())
            }
            _ => self.role.label().to_string(),
        }
    }

    fn event(&self, table: &str, key: impl Into<String>, operation: &str) -> AuditEvent {
        let actor_id = self
            .actor
            .clone()
            .unwrap_or_else(|| self.role.label().to_string());

        let ev = AuditEvent::new(table, key, operation).actor(&actor_id, self.role.as_str());
        match &self.request_id {
            Some(id) => ev.request(id.clone()),
            None => ev,
        }
    }
}

/// Result of a command: success flag plus the user-facing explanation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Outcome {
    pub ok: bool,
    pub message: String,
}

impl Outcome {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            ok: true,
            message: message.into(),
        }
    }

    pub fn refused(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            message: message.into(),
        }
    }
}

impl From<GuardError> for Outcome {
    fn from(e: GuardError) -> Self {
        Outcome::refused(e.to_string())
    }
}

impl From<Guarded<String>> for Outcome {
    fn from(r: Guarded<String>) -> Self {
        match r {
            Ok(msg) => Outcome::ok(msg),
            Err(e) => e.into(),
        }
    }
}

/// Query result of `get_period`.
#[derive(Debug, Clone, Serialize)]
pub struct PeriodView {
    pub key: PeriodKey,
    pub state: PeriodState,
    pub computed: TimesheetComputed,
}

fn active_rules<S: TimesheetStore>(store: &S, cfg: &Config) -> AppResult<RuleConfiguration> {
    Ok(store.load_rules()?.unwrap_or_else(|| cfg.rules.clone()))
}

/// Load and normalize an existing period, or create it with the default
/// day-entry set on first access.
fn open_period<S: TimesheetStore>(
    store: &S,
    key: &PeriodKey,
    rules: &RuleConfiguration,
    cfg: &Config,
    ctx: &Context,
) -> AppResult<PeriodState> {
    if let Some(mut state) = store.load_period(key)? {
        normalize(key, &mut state, rules);
        return Ok(state);
    }

    let state = build_period(key, rules, ctx.as_of, &cfg.default_project_description);
    store.save_period(key, &state)?;
    store.record(&ctx.event("periods", key.to_string(), "create").metadata(json!({
        "revision_no": state.revision_no,
        "day_entries": state.day_entries.len(),
    })))?;

    Ok(state)
}

fn signature_hash_of(state: &PeriodState, manager: bool) -> Option<String> {
    let sig = if manager {
        &state.manager_signature
    } else {
        &state.employee_signature
    };
    sig.as_ref().map(|s| s.signature_hash.clone())
}

/// Audit event describing everything that differs between two states.
fn diff_event(
    mut ev: AuditEvent,
    before: &PeriodState,
    after: &PeriodState,
) -> AppResult<AuditEvent> {
    ev = ev
        .change(
            "status",
            json!(before.status.as_str()),
            json!(after.status.as_str()),
        )
        .change(
            "revision_no",
            json!(before.revision_no),
            json!(after.revision_no),
        )
        .change(
            "manager_note",
            json!(before.manager_note),
            json!(after.manager_note),
        )
        .change(
            "employee_signature_hash",
            json!(signature_hash_of(before, false)),
            json!(signature_hash_of(after, false)),
        )
        .change(
            "manager_signature_hash",
            json!(signature_hash_of(before, true)),
            json!(signature_hash_of(after, true)),
        )
        .change(
            "export_batches",
            json!(before.export_batches.len()),
            json!(after.export_batches.len()),
        );

    for entry in &after.day_entries {
        let old = before.entry(entry.date);
        if old != Some(entry) {
            ev = ev.change(
                &format!("day_entries.{}", entry.date_str()),
                serde_json::to_value(old)?,
                serde_json::to_value(entry)?,
            );
        }
    }

    if after.approval_events.len() > before.approval_events.len()
        && let Some(last) = after.approval_events.last()
    {
        ev = ev.reason(last.note.clone());
    }

    Ok(ev)
}

pub struct TimesheetService<'a, S: TimesheetStore> {
    store: &'a mut S,
    cfg: &'a Config,
    ctx: Context,
}

impl<'a, S: TimesheetStore> TimesheetService<'a, S> {
    pub fn new(store: &'a mut S, cfg: &'a Config, ctx: Context) -> Self {
        Self { store, cfg, ctx }
    }

    pub fn context(&self) -> &Context {
        &self.ctx
    }

    // ---------------------------
    // Queries
    // ---------------------------

    pub fn rules(&self) -> AppResult<RuleConfiguration> {
        active_rules(&*self.store, self.cfg)
    }

    pub fn period_keys(&self) -> AppResult<Vec<PeriodKey>> {
        self.store.period_keys()
    }

    /// Current state of `key` with its computed view. Creates the period on
    /// first access.
    pub fn get_period(&mut self, key: &PeriodKey) -> AppResult<Guarded<PeriodView>> {
        if let Err(e) = require_role(self.ctx.role, Action::ViewPeriod) {
            return Ok(Err(e));
        }

        let cfg = self.cfg;
        let ctx = &self.ctx;

        self.store.with_transaction(|store| {
            let rules = active_rules(store, cfg)?;
            let state = open_period(store, key, &rules, cfg, ctx)?;
            let computed = calculate_period(&state.day_entries, &rules, ctx.as_of);

            Ok(Ok(PeriodView {
                key: *key,
                state,
                computed,
            }))
        })
    }

    pub fn planned_leave(&self, year: Option<i32>) -> AppResult<Vec<PlannedLeave>> {
        self.store.planned_leave(year)
    }

    /// Leave balance of `year`, from the periods already created.
    pub fn leave_summary(&self, year: i32) -> AppResult<LeaveSummary> {
        let rules = self.rules()?;

        let mut periods = Vec::new();
        for key in self.store.period_keys()? {
            if key.year() != year {
                continue;
            }
            if let Some(mut state) = self.store.load_period(&key)? {
                normalize(&key, &mut state, &rules);
                periods.push(state);
            }
        }

        let planned = self.store.planned_leave(Some(year))?;

        Ok(leave_summary(
            year,
            self.cfg.annual_leave_entitlement_hours,
            &periods,
            &planned,
            &rules,
        ))
    }

    pub fn signature_profile(&self) -> AppResult<Option<SignatureProfile>> {
        match SignatureRole::for_role(self.ctx.role) {
            Some(role) => self.store.signature_profile(role),
            None => Ok(None),
        }
    }

    // ---------------------------
    // Guarded period transitions
    // ---------------------------

    fn transition<T, F>(
        &mut self,
        key: &PeriodKey,
        action: Action,
        operation: &str,
        f: F,
    ) -> AppResult<Guarded<T>>
    where
        F: FnOnce(&mut Workflow<'_>) -> AppResult<Guarded<T>>,
    {
        if let Err(e) = require_role(self.ctx.role, action) {
            return Ok(Err(e));
        }

        let cfg = self.cfg;
        let ctx = &self.ctx;

        self.store.with_transaction(|store| {
            let rules = active_rules(store, cfg)?;
            let mut state = open_period(store, key, &rules, cfg, ctx)?;
            let before = state.clone();

            let result = {
                let mut wf = Workflow {
                    key: *key,
                    state: &mut state,
                    rules: &rules,
                    as_of: ctx.as_of,
                    now: ctx.now,
                    actor: ctx.actor_label(),
                };
                f(&mut wf)?
            };

            if result.is_ok() {
                store.save_period(key, &state)?;
                let ev = diff_event(
                    ctx.event("periods", key.to_string(), operation),
                    &before,
                    &state,
                )?;
                store.record(&ev)?;
            }

            Ok(result)
        })
    }

    pub fn edit_day(
        &mut self,
        key: &PeriodKey,
        date: NaiveDate,
        patch: &DayPatch,
    ) -> AppResult<Outcome> {
        let r = self.transition(key, Action::EditContent, "edit_day", |wf| {
            Ok(wf.edit_day(date, patch))
        })?;
        Ok(r.into())
    }

    pub fn add_project_line(
        &mut self,
        key: &PeriodKey,
        date: NaiveDate,
        description: &str,
        hours: f64,
    ) -> AppResult<Outcome> {
        let r = self.transition(key, Action::EditContent, "add_project_line", |wf| {
            Ok(wf.add_project_line(date, description, hours))
        })?;
        Ok(r.map(|id| format!("Project line {id} added to {date}.")).into())
    }

    pub fn update_project_line(
        &mut self,
        key: &PeriodKey,
        date: NaiveDate,
        line_id: &str,
        patch: &LinePatch,
    ) -> AppResult<Outcome> {
        let r = self.transition(key, Action::EditContent, "update_project_line", |wf| {
            Ok(wf.update_project_line(date, line_id, patch))
        })?;
        Ok(r.into())
    }

    pub fn remove_project_line(
        &mut self,
        key: &PeriodKey,
        date: NaiveDate,
        line_id: &str,
    ) -> AppResult<Outcome> {
        let r = self.transition(key, Action::EditContent, "remove_project_line", |wf| {
            Ok(wf.remove_project_line(date, line_id))
        })?;
        Ok(r.into())
    }

    /// Resolve signer name and declaration: explicit name first, then the
    /// saved profile, then (employee only) the configured employee name.
    fn signer(&self, role: SignatureRole, name: Option<&str>) -> AppResult<(String, String)> {
        let profile = self.store.signature_profile(role)?;

        let declaration = profile
            .as_ref()
            .map(|p| p.declaration.clone())
            .filter(|d| !d.trim().is_empty())
            .unwrap_or_else(|| role.default_declaration().to_string());

        let signer = match name {
            Some(n) => n.to_string(),
            None => match (&profile, role) {
                (Some(p), _) => p.full_name.clone(),
                (None, SignatureRole::Employee) => self.cfg.employee_name.clone(),
                (None, SignatureRole::Manager) => String::new(),
            },
        };

        Ok((signer, declaration))
    }

    pub fn sign_employee(&mut self, key: &PeriodKey, name: Option<&str>) -> AppResult<Outcome> {
        let (signer, declaration) = self.signer(SignatureRole::Employee, name)?;
        let r = self.transition(key, Action::SignEmployee, "sign_employee", |wf| {
            wf.sign_employee(&signer, &declaration)
        })?;
        Ok(r.into())
    }

    pub fn sign_manager(&mut self, key: &PeriodKey, name: Option<&str>) -> AppResult<Outcome> {
        let (signer, declaration) = self.signer(SignatureRole::Manager, name)?;
        let r = self.transition(key, Action::SignManager, "sign_manager", |wf| {
            wf.sign_manager(&signer, &declaration)
        })?;
        Ok(r.into())
    }

    pub fn submit(&mut self, key: &PeriodKey) -> AppResult<Outcome> {
        let r = self.transition(key, Action::Submit, "submit", |wf| Ok(wf.submit()))?;
        Ok(r.into())
    }

    pub fn set_manager_note(&mut self, key: &PeriodKey, note: &str) -> AppResult<Outcome> {
        let r = self.transition(key, Action::ManagerNote, "manager_note", |wf| {
            Ok(wf.set_manager_note(note))
        })?;
        Ok(r.into())
    }

    pub fn approve(&mut self, key: &PeriodKey) -> AppResult<Outcome> {
        let r = self.transition(key, Action::Approve, "approve", |wf| Ok(wf.approve()))?;
        Ok(r.into())
    }

    /// Reject, optionally replacing the manager note in the same step.
    /// A refused rejection leaves the note untouched.
    pub fn reject(&mut self, key: &PeriodKey, note: Option<&str>) -> AppResult<Outcome> {
        let r = self.transition(key, Action::Reject, "reject", |wf| {
            if let Some(n) = note
                && let Err(e) = wf.set_manager_note(n)
            {
                return Ok(Err(e));
            }
            Ok(wf.reject())
        })?;
        Ok(r.into())
    }

    pub fn payroll_validate(&mut self, key: &PeriodKey) -> AppResult<Outcome> {
        let r = self.transition(key, Action::PayrollValidate, "payroll_validate", |wf| {
            Ok(wf.payroll_validate())
        })?;
        Ok(r.into())
    }

    pub fn lock(&mut self, key: &PeriodKey) -> AppResult<Outcome> {
        let r = self.transition(key, Action::Lock, "lock", |wf| Ok(wf.lock()))?;
        Ok(r.into())
    }

    pub fn create_export_batch(&mut self, key: &PeriodKey) -> AppResult<Guarded<ExportBatch>> {
        self.transition(key, Action::CreateExportBatch, "export_batch", |wf| {
            wf.create_export_batch()
        })
    }

    // ---------------------------
    // Rules
    // ---------------------------

    /// Replace the active rules and re-derive every stored period in the
    /// same transaction.
    pub fn update_rules(&mut self, patch: &RulePatch) -> AppResult<Outcome> {
        if let Err(e) = require_role(self.ctx.role, Action::UpdateRules) {
            return Ok(e.into());
        }
        if patch.is_empty() {
            return Ok(GuardError::EmptyPatch.into());
        }

        let cfg = self.cfg;
        let ctx = &self.ctx;

        self.store.with_transaction(|store| {
            let current = active_rules(store, cfg)?;
            let next = current.patched(patch)?;

            store.save_rules(&next)?;
            store.record(
                &ctx.event("rule_settings", "active", "update")
                    .change(
                        "rules",
                        serde_json::to_value(&current)?,
                        serde_json::to_value(&next)?,
                    ),
            )?;

            let mut touched = 0usize;
            for key in store.period_keys()? {
                let Some(mut state) = store.load_period(&key)? else {
                    continue;
                };
                normalize(&key, &mut state, &current);
                let before = state.clone();

                apply_rules(&mut state, &next);

                if state != before {
                    store.save_period(&key, &state)?;
                    let ev = diff_event(
                        ctx.event("periods", key.to_string(), "rules_rederive"),
                        &before,
                        &state,
                    )?;
                    store.record(&ev)?;
                    touched += 1;
                }
            }

            Ok(Outcome::ok(format!(
                "Rules updated; {touched} period(s) re-derived."
            )))
        })
    }

    // ---------------------------
    // Planned leave
    // ---------------------------

    pub fn add_planned_leave(
        &mut self,
        date: NaiveDate,
        hours: f64,
        note: &str,
    ) -> AppResult<Outcome> {
        if let Err(e) = require_role(self.ctx.role, Action::PlanLeave) {
            return Ok(e.into());
        }
        if !hours.is_finite() || hours <= 0.0 {
            return Ok(GuardError::PlannedLeaveInvalid.into());
        }

        let ctx = &self.ctx;

        self.store.with_transaction(|store| {
            let prefix = format!("LV-{}-", date.format("%Y%m%d"));
            let next = store
                .planned_leave(None)?
                .iter()
                .filter_map(|l| l.id.strip_prefix(&prefix))
                .filter_map(|n| n.parse::<u32>().ok())
                .max()
                .unwrap_or(0)
                + 1;

            let leave = PlannedLeave {
                id: format!("{prefix}{next:03}"),
                date,
                hours,
                note: note.trim().to_string(),
            };

            store.insert_planned_leave(&leave)?;
            store.record(
                &ctx.event("planned_leave", leave.id.clone(), "create")
                    .metadata(serde_json::to_value(&leave)?),
            )?;

            Ok(Outcome::ok(format!(
                "Planned leave {} added for {} ({} h).",
                leave.id, leave.date, leave.hours
            )))
        })
    }

    pub fn remove_planned_leave(&mut self, id: &str) -> AppResult<Outcome> {
        if let Err(e) = require_role(self.ctx.role, Action::PlanLeave) {
            return Ok(e.into());
        }

        let ctx = &self.ctx;

        self.store.with_transaction(|store| {
            if !store.delete_planned_leave(id)? {
                return Ok(GuardError::NoSuchPlannedLeave(id.to_string()).into());
            }

            store.record(&ctx.event("planned_leave", id, "delete"))?;
            Ok(Outcome::ok(format!("Planned leave {id} removed.")))
        })
    }

    // ---------------------------
    // Signature profiles
    // ---------------------------

    /// Save the signer profile of the caller's own signing role.
    pub fn save_signature_profile(
        &mut self,
        full_name: &str,
        declaration: Option<&str>,
    ) -> AppResult<Outcome> {
        if let Err(e) = require_role(self.ctx.role, Action::ManageSignatureProfile) {
            return Ok(e.into());
        }
        let Some(role) = SignatureRole::for_role(self.ctx.role) else {
            return Ok(GuardError::NoSignatureRole.into());
        };
        if !signer_name_ok(full_name) {
            return Ok(match role {
                SignatureRole::Employee => GuardError::EmployeeSignerName,
                SignatureRole::Manager => GuardError::ManagerSignerName,
            }
            .into());
        }

        let profile = SignatureProfile {
            role,
            full_name: full_name.trim().to_string(),
            declaration: declaration
                .map(str::trim)
                .filter(|d| !d.is_empty())
                .unwrap_or(role.default_declaration())
                .to_string(),
            updated_at: self.ctx.now,
        };

        let ctx = &self.ctx;

        self.store.with_transaction(|store| {
            let old = store.signature_profile(role)?;
            store.save_signature_profile(&profile)?;
            store.record(
                &ctx.event("signature_profiles", role.as_str(), "upsert").change(
                    "full_name",
                    json!(old.as_ref().map(|p| p.full_name.clone())),
                    json!(profile.full_name),
                ),
            )?;

            Ok(Outcome::ok(format!(
                "{} signature profile saved for {}.",
                role.as_str(),
                profile.full_name
            )))
        })
    }
}
