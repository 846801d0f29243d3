//! Approval workflow state machine for one period.
//!
//! Every transition is guarded. A failed guard is returned as a
//! `GuardError` whose text is the user-facing explanation; the state is left
//! untouched in that case. Only hashing/serialization faults travel as
//! `AppError`.

use crate::core::calculator::{calculate_period, classify_day};
use crate::core::checksum::{batch_id, export_checksum};
use crate::core::signature::signature_hash;
use crate::errors::AppResult;
use crate::models::action::Action;
use crate::models::calculation::TimesheetComputed;
use crate::models::entry::{DayPatch, LinePatch, ProjectLine};
use crate::models::period::{ApprovalAction, ApprovalEvent, ExportBatch, PeriodKey, PeriodState};
use crate::models::role::Role;
use crate::models::signature::{ElectronicSignature, MIN_SIGNER_NAME_LEN, SignatureRole};
use crate::models::status::WorkflowStatus;
use crate::models::rules::RuleConfiguration;
use chrono::{DateTime, NaiveDate, Utc};
use thiserror::Error;

/// Minimum trimmed length of a rejection note.
pub const MIN_REJECTION_NOTE_LEN: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GuardError {
    #[error("Role {role} is not allowed to {action}.")]
    Forbidden { role: Role, action: &'static str },

    #[error("Timesheet is {0}; entries can only be edited in Draft or Rejected status.")]
    NotEditable(WorkflowStatus),

    #[error("No entry for {0}: only business days of the period can be edited.")]
    NoSuchDay(NaiveDate),

    #[error("No project line '{line_id}' on {date}.")]
    NoSuchLine { date: NaiveDate, line_id: String },

    #[error("Project line hours must be a finite number.")]
    NonFiniteHours,

    #[error("Employee signing is only available in Draft or Rejected status.")]
    EmployeeSignStatus,

    #[error("Fix validation errors before signing.")]
    BlockingErrorsBeforeSign,

    #[error("Enter the employee full name for electronic signature.")]
    EmployeeSignerName,

    #[error("Only Draft or Rejected timesheets can be submitted.")]
    SubmitStatus,

    #[error("Fix validation errors before submit.")]
    BlockingErrorsBeforeSubmit,

    #[error("Employee electronic signature is required before submit.")]
    EmployeeSignatureRequired,

    #[error("Manager signing is only available for submitted timesheets.")]
    ManagerSignStatus,

    #[error("Valid employee electronic signature is required before manager signing.")]
    EmployeeSignatureRequiredForManager,

    #[error("Enter the manager full name for electronic signature.")]
    ManagerSignerName,

    #[error("Manager note can only be changed on submitted timesheets.")]
    NoteStatus,

    #[error("Manager can approve only submitted timesheets.")]
    ApproveStatus,

    #[error("Manager electronic signature is required before approval.")]
    ManagerSignatureRequired,

    #[error("Add manager confirmation note for OT/PH approval.")]
    ApprovalNoteRequired,

    #[error("Manager can reject only submitted timesheets.")]
    RejectStatus,

    #[error("Rejection note is required (at least 5 characters).")]
    RejectionNoteTooShort,

    #[error("Payroll validation requires manager approval first.")]
    PayrollValidateStatus,

    #[error(
        "Employee and manager electronic signatures are required before payroll validation."
    )]
    PayrollSignaturesRequired,

    #[error("Only payroll-validated timesheets can be locked.")]
    LockStatus,

    #[error("Export requires payroll validated or locked status.")]
    ExportStatus,

    #[error("Signature profiles exist only for EMPLOYEE and MANAGER.")]
    NoSignatureRole,

    #[error("Date and hours are required for planned leave.")]
    PlannedLeaveInvalid,

    #[error("No planned leave with id '{0}'.")]
    NoSuchPlannedLeave(String),

    #[error("Nothing to change.")]
    EmptyPatch,
}

pub type Guarded<T> = Result<T, GuardError>;

/// Status guard through the status lookup table, mapped to the
/// transition-specific explanation.
fn require_status(status: WorkflowStatus, action: Action) -> Guarded<()> {
    if status.permits(action) {
        return Ok(());
    }

    Err(match action {
        Action::EditContent => GuardError::NotEditable(status),
        Action::SignEmployee => GuardError::EmployeeSignStatus,
        Action::Submit => GuardError::SubmitStatus,
        Action::SignManager => GuardError::ManagerSignStatus,
        Action::ManagerNote => GuardError::NoteStatus,
        Action::Approve => GuardError::ApproveStatus,
        Action::Reject => GuardError::RejectStatus,
        Action::PayrollValidate => GuardError::PayrollValidateStatus,
        Action::Lock => GuardError::LockStatus,
        Action::CreateExportBatch => GuardError::ExportStatus,
        Action::ViewPeriod
        | Action::UpdateRules
        | Action::PlanLeave
        | Action::ManageSignatureProfile => GuardError::NotEditable(status),
    })
}

/// Role guard through the role lookup table.
pub fn require_role(role: Role, action: Action) -> Guarded<()> {
    if role.permits(action) {
        Ok(())
    } else {
        Err(GuardError::Forbidden {
            role,
            action: action.as_str(),
        })
    }
}

/// A signer name must carry at least `MIN_SIGNER_NAME_LEN` characters once trimmed.
pub fn signer_name_ok(name: &str) -> bool {
    name.trim().chars().count() >= MIN_SIGNER_NAME_LEN
}

/// One period under mutation. Owns nothing; borrows the state for the span
/// of a single command.
pub struct Workflow<'a> {
    pub key: PeriodKey,
    pub state: &'a mut PeriodState,
    pub rules: &'a RuleConfiguration,
    pub as_of: Option<NaiveDate>,
    pub now: DateTime<Utc>,
    /// Label written in the approval trail.
    pub actor: String,
}

impl<'a> Workflow<'a> {
    pub fn computed(&self) -> TimesheetComputed {
        calculate_period(&self.state.day_entries, self.rules, self.as_of)
    }

    fn record(&mut self, action: ApprovalAction, note: String) {
        self.state.approval_events.push(ApprovalEvent {
            timestamp: self.now,
            actor: self.actor.clone(),
            action,
            note,
        });
    }

    // ---------------------------
    // Content edits
    // ---------------------------

    /// Common tail of every content edit: the day type follows the current
    /// rules and previous attestations no longer match the content.
    fn touch(&mut self, date: NaiveDate) {
        let rules = self.rules;
        if let Some(entry) = self.state.entry_mut(date) {
            entry.day_type = classify_day(entry.date, rules);
            if !entry.has_absence() && entry.project_lines.is_empty() {
                let id = entry.next_line_id();
                entry.project_lines.push(ProjectLine::new(id, "", 0.0));
            }
        }
        self.state.clear_signatures();
    }

    pub fn edit_day(&mut self, date: NaiveDate, patch: &DayPatch) -> Guarded<String> {
        require_status(self.state.status, Action::EditContent)?;

        if patch.absence_code.is_none() && patch.notes.is_none() {
            return Err(GuardError::EmptyPatch);
        }

        let entry = self.state.entry_mut(date).ok_or(GuardError::NoSuchDay(date))?;

        if let Some(code) = &patch.absence_code {
            entry.absence_code = code.trim().to_string();
            if !entry.absence_code.is_empty() {
                entry.project_lines.clear();
            }
        }

        if let Some(notes) = &patch.notes {
            entry.notes = notes.clone();
        }

        self.touch(date);
        Ok(format!("Day {date} updated."))
    }

    pub fn add_project_line(
        &mut self,
        date: NaiveDate,
        description: &str,
        hours: f64,
    ) -> Guarded<String> {
        require_status(self.state.status, Action::EditContent)?;

        if !hours.is_finite() {
            return Err(GuardError::NonFiniteHours);
        }

        let entry = self.state.entry_mut(date).ok_or(GuardError::NoSuchDay(date))?;
        let id = entry.next_line_id();

        entry.absence_code.clear();
        entry
            .project_lines
            .push(ProjectLine::new(id.clone(), description, hours));

        self.touch(date);
        Ok(id)
    }

    pub fn update_project_line(
        &mut self,
        date: NaiveDate,
        line_id: &str,
        patch: &LinePatch,
    ) -> Guarded<String> {
        require_status(self.state.status, Action::EditContent)?;

        if patch.description.is_none() && patch.hours.is_none() {
            return Err(GuardError::EmptyPatch);
        }
        if patch.hours.is_some_and(|h| !h.is_finite()) {
            return Err(GuardError::NonFiniteHours);
        }

        let entry = self.state.entry_mut(date).ok_or(GuardError::NoSuchDay(date))?;
        let line = entry.line_mut(line_id).ok_or_else(|| GuardError::NoSuchLine {
            date,
            line_id: line_id.to_string(),
        })?;

        if let Some(d) = &patch.description {
            line.description = d.clone();
        }
        if let Some(h) = patch.hours {
            line.hours = h;
        }

        // hours and an absence code never coexist
        if entry.worked_hours() > 0.0 {
            entry.absence_code.clear();
        }

        self.touch(date);
        Ok(format!("Project line {line_id} on {date} updated."))
    }

    pub fn remove_project_line(&mut self, date: NaiveDate, line_id: &str) -> Guarded<String> {
        require_status(self.state.status, Action::EditContent)?;

        let entry = self.state.entry_mut(date).ok_or(GuardError::NoSuchDay(date))?;
        let before = entry.project_lines.len();
        entry.project_lines.retain(|l| l.id != line_id);

        if entry.project_lines.len() == before {
            return Err(GuardError::NoSuchLine {
                date,
                line_id: line_id.to_string(),
            });
        }

        self.touch(date);
        Ok(format!("Project line {line_id} on {date} removed."))
    }

    // ---------------------------
    // Signatures
    // ---------------------------

    pub fn sign_employee(
        &mut self,
        signer: &str,
        declaration: &str,
    ) -> AppResult<Guarded<String>> {
        if let Err(e) = require_status(self.state.status, Action::SignEmployee) {
            return Ok(Err(e));
        }
        if self.computed().has_blocking_errors {
            return Ok(Err(GuardError::BlockingErrorsBeforeSign));
        }
        if !signer_name_ok(signer) {
            return Ok(Err(GuardError::EmployeeSignerName));
        }

        let signer = signer.trim();
        let hash = signature_hash(
            SignatureRole::Employee,
            &self.key,
            self.state,
            signer,
            declaration,
        )?;

        self.state.employee_signature = Some(ElectronicSignature {
            signed_by: signer.to_string(),
            signed_at: self.now,
            signature_hash: hash.clone(),
            declaration_text: declaration.to_string(),
            revision_no: self.state.revision_no,
        });
        self.state.manager_signature = None;

        self.record(
            ApprovalAction::EmployeeESign,
            format!("Employee e-signed by {signer}; hash {hash}"),
        );

        Ok(Ok("Employee electronic signature captured.".to_string()))
    }

    pub fn sign_manager(&mut self, signer: &str, declaration: &str) -> AppResult<Guarded<String>> {
        if let Err(e) = require_status(self.state.status, Action::SignManager) {
            return Ok(Err(e));
        }
        if !self.state.has_current_employee_signature() {
            return Ok(Err(GuardError::EmployeeSignatureRequiredForManager));
        }
        if !signer_name_ok(signer) {
            return Ok(Err(GuardError::ManagerSignerName));
        }

        let signer = signer.trim();
        let hash = signature_hash(
            SignatureRole::Manager,
            &self.key,
            self.state,
            signer,
            declaration,
        )?;

        self.state.manager_signature = Some(ElectronicSignature {
            signed_by: signer.to_string(),
            signed_at: self.now,
            signature_hash: hash.clone(),
            declaration_text: declaration.to_string(),
            revision_no: self.state.revision_no,
        });

        self.record(
            ApprovalAction::ManagerESign,
            format!("Manager e-signed by {signer}; hash {hash}"),
        );

        Ok(Ok("Manager electronic signature captured.".to_string()))
    }

    // ---------------------------
    // Transitions
    // ---------------------------

    pub fn submit(&mut self) -> Guarded<String> {
        require_status(self.state.status, Action::Submit)?;

        if self.computed().has_blocking_errors {
            return Err(GuardError::BlockingErrorsBeforeSubmit);
        }
        if !self.state.has_current_employee_signature() {
            return Err(GuardError::EmployeeSignatureRequired);
        }

        self.state.status = WorkflowStatus::Submitted;
        self.state.manager_signature = None;

        let note = format!("Monthly timesheet submitted for {}", self.key);
        self.record(ApprovalAction::Submit, note);

        Ok("Timesheet submitted.".to_string())
    }

    pub fn set_manager_note(&mut self, note: &str) -> Guarded<String> {
        require_status(self.state.status, Action::ManagerNote)?;

        if self.state.manager_note != note {
            self.state.manager_note = note.to_string();
            self.state.manager_signature = None;
        }

        Ok("Manager note saved.".to_string())
    }

    pub fn approve(&mut self) -> Guarded<String> {
        require_status(self.state.status, Action::Approve)?;

        if !self.state.has_current_manager_signature() {
            return Err(GuardError::ManagerSignatureRequired);
        }
        if self.computed().requires_manager_approval && self.state.manager_note.trim().is_empty()
        {
            return Err(GuardError::ApprovalNoteRequired);
        }

        self.state.status = WorkflowStatus::ManagerApproved;

        let note = if self.state.manager_note.trim().is_empty() {
            "Approved".to_string()
        } else {
            self.state.manager_note.clone()
        };
        self.record(ApprovalAction::ManagerApprove, note);

        Ok("Manager approved.".to_string())
    }

    pub fn reject(&mut self) -> Guarded<String> {
        require_status(self.state.status, Action::Reject)?;

        if self.state.manager_note.trim().chars().count() < MIN_REJECTION_NOTE_LEN {
            return Err(GuardError::RejectionNoteTooShort);
        }

        self.state.status = WorkflowStatus::ManagerRejected;
        self.state.revision_no += 1;
        self.state.clear_signatures();

        let note = self.state.manager_note.clone();
        self.record(ApprovalAction::ManagerReject, note);

        Ok("Manager rejected. Employee can edit and resubmit.".to_string())
    }

    pub fn payroll_validate(&mut self) -> Guarded<String> {
        require_status(self.state.status, Action::PayrollValidate)?;

        if self.state.employee_signature.is_none() || self.state.manager_signature.is_none() {
            return Err(GuardError::PayrollSignaturesRequired);
        }

        self.state.status = WorkflowStatus::PayrollValidated;
        self.record(
            ApprovalAction::PayrollValidate,
            "All blocking exceptions resolved".to_string(),
        );

        Ok("Payroll validated.".to_string())
    }

    pub fn lock(&mut self) -> Guarded<String> {
        require_status(self.state.status, Action::Lock)?;

        self.state.status = WorkflowStatus::Locked;
        self.record(ApprovalAction::Lock, "Month locked".to_string());

        Ok("Month locked.".to_string())
    }

    pub fn create_export_batch(&mut self) -> AppResult<Guarded<ExportBatch>> {
        if let Err(e) = require_status(self.state.status, Action::CreateExportBatch) {
            return Ok(Err(e));
        }

        let totals = self.computed().period_totals;
        let checksum = export_checksum(&self.key, self.state, &totals)?;
        let batch = ExportBatch {
            batch_id: batch_id(&self.key, self.now, &self.state.export_batches),
            created_at: self.now,
            line_count: self.state.reportable_lines(),
            checksum,
        };

        self.state.export_batches.insert(0, batch.clone());
        self.record(ApprovalAction::ExportBatch, format!("Batch {}", batch.batch_id));

        Ok(Ok(batch))
    }
}

/// Re-derive every day type under `rules`. Signatures are dropped only before
/// manager approval.
pub fn apply_rules(state: &mut PeriodState, rules: &RuleConfiguration) {
    for entry in &mut state.day_entries {
        entry.day_type = classify_day(entry.date, rules);
    }

    if matches!(
        state.status,
        WorkflowStatus::Draft | WorkflowStatus::Submitted | WorkflowStatus::ManagerRejected
    ) {
        state.clear_signatures();
    }
}
