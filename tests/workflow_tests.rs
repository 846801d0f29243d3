use rtimesheet::config::Config;
use rtimesheet::core::service::Outcome;
use rtimesheet::core::signature::signature_hash;
use rtimesheet::core::store::TimesheetStore;
use rtimesheet::core::workflow::{GuardError, Workflow};
use rtimesheet::db::SqliteStore;
use rtimesheet::errors::AppError;
use rtimesheet::models::day_type::DayType;
use rtimesheet::models::entry::{DayPatch, LinePatch};
use rtimesheet::models::period::{ApprovalAction, PeriodKey, PeriodState};
use rtimesheet::models::role::Role;
use rtimesheet::models::rules::{RuleConfiguration, RulePatch};
use rtimesheet::models::signature::{EMPLOYEE_DECLARATION, SignatureRole};
use rtimesheet::models::status::WorkflowStatus;

mod common;
use common::{d, service};

fn key() -> PeriodKey {
    "2026-03".parse().expect("period key")
}

fn setup() -> (SqliteStore, Config) {
    (SqliteStore::in_memory().expect("in-memory store"), Config::default())
}

fn state(store: &SqliteStore) -> PeriodState {
    store
        .load_period(&key())
        .expect("load period")
        .expect("period exists")
}

fn assert_ok(out: Outcome) {
    assert!(out.ok, "unexpected refusal: {}", out.message);
}

fn assert_refused(out: Outcome, needle: &str) {
    assert!(!out.ok, "expected refusal containing '{needle}'");
    assert!(
        out.message.contains(needle),
        "message '{}' does not contain '{needle}'",
        out.message
    );
}

/// Employee signs and submits the default (clean) month.
fn submitted(store: &mut SqliteStore, cfg: &Config) {
    assert_ok(
        service(store, cfg, Role::Employee)
            .sign_employee(&key(), Some("Jane Doe"))
            .expect("sign"),
    );
    assert_ok(service(store, cfg, Role::Employee).submit(&key()).expect("submit"));
}

fn approved(store: &mut SqliteStore, cfg: &Config) {
    submitted(store, cfg);
    assert_ok(
        service(store, cfg, Role::Manager)
            .sign_manager(&key(), Some("Mark Boss"))
            .expect("manager sign"),
    );
    assert_ok(service(store, cfg, Role::Manager).approve(&key()).expect("approve"));
}

#[test]
fn test_new_period_is_prefilled_with_business_days() {
    let (mut store, cfg) = setup();

    let view = service(&mut store, &cfg, Role::Employee)
        .get_period(&key())
        .expect("get period")
        .expect("view allowed");

    assert_eq!(view.state.status, WorkflowStatus::Draft);
    assert_eq!(view.state.revision_no, 1);
    assert_eq!(view.state.day_entries.len(), 22);
    assert!(view.state.day_entries.iter().all(|e| e.day_type != DayType::Weekend));
    assert!(!view.computed.has_blocking_errors);
    // 18 workdays at 8h, 4 Fridays at 6h
    assert_eq!(view.computed.period_totals.normal_minutes, 18 * 480 + 4 * 360);

    let monday = view.state.entry(d(2026, 3, 2)).expect("monday entry");
    assert_eq!(monday.project_lines.len(), 1);
    assert_eq!(monday.project_lines[0].id, "PL-20260302-001");
    assert_eq!(monday.project_lines[0].description, "General Project Work");

    // first access persisted the period
    assert_eq!(store.period_keys().expect("keys"), vec![key()]);
}

#[test]
fn test_public_holiday_is_prefilled_with_ph() {
    let (mut store, mut cfg) = setup();
    cfg.rules.public_holiday_dates.insert(d(2026, 3, 10));

    let view = service(&mut store, &cfg, Role::Employee)
        .get_period(&key())
        .expect("get period")
        .expect("view allowed");

    let ph = view.state.entry(d(2026, 3, 10)).expect("holiday entry");
    assert_eq!(ph.day_type, DayType::PublicHoliday);
    assert_eq!(ph.absence_code, "PH");
    assert_eq!(ph.notes, "Public holiday");
    assert!(ph.project_lines.is_empty());
    assert_eq!(view.computed.by_date[&d(2026, 3, 10)].leave_minutes, 480);
}

#[test]
fn test_approve_requires_manager_signature() {
    let (mut store, cfg) = setup();
    submitted(&mut store, &cfg);

    let out = service(&mut store, &cfg, Role::Manager)
        .approve(&key())
        .expect("approve");

    assert_refused(out, "Manager electronic signature is required before approval.");
    assert_eq!(state(&store).status, WorkflowStatus::Submitted);
}

#[test]
fn test_reject_needs_note_and_bumps_revision() {
    let (mut store, cfg) = setup();
    submitted(&mut store, &cfg);

    let out = service(&mut store, &cfg, Role::Manager)
        .reject(&key(), Some("bad"))
        .expect("reject");
    assert_refused(out, "Rejection note is required (at least 5 characters).");

    let s = state(&store);
    assert_eq!(s.status, WorkflowStatus::Submitted);
    assert_eq!(s.revision_no, 1);
    assert_eq!(s.manager_note, "");

    assert_ok(
        service(&mut store, &cfg, Role::Manager)
            .reject(&key(), Some("Fix it"))
            .expect("reject"),
    );

    let s = state(&store);
    assert_eq!(s.status, WorkflowStatus::ManagerRejected);
    assert_eq!(s.revision_no, 2);
    assert!(s.employee_signature.is_none());
    assert!(s.manager_signature.is_none());
    assert_eq!(
        s.approval_events.last().map(|e| e.action),
        Some(ApprovalAction::ManagerReject)
    );
}

#[test]
fn test_rejected_period_is_edited_and_resubmitted() {
    let (mut store, cfg) = setup();
    submitted(&mut store, &cfg);
    assert_ok(
        service(&mut store, &cfg, Role::Manager)
            .reject(&key(), Some("Wrong project on the 2nd"))
            .expect("reject"),
    );

    assert_ok(
        service(&mut store, &cfg, Role::Employee)
            .update_project_line(
                &key(),
                d(2026, 3, 2),
                "PL-20260302-001",
                &LinePatch {
                    description: Some("Project Apollo".to_string()),
                    hours: None,
                },
            )
            .expect("update line"),
    );

    // the old signature belonged to revision 1
    assert_refused(
        service(&mut store, &cfg, Role::Employee)
            .submit(&key())
            .expect("submit"),
        "Employee electronic signature is required before submit.",
    );

    submitted(&mut store, &cfg);

    let s = state(&store);
    assert_eq!(s.status, WorkflowStatus::Submitted);
    assert_eq!(s.revision_no, 2);
    assert_eq!(
        s.employee_signature.as_ref().map(|sig| sig.revision_no),
        Some(2)
    );
}

#[test]
fn test_full_workflow_to_export_batch() {
    let (mut store, cfg) = setup();
    approved(&mut store, &cfg);

    assert_ok(
        service(&mut store, &cfg, Role::Payroll)
            .payroll_validate(&key())
            .expect("validate"),
    );
    assert_ok(service(&mut store, &cfg, Role::Payroll).lock(&key()).expect("lock"));

    let batch = service(&mut store, &cfg, Role::Payroll)
        .create_export_batch(&key())
        .expect("export")
        .expect("export allowed");

    assert!(batch.batch_id.starts_with("TSB-202603-"));
    assert_eq!(batch.line_count, 22);
    assert_eq!(batch.checksum.len(), 8);
    assert!(batch.checksum.chars().all(|c| c.is_ascii_hexdigit()));

    let s = state(&store);
    assert_eq!(s.status, WorkflowStatus::Locked);
    assert_eq!(s.export_batches.len(), 1);

    let actions: Vec<ApprovalAction> = s.approval_events.iter().map(|e| e.action).collect();
    assert_eq!(
        actions,
        vec![
            ApprovalAction::EmployeeESign,
            ApprovalAction::Submit,
            ApprovalAction::ManagerESign,
            ApprovalAction::ManagerApprove,
            ApprovalAction::PayrollValidate,
            ApprovalAction::Lock,
            ApprovalAction::ExportBatch,
        ]
    );
    assert_eq!(s.approval_events[0].actor, "Employee (Jane Doe)");

    // a locked month accepts no further content edits
    assert_refused(
        service(&mut store, &cfg, Role::Employee)
            .add_project_line(&key(), d(2026, 3, 2), "Late", 1.0)
            .expect("edit"),
        "only be edited in Draft or Rejected",
    );
}

#[test]
fn test_export_checksum_is_stable_and_batches_are_newest_first() {
    let (mut store, cfg) = setup();
    approved(&mut store, &cfg);
    assert_ok(
        service(&mut store, &cfg, Role::Payroll)
            .payroll_validate(&key())
            .expect("validate"),
    );

    let first = service(&mut store, &cfg, Role::Payroll)
        .create_export_batch(&key())
        .expect("export")
        .expect("export allowed");
    let second = service(&mut store, &cfg, Role::Payroll)
        .create_export_batch(&key())
        .expect("export")
        .expect("export allowed");

    assert_eq!(first.checksum, second.checksum);
    assert_ne!(first.batch_id, second.batch_id);

    let s = state(&store);
    assert_eq!(s.export_batches[0].batch_id, second.batch_id);
    assert_eq!(s.export_batches[1].batch_id, first.batch_id);
}

#[test]
fn test_export_requires_payroll_validation() {
    let (mut store, cfg) = setup();
    approved(&mut store, &cfg);

    let refused = service(&mut store, &cfg, Role::Payroll)
        .create_export_batch(&key())
        .expect("export");

    let err = refused.expect_err("export must be refused");
    assert_eq!(
        err.to_string(),
        "Export requires payroll validated or locked status."
    );
}

#[test]
fn test_overtime_approval_needs_manager_note() {
    let (mut store, cfg) = setup();
    assert_ok(
        service(&mut store, &cfg, Role::Employee)
            .add_project_line(&key(), d(2026, 3, 2), "Release night", 1.5)
            .expect("add line"),
    );
    submitted(&mut store, &cfg);
    assert_ok(
        service(&mut store, &cfg, Role::Manager)
            .sign_manager(&key(), Some("Mark Boss"))
            .expect("manager sign"),
    );

    assert_refused(
        service(&mut store, &cfg, Role::Manager)
            .approve(&key())
            .expect("approve"),
        "Add manager confirmation note for OT/PH approval.",
    );

    // a new note invalidates the manager signature
    assert_ok(
        service(&mut store, &cfg, Role::Manager)
            .set_manager_note(&key(), "OT approved for the release")
            .expect("note"),
    );
    assert!(state(&store).manager_signature.is_none());

    assert_refused(
        service(&mut store, &cfg, Role::Manager)
            .approve(&key())
            .expect("approve"),
        "Manager electronic signature is required",
    );

    assert_ok(
        service(&mut store, &cfg, Role::Manager)
            .sign_manager(&key(), Some("Mark Boss"))
            .expect("manager sign"),
    );
    assert_ok(service(&mut store, &cfg, Role::Manager).approve(&key()).expect("approve"));

    let s = state(&store);
    assert_eq!(s.status, WorkflowStatus::ManagerApproved);
    assert_eq!(
        s.approval_events.last().map(|e| e.note.as_str()),
        Some("OT approved for the release")
    );
}

#[test]
fn test_content_edit_clears_signatures() {
    let (mut store, cfg) = setup();
    assert_ok(
        service(&mut store, &cfg, Role::Employee)
            .sign_employee(&key(), Some("Jane Doe"))
            .expect("sign"),
    );
    assert!(state(&store).employee_signature.is_some());

    assert_ok(
        service(&mut store, &cfg, Role::Employee)
            .edit_day(
                &key(),
                d(2026, 3, 3),
                &DayPatch {
                    absence_code: None,
                    notes: Some("Client workshop".to_string()),
                },
            )
            .expect("edit"),
    );

    assert!(state(&store).employee_signature.is_none());
}

#[test]
fn test_absence_and_lines_exclude_each_other() {
    let (mut store, cfg) = setup();

    assert_ok(
        service(&mut store, &cfg, Role::Employee)
            .edit_day(
                &key(),
                d(2026, 3, 4),
                &DayPatch {
                    absence_code: Some("AL".to_string()),
                    notes: None,
                },
            )
            .expect("edit"),
    );
    let s = state(&store);
    let day = s.entry(d(2026, 3, 4)).expect("entry");
    assert_eq!(day.absence_code, "AL");
    assert!(day.project_lines.is_empty());

    assert_ok(
        service(&mut store, &cfg, Role::Employee)
            .add_project_line(&key(), d(2026, 3, 4), "Came in anyway", 4.0)
            .expect("add line"),
    );
    let s = state(&store);
    let day = s.entry(d(2026, 3, 4)).expect("entry");
    assert_eq!(day.absence_code, "");
    assert_eq!(day.project_lines.len(), 1);
    assert_eq!(day.project_lines[0].id, "PL-20260304-001");

    // removing the only line leaves one empty line behind
    assert_ok(
        service(&mut store, &cfg, Role::Employee)
            .remove_project_line(&key(), d(2026, 3, 4), "PL-20260304-001")
            .expect("remove line"),
    );
    let s = state(&store);
    let day = s.entry(d(2026, 3, 4)).expect("entry");
    assert!(!day.has_absence());
    assert_eq!(day.project_lines.len(), 1);
    assert_eq!(day.project_lines[0].hours, 0.0);
    assert_eq!(day.project_lines[0].description, "");
}

#[test]
fn test_weekend_and_unknown_lines_are_refused() {
    let (mut store, cfg) = setup();

    assert_refused(
        service(&mut store, &cfg, Role::Employee)
            .add_project_line(&key(), d(2026, 3, 7), "Saturday", 3.0)
            .expect("add line"),
        "No entry for 2026-03-07",
    );

    assert_refused(
        service(&mut store, &cfg, Role::Employee)
            .remove_project_line(&key(), d(2026, 3, 2), "PL-20260302-009")
            .expect("remove line"),
        "No project line 'PL-20260302-009'",
    );

    assert_refused(
        service(&mut store, &cfg, Role::Employee)
            .add_project_line(&key(), d(2026, 3, 2), "NaN", f64::NAN)
            .expect("add line"),
        "finite",
    );
}

#[test]
fn test_sign_refused_while_blocking_errors() {
    let (mut store, cfg) = setup();
    assert_ok(
        service(&mut store, &cfg, Role::Employee)
            .edit_day(
                &key(),
                d(2026, 3, 5),
                &DayPatch {
                    absence_code: Some("XX".to_string()),
                    notes: None,
                },
            )
            .expect("edit"),
    );

    assert_refused(
        service(&mut store, &cfg, Role::Employee)
            .sign_employee(&key(), Some("Jane Doe"))
            .expect("sign"),
        "Fix validation errors before signing.",
    );
}

#[test]
fn test_roles_are_enforced() {
    let (mut store, cfg) = setup();
    submitted(&mut store, &cfg);

    assert_refused(
        service(&mut store, &cfg, Role::Employee)
            .approve(&key())
            .expect("approve"),
        "not allowed",
    );
    assert_refused(
        service(&mut store, &cfg, Role::Admin)
            .reject(&key(), Some("Admin says no"))
            .expect("reject"),
        "not allowed",
    );
    assert_refused(
        service(&mut store, &cfg, Role::Manager)
            .edit_day(
                &key(),
                d(2026, 3, 2),
                &DayPatch {
                    absence_code: None,
                    notes: Some("x".to_string()),
                },
            )
            .expect("edit"),
        "not allowed",
    );
    assert_refused(
        service(&mut store, &cfg, Role::Employee)
            .update_rules(&RulePatch {
                full_day_minutes: Some(450),
                ..RulePatch::default()
            })
            .expect("rules"),
        "not allowed",
    );

    assert_eq!(state(&store).status, WorkflowStatus::Submitted);
}

#[test]
fn test_rule_minutes_must_fit_in_a_day() {
    let (mut store, cfg) = setup();

    let err = service(&mut store, &cfg, Role::Admin)
        .update_rules(&RulePatch {
            leave_default_paid_minutes: Some(i64::MAX),
            ..RulePatch::default()
        })
        .expect_err("oversized minutes rejected");
    assert!(matches!(err, AppError::Config(ref m) if m.contains("between 0 and 1440")));
    let stored = store.load_rules().expect("rules");
    assert_ne!(stored.map(|r| r.leave_default_paid_minutes), Some(i64::MAX));

    let mut rules = RuleConfiguration::default();
    rules.full_day_minutes = 1440;
    assert!(rules.validate().is_ok());
    rules.full_day_minutes = 1441;
    assert!(rules.validate().is_err());
    rules.full_day_minutes = -1;
    assert!(rules.validate().is_err());
}

#[test]
fn test_signature_hash_survives_store_round_trip() {
    let (mut store, cfg) = setup();
    assert_ok(
        service(&mut store, &cfg, Role::Employee)
            .sign_employee(&key(), Some("  Jane Doe "))
            .expect("sign"),
    );

    let reloaded = state(&store);
    let sig = reloaded.employee_signature.clone().expect("signature");
    assert_eq!(sig.signed_by, "Jane Doe");
    assert_eq!(sig.declaration_text, EMPLOYEE_DECLARATION);
    assert_eq!(sig.signature_hash.len(), 64);

    let recomputed = signature_hash(
        SignatureRole::Employee,
        &key(),
        &reloaded,
        &sig.signed_by,
        &sig.declaration_text,
    )
    .expect("hash");

    assert_eq!(recomputed, sig.signature_hash);
}

#[test]
fn test_rule_update_rederives_stored_periods() {
    let (mut store, cfg) = setup();
    assert_ok(
        service(&mut store, &cfg, Role::Employee)
            .sign_employee(&key(), Some("Jane Doe"))
            .expect("sign"),
    );

    let out = service(&mut store, &cfg, Role::Admin)
        .update_rules(&RulePatch {
            add_public_holidays: vec![d(2026, 3, 10)],
            ..RulePatch::default()
        })
        .expect("rules");
    assert_ok(out.clone());
    assert_eq!(out.message, "Rules updated; 1 period(s) re-derived.");

    let s = state(&store);
    assert_eq!(
        s.entry(d(2026, 3, 10)).map(|e| e.day_type),
        Some(DayType::PublicHoliday)
    );
    assert!(s.employee_signature.is_none());

    let rules = store.load_rules().expect("rules").expect("stored rules");
    assert!(rules.is_public_holiday(d(2026, 3, 10)));

    // the pre-filled 8h on that day are now holiday work
    let view = service(&mut store, &cfg, Role::Employee)
        .get_period(&key())
        .expect("get")
        .expect("view");
    assert_eq!(view.computed.by_date[&d(2026, 3, 10)].ph_worked_minutes, 480);
    assert!(view.computed.requires_manager_approval);

    assert_refused(
        service(&mut store, &cfg, Role::Admin)
            .update_rules(&RulePatch::default())
            .expect("rules"),
        "Nothing to change.",
    );
}

#[test]
fn test_rule_update_on_submitted_period_blocks_manager_signing() {
    let (mut store, cfg) = setup();
    submitted(&mut store, &cfg);

    assert_ok(
        service(&mut store, &cfg, Role::Admin)
            .update_rules(&RulePatch {
                add_public_holidays: vec![d(2026, 3, 10)],
                ..RulePatch::default()
            })
            .expect("rules"),
    );
    assert!(state(&store).employee_signature.is_none());

    assert_refused(
        service(&mut store, &cfg, Role::Manager)
            .sign_manager(&key(), Some("Mark Boss"))
            .expect("manager sign"),
        "Valid employee electronic signature is required before manager signing.",
    );
    assert!(state(&store).manager_signature.is_none());
}

#[test]
fn test_rule_update_keeps_signatures_after_manager_approval() {
    let (mut store, cfg) = setup();
    approved(&mut store, &cfg);

    assert_ok(
        service(&mut store, &cfg, Role::Admin)
            .update_rules(&RulePatch {
                add_public_holidays: vec![d(2026, 3, 10)],
                ..RulePatch::default()
            })
            .expect("rules"),
    );

    let s = state(&store);
    assert_eq!(s.status, WorkflowStatus::ManagerApproved);
    assert_eq!(
        s.entry(d(2026, 3, 10)).map(|e| e.day_type),
        Some(DayType::PublicHoliday)
    );
    assert!(s.employee_signature.is_some());
    assert!(s.manager_signature.is_some());

    assert_ok(
        service(&mut store, &cfg, Role::Payroll)
            .payroll_validate(&key())
            .expect("validate"),
    );
    assert_eq!(state(&store).status, WorkflowStatus::PayrollValidated);
}

#[test]
fn test_short_signer_names_are_refused() {
    let (mut store, cfg) = setup();

    assert_refused(
        service(&mut store, &cfg, Role::Employee)
            .sign_employee(&key(), Some(" Jo "))
            .expect("sign"),
        "Enter the employee full name for electronic signature.",
    );
    assert!(state(&store).employee_signature.is_none());

    submitted(&mut store, &cfg);
    assert_refused(
        service(&mut store, &cfg, Role::Manager)
            .sign_manager(&key(), Some("Mo"))
            .expect("manager sign"),
        "Enter the manager full name for electronic signature.",
    );
    assert!(state(&store).manager_signature.is_none());
}

#[test]
fn test_payroll_validation_needs_both_signatures() {
    let (mut store, cfg) = setup();
    approved(&mut store, &cfg);

    let mut s = state(&store);
    s.manager_signature = None;
    let rules = RuleConfiguration::default();
    let mut wf = Workflow {
        key: key(),
        state: &mut s,
        rules: &rules,
        as_of: Some(d(2026, 3, 31)),
        now: chrono::Utc::now(),
        actor: "Pat Payroll".to_string(),
    };

    assert_eq!(wf.payroll_validate(), Err(GuardError::PayrollSignaturesRequired));
    assert_eq!(s.status, WorkflowStatus::ManagerApproved);
    assert_eq!(
        GuardError::PayrollSignaturesRequired.to_string(),
        "Employee and manager electronic signatures are required before payroll validation."
    );
}

#[test]
fn test_planned_leave_and_balance() {
    let (mut store, cfg) = setup();

    let out = service(&mut store, &cfg, Role::Employee)
        .add_planned_leave(d(2026, 3, 16), 8.0, "Trip")
        .expect("leave");
    assert_ok(out.clone());
    assert!(out.message.contains("LV-20260316-001"));

    assert_ok(
        service(&mut store, &cfg, Role::Employee)
            .add_planned_leave(d(2026, 3, 16), 8.0, "")
            .expect("leave"),
    );
    assert_refused(
        service(&mut store, &cfg, Role::Employee)
            .add_planned_leave(d(2026, 3, 17), 0.0, "")
            .expect("leave"),
        "Date and hours are required",
    );

    assert_ok(
        service(&mut store, &cfg, Role::Employee)
            .edit_day(
                &key(),
                d(2026, 3, 4),
                &DayPatch {
                    absence_code: Some("AL".to_string()),
                    notes: None,
                },
            )
            .expect("edit"),
    );

    let summary = service(&mut store, &cfg, Role::Employee)
        .leave_summary(2026)
        .expect("summary");
    assert_eq!(summary.entitlement_hours, 152.0);
    assert_eq!(summary.taken_hours, 8.0);
    assert_eq!(summary.planned_hours, 16.0);
    assert_eq!(summary.remaining_after_taken, 144.0);
    assert_eq!(summary.remaining_after_planned, 128.0);

    assert_ok(
        service(&mut store, &cfg, Role::Employee)
            .remove_planned_leave("LV-20260316-002")
            .expect("remove"),
    );
    assert_refused(
        service(&mut store, &cfg, Role::Employee)
            .remove_planned_leave("LV-20260316-002")
            .expect("remove"),
        "No planned leave",
    );
    assert_eq!(store.planned_leave(Some(2026)).expect("list").len(), 1);
}

#[test]
fn test_signature_profile_is_used_as_signer() {
    let (mut store, cfg) = setup();

    assert_refused(
        service(&mut store, &cfg, Role::Employee)
            .save_signature_profile("Jo", None)
            .expect("profile"),
        "full name",
    );
    assert_refused(
        service(&mut store, &cfg, Role::Payroll)
            .save_signature_profile("Pat Payroll", None)
            .expect("profile"),
        "not allowed",
    );

    assert_ok(
        service(&mut store, &cfg, Role::Employee)
            .save_signature_profile("Jane Profile", None)
            .expect("profile"),
    );
    assert_ok(
        service(&mut store, &cfg, Role::Employee)
            .sign_employee(&key(), None)
            .expect("sign"),
    );

    let s = state(&store);
    assert_eq!(
        s.employee_signature.map(|sig| sig.signed_by),
        Some("Jane Profile".to_string())
    );
}

#[test]
fn test_store_detects_inconsistent_rows() {
    let (mut store, cfg) = setup();
    service(&mut store, &cfg, Role::Employee)
        .get_period(&key())
        .expect("get")
        .expect("view");

    store
        .conn()
        .execute(
            "UPDATE periods SET status = 'LOCKED' WHERE period_key = '2026-03'",
            [],
        )
        .expect("tamper");

    assert!(matches!(
        store.load_period(&key()),
        Err(AppError::CorruptState(_))
    ));
}
