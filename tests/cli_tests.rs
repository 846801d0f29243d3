use predicates::prelude::*;
use predicates::str::contains;
use std::fs;

mod common;
use common::{PERIOD, init_db, rts, rts_as, setup_test_db, temp_out};

/// Drive March 2026 through the whole workflow up to LOCKED.
fn lock_march(db: &str) {
    rts_as(db, "EMPLOYEE", &["sign", PERIOD, "--name", "Jane Doe"])
        .assert()
        .success()
        .stdout(contains("Employee electronic signature captured."));
    rts_as(db, "EMPLOYEE", &["submit", PERIOD])
        .assert()
        .success()
        .stdout(contains("Timesheet submitted."));
    rts_as(db, "MANAGER", &["sign", PERIOD, "--name", "Mark Boss"])
        .assert()
        .success();
    rts_as(db, "MANAGER", &["approve", PERIOD])
        .assert()
        .success()
        .stdout(contains("Manager approved."));
    rts_as(db, "PAYROLL", &["validate", PERIOD])
        .assert()
        .success()
        .stdout(contains("Payroll validated."));
    rts_as(db, "PAYROLL", &["lock", PERIOD])
        .assert()
        .success()
        .stdout(contains("Month locked."));
}

#[test]
fn test_init_creates_database() {
    let db = setup_test_db("cli_init");

    rts()
        .args(["--db", &db, "--test", "init"])
        .assert()
        .success()
        .stdout(contains("Database initialized at"))
        .stdout(contains("Active rules seeded"));

    assert!(fs::metadata(&db).is_ok());
}

#[test]
fn test_period_show_json_creates_draft() {
    let db = setup_test_db("cli_period_json");
    init_db(&db);

    rts_as(&db, "EMPLOYEE", &["period", "show", PERIOD, "--json"])
        .assert()
        .success()
        .stdout(contains("\"status\": \"DRAFT\""))
        .stdout(contains("\"revision_no\": 1"))
        .stdout(contains("General Project Work"));

    rts_as(&db, "EMPLOYEE", &["period", "list"])
        .assert()
        .success()
        .stdout(contains("2026-03"))
        .stdout(contains("DRAFT"));
}

#[test]
fn test_full_flow_exports_csv() {
    let db = setup_test_db("cli_full_flow");
    let out = temp_out("cli_full_flow", "csv");
    init_db(&db);

    lock_march(&db);

    rts_as(&db, "PAYROLL", &["export", PERIOD, "--file", &out])
        .assert()
        .success()
        .stdout(contains("Export batch TSB-202603-"))
        .stdout(contains("22 line(s)"));

    let content = fs::read_to_string(&out).expect("read csv");
    let mut lines = content.lines();
    assert!(
        lines
            .next()
            .is_some_and(|h| h.starts_with("period,batch_id,checksum,date"))
    );
    assert_eq!(lines.clone().count(), 22);
    assert!(content.contains("TSB-202603-"));
    assert!(content.contains("2026-03-06"));

    fs::remove_file(&out).ok();
}

#[test]
fn test_export_json_document() {
    let db = setup_test_db("cli_export_json");
    let out = temp_out("cli_export_json", "json");
    init_db(&db);

    lock_march(&db);

    rts_as(&db, "PAYROLL", &["export", PERIOD, "--format", "json", "--file", &out])
        .assert()
        .success();

    let content = fs::read_to_string(&out).expect("read json");
    let doc: serde_json::Value = serde_json::from_str(&content).expect("valid json");
    assert_eq!(doc["period"], "2026-03");
    assert_eq!(doc["status"], "LOCKED");
    assert_eq!(doc["lines"].as_array().map(|l| l.len()), Some(22));
    assert!(
        doc["batch_id"]
            .as_str()
            .is_some_and(|id| id.starts_with("TSB-202603-"))
    );

    fs::remove_file(&out).ok();
}

#[test]
fn test_export_xlsx_writes_file() {
    let db = setup_test_db("cli_export_xlsx");
    let out = temp_out("cli_export_xlsx", "xlsx");
    init_db(&db);

    lock_march(&db);

    rts_as(&db, "PAYROLL", &["export", PERIOD, "--file", &out])
        .assert()
        .success()
        .stdout(contains("XLSX"));

    let meta = fs::metadata(&out).expect("xlsx exists");
    assert!(meta.len() > 0);

    fs::remove_file(&out).ok();
}

#[test]
fn test_export_before_validation_is_refused() {
    let db = setup_test_db("cli_export_refused");
    init_db(&db);

    rts_as(&db, "PAYROLL", &["export", PERIOD])
        .assert()
        .code(2)
        .stdout(contains("Export requires payroll validated or locked status."));
}

#[test]
fn test_export_to_relative_path_records_no_batch() {
    let db = setup_test_db("cli_export_relative");
    init_db(&db);

    lock_march(&db);

    rts_as(&db, "PAYROLL", &["export", PERIOD, "--file", "relative_out.csv"])
        .assert()
        .failure()
        .stderr(contains("Output file path must be absolute"));

    rts_as(&db, "PAYROLL", &["period", "show", PERIOD, "--json"])
        .assert()
        .success()
        .stdout(contains("\"status\": \"LOCKED\""))
        .stdout(contains("batch_id").not());
}

#[test]
fn test_declined_overwrite_records_no_batch() {
    let db = setup_test_db("cli_export_declined");
    let out = temp_out("cli_export_declined", "csv");
    init_db(&db);

    lock_march(&db);
    fs::write(&out, "keep me").expect("seed output file");

    rts_as(&db, "PAYROLL", &["export", PERIOD, "--file", &out])
        .write_stdin("n\n")
        .assert()
        .failure()
        .stderr(contains("existing file not overwritten"))
        .stdout(contains("Export batch").not());

    assert_eq!(fs::read_to_string(&out).expect("read seed"), "keep me");
    rts_as(&db, "PAYROLL", &["period", "show", PERIOD, "--json"])
        .assert()
        .success()
        .stdout(contains("batch_id").not());

    rts_as(&db, "PAYROLL", &["export", PERIOD, "--file", &out, "--force"])
        .assert()
        .success()
        .stdout(contains("Export batch TSB-202603-"));

    fs::remove_file(&out).ok();
}

#[test]
fn test_approve_without_manager_signature() {
    let db = setup_test_db("cli_approve_unsigned");
    init_db(&db);

    rts_as(&db, "EMPLOYEE", &["sign", PERIOD, "--name", "Jane Doe"])
        .assert()
        .success();
    rts_as(&db, "EMPLOYEE", &["submit", PERIOD]).assert().success();

    rts_as(&db, "MANAGER", &["approve", PERIOD])
        .assert()
        .code(2)
        .stdout(contains(
            "Manager electronic signature is required before approval.",
        ));

    rts_as(&db, "EMPLOYEE", &["period", "show", PERIOD, "--json"])
        .assert()
        .success()
        .stdout(contains("\"status\": \"SUBMITTED\""));
}

#[test]
fn test_reject_note_rules() {
    let db = setup_test_db("cli_reject");
    init_db(&db);

    rts_as(&db, "EMPLOYEE", &["sign", PERIOD, "--name", "Jane Doe"])
        .assert()
        .success();
    rts_as(&db, "EMPLOYEE", &["submit", PERIOD]).assert().success();

    rts_as(&db, "MANAGER", &["reject", PERIOD, "--note", "bad"])
        .assert()
        .code(2)
        .stdout(contains("Rejection note is required (at least 5 characters)."));

    rts_as(&db, "MANAGER", &["reject", PERIOD, "--note", "Fix it"])
        .assert()
        .success()
        .stdout(contains("Manager rejected."));

    rts_as(&db, "EMPLOYEE", &["period", "show", PERIOD, "--json"])
        .assert()
        .success()
        .stdout(contains("\"status\": \"MANAGER_REJECTED\""))
        .stdout(contains("\"revision_no\": 2"));
}

#[test]
fn test_invalid_role_is_an_error() {
    let db = setup_test_db("cli_invalid_role");
    init_db(&db);

    rts_as(&db, "BOSS", &["period", "show", PERIOD])
        .assert()
        .code(1)
        .stderr(contains("Invalid role: BOSS"));
}

#[test]
fn test_wrong_role_is_refused() {
    let db = setup_test_db("cli_wrong_role");
    init_db(&db);

    rts_as(&db, "PAYROLL", &["submit", PERIOD])
        .assert()
        .code(2)
        .stdout(contains("Role PAYROLL is not allowed to submit"));
}

#[test]
fn test_day_and_line_edits() {
    let db = setup_test_db("cli_day_line");
    init_db(&db);

    rts_as(&db, "EMPLOYEE", &["day", "2026-03-04", "--absence", "AL"])
        .assert()
        .success()
        .stdout(contains("Day 2026-03-04 updated."));

    rts_as(
        &db,
        "EMPLOYEE",
        &["line", "add", "2026-03-02", "--desc", "Release night", "--hours", "1.5"],
    )
    .assert()
    .success()
    .stdout(contains("Project line PL-20260302-002 added to 2026-03-02."));

    rts_as(
        &db,
        "EMPLOYEE",
        &["line", "update", "2026-03-02", "PL-20260302-002", "--hours", "2"],
    )
    .assert()
    .success();

    rts_as(
        &db,
        "EMPLOYEE",
        &["line", "remove", "2026-03-02", "PL-20260302-002"],
    )
    .assert()
    .success()
    .stdout(contains("removed"));

    rts_as(&db, "EMPLOYEE", &["period", "show", PERIOD, "--json"])
        .assert()
        .success()
        .stdout(contains("\"absence_code\": \"AL\""));
}

#[test]
fn test_weekend_line_is_refused() {
    let db = setup_test_db("cli_weekend_line");
    init_db(&db);

    rts_as(
        &db,
        "EMPLOYEE",
        &["line", "add", "2026-03-07", "--desc", "Saturday", "--hours", "3"],
    )
    .assert()
    .code(2)
    .stdout(contains("No entry for 2026-03-07"));
}

#[test]
fn test_bad_date_is_an_error() {
    let db = setup_test_db("cli_bad_date");
    init_db(&db);

    rts_as(&db, "EMPLOYEE", &["day", "2026-13-40", "--notes", "x"])
        .assert()
        .code(1)
        .stderr(contains("Invalid date"));
}

#[test]
fn test_leave_add_and_summary() {
    let db = setup_test_db("cli_leave");
    init_db(&db);

    rts_as(
        &db,
        "EMPLOYEE",
        &["leave", "add", "2026-03-16", "--hours", "8", "--note", "Trip"],
    )
    .assert()
    .success()
    .stdout(contains("LV-20260316-001"));

    rts_as(&db, "EMPLOYEE", &["leave", "list", "--year", "2026"])
        .assert()
        .success()
        .stdout(contains("LV-20260316-001"))
        .stdout(contains("Trip"));

    rts_as(&db, "EMPLOYEE", &["leave", "summary", "--year", "2026"])
        .assert()
        .success()
        .stdout(contains("Leave balance 2026"))
        .stdout(contains("152"))
        .stdout(contains("144"));

    rts_as(&db, "EMPLOYEE", &["leave", "remove", "LV-20260316-001"])
        .assert()
        .success();

    rts_as(&db, "EMPLOYEE", &["leave", "remove", "LV-20260316-001"])
        .assert()
        .code(2)
        .stdout(contains("No planned leave"));
}

#[test]
fn test_rules_set_requires_admin() {
    let db = setup_test_db("cli_rules");
    init_db(&db);

    rts_as(&db, "EMPLOYEE", &["rules", "set", "--add-holiday", "2026-03-10"])
        .assert()
        .code(2)
        .stdout(contains("not allowed"));

    rts_as(&db, "ADMIN", &["rules", "set", "--add-holiday", "2026-03-10"])
        .assert()
        .success()
        .stdout(contains("Rules updated; 0 period(s) re-derived."));

    rts_as(&db, "ADMIN", &["rules", "show"])
        .assert()
        .success()
        .stdout(contains("2026-03-10"));
}

#[test]
fn test_profile_save_and_sign() {
    let db = setup_test_db("cli_profile");
    init_db(&db);

    rts_as(&db, "EMPLOYEE", &["profile", "--name", "Jane Profile"])
        .assert()
        .success();

    rts_as(&db, "EMPLOYEE", &["profile"])
        .assert()
        .success()
        .stdout(contains("Jane Profile"));

    rts_as(&db, "EMPLOYEE", &["sign", PERIOD])
        .assert()
        .success();

    rts_as(&db, "EMPLOYEE", &["period", "show", PERIOD, "--json"])
        .assert()
        .success()
        .stdout(contains("\"signed_by\": \"Jane Profile\""));
}

#[test]
fn test_audit_verify() {
    let db = setup_test_db("cli_audit");
    init_db(&db);

    rts_as(&db, "EMPLOYEE", &["sign", PERIOD, "--name", "Jane Doe"])
        .assert()
        .success();

    rts_as(&db, "EMPLOYEE", &["audit", "--verify"])
        .assert()
        .success()
        .stdout(contains("Audit chain intact"));

    rts_as(&db, "EMPLOYEE", &["audit", "--print"])
        .assert()
        .success()
        .stdout(contains("sign_employee"))
        .stdout(contains("seed"));
}

#[test]
fn test_log_print() {
    let db = setup_test_db("cli_log");
    init_db(&db);

    rts_as(&db, "EMPLOYEE", &["log", "--print"])
        .assert()
        .success()
        .stdout(contains("migration_applied"))
        .stdout(contains("init"));
}

#[test]
fn test_backup_copies_database() {
    let db = setup_test_db("cli_backup");
    let out = temp_out("cli_backup", "sqlite");
    init_db(&db);

    rts_as(&db, "EMPLOYEE", &["backup", "--file", &out])
        .assert()
        .success()
        .stdout(contains("Backup created"));

    assert!(fs::metadata(&out).is_ok());

    rts_as(&db, "EMPLOYEE", &["backup", "--file", &out, "--force"])
        .assert()
        .success()
        .stdout(contains("Backup created"));

    fs::remove_file(&out).ok();
}

#[test]
fn test_backup_of_missing_database_fails() {
    let db = setup_test_db("cli_backup_missing");
    let out = temp_out("cli_backup_missing", "sqlite");

    rts_as(&db, "EMPLOYEE", &["backup", "--file", &out])
        .assert()
        .failure();

    assert!(fs::metadata(&db).is_err());
}

#[test]
fn test_help_lists_commands() {
    rts()
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("approve").and(contains("export")).and(contains("audit")));
}
