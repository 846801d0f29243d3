#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::NaiveDate;
use rtimesheet::config::Config;
use rtimesheet::core::service::{Context, TimesheetService};
use rtimesheet::db::SqliteStore;
use rtimesheet::models::role::Role;
use std::env;
use std::fs;
use std::path::PathBuf;

/// Reference "today" shared by the CLI tests: every day of March 2026 is due.
pub const AS_OF: &str = "2026-03-31";
pub const PERIOD: &str = "2026-03";

pub fn rts() -> Command {
    cargo_bin_cmd!("rtimesheet")
}

/// `rtimesheet --db <db> --test --as-of AS_OF --as <role> <args…>`
pub fn rts_as(db_path: &str, role: &str, args: &[&str]) -> Command {
    let mut cmd = rts();
    cmd.args(["--db", db_path, "--test", "--as-of", AS_OF, "--as", role]);
    cmd.args(args);
    cmd
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rtimesheet.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Initialize a fresh DB through the CLI.
pub fn init_db(db_path: &str) {
    rts()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();
}

pub fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).expect("valid date")
}

pub fn ctx(role: Role, actor: &str) -> Context {
    Context::new(role, Some(actor.to_string())).with_as_of(Some(d(2026, 3, 31)))
}

pub fn service<'a>(
    store: &'a mut SqliteStore,
    cfg: &'a Config,
    role: Role,
) -> TimesheetService<'a, SqliteStore> {
    let actor = match role {
        Role::Employee => "Jane Doe",
        Role::Manager => "Mark Boss",
        Role::Payroll => "Pat Payroll",
        Role::Admin => "Ada Admin",
    };
    TimesheetService::new(store, cfg, ctx(role, actor))
}
