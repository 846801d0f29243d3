use crate::export::ExportFormat;
use clap::{Parser, Subcommand};

/// Command-line interface definition for rTimesheet
/// CLI application to capture, sign, approve and export monthly timesheets with SQLite
#[derive(Parser)]
#[command(
    name = "rtimesheet",
    version = env!("CARGO_PKG_VERSION"),
    about = "A monthly timesheet CLI: capture hours, e-sign, approve, validate and export payroll lines using SQLite",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    /// Acting role: EMPLOYEE, MANAGER, PAYROLL or ADMIN
    #[arg(global = true, long = "as", value_name = "ROLE", default_value = "EMPLOYEE")]
    pub role: String,

    /// Acting person, recorded in the approval trail and audit log
    #[arg(global = true, long = "actor", value_name = "NAME")]
    pub actor: Option<String>,

    /// Reference date used as "today" (YYYY-MM-DD)
    #[arg(global = true, long = "as-of", value_name = "DATE", hide = true)]
    pub as_of: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view, check, migrate or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing fields")]
        check: bool,

        #[arg(long = "migrate", help = "Add missing fields with their default values")]
        migrate: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Show or change the active calendar and pay rules
    Rules {
        #[command(subcommand)]
        action: Option<RulesAction>,
    },

    /// Show a monthly timesheet or list stored periods
    Period {
        #[command(subcommand)]
        action: PeriodAction,
    },

    /// Edit the absence code or notes of a day
    Day {
        /// Date of the day (YYYY-MM-DD)
        date: String,

        #[arg(long = "absence", value_name = "CODE", help = "Absence code: AL, SL, PH")]
        absence: Option<String>,

        #[arg(long = "clear-absence", conflicts_with = "absence")]
        clear_absence: bool,

        #[arg(long = "notes", value_name = "TEXT")]
        notes: Option<String>,
    },

    /// Add, update or remove project lines of a day
    Line {
        #[command(subcommand)]
        action: LineAction,
    },

    /// E-sign the period (employee or manager, depending on --as)
    Sign {
        /// Period (YYYY-MM); defaults to the current month
        period: Option<String>,

        #[arg(long = "name", value_name = "FULL NAME")]
        name: Option<String>,
    },

    /// Submit the period for manager review
    Submit { period: Option<String> },

    /// Set the manager decision note
    Note {
        period: Option<String>,

        #[arg(long = "text", value_name = "TEXT")]
        text: String,
    },

    /// Approve a submitted period
    Approve { period: Option<String> },

    /// Reject a submitted period back to the employee
    Reject {
        period: Option<String>,

        #[arg(long = "note", value_name = "TEXT", help = "Rejection note (at least 5 characters)")]
        note: Option<String>,
    },

    /// Payroll validation of an approved period
    Validate { period: Option<String> },

    /// Lock a payroll-validated period
    Lock { period: Option<String> },

    /// Create an export batch and optionally write the payroll lines to a file
    Export {
        period: Option<String>,

        #[arg(long, value_enum)]
        format: Option<ExportFormat>,

        #[arg(long, value_name = "FILE", help = "Absolute path of the output file")]
        file: Option<String>,

        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Planned leave and leave balance
    Leave {
        #[command(subcommand)]
        action: LeaveAction,
    },

    /// Show or save the signature profile of the acting role
    Profile {
        #[arg(long = "name", value_name = "FULL NAME")]
        name: Option<String>,

        #[arg(long = "declaration", value_name = "TEXT", requires = "name")]
        declaration: Option<String>,
    },

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Print or verify the hash-chained audit log
    Audit {
        #[arg(long = "print", help = "Print audit events")]
        print: bool,

        #[arg(long = "verify", help = "Recompute and verify the hash chain")]
        verify: bool,

        #[arg(long = "limit", value_name = "N", help = "Print only the newest N events")]
        limit: Option<usize>,
    },

    /// Create a backup copy of the database
    Backup {
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long)]
        compress: bool,

        #[arg(long, short = 'f')]
        force: bool,
    },
}

#[derive(Subcommand)]
pub enum RulesAction {
    /// Print the active rules
    Show,

    /// Change the active rules (ADMIN); every stored period is re-derived
    Set {
        #[arg(long = "full-day-minutes", value_name = "MIN")]
        full_day_minutes: Option<i64>,

        #[arg(long = "friday-short-day-minutes", value_name = "MIN")]
        friday_short_day_minutes: Option<i64>,

        #[arg(long = "leave-default-paid-minutes", value_name = "MIN")]
        leave_default_paid_minutes: Option<i64>,

        #[arg(long = "eko-paid-as-full-day", value_name = "BOOL")]
        eko_paid_as_full_day: Option<bool>,

        #[arg(long = "add-holiday", value_name = "DATE")]
        add_holiday: Vec<String>,

        #[arg(long = "remove-holiday", value_name = "DATE")]
        remove_holiday: Vec<String>,

        #[arg(long = "add-eko", value_name = "DATE")]
        add_eko: Vec<String>,

        #[arg(long = "remove-eko", value_name = "DATE")]
        remove_eko: Vec<String>,
    },
}

#[derive(Subcommand)]
pub enum PeriodAction {
    /// Print the timesheet of a period (created on first access)
    Show {
        period: Option<String>,

        #[arg(long = "json", help = "Emit the computed view as JSON")]
        json: bool,
    },

    /// List stored periods with status and totals
    List,
}

#[derive(Subcommand)]
pub enum LineAction {
    /// Add a project line
    Add {
        date: String,

        #[arg(long = "desc", value_name = "TEXT")]
        description: String,

        #[arg(long = "hours", value_name = "H", allow_negative_numbers = true)]
        hours: f64,
    },

    /// Update a project line
    Update {
        date: String,

        /// Line id (PL-YYYYMMDD-NNN)
        id: String,

        #[arg(long = "desc", value_name = "TEXT")]
        description: Option<String>,

        #[arg(long = "hours", value_name = "H", allow_negative_numbers = true)]
        hours: Option<f64>,
    },

    /// Remove a project line
    Remove { date: String, id: String },
}

#[derive(Subcommand)]
pub enum LeaveAction {
    /// Plan a leave day
    Add {
        date: String,

        #[arg(long = "hours", value_name = "H")]
        hours: f64,

        #[arg(long = "note", value_name = "TEXT", default_value = "")]
        note: String,
    },

    /// Remove a planned leave entry
    Remove { id: String },

    /// List planned leave
    List {
        #[arg(long = "year")]
        year: Option<i32>,
    },

    /// Entitlement, taken, planned and remaining hours for a year
    Summary {
        #[arg(long = "year")]
        year: Option<i32>,
    },
}
