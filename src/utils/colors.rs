/// ANSI color helper utilities for terminal output.
use crate::models::calculation::Severity;
use crate::models::day_type::DayType;
use crate::models::status::WorkflowStatus;

pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";
pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const BLUE: &str = "\x1b[34m";
pub const CYAN: &str = "\x1b[36m";
pub const MAGENTA: &str = "\x1b[35m";

pub fn color_for_status(status: WorkflowStatus) -> &'static str {
    match status {
        WorkflowStatus::Draft => RESET,
        WorkflowStatus::Submitted => CYAN,
        WorkflowStatus::ManagerApproved => BLUE,
        WorkflowStatus::ManagerRejected => RED,
        WorkflowStatus::PayrollValidated => MAGENTA,
        WorkflowStatus::Locked => GREEN,
    }
}

pub fn color_for_severity(severity: Severity) -> &'static str {
    match severity {
        Severity::Error => RED,
        Severity::Warning => YELLOW,
    }
}

pub fn color_for_day_type(day_type: DayType) -> &'static str {
    match day_type {
        DayType::PublicHoliday => MAGENTA,
        DayType::EarlyKnockOff => CYAN,
        DayType::Weekend => GREY,
        DayType::FridayShortDay | DayType::Workday => RESET,
    }
}

/// Zero values are greyed out.
pub fn colorize_minutes(value: &str, minutes: i64) -> String {
    if minutes == 0 {
        format!("{GREY}{value}{RESET}")
    } else {
        value.to_string()
    }
}
