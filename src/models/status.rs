use super::action::Action;
use serde::{Deserialize, Serialize};

/// Lifecycle of one period.
///
/// ```text
/// DRAFT -> SUBMITTED -> MANAGER_APPROVED -> PAYROLL_VALIDATED -> LOCKED
///              |
///              v
///       MANAGER_REJECTED -> SUBMITTED ...
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WorkflowStatus {
    #[default]
    Draft,
    Submitted,
    ManagerApproved,
    ManagerRejected,
    PayrollValidated,
    Locked,
}

impl WorkflowStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkflowStatus::Draft => "DRAFT",
            WorkflowStatus::Submitted => "SUBMITTED",
            WorkflowStatus::ManagerApproved => "MANAGER_APPROVED",
            WorkflowStatus::ManagerRejected => "MANAGER_REJECTED",
            WorkflowStatus::PayrollValidated => "PAYROLL_VALIDATED",
            WorkflowStatus::Locked => "LOCKED",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "DRAFT" => Some(WorkflowStatus::Draft),
            "SUBMITTED" => Some(WorkflowStatus::Submitted),
            "MANAGER_APPROVED" => Some(WorkflowStatus::ManagerApproved),
            "MANAGER_REJECTED" => Some(WorkflowStatus::ManagerRejected),
            "PAYROLL_VALIDATED" => Some(WorkflowStatus::PayrollValidated),
            "LOCKED" => Some(WorkflowStatus::Locked),
            _ => None,
        }
    }

    pub fn is_editable(&self) -> bool {
        matches!(self, WorkflowStatus::Draft | WorkflowStatus::ManagerRejected)
    }

    /// Status-to-operation table. Adding a status forces this match to be revisited.
    pub fn permits(&self, action: Action) -> bool {
        use Action::*;
        match self {
            WorkflowStatus::Draft | WorkflowStatus::ManagerRejected => {
                matches!(action, ViewPeriod | EditContent | SignEmployee | Submit)
            }
            WorkflowStatus::Submitted => matches!(
                action,
                ViewPeriod | SignManager | ManagerNote | Approve | Reject
            ),
            WorkflowStatus::ManagerApproved => matches!(action, ViewPeriod | PayrollValidate),
            WorkflowStatus::PayrollValidated => {
                matches!(action, ViewPeriod | Lock | CreateExportBatch)
            }
            WorkflowStatus::Locked => matches!(action, ViewPeriod | CreateExportBatch),
        }
    }
}

impl std::fmt::Display for WorkflowStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
