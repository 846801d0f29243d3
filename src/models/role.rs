use super::action::Action;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Employee,
    Manager,
    Payroll,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Employee => "EMPLOYEE",
            Role::Manager => "MANAGER",
            Role::Payroll => "PAYROLL",
            Role::Admin => "ADMIN",
        }
    }

    /// Case-insensitive parse from CLI / DB text.
    pub fn from_code(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "EMPLOYEE" | "E" => Some(Role::Employee),
            "MANAGER" | "M" => Some(Role::Manager),
            "PAYROLL" | "P" => Some(Role::Payroll),
            "ADMIN" | "A" => Some(Role::Admin),
            _ => None,
        }
    }

    /// Title-case label used as the approval-trail actor.
    pub fn label(&self) -> &'static str {
        match self {
            Role::Employee => "Employee",
            Role::Manager => "Manager",
            Role::Payroll => "Payroll",
            Role::Admin => "Admin",
        }
    }

    /// Role-to-operation table.
    pub fn permits(&self, action: Action) -> bool {
        use Action::*;
        match self {
            Role::Employee => matches!(
                action,
                ViewPeriod | EditContent | SignEmployee | Submit | PlanLeave | ManageSignatureProfile
            ),
            Role::Manager => matches!(
                action,
                ViewPeriod
                    | SignManager
                    | ManagerNote
                    | Approve
                    | Reject
                    | PlanLeave
                    | ManageSignatureProfile
            ),
            Role::Payroll => matches!(
                action,
                ViewPeriod | PayrollValidate | Lock | CreateExportBatch
            ),
            Role::Admin => matches!(action, ViewPeriod | UpdateRules),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
