use serde::Serialize;

/// Every operation of the command surface that can be guarded by role or status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    ViewPeriod,
    EditContent,
    SignEmployee,
    Submit,
    SignManager,
    ManagerNote,
    Approve,
    Reject,
    PayrollValidate,
    Lock,
    CreateExportBatch,
    UpdateRules,
    PlanLeave,
    ManageSignatureProfile,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::ViewPeriod => "view period",
            Action::EditContent => "edit timesheet content",
            Action::SignEmployee => "employee e-sign",
            Action::Submit => "submit",
            Action::SignManager => "manager e-sign",
            Action::ManagerNote => "manager note",
            Action::Approve => "approve",
            Action::Reject => "reject",
            Action::PayrollValidate => "payroll validate",
            Action::Lock => "lock",
            Action::CreateExportBatch => "create export batch",
            Action::UpdateRules => "update rules",
            Action::PlanLeave => "plan leave",
            Action::ManageSignatureProfile => "manage signature profile",
        }
    }
}
