use super::role::Role;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const EMPLOYEE_DECLARATION: &str =
    "I certify this monthly timesheet is true and complete to the best of my knowledge.";
pub const MANAGER_DECLARATION: &str = "I approve this monthly timesheet after review and confirm approvals for overtime/public holiday work where required.";

/// Minimum trimmed length of a signer's name.
pub const MIN_SIGNER_NAME_LEN: usize = 3;

/// Which attestation a signature represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SignatureRole {
    Employee,
    Manager,
}

impl SignatureRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            SignatureRole::Employee => "EMPLOYEE",
            SignatureRole::Manager => "MANAGER",
        }
    }

    pub fn default_declaration(&self) -> &'static str {
        match self {
            SignatureRole::Employee => EMPLOYEE_DECLARATION,
            SignatureRole::Manager => MANAGER_DECLARATION,
        }
    }

    pub fn for_role(role: Role) -> Option<Self> {
        match role {
            Role::Employee => Some(SignatureRole::Employee),
            Role::Manager => Some(SignatureRole::Manager),
            Role::Payroll | Role::Admin => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElectronicSignature {
    pub signed_by: String,
    pub signed_at: DateTime<Utc>,
    pub signature_hash: String,
    pub declaration_text: String,
    pub revision_no: u32,
}

impl ElectronicSignature {
    /// A signature only attests to the revision it was captured on.
    pub fn is_current(&self, revision_no: u32) -> bool {
        self.revision_no == revision_no
    }
}

/// Saved signer identity per signing role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureProfile {
    pub role: SignatureRole,
    pub full_name: String,
    pub declaration: String,
    pub updated_at: DateTime<Utc>,
}
