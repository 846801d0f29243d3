use serde::Serialize;

/// The fixed set of recognised absence codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AbsenceCode {
    AnnualLeave,     // AL
    SickLeave,       // SL
    LeaveWithoutPay, // LWOP
    PublicHoliday,   // PH
}

impl AbsenceCode {
    pub fn code(&self) -> &'static str {
        match self {
            AbsenceCode::AnnualLeave => "AL",
            AbsenceCode::SickLeave => "SL",
            AbsenceCode::LeaveWithoutPay => "LWOP",
            AbsenceCode::PublicHoliday => "PH",
        }
    }

    /// Exact match on the stored code. Case matters: "al" is not a valid code.
    pub fn from_code(s: &str) -> Option<Self> {
        match s {
            "AL" => Some(AbsenceCode::AnnualLeave),
            "SL" => Some(AbsenceCode::SickLeave),
            "LWOP" => Some(AbsenceCode::LeaveWithoutPay),
            "PH" => Some(AbsenceCode::PublicHoliday),
            _ => None,
        }
    }

    pub fn describe(&self) -> &'static str {
        match self {
            AbsenceCode::AnnualLeave => "Annual leave",
            AbsenceCode::SickLeave => "Sick leave",
            AbsenceCode::LeaveWithoutPay => "Leave without pay",
            AbsenceCode::PublicHoliday => "Public holiday",
        }
    }

    pub fn is_paid(&self) -> bool {
        !matches!(self, AbsenceCode::LeaveWithoutPay)
    }
}
