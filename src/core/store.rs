//! Persistence seam of the timesheet core.

use crate::core::audit::AuditSink;
use crate::errors::AppResult;
use crate::models::leave::PlannedLeave;
use crate::models::period::{PeriodKey, PeriodState};
use crate::models::rules::RuleConfiguration;
use crate::models::signature::{SignatureProfile, SignatureRole};

/// Keyed storage of period states and their side records.
///
/// A saved state must reload to the same value, so that signature hashes and
/// export checksums recomputed after a round-trip are unchanged.
pub trait TimesheetStore: AuditSink {
    fn load_rules(&self) -> AppResult<Option<RuleConfiguration>>;
    fn save_rules(&self, rules: &RuleConfiguration) -> AppResult<()>;

    fn load_period(&self, key: &PeriodKey) -> AppResult<Option<PeriodState>>;
    fn save_period(&self, key: &PeriodKey, state: &PeriodState) -> AppResult<()>;
    fn period_keys(&self) -> AppResult<Vec<PeriodKey>>;

    /// Planned leave, optionally restricted to one calendar year, ordered by date.
    fn planned_leave(&self, year: Option<i32>) -> AppResult<Vec<PlannedLeave>>;
    fn insert_planned_leave(&self, leave: &PlannedLeave) -> AppResult<()>;
    /// `false` when no record carried that id.
    fn delete_planned_leave(&self, id: &str) -> AppResult<bool>;

    fn signature_profile(&self, role: SignatureRole) -> AppResult<Option<SignatureProfile>>;
    fn save_signature_profile(&self, profile: &SignatureProfile) -> AppResult<()>;

    /// Run `f` with exclusive write access. Everything `f` writes is
    /// committed when it returns `Ok`, and nothing is kept when it fails.
    fn with_transaction<T, F>(&mut self, f: F) -> AppResult<T>
    where
        Self: Sized,
        F: FnOnce(&mut Self) -> AppResult<T>;
}
