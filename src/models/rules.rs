//! Rule configuration: the single, admin-mutable set of calendar and pay rules
//! that every calculation receives explicitly.

use crate::errors::{AppError, AppResult};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Upper bound for every per-day minute setting.
pub const MAX_DAY_MINUTES: i64 = 24 * 60;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleConfiguration {
    #[serde(default = "default_full_day")]
    pub full_day_minutes: i64,
    #[serde(default = "default_friday_short_day")]
    pub friday_short_day_minutes: i64,
    #[serde(default = "default_full_day")]
    pub leave_default_paid_minutes: i64,
    #[serde(default = "default_eko_full_day")]
    pub early_knock_off_paid_as_full_day: bool,
    #[serde(default)]
    pub early_knock_off_dates: BTreeSet<NaiveDate>,
    #[serde(default)]
    pub public_holiday_dates: BTreeSet<NaiveDate>,
}

fn default_full_day() -> i64 {
    480
}
fn default_friday_short_day() -> i64 {
    360
}
fn default_eko_full_day() -> bool {
    true
}

impl Default for RuleConfiguration {
    fn default() -> Self {
        Self {
            full_day_minutes: default_full_day(),
            friday_short_day_minutes: default_friday_short_day(),
            leave_default_paid_minutes: default_full_day(),
            early_knock_off_paid_as_full_day: default_eko_full_day(),
            early_knock_off_dates: BTreeSet::new(),
            public_holiday_dates: BTreeSet::new(),
        }
    }
}

impl RuleConfiguration {
    /// Reject configurations the engine cannot work with.
    pub fn validate(&self) -> AppResult<()> {
        let minutes = [
            ("full_day_minutes", self.full_day_minutes),
            ("friday_short_day_minutes", self.friday_short_day_minutes),
            ("leave_default_paid_minutes", self.leave_default_paid_minutes),
        ];

        for (name, value) in minutes {
            if !(0..=MAX_DAY_MINUTES).contains(&value) {
                return Err(AppError::Config(format!(
                    "{name} must be between 0 and {MAX_DAY_MINUTES} (got {value})"
                )));
            }
        }

        Ok(())
    }

    pub fn is_public_holiday(&self, date: NaiveDate) -> bool {
        self.public_holiday_dates.contains(&date)
    }

    pub fn is_early_knock_off(&self, date: NaiveDate) -> bool {
        self.early_knock_off_dates.contains(&date)
    }

    /// Produce the configuration that results from applying `patch`.
    /// The receiver is left untouched; callers swap the whole value in.
    pub fn patched(&self, patch: &RulePatch) -> AppResult<RuleConfiguration> {
        let mut next = self.clone();

        if let Some(v) = patch.full_day_minutes {
            next.full_day_minutes = v;
        }
        if let Some(v) = patch.friday_short_day_minutes {
            next.friday_short_day_minutes = v;
        }
        if let Some(v) = patch.leave_default_paid_minutes {
            next.leave_default_paid_minutes = v;
        }
        if let Some(v) = patch.early_knock_off_paid_as_full_day {
            next.early_knock_off_paid_as_full_day = v;
        }

        for d in &patch.add_public_holidays {
            next.public_holiday_dates.insert(*d);
        }
        for d in &patch.remove_public_holidays {
            next.public_holiday_dates.remove(d);
        }
        for d in &patch.add_early_knock_off {
            next.early_knock_off_dates.insert(*d);
        }
        for d in &patch.remove_early_knock_off {
            next.early_knock_off_dates.remove(d);
        }

        next.validate()?;
        Ok(next)
    }
}

/// Partial update of the rule configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RulePatch {
    pub full_day_minutes: Option<i64>,
    pub friday_short_day_minutes: Option<i64>,
    pub leave_default_paid_minutes: Option<i64>,
    pub early_knock_off_paid_as_full_day: Option<bool>,
    pub add_public_holidays: Vec<NaiveDate>,
    pub remove_public_holidays: Vec<NaiveDate>,
    pub add_early_knock_off: Vec<NaiveDate>,
    pub remove_early_knock_off: Vec<NaiveDate>,
}

impl RulePatch {
    pub fn is_empty(&self) -> bool {
        *self == RulePatch::default()
    }
}
