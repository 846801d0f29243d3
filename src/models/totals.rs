use serde::{Deserialize, Serialize};
use std::iter::Sum;
use std::ops::{Add, AddAssign};

/// Paid-minute buckets. `paid_minutes` is always the sum of the other four;
/// the only way to build a value is through `from_buckets` or addition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimesheetTotals {
    pub normal_minutes: i64,
    pub overtime_minutes: i64,
    pub ph_worked_minutes: i64,
    pub leave_minutes: i64,
    pub paid_minutes: i64,
}

impl TimesheetTotals {
    pub fn zero() -> Self {
        Self::default()
    }

    pub fn from_buckets(normal: i64, overtime: i64, ph_worked: i64, leave: i64) -> Self {
        Self {
            normal_minutes: normal,
            overtime_minutes: overtime,
            ph_worked_minutes: ph_worked,
            leave_minutes: leave,
            paid_minutes: normal + overtime + ph_worked + leave,
        }
    }
}

impl Add for TimesheetTotals {
    type Output = TimesheetTotals;

    fn add(self, rhs: Self) -> Self::Output {
        TimesheetTotals {
            normal_minutes: self.normal_minutes + rhs.normal_minutes,
            overtime_minutes: self.overtime_minutes + rhs.overtime_minutes,
            ph_worked_minutes: self.ph_worked_minutes + rhs.ph_worked_minutes,
            leave_minutes: self.leave_minutes + rhs.leave_minutes,
            paid_minutes: self.paid_minutes + rhs.paid_minutes,
        }
    }
}

impl AddAssign for TimesheetTotals {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sum for TimesheetTotals {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(TimesheetTotals::zero(), Add::add)
    }
}
