pub mod absence;
pub mod action;
pub mod calculation;
pub mod day_type;
pub mod entry;
pub mod leave;
pub mod period;
pub mod role;
pub mod rules;
pub mod signature;
pub mod status;
pub mod totals;
