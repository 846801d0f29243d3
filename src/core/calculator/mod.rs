pub mod classifier;
pub mod day;
pub mod period;
pub mod week;

pub use classifier::classify_day;
pub use day::calculate_day;
pub use period::calculate_period;
pub use week::week_label;
