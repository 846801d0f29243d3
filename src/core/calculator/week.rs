use chrono::{Datelike, NaiveDate};

/// Weekly bucket key `{year}-W{ww}` with `ww = ceil(day_of_year / 7)`.
///
/// This is NOT the ISO-8601 week: 1 January always opens week 01 and
/// 31 December of a leap year falls in week 53.
pub fn week_label(date: NaiveDate) -> String {
    let week = date.ordinal().div_ceil(7);
    format!("{}-W{:02}", date.year(), week)
}
