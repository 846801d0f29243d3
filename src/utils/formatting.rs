//! Formatting utilities used for CLI and export outputs.

pub fn bold(s: &str) -> String {
    format!("\x1b[1m{}\x1b[0m", s)
}

pub fn mins2readable(mins: i64, want_sign: bool, short: bool) -> String {
    let abs_m = mins.abs();
    let hours = abs_m / 60;
    let minutes = abs_m % 60;

    let sign = if mins > 0 && want_sign {
        "+"
    } else if mins < 0 && want_sign {
        "-"
    } else {
        ""
    };

    if short {
        // +02:25
        format!("{}{:02}:{:02}", sign, hours, minutes)
    } else {
        // +02h 25m
        format!("{}{:02}h {:02}m", sign, hours, minutes)
    }
}

/// Minutes as decimal hours with two places, as payroll reads them.
pub fn mins2hours(mins: i64) -> String {
    format!("{:.2}", mins as f64 / 60.0)
}

/// Hours entered on a project line, without trailing zeros noise.
pub fn fmt_hours(hours: f64) -> String {
    let s = format!("{hours:.2}");
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// Shorten `s` to at most `max` characters, marking the cut with `…`.
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}
