use chrono::{Datelike, Duration, NaiveDate};
use rtimesheet::core::calculator::{calculate_day, calculate_period, classify_day, week_label};
use rtimesheet::models::calculation::{ExceptionCode, Severity, ValidationCode};
use rtimesheet::models::day_type::DayType;
use rtimesheet::models::entry::{DayEntry, ProjectLine};
use rtimesheet::models::rules::RuleConfiguration;
use rtimesheet::models::totals::TimesheetTotals;

mod common;
use common::d;

fn entry(
    date: NaiveDate,
    rules: &RuleConfiguration,
    lines: &[(&str, f64)],
    absence: &str,
) -> DayEntry {
    DayEntry {
        date,
        day_type: classify_day(date, rules),
        project_lines: lines
            .iter()
            .enumerate()
            .map(|(i, (desc, h))| {
                let id = format!("PL-{}-{:03}", date.format("%Y%m%d"), i + 1);
                ProjectLine::new(id, desc, *h)
            })
            .collect(),
        absence_code: absence.to_string(),
        notes: String::new(),
    }
}

#[test]
fn test_classifier_precedence() {
    let mut rules = RuleConfiguration::default();
    // Saturday declared a public holiday: PH wins over weekend
    rules.public_holiday_dates.insert(d(2026, 3, 7));
    // Friday declared early knock-off: EKO wins over Friday
    rules.early_knock_off_dates.insert(d(2026, 3, 13));
    // Sunday declared early knock-off: weekend wins over EKO
    rules.early_knock_off_dates.insert(d(2026, 3, 8));

    assert_eq!(classify_day(d(2026, 3, 7), &rules), DayType::PublicHoliday);
    assert_eq!(classify_day(d(2026, 3, 8), &rules), DayType::Weekend);
    assert_eq!(classify_day(d(2026, 3, 13), &rules), DayType::EarlyKnockOff);
    assert_eq!(classify_day(d(2026, 3, 20), &rules), DayType::FridayShortDay);
    assert_eq!(classify_day(d(2026, 3, 17), &rules), DayType::Workday);
}

#[test]
fn test_classifier_is_stable() {
    let rules = RuleConfiguration::default();
    let mut day = d(2026, 1, 1);
    while day.year() == 2026 {
        assert_eq!(classify_day(day, &rules), classify_day(day, &rules));
        day += Duration::days(1);
    }
}

#[test]
fn test_workday_eight_hours_is_all_normal() {
    let rules = RuleConfiguration::default();
    let e = entry(d(2026, 3, 3), &rules, &[("Project X", 8.0)], "");

    let calc = calculate_day(&e, &rules, None);
    assert_eq!(calc.normal_minutes, 480);
    assert_eq!(calc.overtime_minutes, 0);
    assert!(calc.blocking_errors.is_empty());
}

#[test]
fn test_overtime_requires_manager_approval() {
    let rules = RuleConfiguration::default();
    let e = entry(d(2026, 3, 3), &rules, &[("Project X", 9.5)], "");

    let calc = calculate_day(&e, &rules, None);
    assert_eq!(calc.normal_minutes, 480);
    assert_eq!(calc.overtime_minutes, 90);

    let computed = calculate_period(&[e], &rules, None);
    assert!(computed.requires_manager_approval);
    assert!(computed.exceptions.iter().any(|x| {
        x.code == ExceptionCode::OtApprovalRequired
            && x.date == Some(d(2026, 3, 3))
            && x.severity == Severity::Warning
    }));
    assert!(!computed.has_blocking_errors);
}

#[test]
fn test_public_holiday_with_ph_code_is_paid_leave() {
    let mut rules = RuleConfiguration::default();
    rules.public_holiday_dates.insert(d(2026, 3, 10));
    let e = entry(d(2026, 3, 10), &rules, &[], "PH");

    let calc = calculate_day(&e, &rules, None);
    assert_eq!(calc.leave_minutes, 480);
    assert_eq!(calc.normal_minutes, 0);

    rules.leave_default_paid_minutes = 456;
    assert_eq!(calculate_day(&e, &rules, None).leave_minutes, 456);
}

#[test]
fn test_absence_with_hours_conflicts() {
    let rules = RuleConfiguration::default();
    let e = entry(d(2026, 3, 4), &rules, &[("Project X", 2.0)], "AL");

    let calc = calculate_day(&e, &rules, None);
    assert!(calc.blocking_errors.contains(&ValidationCode::CodeHoursConflict));
    assert_eq!(calc.totals(), TimesheetTotals::zero());
}

#[test]
fn test_public_holiday_needs_ph_code() {
    let mut rules = RuleConfiguration::default();
    rules.public_holiday_dates.insert(d(2026, 3, 10));

    let sick = entry(d(2026, 3, 10), &rules, &[], "SL");
    assert_eq!(
        calculate_day(&sick, &rules, None).blocking_errors,
        vec![ValidationCode::PhCodeRequired]
    );

    let empty = entry(d(2026, 3, 10), &rules, &[("", 0.0)], "");
    assert_eq!(
        calculate_day(&empty, &rules, None).blocking_errors,
        vec![ValidationCode::PhCodeRequired]
    );

    // working the holiday is allowed and booked as PH worked
    let worked = entry(d(2026, 3, 10), &rules, &[("Go-live", 4.0)], "");
    let calc = calculate_day(&worked, &rules, None);
    assert_eq!(calc.ph_worked_minutes, 240);
    assert!(calc.blocking_errors.is_empty());
}

#[test]
fn test_public_holiday_worked_requires_manager_approval() {
    let mut rules = RuleConfiguration::default();
    rules.public_holiday_dates.insert(d(2026, 3, 10));
    let worked = entry(d(2026, 3, 10), &rules, &[("Go-live", 4.0)], "");
    let plain = entry(d(2026, 3, 11), &rules, &[("Go-live", 8.0)], "");

    let computed = calculate_period(&[worked, plain], &rules, None);
    assert!(computed.requires_manager_approval);
    assert!(!computed.has_blocking_errors);

    let ph: Vec<_> = computed
        .exceptions
        .iter()
        .filter(|x| x.code == ExceptionCode::PhWorkedApprovalRequired)
        .collect();
    assert_eq!(ph.len(), 1);
    assert_eq!(ph[0].date, Some(d(2026, 3, 10)));
    assert_eq!(ph[0].severity, Severity::Warning);
}

#[test]
fn test_unknown_and_lowercase_absence_codes_are_invalid() {
    let rules = RuleConfiguration::default();
    for code in ["XX", "al"] {
        let e = entry(d(2026, 3, 4), &rules, &[], code);
        assert_eq!(
            calculate_day(&e, &rules, None).blocking_errors,
            vec![ValidationCode::InvalidAbsenceCode]
        );
    }
}

#[test]
fn test_lwop_is_unpaid() {
    let rules = RuleConfiguration::default();
    let e = entry(d(2026, 3, 4), &rules, &[], "LWOP");
    let calc = calculate_day(&e, &rules, None);
    assert_eq!(calc.totals(), TimesheetTotals::zero());
    assert!(calc.blocking_errors.is_empty());
}

#[test]
fn test_missing_entry_only_when_due() {
    let rules = RuleConfiguration::default();
    let e = entry(d(2026, 3, 20), &rules, &[("", 0.0)], "");

    assert_eq!(
        calculate_day(&e, &rules, Some(d(2026, 3, 20))).blocking_errors,
        vec![ValidationCode::MissingEntryDay]
    );
    assert!(calculate_day(&e, &rules, Some(d(2026, 3, 19))).blocking_errors.is_empty());
}

#[test]
fn test_worked_line_needs_description() {
    let rules = RuleConfiguration::default();
    let e = entry(d(2026, 3, 4), &rules, &[("   ", 3.0)], "");
    assert_eq!(
        calculate_day(&e, &rules, None).blocking_errors,
        vec![ValidationCode::ProjectDescriptionRequired]
    );
}

#[test]
fn test_negative_and_impossible_hours() {
    let rules = RuleConfiguration::default();

    let negative = entry(d(2026, 3, 4), &rules, &[("A", 5.0), ("B", -1.0)], "");
    assert!(
        calculate_day(&negative, &rules, None)
            .blocking_errors
            .contains(&ValidationCode::NegativeTotals)
    );

    let too_many = entry(d(2026, 3, 4), &rules, &[("A", 10.0), ("B", 7.0)], "");
    assert!(
        calculate_day(&too_many, &rules, None)
            .blocking_errors
            .contains(&ValidationCode::ImpossibleHours)
    );

    // exactly 16h is still plausible
    let limit = entry(d(2026, 3, 4), &rules, &[("A", 16.0)], "");
    assert!(calculate_day(&limit, &rules, None).blocking_errors.is_empty());
}

#[test]
fn test_friday_and_weekend_buckets() {
    let rules = RuleConfiguration::default();

    let friday = entry(d(2026, 3, 6), &rules, &[("A", 7.0)], "");
    let calc = calculate_day(&friday, &rules, None);
    assert_eq!((calc.normal_minutes, calc.overtime_minutes), (360, 60));

    let saturday = entry(d(2026, 3, 7), &rules, &[("A", 3.0)], "");
    let calc = calculate_day(&saturday, &rules, None);
    assert_eq!((calc.normal_minutes, calc.overtime_minutes), (0, 180));
}

#[test]
fn test_early_knock_off_paid_as_full_day() {
    let mut rules = RuleConfiguration::default();
    rules.early_knock_off_dates.insert(d(2026, 3, 24));
    let e = entry(d(2026, 3, 24), &rules, &[("A", 5.0)], "");

    let calc = calculate_day(&e, &rules, None);
    assert_eq!((calc.normal_minutes, calc.overtime_minutes), (480, 0));

    rules.early_knock_off_paid_as_full_day = false;
    let calc = calculate_day(&e, &rules, None);
    assert_eq!((calc.normal_minutes, calc.overtime_minutes), (300, 0));
}

#[test]
fn test_leave_never_mixes_with_worked_buckets() {
    let mut rules = RuleConfiguration::default();
    rules.public_holiday_dates.insert(d(2026, 3, 10));

    let codes = ["", "AL", "SL", "LWOP", "PH", "XX"];
    let hours = [0.0, 2.0, 8.0, 11.0];

    for day in 2..=13 {
        let date = d(2026, 3, day);
        for code in codes {
            for h in hours {
                let e = entry(date, &rules, &[("Work", h)], code);
                let c = calculate_day(&e, &rules, None);
                if c.leave_minutes != 0 {
                    assert_eq!(
                        (c.normal_minutes, c.overtime_minutes, c.ph_worked_minutes),
                        (0, 0, 0),
                        "{date} {code} {h}"
                    );
                }
                assert_eq!(
                    c.totals().paid_minutes,
                    c.normal_minutes + c.overtime_minutes + c.ph_worked_minutes + c.leave_minutes
                );
            }
        }
    }
}

#[test]
fn test_totals_combination_is_order_independent() {
    let a = TimesheetTotals::from_buckets(480, 30, 0, 0);
    let b = TimesheetTotals::from_buckets(0, 0, 240, 0);
    let c = TimesheetTotals::from_buckets(0, 0, 0, 480);

    assert_eq!((a + b) + c, a + (b + c));
    assert_eq!(a + b, b + a);
    assert_eq!(a + TimesheetTotals::zero(), a);

    let rules = RuleConfiguration::default();
    let mut entries = vec![
        entry(d(2026, 3, 2), &rules, &[("A", 9.0)], ""),
        entry(d(2026, 3, 3), &rules, &[], "AL"),
        entry(d(2026, 3, 6), &rules, &[("A", 6.5)], ""),
        entry(d(2026, 3, 9), &rules, &[("A", 8.0)], ""),
    ];

    let forward = calculate_period(&entries, &rules, None).period_totals;
    entries.reverse();
    let backward = calculate_period(&entries, &rules, None).period_totals;

    assert_eq!(forward, backward);
    assert_eq!(forward.paid_minutes, 540 + 480 + 390 + 480);
}

#[test]
fn test_week_label_is_day_of_year_based() {
    assert_eq!(week_label(d(2026, 1, 1)), "2026-W01");
    assert_eq!(week_label(d(2026, 1, 7)), "2026-W01");
    assert_eq!(week_label(d(2026, 1, 8)), "2026-W02");
    assert_eq!(week_label(d(2024, 12, 31)), "2024-W53");
    assert_eq!(week_label(d(2026, 3, 31)), "2026-W13");
}

#[test]
fn test_weekly_totals_are_sorted() {
    let rules = RuleConfiguration::default();
    let entries = vec![
        entry(d(2026, 3, 30), &rules, &[("A", 8.0)], ""),
        entry(d(2026, 3, 2), &rules, &[("A", 8.0)], ""),
        entry(d(2026, 3, 16), &rules, &[("A", 8.0)], ""),
    ];

    let computed = calculate_period(&entries, &rules, None);
    let labels: Vec<&str> = computed.weekly.iter().map(|w| w.week_label.as_str()).collect();
    assert_eq!(labels, vec!["2026-W09", "2026-W11", "2026-W13"]);
}

#[test]
fn test_blocked_day_counts_zero_but_period_is_blocked() {
    let rules = RuleConfiguration::default();
    let entries = vec![
        entry(d(2026, 3, 2), &rules, &[("A", 8.0)], ""),
        entry(d(2026, 3, 3), &rules, &[("A", 2.0)], "AL"),
    ];

    let computed = calculate_period(&entries, &rules, None);
    assert!(computed.has_blocking_errors);
    assert_eq!(computed.period_totals.paid_minutes, 480);
    assert!(computed.exceptions.iter().any(|x| {
        x.code == ExceptionCode::Validation(ValidationCode::CodeHoursConflict)
            && x.severity == Severity::Error
    }));
}
