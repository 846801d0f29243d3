use crate::cli::commands::{context, open_store, report};
use crate::cli::parser::{Cli, Commands, RulesAction};
use crate::config::Config;
use crate::core::service::TimesheetService;
use crate::errors::AppResult;
use crate::models::rules::{RuleConfiguration, RulePatch};
use crate::utils::date::parse_date;
use crate::utils::formatting::bold;
use crate::utils::mins2readable;
use crate::utils::table::Table;
use chrono::NaiveDate;
use std::collections::BTreeSet;

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let Commands::Rules { action } = &cli.command else {
        return Ok(());
    };

    let ctx = context(cli)?;
    let mut store = open_store(cfg)?;

    match action {
        None | Some(RulesAction::Show) => {
            let rules = TimesheetService::new(&mut store, cfg, ctx).rules()?;
            print_rules(&rules, &cfg.separator_char);
            Ok(())
        }
        Some(RulesAction::Set {
            full_day_minutes,
            friday_short_day_minutes,
            leave_default_paid_minutes,
            eko_paid_as_full_day,
            add_holiday,
            remove_holiday,
            add_eko,
            remove_eko,
        }) => {
            let patch = RulePatch {
                full_day_minutes: *full_day_minutes,
                friday_short_day_minutes: *friday_short_day_minutes,
                leave_default_paid_minutes: *leave_default_paid_minutes,
                early_knock_off_paid_as_full_day: *eko_paid_as_full_day,
                add_public_holidays: parse_dates(add_holiday)?,
                remove_public_holidays: parse_dates(remove_holiday)?,
                add_early_knock_off: parse_dates(add_eko)?,
                remove_early_knock_off: parse_dates(remove_eko)?,
            };

            let outcome = TimesheetService::new(&mut store, cfg, ctx).update_rules(&patch)?;
            report(&store, "rules", "rule_settings", outcome)
        }
    }
}

fn parse_dates(raw: &[String]) -> AppResult<Vec<NaiveDate>> {
    raw.iter().map(|s| parse_date(s)).collect()
}

fn join_dates(dates: &BTreeSet<NaiveDate>) -> String {
    if dates.is_empty() {
        return "-".to_string();
    }
    dates
        .iter()
        .map(|d| d.format("%Y-%m-%d").to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn print_rules(rules: &RuleConfiguration, separator: &str) {
    println!("{}\n", bold("Active rules"));

    let mut table = Table::new(&["Rule", "Value"], separator);
    table.add_row(vec![
        "Full day".to_string(),
        format!(
            "{} min ({})",
            rules.full_day_minutes,
            mins2readable(rules.full_day_minutes, false, false)
        ),
    ]);
    table.add_row(vec![
        "Friday short day".to_string(),
        format!(
            "{} min ({})",
            rules.friday_short_day_minutes,
            mins2readable(rules.friday_short_day_minutes, false, false)
        ),
    ]);
    table.add_row(vec![
        "Leave default paid".to_string(),
        format!(
            "{} min ({})",
            rules.leave_default_paid_minutes,
            mins2readable(rules.leave_default_paid_minutes, false, false)
        ),
    ]);
    table.add_row(vec![
        "EKO paid as full day".to_string(),
        rules.early_knock_off_paid_as_full_day.to_string(),
    ]);
    table.add_row(vec![
        "Public holidays".to_string(),
        join_dates(&rules.public_holiday_dates),
    ]);
    table.add_row(vec![
        "Early knock-off days".to_string(),
        join_dates(&rules.early_knock_off_dates),
    ]);

    print!("{}", table.render());
}
