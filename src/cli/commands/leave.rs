use crate::cli::commands::{context, open_store, report};
use crate::cli::parser::{Cli, Commands, LeaveAction};
use crate::config::Config;
use crate::core::service::TimesheetService;
use crate::errors::AppResult;
use crate::ui::messages::info;
use crate::utils::date::{parse_date, today};
use crate::utils::formatting::{bold, fmt_hours};
use crate::utils::table::Table;
use chrono::Datelike;

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let Commands::Leave { action } = &cli.command else {
        return Ok(());
    };

    let ctx = context(cli)?;
    let this_year = ctx.as_of.unwrap_or_else(today).year();
    let mut store = open_store(cfg)?;

    match action {
        LeaveAction::Add { date, hours, note } => {
            let d = parse_date(date)?;
            let outcome =
                TimesheetService::new(&mut store, cfg, ctx).add_planned_leave(d, *hours, note)?;
            report(&store, "leave_add", date, outcome)
        }

        LeaveAction::Remove { id } => {
            let outcome = TimesheetService::new(&mut store, cfg, ctx).remove_planned_leave(id)?;
            report(&store, "leave_remove", id, outcome)
        }

        LeaveAction::List { year } => {
            let service = TimesheetService::new(&mut store, cfg, ctx);
            let items = service.planned_leave(*year)?;

            if items.is_empty() {
                info("No planned leave.");
                return Ok(());
            }

            let mut table = Table::new(&["Id", "Date", "Hours", "Note"], &cfg.separator_char);
            for l in &items {
                table.add_row(vec![
                    l.id.clone(),
                    l.date.format("%Y-%m-%d").to_string(),
                    fmt_hours(l.hours),
                    l.note.clone(),
                ]);
            }
            print!("{}", table.render());
            Ok(())
        }

        LeaveAction::Summary { year } => {
            let service = TimesheetService::new(&mut store, cfg, ctx);
            let s = service.leave_summary(year.unwrap_or(this_year))?;

            println!("{}\n", bold(&format!("Leave balance {}", s.year)));

            let mut table = Table::new(&["", "Hours"], &cfg.separator_char);
            table.add_row(vec!["Entitlement".into(), fmt_hours(s.entitlement_hours)]);
            table.add_row(vec!["Taken (AL)".into(), fmt_hours(s.taken_hours)]);
            table.add_row(vec!["Planned".into(), fmt_hours(s.planned_hours)]);
            table.add_row(vec![
                "Remaining after taken".into(),
                fmt_hours(s.remaining_after_taken),
            ]);
            table.add_row(vec![
                "Remaining after planned".into(),
                fmt_hours(s.remaining_after_planned),
            ]);
            print!("{}", table.render());
            Ok(())
        }
    }
}
