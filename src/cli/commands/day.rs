use crate::cli::commands::{context, open_store, report};
use crate::cli::parser::{Cli, Commands, LineAction};
use crate::config::Config;
use crate::core::service::TimesheetService;
use crate::errors::AppResult;
use crate::models::entry::{DayPatch, LinePatch};
use crate::models::period::PeriodKey;
use crate::utils::date::parse_date;

/// `day` and `line`: content edits of one day. The period follows from the date.
pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let ctx = context(cli)?;
    let mut store = open_store(cfg)?;

    match &cli.command {
        Commands::Day {
            date,
            absence,
            clear_absence,
            notes,
        } => {
            let d = parse_date(date)?;
            let key = PeriodKey::of(d);

            let patch = DayPatch {
                absence_code: if *clear_absence {
                    Some(String::new())
                } else {
                    absence.clone()
                },
                notes: notes.clone(),
            };

            let outcome = TimesheetService::new(&mut store, cfg, ctx).edit_day(&key, d, &patch)?;
            report(&store, "edit_day", date, outcome)
        }

        Commands::Line { action } => match action {
            LineAction::Add {
                date,
                description,
                hours,
            } => {
                let d = parse_date(date)?;
                let outcome = TimesheetService::new(&mut store, cfg, ctx).add_project_line(
                    &PeriodKey::of(d),
                    d,
                    description,
                    *hours,
                )?;
                report(&store, "add_project_line", date, outcome)
            }
            LineAction::Update {
                date,
                id,
                description,
                hours,
            } => {
                let d = parse_date(date)?;
                let patch = LinePatch {
                    description: description.clone(),
                    hours: *hours,
                };
                let outcome = TimesheetService::new(&mut store, cfg, ctx).update_project_line(
                    &PeriodKey::of(d),
                    d,
                    id,
                    &patch,
                )?;
                report(&store, "update_project_line", id, outcome)
            }
            LineAction::Remove { date, id } => {
                let d = parse_date(date)?;
                let outcome = TimesheetService::new(&mut store, cfg, ctx).remove_project_line(
                    &PeriodKey::of(d),
                    d,
                    id,
                )?;
                report(&store, "remove_project_line", id, outcome)
            }
        },

        _ => Ok(()),
    }
}
