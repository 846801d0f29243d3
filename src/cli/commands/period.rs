use crate::cli::commands::{context, open_store, period_key};
use crate::cli::parser::{Cli, Commands, PeriodAction};
use crate::config::Config;
use crate::core::service::{PeriodView, TimesheetService};
use crate::errors::{AppError, AppResult};
use crate::models::signature::ElectronicSignature;
use crate::ui::messages::{header, info};
use crate::utils::colors::{
    RED, RESET, YELLOW, color_for_day_type, color_for_severity, color_for_status,
    colorize_minutes,
};
use crate::utils::date::{month_name, weekday_short};
use crate::utils::formatting::{bold, fmt_hours, mins2hours, truncate};
use crate::utils::table::Table;
use crate::utils::mins2readable;

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let Commands::Period { action } = &cli.command else {
        return Ok(());
    };

    let ctx = context(cli)?;
    let mut store = open_store(cfg)?;

    match action {
        PeriodAction::Show { period, json } => {
            let key = period_key(period.as_deref(), &ctx)?;
            let mut service = TimesheetService::new(&mut store, cfg, ctx);

            let view = service
                .get_period(&key)?
                .map_err(|e| AppError::Refused(e.to_string()))?;

            if *json {
                println!("{}", serde_json::to_string_pretty(&view)?);
            } else {
                print_view(&view, &cfg.separator_char);
            }
            Ok(())
        }
        PeriodAction::List => {
            let mut service = TimesheetService::new(&mut store, cfg, ctx);
            let keys = service.period_keys()?;

            if keys.is_empty() {
                info("No periods stored yet.");
                return Ok(());
            }

            let mut table = Table::new(
                &["Period", "Status", "Rev", "Paid", "Errors", "Approval", "Batches"],
                &cfg.separator_char,
            );

            for key in keys {
                let view = service
                    .get_period(&key)?
                    .map_err(|e| AppError::Refused(e.to_string()))?;
                let status = view.state.status;

                table.add_row(vec![
                    key.to_string(),
                    format!("{}{}{}", color_for_status(status), status, RESET),
                    view.state.revision_no.to_string(),
                    mins2hours(view.computed.period_totals.paid_minutes),
                    yes_no(view.computed.has_blocking_errors),
                    yes_no(view.computed.requires_manager_approval),
                    view.state.export_batches.len().to_string(),
                ]);
            }

            print!("{}", table.render());
            Ok(())
        }
    }
}

fn yes_no(b: bool) -> String {
    if b { "yes".to_string() } else { "-".to_string() }
}

fn minutes_cell(minutes: i64) -> String {
    colorize_minutes(&mins2readable(minutes, false, true), minutes)
}

fn signature_line(label: &str, sig: &Option<ElectronicSignature>, revision_no: u32) -> String {
    match sig {
        Some(s) if s.is_current(revision_no) => format!(
            "{label}: {} at {} (rev {}) hash {}",
            s.signed_by,
            s.signed_at.format("%Y-%m-%d %H:%M UTC"),
            s.revision_no,
            truncate(&s.signature_hash, 16)
        ),
        _ => format!("{label}: -"),
    }
}

/// Human view of a period: days, weekly totals, period totals, exceptions,
/// signatures, approval trail and export batches.
fn print_view(view: &PeriodView, separator: &str) {
    let state = &view.state;
    let computed = &view.computed;

    println!(
        "{} {}  {}{}{}  rev {}",
        bold(&format!(
            "{} {}",
            month_name(view.key.month()),
            view.key.year()
        )),
        view.key,
        color_for_status(state.status),
        state.status,
        RESET,
        state.revision_no
    );
    println!();

    // ---------------------------
    // Days
    // ---------------------------
    let mut days = Table::new(
        &[
            "Date", "Dy", "Type", "Hours", "Abs", "Normal", "OT", "PH", "Leave", "Paid", "Flags",
            "Projects",
        ],
        separator,
    );

    for entry in &state.day_entries {
        let calc = computed.by_date.get(&entry.date).cloned().unwrap_or_default();
        let totals = calc.totals();

        let mut flags: Vec<String> = calc
            .blocking_errors
            .iter()
            .map(|c| format!("{RED}{}{RESET}", c.as_str()))
            .collect();
        flags.extend(
            calc.warnings
                .iter()
                .map(|c| format!("{YELLOW}{}{RESET}", c.as_str())),
        );

        let projects = entry
            .project_lines
            .iter()
            .filter(|l| !l.description.trim().is_empty() || l.hours != 0.0)
            .map(|l| format!("{} {}", l.id, truncate(l.description.trim(), 24)))
            .collect::<Vec<_>>()
            .join("; ");

        days.add_row(vec![
            entry.date_str(),
            weekday_short(entry.date).to_string(),
            format!(
                "{}{}{}",
                color_for_day_type(entry.day_type),
                entry.day_type.short(),
                RESET
            ),
            fmt_hours(entry.worked_hours()),
            entry.absence_code.clone(),
            minutes_cell(totals.normal_minutes),
            minutes_cell(totals.overtime_minutes),
            minutes_cell(totals.ph_worked_minutes),
            minutes_cell(totals.leave_minutes),
            minutes_cell(totals.paid_minutes),
            flags.join(","),
            projects,
        ]);
    }

    print!("{}", days.render());

    // ---------------------------
    // Weekly totals
    // ---------------------------
    header("Weekly totals");
    let mut weeks = Table::new(&["Week", "Normal", "OT", "PH", "Leave", "Paid"], separator);
    for w in &computed.weekly {
        weeks.add_row(vec![
            w.week_label.clone(),
            mins2hours(w.totals.normal_minutes),
            mins2hours(w.totals.overtime_minutes),
            mins2hours(w.totals.ph_worked_minutes),
            mins2hours(w.totals.leave_minutes),
            mins2hours(w.totals.paid_minutes),
        ]);
    }
    print!("{}", weeks.render());

    // ---------------------------
    // Period totals
    // ---------------------------
    let t = &computed.period_totals;
    header("Period totals");
    println!(
        "Normal {} | OT {} | PH worked {} | Leave {} | Paid {}",
        mins2hours(t.normal_minutes),
        mins2hours(t.overtime_minutes),
        mins2hours(t.ph_worked_minutes),
        mins2hours(t.leave_minutes),
        bold(&mins2hours(t.paid_minutes))
    );

    // ---------------------------
    // Exceptions
    // ---------------------------
    if !computed.exceptions.is_empty() {
        header("Exceptions");
        for ex in &computed.exceptions {
            let date = ex
                .date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_else(|| "-".to_string());
            println!(
                "{}{:<28}{} {} {}",
                color_for_severity(ex.severity),
                ex.code.as_str(),
                RESET,
                date,
                ex.message
            );
        }
    }

    // ---------------------------
    // Signatures and note
    // ---------------------------
    header("Signatures");
    println!(
        "{}",
        signature_line("Employee", &state.employee_signature, state.revision_no)
    );
    println!(
        "{}",
        signature_line("Manager ", &state.manager_signature, state.revision_no)
    );
    if !state.manager_note.trim().is_empty() {
        println!("Manager note: {}", state.manager_note.trim());
    }

    // ---------------------------
    // Approval trail
    // ---------------------------
    if !state.approval_events.is_empty() {
        header("Approval trail");
        let mut trail = Table::new(&["When", "Actor", "Action", "Note"], separator);
        for ev in &state.approval_events {
            trail.add_row(vec![
                ev.timestamp.format("%Y-%m-%d %H:%M").to_string(),
                ev.actor.clone(),
                ev.action.as_str().to_string(),
                truncate(&ev.note, 60),
            ]);
        }
        print!("{}", trail.render());
    }

    // ---------------------------
    // Export batches
    // ---------------------------
    if !state.export_batches.is_empty() {
        header("Export batches");
        let mut batches = Table::new(&["Batch", "Created", "Lines", "Checksum"], separator);
        for b in &state.export_batches {
            batches.add_row(vec![
                b.batch_id.clone(),
                b.created_at.format("%Y-%m-%d %H:%M").to_string(),
                b.line_count.to_string(),
                b.checksum.clone(),
            ]);
        }
        print!("{}", batches.render());
    }
}
