use crate::cli::commands::{context, open_store, period_key, report};
use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::core::service::TimesheetService;
use crate::errors::AppResult;
use crate::models::role::Role;

/// Workflow transitions: sign, submit, note, approve, reject, validate, lock.
pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let ctx = context(cli)?;
    let mut store = open_store(cfg)?;

    let period = match &cli.command {
        Commands::Sign { period, .. }
        | Commands::Submit { period }
        | Commands::Note { period, .. }
        | Commands::Approve { period }
        | Commands::Reject { period, .. }
        | Commands::Validate { period }
        | Commands::Lock { period } => period.as_deref(),
        _ => return Ok(()),
    };
    let key = period_key(period, &ctx)?;
    let target = key.to_string();
    let role = ctx.role;

    let mut service = TimesheetService::new(&mut store, cfg, ctx);

    let (operation, outcome) = match &cli.command {
        Commands::Sign { name, .. } => match role {
            Role::Manager => ("sign_manager", service.sign_manager(&key, name.as_deref())?),
            _ => ("sign_employee", service.sign_employee(&key, name.as_deref())?),
        },
        Commands::Submit { .. } => ("submit", service.submit(&key)?),
        Commands::Note { text, .. } => ("manager_note", service.set_manager_note(&key, text)?),
        Commands::Approve { .. } => ("approve", service.approve(&key)?),
        Commands::Reject { note, .. } => ("reject", service.reject(&key, note.as_deref())?),
        Commands::Validate { .. } => ("payroll_validate", service.payroll_validate(&key)?),
        Commands::Lock { .. } => ("lock", service.lock(&key)?),
        _ => return Ok(()),
    };

    report(&store, operation, &target, outcome)
}
