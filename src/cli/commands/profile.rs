use crate::cli::commands::{context, open_store, report};
use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::core::service::TimesheetService;
use crate::errors::AppResult;
use crate::ui::messages::info;

/// Show the acting role's signature profile, or save it with `--name`.
pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let Commands::Profile { name, declaration } = &cli.command else {
        return Ok(());
    };

    let ctx = context(cli)?;
    let mut store = open_store(cfg)?;

    match name {
        Some(full_name) => {
            let outcome = TimesheetService::new(&mut store, cfg, ctx)
                .save_signature_profile(full_name, declaration.as_deref())?;
            report(&store, "profile", &cli.role.to_uppercase(), outcome)
        }
        None => {
            let role = ctx.role;
            match TimesheetService::new(&mut store, cfg, ctx).signature_profile()? {
                Some(p) => {
                    println!("Role        : {}", p.role.as_str());
                    println!("Full name   : {}", p.full_name);
                    println!("Declaration : {}", p.declaration);
                    println!("Updated     : {}", p.updated_at.format("%Y-%m-%d %H:%M UTC"));
                }
                None => info(format!("No signature profile saved for {role}.")),
            }
            Ok(())
        }
    }
}
