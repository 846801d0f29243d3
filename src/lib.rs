//! rTimesheet library root.
//! Exposes the CLI parser, the high-level run() function, and the internal
//! modules: the rules engine and workflow (`core`), persistence (`db`) and
//! payroll export (`export`).

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod export;
pub mod models;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;
use utils::path::expand_tilde;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    match &cli.command {
        Commands::Init => cli::commands::init::handle(cli),
        Commands::Config { .. } => cli::commands::config::handle(&cli.command, cfg),
        Commands::Rules { .. } => cli::commands::rules::handle(cli, cfg),
        Commands::Period { .. } => cli::commands::period::handle(cli, cfg),
        Commands::Day { .. } | Commands::Line { .. } => cli::commands::day::handle(cli, cfg),
        Commands::Sign { .. }
        | Commands::Submit { .. }
        | Commands::Note { .. }
        | Commands::Approve { .. }
        | Commands::Reject { .. }
        | Commands::Validate { .. }
        | Commands::Lock { .. } => cli::commands::workflow::handle(cli, cfg),
        Commands::Export { .. } => cli::commands::export::handle(cli, cfg),
        Commands::Leave { .. } => cli::commands::leave::handle(cli, cfg),
        Commands::Profile { .. } => cli::commands::profile::handle(cli, cfg),
        Commands::Log { .. } => cli::commands::log::handle(&cli.command, cfg),
        Commands::Audit { .. } => cli::commands::audit::handle(&cli.command, cfg),
        Commands::Backup { .. } => cli::commands::backup::handle(&cli.command, cfg),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    // 1️⃣ parse CLI
    let cli = Cli::parse();

    // 2️⃣ load config once; test mode never reads the user's file
    let mut cfg = if cli.test {
        Config::default()
    } else {
        Config::load()?
    };

    // 3️⃣ command-line DB override
    if let Some(custom_db) = &cli.db {
        cfg.database = expand_tilde(custom_db).to_string_lossy().to_string();
    }

    // 4️⃣ dispatch
    dispatch(&cli, &cfg)
}
