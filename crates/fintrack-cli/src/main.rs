//! Fintrack CLI - Personal budget analyzer
//!
//! Usage:
//!   fintrack init                                 Write default config
//!   fintrack analyze --income 50000 --housing 20000
//!   fintrack history --month 07 --year 2025       Show the dashboard
//!   fintrack export --output history.csv          Export history

mod cli;
mod commands;


use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    let config = cli.config.as_deref();
    let store = cli.store.as_deref();
    let backend = cli.backend.as_deref();

    match cli.command {
        Commands::Init => {
            let target = match config {
                Some(path) => path.to_path_buf(),
                None => fintrack_core::config::default_config_path()
                    .context("Could not determine the user data directory")?,
            };
            // The config being initialized may not exist yet
            let existing = Some(target.as_path()).filter(|p| p.exists());
            let storage = commands::resolve_storage(existing, store, backend)?;
            commands::cmd_init(&target, &storage)
        }
        Commands::Analyze { entry, date, json } => {
            let storage = commands::resolve_storage(config, store, backend)?;
            let history = commands::open_history(&storage, cli.no_encrypt)?;
            commands::cmd_analyze(history, &entry, date.as_deref(), json)
        }
        Commands::History {
            filter,
            trend,
            json,
        } => {
            let storage = commands::resolve_storage(config, store, backend)?;
            let history = commands::open_history(&storage, cli.no_encrypt)?;
            commands::cmd_history(&history, &filter, trend, json)
        }
        Commands::Export {
            output,
            format,
            filter,
        } => {
            let storage = commands::resolve_storage(config, store, backend)?;
            let history = commands::open_history(&storage, cli.no_encrypt)?;
            commands::cmd_export(&history, &output, &format, &filter)
        }
        Commands::Rules => commands::cmd_rules(),
        Commands::Status => {
            let storage = commands::resolve_storage(config, store, backend)?;
            commands::cmd_status(&storage, cli.no_encrypt)
        }
    }
}
