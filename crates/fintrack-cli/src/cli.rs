//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Fintrack - Track monthly income and spending, get savings advice
#[derive(Parser)]
#[command(name = "fintrack")]
#[command(about = "Personal budget analyzer with savings recommendations", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Config file (defaults to ~/.local/share/fintrack/config/fintrack.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Store location, overriding the config (directory for file, database file for sqlite)
    #[arg(long, global = true)]
    pub store: Option<PathBuf>,

    /// Storage backend, overriding the config: file, sqlite
    #[arg(long, global = true)]
    pub backend: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable database encryption for the sqlite backend
    ///
    /// By default, the sqlite store is encrypted using SQLCipher.
    /// Set FINTRACK_DB_KEY environment variable with your passphrase.
    #[arg(long, global = true)]
    pub no_encrypt: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write the default config and show where history is stored
    Init,

    /// Analyze one month of income and expenses and record it
    Analyze {
        #[command(flatten)]
        entry: EntryArgs,

        /// Date of the entry, YYYY-MM-DD (defaults to today)
        #[arg(short, long)]
        date: Option<String>,

        /// Print the analysis as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show recorded history with totals (the dashboard)
    History {
        #[command(flatten)]
        filter: FilterArgs,

        /// Also show totals per month
        #[arg(long)]
        trend: bool,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Export recorded history to a file
    Export {
        /// Output file
        #[arg(short, long)]
        output: PathBuf,

        /// Output format: csv, json
        #[arg(short, long, default_value = "csv")]
        format: String,

        #[command(flatten)]
        filter: FilterArgs,
    },

    /// List the recommendation rules in evaluation order
    Rules,

    /// Show storage status (backend, location, entries)
    Status,
}

/// Amounts as entered; anything that isn't a number counts as 0
#[derive(Args, Debug, Clone, Default)]
pub struct EntryArgs {
    /// Monthly income (missing counts as 0)
    #[arg(short, long)]
    pub income: Option<String>,

    /// Rent or mortgage
    #[arg(long)]
    pub housing: Option<String>,

    /// Groceries and eating out
    #[arg(long)]
    pub food: Option<String>,

    /// Fuel, fares, vehicle costs
    #[arg(long)]
    pub transportation: Option<String>,

    /// Leisure and subscriptions
    #[arg(long)]
    pub entertainment: Option<String>,

    /// Power, water, internet, phone
    #[arg(long)]
    pub utilities: Option<String>,

    /// Everything else
    #[arg(long)]
    pub other: Option<String>,
}

/// Month/year filter shared by history and export
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Two-digit month, e.g. 07
    #[arg(short, long)]
    pub month: Option<String>,

    /// Four-digit year, e.g. 2025
    #[arg(short, long)]
    pub year: Option<String>,
}
