mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::reconcile::ReconcileArgs;
use commands::schedule::ScheduleArgs;

/// Amortized credit schedule calculations
#[derive(Parser)]
#[command(
    name = "loanbook",
    version,
    about = "Amortized credit schedule calculations",
    long_about = "A CLI for level-payment credit schedules with decimal precision. \
                  Builds fixed-payment amortization tables and reconciles recorded \
                  payments back into credit aggregates."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a level-payment amortization schedule
    Schedule(ScheduleArgs),
    /// Reconcile recorded payments into credit aggregates
    Reconcile(ReconcileArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Schedule(args) => commands::schedule::run_schedule(args),
        Commands::Reconcile(args) => commands::reconcile::run_reconcile(args),
        Commands::Version => {
            println!("loanbook {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
