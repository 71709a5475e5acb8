use chrono::NaiveDate;
use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use loanbook_core::schedule::{self, LoanTerms};

use crate::input;

/// Arguments for schedule generation
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct ScheduleArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Principal amount borrowed
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Annual interest rate, as a fraction (0.155) or percentage (15.5)
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Term in whole months
    #[arg(long)]
    pub term_months: Option<u32>,

    /// Anchor date for the first period (ISO 8601, e.g. 2024-01-01)
    #[arg(long)]
    pub start_date: Option<NaiveDate>,
}

pub fn run_schedule(args: ScheduleArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let terms: LoanTerms = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        LoanTerms {
            principal: args
                .principal
                .ok_or("--principal is required (or provide --input)")?,
            annual_rate: schedule::normalize_rate(
                args.rate.ok_or("--rate is required (or provide --input)")?,
            ),
            term_months: args
                .term_months
                .ok_or("--term-months is required (or provide --input)")?,
            start_date: args
                .start_date
                .ok_or("--start-date is required (or provide --input)")?,
        }
    };

    let result = schedule::build_schedule(&terms)?;
    Ok(serde_json::to_value(result)?)
}
