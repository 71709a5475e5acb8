use clap::Args;
use serde::Deserialize;
use serde_json::Value;

use loanbook_core::model::{Credit, ScheduledPayment};
use loanbook_core::reconcile;

use crate::input;

/// Arguments for payment reconciliation
#[derive(Args)]
pub struct ReconcileArgs {
    /// Path to JSON input file with the credit and its payment rows
    #[arg(long)]
    pub input: Option<String>,
}

#[derive(Deserialize)]
struct ReconcileRequest {
    credit: Credit,
    payments: Vec<ScheduledPayment>,
}

pub fn run_reconcile(args: ReconcileArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let request: ReconcileRequest = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        return Err("--input file is required for reconciliation".into());
    };

    let result = reconcile::reconcile(&request.credit, &request.payments)?;
    Ok(serde_json::to_value(result)?)
}
