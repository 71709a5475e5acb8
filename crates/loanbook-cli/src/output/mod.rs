pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use rust_decimal::Decimal;
use serde_json::Value;
use std::str::FromStr;

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => json::print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// Decimal fields travel as strings; round them to 2 dp for display.
/// Returns None when the string is not a decimal (dates, names, statuses).
pub(crate) fn display_decimal(raw: &str) -> Option<String> {
    Decimal::from_str(raw).ok().map(|d| d.round_dp(2).to_string())
}
