use napi::Result as NapiResult;
use napi_derive::napi;
use serde::Deserialize;

use loanbook_core::model::{Credit, ScheduledPayment};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Schedule
// ---------------------------------------------------------------------------

#[napi]
pub fn build_schedule(input_json: String) -> NapiResult<String> {
    let terms: loanbook_core::schedule::LoanTerms =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = loanbook_core::schedule::build_schedule(&terms).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Reconciliation
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct ReconcileRequest {
    credit: Credit,
    payments: Vec<ScheduledPayment>,
}

#[napi]
pub fn reconcile_payments(input_json: String) -> NapiResult<String> {
    let request: ReconcileRequest = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = loanbook_core::reconcile::reconcile(&request.credit, &request.payments)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}
