use thiserror::Error;

use crate::model::CreditId;

#[derive(Debug, Error)]
pub enum LoanbookError {
    #[error("Invalid loan parameters: {field} — {reason}")]
    InvalidLoanParameters { field: String, reason: String },

    #[error("Credit {credit_id} not found")]
    CreditNotFound { credit_id: CreditId },

    #[error("Payment {payment_number} not found on credit {credit_id}")]
    PaymentNotFound {
        credit_id: CreditId,
        payment_number: u32,
    },

    #[error("Payment {payment_number} does not belong to credit {credit_id}")]
    PaymentCreditMismatch {
        credit_id: CreditId,
        payment_number: u32,
    },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for LoanbookError {
    fn from(e: serde_json::Error) -> Self {
        LoanbookError::SerializationError(e.to_string())
    }
}
