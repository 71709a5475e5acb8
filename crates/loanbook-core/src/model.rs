use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::types::{Money, Rate};

/// Identifier for a credit within the book.
pub type CreditId = u64;

/// Lifecycle state of a credit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CreditStatus {
    #[serde(rename = "ACTIVE")]
    Active,
    #[serde(rename = "PAID_OFF")]
    PaidOff,
    #[serde(rename = "DEFAULTED")]
    Defaulted,
    #[serde(rename = "REFINANCED")]
    Refinanced,
}

impl std::fmt::Display for CreditStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Active => "ACTIVE",
            Self::PaidOff => "PAID_OFF",
            Self::Defaulted => "DEFAULTED",
            Self::Refinanced => "REFINANCED",
        };
        write!(f, "{}", s)
    }
}

/// State of a single scheduled payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentStatus {
    #[serde(rename = "PENDING")]
    Pending,
    #[serde(rename = "PAID")]
    Paid,
    #[serde(rename = "OVERDUE")]
    Overdue,
    #[serde(rename = "PARTIAL")]
    Partial,
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Pending => "PENDING",
            Self::Paid => "PAID",
            Self::Overdue => "OVERDUE",
            Self::Partial => "PARTIAL",
        };
        write!(f, "{}", s)
    }
}

/// One loan tracked by the book.
///
/// The monthly payment is fixed when the credit is opened and never
/// re-amortized; only reconciliation mutates the aggregate fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credit {
    pub id: CreditId,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purpose: Option<String>,
    pub principal: Money,
    pub annual_rate: Rate,
    pub term_months: u32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub monthly_payment: Money,
    pub remaining_capital: Money,
    pub total_paid_interest: Money,
    pub status: CreditStatus,
}

/// One row of a credit's amortization table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduledPayment {
    pub credit_id: CreditId,
    /// Sequential 1-based number; ordering is chronological.
    pub payment_number: u32,
    pub due_date: NaiveDate,
    pub amount: Money,
    pub capital_part: Money,
    pub interest_part: Money,
    pub status: PaymentStatus,
    /// Set only while the status is PAID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paid_date: Option<NaiveDate>,
}
