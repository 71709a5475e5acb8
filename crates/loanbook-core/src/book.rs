//! In-memory credit book.
//!
//! Stands where the persistence collaborator would: owns credits and their
//! scheduled-payment rows, and serializes every aggregate update per credit.
//! Batch payment updates are all-or-nothing; the aggregate is always
//! recomputed from the just-mutated full payment set while the credit's
//! lock is held, so concurrent batches cannot interleave their
//! read-modify-write cycles.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, RwLock};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::LoanbookError;
use crate::model::{Credit, CreditId, CreditStatus, PaymentStatus, ScheduledPayment};
use crate::reconcile::reconcile;
use crate::schedule::{build_schedule, normalize_rate, LoanTerms};
use crate::types::{Money, Rate};
use crate::LoanbookResult;

/// Request to open a new credit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenCreditInput {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purpose: Option<String>,
    pub principal: Money,
    /// Accepted as a fraction (0.155) or a percentage (15.5); values above
    /// 1 are divided by 100.
    pub annual_rate: Rate,
    pub term_months: u32,
    pub start_date: NaiveDate,
}

struct CreditAccount {
    credit: Credit,
    payments: Vec<ScheduledPayment>,
}

/// Owns all credits and serializes updates per credit.
#[derive(Default)]
pub struct CreditBook {
    accounts: RwLock<HashMap<CreditId, Arc<Mutex<CreditAccount>>>>,
    next_id: AtomicU64,
}

impl CreditBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a credit: amortize the terms and materialize the payment rows.
    ///
    /// The monthly payment is fixed here and never re-amortized.
    pub fn open_credit(&self, input: &OpenCreditInput) -> LoanbookResult<Credit> {
        let terms = LoanTerms {
            principal: input.principal,
            annual_rate: normalize_rate(input.annual_rate),
            term_months: input.term_months,
            start_date: input.start_date,
        };
        let schedule = build_schedule(&terms)?.result;

        let id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        let credit = Credit {
            id,
            name: input.name.clone(),
            purpose: input.purpose.clone(),
            principal: terms.principal,
            annual_rate: terms.annual_rate,
            term_months: terms.term_months,
            start_date: terms.start_date,
            end_date: schedule.end_date,
            monthly_payment: schedule.monthly_payment,
            remaining_capital: terms.principal,
            total_paid_interest: Decimal::ZERO,
            status: CreditStatus::Active,
        };

        let payments = schedule
            .rows
            .iter()
            .map(|row| ScheduledPayment {
                credit_id: id,
                payment_number: row.payment_number,
                due_date: row.due_date,
                amount: row.amount,
                capital_part: row.capital_part,
                interest_part: row.interest_part,
                status: PaymentStatus::Pending,
                paid_date: None,
            })
            .collect();

        let account = CreditAccount {
            credit: credit.clone(),
            payments,
        };
        self.accounts
            .write()
            .expect("credit book lock poisoned")
            .insert(id, Arc::new(Mutex::new(account)));

        Ok(credit)
    }

    /// Apply a status to a batch of payments, then reconcile the credit.
    ///
    /// All-or-nothing: every payment number is resolved before anything is
    /// mutated, so an unknown number aborts the batch with no state change.
    pub fn update_payments(
        &self,
        credit_id: CreditId,
        payment_numbers: &[u32],
        status: PaymentStatus,
        paid_date: Option<NaiveDate>,
    ) -> LoanbookResult<Credit> {
        let account = self.account(credit_id)?;
        let mut account = account.lock().expect("credit account lock poisoned");

        let mut indices = Vec::with_capacity(payment_numbers.len());
        for &number in payment_numbers {
            let idx = account
                .payments
                .iter()
                .position(|p| p.payment_number == number)
                .ok_or(LoanbookError::PaymentNotFound {
                    credit_id,
                    payment_number: number,
                })?;
            indices.push(idx);
        }

        for idx in indices {
            let payment = &mut account.payments[idx];
            payment.status = status;
            payment.paid_date = if status == PaymentStatus::Paid {
                paid_date
            } else {
                None
            };
        }

        let summary = reconcile(&account.credit, &account.payments)?;
        account.credit.remaining_capital = summary.remaining_capital;
        account.credit.total_paid_interest = summary.total_paid_interest;
        account.credit.status = summary.status;

        Ok(account.credit.clone())
    }

    /// Operator transition to DEFAULTED or REFINANCED.
    ///
    /// ACTIVE and PAID_OFF are owned by reconciliation and rejected here.
    pub fn set_credit_status(
        &self,
        credit_id: CreditId,
        status: CreditStatus,
    ) -> LoanbookResult<Credit> {
        if !matches!(status, CreditStatus::Defaulted | CreditStatus::Refinanced) {
            return Err(LoanbookError::InvalidLoanParameters {
                field: "status".into(),
                reason: format!("{} is not an operator-set status", status),
            });
        }

        let account = self.account(credit_id)?;
        let mut account = account.lock().expect("credit account lock poisoned");
        account.credit.status = status;
        Ok(account.credit.clone())
    }

    /// Flag pending payments due strictly before `as_of` as OVERDUE.
    /// Returns the number of rows flipped.
    pub fn mark_overdue(&self, credit_id: CreditId, as_of: NaiveDate) -> LoanbookResult<usize> {
        let account = self.account(credit_id)?;
        let mut account = account.lock().expect("credit account lock poisoned");

        let mut flipped = 0;
        for payment in &mut account.payments {
            if payment.status == PaymentStatus::Pending && payment.due_date < as_of {
                payment.status = PaymentStatus::Overdue;
                flipped += 1;
            }
        }
        Ok(flipped)
    }

    /// Snapshot of a credit's aggregate state.
    pub fn get_credit(&self, credit_id: CreditId) -> LoanbookResult<Credit> {
        let account = self.account(credit_id)?;
        let account = account.lock().expect("credit account lock poisoned");
        Ok(account.credit.clone())
    }

    /// Snapshot of a credit's payment rows, in payment-number order.
    pub fn get_payments(&self, credit_id: CreditId) -> LoanbookResult<Vec<ScheduledPayment>> {
        let account = self.account(credit_id)?;
        let account = account.lock().expect("credit account lock poisoned");
        Ok(account.payments.clone())
    }

    fn account(&self, credit_id: CreditId) -> LoanbookResult<Arc<Mutex<CreditAccount>>> {
        self.accounts
            .read()
            .expect("credit book lock poisoned")
            .get(&credit_id)
            .cloned()
            .ok_or(LoanbookError::CreditNotFound { credit_id })
    }
}
