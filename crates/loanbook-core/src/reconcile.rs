//! Payment reconciliation: recompute a credit's aggregates from its rows.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::LoanbookError;
use crate::model::{Credit, CreditId, CreditStatus, PaymentStatus, ScheduledPayment};
use crate::schedule::BALANCE_EPSILON;
use crate::types::Money;
use crate::LoanbookResult;

/// Aggregate state recomputed from a credit's payment rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconciliationOutput {
    pub credit_id: CreditId,
    pub paid_count: u32,
    pub total_paid_capital: Money,
    pub total_paid_interest: Money,
    pub remaining_capital: Money,
    pub status: CreditStatus,
}

/// Recompute remaining capital, paid interest and status from the full
/// payment set.
///
/// Pure recomputation over the PAID subset, never an incremental delta, so
/// re-running with the same rows yields identical aggregates. PAID_OFF is
/// terminal on this path; DEFAULTED and REFINANCED are operator-set and
/// never assigned here.
pub fn reconcile(
    credit: &Credit,
    payments: &[ScheduledPayment],
) -> LoanbookResult<ReconciliationOutput> {
    for payment in payments {
        if payment.credit_id != credit.id {
            return Err(LoanbookError::PaymentCreditMismatch {
                credit_id: credit.id,
                payment_number: payment.payment_number,
            });
        }
    }

    let mut paid_count = 0u32;
    let mut total_paid_capital = Decimal::ZERO;
    let mut total_paid_interest = Decimal::ZERO;

    for payment in payments.iter().filter(|p| p.status == PaymentStatus::Paid) {
        paid_count += 1;
        total_paid_capital += payment.capital_part;
        total_paid_interest += payment.interest_part;
    }

    let mut remaining_capital = credit.principal - total_paid_capital;
    // Absorb decimal drift so a fully paid schedule lands exactly on zero,
    // mirroring the generator's final-period clamp.
    if remaining_capital.abs() < BALANCE_EPSILON {
        remaining_capital = Decimal::ZERO;
    }

    let status = if remaining_capital <= Decimal::ZERO || credit.status == CreditStatus::PaidOff {
        CreditStatus::PaidOff
    } else {
        credit.status
    };

    Ok(ReconciliationOutput {
        credit_id: credit.id,
        paid_count,
        total_paid_capital,
        total_paid_interest,
        remaining_capital: remaining_capital.max(Decimal::ZERO),
        status,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample_credit() -> Credit {
        Credit {
            id: 1,
            name: "Kitchen remodel".into(),
            purpose: None,
            principal: dec!(1200),
            annual_rate: Decimal::ZERO,
            term_months: 12,
            start_date: date(2024, 1, 1),
            end_date: date(2025, 1, 1),
            monthly_payment: dec!(100),
            remaining_capital: dec!(1200),
            total_paid_interest: Decimal::ZERO,
            status: CreditStatus::Active,
        }
    }

    fn row(number: u32, status: PaymentStatus) -> ScheduledPayment {
        ScheduledPayment {
            credit_id: 1,
            payment_number: number,
            due_date: date(2024, 1 + number.min(11), 1),
            amount: dec!(100),
            capital_part: dec!(100),
            interest_part: Decimal::ZERO,
            status,
            paid_date: None,
        }
    }

    #[test]
    fn test_no_paid_rows_leaves_credit_untouched() {
        let credit = sample_credit();
        let payments: Vec<_> = (1..=12).map(|n| row(n, PaymentStatus::Pending)).collect();
        let out = reconcile(&credit, &payments).unwrap();
        assert_eq!(out.paid_count, 0);
        assert_eq!(out.remaining_capital, dec!(1200));
        assert_eq!(out.status, CreditStatus::Active);
    }

    #[test]
    fn test_foreign_row_rejected() {
        let credit = sample_credit();
        let mut payments = vec![row(1, PaymentStatus::Paid)];
        payments[0].credit_id = 99;
        let err = reconcile(&credit, &payments).unwrap_err();
        assert!(matches!(
            err,
            LoanbookError::PaymentCreditMismatch {
                credit_id: 1,
                payment_number: 1
            }
        ));
    }

    #[test]
    fn test_paid_off_is_not_reverted() {
        let mut credit = sample_credit();
        credit.status = CreditStatus::PaidOff;
        let payments: Vec<_> = (1..=12).map(|n| row(n, PaymentStatus::Pending)).collect();
        let out = reconcile(&credit, &payments).unwrap();
        assert_eq!(out.status, CreditStatus::PaidOff);
    }
}
