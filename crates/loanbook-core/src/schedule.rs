//! Level-payment (French) amortization schedule generator.
//!
//! Given principal, annual rate, term and start date, computes the fixed
//! monthly payment and the full period-by-period capital/interest split.
//! All math in `rust_decimal::Decimal`, unrounded until display.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::dates::add_months;
use crate::error::LoanbookError;
use crate::types::{with_metadata, ComputationOutput, Money, Rate};
use crate::LoanbookResult;

/// Threshold below which a residual balance is treated as zero.
pub const BALANCE_EPSILON: Decimal = dec!(0.000001);

/// Input terms for a level-payment loan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanTerms {
    pub principal: Money,
    /// Annual rate as a decimal fraction (0.155 = 15.5%). See [`normalize_rate`].
    pub annual_rate: Rate,
    pub term_months: u32,
    pub start_date: NaiveDate,
}

/// A single row of the amortization table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleRow {
    pub payment_number: u32,
    pub due_date: NaiveDate,
    pub amount: Money,
    pub capital_part: Money,
    pub interest_part: Money,
    /// Balance after this payment, clamped at zero in the final period.
    pub remaining_capital: Money,
}

/// Full schedule output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleOutput {
    pub monthly_payment: Money,
    pub end_date: NaiveDate,
    pub total_interest: Money,
    pub total_paid: Money,
    pub rows: Vec<ScheduleRow>,
}

/// Treat rates above 1 as percentages and scale them down to fractions.
///
/// Upstream forms submit "15.5" meaning 15.5% per year; the engine works in
/// decimal fractions throughout. Apply at the boundary, never inside
/// [`build_schedule`].
pub fn normalize_rate(raw: Decimal) -> Rate {
    if raw > Decimal::ONE {
        raw / dec!(100)
    } else {
        raw
    }
}

/// Build the fixed monthly payment and full amortization table for a loan.
pub fn build_schedule(terms: &LoanTerms) -> LoanbookResult<ComputationOutput<ScheduleOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate_terms(terms)?;

    let monthly_rate = terms.annual_rate / dec!(12);
    let monthly_payment = level_payment(terms.principal, monthly_rate, terms.term_months);

    let mut rows = Vec::with_capacity(terms.term_months as usize);
    let mut remaining = terms.principal;
    let mut total_interest = Decimal::ZERO;

    for number in 1..=terms.term_months {
        let interest_part = remaining * monthly_rate;
        let capital_part = monthly_payment - interest_part;
        remaining -= capital_part;
        total_interest += interest_part;

        rows.push(ScheduleRow {
            payment_number: number,
            due_date: add_months(terms.start_date, number as i32),
            amount: monthly_payment,
            capital_part,
            interest_part,
            remaining_capital: remaining.max(Decimal::ZERO),
        });
    }

    if remaining.abs() > BALANCE_EPSILON {
        warnings.push(format!(
            "Residual balance {} after final period exceeds tolerance",
            remaining
        ));
    }

    let output = ScheduleOutput {
        monthly_payment,
        end_date: add_months(terms.start_date, terms.term_months as i32),
        total_interest,
        total_paid: monthly_payment * Decimal::from(terms.term_months),
        rows,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Level-Payment Amortization Schedule",
        &serde_json::json!({
            "principal": terms.principal.to_string(),
            "annual_rate": terms.annual_rate.to_string(),
            "term_months": terms.term_months,
            "start_date": terms.start_date.to_string(),
        }),
        warnings,
        elapsed,
        output,
    ))
}

/// Fixed payment: M = P * r(1+r)^n / ((1+r)^n - 1).
fn level_payment(principal: Money, monthly_rate: Rate, term_months: u32) -> Money {
    if monthly_rate.is_zero() {
        // Straight-line: no interest accrues.
        return principal / Decimal::from(term_months);
    }
    let factor = (Decimal::ONE + monthly_rate).powu(term_months as u64);
    principal * (monthly_rate * factor) / (factor - Decimal::ONE)
}

fn validate_terms(terms: &LoanTerms) -> LoanbookResult<()> {
    if terms.principal <= Decimal::ZERO {
        return Err(LoanbookError::InvalidLoanParameters {
            field: "principal".into(),
            reason: "Principal must be positive".into(),
        });
    }
    if terms.annual_rate < Decimal::ZERO {
        return Err(LoanbookError::InvalidLoanParameters {
            field: "annual_rate".into(),
            reason: "Annual rate must not be negative".into(),
        });
    }
    if terms.term_months == 0 {
        return Err(LoanbookError::InvalidLoanParameters {
            field: "term_months".into(),
            reason: "Term must be at least 1 month".into(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_level_payment_zero_rate() {
        assert_eq!(level_payment(dec!(1200), Decimal::ZERO, 12), dec!(100));
    }

    #[test]
    fn test_level_payment_known_value() {
        // 120000 at 0.5%/month over 12 months: ~10327.97
        let m = level_payment(dec!(120000), dec!(0.005), 12);
        assert!((m - dec!(10327.97)).abs() < dec!(0.05), "got {}", m);
    }

    #[test]
    fn test_normalize_rate_percentage() {
        assert_eq!(normalize_rate(dec!(15.5)), dec!(0.155));
        assert_eq!(normalize_rate(dec!(0.155)), dec!(0.155));
        assert_eq!(normalize_rate(Decimal::ONE), Decimal::ONE);
    }

    #[test]
    fn test_validate_rejects_bad_terms() {
        let base = LoanTerms {
            principal: dec!(1000),
            annual_rate: dec!(0.05),
            term_months: 12,
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        };

        let mut t = base.clone();
        t.principal = Decimal::ZERO;
        assert!(build_schedule(&t).is_err());

        let mut t = base.clone();
        t.annual_rate = dec!(-0.01);
        assert!(build_schedule(&t).is_err());

        let mut t = base;
        t.term_months = 0;
        assert!(build_schedule(&t).is_err());
    }
}
