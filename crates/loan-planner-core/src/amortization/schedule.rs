//! Month-by-month loan amortization.
//!
//! Builds full payment schedules from (principal, annual rate, term) using
//! the standard annuity formula, plus single-period breakdown queries.
//! All math in `rust_decimal::Decimal`; integer powers are computed by
//! iterative multiplication so no float rounding ever enters a schedule.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::LoanPlannerError;
use crate::types::{Money, Rate};
use crate::LoanPlannerResult;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

const MONTHS_PER_YEAR: Decimal = dec!(12);

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// One month's entry in an amortization schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentPeriod {
    /// Month number, 1-based.
    pub period: u32,
    /// Total payment for the month.
    pub payment: Money,
    /// Principal portion of the payment.
    pub principal: Money,
    /// Interest portion of the payment.
    pub interest: Money,
    /// Balance after this payment. Never negative; exactly zero on the
    /// final period.
    pub remaining_balance: Money,
    /// Total interest paid through this period.
    pub cumulative_interest: Money,
}

/// Complete amortization schedule for a loan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmortizationSchedule {
    pub principal: Money,
    pub annual_rate: Rate,
    pub term_months: u32,
    pub monthly_payment: Money,
    pub periods: Vec<PaymentPeriod>,
    pub total_interest: Money,
    pub total_payments: Money,
}

/// Principal/interest split of a single payment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentBreakdown {
    pub period: u32,
    pub payment: Money,
    pub principal: Money,
    pub interest: Money,
    /// Principal as a percent of the payment.
    pub principal_pct: Rate,
    /// Interest as a percent of the payment.
    pub interest_pct: Rate,
    pub remaining_balance: Money,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Build the complete month-by-month schedule.
///
/// Degenerate inputs (principal <= 0 or a zero term) return a schedule with
/// an empty period list and zero totals rather than an error. The final
/// period absorbs any residual balance so the schedule ends at exactly zero.
pub fn build_schedule(
    principal: Money,
    annual_rate: Rate,
    term_years: u32,
) -> LoanPlannerResult<AmortizationSchedule> {
    validate_annual_rate(annual_rate)?;

    if principal <= Decimal::ZERO || term_years == 0 {
        return Ok(AmortizationSchedule {
            principal,
            annual_rate,
            term_months: 0,
            monthly_payment: Decimal::ZERO,
            periods: Vec::new(),
            total_interest: Decimal::ZERO,
            total_payments: Decimal::ZERO,
        });
    }

    let monthly_rate = annual_rate / MONTHS_PER_YEAR;
    let term_months = term_years * 12;
    let payment = annuity_payment(principal, monthly_rate, term_months);

    let mut periods = Vec::with_capacity(term_months as usize);
    let mut balance = principal;
    let mut cumulative_interest = Decimal::ZERO;

    for month in 1..=term_months {
        let interest = balance * monthly_rate;
        let mut principal_paid = payment - interest;

        cumulative_interest += interest;
        balance -= principal_paid;

        // The last payment absorbs any residual so the loan closes at zero.
        if month == term_months {
            principal_paid += balance;
            balance = Decimal::ZERO;
        }

        periods.push(PaymentPeriod {
            period: month,
            payment,
            principal: principal_paid,
            interest,
            remaining_balance: balance.max(Decimal::ZERO),
            cumulative_interest,
        });
    }

    let total_payments = payment * Decimal::from(term_months);
    let total_interest = total_payments - principal;

    Ok(AmortizationSchedule {
        principal,
        annual_rate,
        term_months,
        monthly_payment: payment,
        periods,
        total_interest,
        total_payments,
    })
}

/// Monthly payment for a loan, without materializing the schedule.
///
/// Returns zero for degenerate inputs, mirroring `build_schedule`.
pub fn monthly_payment(
    principal: Money,
    annual_rate: Rate,
    term_years: u32,
) -> LoanPlannerResult<Money> {
    validate_annual_rate(annual_rate)?;

    if principal <= Decimal::ZERO || term_years == 0 {
        return Ok(Decimal::ZERO);
    }

    Ok(annuity_payment(
        principal,
        annual_rate / MONTHS_PER_YEAR,
        term_years * 12,
    ))
}

/// Principal/interest split for one period of a schedule.
///
/// Periods outside [1, term_months] yield a zero-filled breakdown with the
/// requested period echoed back, never an error.
pub fn payment_breakdown(schedule: &AmortizationSchedule, period: u32) -> PaymentBreakdown {
    let index = period as usize;
    if period == 0 || index > schedule.periods.len() {
        return PaymentBreakdown {
            period,
            payment: Decimal::ZERO,
            principal: Decimal::ZERO,
            interest: Decimal::ZERO,
            principal_pct: Decimal::ZERO,
            interest_pct: Decimal::ZERO,
            remaining_balance: Decimal::ZERO,
        };
    }

    let entry = &schedule.periods[index - 1];
    let (principal_pct, interest_pct) = if entry.payment > Decimal::ZERO {
        (
            entry.principal / entry.payment * dec!(100),
            entry.interest / entry.payment * dec!(100),
        )
    } else {
        (Decimal::ZERO, Decimal::ZERO)
    };

    PaymentBreakdown {
        period,
        payment: entry.payment,
        principal: entry.principal,
        interest: entry.interest,
        principal_pct,
        interest_pct,
        remaining_balance: entry.remaining_balance,
    }
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn validate_annual_rate(annual_rate: Rate) -> LoanPlannerResult<()> {
    if annual_rate <= dec!(-1) {
        return Err(LoanPlannerError::InvalidInput {
            field: "annual_rate".into(),
            reason: "Annual rate must be greater than -100%".into(),
        });
    }
    Ok(())
}

/// Standard annuity payment: P * r(1+r)^n / ((1+r)^n - 1).
fn annuity_payment(principal: Money, monthly_rate: Rate, term_months: u32) -> Money {
    let growth = iterative_pow(Decimal::ONE + monthly_rate, term_months);

    // Zero rate, or a rate so small the growth factor collapses to one:
    // level principal repayment.
    if monthly_rate.is_zero() || growth == Decimal::ONE {
        return principal / Decimal::from(term_months);
    }

    principal * monthly_rate * growth / (growth - Decimal::ONE)
}

/// Compute base^n for an integer exponent via iterative multiplication.
fn iterative_pow(base: Decimal, n: u32) -> Decimal {
    let mut result = Decimal::ONE;
    for _ in 0..n {
        result *= base;
    }
    result
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
