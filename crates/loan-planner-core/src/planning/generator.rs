//! Candidate loan plan generation.
//!
//! Enumerates (term, down-payment) combinations from the per-category tables
//! and prices each one through the amortization engine.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::amortization::schedule::monthly_payment;
use crate::types::{LoanCategory, Money, Rate};
use crate::LoanPlannerResult;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Down-payment fractions tried for large mortgages.
const DOWN_PAYMENT_OPTIONS: [Rate; 3] = [dec!(0.10), dec!(0.15), dec!(0.20)];

/// Mortgages above this amount get down-payment variations.
const DOWN_PAYMENT_THRESHOLD: Money = dec!(50_000);

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanRequest {
    /// Total amount needed, before any down payment.
    pub total_amount: Money,
    #[serde(default)]
    pub category: LoanCategory,
    /// Primary monthly income, used for the payment-to-income ratio.
    #[serde(default)]
    pub monthly_income: Money,
    /// Overrides the category's default annual rate when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate_override: Option<Rate>,
}

/// A fully specified loan structure. Built once by the generator and never
/// mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanPlan {
    /// Content-derived key, unique within one generation batch.
    pub id: String,
    /// Descriptive label, e.g. "Balanced (20 years) - comfortable".
    pub label: String,
    /// Principal actually borrowed, after the down payment.
    pub amount: Money,
    pub term_years: u32,
    /// Annual rate as a decimal.
    pub interest_rate: Rate,
    pub down_payment: Money,
    /// Down payment as a percentage of the total amount.
    pub down_payment_pct: Rate,
    pub monthly_payment: Money,
    pub total_interest: Money,
    /// All payments over the life of the loan plus the down payment.
    pub total_cost: Money,
    /// Monthly payment as a percent of monthly income; 0 without income.
    pub payment_to_income_ratio: Rate,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Generate the candidate plan set for a request.
///
/// One plan per term in the category's table; mortgages above the threshold
/// additionally vary the down payment, one plan per (term, percentage) pair.
pub fn generate_plans(request: &PlanRequest) -> LoanPlannerResult<Vec<LoanPlan>> {
    let profile = request.category.profile();
    let rate = request.rate_override.unwrap_or(profile.default_rate);

    let with_down_payments = request.category == LoanCategory::Mortgage
        && request.total_amount > DOWN_PAYMENT_THRESHOLD;

    let mut plans = Vec::new();
    for &term in profile.term_options {
        if with_down_payments {
            for pct in DOWN_PAYMENT_OPTIONS {
                if let Some(plan) =
                    create_plan(request.total_amount, pct, rate, term, request.monthly_income)?
                {
                    plans.push(plan);
                }
            }
        } else if let Some(plan) = create_plan(
            request.total_amount,
            Decimal::ZERO,
            rate,
            term,
            request.monthly_income,
        )? {
            plans.push(plan);
        }
    }

    Ok(plans)
}

/// Price a single (amount, down payment, rate, term) combination.
///
/// Returns `None` when nothing remains to borrow after the down payment or
/// the term is zero: an absent plan, not an error.
pub fn create_plan(
    total_amount: Money,
    down_payment_pct: Rate,
    annual_rate: Rate,
    term_years: u32,
    monthly_income: Money,
) -> LoanPlannerResult<Option<LoanPlan>> {
    let down_payment = total_amount * down_payment_pct;
    let loan_amount = total_amount - down_payment;

    if loan_amount <= Decimal::ZERO || term_years == 0 {
        return Ok(None);
    }

    let payment = monthly_payment(loan_amount, annual_rate, term_years)?;
    let term_months = Decimal::from(term_years * 12);
    let total_payments = payment * term_months;
    let total_interest = total_payments - loan_amount;
    let total_cost = total_payments + down_payment;

    let payment_ratio = if monthly_income > Decimal::ZERO {
        payment / monthly_income * dec!(100)
    } else {
        Decimal::ZERO
    };

    Ok(Some(LoanPlan {
        id: plan_id(term_years, down_payment_pct, annual_rate),
        label: plan_label(term_years, payment_ratio),
        amount: loan_amount,
        term_years,
        interest_rate: annual_rate,
        down_payment,
        down_payment_pct: down_payment_pct * dec!(100),
        monthly_payment: payment,
        total_interest,
        total_cost,
        payment_to_income_ratio: payment_ratio,
    }))
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// Deterministic plan key from the structure itself. (term, pct) pairs never
/// repeat within a batch, so the key is unique without any randomness.
fn plan_id(term_years: u32, down_payment_pct: Rate, annual_rate: Rate) -> String {
    let pct = (down_payment_pct * dec!(100)).round();
    let bps = (annual_rate * dec!(10_000)).round();
    format!("plan-{}y-dp{}-{}bps", term_years, pct, bps)
}

/// Label from the term bucket and the affordability bucket. The thresholds
/// are load-bearing; the wording is presentation only.
fn plan_label(term_years: u32, payment_ratio: Rate) -> String {
    let pace = if term_years <= 10 {
        "Fast payoff"
    } else if term_years <= 20 {
        "Balanced"
    } else {
        "Long-term"
    };

    let comfort = if payment_ratio <= dec!(25) {
        "comfortable"
    } else if payment_ratio <= dec!(35) {
        "moderate"
    } else {
        "demanding"
    };

    format!("{} ({} years) - {}", pace, term_years, comfort)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
