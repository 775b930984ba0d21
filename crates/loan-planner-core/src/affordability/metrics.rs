//! Aggregation of raw income and expense inputs into financial metrics.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::amortization::schedule::monthly_payment;
use crate::types::{FinancialProfile, LoanCategory, Money, Rate};
use crate::LoanPlannerResult;

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinancialMetrics {
    pub total_income: Money,
    pub total_expenses: Money,
    /// Income minus expenses. Negative when expenses exceed income.
    pub disposable_income: Money,
    /// Estimated payment on the full desired amount, before any down payment.
    pub estimated_payment: Money,
    /// Percent of primary monthly income; 0 without income.
    pub payment_ratio: Rate,
    /// Term the estimate was computed with.
    pub term_years: u32,
    /// Rate the estimate was computed with.
    pub interest_rate: Rate,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

pub fn total_income(monthly_income: Money, other_income: Money) -> Money {
    monthly_income + other_income
}

pub fn total_expenses(monthly_expenses: Money, existing_loan_payments: Money) -> Money {
    monthly_expenses + existing_loan_payments
}

/// Not clamped: a household spending more than it earns goes negative.
pub fn disposable_income(total_income: Money, total_expenses: Money) -> Money {
    total_income - total_expenses
}

/// Payment as a percent of income; 0 when there is no income to divide by.
pub fn payment_ratio(payment: Money, income: Money) -> Rate {
    if income <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    payment / income * dec!(100)
}

/// Aggregate a profile into metrics for one loan category.
///
/// Term and rate come from the category's defaults unless a term override
/// is given. The payment estimate runs on the full desired amount; down
/// payments only enter later, at plan generation. The ratio is against the
/// primary monthly income alone, not total income.
pub fn compute_financial_metrics(
    profile: &FinancialProfile,
    category: &LoanCategory,
    term_override: Option<u32>,
) -> LoanPlannerResult<FinancialMetrics> {
    let defaults = category.profile();
    let term_years = term_override.unwrap_or(defaults.default_term_years);
    let interest_rate = defaults.default_rate;

    let income = total_income(profile.monthly_income, profile.other_income);
    let expenses = total_expenses(profile.monthly_expenses, profile.existing_loan_payments);
    let estimated_payment = monthly_payment(profile.loan_amount, interest_rate, term_years)?;

    Ok(FinancialMetrics {
        total_income: income,
        total_expenses: expenses,
        disposable_income: disposable_income(income, expenses),
        payment_ratio: payment_ratio(estimated_payment, profile.monthly_income),
        estimated_payment,
        term_years,
        interest_rate,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sample_profile() -> FinancialProfile {
        FinancialProfile {
            monthly_income: dec!(2500),
            other_income: dec!(300),
            monthly_expenses: dec!(1200),
            existing_loan_payments: dec!(200),
            savings: dec!(8000),
            loan_amount: dec!(100_000),
        }
    }

    #[test]
    fn test_aggregation_helpers() {
        assert_eq!(total_income(dec!(2500), dec!(300)), dec!(2800));
        assert_eq!(total_expenses(dec!(1200), dec!(200)), dec!(1400));
        assert_eq!(disposable_income(dec!(2800), dec!(1400)), dec!(1400));
        // Negative disposable income passes through unclamped.
        assert_eq!(disposable_income(dec!(1000), dec!(1500)), dec!(-500));
    }

    #[test]
    fn test_payment_ratio_guards_zero_income() {
        assert_eq!(payment_ratio(dec!(500), dec!(2000)), dec!(25));
        assert_eq!(payment_ratio(dec!(500), Decimal::ZERO), Decimal::ZERO);
        assert_eq!(payment_ratio(dec!(500), dec!(-100)), Decimal::ZERO);
    }

    #[test]
    fn test_metrics_use_category_defaults() {
        let profile = sample_profile();
        let metrics =
            compute_financial_metrics(&profile, &LoanCategory::Mortgage, None).unwrap();

        assert_eq!(metrics.term_years, 20);
        assert_eq!(metrics.interest_rate, dec!(0.035));
        assert_eq!(metrics.total_income, dec!(2800));
        assert_eq!(metrics.total_expenses, dec!(1400));
        assert_eq!(metrics.disposable_income, dec!(1400));

        // 100k at 3.5% over 20 years: payment near 580.
        assert!(metrics.estimated_payment > dec!(575) && metrics.estimated_payment < dec!(585));
    }

    #[test]
    fn test_term_override_changes_estimate() {
        let profile = sample_profile();
        let default_term =
            compute_financial_metrics(&profile, &LoanCategory::Mortgage, None).unwrap();
        let short = compute_financial_metrics(&profile, &LoanCategory::Mortgage, Some(10)).unwrap();

        assert_eq!(short.term_years, 10);
        assert!(short.estimated_payment > default_term.estimated_payment);
        // Rate stays the category default either way.
        assert_eq!(short.interest_rate, default_term.interest_rate);
    }

    #[test]
    fn test_ratio_uses_primary_income_only() {
        let mut profile = sample_profile();
        profile.other_income = dec!(10_000); // large secondary income
        let metrics =
            compute_financial_metrics(&profile, &LoanCategory::Mortgage, None).unwrap();

        let expected = metrics.estimated_payment / dec!(2500) * dec!(100);
        assert_eq!(metrics.payment_ratio, expected);
    }

    #[test]
    fn test_zero_loan_amount_estimates_zero_payment() {
        let mut profile = sample_profile();
        profile.loan_amount = Decimal::ZERO;
        let metrics =
            compute_financial_metrics(&profile, &LoanCategory::Personal, None).unwrap();

        assert_eq!(metrics.estimated_payment, Decimal::ZERO);
        assert_eq!(metrics.payment_ratio, Decimal::ZERO);
        assert_eq!(metrics.term_years, 5);
    }

    #[test]
    fn test_unknown_category_row() {
        let metrics =
            compute_financial_metrics(&sample_profile(), &LoanCategory::Unknown, None).unwrap();
        assert_eq!(metrics.interest_rate, dec!(0.06));
        assert_eq!(metrics.term_years, 5);
    }
}
