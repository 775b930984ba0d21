//! Affordability classification and recommendation text.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::affordability::metrics::FinancialMetrics;
use crate::types::{FinancialProfile, Rate};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Payment at or below this percent of income is considered safe.
const SAFE_PAYMENT_RATIO: Rate = dec!(30);

/// Payment above this percent of income is a hard danger signal.
const WARNING_PAYMENT_RATIO: Rate = dec!(40);

/// Ratio above which the danger wording blames the payment size.
const HIGH_RATIO_ADVICE_CUTOFF: Rate = dec!(35);

/// Savings below this fraction of the desired amount trigger the tip.
const MINIMUM_SAVINGS_RATIO: Rate = dec!(0.1);

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AffordabilityStatus {
    Safe,
    Warning,
    Danger,
}

impl std::fmt::Display for AffordabilityStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Safe => "safe",
            Self::Warning => "warning",
            Self::Danger => "danger",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AffordabilityAssessment {
    pub status: AffordabilityStatus,
    /// Ordered advice lines, status text first, savings tip last.
    pub recommendations: Vec<String>,
    pub metrics: FinancialMetrics,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Classify a payment estimate against the household's headroom.
pub fn affordability_status(
    payment_ratio: Rate,
    disposable_income: Decimal,
    estimated_payment: Decimal,
) -> AffordabilityStatus {
    if disposable_income <= Decimal::ZERO || payment_ratio > WARNING_PAYMENT_RATIO {
        return AffordabilityStatus::Danger;
    }
    if disposable_income < estimated_payment {
        return AffordabilityStatus::Danger;
    }
    if payment_ratio > SAFE_PAYMENT_RATIO {
        return AffordabilityStatus::Warning;
    }
    AffordabilityStatus::Safe
}

/// Full assessment: status, advice text, and the metrics passed through.
pub fn assess_affordability(
    profile: &FinancialProfile,
    metrics: &FinancialMetrics,
) -> AffordabilityAssessment {
    let status = affordability_status(
        metrics.payment_ratio,
        metrics.disposable_income,
        metrics.estimated_payment,
    );
    AffordabilityAssessment {
        status,
        recommendations: generate_recommendations(profile, metrics, status),
        metrics: metrics.clone(),
    }
}

/// One status-specific line, plus the savings tip when savings fall short.
///
/// Danger picks a single explanation, checked in order: negative headroom,
/// then a high ratio, then a payment the headroom cannot cover.
pub fn generate_recommendations(
    profile: &FinancialProfile,
    metrics: &FinancialMetrics,
    status: AffordabilityStatus,
) -> Vec<String> {
    let mut recommendations = Vec::new();

    match status {
        AffordabilityStatus::Danger => {
            if metrics.disposable_income <= Decimal::ZERO {
                recommendations.push(
                    "Your expenses exceed your income. Before taking a loan, reduce expenses, \
                     increase income, or pay down existing loans."
                        .to_string(),
                );
            } else if metrics.payment_ratio > HIGH_RATIO_ADVICE_CUTOFF {
                recommendations.push(
                    "The payment is high relative to your income. Consider a smaller amount, \
                     a longer term, or waiting until your finances improve."
                        .to_string(),
                );
            } else if metrics.disposable_income < metrics.estimated_payment {
                recommendations.push(
                    "The estimated payment exceeds your disposable income, so you may struggle \
                     to keep up with it."
                        .to_string(),
                );
            }
        }
        AffordabilityStatus::Warning => {
            recommendations.push(
                "The payment is at the edge of the safe range. Consider a smaller amount, \
                 a longer term, or waiting until your finances improve."
                    .to_string(),
            );
        }
        AffordabilityStatus::Safe => {
            recommendations.push(
                "This loan appears to fit your budget. This is an estimate, so confirm exact \
                 figures with a lender, keep a buffer for unexpected expenses, and compare \
                 offers from several banks."
                    .to_string(),
            );
        }
    }

    if profile.savings < profile.loan_amount * MINIMUM_SAVINGS_RATIO {
        recommendations.push(
            "Tip: aim for savings of at least 10% of the loan amount to cover a down payment \
             and unexpected costs."
                .to_string(),
        );
    }

    recommendations
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
