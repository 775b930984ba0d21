//! Pairwise structured comparison of two loan plans.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::planning::generator::LoanPlan;

/// Two overall plan values within this distance are reported as a tie.
const TIE_TOLERANCE: Decimal = dec!(0.1);

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonWinner {
    PlanA,
    PlanB,
    Tie,
}

impl std::fmt::Display for ComparisonWinner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::PlanA => "plan_a",
            Self::PlanB => "plan_b",
            Self::Tie => "tie",
        };
        write!(f, "{}", s)
    }
}

/// Signed deltas are plan B minus plan A throughout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub plan_a: LoanPlan,
    pub plan_b: LoanPlan,
    pub winner: ComparisonWinner,
    pub monthly_payment_diff: Decimal,
    pub total_cost_diff: Decimal,
    pub interest_diff: Decimal,
    pub term_diff: i64,
    /// Dimensions where plan A is strictly better.
    pub advantages_plan_a: Vec<String>,
    pub advantages_plan_b: Vec<String>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Compare two plans dimension by dimension and pick an overall winner.
pub fn compare_plans(plan_a: &LoanPlan, plan_b: &LoanPlan) -> ComparisonResult {
    ComparisonResult {
        winner: determine_winner(plan_a, plan_b),
        monthly_payment_diff: plan_b.monthly_payment - plan_a.monthly_payment,
        total_cost_diff: plan_b.total_cost - plan_a.total_cost,
        interest_diff: plan_b.total_interest - plan_a.total_interest,
        term_diff: plan_b.term_years as i64 - plan_a.term_years as i64,
        advantages_plan_a: advantages(plan_a, plan_b),
        advantages_plan_b: advantages(plan_b, plan_a),
        plan_a: plan_a.clone(),
        plan_b: plan_b.clone(),
    }
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// Overall value combines affordability headroom with a cost term that
/// rewards cheaper plans: (100 - ratio) + 100000 / total_cost.
fn determine_winner(plan_a: &LoanPlan, plan_b: &LoanPlan) -> ComparisonWinner {
    let score_a = plan_value(plan_a);
    let score_b = plan_value(plan_b);

    if (score_a - score_b).abs() < TIE_TOLERANCE {
        ComparisonWinner::Tie
    } else if score_a > score_b {
        ComparisonWinner::PlanA
    } else {
        ComparisonWinner::PlanB
    }
}

fn plan_value(plan: &LoanPlan) -> Decimal {
    let affordability = dec!(100) - plan.payment_to_income_ratio;
    if plan.total_cost.is_zero() {
        return affordability;
    }
    affordability + dec!(100_000) / plan.total_cost
}

/// Every dimension where `plan` strictly beats `other`, with whole-unit
/// amounts. A plan better at nothing still gets one fallback entry.
fn advantages(plan: &LoanPlan, other: &LoanPlan) -> Vec<String> {
    let mut pros = Vec::new();

    if plan.monthly_payment < other.monthly_payment {
        let diff = (other.monthly_payment - plan.monthly_payment).round();
        pros.push(format!("Lower monthly payment by {}", diff));
    }
    if plan.total_cost < other.total_cost {
        let diff = (other.total_cost - plan.total_cost).round();
        pros.push(format!("Lower total cost by {}", diff));
    }
    if plan.total_interest < other.total_interest {
        let diff = (other.total_interest - plan.total_interest).round();
        pros.push(format!("Saves {} in interest", diff));
    }
    if plan.term_years < other.term_years {
        let diff = other.term_years - plan.term_years;
        pros.push(format!("Paid off {} years sooner", diff));
    }
    if plan.payment_to_income_ratio < other.payment_to_income_ratio {
        pros.push("Better payment-to-income ratio".to_string());
    }

    if pros.is_empty() {
        pros.push("Alternative worth considering".to_string());
    }
    pros
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
