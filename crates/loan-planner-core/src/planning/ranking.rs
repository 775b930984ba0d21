//! Weighted scoring, ranking, and diverse selection of candidate plans.
//!
//! Cost and payment sub-scores are normalized against the candidate set
//! being ranked, so a plan's score depends on what it was generated
//! alongside. That relative scoring is deliberate; the scores are ranking
//! signals, not absolute financial metrics.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::planning::generator::LoanPlan;
use crate::types::Rate;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

const AFFORDABILITY_WEIGHT: Decimal = dec!(0.30);
const COST_WEIGHT: Decimal = dec!(0.25);
const PAYMENT_WEIGHT: Decimal = dec!(0.20);
const TERM_WEIGHT: Decimal = dec!(0.15);
const FLEXIBILITY_WEIGHT: Decimal = dec!(0.10);

const SAFE_PAYMENT_RATIO: Decimal = dec!(30);
const WARNING_PAYMENT_RATIO: Decimal = dec!(40);

/// Minimum term gap for two plans to count as diverse.
const DIVERSE_TERM_YEARS: u32 = 5;
/// Minimum relative monthly-payment gap (percent) for diversity.
const DIVERSE_PAYMENT_PCT: Decimal = dec!(15);

const SCORE_MIN: Decimal = dec!(0);
const SCORE_MAX: Decimal = dec!(100);

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

/// Optional term-length preferences. Short-term wins when both are set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RankPreferences {
    pub prefer_short_term: bool,
    pub prefer_long_term: bool,
}

/// A plan with its composite score and sub-score breakdown. Recomputed per
/// ranking call; never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedPlan {
    pub plan: LoanPlan,
    /// Weighted composite, 0-100.
    pub score: Decimal,
    pub affordability_score: Decimal,
    pub cost_score: Decimal,
    pub payment_score: Decimal,
    pub term_score: Decimal,
    pub recommendation_reason: String,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Score every plan and sort descending. The sort is stable, so equal-score
/// plans keep their generation order.
pub fn rank_plans(plans: &[LoanPlan], preferences: &RankPreferences) -> Vec<RankedPlan> {
    let mut ranked: Vec<RankedPlan> = plans
        .iter()
        .map(|plan| {
            let affordability = score_affordability(plan.payment_to_income_ratio);
            let cost = score_cost(plan, plans);
            let payment = score_monthly_payment(plan, plans);
            let term = score_term(plan.term_years, preferences);
            let flexibility = score_flexibility(plan.term_years, plan.payment_to_income_ratio);

            let score = affordability * AFFORDABILITY_WEIGHT
                + cost * COST_WEIGHT
                + payment * PAYMENT_WEIGHT
                + term * TERM_WEIGHT
                + flexibility * FLEXIBILITY_WEIGHT;

            RankedPlan {
                recommendation_reason: recommendation_reason(
                    plan,
                    affordability,
                    cost,
                    payment,
                ),
                plan: plan.clone(),
                score,
                affordability_score: affordability,
                cost_score: cost,
                payment_score: payment,
                term_score: term,
            }
        })
        .collect();

    ranked.sort_by(|a, b| b.score.cmp(&a.score));
    ranked
}

/// Pick up to `count` plans from a ranked list, preferring diversity.
///
/// The top plan is always kept. Each further candidate is accepted only if
/// it differs from every selected plan by at least 5 years of term or 15%
/// of monthly payment, so the selection may come back short. When there are
/// no more candidates than requested, all of them come back unfiltered.
pub fn select_diverse(ranked: &[RankedPlan], count: usize) -> Vec<LoanPlan> {
    if ranked.is_empty() || count == 0 {
        return Vec::new();
    }
    if ranked.len() <= count {
        return ranked.iter().map(|rp| rp.plan.clone()).collect();
    }

    let mut selected: Vec<LoanPlan> = vec![ranked[0].plan.clone()];

    for rp in &ranked[1..] {
        if selected.len() >= count {
            break;
        }
        if is_diverse_from(&rp.plan, &selected) {
            selected.push(rp.plan.clone());
        }
    }

    selected
}

// ---------------------------------------------------------------------------
// Sub-scores
// ---------------------------------------------------------------------------

/// 100 up to a 30% ratio, sliding to 50 at 40%, then dropping 2 points per
/// percentage point of excess.
fn score_affordability(ratio: Rate) -> Decimal {
    if ratio <= SAFE_PAYMENT_RATIO {
        return SCORE_MAX;
    }
    if ratio <= WARNING_PAYMENT_RATIO {
        let band = WARNING_PAYMENT_RATIO - SAFE_PAYMENT_RATIO;
        return dec!(100) - (ratio - SAFE_PAYMENT_RATIO) / band * dec!(50);
    }
    let excess = ratio - WARNING_PAYMENT_RATIO;
    clamp_score(dec!(50) - excess * dec!(2))
}

/// Min-max normalization over the candidate set: cheapest plan scores 100,
/// the most expensive 0. All tied means 100 for everyone.
fn score_cost(plan: &LoanPlan, all_plans: &[LoanPlan]) -> Decimal {
    normalize_low_is_good(plan.total_cost, all_plans.iter().map(|p| p.total_cost))
}

fn score_monthly_payment(plan: &LoanPlan, all_plans: &[LoanPlan]) -> Decimal {
    normalize_low_is_good(
        plan.monthly_payment,
        all_plans.iter().map(|p| p.monthly_payment),
    )
}

fn normalize_low_is_good(value: Decimal, values: impl Iterator<Item = Decimal>) -> Decimal {
    let mut min = None;
    let mut max = None;
    for v in values {
        min = Some(min.map_or(v, |m: Decimal| m.min(v)));
        max = Some(max.map_or(v, |m: Decimal| m.max(v)));
    }
    let (min, max) = match (min, max) {
        (Some(min), Some(max)) => (min, max),
        _ => return dec!(50),
    };

    if min == max {
        return SCORE_MAX;
    }

    clamp_score(dec!(100) - (value - min) / (max - min) * dec!(100))
}

/// Without a stated preference, 15-20 year terms plateau at 100 and score
/// tapers on both sides.
fn score_term(term_years: u32, preferences: &RankPreferences) -> Decimal {
    let term = Decimal::from(term_years);

    if preferences.prefer_short_term {
        return clamp_score(dec!(100) - (term - dec!(10)) * dec!(5));
    }
    if preferences.prefer_long_term {
        return clamp_score((term - dec!(10)) * dec!(5));
    }

    if (15..=20).contains(&term_years) {
        SCORE_MAX
    } else if term_years < 15 {
        clamp_score(dec!(70) + (term - dec!(10)) * dec!(6))
    } else {
        clamp_score(dec!(100) - (term - dec!(20)) * dec!(3))
    }
}

/// Shorter terms and smaller payment ratios leave more room to maneuver.
fn score_flexibility(term_years: u32, ratio: Rate) -> Decimal {
    let term_factor = clamp_score(dec!(100) - (Decimal::from(term_years) - dec!(5)) * dec!(3));
    let ratio_factor = clamp_score(dec!(100) - ratio * dec!(2));
    (term_factor + ratio_factor) / dec!(2)
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn recommendation_reason(
    plan: &LoanPlan,
    affordability: Decimal,
    cost: Decimal,
    payment: Decimal,
) -> String {
    let mut reasons: Vec<&str> = Vec::new();

    if affordability >= dec!(80) {
        reasons.push("Very affordable");
    } else if affordability >= dec!(60) {
        reasons.push("Reasonably affordable");
    }
    if cost >= dec!(80) {
        reasons.push("Low total cost");
    }
    if payment >= dec!(80) {
        reasons.push("Low monthly payment");
    }
    if plan.term_years <= 15 {
        reasons.push("Fast payoff");
    } else if plan.term_years >= 25 {
        reasons.push("Light monthly burden");
    }

    if reasons.is_empty() {
        "Balanced option".to_string()
    } else {
        reasons.join(", ")
    }
}

fn is_diverse_from(plan: &LoanPlan, selected: &[LoanPlan]) -> bool {
    selected.iter().all(|other| {
        let term_gap = plan.term_years.abs_diff(other.term_years);
        if term_gap >= DIVERSE_TERM_YEARS {
            return true;
        }

        if other.monthly_payment.is_zero() {
            return !plan.monthly_payment.is_zero();
        }
        let payment_gap_pct = (plan.monthly_payment - other.monthly_payment).abs()
            / other.monthly_payment
            * dec!(100);
        payment_gap_pct >= DIVERSE_PAYMENT_PCT
    })
}

fn clamp_score(score: Decimal) -> Decimal {
    if score < SCORE_MIN {
        SCORE_MIN
    } else if score > SCORE_MAX {
        SCORE_MAX
    } else {
        score
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planning::generator::{generate_plans, PlanRequest};
    use crate::types::LoanCategory;
    use rust_decimal_macros::dec;

    fn mortgage_candidates() -> Vec<LoanPlan> {
        generate_plans(&PlanRequest {
            total_amount: dec!(150_000),
            category: LoanCategory::Mortgage,
            monthly_income: dec!(3500),
            rate_override: None,
        })
        .unwrap()
    }

    fn no_preferences() -> RankPreferences {
        RankPreferences::default()
    }

    // -----------------------------------------------------------------------
    // 1. Sub-scores
    // -----------------------------------------------------------------------

    #[test]
    fn test_affordability_bands() {
        assert_eq!(score_affordability(dec!(10)), dec!(100));
        assert_eq!(score_affordability(dec!(30)), dec!(100));
        // Midpoint of the 30-40 band interpolates to 75.
        assert_eq!(score_affordability(dec!(35)), dec!(75));
        assert_eq!(score_affordability(dec!(40)), dec!(50));
        // 2 points lost per point above 40.
        assert_eq!(score_affordability(dec!(45)), dec!(40));
        assert_eq!(score_affordability(dec!(70)), dec!(0));
        assert_eq!(score_affordability(dec!(90)), dec!(0));
    }

    #[test]
    fn test_cost_normalization_extremes() {
        let plans = mortgage_candidates();
        let costs: Vec<Decimal> = plans.iter().map(|p| p.total_cost).collect();
        let cheapest = costs.iter().min().unwrap();
        let priciest = costs.iter().max().unwrap();

        for plan in &plans {
            let score = score_cost(plan, &plans);
            if plan.total_cost == *cheapest {
                assert_eq!(score, dec!(100));
            }
            if plan.total_cost == *priciest {
                assert_eq!(score, dec!(0));
            }
        }
    }

    #[test]
    fn test_all_tied_costs_score_100() {
        let plans = mortgage_candidates();
        let one = vec![plans[0].clone()];
        assert_eq!(score_cost(&plans[0], &one), dec!(100));
    }

    #[test]
    fn test_term_score_plateau() {
        let prefs = no_preferences();
        assert_eq!(score_term(15, &prefs), dec!(100));
        assert_eq!(score_term(18, &prefs), dec!(100));
        assert_eq!(score_term(20, &prefs), dec!(100));
        // Below the plateau: 70 + (term - 10) * 6
        assert_eq!(score_term(10, &prefs), dec!(70));
        assert_eq!(score_term(12, &prefs), dec!(82));
        // Above: 100 - (term - 20) * 3
        assert_eq!(score_term(25, &prefs), dec!(85));
        assert_eq!(score_term(30, &prefs), dec!(70));
    }

    #[test]
    fn test_term_score_with_preferences() {
        let short = RankPreferences {
            prefer_short_term: true,
            prefer_long_term: false,
        };
        assert_eq!(score_term(10, &short), dec!(100));
        assert_eq!(score_term(20, &short), dec!(50));
        assert_eq!(score_term(30, &short), dec!(0));
        // Terms under 10 would exceed 100 without the clamp.
        assert_eq!(score_term(5, &short), dec!(100));

        let long = RankPreferences {
            prefer_short_term: false,
            prefer_long_term: true,
        };
        assert_eq!(score_term(30, &long), dec!(100));
        assert_eq!(score_term(20, &long), dec!(50));
        assert_eq!(score_term(10, &long), dec!(0));
        assert_eq!(score_term(5, &long), dec!(0));
    }

    #[test]
    fn test_flexibility_is_mean_of_factors() {
        // term 5 -> factor 100; ratio 0 -> factor 100
        assert_eq!(score_flexibility(5, dec!(0)), dec!(100));
        // term 25 -> 100 - 60 = 40; ratio 30 -> 100 - 60 = 40
        assert_eq!(score_flexibility(25, dec!(30)), dec!(40));
        // term 3 clamps to 100 instead of 106
        assert_eq!(score_flexibility(3, dec!(0)), dec!(100));
        // ratio 60 -> factor 0
        assert_eq!(score_flexibility(5, dec!(60)), dec!(50));
    }

    // -----------------------------------------------------------------------
    // 2. Ranking
    // -----------------------------------------------------------------------

    #[test]
    fn test_rank_sorted_descending_with_bounded_scores() {
        let plans = mortgage_candidates();
        let ranked = rank_plans(&plans, &no_preferences());

        assert_eq!(ranked.len(), plans.len());
        for pair in ranked.windows(2) {
            assert!(pair[0].score >= pair[1].score, "ranking out of order");
        }
        for rp in &ranked {
            for score in [
                rp.score,
                rp.affordability_score,
                rp.cost_score,
                rp.payment_score,
                rp.term_score,
            ] {
                assert!(score >= dec!(0) && score <= dec!(100), "score {} out of range", score);
            }
        }
    }

    #[test]
    fn test_rank_empty_input() {
        assert!(rank_plans(&[], &no_preferences()).is_empty());
    }

    #[test]
    fn test_equal_scores_keep_generation_order() {
        // Two identical plans rank identically; the stable sort must keep
        // the first one first.
        let plans = mortgage_candidates();
        let pair = vec![plans[0].clone(), plans[0].clone()];
        let mut duplicated = pair.clone();
        duplicated[1].id = "dup".to_string();

        let ranked = rank_plans(&duplicated, &no_preferences());
        assert_eq!(ranked[0].score, ranked[1].score);
        assert_eq!(ranked[0].plan.id, plans[0].id);
        assert_eq!(ranked[1].plan.id, "dup");
    }

    #[test]
    fn test_short_term_preference_reorders() {
        let plans = mortgage_candidates();
        let short = RankPreferences {
            prefer_short_term: true,
            prefer_long_term: false,
        };
        let ranked = rank_plans(&plans, &short);
        let shortest_term = plans.iter().map(|p| p.term_years).min().unwrap();
        // The top plan under a short-term preference carries a short term.
        assert!(ranked[0].plan.term_years <= shortest_term + 5);
    }

    #[test]
    fn test_recommendation_reason_phrases() {
        let plans = mortgage_candidates();
        let ranked = rank_plans(&plans, &no_preferences());

        for rp in &ranked {
            assert!(!rp.recommendation_reason.is_empty());
            if rp.affordability_score >= dec!(80) {
                assert!(rp.recommendation_reason.contains("Very affordable"));
            }
            if rp.plan.term_years <= 15 {
                assert!(rp.recommendation_reason.contains("Fast payoff"));
            }
        }
    }

    // -----------------------------------------------------------------------
    // 3. Diverse selection
    // -----------------------------------------------------------------------

    #[test]
    fn test_select_diverse_top_plan_always_kept() {
        let ranked = rank_plans(&mortgage_candidates(), &no_preferences());
        let selected = select_diverse(&ranked, 2);

        assert_eq!(selected[0].id, ranked[0].plan.id);
        assert_eq!(selected.len(), 2);
    }

    #[test]
    fn test_selected_pair_is_actually_diverse() {
        let ranked = rank_plans(&mortgage_candidates(), &no_preferences());
        let selected = select_diverse(&ranked, 2);
        assert_eq!(selected.len(), 2);

        let a = &selected[0];
        let b = &selected[1];
        let term_gap = a.term_years.abs_diff(b.term_years);
        let payment_gap_pct =
            (b.monthly_payment - a.monthly_payment).abs() / a.monthly_payment * dec!(100);
        assert!(
            term_gap >= 5 || payment_gap_pct >= dec!(15),
            "selected plans too similar: {}y vs {}y, payment gap {}%",
            a.term_years,
            b.term_years,
            payment_gap_pct
        );
    }

    #[test]
    fn test_select_diverse_fewer_candidates_than_count() {
        let ranked = rank_plans(&mortgage_candidates(), &no_preferences());
        let two = ranked[..2.min(ranked.len())].to_vec();
        // With candidates <= count everything comes back, similar or not.
        let selected = select_diverse(&two, 5);
        assert_eq!(selected.len(), 2);
    }

    #[test]
    fn test_select_diverse_degenerate_inputs() {
        let ranked = rank_plans(&mortgage_candidates(), &no_preferences());
        assert!(select_diverse(&ranked, 0).is_empty());
        assert!(select_diverse(&[], 3).is_empty());
    }

    #[test]
    fn test_select_diverse_may_return_fewer() {
        // All candidates share one term; payments within 15% of each other
        // leave only the top plan selectable.
        let base = mortgage_candidates();
        let mut near_clones: Vec<LoanPlan> = Vec::new();
        for i in 0..4 {
            let mut p = base[0].clone();
            p.id = format!("clone-{}", i);
            p.monthly_payment += Decimal::from(i); // well under 15% apart
            near_clones.push(p);
        }

        let ranked = rank_plans(&near_clones, &no_preferences());
        let selected = select_diverse(&ranked, 3);
        assert_eq!(selected.len(), 1);
    }
}
