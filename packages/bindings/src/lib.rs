use napi::Result as NapiResult;
use napi_derive::napi;
use rust_decimal::Decimal;
use serde::Deserialize;

use loan_planner_core::affordability::assessment;
use loan_planner_core::affordability::metrics;
use loan_planner_core::amortization::{schedule, summary};
use loan_planner_core::planning::{comparison, generator, ranking};
use loan_planner_core::types::{FinancialProfile, LoanCategory};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Request shapes for scalar-argument core functions
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct ScheduleRequest {
    principal: Decimal,
    annual_rate: Decimal,
    term_years: u32,
}

#[derive(Deserialize)]
struct SummaryRequest {
    principal: Decimal,
    annual_rate: Decimal,
    term_years: u32,
    #[serde(default = "SummaryRequest::default_interval")]
    interval: summary::SummaryInterval,
}

impl SummaryRequest {
    fn default_interval() -> summary::SummaryInterval {
        summary::SummaryInterval::Monthly
    }
}

#[derive(Deserialize)]
struct BreakdownRequest {
    principal: Decimal,
    annual_rate: Decimal,
    term_years: u32,
    period: u32,
}

#[derive(Deserialize)]
struct RankRequest {
    plans: Vec<generator::LoanPlan>,
    #[serde(default)]
    preferences: ranking::RankPreferences,
}

#[derive(Deserialize)]
struct SelectRequest {
    ranked: Vec<ranking::RankedPlan>,
    count: usize,
}

#[derive(Deserialize)]
struct CompareRequest {
    plan_a: generator::LoanPlan,
    plan_b: generator::LoanPlan,
}

#[derive(Deserialize)]
struct AssessRequest {
    #[serde(flatten)]
    profile: FinancialProfile,
    #[serde(default)]
    category: LoanCategory,
    term_years: Option<u32>,
}

// ---------------------------------------------------------------------------
// Amortization
// ---------------------------------------------------------------------------

#[napi]
pub fn build_schedule(input_json: String) -> NapiResult<String> {
    let input: ScheduleRequest = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = schedule::build_schedule(input.principal, input.annual_rate, input.term_years)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn summarize_schedule(input_json: String) -> NapiResult<String> {
    let input: SummaryRequest = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let built = schedule::build_schedule(input.principal, input.annual_rate, input.term_years)
        .map_err(to_napi_error)?;
    let output = summary::summarize_schedule(&built, input.interval);
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn payment_breakdown(input_json: String) -> NapiResult<String> {
    let input: BreakdownRequest = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let built = schedule::build_schedule(input.principal, input.annual_rate, input.term_years)
        .map_err(to_napi_error)?;
    let output = schedule::payment_breakdown(&built, input.period);
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Planning
// ---------------------------------------------------------------------------

#[napi]
pub fn generate_plans(input_json: String) -> NapiResult<String> {
    let input: generator::PlanRequest =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = generator::generate_plans(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn rank_plans(input_json: String) -> NapiResult<String> {
    let input: RankRequest = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = ranking::rank_plans(&input.plans, &input.preferences);
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn select_diverse(input_json: String) -> NapiResult<String> {
    let input: SelectRequest = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = ranking::select_diverse(&input.ranked, input.count);
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn compare_plans(input_json: String) -> NapiResult<String> {
    let input: CompareRequest = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = comparison::compare_plans(&input.plan_a, &input.plan_b);
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Affordability
// ---------------------------------------------------------------------------

#[napi]
pub fn compute_metrics(input_json: String) -> NapiResult<String> {
    let input: AssessRequest = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        metrics::compute_financial_metrics(&input.profile, &input.category, input.term_years)
            .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn assess_affordability(input_json: String) -> NapiResult<String> {
    let input: AssessRequest = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let computed =
        metrics::compute_financial_metrics(&input.profile, &input.category, input.term_years)
            .map_err(to_napi_error)?;
    let output = assessment::assess_affordability(&input.profile, &computed);
    serde_json::to_string(&output).map_err(to_napi_error)
}
