use clap::Args;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;

use loan_planner_core::affordability::assessment::assess_affordability;
use loan_planner_core::affordability::metrics::compute_financial_metrics;
use loan_planner_core::types::{FinancialProfile, LoanCategory};

use crate::input;

#[derive(Deserialize)]
struct ProfileInput {
    #[serde(flatten)]
    profile: FinancialProfile,
    #[serde(default)]
    category: LoanCategory,
    term_years: Option<u32>,
}

/// Household financial flags shared by `metrics` and `afford`.
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct MetricsArgs {
    /// Path to JSON or YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Primary monthly income
    #[arg(long, default_value = "0")]
    pub monthly_income: Decimal,

    /// Additional monthly income
    #[arg(long, default_value = "0")]
    pub other_income: Decimal,

    /// Regular living expenses per month
    #[arg(long, default_value = "0")]
    pub monthly_expenses: Decimal,

    /// Payments on loans already being serviced
    #[arg(long, default_value = "0")]
    pub existing_loan_payments: Decimal,

    /// Current savings balance
    #[arg(long, default_value = "0")]
    pub savings: Decimal,

    /// Desired loan amount
    #[arg(long)]
    pub loan_amount: Option<Decimal>,

    /// Loan category: mortgage, personal, auto, student, business
    #[arg(long, default_value = "unknown")]
    pub category: String,

    /// Override the category's default term for the payment estimate
    #[arg(long)]
    pub term_years: Option<u32>,
}

/// `afford` takes the same inputs as `metrics`.
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct AffordArgs {
    #[command(flatten)]
    pub metrics: MetricsArgs,
}

pub fn run_metrics(args: MetricsArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let profile_input = resolve_profile(args)?;
    let metrics = compute_financial_metrics(
        &profile_input.profile,
        &profile_input.category,
        profile_input.term_years,
    )?;
    Ok(serde_json::to_value(metrics)?)
}

pub fn run_afford(args: AffordArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let profile_input = resolve_profile(args.metrics)?;
    let metrics = compute_financial_metrics(
        &profile_input.profile,
        &profile_input.category,
        profile_input.term_years,
    )?;
    let assessment = assess_affordability(&profile_input.profile, &metrics);
    Ok(serde_json::to_value(assessment)?)
}

fn resolve_profile(args: MetricsArgs) -> Result<ProfileInput, Box<dyn std::error::Error>> {
    if let Some(ref path) = args.input {
        return input::file::read_input(path);
    }
    if let Some(data) = input::stdin::read_stdin()? {
        return Ok(serde_json::from_value(data)?);
    }

    Ok(ProfileInput {
        profile: FinancialProfile {
            monthly_income: args.monthly_income,
            other_income: args.other_income,
            monthly_expenses: args.monthly_expenses,
            existing_loan_payments: args.existing_loan_payments,
            savings: args.savings,
            loan_amount: args
                .loan_amount
                .ok_or("--loan-amount is required (or provide --input)")?,
        },
        category: LoanCategory::parse(&args.category),
        term_years: args.term_years,
    })
}
