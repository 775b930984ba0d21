use clap::Args;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;

use loan_planner_core::planning::comparison::compare_plans;
use loan_planner_core::planning::generator::{create_plan, generate_plans, LoanPlan, PlanRequest};
use loan_planner_core::planning::ranking::{rank_plans, select_diverse, RankPreferences};
use loan_planner_core::types::LoanCategory;

use crate::input;

#[derive(Deserialize)]
struct RankInput {
    #[serde(flatten)]
    request: PlanRequest,
    #[serde(flatten)]
    preferences: RankPreferences,
    top: Option<usize>,
}

#[derive(Deserialize)]
struct CompareInput {
    plan_a: LoanPlan,
    plan_b: LoanPlan,
}

/// Arguments for plan generation
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct PlansArgs {
    /// Path to JSON or YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Total amount needed, before any down payment
    #[arg(long)]
    pub amount: Option<Decimal>,

    /// Loan category: mortgage, personal, auto, student, business
    #[arg(long, default_value = "unknown")]
    pub category: String,

    /// Primary monthly income
    #[arg(long, default_value = "0")]
    pub income: Decimal,

    /// Override the category's default annual rate (0.04 = 4%)
    #[arg(long)]
    pub rate: Option<Decimal>,
}

/// Arguments for plan ranking
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct RankArgs {
    /// Path to JSON or YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Total amount needed, before any down payment
    #[arg(long)]
    pub amount: Option<Decimal>,

    /// Loan category: mortgage, personal, auto, student, business
    #[arg(long, default_value = "unknown")]
    pub category: String,

    /// Primary monthly income
    #[arg(long, default_value = "0")]
    pub income: Decimal,

    /// Override the category's default annual rate (0.04 = 4%)
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Favor shorter terms when scoring
    #[arg(long)]
    pub prefer_short_term: bool,

    /// Favor longer terms when scoring
    #[arg(long)]
    pub prefer_long_term: bool,

    /// Also pick this many diverse plans from the ranking
    #[arg(long)]
    pub top: Option<usize>,
}

/// Arguments for pairwise plan comparison
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct CompareArgs {
    /// Path to JSON or YAML input file holding plan_a and plan_b
    #[arg(long)]
    pub input: Option<String>,

    /// Total amount needed, shared by both structures
    #[arg(long)]
    pub amount: Option<Decimal>,

    /// Loan category: mortgage, personal, auto, student, business
    #[arg(long, default_value = "unknown")]
    pub category: String,

    /// Primary monthly income
    #[arg(long, default_value = "0")]
    pub income: Decimal,

    /// Override the category's default annual rate (0.04 = 4%)
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Term in years for the first structure
    #[arg(long)]
    pub term_a: Option<u32>,

    /// Term in years for the second structure
    #[arg(long)]
    pub term_b: Option<u32>,

    /// Down payment fraction for the first structure (0.10 = 10%)
    #[arg(long, default_value = "0")]
    pub down_payment_a: Decimal,

    /// Down payment fraction for the second structure (0.10 = 10%)
    #[arg(long, default_value = "0")]
    pub down_payment_b: Decimal,
}

pub fn run_plans(args: PlansArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let request: PlanRequest = if let Some(ref path) = args.input {
        input::file::read_input(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        PlanRequest {
            total_amount: args
                .amount
                .ok_or("--amount is required (or provide --input)")?,
            category: LoanCategory::parse(&args.category),
            monthly_income: args.income,
            rate_override: args.rate,
        }
    };

    let plans = generate_plans(&request)?;
    Ok(serde_json::json!({
        "count": plans.len(),
        "plans": plans,
    }))
}

pub fn run_rank(args: RankArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let rank_input: RankInput = if let Some(ref path) = args.input {
        input::file::read_input(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        RankInput {
            request: PlanRequest {
                total_amount: args
                    .amount
                    .ok_or("--amount is required (or provide --input)")?,
                category: LoanCategory::parse(&args.category),
                monthly_income: args.income,
                rate_override: args.rate,
            },
            preferences: RankPreferences {
                prefer_short_term: args.prefer_short_term,
                prefer_long_term: args.prefer_long_term,
            },
            top: args.top,
        }
    };

    let plans = generate_plans(&rank_input.request)?;
    let ranked = rank_plans(&plans, &rank_input.preferences);

    let mut payload = serde_json::json!({
        "count": ranked.len(),
        "ranked": ranked,
    });
    if let Some(top) = rank_input.top {
        let selected = select_diverse(&ranked, top);
        payload["selected"] = serde_json::to_value(selected)?;
    }
    Ok(payload)
}

pub fn run_compare(args: CompareArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let compare_input: CompareInput = if let Some(ref path) = args.input {
        input::file::read_input(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        let amount = args
            .amount
            .ok_or("--amount is required (or provide --input)")?;
        let term_a = args
            .term_a
            .ok_or("--term-a is required (or provide --input)")?;
        let term_b = args
            .term_b
            .ok_or("--term-b is required (or provide --input)")?;
        let rate = args
            .rate
            .unwrap_or_else(|| LoanCategory::parse(&args.category).profile().default_rate);

        CompareInput {
            plan_a: priced_plan(amount, args.down_payment_a, rate, term_a, args.income)?,
            plan_b: priced_plan(amount, args.down_payment_b, rate, term_b, args.income)?,
        }
    };

    let result = compare_plans(&compare_input.plan_a, &compare_input.plan_b);
    Ok(serde_json::to_value(result)?)
}

fn priced_plan(
    amount: Decimal,
    down_payment_pct: Decimal,
    rate: Decimal,
    term_years: u32,
    income: Decimal,
) -> Result<LoanPlan, Box<dyn std::error::Error>> {
    create_plan(amount, down_payment_pct, rate, term_years, income)?
        .ok_or_else(|| "Nothing left to borrow with these parameters".into())
}
