use clap::Args;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;

use loan_planner_core::amortization::schedule::{
    build_schedule, payment_breakdown,
};
use loan_planner_core::amortization::summary::{summarize_schedule, SummaryInterval};

use crate::input;

/// Shared loan parameters accepted from files and stdin.
#[derive(Deserialize)]
struct ScheduleInput {
    principal: Decimal,
    annual_rate: Decimal,
    term_years: u32,
}

#[derive(Deserialize)]
struct SummaryInput {
    principal: Decimal,
    annual_rate: Decimal,
    term_years: u32,
    #[serde(default = "default_interval")]
    interval: SummaryInterval,
}

fn default_interval() -> SummaryInterval {
    SummaryInterval::Monthly
}

#[derive(Deserialize)]
struct BreakdownInput {
    principal: Decimal,
    annual_rate: Decimal,
    term_years: u32,
    period: u32,
}

/// Arguments for schedule construction
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct ScheduleArgs {
    /// Path to JSON or YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Loan principal
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Annual interest rate as a decimal (0.05 = 5%)
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Term in years
    #[arg(long)]
    pub term_years: Option<u32>,
}

/// Arguments for schedule aggregation
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct SummaryArgs {
    /// Path to JSON or YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Loan principal
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Annual interest rate as a decimal (0.05 = 5%)
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Term in years
    #[arg(long)]
    pub term_years: Option<u32>,

    /// Bucket size: monthly, quarterly, or yearly
    #[arg(long, default_value = "monthly")]
    pub interval: String,
}

/// Arguments for a single-period breakdown
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct BreakdownArgs {
    /// Path to JSON or YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Loan principal
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Annual interest rate as a decimal (0.05 = 5%)
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Term in years
    #[arg(long)]
    pub term_years: Option<u32>,

    /// Payment period to inspect, 1-based
    #[arg(long)]
    pub period: Option<u32>,
}

pub fn run_schedule(args: ScheduleArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let schedule_input: ScheduleInput = if let Some(ref path) = args.input {
        input::file::read_input(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        ScheduleInput {
            principal: args
                .principal
                .ok_or("--principal is required (or provide --input)")?,
            annual_rate: args.rate.ok_or("--rate is required (or provide --input)")?,
            term_years: args
                .term_years
                .ok_or("--term-years is required (or provide --input)")?,
        }
    };

    let schedule = build_schedule(
        schedule_input.principal,
        schedule_input.annual_rate,
        schedule_input.term_years,
    )?;
    Ok(serde_json::to_value(schedule)?)
}

pub fn run_schedule_summary(args: SummaryArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let summary_input: SummaryInput = if let Some(ref path) = args.input {
        input::file::read_input(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        SummaryInput {
            principal: args
                .principal
                .ok_or("--principal is required (or provide --input)")?,
            annual_rate: args.rate.ok_or("--rate is required (or provide --input)")?,
            term_years: args
                .term_years
                .ok_or("--term-years is required (or provide --input)")?,
            interval: parse_interval(&args.interval)?,
        }
    };

    let schedule = build_schedule(
        summary_input.principal,
        summary_input.annual_rate,
        summary_input.term_years,
    )?;
    let points = summarize_schedule(&schedule, summary_input.interval.clone());

    Ok(serde_json::json!({
        "interval": summary_input.interval,
        "monthly_payment": schedule.monthly_payment,
        "total_interest": schedule.total_interest,
        "points": points,
    }))
}

pub fn run_breakdown(args: BreakdownArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let breakdown_input: BreakdownInput = if let Some(ref path) = args.input {
        input::file::read_input(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        BreakdownInput {
            principal: args
                .principal
                .ok_or("--principal is required (or provide --input)")?,
            annual_rate: args.rate.ok_or("--rate is required (or provide --input)")?,
            term_years: args
                .term_years
                .ok_or("--term-years is required (or provide --input)")?,
            period: args
                .period
                .ok_or("--period is required (or provide --input)")?,
        }
    };

    let schedule = build_schedule(
        breakdown_input.principal,
        breakdown_input.annual_rate,
        breakdown_input.term_years,
    )?;
    let breakdown = payment_breakdown(&schedule, breakdown_input.period);
    Ok(serde_json::to_value(breakdown)?)
}

fn parse_interval(raw: &str) -> Result<SummaryInterval, Box<dyn std::error::Error>> {
    match raw.trim().to_lowercase().as_str() {
        "monthly" => Ok(SummaryInterval::Monthly),
        "quarterly" => Ok(SummaryInterval::Quarterly),
        "yearly" => Ok(SummaryInterval::Yearly),
        other => Err(format!(
            "Unknown interval '{}': expected monthly, quarterly, or yearly",
            other
        )
        .into()),
    }
}
