mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::affordability::{AffordArgs, MetricsArgs};
use commands::amortization::{BreakdownArgs, ScheduleArgs, SummaryArgs};
use commands::planning::{CompareArgs, PlansArgs, RankArgs};

/// Loan planning and affordability analysis
#[derive(Parser)]
#[command(
    name = "lpa",
    version,
    about = "Loan planning and affordability analysis",
    long_about = "A CLI for loan planning with decimal precision. Builds amortization \
                  schedules, generates and ranks candidate loan plans, compares plan \
                  structures, and assesses affordability against a household's finances."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a month-by-month amortization schedule
    Schedule(ScheduleArgs),
    /// Aggregate a schedule into monthly/quarterly/yearly buckets
    ScheduleSummary(SummaryArgs),
    /// Principal/interest split for a single payment period
    Breakdown(BreakdownArgs),
    /// Generate candidate loan plans for an amount and category
    Plans(PlansArgs),
    /// Generate, score, and rank loan plans
    Rank(RankArgs),
    /// Compare two loan plan structures side by side
    Compare(CompareArgs),
    /// Compute financial metrics from a household profile
    Metrics(MetricsArgs),
    /// Assess loan affordability and get recommendations
    Afford(AffordArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Schedule(args) => commands::amortization::run_schedule(args),
        Commands::ScheduleSummary(args) => commands::amortization::run_schedule_summary(args),
        Commands::Breakdown(args) => commands::amortization::run_breakdown(args),
        Commands::Plans(args) => commands::planning::run_plans(args),
        Commands::Rank(args) => commands::planning::run_rank(args),
        Commands::Compare(args) => commands::planning::run_compare(args),
        Commands::Metrics(args) => commands::affordability::run_metrics(args),
        Commands::Afford(args) => commands::affordability::run_afford(args),
        Commands::Version => {
            println!("lpa {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
