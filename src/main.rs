//! Reserve Forecast CLI
//!
//! Runs a reserve forecast for an inventory exported as JSON

use std::path::PathBuf;

use anyhow::Result;
use chrono::{Datelike, Local};
use clap::{Parser, ValueEnum};

use reserve_forecast::export::{export_balances, export_replacements};
use reserve_forecast::{ForecastRequest, ForecastResult};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

/// Project asset replacements and simulate the reserve fund
#[derive(Debug, Parser)]
#[command(name = "reserve-forecast", version)]
struct Cli {
    /// Forecast request (assets + settings) as JSON
    #[arg(short, long)]
    input: PathBuf,

    /// First simulated year (defaults to the current calendar year)
    #[arg(long)]
    current_year: Option<i32>,

    /// Forecast a single community using its setting overrides
    #[arg(long)]
    community: Option<String>,

    /// Override the forecast horizon in years
    #[arg(long)]
    years: Option<u32>,

    /// Write the replacement schedule as CSV
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Write the year-by-year ledger as CSV
    #[arg(long)]
    balances_csv: Option<PathBuf>,

    #[arg(long, value_enum, default_value = "table")]
    format: OutputFormat,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut request = ForecastRequest::from_path(&cli.input)?;
    if cli.years.is_some() {
        request.forecast_years = cli.years;
    }
    let community = cli.community.clone().or_else(|| request.community.clone());
    let current_year = cli.current_year.unwrap_or_else(|| Local::now().year());

    let runner = request.into_runner();
    let result = runner.run(current_year, community.as_deref())?;

    match cli.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
        OutputFormat::Table => print_table(&result, community.as_deref()),
    }

    if let Some(path) = &cli.csv {
        export_replacements(path, &result)?;
        println!("\nReplacement schedule written to: {}", path.display());
    }
    if let Some(path) = &cli.balances_csv {
        export_balances(path, &result)?;
        println!("Reserve ledger written to: {}", path.display());
    }

    Ok(())
}

fn print_table(result: &ForecastResult, community: Option<&str>) {
    println!("Reserve Forecast {}-{} ({})", result.start_year, result.end_year(), community.unwrap_or("all communities"));
    println!("{}", "=".repeat(60));

    println!("\nScheduled replacements:");
    println!("{:>6} {:<14} {:<18} {:<16} {:>12} {:>8}", "Year", "Unit", "Community", "Category", "Cost", "Overdue");
    println!("{}", "-".repeat(80));
    for r in &result.replacements {
        println!(
            "{:>6} {:<14} {:<18} {:<16} {:>12.2} {:>8}",
            r.year,
            r.unit,
            r.community,
            r.category,
            r.cost,
            if r.is_overdue { "yes" } else { "" },
        );
    }

    println!("\nReserve ledger:");
    println!("{:>6} {:>14} {:>12} {:>12} {:>12} {:>14}", "Year", "Opening", "Growth", "Deposit", "Expenses", "Year-end");
    println!("{}", "-".repeat(76));
    for y in &result.year_balances {
        println!(
            "{:>6} {:>14.2} {:>12.2} {:>12.2} {:>12.2} {:>14.2}{}",
            y.year,
            y.opening_balance,
            y.investment_growth,
            y.deposit,
            y.expenses,
            y.closing_balance,
            if y.is_negative { "  (deficit)" } else { "" },
        );
    }

    let health = &result.health;
    println!("\nSummary:");
    println!("  Total deposits:        ${:.2}", result.total_deposits_in_forecast_period);
    println!("  Total expenses:        ${:.2}", result.total_expenses_in_forecast_period);
    println!("  Final reserve balance: ${:.2}", result.final_reserve_balance);
    println!("  Overdue assets:        {}", health.overdue_assets_count);
    println!("  Underfunded:           {}", health.is_underfunded);
    println!("  Below target:          {}", health.is_yeb_below_target);
    println!("  Suggested deposit:     ${:.2} per unit per month", health.suggested_monthly_deposit_per_unit);

    if !result.skipped_assets.is_empty() {
        println!("\nSkipped assets:");
        for s in &result.skipped_assets {
            println!("  {}: {}", s.asset_id, s.reason);
        }
    }
}
