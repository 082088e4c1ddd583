//! Compare the standard 1/5/10/15-year horizons for one inventory
//!
//! Usage: compare_horizons <request.json> [current_year]

use anyhow::{bail, Context, Result};
use chrono::{Datelike, Local};

use reserve_forecast::settings::STANDARD_HORIZONS;
use reserve_forecast::ForecastRequest;

fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let Some(path) = args.next() else {
        bail!("usage: compare_horizons <request.json> [current_year]");
    };
    let current_year = match args.next() {
        Some(year) => year.parse().with_context(|| format!("invalid year '{}'", year))?,
        None => Local::now().year(),
    };

    let runner = ForecastRequest::from_path(&path)?.into_runner();
    let results = runner.run_horizons(current_year, &STANDARD_HORIZONS);

    println!("Horizon comparison from {}", current_year);
    println!("{:>6} {:>8} {:>14} {:>14} {:>14} {:>12} {:>12}",
        "Years", "Events", "Deposits", "Expenses", "Final YEB", "Underfunded", "Per unit/mo");
    println!("{}", "-".repeat(86));

    for (years, result) in results {
        let result = result.with_context(|| format!("{}-year forecast", years))?;
        println!("{:>6} {:>8} {:>14.2} {:>14.2} {:>14.2} {:>12} {:>12.2}",
            years,
            result.replacements.len(),
            result.total_deposits_in_forecast_period,
            result.total_expenses_in_forecast_period,
            result.final_reserve_balance,
            result.health.is_underfunded,
            result.health.suggested_monthly_deposit_per_unit,
        );
    }

    Ok(())
}
