//! Flat CSV exports of a forecast for spreadsheets and the UI download

use std::fs::File;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use crate::forecast::ForecastResult;

pub const REPLACEMENT_HEADER: [&str; 5] = ["Unit", "Community", "Category", "ReplacementYear", "ProjectedCost"];

pub const BALANCE_HEADER: [&str; 6] = [
    "Year",
    "OpeningBalance",
    "Growth",
    "Deposit",
    "Expenses",
    "ClosingBalance",
];

/// One row per scheduled replacement, in schedule order
pub fn write_replacements_csv<W: Write>(result: &ForecastResult, writer: W) -> Result<()> {
    let mut out = csv::Writer::from_writer(writer);
    out.write_record(REPLACEMENT_HEADER)?;

    for r in &result.replacements {
        out.write_record([
            r.unit.clone(),
            r.community.clone(),
            r.category.clone(),
            r.year.to_string(),
            format!("{:.2}", r.cost),
        ])?;
    }

    out.flush()?;
    Ok(())
}

/// One row per simulated year of the reserve ledger
pub fn write_balances_csv<W: Write>(result: &ForecastResult, writer: W) -> Result<()> {
    let mut out = csv::Writer::from_writer(writer);
    out.write_record(BALANCE_HEADER)?;

    for y in &result.year_balances {
        out.write_record([
            y.year.to_string(),
            format!("{:.2}", y.opening_balance),
            format!("{:.2}", y.investment_growth),
            format!("{:.2}", y.deposit),
            format!("{:.2}", y.expenses),
            format!("{:.2}", y.closing_balance),
        ])?;
    }

    out.flush()?;
    Ok(())
}

pub fn export_replacements<P: AsRef<Path>>(path: P, result: &ForecastResult) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    write_replacements_csv(result, file)
}

pub fn export_balances<P: AsRef<Path>>(path: P, result: &ForecastResult) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    write_balances_csv(result, file)
}
