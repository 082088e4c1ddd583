//! Forecast output structures

use serde::{Deserialize, Serialize};

use super::health::HealthIndicators;
use super::scheduler::offset_year;

/// One projected replacement event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastedReplacement {
    /// Calendar year the replacement falls due
    pub year: i32,

    /// Inflation-adjusted cost, rounded to cents
    pub cost: f64,

    // Originating asset
    pub asset_id: String,
    pub asset_name: String,
    pub unit: String,
    pub community: String,
    pub category: String,

    /// Whether the asset was already past its nominal replacement year
    pub is_overdue: bool,
}

/// Per-asset view used for overdue badges, whether or not the asset falls
/// inside the horizon
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailedAsset {
    pub asset_id: String,
    pub name: String,
    pub unit: String,
    pub community: String,
    pub category: String,
    pub install_year: i32,
    pub lifespan: u32,

    /// `install_year + lifespan`
    pub nominal_replacement_year: i32,

    /// First replacement year on or after the forecast start
    pub next_replacement_year: i32,

    pub years_overdue: u32,
    pub is_overdue: bool,
    pub projected_cost: f64,

    /// Whether `next_replacement_year` lies inside the horizon
    pub in_horizon: bool,
}

/// Asset left out of the forecast because its data was malformed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkippedAsset {
    pub asset_id: String,
    pub reason: String,
}

/// One simulated year of the reserve ledger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearBalance {
    pub year: i32,
    pub opening_balance: f64,
    pub investment_growth: f64,
    pub deposit: f64,

    /// Withdrawals charged to this year. The final row also carries the
    /// replacements due in the horizon's boundary year
    /// (`start_year + forecast_years`), which has no row of its own.
    pub expenses: f64,

    /// Year-end balance (YEB)
    pub closing_balance: f64,

    /// Closing balance below zero
    pub is_negative: bool,

    /// Deposits made so far fall short of expenses charged so far
    pub is_underfunded: bool,

    pub replacement_count: usize,
    pub overdue_replacement_count: usize,
}

/// Complete forecast for one request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastResult {
    pub start_year: i32,
    pub forecast_years: u32,

    /// Sorted ascending by year, ties in input order
    pub replacements: Vec<ForecastedReplacement>,

    pub detailed_assets: Vec<DetailedAsset>,

    pub year_balances: Vec<YearBalance>,

    pub total_deposits_in_forecast_period: f64,
    pub total_expenses_in_forecast_period: f64,
    pub final_reserve_balance: f64,

    pub skipped_assets: Vec<SkippedAsset>,

    pub health: HealthIndicators,
}

impl ForecastResult {
    /// Last calendar year covered by the replacement schedule
    pub fn end_year(&self) -> i32 {
        offset_year(self.start_year, self.forecast_years)
    }

    pub fn summary(&self) -> ForecastSummary {
        let lowest = self
            .year_balances
            .iter()
            .min_by(|a, b| a.closing_balance.total_cmp(&b.closing_balance));

        ForecastSummary {
            start_year: self.start_year,
            end_year: self.end_year(),
            replacement_count: self.replacements.len(),
            overdue_assets: self.health.overdue_assets_count,
            skipped_assets: self.skipped_assets.len(),
            total_deposits: self.total_deposits_in_forecast_period,
            total_expenses: self.total_expenses_in_forecast_period,
            final_balance: self.final_reserve_balance,
            lowest_balance: lowest.map(|y| y.closing_balance).unwrap_or(self.final_reserve_balance),
            lowest_balance_year: lowest.map(|y| y.year),
            first_negative_year: self.year_balances.iter().find(|y| y.is_negative).map(|y| y.year),
        }
    }
}

/// Headline figures for a forecast
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastSummary {
    pub start_year: i32,
    pub end_year: i32,
    pub replacement_count: usize,
    pub overdue_assets: usize,
    pub skipped_assets: usize,
    pub total_deposits: f64,
    pub total_expenses: f64,
    pub final_balance: f64,
    pub lowest_balance: f64,
    pub lowest_balance_year: Option<i32>,
    pub first_negative_year: Option<i32>,
}
