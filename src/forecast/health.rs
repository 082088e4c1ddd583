//! Reserve health indicators derived from a finished forecast

use serde::{Deserialize, Serialize};

use super::result::{DetailedAsset, ForecastResult};

/// Caller-supplied thresholds
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct HealthThresholds {
    /// Missing target means the balance is never below target
    pub target_reserve_balance: Option<f64>,
    pub total_unit_count: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthIndicators {
    pub overdue_assets_count: usize,
    pub is_yeb_below_target: bool,
    pub is_underfunded: bool,
    pub suggested_monthly_deposit_per_unit: f64,
}

impl HealthIndicators {
    pub fn evaluate(result: &ForecastResult, thresholds: &HealthThresholds) -> Self {
        Self {
            overdue_assets_count: overdue_assets_count(&result.detailed_assets),
            is_yeb_below_target: is_yeb_below_target(
                result.final_reserve_balance,
                thresholds.target_reserve_balance,
            ),
            is_underfunded: is_underfunded(
                result.total_deposits_in_forecast_period,
                result.total_expenses_in_forecast_period,
            ),
            suggested_monthly_deposit_per_unit: suggested_monthly_deposit_per_unit(
                result.total_expenses_in_forecast_period,
                result.forecast_years,
                thresholds.total_unit_count,
            ),
        }
    }
}

pub fn overdue_assets_count(assets: &[DetailedAsset]) -> usize {
    assets.iter().filter(|a| a.is_overdue).count()
}

pub fn is_yeb_below_target(final_balance: f64, target: Option<f64>) -> bool {
    target.is_some_and(|t| final_balance < t)
}

pub fn is_underfunded(total_deposits: f64, total_expenses: f64) -> bool {
    total_deposits < total_expenses
}

/// Even monthly per-unit contribution that would cover the period's
/// expenses. Zero when there are no years or no units.
pub fn suggested_monthly_deposit_per_unit(total_expenses: f64, forecast_years: u32, total_units: u32) -> f64 {
    if forecast_years == 0 || total_units == 0 {
        return 0.0;
    }
    total_expenses / forecast_years as f64 / total_units as f64 / 12.0
}
