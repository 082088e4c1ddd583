//! Forecast request configuration

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::asset::Asset;
use crate::error::{ForecastError, Result};
use crate::settings::ReserveSettings;

/// Lifespan used for categories that do not specify one
pub const DEFAULT_LIFESPAN: u32 = 10;

/// Longest horizon a forecast accepts
pub const MAX_FORECAST_YEARS: u32 = 100;

fn default_lifespan() -> u32 {
    DEFAULT_LIFESPAN
}

/// Everything one forecast call needs. The engine only reads it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastInput {
    pub assets: Vec<Asset>,

    pub inflation_rate: f64,

    pub investment_rate: f64,

    /// Horizon in years (typically 1, 5, 10 or 15)
    pub forecast_years: u32,

    pub annual_deposit: f64,

    pub initial_reserve_balance: f64,

    #[serde(default)]
    pub target_reserve_balance: Option<f64>,

    /// Units sharing the reserve. Derived from the assets' communities when absent.
    #[serde(default)]
    pub total_unit_count: Option<u32>,

    #[serde(default = "default_lifespan")]
    pub default_lifespan: u32,

    /// Schedule every expiration inside the horizon, not only the next one
    #[serde(default)]
    pub recurring_replacements: bool,
}

impl ForecastInput {
    pub fn from_settings(assets: Vec<Asset>, settings: &ReserveSettings) -> Self {
        Self {
            assets,
            inflation_rate: settings.inflation_rate,
            investment_rate: settings.investment_rate,
            forecast_years: settings.forecast_years,
            annual_deposit: settings.annual_deposit,
            initial_reserve_balance: settings.initial_reserve_balance,
            target_reserve_balance: settings.target_reserve_balance,
            total_unit_count: None,
            default_lifespan: DEFAULT_LIFESPAN,
            recurring_replacements: false,
        }
    }

    pub fn with_unit_count(mut self, units: u32) -> Self {
        self.total_unit_count = Some(units);
        self
    }

    /// Reject configurations that cannot produce a meaningful forecast
    pub fn validate(&self) -> Result<()> {
        non_negative_rate("inflation_rate", self.inflation_rate)?;
        non_negative_rate("investment_rate", self.investment_rate)?;
        non_negative_rate("annual_deposit", self.annual_deposit)?;

        if !self.initial_reserve_balance.is_finite() {
            return Err(ForecastError::config("initial_reserve_balance", "must be a finite amount"));
        }
        if let Some(target) = self.target_reserve_balance {
            if !target.is_finite() {
                return Err(ForecastError::config("target_reserve_balance", "must be a finite amount"));
            }
        }
        if self.forecast_years == 0 {
            return Err(ForecastError::config("forecast_years", "horizon must be at least one year"));
        }
        if self.forecast_years > MAX_FORECAST_YEARS {
            return Err(ForecastError::config(
                "forecast_years",
                format!("horizon must be at most {} years, got {}", MAX_FORECAST_YEARS, self.forecast_years),
            ));
        }
        if self.default_lifespan == 0 {
            return Err(ForecastError::config("default_lifespan", "must be a positive number of years"));
        }

        Ok(())
    }

    /// Caller-supplied unit count, otherwise the sum over distinct communities
    pub fn unit_count(&self) -> u32 {
        if let Some(units) = self.total_unit_count {
            return units;
        }

        let mut per_community: HashMap<&str, u32> = HashMap::new();
        for asset in &self.assets {
            if let Some(units) = asset.community.unit_count {
                per_community.entry(asset.community.key()).or_insert(units);
            }
        }
        per_community.values().sum()
    }
}

fn non_negative_rate(field: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(ForecastError::config(field, format!("must be >= 0, got {}", value)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset::{Category, Community};

    fn input() -> ForecastInput {
        ForecastInput::from_settings(Vec::new(), &ReserveSettings::default())
    }

    #[test]
    fn test_validate_accepts_defaults() {
        assert!(input().validate().is_ok());

        let mut deficit = input();
        deficit.initial_reserve_balance = -25_000.0;
        assert!(deficit.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_config() {
        let mut bad = input();
        bad.inflation_rate = -0.01;
        assert!(matches!(bad.validate(), Err(ForecastError::Config { ref field, .. }) if field == "inflation_rate"));

        let mut bad = input();
        bad.investment_rate = f64::NAN;
        assert!(bad.validate().is_err());

        let mut bad = input();
        bad.annual_deposit = -100.0;
        assert!(bad.validate().is_err());

        let mut bad = input();
        bad.forecast_years = 0;
        assert!(bad.validate().is_err());

        let mut bad = input();
        bad.default_lifespan = 0;
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_validate_bounds_horizon() {
        let mut long = input();
        long.forecast_years = MAX_FORECAST_YEARS;
        assert!(long.validate().is_ok());

        long.forecast_years = MAX_FORECAST_YEARS + 1;
        assert!(long.validate().unwrap_err().is_config());

        long.forecast_years = 2_147_483_000;
        assert!(long.validate().unwrap_err().is_config());
    }

    #[test]
    fn test_unit_count_from_communities() {
        let maple = Community::named("Maple Court").with_units(120);
        let oak = Community::named("Oak Hollow").with_units(80);
        let cat = Category::new("Roofing", 20);
        let assets = vec![
            Asset::new("A-1", "2010-01-01", 1000.0, cat.clone(), maple.clone()),
            Asset::new("A-2", "2011-01-01", 1000.0, cat.clone(), maple),
            Asset::new("A-3", "2012-01-01", 1000.0, cat, oak),
        ];
        let input = ForecastInput::from_settings(assets, &ReserveSettings::default());
        assert_eq!(input.unit_count(), 200);
        assert_eq!(input.with_unit_count(64).unit_count(), 64);
    }
}
