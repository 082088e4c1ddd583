//! Reserve settings and global/per-community precedence
//!
//! The engine never looks settings up itself. Callers resolve the effective
//! [`ReserveSettings`] for the community being forecast and build a
//! [`ForecastInput`](crate::forecast::ForecastInput) from them.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Default forecast horizon in years
pub const DEFAULT_FORECAST_YEARS: u32 = 10;

/// Horizons offered by the UI
pub const STANDARD_HORIZONS: [u32; 4] = [1, 5, 10, 15];

fn default_inflation_rate() -> f64 {
    0.02
}

fn default_forecast_years() -> u32 {
    DEFAULT_FORECAST_YEARS
}

/// Financial assumptions for one forecast
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReserveSettings {
    /// Annual compounding inflation rate (0.02 = 2%)
    #[serde(default = "default_inflation_rate")]
    pub inflation_rate: f64,

    /// Annual yield on the running reserve balance
    #[serde(default)]
    pub investment_rate: f64,

    /// Contribution added once per simulated year
    #[serde(default)]
    pub annual_deposit: f64,

    /// Opening balance; negative represents a deficit
    #[serde(default)]
    pub initial_reserve_balance: f64,

    /// Year-end balance the board wants to stay above
    #[serde(default)]
    pub target_reserve_balance: Option<f64>,

    #[serde(default = "default_forecast_years")]
    pub forecast_years: u32,
}

impl Default for ReserveSettings {
    fn default() -> Self {
        Self {
            inflation_rate: default_inflation_rate(),
            investment_rate: 0.0,
            annual_deposit: 0.0,
            initial_reserve_balance: 0.0,
            target_reserve_balance: None,
            forecast_years: DEFAULT_FORECAST_YEARS,
        }
    }
}

impl ReserveSettings {
    /// Overlay the fields set in `overrides`
    pub fn merged_with(&self, overrides: &SettingsOverride) -> Self {
        Self {
            inflation_rate: overrides.inflation_rate.unwrap_or(self.inflation_rate),
            investment_rate: overrides.investment_rate.unwrap_or(self.investment_rate),
            annual_deposit: overrides.annual_deposit.unwrap_or(self.annual_deposit),
            initial_reserve_balance: overrides
                .initial_reserve_balance
                .unwrap_or(self.initial_reserve_balance),
            target_reserve_balance: overrides
                .target_reserve_balance
                .or(self.target_reserve_balance),
            forecast_years: overrides.forecast_years.unwrap_or(self.forecast_years),
        }
    }
}

/// Community-specific settings. Unset fields inherit the global value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SettingsOverride {
    #[serde(default)]
    pub inflation_rate: Option<f64>,
    #[serde(default)]
    pub investment_rate: Option<f64>,
    #[serde(default)]
    pub annual_deposit: Option<f64>,
    #[serde(default)]
    pub initial_reserve_balance: Option<f64>,
    #[serde(default)]
    pub target_reserve_balance: Option<f64>,
    #[serde(default)]
    pub forecast_years: Option<u32>,
}

/// Global defaults plus per-community overrides keyed by community name
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SettingsStore {
    #[serde(default)]
    pub global: ReserveSettings,

    #[serde(default)]
    pub communities: HashMap<String, SettingsOverride>,
}

impl SettingsStore {
    pub fn new(global: ReserveSettings) -> Self {
        Self {
            global,
            communities: HashMap::new(),
        }
    }

    pub fn with_override(mut self, community: impl Into<String>, overrides: SettingsOverride) -> Self {
        self.communities.insert(community.into(), overrides);
        self
    }

    /// Effective settings for a single selected community, or the global
    /// defaults when no community (or one without overrides) is selected
    pub fn resolve(&self, community: Option<&str>) -> ReserveSettings {
        match community.and_then(|name| self.communities.get(name)) {
            Some(overrides) => self.global.merged_with(overrides),
            None => self.global.clone(),
        }
    }
}
