//! Scenario runner for batches of independent forecasts
//!
//! Holds the asset inventory and settings once, then runs many forecasts
//! with different horizons, rates or community selections. Every run builds
//! its own [`ForecastInput`], so runs are computed in parallel.

use std::collections::BTreeSet;

use rayon::prelude::*;

use crate::asset::Asset;
use crate::error::Result;
use crate::forecast::{ForecastEngine, ForecastInput, ForecastResult};
use crate::settings::{ReserveSettings, SettingsStore};

/// Pre-loaded inventory and settings for batch forecasts
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::new(assets, store);
///
/// for (years, result) in runner.run_horizons(2024, &[1, 5, 10, 15]) {
///     println!("{} years: {:.2}", years, result?.final_reserve_balance);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    assets: Vec<Asset>,
    settings: SettingsStore,
    /// Portfolio-wide unit count. Single-community runs count that
    /// community's own units instead.
    total_unit_count: Option<u32>,
    recurring_replacements: bool,
}

impl ScenarioRunner {
    pub fn new(assets: Vec<Asset>, settings: SettingsStore) -> Self {
        Self {
            assets,
            settings,
            total_unit_count: None,
            recurring_replacements: false,
        }
    }

    pub fn with_unit_count(mut self, units: Option<u32>) -> Self {
        self.total_unit_count = units;
        self
    }

    pub fn with_recurring_replacements(mut self, recurring: bool) -> Self {
        self.recurring_replacements = recurring;
        self
    }

    pub fn assets(&self) -> &[Asset] {
        &self.assets
    }

    pub fn settings(&self) -> &SettingsStore {
        &self.settings
    }

    /// Assets belonging to `community`, or all of them when none is selected
    fn assets_for(&self, community: Option<&str>) -> Vec<Asset> {
        match community {
            Some(name) => self
                .assets
                .iter()
                .filter(|a| a.community.name == name)
                .cloned()
                .collect(),
            None => self.assets.clone(),
        }
    }

    /// Build the request for a community selection with resolved settings
    pub fn input_for(&self, community: Option<&str>, settings: &ReserveSettings) -> ForecastInput {
        let mut input = ForecastInput::from_settings(self.assets_for(community), settings);
        if community.is_none() {
            input.total_unit_count = self.total_unit_count;
        }
        input.recurring_replacements = self.recurring_replacements;
        input
    }

    /// Single forecast for one community (or the whole portfolio)
    pub fn run(&self, current_year: i32, community: Option<&str>) -> Result<ForecastResult> {
        let settings = self.settings.resolve(community);
        ForecastEngine::new(current_year).run(&self.input_for(community, &settings))
    }

    /// Same inventory and settings across several horizons
    pub fn run_horizons(&self, current_year: i32, horizons: &[u32]) -> Vec<(u32, Result<ForecastResult>)> {
        let engine = ForecastEngine::new(current_year);
        let base = self.settings.resolve(None);

        horizons
            .par_iter()
            .map(|&years| {
                let settings = ReserveSettings { forecast_years: years, ..base.clone() };
                (years, engine.run(&self.input_for(None, &settings)))
            })
            .collect()
    }

    /// Same inventory across several inflation assumptions
    pub fn run_inflation_sensitivity(&self, current_year: i32, rates: &[f64]) -> Vec<(f64, Result<ForecastResult>)> {
        let engine = ForecastEngine::new(current_year);
        let base = self.settings.resolve(None);

        rates
            .par_iter()
            .map(|&rate| {
                let settings = ReserveSettings { inflation_rate: rate, ..base.clone() };
                (rate, engine.run(&self.input_for(None, &settings)))
            })
            .collect()
    }

    /// One forecast per community using that community's effective settings,
    /// sorted by community name
    pub fn run_by_community(&self, current_year: i32) -> Vec<(String, Result<ForecastResult>)> {
        let engine = ForecastEngine::new(current_year);

        let names: BTreeSet<&str> = self.assets.iter().map(|a| a.community.name.as_str()).collect();

        names
            .into_par_iter()
            .map(|name| {
                let settings = self.settings.resolve(Some(name));
                (name.to_string(), engine.run(&self.input_for(Some(name), &settings)))
            })
            .collect()
    }
}
