//! Replacement scheduling: when each asset falls due and what it will cost

use log::debug;

use crate::asset::Asset;
use crate::error::{ForecastError, Result};
use super::input::{DEFAULT_LIFESPAN, MAX_FORECAST_YEARS};
use super::result::{DetailedAsset, ForecastedReplacement};

/// Round a monetary amount to cents, halves away from zero.
///
/// Works on the binary value, so an amount whose nearest `f64` sits just
/// below a half cent rounds down (`1.005` becomes `1.00`).
pub fn round_to_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// Inflate a cost basis over exactly one lifespan.
///
/// The cost always carries one full lifespan of inflation from the original
/// purchase, regardless of how many cycles an overdue asset has missed.
pub fn replacement_cost(basis: f64, inflation_rate: f64, lifespan: u32) -> f64 {
    round_to_cents(basis * (1.0 + inflation_rate).powi(lifespan as i32))
}

/// `start + years`, saturating at the ends of the `i32` year range
pub fn offset_year(start: i32, years: u32) -> i32 {
    start.saturating_add(i32::try_from(years).unwrap_or(i32::MAX))
}

/// Scheduling outcome for a single asset
#[derive(Debug, Clone, PartialEq)]
pub struct AssetPlan {
    pub detail: DetailedAsset,

    /// Replacement events inside the horizon, ascending by year
    pub events: Vec<ForecastedReplacement>,
}

/// Computes replacement years and inflation-adjusted costs
#[derive(Debug, Clone)]
pub struct ReplacementScheduler {
    pub inflation_rate: f64,
    pub current_year: i32,
    pub horizon_years: u32,

    /// Lifespan for categories that do not specify one
    pub default_lifespan: u32,

    /// Also schedule later expirations that fit in the horizon
    pub recurring: bool,
}

impl ReplacementScheduler {
    pub fn new(inflation_rate: f64, current_year: i32, horizon_years: u32) -> Self {
        Self {
            inflation_rate,
            current_year,
            horizon_years,
            default_lifespan: DEFAULT_LIFESPAN,
            recurring: false,
        }
    }

    pub fn with_default_lifespan(mut self, lifespan: u32) -> Self {
        self.default_lifespan = lifespan;
        self
    }

    pub fn with_recurring(mut self, recurring: bool) -> Self {
        self.recurring = recurring;
        self
    }

    /// Last year (inclusive) a replacement may fall in
    pub fn end_year(&self) -> i32 {
        offset_year(self.current_year, self.horizon_years)
    }

    pub fn in_horizon(&self, year: i32) -> bool {
        (self.current_year..=self.end_year()).contains(&year)
    }

    /// Category lifespan, or the default when the category has none.
    /// An explicit non-positive lifespan is a configuration error.
    pub fn lifespan_for(&self, asset: &Asset) -> Result<u32> {
        match asset.category.lifespan {
            Some(years) if years > 0 => Ok(years as u32),
            Some(years) => Err(ForecastError::config(
                "category.lifespan",
                format!(
                    "category '{}' has lifespan {}; lifespan must be a positive number of years",
                    asset.category.name, years
                ),
            )),
            None if self.default_lifespan > 0 => Ok(self.default_lifespan),
            None => Err(ForecastError::config(
                "default_lifespan",
                "must be a positive number of years",
            )),
        }
    }

    /// Schedule one asset.
    ///
    /// Returns `Config` for a non-positive lifespan or one that pushes the
    /// replacement year out of range, and `Data` for an unusable install
    /// date or cost basis.
    pub fn plan(&self, asset: &Asset) -> Result<AssetPlan> {
        let lifespan = self.lifespan_for(asset)?;
        let install_year = asset.install_year()?;
        let basis = asset.cost_basis()?;

        let out_of_range = || {
            ForecastError::config(
                "category.lifespan",
                format!(
                    "lifespan {} of category '{}' puts the replacement year out of range",
                    lifespan, asset.category.name
                ),
            )
        };

        let nominal_year = i32::try_from(lifespan)
            .ok()
            .and_then(|years| install_year.checked_add(years))
            .ok_or_else(out_of_range)?;
        let is_overdue = nominal_year < self.current_year;
        let years_overdue = if is_overdue { self.current_year.abs_diff(nominal_year) } else { 0 };

        // Roll an overdue asset forward by whole lifespans until it is due on
        // or after the current year
        let next_year = if is_overdue {
            let missed_cycles = years_overdue.div_ceil(lifespan);
            missed_cycles
                .checked_mul(lifespan)
                .and_then(|years| i32::try_from(years).ok())
                .and_then(|years| nominal_year.checked_add(years))
                .ok_or_else(out_of_range)?
        } else {
            nominal_year
        };

        let cost = replacement_cost(basis, self.inflation_rate, lifespan);
        let in_horizon = self.in_horizon(next_year);

        let detail = DetailedAsset {
            asset_id: asset.id.clone(),
            name: asset.display_name().to_string(),
            unit: asset.unit_label().to_string(),
            community: asset.community.name.clone(),
            category: asset.category.name.clone(),
            install_year,
            lifespan,
            nominal_replacement_year: nominal_year,
            next_replacement_year: next_year,
            years_overdue,
            is_overdue,
            projected_cost: cost,
            in_horizon,
        };

        let mut events = Vec::new();
        let mut year = next_year;
        while self.in_horizon(year) {
            debug!("asset {} due {} at {:.2} (overdue: {})", asset.id, year, cost, is_overdue);
            events.push(ForecastedReplacement {
                year,
                cost,
                asset_id: asset.id.clone(),
                asset_name: detail.name.clone(),
                unit: detail.unit.clone(),
                community: detail.community.clone(),
                category: detail.category.clone(),
                is_overdue,
            });

            if !self.recurring {
                break;
            }
            // Recurrences past the end of the year range cannot be in the horizon
            match i32::try_from(lifespan).ok().and_then(|years| year.checked_add(years)) {
                Some(next) => year = next,
                None => break,
            }
        }

        Ok(AssetPlan { detail, events })
    }

    /// Schedule every asset, failing on the first bad one.
    /// Events come back sorted by year, ties kept in input order.
    pub fn schedule(&self, assets: &[Asset]) -> Result<Vec<ForecastedReplacement>> {
        let mut events = Vec::new();
        for asset in assets {
            events.extend(self.plan(asset)?.events);
        }
        sort_replacements(&mut events);
        Ok(events)
    }
}

/// Stable sort by year
pub fn sort_replacements(events: &mut [ForecastedReplacement]) {
    events.sort_by_key(|e| e.year);
}

/// Schedule replacements for `assets` inside `[current_year, current_year + horizon_years]`
pub fn schedule(
    assets: &[Asset],
    inflation_rate: f64,
    current_year: i32,
    horizon_years: u32,
) -> Result<Vec<ForecastedReplacement>> {
    if !inflation_rate.is_finite() || inflation_rate < 0.0 {
        return Err(ForecastError::config(
            "inflation_rate",
            format!("must be >= 0, got {}", inflation_rate),
        ));
    }
    if horizon_years > MAX_FORECAST_YEARS {
        return Err(ForecastError::config(
            "forecast_years",
            format!("must be at most {} years, got {}", MAX_FORECAST_YEARS, horizon_years),
        ));
    }
    ReplacementScheduler::new(inflation_rate, current_year, horizon_years).schedule(assets)
}
