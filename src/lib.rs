//! Reserve Forecast - capital reserve planning for community associations
//!
//! This library provides:
//! - Replacement scheduling of physical assets by depreciation category
//! - Inflation-adjusted replacement cost projection
//! - Year-by-year reserve fund simulation (growth, deposits, withdrawals)
//! - Reserve health indicators (underfunded, below target, overdue assets)
//! - Batch scenarios across horizons, inflation rates and communities

pub mod error;
pub mod asset;
pub mod settings;
pub mod forecast;
pub mod scenario;
pub mod export;
pub mod request;

// Re-export commonly used types
pub use error::{ForecastError, Result};
pub use asset::{Asset, Category, Community};
pub use settings::{ReserveSettings, SettingsOverride, SettingsStore};
pub use forecast::{forecast, ForecastEngine, ForecastInput, ForecastResult, ForecastedReplacement};
pub use scenario::ScenarioRunner;
pub use request::ForecastRequest;
