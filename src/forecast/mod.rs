//! Forecasting engine: replacement scheduling, reserve simulation and
//! health indicators

mod input;
mod result;
pub mod scheduler;
pub mod simulator;
pub mod health;
mod engine;

pub use input::{ForecastInput, DEFAULT_LIFESPAN, MAX_FORECAST_YEARS};
pub use result::{
    DetailedAsset, ForecastResult, ForecastSummary, ForecastedReplacement, SkippedAsset, YearBalance,
};
pub use scheduler::{schedule, AssetPlan, ReplacementScheduler};
pub use simulator::{simulate, ReserveLedger, ReserveSimulator, SimulationParams};
pub use health::{HealthIndicators, HealthThresholds};
pub use engine::{forecast, ForecastEngine};
