//! Forecast engine: one pure call from request to result

use log::{info, warn};

use crate::error::{ForecastError, Result};
use super::health::{HealthIndicators, HealthThresholds};
use super::input::ForecastInput;
use super::result::{ForecastResult, SkippedAsset};
use super::scheduler::{sort_replacements, ReplacementScheduler};
use super::simulator::{ReserveSimulator, SimulationParams};

/// Runs forecasts relative to a fixed current year.
///
/// Holds no state between calls; one engine may serve any number of
/// concurrent requests.
#[derive(Debug, Clone, Copy)]
pub struct ForecastEngine {
    current_year: i32,
}

impl ForecastEngine {
    pub fn new(current_year: i32) -> Self {
        Self { current_year }
    }

    pub fn current_year(&self) -> i32 {
        self.current_year
    }

    /// Schedule, simulate and evaluate one request.
    ///
    /// Configuration errors abort the call. Assets with malformed data are
    /// left out and reported in `skipped_assets`.
    pub fn run(&self, input: &ForecastInput) -> Result<ForecastResult> {
        input.validate()?;

        let scheduler = ReplacementScheduler::new(input.inflation_rate, self.current_year, input.forecast_years)
            .with_default_lifespan(input.default_lifespan)
            .with_recurring(input.recurring_replacements);

        let mut replacements = Vec::new();
        let mut detailed_assets = Vec::with_capacity(input.assets.len());
        let mut skipped_assets = Vec::new();

        for asset in &input.assets {
            match scheduler.plan(asset) {
                Ok(plan) => {
                    replacements.extend(plan.events);
                    detailed_assets.push(plan.detail);
                }
                Err(ForecastError::Data { asset_id, reason }) => {
                    warn!("skipping asset {}: {}", asset_id, reason);
                    skipped_assets.push(SkippedAsset { asset_id, reason });
                }
                Err(err) => return Err(err),
            }
        }
        sort_replacements(&mut replacements);

        let ledger = ReserveSimulator::new(SimulationParams {
            investment_rate: input.investment_rate,
            annual_deposit: input.annual_deposit,
            initial_balance: input.initial_reserve_balance,
            horizon_years: input.forecast_years,
            current_year: self.current_year,
        })
        .simulate(&replacements);

        let mut result = ForecastResult {
            start_year: self.current_year,
            forecast_years: input.forecast_years,
            replacements,
            detailed_assets,
            year_balances: ledger.years,
            total_deposits_in_forecast_period: ledger.total_deposits,
            total_expenses_in_forecast_period: ledger.total_expenses,
            final_reserve_balance: ledger.final_balance,
            skipped_assets,
            health: HealthIndicators::default(),
        };

        let thresholds = HealthThresholds {
            target_reserve_balance: input.target_reserve_balance,
            total_unit_count: input.unit_count(),
        };
        result.health = HealthIndicators::evaluate(&result, &thresholds);

        info!(
            "forecast {}-{}: {} replacements, expenses {:.2}, final balance {:.2}, {} skipped",
            result.start_year,
            result.end_year(),
            result.replacements.len(),
            result.total_expenses_in_forecast_period,
            result.final_reserve_balance,
            result.skipped_assets.len(),
        );

        Ok(result)
    }
}

/// Run a forecast for `input` starting at `current_year`
pub fn forecast(input: &ForecastInput, current_year: i32) -> Result<ForecastResult> {
    ForecastEngine::new(current_year).run(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset::{Asset, Category, Community};
    use crate::settings::ReserveSettings;
    use approx::assert_abs_diff_eq;

    fn community() -> Community {
        Community::named("Maple Court").with_units(200)
    }

    fn settings() -> ReserveSettings {
        ReserveSettings {
            inflation_rate: 0.03,
            investment_rate: 0.005,
            annual_deposit: 10_000.0,
            initial_reserve_balance: 20_000.0,
            target_reserve_balance: Some(15_000.0),
            forecast_years: 10,
        }
    }

    fn assets() -> Vec<Asset> {
        let roofing = Category::new("Roofing", 10);
        let paving = Category::new("Paving", 25);
        let pumps = Category::new("Pool pumps", 5).with_avg_replacement_cost(1_500.0);
        vec![
            Asset::new("R-1", "2015-06-01", 5_000.0, roofing.clone(), community()).with_name("North roof"),
            Asset::new("R-2", "2008-04-12", 8_000.0, roofing, community()),
            Asset::new("P-1", "2010-09-30", 40_000.0, paving, community()),
            Asset::new("PP-1", "2021-07-01", 0.0, pumps, community()),
        ]
    }

    #[test]
    fn test_full_forecast() {
        let input = ForecastInput::from_settings(assets(), &settings());
        let result = forecast(&input, 2024).unwrap();

        // R-1 due 2025; R-2 nominal 2018 -> overdue, next 2028; P-1 due 2035
        // (outside 2024-2034); PP-1 due 2026 at the category average
        let years: Vec<_> = result.replacements.iter().map(|r| (r.asset_id.as_str(), r.year)).collect();
        assert_eq!(years, vec![("R-1", 2025), ("PP-1", 2026), ("R-2", 2028)]);

        assert_eq!(result.replacements[0].cost, 6_719.58);
        assert_eq!(result.replacements[0].asset_name, "North roof");
        assert!(result.replacements[2].is_overdue);

        assert_eq!(result.detailed_assets.len(), 4);
        assert!(!result.detailed_assets[2].in_horizon);
        assert_eq!(result.health.overdue_assets_count, 1);

        assert_eq!(result.year_balances.len(), 10);
        assert_eq!(result.total_deposits_in_forecast_period, 100_000.0);
        let listed: f64 = result.replacements.iter().map(|r| r.cost).sum();
        assert_abs_diff_eq!(result.total_expenses_in_forecast_period, listed, epsilon = 1e-9);
        assert!(!result.health.is_underfunded);
        assert!(!result.health.is_yeb_below_target);
        assert_abs_diff_eq!(
            result.health.suggested_monthly_deposit_per_unit,
            result.total_expenses_in_forecast_period / 10.0 / 200.0 / 12.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_input_not_mutated_and_deterministic() {
        let input = ForecastInput::from_settings(assets(), &settings());
        let before = input.clone();

        let a = forecast(&input, 2024).unwrap();
        let b = forecast(&input, 2024).unwrap();

        assert_eq!(input, before);
        assert_eq!(a, b);
    }

    #[test]
    fn test_bad_date_skipped_and_reported() {
        let mut assets = assets();
        assets[1].install_date = Some("31/31/2010".to_string());
        let input = ForecastInput::from_settings(assets, &settings());

        let result = forecast(&input, 2024).unwrap();
        assert_eq!(result.skipped_assets.len(), 1);
        assert_eq!(result.skipped_assets[0].asset_id, "R-2");
        assert_eq!(result.detailed_assets.len(), 3);
        assert!(result.replacements.iter().all(|r| r.asset_id != "R-2"));
    }

    #[test]
    fn test_bad_lifespan_aborts() {
        let mut assets = assets();
        assets[2].category.lifespan = Some(0);
        let input = ForecastInput::from_settings(assets, &settings());

        let err = forecast(&input, 2024).unwrap_err();
        assert!(err.is_config());
    }

    #[test]
    fn test_invalid_settings_abort() {
        let mut bad = settings();
        bad.investment_rate = -0.01;
        let input = ForecastInput::from_settings(assets(), &bad);
        assert!(forecast(&input, 2024).unwrap_err().is_config());
    }

    #[test]
    fn test_underfunded_and_below_target() {
        let mut lean = settings();
        lean.annual_deposit = 0.0;
        lean.initial_reserve_balance = 0.0;
        let input = ForecastInput::from_settings(assets(), &lean);

        let result = forecast(&input, 2024).unwrap();
        assert!(result.health.is_underfunded);
        assert!(result.health.is_yeb_below_target);
        assert!(result.final_reserve_balance < 0.0);
        assert_eq!(result.summary().first_negative_year, Some(2025));
        assert!(result.year_balances[1].is_negative);
        assert!(result.year_balances.last().unwrap().is_underfunded);

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["yearBalances"][1]["isNegative"], true);
        assert_eq!(json["yearBalances"][1]["isUnderfunded"], true);
    }

    #[test]
    fn test_out_of_range_years_abort() {
        let slab = Asset::new("S-1", "2015-06-01", 5_000.0, Category::new("Slab", i32::MAX), community());
        let input = ForecastInput::from_settings(vec![slab], &settings());
        assert!(forecast(&input, 2024).unwrap_err().is_config());

        let mut endless = settings();
        endless.forecast_years = 2_147_483_000;
        let input = ForecastInput::from_settings(assets(), &endless);
        assert!(forecast(&input, 2024).unwrap_err().is_config());
    }

    #[test]
    fn test_overdue_example_from_later_year() {
        let roof = Asset::new("R-1", "2015-06-01", 5_000.0, Category::new("Roofing", 10), community());
        let input = ForecastInput::from_settings(vec![roof], &settings());

        let result = forecast(&input, 2027).unwrap();
        assert_eq!(result.replacements.len(), 1);
        assert_eq!(result.replacements[0].year, 2035);
        assert_eq!(result.replacements[0].cost, 6_719.58);
        assert!(result.detailed_assets[0].is_overdue);
    }
}
