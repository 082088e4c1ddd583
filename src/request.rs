//! JSON request envelope shared by the CLI and the Lambda handler

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::asset::Asset;
use crate::scenario::ScenarioRunner;
use crate::settings::SettingsStore;

/// Inventory plus settings as exported by the management UI
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ForecastRequest {
    #[serde(default)]
    pub assets: Vec<Asset>,

    #[serde(default)]
    pub settings: SettingsStore,

    /// Restrict the forecast to one community (and its setting overrides)
    #[serde(default)]
    pub community: Option<String>,

    /// Override of the resolved horizon
    #[serde(default)]
    pub forecast_years: Option<u32>,

    /// Portfolio unit count; ignored when `community` is set
    #[serde(default)]
    pub total_unit_count: Option<u32>,

    #[serde(default)]
    pub recurring_replacements: bool,
}

impl ForecastRequest {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
        serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("parsing forecast request {}", path.display()))
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("parsing forecast request")
    }

    /// Runner over this request's inventory. A horizon override is applied
    /// to the global settings and to every community override.
    pub fn into_runner(self) -> ScenarioRunner {
        let mut settings = self.settings;
        if let Some(years) = self.forecast_years {
            settings.global.forecast_years = years;
            for overrides in settings.communities.values_mut() {
                overrides.forecast_years = Some(years);
            }
        }

        ScenarioRunner::new(self.assets, settings)
            .with_unit_count(self.total_unit_count)
            .with_recurring_replacements(self.recurring_replacements)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const REQUEST: &str = r#"{
        "assets": [
            {
                "id": "R-1",
                "name": "North roof",
                "install_date": "2015-06-01",
                "purchase_price": 5000.0,
                "category": { "name": "Roofing", "lifespan": 10 },
                "community": { "name": "Maple Court", "unit_count": 200 }
            }
        ],
        "settings": {
            "global": { "inflation_rate": 0.03, "forecast_years": 10 },
            "communities": { "Maple Court": { "forecast_years": 15 } }
        },
        "community": "Maple Court",
        "forecast_years": 5
    }"#;

    #[test]
    fn test_parse_and_run() {
        let request = ForecastRequest::from_json(REQUEST).unwrap();
        let community = request.community.clone();
        let runner = request.into_runner();

        let result = runner.run(2024, community.as_deref()).unwrap();
        assert_eq!(result.forecast_years, 5);
        assert_eq!(result.replacements.len(), 1);
        assert_eq!(result.replacements[0].cost, 6719.58);
    }

    #[test]
    fn test_malformed_request() {
        assert!(ForecastRequest::from_json("{ \"assets\": 3 }").is_err());
    }
}
