//! AWS Lambda handler for reserve forecasts
//!
//! Accepts a forecast request as the JSON event and returns the forecast,
//! its summary, or a single error message.

use chrono::{Datelike, Utc};
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use log::error;
use serde::{Deserialize, Serialize};

use reserve_forecast::forecast::ForecastSummary;
use reserve_forecast::{ForecastRequest, ForecastResult};

/// Lambda event: a forecast request plus an optional start year
#[derive(Debug, Deserialize)]
pub struct ForecastEvent {
    #[serde(flatten)]
    pub request: ForecastRequest,

    /// First simulated year (default: current UTC year)
    #[serde(default)]
    pub current_year: Option<i32>,

    /// Leave the per-asset view and ledger out of the response
    #[serde(default)]
    pub summary_only: bool,
}

#[derive(Debug, Serialize)]
pub struct ForecastResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<ForecastSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forecast: Option<ForecastResult>,
    pub execution_time_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

async fn handler(event: LambdaEvent<ForecastEvent>) -> Result<ForecastResponse, Error> {
    let start = std::time::Instant::now();
    let event = event.payload;

    let current_year = event.current_year.unwrap_or_else(|| Utc::now().year());
    let community = event.request.community.clone();
    let runner = event.request.into_runner();

    let response = match runner.run(current_year, community.as_deref()) {
        Ok(result) => ForecastResponse {
            summary: Some(result.summary()),
            forecast: if event.summary_only { None } else { Some(result) },
            execution_time_ms: start.elapsed().as_millis() as u64,
            error: None,
        },
        Err(e) => {
            error!("forecast failed: {}", e);
            ForecastResponse {
                summary: None,
                forecast: None,
                execution_time_ms: start.elapsed().as_millis() as u64,
                error: Some(e.to_string()),
            }
        }
    };

    Ok(response)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();
    run(service_fn(handler)).await
}
