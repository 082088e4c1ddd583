//! Error taxonomy for forecast calls

use thiserror::Error;

/// Errors raised by the forecasting engine
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ForecastError {
    /// Invalid engine configuration. Aborts the whole forecast call.
    #[error("invalid configuration: {field}: {reason}")]
    Config { field: String, reason: String },

    /// Malformed asset data
    #[error("invalid asset data for {asset_id}: {reason}")]
    Data { asset_id: String, reason: String },
}

impl ForecastError {
    pub fn config(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ForecastError::Config {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn data(asset_id: impl Into<String>, reason: impl Into<String>) -> Self {
        ForecastError::Data {
            asset_id: asset_id.into(),
            reason: reason.into(),
        }
    }

    pub fn is_config(&self) -> bool {
        matches!(self, ForecastError::Config { .. })
    }
}

pub type Result<T> = std::result::Result<T, ForecastError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ForecastError::config("inflation_rate", "must be >= 0");
        assert_eq!(err.to_string(), "invalid configuration: inflation_rate: must be >= 0");
        assert!(err.is_config());

        let err = ForecastError::data("A-7", "unparseable install date 'soon'");
        assert_eq!(
            err.to_string(),
            "invalid asset data for A-7: unparseable install date 'soon'"
        );
        assert!(!err.is_config());
    }
}
