//! Analytics configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Application-level constants
pub const APP_NAME: &str = "Clinic Analytics";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default `tracing` filter when `RUST_LOG` is unset.
pub fn default_log_filter() -> &'static str {
    "clinic_analytics_core=info"
}

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid config value: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Chart area used for the trend sparkline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SparklineConfig {
    pub width: f64,
    pub height: f64,
}

impl Default for SparklineConfig {
    fn default() -> Self {
        Self {
            width: 260.0,
            height: 82.0,
        }
    }
}

/// Tunables for the analytics pipeline. Every field has a default.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct AnalyticsConfig {
    /// Disease compared month-over-month when the caller names none
    pub default_compare_disease: String,
    /// Length of the "top diseases" list
    pub top_disease_count: usize,
    pub sparkline: SparklineConfig,
    /// File name suggested for report downloads
    pub export_file_name: String,
    pub log_filter: String,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            default_compare_disease: "Fever".into(),
            top_disease_count: 4,
            sparkline: SparklineConfig::default(),
            export_file_name: "doctor-disease-report.json".into(),
            log_filter: default_log_filter().into(),
        }
    }
}

impl AnalyticsConfig {
    /// Parse and validate a JSON config. Missing fields take their defaults.
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file.
    pub fn load<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.default_compare_disease.trim().is_empty() {
            return Err(ConfigError::Invalid("defaultCompareDisease is empty".into()));
        }
        if self.top_disease_count == 0 {
            return Err(ConfigError::Invalid("topDiseaseCount must be positive".into()));
        }
        let geometry = [self.sparkline.width, self.sparkline.height];
        if geometry.iter().any(|v| !v.is_finite() || *v <= 0.0) {
            return Err(ConfigError::Invalid(
                "sparkline width and height must be positive".into(),
            ));
        }
        let name = self.export_file_name.trim();
        if name.is_empty() {
            return Err(ConfigError::Invalid("exportFileName is empty".into()));
        }
        if name.contains(['/', '\\']) || name == "." || name == ".." {
            return Err(ConfigError::Invalid(format!(
                "exportFileName must be a bare file name: {name}"
            )));
        }
        Ok(())
    }
}
