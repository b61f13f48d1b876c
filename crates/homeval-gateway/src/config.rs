//! Application configuration.

use std::net::SocketAddr;
use std::path::Path;

use homeval_core::constants::{DEFAULT_PORT, LOW_INCOME_THRESHOLD};
use homeval_core::Error;
use homeval_model::artifacts::ArtifactPaths;
use serde::{Deserialize, Serialize};

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Application name
    pub name: String,
    /// Log level
    pub log_level: String,
    /// Address to bind the HTTP server to
    pub bind_address: String,
    /// HTTP port
    pub port: u16,
    /// Model and scaler locations
    pub artifacts: ArtifactPaths,
    /// Prediction request handling
    pub prediction: PredictionConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            name: "homeval".to_string(),
            log_level: "info".to_string(),
            bind_address: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            artifacts: ArtifactPaths::default(),
            prediction: PredictionConfig::default(),
        }
    }
}

/// Prediction request handling configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PredictionConfig {
    /// Form submissions with an income below this get a warning instead of a prediction
    pub low_income_threshold: f64,
    /// Emit a log line for every successful prediction
    pub log_predictions: bool,
}

impl Default for PredictionConfig {
    fn default() -> Self {
        Self {
            low_income_threshold: LOW_INCOME_THRESHOLD,
            log_predictions: true,
        }
    }
}

impl AppConfig {
    /// Load configuration from file
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from the file named by `HOMEVAL_CONFIG`, or use defaults
    pub fn from_env() -> anyhow::Result<Self> {
        if let Ok(path) = std::env::var("HOMEVAL_CONFIG") {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Check values serde cannot check
    pub fn validate(&self) -> anyhow::Result<()> {
        let threshold = self.prediction.low_income_threshold;
        if !threshold.is_finite() || threshold < 0.0 {
            return Err(Error::ConfigError(format!(
                "low_income_threshold must be a non-negative number, got {threshold}"
            ))
            .into());
        }
        self.socket_addr()?;
        Ok(())
    }

    /// Socket address the server listens on
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        let addr = format!("{}:{}", self.bind_address, self.port).parse()?;
        Ok(addr)
    }
}
