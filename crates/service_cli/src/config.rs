//! CLI configuration management
//!
//! Handles loading configuration from TOML files and environment variables.
//! Priority: CLI flags > environment > file > defaults.
//!
//! ```toml
//! log_level = "debug"
//!
//! [monte_carlo]
//! paths = 50000
//! steps = 252
//! seed = 42
//!
//! [risk]
//! var_confidence = 0.99
//! ```

use std::path::Path;
use std::str::FromStr;

use pricer_pricing::MonteCarloConfig;
use pricer_risk::RiskConfig;
use serde::Deserialize;
use thiserror::Error;

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Configuration file error: {0}")]
    FileError(String),

    #[error("Invalid Monte Carlo settings: {0}")]
    MonteCarlo(String),

    #[error("Invalid risk settings: {0}")]
    Risk(String),
}

/// Log levels supported by the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    #[default]
    Warn,
    Error,
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(ConfigError::InvalidLogLevel(s.to_string())),
        }
    }
}

impl LogLevel {
    /// Convert log level to tracing filter string
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_filter_str())
    }
}

fn deserialize_log_level<'de, D>(deserializer: D) -> Result<LogLevel, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    LogLevel::from_str(&s).map_err(serde::de::Error::custom)
}

/// Default simulation settings for exotic payoffs
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MonteCarloSettings {
    /// Paths per valuation
    pub paths: usize,
    /// Time steps per path
    pub steps: usize,
    /// Worker batches
    pub batches: usize,
    /// Fixed seed; absent means fresh entropy per request
    pub seed: Option<u64>,
}

impl Default for MonteCarloSettings {
    fn default() -> Self {
        let defaults = MonteCarloConfig::default();
        Self {
            paths: defaults.n_paths(),
            steps: defaults.n_steps(),
            batches: defaults.n_batches(),
            seed: defaults.seed(),
        }
    }
}

impl MonteCarloSettings {
    /// Build a validated engine configuration
    pub fn to_config(&self) -> Result<MonteCarloConfig, ConfigError> {
        let mut builder = MonteCarloConfig::builder()
            .n_paths(self.paths)
            .n_steps(self.steps)
            .n_batches(self.batches);
        if let Some(seed) = self.seed {
            builder = builder.seed(seed);
        }
        builder
            .build()
            .map_err(|e| ConfigError::MonteCarlo(e.to_string()))
    }
}

/// CLI configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Log level when `RUST_LOG` is unset
    #[serde(deserialize_with = "deserialize_log_level")]
    pub log_level: LogLevel,
    /// Simulation defaults
    pub monte_carlo: MonteCarloSettings,
    /// Risk aggregation parameters
    pub risk: RiskConfig,
}

impl CliConfig {
    /// Parse configuration from TOML text
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::FileError(e.to_string()))
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileError(format!("{}: {}", path.display(), e)))?;
        Self::from_toml_str(&contents)
    }

    /// Apply `PRICER_LOG_LEVEL` and the risk `PRICER_*` overrides
    pub fn apply_env(self) -> Result<Self, ConfigError> {
        self.apply_overrides_from(|key| std::env::var(key).ok())
    }

    fn apply_overrides_from<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(level) = lookup("PRICER_LOG_LEVEL") {
            self.log_level = LogLevel::from_str(&level)?;
        }
        self.risk = self
            .risk
            .apply_overrides_from(&lookup)
            .map_err(|e| ConfigError::Risk(e.to_string()))?;
        Ok(self)
    }

    /// Validate all sections
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.monte_carlo.to_config()?;
        self.risk
            .validate()
            .map_err(|e| ConfigError::Risk(e.to_string()))
    }
}

/// Build configuration with priority: CLI > env > file > defaults
///
/// A missing file is only an error when the path was given explicitly.
pub fn build_config(path: &Path, explicit: bool, verbose: bool) -> Result<CliConfig, ConfigError> {
    let config = if path.exists() {
        CliConfig::from_file(path)?
    } else if explicit {
        return Err(ConfigError::FileError(format!(
            "{}: file not found",
            path.display()
        )));
    } else {
        CliConfig::default()
    };

    let mut config = config.apply_env()?;
    if verbose {
        config.log_level = LogLevel::Debug;
    }
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = CliConfig::default();
        assert_eq!(config.log_level, LogLevel::Warn);
        assert_eq!(config.monte_carlo.paths, 10_000);
        assert_eq!(config.monte_carlo.seed, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_log_level_parsing() {
        assert_eq!(LogLevel::from_str("DEBUG").unwrap(), LogLevel::Debug);
        assert_eq!(LogLevel::from_str("warn").unwrap(), LogLevel::Warn);
        assert!(LogLevel::from_str("verbose").is_err());
        assert_eq!(LogLevel::Trace.to_string(), "trace");
    }

    #[test]
    fn test_toml_deserialization() {
        let toml_str = r#"
            log_level = "info"

            [monte_carlo]
            paths = 50000
            seed = 42

            [risk]
            var_confidence = 0.975
        "#;
        let config = CliConfig::from_toml_str(toml_str).unwrap();
        assert_eq!(config.log_level, LogLevel::Info);
        assert_eq!(config.monte_carlo.paths, 50_000);
        assert_eq!(config.monte_carlo.steps, 252);

        let mc = config.monte_carlo.to_config().unwrap();
        assert_eq!(mc.seed(), Some(42));
        assert_eq!(config.risk.var_confidence, 0.975);
    }

    #[test]
    fn test_invalid_log_level_in_file() {
        assert!(CliConfig::from_toml_str("log_level = \"loud\"").is_err());
    }

    #[test]
    fn test_invalid_monte_carlo_settings() {
        let config = CliConfig::from_toml_str("[monte_carlo]\npaths = 0").unwrap();
        assert!(matches!(config.validate(), Err(ConfigError::MonteCarlo(_))));
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            ("PRICER_LOG_LEVEL", "trace"),
            ("PRICER_VAR_CONFIDENCE", "0.95"),
        ]
        .into_iter()
        .collect();
        let config = CliConfig::default()
            .apply_overrides_from(|key| env.get(key).map(|v| v.to_string()))
            .unwrap();
        assert_eq!(config.log_level, LogLevel::Trace);
        assert_eq!(config.risk.var_confidence, 0.95);
    }

    #[test]
    fn test_build_config_missing_default_file() {
        let path = Path::new("/nonexistent/pricer.toml");
        let config = build_config(path, false, true).unwrap();
        assert_eq!(config.log_level, LogLevel::Debug);
        assert!(build_config(path, true, false).is_err());
    }
}
