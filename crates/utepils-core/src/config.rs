use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use utepils_beverages::DEFAULT_LIMIT;
use utepils_weather::{AggregateOptions, Averaging, DEFAULT_NOWCAST_LABEL};

use crate::error::ConfigError;

/// Configuration validation errors
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Result of config validation
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationResult {
    /// Returns true if there are no errors (warnings are OK)
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    pub fn add_warning(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// All errors joined into one line
    pub fn error_summary(&self) -> String {
        self.errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Application configuration directory
    pub config_dir: PathBuf,

    /// Log filter used when `RUST_LOG` is not set
    #[serde(default = "default_log_filter")]
    pub log_filter: String,

    #[serde(default)]
    pub forecast: ForecastConfig,

    #[serde(default)]
    pub recommendations: RecommendationConfig,

    #[serde(default)]
    pub snapshot: SnapshotConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastConfig {
    /// How a day's measurements are averaged
    #[serde(default)]
    pub averaging: Averaging,

    /// Emit the last day of the timeseries even if no night entry closes it
    #[serde(default)]
    pub flush_trailing_day: bool,

    /// Selector label of the current-conditions entry
    #[serde(default = "default_nowcast_label")]
    pub nowcast_label: String,
}

fn default_nowcast_label() -> String {
    DEFAULT_NOWCAST_LABEL.to_string()
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            averaging: Averaging::default(),
            flush_trailing_day: false,
            nowcast_label: default_nowcast_label(),
        }
    }
}

impl ForecastConfig {
    pub fn aggregate_options(&self) -> AggregateOptions {
        AggregateOptions {
            averaging: self.averaging,
            flush_trailing_day: self.flush_trailing_day,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationConfig {
    /// Maximum number of beverages offered
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_limit() -> usize {
    DEFAULT_LIMIT
}

impl Default for RecommendationConfig {
    fn default() -> Self {
        Self {
            limit: default_limit(),
        }
    }
}

/// Where saved API responses are read from
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotConfig {
    #[serde(default = "default_snapshot_dir")]
    pub dir: PathBuf,
}

fn default_snapshot_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("utepils")
        .join("snapshot")
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            dir: default_snapshot_dir(),
        }
    }
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("utepils");

        Self {
            config_dir,
            log_filter: default_log_filter(),
            forecast: ForecastConfig::default(),
            recommendations: RecommendationConfig::default(),
            snapshot: SnapshotConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from file, creating default if it doesn't exist
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from `path`, writing the defaults there if it
    /// doesn't exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            let config = Self::default();
            config.save_to(path)?;
            return Ok(config);
        }

        let contents = std::fs::read_to_string(path).context("Failed to read config file")?;

        let config: Config = toml::from_str(&contents)
            .map_err(|e| ConfigError::ParseError(e.to_string()))
            .context("Failed to parse config file")?;

        Ok(config)
    }

    /// Load configuration and validate it
    ///
    /// Returns the config along with any validation warnings.
    /// Returns an error if validation fails with critical errors.
    pub fn load_validated() -> Result<(Self, ValidationResult)> {
        let config = Self::load()?;
        let validation = config.ensure_valid()?;
        Ok((config, validation))
    }

    /// Validate, logging warnings and failing on errors
    pub fn ensure_valid(&self) -> Result<ValidationResult> {
        let validation = self.validate();

        if !validation.is_valid() {
            return Err(ConfigError::Invalid(validation.error_summary()))
                .context("Configuration validation failed");
        }

        for warning in &validation.warnings {
            tracing::warn!("Config warning: {}", warning);
        }

        Ok(validation)
    }

    /// Validate the configuration
    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();

        if let Err(e) = EnvFilter::try_new(&self.log_filter) {
            result.add_error("log_filter", format!("Invalid log filter: {}", e));
        }

        if self.forecast.nowcast_label.trim().is_empty() {
            result.add_error("forecast.nowcast_label", "Nowcast label cannot be empty");
        }

        if self.forecast.flush_trailing_day {
            result.add_warning(
                "forecast.flush_trailing_day",
                "The last forecast day may be built from a partial day",
            );
        }

        if self.recommendations.limit == 0 {
            result.add_warning(
                "recommendations.limit",
                "Recommendations disabled (limit 0)",
            );
        } else if self.recommendations.limit > 100 {
            result.add_warning(
                "recommendations.limit",
                "Recommendation limit is unusually large (>100)",
            );
        }

        if !self.snapshot.dir.exists() {
            result.add_warning(
                "snapshot.dir",
                format!("Path does not exist: {}", self.snapshot.dir.display()),
            );
        } else if !self.snapshot.dir.is_dir() {
            result.add_error(
                "snapshot.dir",
                format!("Path is not a directory: {}", self.snapshot.dir.display()),
            );
        }

        result
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        std::fs::write(path, contents).context("Failed to write config file")?;

        Ok(())
    }

    /// Get the path to the configuration file
    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to get config directory")?
            .join("utepils");

        Ok(config_dir.join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
    use super::*;

    #[test]
    fn test_valid_default_config() {
        let config = Config::default();
        let result = config.validate();
        assert!(result.is_valid(), "Default config should be valid: {:?}", result.errors);
    }

    #[test]
    fn test_invalid_log_filter() {
        let config = Config {
            log_filter: "utepils=loud".to_string(),
            ..Config::default()
        };
        let result = config.validate();
        assert!(!result.is_valid());
        assert!(result.errors.iter().any(|e| e.field == "log_filter"));
    }

    #[test]
    fn test_empty_nowcast_label() {
        let mut config = Config::default();
        config.forecast.nowcast_label = "  ".to_string();
        let result = config.validate();
        assert!(!result.is_valid());

        let err = config.ensure_valid().unwrap_err();
        assert!(err.chain().any(|c| c.to_string().contains("Nowcast label")));
    }

    #[test]
    fn test_zero_limit_is_warning() {
        let mut config = Config::default();
        config.recommendations.limit = 0;
        let result = config.validate();
        assert!(result.is_valid());
        assert!(result.warnings.iter().any(|w| w.field == "recommendations.limit"));
    }

    #[test]
    fn test_snapshot_file_is_error() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let mut config = Config::default();
        config.snapshot.dir = file.path().to_path_buf();
        let result = config.validate();
        assert!(result.errors.iter().any(|e| e.field == "snapshot.dir"));
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: Config = toml::from_str(
            r#"
            config_dir = "/tmp/utepils"

            [forecast]
            averaging = "present_count"
            "#,
        )
        .unwrap();

        assert_eq!(config.forecast.averaging, Averaging::PresentCount);
        assert!(!config.forecast.flush_trailing_day);
        assert_eq!(config.forecast.nowcast_label, DEFAULT_NOWCAST_LABEL);
        assert_eq!(config.recommendations.limit, DEFAULT_LIMIT);
        assert_eq!(config.log_filter, "info");
    }

    #[test]
    fn test_load_creates_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = Config::load_from(&path).unwrap();
        assert!(path.exists());
        assert_eq!(config.recommendations.limit, DEFAULT_LIMIT);

        let mut changed = config.clone();
        changed.recommendations.limit = 3;
        changed.forecast.flush_trailing_day = true;
        changed.save_to(&path).unwrap();

        let reloaded = Config::load_from(&path).unwrap();
        assert_eq!(reloaded.recommendations.limit, 3);
        assert!(reloaded.forecast.aggregate_options().flush_trailing_day);
    }

    #[test]
    fn test_validation_result_error_summary() {
        let mut result = ValidationResult::default();
        result.add_error("field1", "error1");
        result.add_error("field2", "error2");
        let summary = result.error_summary();
        assert!(summary.contains("field1"));
        assert!(summary.contains("field2"));
    }
}
