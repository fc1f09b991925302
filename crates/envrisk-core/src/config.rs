use crate::error::{EnvRiskError, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Default demographic vulnerability applied to locations without an override
pub const DEFAULT_DEMOGRAPHIC_VULNERABILITY: f64 = 0.5;

/// Default number of priority areas shown in reports
pub const DEFAULT_REPORT_TOP: usize = 3;

/// Configuration source for tracking where values come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Default value
    Default,
    /// Loaded from config file
    File,
    /// Loaded from environment variable
    Environment,
    /// Provided via CLI argument
    Cli,
}

impl ConfigSource {
    /// Returns the precedence level (higher = higher priority)
    pub fn precedence(&self) -> u8 {
        match self {
            ConfigSource::Default => 0,
            ConfigSource::File => 1,
            ConfigSource::Environment => 2,
            ConfigSource::Cli => 3,
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }

    /// Update the value if the new source has higher precedence
    pub fn update(&mut self, value: T, source: ConfigSource) {
        if source.precedence() > self.source.precedence() {
            self.value = value;
            self.source = source;
        }
    }
}

/// Layered configuration for an analysis run
///
/// Scoring weights and thresholds are constants of the engine and are not
/// configurable here.
#[derive(Debug, Clone)]
pub struct LayeredConfig {
    pub demographic_vulnerability: ConfigValue<f64>,
    pub output_dir: ConfigValue<PathBuf>,
    pub report_top: ConfigValue<usize>,
    /// Per-location demographic overrides, keyed by location label (file only)
    pub demographics: BTreeMap<String, f64>,
}

impl LayeredConfig {
    /// Create a new configuration with default values
    pub fn with_defaults() -> Self {
        Self {
            demographic_vulnerability: ConfigValue::new(
                DEFAULT_DEMOGRAPHIC_VULNERABILITY,
                ConfigSource::Default,
            ),
            output_dir: ConfigValue::new(PathBuf::from("outputs"), ConfigSource::Default),
            report_top: ConfigValue::new(DEFAULT_REPORT_TOP, ConfigSource::Default),
            demographics: BTreeMap::new(),
        }
    }

    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self> {
        let content =
            fs::read_to_string(path.as_ref()).map_err(|e| EnvRiskError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to read config file: {}", e),
            })?;

        let file_config: FileConfig =
            toml::from_str(&content).map_err(|e| EnvRiskError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to parse TOML: {}", e),
            })?;

        if let Some(vulnerability) = file_config.demographic_vulnerability {
            let vulnerability = validate_vulnerability("demographic_vulnerability", vulnerability)?;
            self.demographic_vulnerability.update(vulnerability, ConfigSource::File);
        }

        if let Some(output_dir) = file_config.output_dir {
            self.output_dir.update(output_dir, ConfigSource::File);
        }

        if let Some(report_top) = file_config.report_top {
            self.report_top.update(report_top, ConfigSource::File);
        }

        for (location, vulnerability) in file_config.demographics {
            let key = format!("demographics.{}", location);
            let vulnerability = validate_vulnerability(&key, vulnerability)?;
            self.demographics.insert(location, vulnerability);
        }

        Ok(self)
    }

    /// Load configuration from environment variables
    pub fn load_from_env(mut self) -> Self {
        // ENVRISK_DEMOGRAPHIC_VULNERABILITY
        if let Ok(raw) = env::var("ENVRISK_DEMOGRAPHIC_VULNERABILITY") {
            match parse_vulnerability(&raw) {
                Ok(value) => self.demographic_vulnerability.update(value, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid ENVRISK_DEMOGRAPHIC_VULNERABILITY value '{}': expected a number in [0, 1]",
                    raw
                ),
            }
        }

        // ENVRISK_OUTPUT_DIR
        if let Ok(dir) = env::var("ENVRISK_OUTPUT_DIR") {
            if dir.trim().is_empty() {
                tracing::warn!("Ignoring empty ENVRISK_OUTPUT_DIR");
            } else {
                self.output_dir.update(PathBuf::from(dir), ConfigSource::Environment);
            }
        }

        // ENVRISK_REPORT_TOP
        if let Ok(raw) = env::var("ENVRISK_REPORT_TOP") {
            match raw.trim().parse::<usize>() {
                Ok(top) => self.report_top.update(top, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid ENVRISK_REPORT_TOP value '{}': expected a non-negative integer",
                    raw
                ),
            }
        }

        self
    }

    /// Update configuration from CLI arguments
    pub fn update_from_cli(&mut self, overrides: CliConfigOverrides) {
        if let Some(vulnerability) = overrides.demographic_vulnerability {
            self.demographic_vulnerability.update(vulnerability, ConfigSource::Cli);
        }

        if let Some(output_dir) = overrides.output_dir {
            self.output_dir.update(output_dir, ConfigSource::Cli);
        }

        if let Some(report_top) = overrides.report_top {
            self.report_top.update(report_top, ConfigSource::Cli);
        }
    }

    /// Get all configuration values as a map for inspection
    pub fn to_inspection_map(&self) -> HashMap<String, (String, ConfigSource)> {
        let mut map = HashMap::new();

        map.insert(
            "demographic_vulnerability".to_string(),
            (
                self.demographic_vulnerability.value.to_string(),
                self.demographic_vulnerability.source,
            ),
        );

        map.insert(
            "output_dir".to_string(),
            (self.output_dir.value.display().to_string(), self.output_dir.source),
        );

        map.insert(
            "report_top".to_string(),
            (self.report_top.value.to_string(), self.report_top.source),
        );

        for (location, vulnerability) in &self.demographics {
            map.insert(
                format!("demographics.{}", location),
                (vulnerability.to_string(), ConfigSource::File),
            );
        }

        map
    }
}

/// Configuration loaded from TOML file
#[derive(Debug, Deserialize, Serialize)]
struct FileConfig {
    demographic_vulnerability: Option<f64>,
    output_dir: Option<PathBuf>,
    report_top: Option<usize>,
    #[serde(default)]
    demographics: BTreeMap<String, f64>,
}

/// CLI configuration overrides
#[derive(Debug, Default)]
pub struct CliConfigOverrides {
    pub demographic_vulnerability: Option<f64>,
    pub output_dir: Option<PathBuf>,
    pub report_top: Option<usize>,
}

/// Parse a demographic vulnerability factor from string
pub fn parse_vulnerability(s: &str) -> Result<f64> {
    let value = s.trim().parse::<f64>().map_err(|_| EnvRiskError::ConfigInvalid {
        key: "demographic_vulnerability".to_string(),
        reason: format!("Invalid number: {}", s),
    })?;
    validate_vulnerability("demographic_vulnerability", value)
}

/// Reject vulnerability factors outside [0, 1]
pub fn validate_vulnerability(key: &str, value: f64) -> Result<f64> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(EnvRiskError::ConfigInvalid {
            key: key.to_string(),
            reason: format!("{} is outside [0, 1]", value),
        })
    }
}
