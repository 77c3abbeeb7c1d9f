//! Configuration structures for deserialisation.
//!
//! These structures map directly to the JSON configuration file format.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ConfigError;
use crate::thermo::{BackendKind, TemperatureUnit};

/// Root configuration structure.
///
/// This is the top-level structure that matches the JSON config file.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Optional JSON schema reference (ignored during parsing).
    #[serde(rename = "$schema", default)]
    _schema: Option<String>,

    /// Optional comment field (ignored during parsing).
    #[serde(rename = "_comment", default)]
    _comment: Option<String>,

    /// Which property backend to run.
    #[serde(default)]
    pub backend: BackendKind,

    /// Extra compounds for the correlation backend, as CSV.
    #[serde(default)]
    pub compound_database_path: Option<PathBuf>,

    /// Resolution cache settings.
    #[serde(default)]
    pub cache: CacheConfig,

    /// Unit settings.
    #[serde(default)]
    pub units: UnitsConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any validation checks fail.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if TemperatureUnit::from_str_loose(&self.units.temperature).is_none() {
            return Err(ConfigError::ValidationError {
                message: format!(
                    "Invalid temperature unit '{}'. Must be one of: auto, K, C",
                    self.units.temperature
                ),
            });
        }

        Ok(())
    }

    /// Returns the compound database path if the selected backend ignores it.
    #[must_use]
    pub fn unused_database_path(&self) -> Option<&Path> {
        match self.backend {
            BackendKind::Correlation => None,
            BackendKind::Mock | BackendKind::Phase => self.compound_database_path.as_deref(),
        }
    }

    /// Returns the default unit for temperatures without one.
    ///
    /// Falls back to `auto` if the configured tag is invalid; [`Self::validate`]
    /// rejects such configurations.
    #[must_use]
    pub fn temperature_unit(&self) -> TemperatureUnit {
        TemperatureUnit::from_str_loose(&self.units.temperature).unwrap_or_default()
    }
}

/// Resolution cache configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CacheConfig {
    /// Maximum number of cached resolutions. Zero disables the cache.
    /// Default: 256
    #[serde(default = "default_cache_capacity")]
    pub capacity: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: default_cache_capacity(),
        }
    }
}

const fn default_cache_capacity() -> usize {
    256
}

/// Unit configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UnitsConfig {
    /// How to read temperatures sent without a unit: "auto", "K" or "C".
    /// Default: "auto"
    #[serde(default = "default_temperature_unit")]
    pub temperature: String,
}

impl Default for UnitsConfig {
    fn default() -> Self {
        Self {
            temperature: default_temperature_unit(),
        }
    }
}

fn default_temperature_unit() -> String {
    "auto".to_string()
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_minimal_config() {
        let json = r"{}";
        let config: Config = serde_json::from_str(json).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.backend, BackendKind::Correlation);
        assert_eq!(config.cache.capacity, 256);
        assert_eq!(config.temperature_unit(), TemperatureUnit::Auto);
    }

    #[test]
    fn parse_full_config() {
        let json = r#"{
            "$schema": "https://json-schema.org/draft/2020-12/schema",
            "_comment": "Test config",
            "backend": "correlation",
            "compound_database_path": "/data/compounds.csv",
            "cache": {
                "capacity": 32
            },
            "units": {
                "temperature": "K"
            },
            "logging": {
                "level": "debug"
            }
        }"#;

        let config: Config = serde_json::from_str(json).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(
            config.compound_database_path,
            Some(PathBuf::from("/data/compounds.csv"))
        );
        assert_eq!(config.cache.capacity, 32);
        assert_eq!(config.temperature_unit(), TemperatureUnit::Kelvin);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn parse_backend_names() {
        for (name, kind) in [
            ("mock", BackendKind::Mock),
            ("correlation", BackendKind::Correlation),
            ("phase", BackendKind::Phase),
        ] {
            let json = format!(r#"{{"backend": "{name}"}}"#);
            let config: Config = serde_json::from_str(&json).unwrap();
            assert_eq!(config.backend, kind);
        }

        let result: Result<Config, _> = serde_json::from_str(r#"{"backend": "nist"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn section_defaults() {
        assert_eq!(CacheConfig::default().capacity, 256);
        assert_eq!(UnitsConfig::default().temperature, "auto");
        assert_eq!(LoggingConfig::default().level, "warn");
    }

    #[test]
    fn reject_invalid_temperature_unit() {
        let json = r#"{
            "units": {
                "temperature": "F"
            }
        }"#;

        let config: Config = serde_json::from_str(json).unwrap();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("validation failed"));
    }

    #[test]
    fn csv_with_other_backend_is_reported_unused() {
        let json = r#"{
            "backend": "phase",
            "compound_database_path": "/data/compounds.csv"
        }"#;

        let mut config: Config = serde_json::from_str(json).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(
            config.unused_database_path(),
            Some(Path::new("/data/compounds.csv"))
        );

        config.backend = BackendKind::Correlation;
        assert_eq!(config.unused_database_path(), None);
    }

    #[test]
    fn reject_unknown_fields() {
        let json = r#"{
            "unknown_field": "value"
        }"#;

        let result: Result<Config, _> = serde_json::from_str(json);
        assert!(result.is_err());

        let nested = r#"{"cache": {"capacity": 8, "ttl": 60}}"#;
        let result: Result<Config, _> = serde_json::from_str(nested);
        assert!(result.is_err());
    }
}
