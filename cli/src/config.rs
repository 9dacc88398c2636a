//! CLI configuration.
//!
//! Loaded from a TOML file when `--config` is given. Every field has a serde
//! default so a partial file only overrides what it names; command-line flags
//! and `CASHSPLIT_*` environment variables override the file.

use std::path::{Path, PathBuf};

use cashsplit_currency::{DEFAULT_MAX_AMOUNT, DEFAULT_PREFIX};
use cashsplit_types::params::ParamsError;
use cashsplit_types::SplitParams;
use cashsplit_utils::LogFormat;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("cannot serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("invalid split parameters: {0}")]
    Params(#[from] ParamsError),

    #[error("max_amount must be positive, got {0}")]
    MaxAmount(i64),

    #[error("configured part count {parts} lies outside {min}..={max}")]
    Parts { parts: usize, min: usize, max: usize },
}

/// How split results are printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Fixed part count; automatic (5 or 6) when absent.
    #[serde(default)]
    pub parts: Option<usize>,

    /// Largest amount accepted from input.
    #[serde(default = "default_max_amount")]
    pub max_amount: i64,

    /// Marker printed in front of amounts.
    #[serde(default = "default_currency_prefix")]
    pub currency_prefix: String,

    #[serde(default)]
    pub output: OutputFormat,

    #[serde(default)]
    pub log_format: LogFormat,

    /// Filter directive, e.g. `"info"` or `"warn,cashsplit_engine=debug"`.
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Seed for reproducible splits; entropy when absent.
    #[serde(default)]
    pub seed: Option<u64>,

    #[serde(default)]
    pub params: SplitParams,
}

fn default_max_amount() -> i64 {
    DEFAULT_MAX_AMOUNT
}

fn default_currency_prefix() -> String {
    DEFAULT_PREFIX.to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl CliConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Reject settings the splitter would refuse on every call.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.params.check()?;
        if self.max_amount <= 0 {
            return Err(ConfigError::MaxAmount(self.max_amount));
        }
        if let Some(parts) = self.parts {
            if !self.params.allows_parts(parts) {
                return Err(ConfigError::Parts {
                    parts,
                    min: self.params.min_parts,
                    max: self.params.max_parts,
                });
            }
        }
        Ok(())
    }
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            parts: None,
            max_amount: default_max_amount(),
            currency_prefix: default_currency_prefix(),
            output: OutputFormat::default(),
            log_format: LogFormat::default(),
            log_level: default_log_level(),
            seed: None,
            params: SplitParams::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_config_round_trips_through_toml() {
        let config = CliConfig::default();
        let toml_str = config.to_toml_string().unwrap();
        let parsed = CliConfig::from_toml_str(&toml_str).expect("should parse");
        assert_eq!(parsed, config);
    }

    #[test]
    fn minimal_toml_uses_defaults() {
        let config = CliConfig::from_toml_str("").expect("empty toml should use defaults");
        assert_eq!(config.max_amount, 1_000_000_000);
        assert_eq!(config.currency_prefix, "Rp");
        assert_eq!(config.output, OutputFormat::Table);
        assert_eq!(config.log_format, LogFormat::Human);
        assert_eq!(config.parts, None);
        assert_eq!(config.params, SplitParams::default());
    }

    #[test]
    fn partial_toml_overrides() {
        let toml = r#"
            parts = 4
            output = "json"
            seed = 42

            [params]
            min_amount = 50000
        "#;
        let config = CliConfig::from_toml_str(toml).expect("should parse");
        assert_eq!(config.parts, Some(4));
        assert_eq!(config.output, OutputFormat::Json);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.params.min_amount, 50_000);
        assert_eq!(config.params.max_parts, 6); // default
        assert_eq!(config.log_level, "info"); // default
    }

    #[test]
    fn unknown_output_is_a_parse_error() {
        let err = CliConfig::from_toml_str(r#"output = "xml""#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "currency_prefix = \"IDR\"\nlog_format = \"json\"").unwrap();
        let config = CliConfig::from_toml_file(file.path()).unwrap();
        assert_eq!(config.currency_prefix, "IDR");
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn missing_file_returns_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = CliConfig::from_toml_file(&dir.path().join("cashsplit.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn validate_catches_bad_settings() {
        assert!(CliConfig::default().validate().is_ok());

        let config = CliConfig {
            parts: Some(9),
            ..CliConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Parts { parts: 9, .. })));

        let config = CliConfig {
            max_amount: 0,
            ..CliConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::MaxAmount(0))));

        let mut config = CliConfig::default();
        config.params.auto_parts.clear();
        assert!(matches!(config.validate(), Err(ConfigError::Params(_))));
    }
}
