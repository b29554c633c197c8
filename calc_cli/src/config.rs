//! TOML configuration for the CLI.
//!
//! ```toml
//! [output]
//! precision = 4
//! json = false
//!
//! [suggest]
//! endpoint = "https://generativelanguage.googleapis.com/v1beta"
//! model = "gemini-1.5-flash"
//! api_key_env = "GEMINI_API_KEY"
//! timeout_secs = 30
//! ```
//!
//! Every key is optional.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Looked up in the working directory when `--config` is not given
pub const DEFAULT_CONFIG_FILE: &str = "tally.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub output: OutputConfig,
    pub suggest: SuggestConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Decimal places in human-readable output
    pub precision: usize,
    /// Emit JSON instead of text
    pub json: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            precision: 4,
            json: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuggestConfig {
    /// Base URL; `/models/{model}:generateContent` is appended
    pub endpoint: String,
    pub model: String,
    /// Environment variable holding the API key
    pub api_key_env: String,
    pub timeout_secs: u64,
}

impl Default for SuggestConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            model: "gemini-1.5-flash".to_string(),
            api_key_env: "GEMINI_API_KEY".to_string(),
            timeout_secs: 30,
        }
    }
}

impl AppConfig {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(text).context("Invalid configuration")?;
        anyhow::ensure!(config.output.precision <= 15, "output.precision must be at most 15");
        anyhow::ensure!(config.suggest.timeout_secs > 0, "suggest.timeout_secs must be positive");
        Ok(config)
    }

    /// Load an explicit config file, or `tally.toml` if present, or defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => {
                let default = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !default.exists() {
                    debug!("No {} found, using defaults", DEFAULT_CONFIG_FILE);
                    return Ok(Self::default());
                }
                default
            }
        };

        let text = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = Self::from_toml_str(&text)
            .with_context(|| format!("Failed to load config file {}", path.display()))?;
        debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config = AppConfig::from_toml_str("[output]\nprecision = 2\n").unwrap();
        assert_eq!(config.output.precision, 2);
        assert!(!config.output.json);
        assert_eq!(config.suggest, SuggestConfig::default());
    }

    #[test]
    fn test_empty_config_is_default() {
        assert_eq!(AppConfig::from_toml_str("").unwrap(), AppConfig::default());
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(AppConfig::from_toml_str("[output]\nprecision = 40\n").is_err());
        assert!(AppConfig::from_toml_str("[suggest]\ntimeout_secs = 0\n").is_err());
        assert!(AppConfig::from_toml_str("[output]\nprecision = \"two\"\n").is_err());
    }

    #[test]
    fn test_load_explicit_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[suggest]\nmodel = \"test-model\"\napi_key_env = \"TALLY_KEY\"").unwrap();

        let config = AppConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.suggest.model, "test-model");
        assert_eq!(config.suggest.api_key_env, "TALLY_KEY");
        assert_eq!(config.suggest.timeout_secs, 30);
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(AppConfig::load(Some(&missing)).is_err());
    }
}
