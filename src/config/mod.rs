//! Configuration for the flurry exporter.

mod vars;

pub use vars::{InterpolationResult, interpolate};

use clap::Parser;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

use crate::error::ConfigError;

/// Command-line arguments.
#[derive(Debug, Parser)]
#[command(
    name = "flurry",
    about = "Export CDN core analytics blobs to a flat CSV file"
)]
pub struct CliArgs {
    /// Path to the YAML config file.
    #[arg(short, long)]
    pub config: PathBuf,
}

/// Configuration for the storage account holding the analytics blobs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Storage account URL (Azure blob endpoint, or a local path for testing).
    pub account_url: String,
    /// Storage options passed to the backend (credentials, etc.).
    #[serde(default)]
    pub storage_options: HashMap<String, String>,
}

/// Configuration for the CSV output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Destination CSV file path, overwritten if present.
    pub path: String,
}

/// Main configuration for flurry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Storage configuration.
    pub storage: StorageConfig,
    /// Output configuration.
    pub output: OutputConfig,
}

impl Config {
    /// Load configuration from a file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let contents =
            std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFile { source })?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string.
    pub fn parse(contents: &str) -> Result<Self, ConfigError> {
        // Interpolate environment variables
        let result = interpolate(contents);
        if !result.is_ok() {
            return Err(ConfigError::EnvInterpolation {
                message: result.errors.join("\n"),
            });
        }

        // Parse YAML
        let config: Config = serde_yaml::from_str(&result.text)
            .map_err(|source| ConfigError::YamlParse { source })?;

        // Validate
        config.validate()?;

        Ok(config)
    }

    /// Validate the configuration.
    ///
    /// Runs before any storage access so misconfiguration fails at startup.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.storage.account_url.is_empty() {
            return Err(ConfigError::EmptyAccountUrl);
        }
        if self.output.path.is_empty() {
            return Err(ConfigError::EmptyOutputPath);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_yaml_parsing() {
        let yaml = r#"
storage:
  account_url: "https://cdnlogs.blob.core.windows.net"
  storage_options:
    azure_storage_account_key: "secret"
output:
  path: "/tmp/core-analytics.csv"
"#;
        let config = Config::parse(yaml).unwrap();

        assert_eq!(
            config.storage.account_url,
            "https://cdnlogs.blob.core.windows.net"
        );
        assert_eq!(
            config.storage.storage_options.get("azure_storage_account_key"),
            Some(&"secret".to_string())
        );
        assert_eq!(config.output.path, "/tmp/core-analytics.csv");
    }

    #[test]
    fn test_storage_options_default_empty() {
        let yaml = r#"
storage:
  account_url: "https://cdnlogs.blob.core.windows.net"
output:
  path: "/tmp/out.csv"
"#;
        let config = Config::parse(yaml).unwrap();
        assert!(config.storage.storage_options.is_empty());
    }

    #[test]
    fn test_empty_account_url_rejected() {
        let yaml = r#"
storage:
  account_url: ""
output:
  path: "/tmp/out.csv"
"#;
        let err = Config::parse(yaml).unwrap_err();
        assert!(matches!(err, ConfigError::EmptyAccountUrl));
    }

    #[test]
    fn test_empty_output_path_rejected() {
        let yaml = r#"
storage:
  account_url: "https://cdnlogs.blob.core.windows.net"
output:
  path: ""
"#;
        let err = Config::parse(yaml).unwrap_err();
        assert!(matches!(err, ConfigError::EmptyOutputPath));
    }

    #[test]
    fn test_missing_section_rejected() {
        let yaml = r#"
storage:
  account_url: "https://cdnlogs.blob.core.windows.net"
"#;
        let err = Config::parse(yaml).unwrap_err();
        assert!(matches!(err, ConfigError::YamlParse { .. }));
    }
}
