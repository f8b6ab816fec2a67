//! URL parsing for storage backends.
//!
//! Extracts backend configuration from an account URL (Azure Blob Storage
//! endpoint forms, or a local filesystem path for testing).

use regex::Regex;
use std::sync::OnceLock;

use crate::error::StorageError;

use super::{AzureConfig, LocalConfig};

/// The fixed diagnostics container Azure CDN writes core analytics into.
pub const CORE_ANALYTICS_CONTAINER: &str = "insights-logs-coreanalytics";

// URL patterns for the supported storage backends
const ABFS_URL: &str =
    r"^abfss?://(?P<container>[a-z0-9\-]+)@(?P<account>[a-z0-9]+)\.dfs\.core\.windows\.net/?$";
const AZURE_HTTPS: &str = r"^https://(?P<account>[a-z0-9]+)\.(blob|dfs)\.core\.windows\.net(/(?P<container>[a-z0-9\-]+))?/?$";

const FILE_URI: &str = r"^file://(?P<path>.+)$";
const FILE_PATH: &str = r"^(?P<path>/.*)$";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Backend {
    Azure,
    Local,
}

fn matchers() -> &'static [(Backend, Regex)] {
    static MATCHERS: OnceLock<Vec<(Backend, Regex)>> = OnceLock::new();
    MATCHERS.get_or_init(|| {
        vec![
            (Backend::Azure, Regex::new(ABFS_URL).unwrap()),
            (Backend::Azure, Regex::new(AZURE_HTTPS).unwrap()),
            (Backend::Local, Regex::new(FILE_URI).unwrap()),
            (Backend::Local, Regex::new(FILE_PATH).unwrap()),
        ]
    })
}

/// Backend configuration enum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendConfig {
    Azure(AzureConfig),
    Local(LocalConfig),
}

impl BackendConfig {
    /// Parse an account URL into a backend configuration.
    ///
    /// Azure URLs without an explicit container get the fixed core analytics
    /// container.
    pub fn parse_url(url: &str) -> Result<Self, StorageError> {
        for (backend, regex) in matchers() {
            if let Some(matches) = regex.captures(url) {
                return Ok(match backend {
                    Backend::Azure => Self::parse_azure(&matches),
                    Backend::Local => Self::parse_local(&matches),
                });
            }
        }

        Err(StorageError::InvalidUrl {
            url: url.to_string(),
        })
    }

    fn parse_azure(matches: &regex::Captures) -> Self {
        let account = matches
            .name("account")
            .expect("account should always be available")
            .as_str()
            .to_string();
        let container = matches
            .name("container")
            .map(|m| m.as_str().to_string())
            .unwrap_or_else(|| CORE_ANALYTICS_CONTAINER.to_string());

        BackendConfig::Azure(AzureConfig { account, container })
    }

    fn parse_local(matches: &regex::Captures) -> Self {
        let path = matches
            .name("path")
            .expect("path should always be available")
            .as_str()
            .to_string();

        BackendConfig::Local(LocalConfig { path })
    }
}
