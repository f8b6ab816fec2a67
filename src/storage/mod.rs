//! Storage abstraction over the analytics container.
//!
//! Provides a unified read-only interface for Azure Blob Storage and the
//! local filesystem (used in tests).

mod azure;
mod local;
mod url;

pub use azure::AzureConfig;
pub use local::LocalConfig;
pub use url::{BackendConfig, CORE_ANALYTICS_CONTAINER};

use bytes::Bytes;
use futures::{Stream, StreamExt};
use object_store::ObjectStore;
use object_store::path::Path;
use snafu::prelude::*;
use std::collections::HashMap;
use std::sync::Arc;

use crate::error::{ObjectStoreSnafu, StorageError};

/// Storage provider that abstracts over the supported backends.
#[derive(Clone)]
pub struct StorageProvider {
    pub(crate) config: BackendConfig,
    pub(crate) object_store: Arc<dyn ObjectStore>,
    pub(crate) canonical_url: String,
}

impl std::fmt::Debug for StorageProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "StorageProvider<{}>", self.canonical_url)
    }
}

impl StorageProvider {
    /// Create a storage provider for the given account URL with storage options.
    pub fn for_url_with_options(
        url: &str,
        options: &HashMap<String, String>,
    ) -> Result<Self, StorageError> {
        match BackendConfig::parse_url(url)? {
            BackendConfig::Azure(config) => Self::construct_azure(config, options),
            BackendConfig::Local(config) => Self::construct_local(config),
        }
    }

    /// List every object in the container as a flat stream.
    ///
    /// Virtual-directory structure implied by `/` in keys is not respected
    /// as hierarchy.
    pub fn list(&self) -> impl Stream<Item = Result<Path, StorageError>> + '_ {
        self.object_store
            .list(None)
            .map(|result| result.map(|meta| meta.location).context(ObjectStoreSnafu))
    }

    /// Get the full contents of an object.
    pub async fn get(&self, path: &Path) -> Result<Bytes, StorageError> {
        let result = self.object_store.get(path).await.context(ObjectStoreSnafu)?;
        result.bytes().await.context(ObjectStoreSnafu)
    }

    /// Get the backend configuration.
    pub fn config(&self) -> &BackendConfig {
        &self.config
    }

    /// Canonical URL of the underlying container.
    pub fn canonical_url(&self) -> &str {
        &self.canonical_url
    }
}
