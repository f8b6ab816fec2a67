//! The export pipeline: one sequential pass over the analytics container.

use futures::TryStreamExt;
use object_store::path::Path;
use snafu::prelude::*;
use tracing::{debug, info};

use crate::config::Config;
use crate::error::{ExportError, OutputWriteSnafu};
use crate::sink::CsvBuffer;
use crate::source::{BlobKey, decode_record};
use crate::storage::StorageProvider;

/// Summary of one completed export run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportStats {
    /// Number of blobs exported (one CSV row each).
    pub blobs: usize,
    /// Size of the written CSV file in bytes.
    pub bytes_written: usize,
}

/// Run the export: list every blob in the analytics container, derive one
/// CSV row per blob, and write the result to the configured output path in
/// a single call.
///
/// The first failure at any step aborts the run before the output file is
/// touched; an aborted run leaves no file (or the previous one), never a
/// partial write.
pub async fn run_export(config: &Config) -> Result<ExportStats, ExportError> {
    let storage = StorageProvider::for_url_with_options(
        &config.storage.account_url,
        &config.storage.storage_options,
    )?;

    info!(container = %storage.canonical_url(), "Listing core analytics blobs");

    let mut blobs: Vec<Path> = storage.list().try_collect().await?;
    // Listing order differs between backends; sort for deterministic output
    blobs.sort_unstable();

    let mut buffer = CsvBuffer::new()?;
    for path in &blobs {
        let key = BlobKey::parse(path.as_ref())?;
        let content = storage.get(path).await?;
        let analytics = decode_record(path.as_ref(), &content)?;
        buffer.append(&key, &analytics)?;

        debug!(
            blob = %path,
            profile = %key.profile,
            endpoint = %key.endpoint,
            "Exported blob"
        );
    }

    let bytes = buffer.into_bytes()?;
    let bytes_written = bytes.len();
    tokio::fs::write(&config.output.path, &bytes)
        .await
        .context(OutputWriteSnafu {
            path: config.output.path.as_str(),
        })?;

    info!(
        rows = blobs.len(),
        path = %config.output.path,
        "Export complete"
    );

    Ok(ExportStats {
        blobs: blobs.len(),
        bytes_written,
    })
}
