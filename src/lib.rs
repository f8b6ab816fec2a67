//! Flurry: export CDN core analytics blobs to a flat CSV file.
//!
//! This crate handles:
//! - Flat listing of the diagnostics container in cloud storage
//! - Parsing blob keys into profile, endpoint, and hour window
//! - Decoding per-endpoint traffic metrics from each blob's JSON document
//! - Rendering one CSV row per blob and writing the file in a single call

pub mod config;
pub mod error;
pub mod pipeline;
pub mod sink;
pub mod source;
pub mod storage;
pub mod tracing;

// Re-export commonly used items
pub use config::{CliArgs, Config};
pub use error::ExportError;
pub use pipeline::{ExportStats, run_export};
pub use self::tracing::init_tracing;
