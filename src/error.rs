//! Error types for the flurry exporter.

use snafu::prelude::*;

/// Errors that can occur during storage operations.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum StorageError {
    /// Invalid storage URL format.
    #[snafu(display("Invalid storage URL: {url}"))]
    InvalidUrl { url: String },

    /// Object store operation failed.
    #[snafu(display("Storage operation failed: {source}"))]
    ObjectStore { source: object_store::Error },

    /// Azure configuration error.
    #[snafu(display("Azure configuration error: {source}"))]
    AzureConfig { source: object_store::Error },

    /// Local filesystem configuration error.
    #[snafu(display("Local storage configuration error: {source}"))]
    LocalConfig { source: object_store::Error },
}

/// Errors that can occur during configuration parsing and validation.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[snafu(display("Failed to read configuration file"))]
    ReadFile { source: std::io::Error },

    /// Failed to parse YAML configuration.
    #[snafu(display("Failed to parse YAML configuration"))]
    YamlParse { source: serde_yaml::Error },

    /// Environment variable interpolation failed.
    #[snafu(display("Environment variable interpolation failed:\n{message}"))]
    EnvInterpolation { message: String },

    /// Storage account URL is empty.
    #[snafu(display("Storage account URL cannot be empty"))]
    EmptyAccountUrl,

    /// Output path is empty.
    #[snafu(display("Output CSV path cannot be empty"))]
    EmptyOutputPath,
}

/// Errors that can occur while parsing a blob key.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum KeyError {
    /// Key does not match the core analytics path template.
    #[snafu(display("Blob key does not match the core analytics layout: {key}"))]
    TemplateMismatch { key: String },

    /// Date-time segments do not form a valid timestamp.
    #[snafu(display("Blob key has an invalid timestamp: {key}"))]
    InvalidTimestamp { key: String },
}

/// Errors that can occur while decoding a core analytics document.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum RecordError {
    /// Blob content is not a valid core analytics document.
    #[snafu(display("Failed to parse JSON in {path}: {source}"))]
    JsonParse {
        path: String,
        source: serde_json::Error,
    },

    /// Document has no records.
    #[snafu(display("Document {path} contains no records"))]
    NoRecords { path: String },
}

/// Errors that can occur while rendering CSV output.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum SinkError {
    /// Failed to encode a CSV record.
    #[snafu(display("Failed to encode CSV record: {source}"))]
    RowEncode { source: csv::Error },

    /// Failed to finalize the CSV buffer.
    #[snafu(display("Failed to finalize CSV buffer: {message}"))]
    Finish { message: String },
}

/// Top-level export errors.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum ExportError {
    /// Configuration error.
    #[snafu(display("Configuration error: {source}"))]
    Config { source: ConfigError },

    /// Storage error.
    #[snafu(display("Storage error: {source}"))]
    Storage { source: StorageError },

    /// Blob key error.
    #[snafu(display("Blob key error: {source}"))]
    Key { source: KeyError },

    /// Record decoding error.
    #[snafu(display("Record error: {source}"))]
    Record { source: RecordError },

    /// CSV rendering error.
    #[snafu(display("Sink error: {source}"))]
    Sink { source: SinkError },

    /// Failed to write the output file.
    #[snafu(display("Failed to write output file {path}: {source}"))]
    OutputWrite {
        path: String,
        source: std::io::Error,
    },
}

impl From<ConfigError> for ExportError {
    fn from(source: ConfigError) -> Self {
        ExportError::Config { source }
    }
}

impl From<StorageError> for ExportError {
    fn from(source: StorageError) -> Self {
        ExportError::Storage { source }
    }
}

impl From<KeyError> for ExportError {
    fn from(source: KeyError) -> Self {
        ExportError::Key { source }
    }
}

impl From<RecordError> for ExportError {
    fn from(source: RecordError) -> Self {
        ExportError::Record { source }
    }
}

impl From<SinkError> for ExportError {
    fn from(source: SinkError) -> Self {
        ExportError::Sink { source }
    }
}
