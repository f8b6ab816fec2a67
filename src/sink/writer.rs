//! CSV rendering for the export.
//!
//! Rows accumulate into an in-memory buffer; the caller writes the buffer to
//! disk in a single call once every blob has been processed. Values
//! containing delimiters are quoted per standard CSV rules.

use serde_json::Number;
use snafu::prelude::*;

use crate::error::{RowEncodeSnafu, SinkError};
use crate::source::{BlobKey, CoreAnalytics};

/// Column header, fixed order.
pub const CSV_HEADER: [&str; 31] = [
    "Profile",
    "Endpoint",
    "Hostname",
    "Time",
    "RequestCountTotal",
    "RequestCountHttpStatus2xx",
    "RequestCountHttpStatus3xx",
    "RequestCountHttpStatus4xx",
    "RequestCountHttpStatus5xx",
    "RequestCountHttpStatusOthers",
    "RequestCountHttpStatus200",
    "RequestCountHttpStatus206",
    "RequestCountHttpStatus302",
    "RequestCountHttpStatus304",
    "RequestCountHttpStatus404",
    "RequestCountCacheHit",
    "RequestCountCacheMiss",
    "RequestCountCacheNoCache",
    "RequestCountCacheUncacheable",
    "RequestCountCacheOthers",
    "EgressTotal",
    "EgressHttpStatus2xx",
    "EgressHttpStatus3xx",
    "EgressHttpStatus4xx",
    "EgressHttpStatus5xx",
    "EgressHttpStatusOthers",
    "EgressCacheHit",
    "EgressCacheMiss",
    "EgressCacheNoCache",
    "EgressCacheUncacheable",
    "EgressCacheOthers",
];

/// Timestamp rendering, naive and locale-independent.
const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// In-memory CSV buffer: one header row plus one row per blob.
pub struct CsvBuffer {
    writer: csv::Writer<Vec<u8>>,
}

impl CsvBuffer {
    /// Create a buffer with the header row already written.
    pub fn new() -> Result<Self, SinkError> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(CSV_HEADER).context(RowEncodeSnafu)?;
        Ok(Self { writer })
    }

    /// Append one row combining the parsed key with the decoded metrics.
    ///
    /// Null or missing metric values and a missing hostname render as empty
    /// cells.
    pub fn append(&mut self, key: &BlobKey, analytics: &CoreAnalytics) -> Result<(), SinkError> {
        let mut row: Vec<String> = Vec::with_capacity(CSV_HEADER.len());
        row.push(key.profile.clone());
        row.push(key.endpoint.clone());
        row.push(analytics.domain_name.clone().unwrap_or_default());
        row.push(key.time.format(TIME_FORMAT).to_string());
        row.extend(analytics.metric_values().iter().map(|value| metric_cell(*value)));

        self.writer.write_record(&row).context(RowEncodeSnafu)
    }

    /// Finalize the buffer and return the rendered CSV bytes.
    pub fn into_bytes(mut self) -> Result<Vec<u8>, SinkError> {
        self.writer
            .flush()
            .map_err(|e| SinkError::Finish {
                message: e.to_string(),
            })?;
        self.writer.into_inner().map_err(|e| SinkError::Finish {
            message: e.to_string(),
        })
    }
}

fn metric_cell(value: Option<&Number>) -> String {
    value.map(|n| n.to_string()).unwrap_or_default()
}
