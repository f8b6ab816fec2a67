//! Input side of the pipeline: blob key parsing and record decoding.

mod key;
mod record;

pub use key::BlobKey;
pub use record::{CoreAnalytics, ExportDocument, ExportRecord, decode_record};
