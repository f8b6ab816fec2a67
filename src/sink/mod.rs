//! Output side of the pipeline: CSV rendering.

mod writer;

pub use writer::{CSV_HEADER, CsvBuffer};
