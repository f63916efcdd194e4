//! Error types for ingestion and export
//!
//! Only whole-book failures are errors. Individual rows with missing or
//! malformed fields are excluded during cleaning and never reach this type.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExposureError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Required column '{column}' not found in source header")]
    MissingColumn { column: String },

    #[error("Source data has no header row")]
    EmptyHeader,

    #[error("Invalid risk thresholds: high {high}, medium {medium} (need finite values with medium <= high)")]
    InvalidThresholds { high: f64, medium: f64 },
}

pub type Result<T> = std::result::Result<T, ExposureError>;
