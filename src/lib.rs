//! Property Aggregation - dwelling-limit exposure engine for a book of business
//!
//! This library provides:
//! - Book ingestion and row-level cleaning (required fields, numeric exposure, ZIP normalization)
//! - Carrier and line-of-business filtering
//! - Exposure summaries by carrier and ZIP code
//! - Geographic clustering with high / medium / low risk tiers
//! - CSV export of the filtered book and GeoJSON map markers

pub mod error;
pub mod policy;
pub mod exposure;
pub mod export;
pub mod format;
pub mod map;
pub mod dashboard;

// Re-export commonly used types
pub use error::{ExposureError, Result};
pub use policy::{Book, ColumnMapping, PolicyRecord};
pub use exposure::{
    classify, ExposureEngine, ExposureConfig, ExposureReport, FilterSelection, RiskTier,
    AggregationRow, GeoClusterRow,
};
pub use export::{export_csv, ExportArtifact, EXPORT_FILE_NAME, EXPORT_MIME_TYPE};
pub use dashboard::Dashboard;
