//! Exposure aggregation: filtering, grouped summaries and risk classification

mod engine;
mod filter;
mod geo;
mod risk;
mod summary;

pub use engine::{ExposureEngine, ExposureConfig, ExposureReport, ReportSummary};
pub use filter::{apply_filter, FilterOptions, FilterSelection};
pub use geo::{geo_cluster, GeoClusterRow};
pub use risk::{classify, RiskThresholds, RiskTier, HIGH_EXPOSURE_THRESHOLD, MEDIUM_EXPOSURE_THRESHOLD};
pub use summary::{aggregate_by, carrier_summary, total_exposure, zip_summary, AggregationRow, ZIP_SUMMARY_LIMIT};
