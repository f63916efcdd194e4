//! Exposure engine: one pure evaluation pass over a cleaned book

use super::filter::{apply_filter, FilterSelection};
use super::geo::{geo_cluster, GeoClusterRow};
use super::risk::{RiskThresholds, RiskTier};
use super::summary::{carrier_summary, total_exposure, zip_summary, AggregationRow, ZIP_SUMMARY_LIMIT};
use crate::policy::PolicyRecord;
use log::debug;
use serde::{Deserialize, Serialize};

/// Configuration for an evaluation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExposureConfig {
    /// Risk tier boundaries for geographic clusters
    pub thresholds: RiskThresholds,

    /// Number of rows kept in the ZIP summary
    pub zip_summary_limit: usize,
}

impl Default for ExposureConfig {
    fn default() -> Self {
        Self {
            thresholds: RiskThresholds::default(),
            zip_summary_limit: ZIP_SUMMARY_LIMIT,
        }
    }
}

/// Main aggregation engine
///
/// Holds configuration only; every call to [`ExposureEngine::evaluate`] is a
/// pure function of the records and the selection.
#[derive(Debug, Clone, Default)]
pub struct ExposureEngine {
    config: ExposureConfig,
}

impl ExposureEngine {
    pub fn new(config: ExposureConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ExposureConfig {
        &self.config
    }

    /// Filter, total, group and classify in one pass
    pub fn evaluate<'a>(&self, records: &'a [PolicyRecord], selection: &FilterSelection) -> ExposureReport<'a> {
        let filtered = apply_filter(records, selection);

        let total = total_exposure(&filtered);
        let carriers = carrier_summary(&filtered);
        let zips = zip_summary(&filtered, self.config.zip_summary_limit);
        let clusters = geo_cluster(&filtered, &self.config.thresholds);

        debug!(
            "Evaluated {} of {} records: total exposure {:.2}, {} carriers, {} clusters",
            filtered.len(),
            records.len(),
            total,
            carriers.len(),
            clusters.len()
        );

        ExposureReport {
            total_exposure: total,
            carrier_summary: carriers,
            zip_summary: zips,
            geo_clusters: clusters,
            filtered,
        }
    }
}

/// Everything the presentation layer needs for one selection
#[derive(Debug, Clone, Serialize)]
pub struct ExposureReport<'a> {
    /// Sum of exposure over the filtered records
    pub total_exposure: f64,

    /// All carriers, ranked
    pub carrier_summary: Vec<AggregationRow>,

    /// Top ZIP codes, ranked
    pub zip_summary: Vec<AggregationRow>,

    /// Location clusters with risk tiers
    pub geo_clusters: Vec<GeoClusterRow>,

    /// Filtered records, in source order, for export
    #[serde(skip)]
    pub filtered: Vec<&'a PolicyRecord>,
}

impl ExposureReport<'_> {
    pub fn policy_count(&self) -> usize {
        self.filtered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filtered.is_empty()
    }

    /// Get summary statistics
    pub fn summary(&self) -> ReportSummary {
        let tier_count = |tier: RiskTier| {
            self.geo_clusters
                .iter()
                .filter(|c| c.risk_tier == tier)
                .count()
        };

        ReportSummary {
            policy_count: self.filtered.len(),
            total_exposure: self.total_exposure,
            carrier_count: self.carrier_summary.len(),
            cluster_count: self.geo_clusters.len(),
            high_clusters: tier_count(RiskTier::High),
            medium_clusters: tier_count(RiskTier::Medium),
            low_clusters: tier_count(RiskTier::Low),
            largest_cluster: self
                .geo_clusters
                .iter()
                .map(|c| c.total_exposure)
                .fold(0.0, f64::max),
        }
    }
}

/// Summary statistics for a report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub policy_count: usize,
    pub total_exposure: f64,
    pub carrier_count: usize,
    pub cluster_count: usize,
    pub high_clusters: usize,
    pub medium_clusters: usize,
    pub low_clusters: usize,
    pub largest_cluster: f64,
}
