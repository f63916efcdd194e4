//! Geographic concentration clusters
//!
//! Records group on the exact (city, latitude, longitude) triple. Coordinates
//! are never averaged or re-geocoded, so one city can yield several clusters.

use super::risk::{RiskThresholds, RiskTier};
use crate::policy::PolicyRecord;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;

/// Summed exposure at one recorded location, with its risk tier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoClusterRow {
    pub city: String,
    pub latitude: f64,
    pub longitude: f64,
    pub total_exposure: f64,
    pub risk_tier: RiskTier,
}

impl GeoClusterRow {
    /// Map marker color for this cluster
    pub fn color(&self) -> &'static str {
        self.risk_tier.color()
    }
}

/// Bit pattern of a coordinate with `-0.0` folded into `0.0`
fn coordinate_key(value: f64) -> u64 {
    if value == 0.0 {
        0.0_f64.to_bits()
    } else {
        value.to_bits()
    }
}

/// Cluster records by location and classify each cluster
///
/// Rows come back ordered by city, then latitude, then longitude (ascending).
pub fn geo_cluster(records: &[&PolicyRecord], thresholds: &RiskThresholds) -> Vec<GeoClusterRow> {
    let mut clusters: HashMap<(&str, u64, u64), GeoClusterRow> = HashMap::new();

    for &record in records {
        let key = (
            record.customer_city.as_str(),
            coordinate_key(record.latitude),
            coordinate_key(record.longitude),
        );
        clusters
            .entry(key)
            .or_insert_with(|| GeoClusterRow {
                city: record.customer_city.clone(),
                latitude: record.latitude,
                longitude: record.longitude,
                total_exposure: 0.0,
                risk_tier: RiskTier::Low,
            })
            .total_exposure += record.exposure_amount;
    }

    let mut rows: Vec<GeoClusterRow> = clusters
        .into_values()
        .map(|mut row| {
            row.risk_tier = thresholds.classify(row.total_exposure);
            row
        })
        .collect();

    rows.sort_by(compare_location);
    rows
}

fn compare_location(a: &GeoClusterRow, b: &GeoClusterRow) -> Ordering {
    a.city
        .cmp(&b.city)
        .then_with(|| a.latitude.total_cmp(&b.latitude))
        .then_with(|| a.longitude.total_cmp(&b.longitude))
}
