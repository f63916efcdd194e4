//! Grouped exposure summaries (carrier comparison, top ZIP codes)

use crate::policy::PolicyRecord;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Number of ZIP codes shown in the ZIP summary
pub const ZIP_SUMMARY_LIMIT: usize = 10;

/// One group of a summary: key, summed exposure and policy count
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregationRow {
    pub key: String,
    pub total_exposure: f64,
    pub policy_count: usize,
}

/// Sum of exposure over the records; zero for an empty set
pub fn total_exposure(records: &[&PolicyRecord]) -> f64 {
    records.iter().map(|r| r.exposure_amount).sum()
}

/// Group records by `key_fn`, ordered by total descending then key ascending
pub fn aggregate_by<F>(records: &[&PolicyRecord], key_fn: F) -> Vec<AggregationRow>
where
    F: Fn(&PolicyRecord) -> &str,
{
    let mut groups: BTreeMap<&str, (f64, usize)> = BTreeMap::new();
    for &record in records {
        let entry = groups.entry(key_fn(record)).or_insert((0.0, 0));
        entry.0 += record.exposure_amount;
        entry.1 += 1;
    }

    let mut rows: Vec<AggregationRow> = groups
        .into_iter()
        .map(|(key, (total_exposure, policy_count))| AggregationRow {
            key: key.to_string(),
            total_exposure,
            policy_count,
        })
        .collect();

    rows.sort_by(|a, b| {
        b.total_exposure
            .total_cmp(&a.total_exposure)
            .then_with(|| a.key.cmp(&b.key))
    });
    rows
}

/// Exposure per parent company, all carriers
pub fn carrier_summary(records: &[&PolicyRecord]) -> Vec<AggregationRow> {
    aggregate_by(records, |r| r.parent_company.as_str())
}

/// Exposure per customer ZIP, truncated to the top `limit` rows
pub fn zip_summary(records: &[&PolicyRecord], limit: usize) -> Vec<AggregationRow> {
    let mut rows = aggregate_by(records, |r| r.customer_zip.as_str());
    rows.truncate(limit);
    rows
}
