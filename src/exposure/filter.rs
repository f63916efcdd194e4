//! Carrier and line-of-business filtering

use crate::policy::PolicyRecord;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Distinct categorical values available for selection, sorted
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOptions {
    pub companies: Vec<String>,
    pub lines_of_business: Vec<String>,
}

impl FilterOptions {
    pub fn from_records(records: &[PolicyRecord]) -> Self {
        let companies: BTreeSet<&str> = records.iter().map(|r| r.parent_company.as_str()).collect();
        let lobs: BTreeSet<&str> = records.iter().map(|r| r.line_of_business.as_str()).collect();

        Self {
            companies: companies.into_iter().map(String::from).collect(),
            lines_of_business: lobs.into_iter().map(String::from).collect(),
        }
    }
}

/// User-chosen subset of carriers and lines of business
///
/// Membership is exact: no case folding, no substring matching. An empty set
/// matches nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSelection {
    pub companies: BTreeSet<String>,
    pub lines_of_business: BTreeSet<String>,
}

impl FilterSelection {
    pub fn new<C, L, S, T>(companies: C, lines_of_business: L) -> Self
    where
        C: IntoIterator<Item = S>,
        L: IntoIterator<Item = T>,
        S: Into<String>,
        T: Into<String>,
    {
        Self {
            companies: companies.into_iter().map(Into::into).collect(),
            lines_of_business: lines_of_business.into_iter().map(Into::into).collect(),
        }
    }

    /// Every distinct carrier and line of business in the records (no filtering effect)
    pub fn all(records: &[PolicyRecord]) -> Self {
        let options = FilterOptions::from_records(records);
        Self::new(options.companies, options.lines_of_business)
    }

    /// Selects nothing
    pub fn none() -> Self {
        Self::default()
    }

    pub fn matches(&self, record: &PolicyRecord) -> bool {
        self.companies.contains(&record.parent_company)
            && self.lines_of_business.contains(&record.line_of_business)
    }
}

/// Records passing the selection, in source order
pub fn apply_filter<'a>(records: &'a [PolicyRecord], selection: &FilterSelection) -> Vec<&'a PolicyRecord> {
    records.iter().filter(|r| selection.matches(r)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records() -> Vec<PolicyRecord> {
        vec![
            PolicyRecord::new("Dallas", "75001", "Acme", "Home", 100.0, 32.78, -96.80),
            PolicyRecord::new("Dallas", "75001", "Acme", "Condo", 200.0, 32.78, -96.80),
            PolicyRecord::new("Austin", "78701", "Beacon", "Home", 300.0, 30.27, -97.74),
            PolicyRecord::new("Austin", "78701", "Acme Holdings", "Home", 400.0, 30.27, -97.74),
        ]
    }

    #[test]
    fn test_options_sorted_distinct() {
        let options = FilterOptions::from_records(&records());
        assert_eq!(options.companies, vec!["Acme", "Acme Holdings", "Beacon"]);
        assert_eq!(options.lines_of_business, vec!["Condo", "Home"]);
    }

    #[test]
    fn test_all_selection_keeps_everything() {
        let records = records();
        let filtered = apply_filter(&records, &FilterSelection::all(&records));
        assert_eq!(filtered.len(), records.len());
    }

    #[test]
    fn test_empty_selection_matches_nothing() {
        let records = records();
        assert!(apply_filter(&records, &FilterSelection::none()).is_empty());

        let no_lobs = FilterSelection::new(["Acme", "Beacon"], Vec::<String>::new());
        assert!(apply_filter(&records, &no_lobs).is_empty());
    }

    #[test]
    fn test_exact_membership() {
        let records = records();

        // "Acme" must not pick up "Acme Holdings", and case matters
        let selection = FilterSelection::new(["Acme"], ["Home"]);
        let filtered = apply_filter(&records, &selection);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].exposure_amount, 100.0);

        let lower = FilterSelection::new(["acme"], ["home"]);
        assert!(apply_filter(&records, &lower).is_empty());
    }

    #[test]
    fn test_filter_preserves_source_order() {
        let records = records();
        let selection = FilterSelection::new(["Acme", "Beacon"], ["Home", "Condo"]);
        let amounts: Vec<f64> = apply_filter(&records, &selection)
            .iter()
            .map(|r| r.exposure_amount)
            .collect();
        assert_eq!(amounts, vec![100.0, 200.0, 300.0]);
    }
}
