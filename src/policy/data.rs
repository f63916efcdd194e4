//! Policy record structures and source column mapping

use serde::{Deserialize, Serialize};

/// Source column holding the customer city
pub const DEFAULT_CITY_COLUMN: &str = "Cust City";
/// Source column holding the customer ZIP (5-digit or ZIP+4)
pub const DEFAULT_ZIP_COLUMN: &str = "Cust Zip";
/// Source column holding the carrier's parent company
pub const DEFAULT_COMPANY_COLUMN: &str = "Parent Company";
/// Source column holding the policy line of business
pub const DEFAULT_LOB_COLUMN: &str = "Policy Type LOB";
/// Source column holding the dwelling limit (Coverage A)
pub const DEFAULT_EXPOSURE_COLUMN: &str = "Dwelling Limit";
pub const DEFAULT_LATITUDE_COLUMN: &str = "Latitude";
pub const DEFAULT_LONGITUDE_COLUMN: &str = "Longitude";

/// Number of leading characters kept from a ZIP code
pub const ZIP_LENGTH: usize = 5;

/// Maps the seven required policy fields onto source column names
///
/// The exposure measure is the only field that differs between books: some
/// label it "Dwelling Limit", others "CovA". `exposure_label` is the display
/// name used in summaries, popups and exports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMapping {
    pub city: String,
    pub zip: String,
    pub company: String,
    pub line_of_business: String,
    pub exposure: String,
    pub latitude: String,
    pub longitude: String,
    pub exposure_label: String,
}

impl ColumnMapping {
    /// Book keyed on the "Dwelling Limit" column, labelled as such
    pub fn dwelling_limit() -> Self {
        Self {
            city: DEFAULT_CITY_COLUMN.to_string(),
            zip: DEFAULT_ZIP_COLUMN.to_string(),
            company: DEFAULT_COMPANY_COLUMN.to_string(),
            line_of_business: DEFAULT_LOB_COLUMN.to_string(),
            exposure: DEFAULT_EXPOSURE_COLUMN.to_string(),
            latitude: DEFAULT_LATITUDE_COLUMN.to_string(),
            longitude: DEFAULT_LONGITUDE_COLUMN.to_string(),
            exposure_label: DEFAULT_EXPOSURE_COLUMN.to_string(),
        }
    }

    /// Same source columns, exposure reported as Coverage A ("CovA")
    pub fn cov_a() -> Self {
        Self::dwelling_limit().with_exposure_label("CovA")
    }

    /// Read exposure from a differently named column
    pub fn with_exposure_column(mut self, column: impl Into<String>) -> Self {
        self.exposure = column.into();
        self
    }

    pub fn with_exposure_label(mut self, label: impl Into<String>) -> Self {
        self.exposure_label = label.into();
        self
    }

    /// Required columns in a fixed order: city, zip, company, lob, exposure, lat, lon
    pub fn required_columns(&self) -> [&str; 7] {
        [
            self.city.as_str(),
            self.zip.as_str(),
            self.company.as_str(),
            self.line_of_business.as_str(),
            self.exposure.as_str(),
            self.latitude.as_str(),
            self.longitude.as_str(),
        ]
    }

    /// Summary column name for the exposure total, e.g. "TotalDwellingLimit"
    pub fn total_column_name(&self) -> String {
        let compact: String = self.exposure_label.split_whitespace().collect();
        format!("Total{}", compact)
    }
}

impl Default for ColumnMapping {
    fn default() -> Self {
        Self::dwelling_limit()
    }
}

/// A validated policy row, eligible for aggregation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyRecord {
    /// Customer city
    pub customer_city: String,

    /// Customer ZIP, truncated to five characters
    pub customer_zip: String,

    /// Carrier parent company
    pub parent_company: String,

    /// Policy line of business
    pub line_of_business: String,

    /// Dwelling limit / Coverage A amount (non-negative)
    pub exposure_amount: f64,

    /// Latitude in decimal degrees
    pub latitude: f64,

    /// Longitude in decimal degrees
    pub longitude: f64,

    /// Every source cell in header order, with ZIP and exposure normalized
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub columns: Vec<String>,
}

impl PolicyRecord {
    /// Create a record with no extra source columns
    pub fn new(
        customer_city: impl Into<String>,
        customer_zip: &str,
        parent_company: impl Into<String>,
        line_of_business: impl Into<String>,
        exposure_amount: f64,
        latitude: f64,
        longitude: f64,
    ) -> Self {
        Self {
            customer_city: customer_city.into(),
            customer_zip: normalize_zip(customer_zip),
            parent_company: parent_company.into(),
            line_of_business: line_of_business.into(),
            exposure_amount,
            latitude,
            longitude,
            columns: Vec::new(),
        }
    }
}

/// Keep the first five characters of a ZIP ("75001-1234" -> "75001")
pub fn normalize_zip(zip: &str) -> String {
    zip.trim().chars().take(ZIP_LENGTH).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_zip() {
        assert_eq!(normalize_zip("75001-1234"), "75001");
        assert_eq!(normalize_zip("750011234"), "75001");
        assert_eq!(normalize_zip(" 75002 "), "75002");
        assert_eq!(normalize_zip("750"), "750");
    }

    #[test]
    fn test_mapping_presets() {
        let dwelling = ColumnMapping::dwelling_limit();
        let cov_a = ColumnMapping::cov_a();

        // Both variants read the same source column
        assert_eq!(dwelling.exposure, cov_a.exposure);
        assert_eq!(dwelling.total_column_name(), "TotalDwellingLimit");
        assert_eq!(cov_a.total_column_name(), "TotalCovA");
    }

    #[test]
    fn test_custom_exposure_column() {
        let mapping = ColumnMapping::default().with_exposure_column("Coverage A");
        assert_eq!(mapping.required_columns()[4], "Coverage A");
        assert_eq!(mapping.exposure_label, "Dwelling Limit");
    }
}
