//! Validate raw rows into policy records
//!
//! A row is eligible only when all seven required fields are present, the
//! exposure is a finite non-negative number and both coordinates parse.
//! Anything else is dropped, never zero-filled.

use super::loader::RawBook;
use super::{normalize_zip, ColumnMapping, PolicyRecord};
use crate::error::{ExposureError, Result};
use log::info;

/// A cleaned book: source header, mapping and the eligible records
#[derive(Debug, Clone)]
pub struct Book {
    /// Source header, in order; every record's `columns` aligns with it
    pub headers: Vec<String>,

    /// Column mapping the book was cleaned with
    pub mapping: ColumnMapping,

    /// Records that passed validation, in source order
    pub records: Vec<PolicyRecord>,

    /// Number of source rows excluded as row-level defects
    pub dropped_rows: usize,
}

impl Book {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Resolved header positions of the required fields
#[derive(Debug, Clone, Copy)]
struct FieldIndex {
    city: usize,
    zip: usize,
    company: usize,
    line_of_business: usize,
    exposure: usize,
    latitude: usize,
    longitude: usize,
}

impl FieldIndex {
    fn required(&self) -> [usize; 7] {
        [
            self.city,
            self.zip,
            self.company,
            self.line_of_business,
            self.exposure,
            self.latitude,
            self.longitude,
        ]
    }

    fn resolve(raw: &RawBook, mapping: &ColumnMapping) -> Result<Self> {
        let find = |column: &str| {
            raw.column_index(column)
                .ok_or_else(|| ExposureError::MissingColumn {
                    column: column.to_string(),
                })
        };

        Ok(Self {
            city: find(&mapping.city)?,
            zip: find(&mapping.zip)?,
            company: find(&mapping.company)?,
            line_of_business: find(&mapping.line_of_business)?,
            exposure: find(&mapping.exposure)?,
            latitude: find(&mapping.latitude)?,
            longitude: find(&mapping.longitude)?,
        })
    }
}

/// Parse an exposure amount; `None` for anything non-numeric, non-finite or negative
pub fn parse_exposure(value: &str) -> Option<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v >= 0.0)
}

/// Parse a coordinate in decimal degrees
pub fn parse_coordinate(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Validate every raw row, keeping eligible records in source order
///
/// Rows with an undecodable required cell are dropped like any other defect.
/// Fails only when a required column is missing from the header.
pub fn clean(raw: &RawBook, mapping: &ColumnMapping) -> Result<Book> {
    let index = FieldIndex::resolve(raw, mapping)?;

    let records: Vec<PolicyRecord> = raw
        .rows
        .iter()
        .enumerate()
        .filter(|(row_idx, _)| {
            !index
                .required()
                .iter()
                .any(|&column| raw.is_undecodable(*row_idx, column))
        })
        .filter_map(|(_, row)| clean_row(row, &index))
        .collect();

    let dropped_rows = raw.rows.len() - records.len();
    info!(
        "Cleaned book: {} eligible records, {} rows excluded",
        records.len(),
        dropped_rows
    );

    Ok(Book {
        headers: raw.headers.clone(),
        mapping: mapping.clone(),
        records,
        dropped_rows,
    })
}

fn clean_row(row: &[Option<String>], index: &FieldIndex) -> Option<PolicyRecord> {
    let cell = |i: usize| row.get(i).and_then(|c| c.as_deref()).map(str::trim);

    let city = cell(index.city).filter(|s| !s.is_empty())?;
    let zip = cell(index.zip).filter(|s| !s.is_empty())?;
    let company = cell(index.company).filter(|s| !s.is_empty())?;
    let line_of_business = cell(index.line_of_business).filter(|s| !s.is_empty())?;
    let exposure = cell(index.exposure).and_then(parse_exposure)?;
    let latitude = cell(index.latitude).and_then(parse_coordinate)?;
    let longitude = cell(index.longitude).and_then(parse_coordinate)?;

    let customer_zip = normalize_zip(zip);

    let mut columns: Vec<String> = row
        .iter()
        .map(|c| c.clone().unwrap_or_default())
        .collect();
    columns[index.zip] = customer_zip.clone();
    columns[index.exposure] = exposure.to_string();

    Some(PolicyRecord {
        customer_city: city.to_string(),
        customer_zip,
        parent_company: company.to_string(),
        line_of_business: line_of_business.to_string(),
        exposure_amount: exposure,
        latitude,
        longitude,
        columns,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::load_raw_from_reader;

    fn raw(body: &str) -> RawBook {
        let header = "Cust City,Cust Zip,Parent Company,Policy Type LOB,Dwelling Limit,Latitude,Longitude\n";
        load_raw_from_reader(format!("{}{}", header, body).as_bytes()).expect("Failed to load")
    }

    #[test]
    fn test_parse_exposure() {
        assert_eq!(parse_exposure("500000"), Some(500_000.0));
        assert_eq!(parse_exposure(" 1234.5 "), Some(1234.5));
        assert_eq!(parse_exposure("0"), Some(0.0));
        assert_eq!(parse_exposure("N/A"), None);
        assert_eq!(parse_exposure("$1,000"), None);
        assert_eq!(parse_exposure("-5"), None);
        assert_eq!(parse_exposure("NaN"), None);
        assert_eq!(parse_exposure("inf"), None);
    }

    #[test]
    fn test_non_numeric_exposure_is_excluded() {
        let book = clean(
            &raw("Austin,78701,Acme,Home,N/A,30.27,-97.74\nAustin,78701,Acme,Home,250000,30.27,-97.74\n"),
            &ColumnMapping::dwelling_limit(),
        )
        .expect("Failed to clean");

        // The N/A row is gone, not coerced to zero
        assert_eq!(book.records.len(), 1);
        assert_eq!(book.records[0].exposure_amount, 250_000.0);
        assert_eq!(book.dropped_rows, 1);
    }

    #[test]
    fn test_missing_fields_are_excluded() {
        let book = clean(
            &raw(concat!(
                ",78701,Acme,Home,100,30.27,-97.74\n",
                "Austin,,Acme,Home,100,30.27,-97.74\n",
                "Austin,78701,,Home,100,30.27,-97.74\n",
                "Austin,78701,Acme,,100,30.27,-97.74\n",
                "Austin,78701,Acme,Home,,30.27,-97.74\n",
                "Austin,78701,Acme,Home,100,,-97.74\n",
                "Austin,78701,Acme,Home,100,30.27\n",
                "Austin,78701,Acme,Home,100,north,-97.74\n",
                "Austin,78701,Acme,Home,100,30.27,-97.74\n",
            )),
            &ColumnMapping::dwelling_limit(),
        )
        .expect("Failed to clean");

        assert_eq!(book.records.len(), 1);
        assert_eq!(book.dropped_rows, 8);
    }

    #[test]
    fn test_zip_plus_four_is_truncated() {
        let book = clean(
            &raw("Dallas,75001-1234,Acme,Home,500000,32.78,-96.80\n"),
            &ColumnMapping::dwelling_limit(),
        )
        .expect("Failed to clean");

        let record = &book.records[0];
        assert_eq!(record.customer_zip, "75001");
        // Normalized value also lands in the exported column set
        assert_eq!(record.columns[1], "75001");
        assert_eq!(record.columns[4], "500000");
    }

    #[test]
    fn test_missing_required_column() {
        let raw = load_raw_from_reader("Cust City,Cust Zip\nDallas,75001\n".as_bytes())
            .expect("Failed to load");
        let result = clean(&raw, &ColumnMapping::dwelling_limit());
        match result {
            Err(ExposureError::MissingColumn { column }) => assert_eq!(column, "Parent Company"),
            other => panic!("Expected MissingColumn, got {:?}", other),
        }
    }

    #[test]
    fn test_custom_exposure_column() {
        let raw = load_raw_from_reader(
            "Cust City,Cust Zip,Parent Company,Policy Type LOB,CovA,Latitude,Longitude\nWaco,76701,Acme,Home,410000,31.55,-97.15\n"
                .as_bytes(),
        )
        .expect("Failed to load");
        let mapping = ColumnMapping::cov_a().with_exposure_column("CovA");
        let book = clean(&raw, &mapping).expect("Failed to clean");
        assert_eq!(book.records[0].exposure_amount, 410_000.0);
    }
}
