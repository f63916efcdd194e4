//! CSV export of the filtered book and its summary tables
//!
//! The filtered export carries the cleaned source rows, not the aggregates.
//! It is the only artifact written outside the process.

use crate::error::Result;
use crate::exposure::{AggregationRow, ExposureReport};
use crate::format::format_currency;
use crate::policy::{Book, ColumnMapping, PolicyRecord};
use csv::Writer;
use serde::Serialize;

/// Suggested download file name for the filtered export
pub const EXPORT_FILE_NAME: &str = "Filtered_Book_of_Business.csv";

/// MIME type of every export
pub const EXPORT_MIME_TYPE: &str = "text/csv";

/// Export switches
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExportOptions {
    /// Append a numeric "<label>" column when the label is not already a source column
    pub include_labelled_exposure: bool,

    /// Append a "<label> Formatted" column holding the amount as "$1,234"
    pub include_formatted_exposure: bool,
}

/// Bytes ready for download, with their suggested name and type
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportArtifact {
    pub file_name: String,
    pub mime_type: String,
    #[serde(skip)]
    pub bytes: Vec<u8>,
}

impl ExportArtifact {
    pub fn filtered_book(bytes: Vec<u8>) -> Self {
        Self {
            file_name: EXPORT_FILE_NAME.to_string(),
            mime_type: EXPORT_MIME_TYPE.to_string(),
            bytes,
        }
    }
}

/// Serialize records to UTF-8 CSV using the book's header
pub fn export_csv(book: &Book, records: &[&PolicyRecord]) -> Result<Vec<u8>> {
    export_csv_with(book, records, ExportOptions::default())
}

pub fn export_csv_with(book: &Book, records: &[&PolicyRecord], options: ExportOptions) -> Result<Vec<u8>> {
    let mut writer = Writer::from_writer(Vec::new());

    let label = &book.mapping.exposure_label;
    let add_labelled = options.include_labelled_exposure && !book.headers.iter().any(|h| h == label);

    let mut header: Vec<String> = book.headers.clone();
    if add_labelled {
        header.push(label.clone());
    }
    if options.include_formatted_exposure {
        header.push(format!("{} Formatted", book.mapping.exposure_label));
    }
    writer.write_record(&header)?;

    for record in records {
        let mut cells = record_cells(&book.headers, &book.mapping, record);
        if add_labelled {
            cells.push(record.exposure_amount.to_string());
        }
        if options.include_formatted_exposure {
            cells.push(format_currency(record.exposure_amount));
        }
        writer.write_record(&cells)?;
    }

    Ok(writer.into_inner().map_err(|e| e.into_error())?)
}

/// Filtered export of a report, packaged for download
pub fn export_report(book: &Book, report: &ExposureReport<'_>, options: ExportOptions) -> Result<ExportArtifact> {
    let bytes = export_csv_with(book, &report.filtered, options)?;
    Ok(ExportArtifact::filtered_book(bytes))
}

/// Source cells for a record, aligned to `headers`
///
/// Records built in code rather than loaded carry no source cells; their
/// typed fields are placed under the mapped columns instead.
fn record_cells(headers: &[String], mapping: &ColumnMapping, record: &PolicyRecord) -> Vec<String> {
    if record.columns.len() == headers.len() {
        return record.columns.clone();
    }

    headers
        .iter()
        .map(|h| {
            if *h == mapping.city {
                record.customer_city.clone()
            } else if *h == mapping.zip {
                record.customer_zip.clone()
            } else if *h == mapping.company {
                record.parent_company.clone()
            } else if *h == mapping.line_of_business {
                record.line_of_business.clone()
            } else if *h == mapping.exposure {
                record.exposure_amount.to_string()
            } else if *h == mapping.latitude {
                record.latitude.to_string()
            } else if *h == mapping.longitude {
                record.longitude.to_string()
            } else {
                String::new()
            }
        })
        .collect()
}

/// Summary table as CSV: `<key_column>,Total<Label>,PolicyCount`
pub fn summary_csv(rows: &[AggregationRow], key_column: &str, mapping: &ColumnMapping) -> Result<Vec<u8>> {
    let mut writer = Writer::from_writer(Vec::new());
    writer.write_record([key_column, mapping.total_column_name().as_str(), "PolicyCount"])?;

    for row in rows {
        writer.write_record([
            row.key.clone(),
            row.total_exposure.to_string(),
            row.policy_count.to_string(),
        ])?;
    }

    Ok(writer.into_inner().map_err(|e| e.into_error())?)
}
