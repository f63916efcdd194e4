//! Dashboard runner for repeated filter evaluations
//!
//! Loads and cleans the book once, then evaluates any number of filter
//! selections against the same immutable records.

use crate::error::Result;
use crate::export::{export_report, ExportArtifact, ExportOptions};
use crate::exposure::{ExposureConfig, ExposureEngine, ExposureReport, FilterOptions, FilterSelection};
use crate::map::map_layer;
use crate::policy::{load_book, Book, BookSource, ColumnMapping, CsvFile};
use serde_json::Value;
use std::path::Path;

/// Pre-loaded book plus engine
///
/// # Example
/// ```ignore
/// let dashboard = Dashboard::from_csv("Book_with_Coordinates.csv", ColumnMapping::dwelling_limit())?;
///
/// let selection = FilterSelection::new(["Acme"], ["Home"]);
/// let report = dashboard.evaluate(&selection);
/// let csv = dashboard.export(&selection, ExportOptions::default())?;
/// ```
#[derive(Debug, Clone)]
pub struct Dashboard {
    book: Book,
    engine: ExposureEngine,
}

impl Dashboard {
    /// Create a dashboard over an already cleaned book
    pub fn new(book: Book, config: ExposureConfig) -> Self {
        Self {
            book,
            engine: ExposureEngine::new(config),
        }
    }

    /// Load from any source with default engine configuration
    pub fn from_source<S: BookSource>(source: &S, mapping: ColumnMapping) -> Result<Self> {
        let book = load_book(source, &mapping)?;
        Ok(Self::new(book, ExposureConfig::default()))
    }

    /// Load from a CSV file with default engine configuration
    pub fn from_csv<P: AsRef<Path>>(path: P, mapping: ColumnMapping) -> Result<Self> {
        Self::from_source(&CsvFile::new(path), mapping)
    }

    /// Replace the engine configuration
    pub fn with_config(mut self, config: ExposureConfig) -> Self {
        self.engine = ExposureEngine::new(config);
        self
    }

    pub fn book(&self) -> &Book {
        &self.book
    }

    pub fn mapping(&self) -> &ColumnMapping {
        &self.book.mapping
    }

    /// Selectable carriers and lines of business
    pub fn options(&self) -> FilterOptions {
        FilterOptions::from_records(&self.book.records)
    }

    /// Everything selected
    pub fn default_selection(&self) -> FilterSelection {
        FilterSelection::all(&self.book.records)
    }

    pub fn evaluate(&self, selection: &FilterSelection) -> ExposureReport<'_> {
        self.engine.evaluate(&self.book.records, selection)
    }

    /// Filtered records as a downloadable CSV
    pub fn export(&self, selection: &FilterSelection, options: ExportOptions) -> Result<ExportArtifact> {
        let report = self.evaluate(selection);
        export_report(&self.book, &report, options)
    }

    /// Map markers for the selection as GeoJSON
    pub fn map_layer(&self, selection: &FilterSelection) -> Value {
        let report = self.evaluate(selection);
        map_layer(&report.geo_clusters, &self.book.mapping.exposure_label)
    }
}
