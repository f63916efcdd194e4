//! Load the raw book of business from CSV
//!
//! Rows are read untyped. Typing and validation happen in [`super::clean`],
//! so a malformed row never fails the load; only an unreadable source does.

use super::clean::{clean, Book};
use super::ColumnMapping;
use crate::error::{ExposureError, Result};
use csv::ReaderBuilder;
use log::{info, warn};
use std::collections::BTreeSet;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Default location of the geocoded book of business
pub const DEFAULT_BOOK_PATH: &str = "Book_with_Coordinates.csv";

/// One untyped source row; `None` marks an empty or absent cell
pub type RawRow = Vec<Option<String>>;

/// Header plus untyped rows, exactly as read from the source
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawBook {
    pub headers: Vec<String>,
    pub rows: Vec<RawRow>,

    /// (row, column) cells that were not valid UTF-8; their text is lossy
    pub undecodable: BTreeSet<(usize, usize)>,
}

impl RawBook {
    /// Position of a column in the header row
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    pub fn is_undecodable(&self, row: usize, column: usize) -> bool {
        self.undecodable.contains(&(row, column))
    }
}

/// Anything that can supply a raw book
pub trait BookSource {
    fn load(&self) -> Result<RawBook>;
}

/// A CSV file on disk
#[derive(Debug, Clone)]
pub struct CsvFile {
    path: PathBuf,
}

impl CsvFile {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl BookSource for CsvFile {
    fn load(&self) -> Result<RawBook> {
        let file = File::open(&self.path)?;
        let raw = load_raw_from_reader(file)?;
        info!(
            "Loaded {} rows from {}",
            raw.rows.len(),
            self.path.display()
        );
        Ok(raw)
    }
}

/// Load a raw book from any reader (file, string buffer, network stream)
pub fn load_raw_from_reader<R: Read>(reader: R) -> Result<RawBook> {
    let mut csv_reader = ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers: Vec<String> = csv_reader
        .headers()?
        .iter()
        .map(|h| h.to_string())
        .collect();

    if headers.iter().all(|h| h.is_empty()) {
        return Err(ExposureError::EmptyHeader);
    }

    // Rows are decoded cell by cell so one bad byte only taints its own cell
    let mut rows = Vec::new();
    let mut undecodable = BTreeSet::new();
    for (row_idx, result) in csv_reader.byte_records().enumerate() {
        let record = result?;
        let row: RawRow = (0..headers.len())
            .map(|i| {
                let bytes = record.get(i).filter(|cell| !cell.is_empty())?;
                match std::str::from_utf8(bytes) {
                    Ok(cell) => Some(cell.to_string()),
                    Err(_) => {
                        undecodable.insert((row_idx, i));
                        Some(String::from_utf8_lossy(bytes).into_owned())
                    }
                }
            })
            .collect();
        rows.push(row);
    }

    if !undecodable.is_empty() {
        warn!("{} cells were not valid UTF-8", undecodable.len());
    }

    Ok(RawBook {
        headers,
        rows,
        undecodable,
    })
}

/// Load and clean a book from any source
pub fn load_book<S: BookSource>(source: &S, mapping: &ColumnMapping) -> Result<Book> {
    let raw = source.load()?;
    clean(&raw, mapping)
}

/// Load and clean a book from a CSV path
pub fn load_book_from_path<P: AsRef<Path>>(path: P, mapping: &ColumnMapping) -> Result<Book> {
    load_book(&CsvFile::new(path), mapping)
}

/// Load and clean a book from any reader
pub fn load_book_from_reader<R: Read>(reader: R, mapping: &ColumnMapping) -> Result<Book> {
    let raw = load_raw_from_reader(reader)?;
    clean(&raw, mapping)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
Cust City,Cust Zip,Parent Company,Policy Type LOB,Dwelling Limit,Latitude,Longitude,Agent
Dallas,75001-1234,Acme,Home,500000,32.78,-96.80,Smith
Dallas,75002,Acme,Home,,32.78,-96.80
";

    #[test]
    fn test_load_raw_rows() {
        let raw = load_raw_from_reader(SAMPLE.as_bytes()).expect("Failed to load");
        assert_eq!(raw.headers.len(), 8);
        assert_eq!(raw.rows.len(), 2);
        assert_eq!(raw.column_index("Dwelling Limit"), Some(4));

        // Empty and missing trailing cells are both None
        assert_eq!(raw.rows[1][4], None);
        assert_eq!(raw.rows[1][7], None);
        assert_eq!(raw.rows[0][7].as_deref(), Some("Smith"));
    }

    #[test]
    fn test_empty_source_is_ingestion_error() {
        let result = load_raw_from_reader("".as_bytes());
        assert!(matches!(result, Err(ExposureError::EmptyHeader)));
    }

    #[test]
    fn test_load_book_drops_defects() {
        let book = load_book_from_reader(SAMPLE.as_bytes(), &ColumnMapping::dwelling_limit())
            .expect("Failed to load book");
        assert_eq!(book.records.len(), 1);
        assert_eq!(book.dropped_rows, 1);
        assert_eq!(book.records[0].customer_zip, "75001");
    }

    #[test]
    fn test_invalid_utf8_row_is_dropped() {
        let mut source = b"Cust City,Cust Zip,Parent Company,Policy Type LOB,Dwelling Limit,Latitude,Longitude\n\
Dallas,75001,Acme,Home,500000,32.78,-96.8\n"
            .to_vec();
        source.extend_from_slice(b"Montr\xe9al,75002,Acme,Home,100,32.78,-96.8\n");

        let book = load_book_from_reader(source.as_slice(), &ColumnMapping::dwelling_limit())
            .expect("A bad row must not fail the load");
        assert_eq!(book.records.len(), 1);
        assert_eq!(book.dropped_rows, 1);
        assert_eq!(book.records[0].customer_city, "Dallas");
    }

    #[test]
    fn test_invalid_utf8_extra_column_is_kept_lossy() {
        let mut source = b"Cust City,Cust Zip,Parent Company,Policy Type LOB,Dwelling Limit,Latitude,Longitude,Agent\n".to_vec();
        source.extend_from_slice(b"Dallas,75001,Acme,Home,500000,32.78,-96.8,Ren\xe9\n");

        let raw = load_raw_from_reader(source.as_slice()).expect("Failed to load");
        assert!(raw.is_undecodable(0, 7));
        assert_eq!(raw.rows[0][7].as_deref(), Some("Ren\u{FFFD}"));

        let book = clean(&raw, &ColumnMapping::dwelling_limit()).expect("Failed to clean");
        assert_eq!(book.records.len(), 1);
    }

    #[test]
    fn test_invalid_utf8_header_is_ingestion_error() {
        let source: &[u8] = b"Cust City,Montr\xe9al\nDallas,75001\n";
        assert!(matches!(load_raw_from_reader(source), Err(ExposureError::Csv(_))));
    }

    #[test]
    fn test_missing_file() {
        let result = CsvFile::new("does/not/exist.csv").load();
        assert!(matches!(result, Err(ExposureError::Io(_))));
    }
}
