//! Policy records, book ingestion and cleaning

mod data;
mod clean;
pub mod loader;

pub use data::{
    ColumnMapping, PolicyRecord, normalize_zip, ZIP_LENGTH,
    DEFAULT_CITY_COLUMN, DEFAULT_ZIP_COLUMN, DEFAULT_COMPANY_COLUMN, DEFAULT_LOB_COLUMN,
    DEFAULT_EXPOSURE_COLUMN, DEFAULT_LATITUDE_COLUMN, DEFAULT_LONGITUDE_COLUMN,
};
pub use clean::{clean, parse_exposure, parse_coordinate, Book};
pub use loader::{
    BookSource, CsvFile, RawBook, RawRow, load_raw_from_reader, load_book,
    load_book_from_path, load_book_from_reader, DEFAULT_BOOK_PATH,
};
