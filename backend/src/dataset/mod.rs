//! Dataset loader.
//!
//! Reads the cost-of-living CSV into a [`Table`]. Nothing is cached: every
//! call re-reads and re-parses the file, so responses always reflect what is
//! on disk at request time.
//!
//! # Example
//!
//! ```rust,ignore
//! use costliving::dataset::DatasetLoader;
//!
//! let loader = DatasetLoader::new("/srv/data/cost-of-living_v2.csv");
//! let table = loader.load().await?;
//! println!("{} rows", table.len());
//! ```

pub mod encoding;
pub mod table;

use std::path::{Path, PathBuf};

use crate::error::{DatasetError, DatasetResult};

pub use encoding::{decode_auto, decode_content, detect_encoding};
pub use table::{Cell, Column, Row, Table};

/// Loads the dataset from a fixed path handed in at construction.
#[derive(Debug, Clone)]
pub struct DatasetLoader {
    path: PathBuf,
}

impl DatasetLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the source file is currently present.
    pub async fn exists(&self) -> bool {
        tokio::fs::metadata(&self.path)
            .await
            .map(|meta| meta.is_file())
            .unwrap_or(false)
    }

    /// Read and parse the whole file.
    pub async fn load(&self) -> DatasetResult<Table> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|e| DatasetError::unavailable(&self.path, e))?;
        parse_bytes(&bytes)
    }
}

/// Parse raw file contents, detecting the text encoding.
pub fn parse_bytes(bytes: &[u8]) -> DatasetResult<Table> {
    let content = decode_auto(bytes);
    parse_str(&content)
}

/// Parse comma-separated text with a header row.
///
/// Indicator columns (`x1..x55`) are parsed as numbers; empty, NaN, infinite
/// and unparseable values become [`Cell::Null`]. Short rows are padded with
/// nulls.
pub fn parse_str(content: &str) -> DatasetResult<Table> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(content.as_bytes());

    let columns: Vec<Column> = reader.headers()?.iter().map(Column::from_header).collect();

    let country_idx = columns
        .iter()
        .position(|c| *c == Column::Country)
        .ok_or_else(|| DatasetError::Malformed("missing 'country' column".into()))?;
    let city_idx = columns.iter().position(|c| *c == Column::City);

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;

        // Skip blank lines.
        if record.iter().all(|field| field.trim().is_empty()) {
            continue;
        }

        let cells: Vec<Cell> = columns
            .iter()
            .enumerate()
            .map(|(i, column)| {
                let raw = record.get(i).unwrap_or("");
                match column {
                    Column::Country | Column::City => Cell::parse_text(raw),
                    Column::Indicator(_) => Cell::parse_indicator(raw),
                    Column::Other(_) => Cell::parse_other(raw),
                }
            })
            .collect();

        let country = record.get(country_idx).unwrap_or("").to_string();
        let city = city_idx
            .and_then(|idx| record.get(idx))
            .filter(|c| !c.trim().is_empty())
            .map(str::to_string);

        rows.push(Row {
            country,
            city,
            cells,
        });
    }

    Ok(Table { columns, rows })
}
