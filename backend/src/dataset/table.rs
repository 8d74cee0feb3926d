//! In-memory representation of the cost-of-living table.

use serde::{Serialize, Serializer};

use crate::labels::IndicatorKey;

/// Role of a source column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Column {
    Country,
    City,
    Indicator(IndicatorKey),
    /// Any other column (e.g. `data_quality`), passed through untouched.
    Other(String),
}

impl Column {
    pub fn from_header(header: &str) -> Self {
        match header.trim() {
            "country" => Column::Country,
            "city" => Column::City,
            other => match IndicatorKey::parse(other) {
                Some(key) => Column::Indicator(key),
                None => Column::Other(other.to_string()),
            },
        }
    }

    /// Header as it appears in the source file.
    pub fn name(&self) -> String {
        match self {
            Column::Country => "country".to_string(),
            Column::City => "city".to_string(),
            Column::Indicator(key) => key.to_string(),
            Column::Other(name) => name.clone(),
        }
    }
}

/// A single cell value.
///
/// `Number` only ever holds finite values; use [`Cell::number`] to build one.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Null,
    Text(String),
    Integer(i64),
    Number(f64),
}

impl Cell {
    /// Finite floats become `Number`, NaN and infinities become `Null`.
    pub fn number(value: f64) -> Self {
        if value.is_finite() {
            Cell::Number(value)
        } else {
            Cell::Null
        }
    }

    /// Parse an indicator cell. Empty or unparseable input is `Null`.
    pub fn parse_indicator(raw: &str) -> Self {
        raw.trim()
            .parse::<f64>()
            .map(Cell::number)
            .unwrap_or(Cell::Null)
    }

    /// Parse a pass-through cell, inferring integer, float or text.
    pub fn parse_other(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Cell::Null;
        }
        if let Ok(i) = trimmed.parse::<i64>() {
            return Cell::Integer(i);
        }
        match trimmed.parse::<f64>() {
            Ok(f) => Cell::number(f),
            Err(_) => Cell::Text(raw.to_string()),
        }
    }

    /// Text cell, with empty input treated as missing.
    pub fn parse_text(raw: &str) -> Self {
        if raw.trim().is_empty() {
            Cell::Null
        } else {
            Cell::Text(raw.to_string())
        }
    }

}

impl Serialize for Cell {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Cell::Null => serializer.serialize_none(),
            Cell::Text(s) => serializer.serialize_str(s),
            Cell::Integer(i) => serializer.serialize_i64(*i),
            Cell::Number(f) => serializer.serialize_f64(*f),
        }
    }
}

/// One record per (country, city) pair.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    /// Country exactly as stored in the file.
    pub country: String,
    /// City exactly as stored in the file, if the table has one.
    pub city: Option<String>,
    /// Cells aligned with [`Table::columns`].
    pub cells: Vec<Cell>,
}

/// Parsed dataset: column layout plus rows in file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub columns: Vec<Column>,
    pub rows: Vec<Row>,
}

impl Table {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Keep only the rows accepted by `predicate`, preserving order.
    pub fn filter<F>(self, mut predicate: F) -> Table
    where
        F: FnMut(&Row) -> bool,
    {
        Table {
            columns: self.columns,
            rows: self.rows.into_iter().filter(|row| predicate(row)).collect(),
        }
    }
}
