//! Turn matched rows into labeled, serializable records.
//!
//! # Output Format
//!
//! ```text
//! city,country,x1,x54                    [
//! Tokyo,Japan,8.50,NaN          →          { "city": "Tokyo",
//!                                            "country": "Japan",
//!                                            "Meal, Inexpensive Restaurant (USD)": 8.5,
//!                                            "Average Monthly Net Salary (After Tax) (USD)": null }
//!                                        ]
//! ```
//!
//! Keys follow the column order of the source file. Only indicator columns
//! are renamed; everything else keeps its header and value.

use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::dataset::{Column, Row, Table};
use crate::labels::Language;

/// Output key for a column in the given language.
pub fn output_key(column: &Column, language: Language) -> String {
    match column {
        Column::Indicator(key) => key.label(language).to_string(),
        other => other.name(),
    }
}

/// Matched rows ready to be serialized as a JSON array of flat objects.
#[derive(Debug, Clone)]
pub struct LabeledRecords {
    table: Table,
    language: Language,
}

impl LabeledRecords {
    pub fn new(table: Table, language: Language) -> Self {
        Self { table, language }
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Iterate the records one row at a time.
    pub fn iter(&self) -> impl Iterator<Item = LabeledRecord<'_>> {
        self.table.rows.iter().map(move |row| LabeledRecord {
            columns: &self.table.columns,
            row,
            language: self.language,
        })
    }

    /// Convert into `serde_json` values, e.g. for the CLI.
    pub fn to_json(&self) -> serde_json::Result<Value> {
        serde_json::to_value(self)
    }
}

impl Serialize for LabeledRecords {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for record in self.iter() {
            seq.serialize_element(&record)?;
        }
        seq.end()
    }
}

/// A single row seen through the label table.
#[derive(Debug, Clone, Copy)]
pub struct LabeledRecord<'a> {
    columns: &'a [Column],
    row: &'a Row,
    language: Language,
}

impl Serialize for LabeledRecord<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.columns.len()))?;
        for (column, cell) in self.columns.iter().zip(&self.row.cells) {
            map.serialize_entry(&output_key(column, self.language), cell)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::parse_str;
    use crate::labels::{key_for_label, IndicatorKey};

    fn records(csv: &str, language: Language) -> Value {
        let table = parse_str(csv).unwrap();
        LabeledRecords::new(table, language).to_json().unwrap()
    }

    #[test]
    fn test_indicators_are_renamed_in_english() {
        let json = records("city,country,x1,x54\nTokyo,Japan,8.50,NaN\n", Language::En);
        let record = &json[0];

        assert_eq!(record["city"], "Tokyo");
        assert_eq!(record["country"], "Japan");
        assert_eq!(record["Meal, Inexpensive Restaurant (USD)"], 8.5);
        assert!(record["Average Monthly Net Salary (After Tax) (USD)"].is_null());
        assert!(record.get("x1").is_none());
    }

    #[test]
    fn test_indicators_are_renamed_in_german() {
        let json = records("city,country,x1\nBerlin,Germany,12\n", Language::De);
        assert_eq!(json[0]["Mahlzeit, günstiges Restaurant (USD)"], 12.0);
    }

    #[test]
    fn test_non_indicator_columns_pass_through() {
        let json = records(
            "city,country,x1,data_quality\n New-York ,United States,20,1\n",
            Language::En,
        );
        assert_eq!(json[0]["city"], " New-York ");
        assert_eq!(json[0]["data_quality"], 1);
    }

    #[test]
    fn test_key_order_follows_columns() {
        let table = parse_str("country,city,x2,x1\nJapan,Tokyo,40,8.5\n").unwrap();
        let out = serde_json::to_string(&LabeledRecords::new(table, Language::En)).unwrap();

        let country = out.find("\"country\"").unwrap();
        let city = out.find("\"city\"").unwrap();
        let x2 = out.find(IndicatorKey::new(2).unwrap().label(Language::En)).unwrap();
        let x1 = out.find(IndicatorKey::new(1).unwrap().label(Language::En)).unwrap();
        assert!(country < city && city < x2 && x2 < x1);
    }

    #[test]
    fn test_output_never_contains_non_finite_literals() {
        let json = records("city,country,x1,x2,x3\nA,B,NaN,inf,-inf\n", Language::En);
        for n in 1..=3 {
            let label = IndicatorKey::new(n).unwrap().label(Language::En);
            assert!(json[0][label].is_null(), "{label} should be null");
        }
    }

    #[test]
    fn test_output_keys_map_back_to_indicators() {
        for language in Language::ALL {
            for key in IndicatorKey::all() {
                let label = output_key(&Column::Indicator(key), language);
                assert_eq!(key_for_label(&label, language), Some(key));
            }
        }
    }
}
