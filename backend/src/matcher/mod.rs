//! Request validation and row matching.
//!
//! Incoming request bodies are validated into a [`LookupKey`] before the
//! dataset is touched. Matching compares normalized strings only; the rows
//! themselves are never modified.

use serde_json::Value;

use crate::dataset::{Row, Table};
use crate::error::{LookupError, LookupResult};
use crate::labels::Language;

/// Which fields a request must carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryShape {
    /// `{country}`: every row of one country.
    Country,
    /// `{city, country}`: one city within a country.
    City,
}

/// Canonical form used for comparisons: trimmed, lower-cased, hyphens as spaces.
///
/// Idempotent: `normalize(&normalize(s)) == normalize(s)`.
pub fn normalize(value: &str) -> String {
    value.trim().to_lowercase().replace('-', " ").trim().to_string()
}

/// Validated lookup parameters.
///
/// The raw `city`/`country` strings are kept so error messages can echo the
/// caller's input verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupKey {
    pub city: Option<String>,
    pub country: String,
    pub language: Language,
    city_key: Option<String>,
    country_key: String,
}

impl LookupKey {
    pub fn new(city: Option<&str>, country: &str, language: Language) -> Self {
        Self {
            city: city.map(str::to_string),
            country: country.to_string(),
            language,
            city_key: city.map(normalize),
            country_key: normalize(country),
        }
    }

    /// Validate a JSON request body.
    ///
    /// Checks run in order and the first failure wins: `city` (city queries
    /// only), then `country`, then `language`. An omitted or null `language`
    /// selects `default_language`.
    pub fn from_body(
        body: &Value,
        shape: QueryShape,
        default_language: Language,
    ) -> LookupResult<Self> {
        let obj = body
            .as_object()
            .ok_or_else(|| LookupError::invalid_input("body"))?;

        let city = match shape {
            QueryShape::City => Some(required_string(obj.get("city"), "city")?),
            QueryShape::Country => None,
        };
        let country = required_string(obj.get("country"), "country")?;

        let language = match obj.get("language") {
            None | Some(Value::Null) => default_language,
            Some(Value::String(code)) => code.parse::<Language>()?,
            Some(other) => return Err(LookupError::UnsupportedLanguage(other.to_string())),
        };

        Ok(Self::new(city, country, language))
    }

    /// Whether a row satisfies this key.
    pub fn matches(&self, row: &Row) -> bool {
        if normalize(&row.country) != self.country_key {
            return false;
        }
        match (&self.city_key, &row.city) {
            (None, _) => true,
            (Some(wanted), Some(city)) => normalize(city) == *wanted,
            (Some(_), None) => false,
        }
    }

    fn not_found(&self) -> LookupError {
        LookupError::NotFound {
            city: self.city.clone(),
            country: self.country.clone(),
        }
    }
}

fn required_string<'a>(value: Option<&'a Value>, field: &str) -> LookupResult<&'a str> {
    match value {
        Some(Value::String(s)) if !s.trim().is_empty() => Ok(s.as_str()),
        _ => Err(LookupError::invalid_input(field)),
    }
}

/// Select the rows matching `key`, in file order.
///
/// An empty selection is reported as [`LookupError::NotFound`].
pub fn find_matches(table: Table, key: &LookupKey) -> LookupResult<Table> {
    let matched = table.filter(|row| key.matches(row));
    if matched.is_empty() {
        return Err(key.not_found());
    }
    Ok(matched)
}
