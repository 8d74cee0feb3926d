//! Error types for the cost-of-living lookup service.
//!
//! - [`DatasetError`] - Loading the CSV dataset from disk
//! - [`LookupError`] - Everything that can go wrong while answering a query
//! - [`ConfigError`] - Invalid environment or CLI configuration
//!
//! Error conversion is automatic via `From` implementations,
//! allowing `?` to work across error boundaries.

use std::path::PathBuf;

use thiserror::Error;

// =============================================================================
// Dataset Errors
// =============================================================================

/// Errors raised by the dataset loader.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// The source file is missing or cannot be read.
    #[error("Dataset not available at '{}': {reason}", .path.display())]
    Unavailable { path: PathBuf, reason: String },

    /// The file exists but is not a usable table.
    #[error("Malformed dataset: {0}")]
    Malformed(String),
}

impl DatasetError {
    pub fn unavailable(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::Unavailable {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

impl From<csv::Error> for DatasetError {
    fn from(err: csv::Error) -> Self {
        match err.position() {
            Some(pos) => Self::Malformed(format!("line {}: {}", pos.line(), err)),
            None => Self::Malformed(err.to_string()),
        }
    }
}

// =============================================================================
// Lookup Errors
// =============================================================================

/// Errors raised while answering a lookup request.
#[derive(Debug, Error)]
pub enum LookupError {
    /// Required field missing, empty or not a string.
    #[error("Invalid or missing '{field}' field.")]
    InvalidInput { field: String },

    /// Language selector outside the supported set.
    #[error("Unsupported language '{0}'. Supported languages: en, de.")]
    UnsupportedLanguage(String),

    /// Well-formed query without any matching row.
    #[error("{}", not_found_message(.city.as_deref(), .country))]
    NotFound {
        city: Option<String>,
        country: String,
    },

    /// Dataset could not be loaded.
    #[error(transparent)]
    Dataset(#[from] DatasetError),
}

fn not_found_message(city: Option<&str>, country: &str) -> String {
    match city {
        Some(city) => format!("No data found for city: '{}' in country: '{}'", city, country),
        None => format!("No data for country: '{}'", country),
    }
}

impl LookupError {
    pub fn invalid_input(field: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.into(),
        }
    }

    /// Stable machine-readable code for the error body.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidInput { .. } => "invalid_input",
            Self::UnsupportedLanguage(_) => "unsupported_language",
            Self::NotFound { .. } => "not_found",
            Self::Dataset(DatasetError::Unavailable { .. }) => "dataset_unavailable",
            Self::Dataset(DatasetError::Malformed(_)) => "malformed_dataset",
        }
    }

    /// True when the caller sent something wrong, false for provisioning errors.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, Self::Dataset(_))
    }
}

// =============================================================================
// Configuration Errors
// =============================================================================

/// Errors while building the service configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {var}: {message}")]
    InvalidVar { var: String, message: String },

    #[error("Cannot resolve data root: {0}")]
    DataRoot(#[from] std::io::Error),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for loader operations.
pub type DatasetResult<T> = Result<T, DatasetError>;

/// Result type for lookup operations.
pub type LookupResult<T> = Result<T, LookupError>;

/// Result type for configuration.
pub type ConfigResult<T> = Result<T, ConfigError>;
