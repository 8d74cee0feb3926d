//! # Cost of Living - read-only lookup API
//!
//! Serves cost-of-living indicators per city and country from a CSV file that
//! is re-read on every request.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   Request   │────▶│   Matcher   │────▶│   Dataset   │────▶│   Shaper    │
//! │ (JSON body) │     │ (validate)  │     │ (CSV, fresh)│     │ (labels)    │
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use costliving::{DatasetLoader, Language, LookupService};
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() {
//!     let service = LookupService::new(DatasetLoader::new("data/cost-of-living_v2.csv"), Language::En);
//!     let records = service.city_data(&json!({"city": "Tokyo", "country": "Japan"})).await.unwrap();
//!     println!("{}", serde_json::to_string_pretty(&records).unwrap());
//! }
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Error types
//! - [`config`] - Environment configuration
//! - [`dataset`] - CSV loading
//! - [`labels`] - Indicator labels (en/de)
//! - [`matcher`] - Request validation and row matching
//! - [`shaper`] - Labeled output records
//! - [`service`] - Request-scoped lookup pipeline
//! - [`api`] - HTTP API server

// Core modules
pub mod error;
pub mod config;

// Data
pub mod dataset;
pub mod labels;

// Lookup
pub mod matcher;
pub mod shaper;
pub mod service;

// HTTP API
pub mod api;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{ConfigError, DatasetError, LookupError};

pub use config::ServiceConfig;

pub use dataset::{parse_bytes, parse_str, Cell, Column, DatasetLoader, Row, Table};

pub use labels::{key_for_label, label_table, IndicatorKey, Language, INDICATOR_COUNT};

pub use matcher::{find_matches, normalize, LookupKey, QueryShape};

pub use shaper::{LabeledRecord, LabeledRecords};

pub use service::{HealthReport, LookupService};

pub use api::types::{error_response, ErrorResponse};

// Server
pub mod server {
    pub use crate::api::server::start_server;
}
