//! Request-scoped lookup pipeline.
//!
//! Every call runs the full sequence on its own:
//!
//! ```text
//! ┌────────────┐   ┌────────────┐   ┌────────────┐   ┌────────────┐   ┌────────────┐
//! │  Validate  │──▶│    Load    │──▶│   Match    │──▶│   Label    │──▶│  Records   │
//! │  (body)    │   │  (CSV)     │   │ (normalize)│   │  (en/de)   │   │  (JSON)    │
//! └────────────┘   └────────────┘   └────────────┘   └────────────┘   └────────────┘
//! ```
//!
//! Validation happens before the file is read, so a bad request never costs
//! an I/O round trip. No state is shared between calls.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::api::logs::{log_info, log_success};
use crate::config::ServiceConfig;
use crate::dataset::DatasetLoader;
use crate::error::LookupResult;
use crate::labels::Language;
use crate::matcher::{find_matches, LookupKey, QueryShape};
use crate::shaper::LabeledRecords;

/// Dataset status reported by the health check.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthReport {
    /// "healthy" when the dataset loads, "degraded" otherwise.
    pub status: &'static str,
    pub dataset_exists: bool,
    pub dataset_loadable: bool,
    /// Row count when the dataset loads.
    pub rows: Option<usize>,
    pub dataset_path: String,
    /// Load error, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub checked_at: DateTime<Utc>,
}

/// The lookup service. Cheap to clone; holds only configuration.
#[derive(Debug, Clone)]
pub struct LookupService {
    loader: DatasetLoader,
    default_language: Language,
}

impl LookupService {
    pub fn new(loader: DatasetLoader, default_language: Language) -> Self {
        Self {
            loader,
            default_language,
        }
    }

    pub fn from_config(config: &ServiceConfig) -> Self {
        Self::new(
            DatasetLoader::new(config.dataset_path.clone()),
            config.default_language,
        )
    }

    pub fn loader(&self) -> &DatasetLoader {
        &self.loader
    }

    /// `{country, language?}` → every row of that country.
    pub async fn country_data(&self, body: &Value) -> LookupResult<LabeledRecords> {
        let key = LookupKey::from_body(body, QueryShape::Country, self.default_language)?;
        self.lookup(&key).await
    }

    /// `{city, country, language?}` → the row(s) for that city.
    pub async fn city_data(&self, body: &Value) -> LookupResult<LabeledRecords> {
        let key = LookupKey::from_body(body, QueryShape::City, self.default_language)?;
        self.lookup(&key).await
    }

    /// Load, match and label for an already validated key.
    pub async fn lookup(&self, key: &LookupKey) -> LookupResult<LabeledRecords> {
        match &key.city {
            Some(city) => log_info(format!(
                "🔎 Lookup city='{}' country='{}' language={}",
                city, key.country, key.language
            )),
            None => log_info(format!(
                "🔎 Lookup country='{}' language={}",
                key.country, key.language
            )),
        }

        let table = self.loader.load().await?;
        log_info(format!("📖 Loaded {} rows from {}", table.len(), self.loader.path().display()));

        let matched = find_matches(table, key)?;
        log_success(format!("{} matching row(s)", matched.len()));

        Ok(LabeledRecords::new(matched, key.language))
    }

    /// Check whether the dataset is present and parses.
    pub async fn health(&self) -> HealthReport {
        let dataset_exists = self.loader.exists().await;
        let loaded = if dataset_exists {
            Some(self.loader.load().await)
        } else {
            None
        };

        let (rows, error) = match loaded {
            Some(Ok(table)) => (Some(table.len()), None),
            Some(Err(e)) => (None, Some(e.to_string())),
            None => (None, Some("dataset file not found".to_string())),
        };
        let dataset_loadable = rows.is_some();

        HealthReport {
            status: if dataset_loadable { "healthy" } else { "degraded" },
            dataset_exists,
            dataset_loadable,
            rows,
            dataset_path: self.loader.path().display().to_string(),
            error,
            checked_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{DatasetError, LookupError};
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    const CSV: &str = "city,country,x1,x2,x54,data_quality\n\
        Tokyo,Japan,8.50,45.0,NaN,1\n\
        Osaka,Japan,7.20,40.0,2500.5,1\n\
        Paris,France,15.30,65.0,inf,0\n";

    fn service_with(csv: Option<&str>) -> (TempDir, LookupService) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cost-of-living_v2.csv");
        if let Some(csv) = csv {
            fs::write(&path, csv).unwrap();
        }
        let service = LookupService::new(DatasetLoader::new(path), Language::En);
        (dir, service)
    }

    #[tokio::test]
    async fn test_tokyo_scenario() {
        let (_dir, service) = service_with(Some(CSV));
        let records = service
            .city_data(&json!({"city": "tokyo", "country": "Japan", "language": "en"}))
            .await
            .unwrap();
        let json = records.to_json().unwrap();

        assert_eq!(json.as_array().unwrap().len(), 1);
        assert_eq!(json[0]["city"], "Tokyo");
        assert_eq!(json[0]["Meal, Inexpensive Restaurant (USD)"], 8.5);
        assert!(json[0]["Average Monthly Net Salary (After Tax) (USD)"].is_null());
    }

    #[tokio::test]
    async fn test_country_lookup_in_german() {
        let (_dir, service) = service_with(Some(CSV));
        let records = service
            .country_data(&json!({"country": "JAPAN", "language": "de"}))
            .await
            .unwrap();
        let json = records.to_json().unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(json[1]["city"], "Osaka");
        assert_eq!(
            json[1]["Durchschnittliches monatliches Nettogehalt (nach Steuern) (USD)"],
            2500.5
        );
    }

    #[tokio::test]
    async fn test_unknown_city_is_not_found() {
        let (_dir, service) = service_with(Some(CSV));
        let err = service
            .city_data(&json!({"city": "Nowhere", "country": "Japan"}))
            .await
            .unwrap_err();
        assert_eq!(err.code(), "not_found");
        assert!(err.to_string().contains("Nowhere"));
        assert!(err.to_string().contains("Japan"));
    }

    #[tokio::test]
    async fn test_missing_country_is_invalid_input() {
        let (_dir, service) = service_with(Some(CSV));
        let err = service.city_data(&json!({"city": "Tokyo"})).await.unwrap_err();
        assert!(matches!(err, LookupError::InvalidInput { ref field } if field == "country"));
    }

    #[tokio::test]
    async fn test_unsupported_language_is_rejected() {
        let (_dir, service) = service_with(Some(CSV));
        let err = service
            .city_data(&json!({"city": "Tokyo", "country": "Japan", "language": "fr"}))
            .await
            .unwrap_err();
        assert_eq!(err.code(), "unsupported_language");
    }

    #[tokio::test]
    async fn test_absent_file_is_dataset_unavailable() {
        let (_dir, service) = service_with(None);
        let err = service
            .city_data(&json!({"city": "Tokyo", "country": "Japan"}))
            .await
            .unwrap_err();
        assert!(matches!(err, LookupError::Dataset(DatasetError::Unavailable { .. })));
        assert_eq!(err.code(), "dataset_unavailable");
    }

    #[tokio::test]
    async fn test_validation_runs_before_loading() {
        // No file on disk, yet the input error is what surfaces.
        let (_dir, service) = service_with(None);
        let err = service.country_data(&json!({})).await.unwrap_err();
        assert_eq!(err.code(), "invalid_input");
    }

    #[tokio::test]
    async fn test_each_call_sees_latest_file() {
        let (dir, service) = service_with(Some(CSV));
        let body = json!({"country": "Germany"});
        assert!(service.country_data(&body).await.is_err());

        fs::write(
            dir.path().join("cost-of-living_v2.csv"),
            format!("{}Berlin,Germany,12,50,3000,1\n", CSV),
        )
        .unwrap();
        assert_eq!(service.country_data(&body).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_health_report() {
        let (_dir, service) = service_with(Some(CSV));
        let report = service.health().await;
        assert_eq!(report.status, "healthy");
        assert!(report.dataset_exists && report.dataset_loadable);
        assert_eq!(report.rows, Some(3));

        let (_dir, service) = service_with(None);
        let report = service.health().await;
        assert_eq!(report.status, "degraded");
        assert!(!report.dataset_exists);
        assert_eq!(report.rows, None);

        let (_dir, service) = service_with(Some("city,x1\nTokyo,1\n"));
        let report = service.health().await;
        assert!(report.dataset_exists);
        assert!(!report.dataset_loadable);
        assert!(report.error.unwrap().contains("country"));
    }
}
