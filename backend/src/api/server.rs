//! HTTP Server for the cost-of-living API.
//!
//! # API Endpoints
//!
//! | Method | Path            | Description                              |
//! |--------|-----------------|------------------------------------------|
//! | GET    | `/`             | Liveness banner                          |
//! | GET    | `/health`       | Dataset presence and loadability         |
//! | POST   | `/country_data` | All rows for a country                   |
//! | POST   | `/city_data`    | Row(s) for a city within a country       |
//! | GET    | `/labels`       | Indicator labels (`?language=en\|de`)    |
//! | GET    | `/api/logs`     | SSE stream for real-time logs            |

use axum::{
    body::Bytes,
    extract::{Query, State},
    http::{header, Method},
    response::{sse::Event, Json, Sse},
    routing::{get, post},
    Router,
};
use futures::stream::Stream;
use serde::Deserialize;
use serde_json::Value;
use std::{collections::BTreeMap, convert::Infallible, net::SocketAddr, sync::Arc, time::Duration};
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt as _;
use tower_http::cors::CorsLayer;

use super::logs::{log_warning, LOG_BROADCASTER};
use super::types::{ApiError, RootResponse};
use crate::config::ServiceConfig;
use crate::error::LookupError;
use crate::labels::{label_table, IndicatorKey, Language};
use crate::service::{HealthReport, LookupService};
use crate::shaper::LabeledRecords;

/// Shared handler state.
pub struct AppState {
    pub service: LookupService,
}

impl AppState {
    pub fn new(service: LookupService) -> Arc<Self> {
        Arc::new(Self { service })
    }
}

/// Build the router with all endpoints.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .expose_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/country_data", post(country_data))
        .route("/city_data", post(city_data))
        .route("/labels", get(labels))
        .route("/api/logs", get(sse_logs))
        .layer(cors)
        .with_state(state)
}

/// Start the HTTP server
pub async fn start_server(config: ServiceConfig) -> Result<(), Box<dyn std::error::Error>> {
    let service = LookupService::from_config(&config);
    if !service.loader().exists().await {
        log_warning(format!(
            "Dataset not found at {} (requests will fail until it is provisioned)",
            config.dataset_path.display()
        ));
    }

    let app = router(AppState::new(service));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    println!("🚀 Cost of living API running on http://localhost:{}", config.port);
    println!("   Dataset: {}", config.dataset_path.display());
    println!("   POST /country_data - Rows for a country");
    println!("   POST /city_data    - Row for a city in a country");
    println!("   GET  /labels       - Indicator labels");
    println!("   GET  /health       - Health check");
    println!("   GET  /api/logs     - SSE log stream");
    println!();

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Liveness banner
pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "Global Cost of Living API is live!".to_string(),
        status: "ready".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Health check endpoint
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthReport> {
    Json(state.service.health().await)
}

/// Rows for one country.
///
/// Body: `{"country": "Japan", "language": "en"}`
pub async fn country_data(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<LabeledRecords>, ApiError> {
    let body = parse_body(&body)?;
    Ok(Json(state.service.country_data(&body).await?))
}

/// Row(s) for a city in a specific country.
///
/// Body: `{"city": "Paris", "country": "France", "language": "de"}`
pub async fn city_data(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<LabeledRecords>, ApiError> {
    let body = parse_body(&body)?;
    Ok(Json(state.service.city_data(&body).await?))
}

#[derive(Debug, Deserialize)]
pub struct LabelsQuery {
    pub language: Option<String>,
}

/// Indicator label table for one language.
pub async fn labels(
    Query(query): Query<LabelsQuery>,
) -> Result<Json<BTreeMap<IndicatorKey, &'static str>>, ApiError> {
    let language = match query.language {
        Some(code) => code.parse::<Language>()?,
        None => Language::default(),
    };
    Ok(Json(label_table(language)))
}

/// SSE endpoint for real-time log streaming
pub async fn sse_logs() -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let rx = LOG_BROADCASTER.subscribe();

    let stream = BroadcastStream::new(rx).filter_map(|result| match result {
        Ok(entry) => {
            let json = serde_json::to_string(&entry).ok()?;
            Some(Ok(Event::default().data(json)))
        }
        Err(_) => None,
    });

    Sse::new(stream).keep_alive(
        axum::response::sse::KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("keep-alive"),
    )
}

/// Request bodies are read raw so malformed JSON surfaces as `InvalidInput`.
fn parse_body(bytes: &[u8]) -> Result<Value, LookupError> {
    serde_json::from_slice(bytes).map_err(|_| LookupError::invalid_input("body"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::logs::LogLevel;
    use crate::dataset::DatasetLoader;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use std::fs;
    use tempfile::TempDir;
    use tokio::sync::broadcast::error::TryRecvError;

    fn app_state(csv: Option<&str>) -> (TempDir, Arc<AppState>) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.csv");
        if let Some(csv) = csv {
            fs::write(&path, csv).unwrap();
        }
        let service = LookupService::new(DatasetLoader::new(path), Language::En);
        (dir, AppState::new(service))
    }

    const CSV: &str = "city,country,x1,x54\nTokyo,Japan,8.50,NaN\n";

    #[tokio::test]
    async fn test_city_data_success() {
        let (_dir, state) = app_state(Some(CSV));
        let body = Bytes::from_static(br#"{"city": "TOKYO", "country": "japan"}"#);

        let Json(records) = city_data(State(state), body).await.unwrap();
        let json = records.to_json().unwrap();
        assert_eq!(json[0]["city"], "Tokyo");
        assert_eq!(json[0]["Meal, Inexpensive Restaurant (USD)"], 8.5);
    }

    #[tokio::test]
    async fn test_status_codes() {
        let cases: [(&[u8], StatusCode); 4] = [
            (br#"{"city": "Nowhere", "country": "Japan"}"#, StatusCode::NOT_FOUND),
            (br#"{"city": "Tokyo"}"#, StatusCode::BAD_REQUEST),
            (br#"{"city": "Tokyo", "country": "Japan", "language": "fr"}"#, StatusCode::BAD_REQUEST),
            (b"not json", StatusCode::BAD_REQUEST),
        ];
        for (body, expected) in cases {
            let (_dir, state) = app_state(Some(CSV));
            let err = city_data(State(state), Bytes::copy_from_slice(body))
                .await
                .unwrap_err();
            assert_eq!(err.into_response().status(), expected);
        }
    }

    #[tokio::test]
    async fn test_not_found_is_logged_once() {
        let (_dir, state) = app_state(Some(CSV));
        let mut rx = LOG_BROADCASTER.subscribe();

        let body = Bytes::from_static(br#"{"city": "Atlantis-7c1e", "country": "Japan"}"#);
        let err = city_data(State(state), body).await.unwrap_err();
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);

        let mut warnings = 0;
        loop {
            match rx.try_recv() {
                Ok(entry) => {
                    if entry.level == LogLevel::Warning && entry.message.contains("Atlantis-7c1e") {
                        warnings += 1;
                    }
                }
                Err(TryRecvError::Lagged(_)) => continue,
                Err(_) => break,
            }
        }
        assert_eq!(warnings, 1);
    }

    #[tokio::test]
    async fn test_missing_dataset_is_server_error() {
        let (_dir, state) = app_state(None);
        let body = Bytes::from_static(br#"{"country": "Japan"}"#);
        let err = country_data(State(state), body).await.unwrap_err();
        assert_eq!(err.0.code(), "dataset_unavailable");
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_labels_endpoint() {
        let Json(table) = labels(Query(LabelsQuery {
            language: Some("de".into()),
        }))
        .await
        .unwrap();
        assert_eq!(table.len(), 55);
        assert_eq!(
            table[&IndicatorKey::new(1).unwrap()],
            "Mahlzeit, günstiges Restaurant (USD)"
        );

        let err = labels(Query(LabelsQuery {
            language: Some("fr".into()),
        }))
        .await
        .unwrap_err();
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let (_dir, state) = app_state(None);
        let Json(report) = health(State(state)).await;
        assert!(!report.dataset_exists);
        assert_eq!(report.status, "degraded");
    }

    #[tokio::test]
    async fn test_root_banner() {
        let Json(banner) = root().await;
        assert_eq!(banner.status, "ready");
    }
}
