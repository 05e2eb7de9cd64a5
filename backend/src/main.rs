//! StockOptame - Coffee Stand Inventory Server
//!
//! Records sales against the product catalog, deducts ingredient stock,
//! handles cancellations and restocking, and reports low stock.

use anyhow::Context;
use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod error;
mod handlers;
mod routes;
mod services;
mod store;

pub use config::Config;

use config::{StorageBackend, StorageConfig};
use services::InventoryService;
use store::{DocumentStore, FileDocumentStore, MemoryDocumentStore, PgDocumentStore, SnapshotGateway};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub inventory: InventoryService,
    pub config: Arc<Config>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::load()?;

    init_tracing(config.logging.json);

    tracing::info!("Starting StockOptame Server");
    tracing::info!("Environment: {}", config.environment);

    // Open snapshot storage
    tracing::info!("Opening {} storage...", config.storage.backend.as_str());
    let store = open_store(&config.storage).await?;
    let inventory = InventoryService::load(SnapshotGateway::new(store))
        .await
        .context("loading inventory snapshot")?;

    // Create application state
    let state = AppState {
        inventory,
        config: Arc::new(config.clone()),
    };

    // Build application
    let app = create_app(state);

    // Start server
    let addr = config.bind_address();
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Initialize tracing, honoring RUST_LOG when set
fn init_tracing(json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "stockoptame_server=debug,tower_http=debug,sqlx=warn".into());
    let registry = tracing_subscriber::registry().with(filter);

    if json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

/// Build the configured document store
async fn open_store(config: &StorageConfig) -> anyhow::Result<Arc<dyn DocumentStore>> {
    let store: Arc<dyn DocumentStore> = match config.backend {
        StorageBackend::File => {
            let store = FileDocumentStore::new(&config.data_dir);
            tracing::info!("Data directory: {}", store.data_dir().display());
            Arc::new(store)
        }
        StorageBackend::Postgres => {
            let url = config.database_url.as_deref().ok_or_else(|| {
                error::AppError::Configuration(
                    "storage.database_url is required for the postgres backend".to_string(),
                )
            })?;
            let store = PgDocumentStore::connect(url, config.max_connections, config.min_connections)
                .await
                .context("connecting to PostgreSQL")?;
            tracing::info!("Database connection established");
            Arc::new(store)
        }
        StorageBackend::Memory => {
            tracing::warn!("Memory storage selected; data will not survive a restart");
            Arc::new(MemoryDocumentStore::new())
        }
    };
    Ok(store)
}

/// Create the application router with all routes and middleware
fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Root endpoint
async fn root() -> &'static str {
    "StockOptame Inventory API v1.0"
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Method, Request, StatusCode},
    };
    use rust_decimal::Decimal;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    async fn test_app() -> Router {
        let gateway = SnapshotGateway::new(Arc::new(MemoryDocumentStore::new()));
        let inventory = InventoryService::load(gateway).await.unwrap();
        let config = Config {
            environment: "test".to_string(),
            server: config::ServerConfig::default(),
            storage: StorageConfig {
                backend: StorageBackend::Memory,
                data_dir: "data".into(),
                database_url: None,
                max_connections: 1,
                min_connections: 1,
            },
            logging: config::LoggingConfig { json: false },
        };
        create_app(AppState {
            inventory,
            config: Arc::new(config),
        })
    }

    async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json");
        let request = match body {
            Some(body) => request.body(Body::from(body.to_string())).unwrap(),
            None => request.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    fn coffee(levels: &Value) -> &Value {
        levels
            .as_array()
            .unwrap()
            .iter()
            .find(|s| s["name"] == "Coffee")
            .unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let app = test_app().await;
        let (status, body) = send(&app, Method::GET, "/api/v1/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["storage"], "memory");
        assert_eq!(body["storageStatus"], "connected");
    }

    #[tokio::test]
    async fn test_sale_and_cancel_over_http() {
        let app = test_app().await;

        let (status, sale) = send(
            &app,
            Method::POST,
            "/api/v1/sales",
            Some(json!({ "productName": "Espresso", "quantity": 1 })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(sale["cancelled"], false);

        let (_, levels) = send(&app, Method::GET, "/api/v1/stocks", None).await;
        assert_eq!(coffee(&levels)["currentQuantity"], "432");
        assert_eq!(coffee(&levels)["status"], "low");

        let uri = format!("/api/v1/sales/{}/cancel", sale["id"].as_str().unwrap());
        let (status, report) = send(
            &app,
            Method::POST,
            &uri,
            Some(json!({ "reason": "Stok Tidak Cukup" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(report["sale"]["cancelReason"], "Stok Tidak Cukup");

        let (status, err) = send(&app, Method::POST, &uri, Some(json!({ "reason": "Lagi" }))).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(err["error"]["code"], "ALREADY_CANCELLED");

        let (_, levels) = send(&app, Method::GET, "/api/v1/stocks", None).await;
        assert_eq!(coffee(&levels)["currentQuantity"], "450");
    }

    #[tokio::test]
    async fn test_insufficient_stock_response() {
        let app = test_app().await;
        let (status, err) = send(
            &app,
            Method::POST,
            "/api/v1/sales",
            Some(json!({ "productName": "Espresso", "quantity": 30 })),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err["error"]["code"], "INSUFFICIENT_STOCK");
        assert_eq!(err["error"]["message_id"], "Stok Coffee tidak cukup");

        let (_, sales) = send(&app, Method::GET, "/api/v1/sales", None).await;
        assert_eq!(sales.as_array().map(|s| s.len()), Some(0));
    }

    #[tokio::test]
    async fn test_missing_reason_response() {
        let app = test_app().await;
        let (_, sale) = send(
            &app,
            Method::POST,
            "/api/v1/sales",
            Some(json!({ "productName": "Latte", "quantity": 1 })),
        )
        .await;
        let uri = format!("/api/v1/sales/{}/cancel", sale["id"].as_str().unwrap());
        let (status, err) = send(&app, Method::POST, &uri, Some(json!({ "reason": "  " }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(err["error"]["code"], "MISSING_REASON");
    }

    #[tokio::test]
    async fn test_catalog_management_over_http() {
        let app = test_app().await;

        let (status, item) = send(
            &app,
            Method::POST,
            "/api/v1/stocks",
            Some(json!({ "name": "Gula Aren", "unit": "g", "minimumThreshold": 200 })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let item_id = item["id"].as_str().unwrap().to_string();

        let (_, product) = send(
            &app,
            Method::POST,
            "/api/v1/products",
            Some(json!({ "name": "Kopi Gula Aren" })),
        )
        .await;
        let product_id = product["id"].as_str().unwrap().to_string();

        let (status, product) = send(
            &app,
            Method::POST,
            &format!("/api/v1/products/{}/recipe", product_id),
            Some(json!({ "stockItemId": item_id })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(product["recipe"]["gula"], "1");

        let (status, product) = send(
            &app,
            Method::PUT,
            &format!("/api/v1/products/{}/recipe/gula", product_id),
            Some(json!({ "amount": 25 })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(product["recipe"]["gula"], "25");

        // New item starts at zero, so the sale must be rejected
        let (status, _) = send(
            &app,
            Method::POST,
            "/api/v1/sales",
            Some(json!({ "productName": "Kopi Gula Aren", "quantity": 1 })),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

        let (status, item) = send(
            &app,
            Method::POST,
            &format!("/api/v1/stocks/{}/restock", item_id),
            Some(json!({ "amount": 100 })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(item["currentQuantity"], "100");

        let (status, _) = send(
            &app,
            Method::DELETE,
            &format!("/api/v1/products/{}", product_id),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn test_huge_minimum_threshold_over_http() {
        let app = test_app().await;
        let (status, _) = send(
            &app,
            Method::POST,
            "/api/v1/stocks",
            Some(json!({ "name": "Vault Beans", "unit": "g", "minimumThreshold": Decimal::MAX })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, levels) = send(&app, Method::GET, "/api/v1/stocks", None).await;
        assert_eq!(status, StatusCode::OK);
        let vault = levels
            .as_array()
            .unwrap()
            .iter()
            .find(|s| s["name"] == "Vault Beans")
            .unwrap();
        assert_eq!(vault["status"], "low");
        assert_eq!(vault["minimumThreshold"], Decimal::MAX.to_string());

        let (status, report) = send(&app, Method::GET, "/api/v1/reports/daily", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(report["criticalStock"].as_array().map(|s| s.len()), Some(2));
    }

    #[tokio::test]
    async fn test_daily_report_csv() {
        let app = test_app().await;
        send(
            &app,
            Method::POST,
            "/api/v1/sales",
            Some(json!({ "productName": "Americano", "quantity": 2 })),
        )
        .await;

        let (_, report) = send(&app, Method::GET, "/api/v1/reports/daily", None).await;
        assert_eq!(report["itemsSold"], 2);

        let request = Request::builder()
            .uri("/api/v1/reports/daily?format=csv")
            .body(Body::empty())
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.headers()["content-type"], "text/csv");
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let csv = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(csv.contains("Americano,2"));
    }
}
