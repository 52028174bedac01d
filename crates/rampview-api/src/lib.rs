//! HTTP server with HTMX support
//!
//! Routes are organized into modules:
//! - routes::transactions: Main page, transaction table, pagination, filtering
//! - routes::employees: Employee list and filter dropdown
//! - routes::settings: Configuration display

pub mod error;
pub mod routes;

use axum::{
    routing::{get, post},
    Router,
};
use rampview_config::Config;
use rampview_core::ViewCoordinator;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Mutex;
use tower_http::cors::CorsLayer;

pub use error::ApiError;

/// Application state
#[derive(Clone)]
pub struct AppState {
    /// One coordinator per server; transitions are serialized by the lock
    pub coordinator: Arc<Mutex<ViewCoordinator>>,
    pub config: Config,
}

impl AppState {
    pub fn new(config: Config, coordinator: ViewCoordinator) -> Self {
        Self {
            coordinator: Arc::new(Mutex::new(coordinator)),
            config,
        }
    }
}

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    use routes::employees::api_employees;
    use routes::settings::api_settings;
    use routes::transactions::{api_filter, api_view, htmx_filter_change, htmx_transactions_list, htmx_transactions_more, page_index};

    Router::new()
        // API endpoints
        .route("/api/health", get(health_check))
        .route("/api/view", get(api_view))
        .route("/api/filter", post(api_filter))
        .route("/api/employees", get(api_employees))
        .route("/api/settings", get(api_settings))
        // HTMX page routes
        .route("/", get(page_index))
        // HTMX partial routes
        .route("/transactions/list", get(htmx_transactions_list))
        .route("/transactions/more", post(htmx_transactions_more))
        .route("/filter", post(htmx_filter_change))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

// ==================== Template Functions ====================

/// Base HTML template
pub fn base_html(title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{} - Rampview</title>
    <script src="https://unpkg.com/htmx.org@1.9.10"></script>
    <link rel="stylesheet" href="https://cdn.jsdelivr.net/npm/tailwindcss@2.2.19/dist/tailwind.min.css">
</head>
<body class="bg-gray-50 text-gray-900">
    {}
</body>
</html>"#,
        title, content
    )
}

/// Bind and serve until the server stops
pub async fn start_server(config: Config, coordinator: ViewCoordinator) -> std::io::Result<()> {
    let addr = config.bind_address();
    let state = AppState::new(config, coordinator);

    let router = create_router(state);

    let listener = TcpListener::bind(&addr).await?;
    log::info!("Starting Rampview server on http://{}", addr);
    log::info!("Available routes:");
    log::info!("  - / (Transactions)");
    log::info!("  - /api/* (JSON API endpoints)");

    axum::serve(listener, router).await?;
    log::info!("Server stopped gracefully");
    Ok(())
}
