//! Transactions API endpoints - JSON API and HTMX partial responses
//!
//! Endpoints:
//! - api_view: Current view snapshot (JSON)
//! - api_filter: Apply a filter selection, return the snapshot (JSON)
//! - htmx_transactions_list: Transactions panel (HTML fragment)
//! - htmx_transactions_more: Load the next page (HTML fragment)
//! - htmx_filter_change: Apply the dropdown selection (HTML fragment)
//!
//! Every transition runs with the coordinator locked, so an invalidation and
//! the fetch that follows it are never observed separately.

use super::page::render_transactions_panel;
use crate::{ApiError, AppState};
use axum::response::Html;
use axum::{Form, Json};
use rampview_core::ViewSnapshot;
use serde::Deserialize;

/// Filter selection. A missing id is ignored; an empty id means "all employees".
#[derive(Debug, Deserialize)]
pub struct FilterForm {
    pub employee_id: Option<String>,
}

/// Current view snapshot (JSON API)
pub async fn api_view(state: axum::extract::State<AppState>) -> Json<ViewSnapshot> {
    let coordinator = state.coordinator.lock().await;
    Json(coordinator.snapshot())
}

/// Apply a filter selection (JSON API)
pub async fn api_filter(
    state: axum::extract::State<AppState>,
    Json(form): Json<FilterForm>,
) -> Result<Json<ViewSnapshot>, ApiError> {
    let mut coordinator = state.coordinator.lock().await;
    coordinator.on_filter_change(form.employee_id.as_deref()).await?;
    Ok(Json(coordinator.snapshot()))
}

/// HTMX: Transactions panel for the current state
pub async fn htmx_transactions_list(state: axum::extract::State<AppState>) -> Html<String> {
    let coordinator = state.coordinator.lock().await;
    Html(render_transactions_panel(&coordinator.snapshot(), &state.config.currency))
}

/// HTMX: "View more" - advance the paginated list
pub async fn htmx_transactions_more(state: axum::extract::State<AppState>) -> Html<String> {
    let mut coordinator = state.coordinator.lock().await;
    if let Err(e) = coordinator.load_all().await {
        log::warn!("Loading more transactions failed: {}", e);
    }
    Html(render_transactions_panel(&coordinator.snapshot(), &state.config.currency))
}

/// HTMX: Filter dropdown changed
pub async fn htmx_filter_change(
    state: axum::extract::State<AppState>,
    Form(form): Form<FilterForm>,
) -> Html<String> {
    let mut coordinator = state.coordinator.lock().await;
    if let Err(e) = coordinator.on_filter_change(form.employee_id.as_deref()).await {
        log::warn!("Filter change failed: {}", e);
    }
    Html(render_transactions_panel(&coordinator.snapshot(), &state.config.currency))
}
