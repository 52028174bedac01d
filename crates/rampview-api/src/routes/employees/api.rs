//! Employees API endpoints - JSON API

use crate::{ApiError, AppState};
use axum::Json;
use rampview_core::Employee;

/// Loaded employee directory (JSON API)
pub async fn api_employees(
    state: axum::extract::State<AppState>,
) -> Result<Json<Vec<Employee>>, ApiError> {
    let coordinator = state.coordinator.lock().await;
    coordinator
        .employees()
        .map(Json)
        .ok_or_else(|| ApiError::NotFound { resource: "employees".to_string() })
}
