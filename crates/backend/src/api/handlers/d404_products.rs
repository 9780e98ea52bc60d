use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use contracts::dashboards::d404_products::ProductsResponse;

use crate::dashboards::d404_products::service;
use crate::AppState;

/// GET /api/d404/products
pub async fn get_products(State(state): State<Arc<AppState>>) -> Json<ProductsResponse> {
    let response = service::get_products(&state.dataset);
    tracing::info!(
        "D404 Products: {} categories ranked",
        response.top_categories.len()
    );
    Json(response)
}
