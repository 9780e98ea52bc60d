use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use contracts::dashboards::d403_customers::CustomersResponse;

use crate::dashboards::d403_customers::service;
use crate::AppState;

/// GET /api/d403/customers
pub async fn get_customers(State(state): State<Arc<AppState>>) -> Json<CustomersResponse> {
    let response = service::get_customers(&state.dataset);
    tracing::info!(
        "D403 Customers: {} score rows, {} delivery buckets",
        response.review_scores.len(),
        response.delivery_buckets.len()
    );
    Json(response)
}
