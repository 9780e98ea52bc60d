use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use contracts::dashboards::d402_sales::SalesResponse;

use crate::dashboards::d402_sales::service;
use crate::AppState;

/// GET /api/d402/sales
pub async fn get_sales(State(state): State<Arc<AppState>>) -> Json<SalesResponse> {
    let response = service::get_sales(&state.dataset);
    tracing::info!(
        "D402 Sales: {} months, {} payment types, {} statuses",
        response.monthly_revenue.len(),
        response.payment_types.len(),
        response.status_share.len()
    );
    Json(response)
}
