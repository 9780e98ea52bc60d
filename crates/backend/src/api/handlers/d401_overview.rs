use std::sync::Arc;

use axum::extract::{Query, State};
use axum::Json;
use contracts::dashboards::d401_overview::{OverviewRequest, OverviewResponse};

use crate::dashboards::d401_overview::service;
use crate::AppState;

/// GET /api/d401/overview?date_from=2018-01-01&date_to=2018-06-30&hour_from=0&hour_to=23
pub async fn get_overview(
    State(state): State<Arc<AppState>>,
    Query(request): Query<OverviewRequest>,
) -> Json<OverviewResponse> {
    tracing::info!(
        "D401 Overview: dates {:?}..{:?}, hours {:?}..{:?}",
        request.date_from,
        request.date_to,
        request.hour_from,
        request.hour_to
    );

    let response = service::get_overview(&state.dataset, &request);
    tracing::info!(
        "D401 Overview: {} daily points, {} hourly points",
        response.daily.len(),
        response.hourly.len()
    );
    Json(response)
}
