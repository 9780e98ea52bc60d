use std::sync::Arc;

use axum::extract::{Query, State};
use axum::Json;
use contracts::dashboards::d405_geography::{GeographyRequest, GeographyResponse};

use crate::dashboards::d405_geography::service;
use crate::AppState;

/// GET /api/d405/geography?display=customers
pub async fn get_geography(
    State(state): State<Arc<AppState>>,
    Query(request): Query<GeographyRequest>,
) -> Json<GeographyResponse> {
    tracing::info!("D405 Geography: display mode {:?}", request.display);

    let response = service::get_geography(&state.dataset, &request);
    tracing::info!(
        "D405 Geography: {} states, {} cities, {} sample points",
        response.states.len(),
        response.top_cities.len(),
        response.density_sample.len()
    );
    Json(response)
}
