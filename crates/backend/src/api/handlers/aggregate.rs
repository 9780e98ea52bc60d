use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use contracts::analytics::{AggregateRequest, AggregateResponse, TableSchemaOwned};

use crate::analytics::query;
use crate::AppState;

/// GET /api/schemas
pub async fn get_schemas() -> Json<Vec<TableSchemaOwned>> {
    Json(query::table_schemas())
}

/// POST /api/aggregate
pub async fn post_aggregate(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AggregateRequest>,
) -> Result<Json<AggregateResponse>, (StatusCode, String)> {
    tracing::info!(
        "Aggregate: table={} group_by={} reduce={}",
        request.table,
        request.group_by,
        request.reduce.measure_id()
    );

    match query::run_aggregate(&state.dataset, &request) {
        Ok(response) => {
            tracing::info!("Aggregate: returning {} rows", response.result.rows.len());
            Ok(Json(response))
        }
        Err(e) => {
            tracing::error!("Aggregate: rejected request: {}", e);
            Err((StatusCode::UNPROCESSABLE_ENTITY, e.to_string()))
        }
    }
}
