use std::sync::Arc;

use axum::{extract::State, Json};
use contracts::datasets::DatasetSummary;

use crate::AppState;

/// GET /api/datasets/summary
pub async fn get_summary(State(state): State<Arc<AppState>>) -> Json<DatasetSummary> {
    let summary = state.dataset.summary();
    tracing::info!(
        "Datasets: summary over {} tables, {} rows total",
        summary.tables.len(),
        summary.total_rows()
    );
    Json(summary)
}
