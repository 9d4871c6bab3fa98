use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use crate::services::job_tracker::JobRun;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(recent_job_runs))
}

#[derive(Debug, Deserialize)]
struct RecentQuery {
    limit: Option<usize>,
}

/// GET /api/jobs - Most recent scheduled job runs, newest first
async fn recent_job_runs(
    State(state): State<AppState>,
    Query(query): Query<RecentQuery>,
) -> Json<Vec<JobRun>> {
    Json(state.job_tracker.recent(query.limit.unwrap_or(20)))
}
