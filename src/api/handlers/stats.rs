//! Statistics handler.

use axum::{Json, extract::State};
use serde::Serialize;
use tracing::instrument;
use utoipa::ToSchema;

use crate::api::AppState;
use crate::db::{Database, PriorityBreakdown};
use crate::service::TodoStatistics;

use super::{ErrorResponse, HandlerError, service_error};

#[derive(Debug, Serialize, ToSchema)]
pub struct PriorityBreakdownResponse {
    pub low: usize,
    pub medium: usize,
    pub high: usize,
}

impl From<PriorityBreakdown> for PriorityBreakdownResponse {
    fn from(b: PriorityBreakdown) -> Self {
        Self {
            low: b.low,
            medium: b.medium,
            high: b.high,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StatsResponse {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
    /// Fraction of completed todos, 0.0 when there are none
    #[schema(example = 0.25)]
    pub completion_rate: f64,
    pub by_priority: PriorityBreakdownResponse,
}

impl From<TodoStatistics> for StatsResponse {
    fn from(s: TodoStatistics) -> Self {
        Self {
            total: s.total,
            completed: s.completed,
            pending: s.pending,
            completion_rate: s.completion_rate,
            by_priority: s.by_priority.into(),
        }
    }
}

/// Todo statistics
///
/// Counts over the whole collection, recomputed on every request.
#[utoipa::path(
    get,
    path = "/stats",
    tag = "stats",
    responses(
        (status = 200, description = "Current statistics", body = StatsResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_stats<D: Database>(
    State(state): State<AppState<D>>,
) -> Result<Json<StatsResponse>, HandlerError> {
    let stats = state.service().stats().await.map_err(service_error)?;
    Ok(Json(StatsResponse::from(stats)))
}
