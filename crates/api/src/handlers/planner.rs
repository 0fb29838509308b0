//! Handlers for the wave planner board and drag drops.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use blitz_core::types::DbId;
use serde::Serialize;

use crate::error::AppResult;
use crate::planner::{DropOutcome, DropRequest, PgPlannerStore, PlannerView, WavePlanner};
use crate::query::DateParams;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct DropResponse {
    #[serde(flatten)]
    pub outcome: DropOutcome,
    /// Board after the drop was applied.
    pub board: PlannerView,
}

/// GET /api/v1/planner?date=YYYY-MM-DD
///
/// Board for a date: available pool plus the four waves. When no campaign
/// day exists for the date, `has_campaign` is false and the pool holds the
/// most recent targets.
pub async fn get_planner(
    State(state): State<AppState>,
    Query(params): Query<DateParams>,
) -> AppResult<impl IntoResponse> {
    let store = PgPlannerStore::new(state.pool.clone());
    let planner =
        WavePlanner::for_date(store, state.config.pool_page_size, params.date_or_today()).await?;

    Ok(Json(DataResponse {
        data: planner.view(),
    }))
}

/// POST /api/v1/campaign-days/{id}/drops
///
/// Resolve a finished drag gesture into an assign, a move, or nothing.
/// Ignored drops are still a 200 with `action: "ignored"` and a reason.
pub async fn handle_drop(
    State(state): State<AppState>,
    Path(campaign_day_id): Path<DbId>,
    Json(input): Json<DropRequest>,
) -> AppResult<impl IntoResponse> {
    let store = PgPlannerStore::new(state.pool.clone());
    let mut planner =
        WavePlanner::for_campaign_day(store, state.config.pool_page_size, campaign_day_id).await?;

    let outcome = planner.handle_drop(&input).await?;

    tracing::debug!(
        campaign_day_id,
        active_id = %input.active_id,
        mutated = outcome.action.is_mutation(),
        "Drop handled",
    );

    Ok(Json(DataResponse {
        data: DropResponse {
            outcome,
            board: planner.view(),
        },
    }))
}
