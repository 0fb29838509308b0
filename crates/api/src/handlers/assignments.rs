//! Handlers for wave assignments.
//!
//! Every mutation goes through a [`WavePlanner`] session for the owning
//! campaign day, so the same rules apply as for drag drops.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use blitz_core::types::DbId;
use blitz_db::models::wave_assignment::{AssignTarget, MoveAssignment, UpdateAssignmentProgress};

use crate::error::AppResult;
use crate::planner::{PgPlannerStore, WavePlanner};
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/campaign-days/{id}/assignments
pub async fn create_assignment(
    State(state): State<AppState>,
    Path(campaign_day_id): Path<DbId>,
    Json(input): Json<AssignTarget>,
) -> AppResult<impl IntoResponse> {
    let store = PgPlannerStore::new(state.pool.clone());
    let mut planner =
        WavePlanner::for_campaign_day(store, state.config.pool_page_size, campaign_day_id).await?;

    let assignment = planner.assign(input.target_id, input.wave_number).await?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: assignment })))
}

/// PUT /api/v1/assignments/{id}/wave
///
/// Move to another wave. Resets the status to `pending`; a stale
/// `expected_version` is a 409.
pub async fn move_assignment(
    State(state): State<AppState>,
    Path(assignment_id): Path<DbId>,
    Json(input): Json<MoveAssignment>,
) -> AppResult<impl IntoResponse> {
    let store = PgPlannerStore::new(state.pool.clone());
    let mut planner =
        WavePlanner::for_assignment(store, state.config.pool_page_size, assignment_id).await?;

    let assignment = planner
        .move_assignment(assignment_id, input.to_wave, input.expected_version)
        .await?;

    Ok(Json(DataResponse { data: assignment }))
}

/// PATCH /api/v1/assignments/{id}
///
/// Record outreach progress (`wave_status`, `outcome`).
pub async fn update_assignment(
    State(state): State<AppState>,
    Path(assignment_id): Path<DbId>,
    Json(input): Json<UpdateAssignmentProgress>,
) -> AppResult<impl IntoResponse> {
    let store = PgPlannerStore::new(state.pool.clone());
    let mut planner =
        WavePlanner::for_assignment(store, state.config.pool_page_size, assignment_id).await?;

    let assignment = planner.update_progress(assignment_id, &input).await?;

    Ok(Json(DataResponse { data: assignment }))
}

/// DELETE /api/v1/assignments/{id}
///
/// Remove an assignment; its target becomes available again.
pub async fn delete_assignment(
    State(state): State<AppState>,
    Path(assignment_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let store = PgPlannerStore::new(state.pool.clone());
    let mut planner =
        WavePlanner::for_assignment(store, state.config.pool_page_size, assignment_id).await?;

    planner.remove(assignment_id).await?;

    Ok(StatusCode::NO_CONTENT)
}
