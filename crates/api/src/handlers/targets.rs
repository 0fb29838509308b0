//! Handlers for outreach targets.
//!
//! Targets are normally created by discovery workflows; these endpoints
//! let operators seed and inspect them.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use blitz_core::error::CoreError;
use blitz_core::paging::{clamp_limit, clamp_offset, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT};
use blitz_core::types::DbId;
use blitz_db::models::target::CreateTarget;
use blitz_db::repositories::TargetRepo;

use crate::error::{AppError, AppResult};
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/targets
///
/// Most recently discovered targets first.
pub async fn list_targets(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<impl IntoResponse> {
    let limit = clamp_limit(params.limit, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT);
    let offset = clamp_offset(params.offset);
    let targets = TargetRepo::list_recent(&state.pool, limit, offset).await?;

    Ok(Json(DataResponse { data: targets }))
}

/// POST /api/v1/targets
///
/// Register a target. The handle is stored without a leading `@`.
pub async fn create_target(
    State(state): State<AppState>,
    Json(mut input): Json<CreateTarget>,
) -> AppResult<impl IntoResponse> {
    let handle = input.handle.trim().trim_start_matches('@').to_string();
    if handle.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Target handle must not be empty".to_string(),
        )));
    }
    if input.follower_count.is_some_and(|c| c < 0) {
        return Err(AppError::Core(CoreError::Validation(
            "follower_count must not be negative".to_string(),
        )));
    }
    input.handle = handle;

    let target = TargetRepo::create(&state.pool, &input).await?;

    tracing::info!(target_id = target.id, handle = %target.handle, "Target created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: target })))
}

/// GET /api/v1/targets/{id}
pub async fn get_target(
    State(state): State<AppState>,
    Path(target_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let target = TargetRepo::find_by_id(&state.pool, target_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Target",
            id: target_id,
        }))?;

    Ok(Json(DataResponse { data: target }))
}
