//! Handlers for campaign days and their lifecycle.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use blitz_core::error::CoreError;
use blitz_core::outreach::lifecycle;
use blitz_core::paging::{clamp_limit, clamp_offset, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT};
use blitz_core::types::DbId;
use blitz_db::models::campaign_day::{CreateCampaignDay, UpdateCampaignDayStatus};
use blitz_db::models::status::CampaignDayStatus;
use blitz_db::repositories::CampaignDayRepo;

use crate::error::{AppError, AppResult};
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/campaign-days
pub async fn list_campaign_days(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<impl IntoResponse> {
    let limit = clamp_limit(params.limit, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT);
    let offset = clamp_offset(params.offset);
    let days = CampaignDayRepo::list(&state.pool, limit, offset).await?;

    Ok(Json(DataResponse { data: days }))
}

/// POST /api/v1/campaign-days
///
/// Create the campaign day for a date (today when omitted). A second
/// campaign day for the same date is a 409.
pub async fn create_campaign_day(
    State(state): State<AppState>,
    Json(input): Json<CreateCampaignDay>,
) -> AppResult<impl IntoResponse> {
    let date = input
        .campaign_date
        .unwrap_or_else(|| chrono::Utc::now().date_naive());
    let day = CampaignDayRepo::create(&state.pool, date).await?;

    tracing::info!(campaign_day_id = day.id, campaign_date = %day.campaign_date, "Campaign day created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: day })))
}

/// GET /api/v1/campaign-days/{id}
pub async fn get_campaign_day(
    State(state): State<AppState>,
    Path(campaign_day_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let day = CampaignDayRepo::find_by_id(&state.pool, campaign_day_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "CampaignDay",
            id: campaign_day_id,
        }))?;

    Ok(Json(DataResponse { data: day }))
}

/// PUT /api/v1/campaign-days/{id}/status
///
/// Move a campaign day through its lifecycle. Invalid transitions are 400.
pub async fn update_campaign_day_status(
    State(state): State<AppState>,
    Path(campaign_day_id): Path<DbId>,
    Json(input): Json<UpdateCampaignDayStatus>,
) -> AppResult<impl IntoResponse> {
    let target_status = CampaignDayStatus::from_id(input.status_id).ok_or_else(|| {
        CoreError::Validation(format!("Unknown campaign day status id {}", input.status_id))
    })?;

    let day = CampaignDayRepo::find_by_id(&state.pool, campaign_day_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "CampaignDay",
            id: campaign_day_id,
        }))?;

    lifecycle::validate_transition(day.status_id, target_status.id())
        .map_err(CoreError::Validation)?;

    let updated = CampaignDayRepo::update_status(&state.pool, campaign_day_id, target_status.id())
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "CampaignDay",
            id: campaign_day_id,
        }))?;

    tracing::info!(
        campaign_day_id,
        from = lifecycle::status_name(day.status_id),
        to = lifecycle::status_name(updated.status_id),
        "Campaign day status changed",
    );

    Ok(Json(DataResponse { data: updated }))
}
