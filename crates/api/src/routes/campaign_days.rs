//! Route definitions for campaign days, including the planner mutations
//! scoped to one day.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::{assignments, campaign_days, planner};
use crate::state::AppState;

/// Routes mounted at `/campaign-days`.
///
/// ```text
/// GET    /                   -> list_campaign_days
/// POST   /                   -> create_campaign_day
/// GET    /{id}               -> get_campaign_day
/// PUT    /{id}/status        -> update_campaign_day_status
/// POST   /{id}/assignments   -> create_assignment
/// POST   /{id}/drops         -> handle_drop
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(campaign_days::list_campaign_days).post(campaign_days::create_campaign_day),
        )
        .route("/{id}", get(campaign_days::get_campaign_day))
        .route(
            "/{id}/status",
            put(campaign_days::update_campaign_day_status),
        )
        .route("/{id}/assignments", post(assignments::create_assignment))
        .route("/{id}/drops", post(planner::handle_drop))
}
