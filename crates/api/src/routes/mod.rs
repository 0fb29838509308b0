pub mod assignments;
pub mod campaign_days;
pub mod graph;
pub mod health;
pub mod planner;
pub mod targets;
pub mod waves;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /targets                                  list, create
/// /targets/{id}                             get
///
/// /waves                                    static wave configuration
///
/// /campaign-days                            list, create
/// /campaign-days/{id}                       get
/// /campaign-days/{id}/status                lifecycle transition (PUT)
/// /campaign-days/{id}/assignments           assign a target (POST)
/// /campaign-days/{id}/drops                 resolve a drag drop (POST)
///
/// /assignments/{id}                         progress (PATCH), remove (DELETE)
/// /assignments/{id}/wave                    move to another wave (PUT)
///
/// /planner?date=YYYY-MM-DD                  board for a date
///
/// /graph                                    outreach network graph
/// /graph/positions                          reset pinned layout (DELETE)
/// /graph/positions/{node_key}               pin a node (PUT)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/targets", targets::router())
        .nest("/waves", waves::router())
        .nest("/campaign-days", campaign_days::router())
        .nest("/assignments", assignments::router())
        .nest("/planner", planner::router())
        .nest("/graph", graph::router())
}
