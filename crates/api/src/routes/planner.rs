use axum::routing::get;
use axum::Router;

use crate::handlers::planner;
use crate::state::AppState;

/// Routes mounted at `/planner`.
///
/// ```text
/// GET    /?date=YYYY-MM-DD  -> get_planner
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(planner::get_planner))
}
