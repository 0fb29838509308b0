//! Route definitions for targets.

use axum::routing::get;
use axum::Router;

use crate::handlers::targets;
use crate::state::AppState;

/// Routes mounted at `/targets`.
///
/// ```text
/// GET    /      -> list_targets
/// POST   /      -> create_target
/// GET    /{id}  -> get_target
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(targets::list_targets).post(targets::create_target))
        .route("/{id}", get(targets::get_target))
}
