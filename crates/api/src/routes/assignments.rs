use axum::routing::{patch, put};
use axum::Router;

use crate::handlers::assignments;
use crate::state::AppState;

/// Routes mounted at `/assignments`.
///
/// ```text
/// PATCH  /{id}        -> update_assignment
/// DELETE /{id}        -> delete_assignment
/// PUT    /{id}/wave   -> move_assignment
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/{id}",
            patch(assignments::update_assignment).delete(assignments::delete_assignment),
        )
        .route("/{id}/wave", put(assignments::move_assignment))
}
