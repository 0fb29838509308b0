//! Route definitions for the outreach network graph.

use axum::routing::{delete, get, put};
use axum::Router;

use crate::handlers::graph;
use crate::state::AppState;

/// Routes mounted at `/graph`.
///
/// ```text
/// GET    /                       -> get_graph
/// DELETE /positions              -> reset_positions
/// PUT    /positions/{node_key}   -> pin_position
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(graph::get_graph))
        .route("/positions", delete(graph::reset_positions))
        .route("/positions/{node_key}", put(graph::pin_position))
}
