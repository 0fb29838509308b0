use axum::routing::get;
use axum::Router;

use crate::handlers::waves;
use crate::state::AppState;

/// Routes mounted at `/waves`.
///
/// ```text
/// GET    /      -> list_waves
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(waves::list_waves))
}
