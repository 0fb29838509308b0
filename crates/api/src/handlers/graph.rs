//! Handlers for the outreach network graph and its pinned layout.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use blitz_core::graph_layout::{validate_node_key, GraphLink, OutreachGraph, Point, OUTREACH_GRAPH};
use blitz_db::repositories::WaveAssignmentRepo;
use serde::Serialize;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct PinnedPosition {
    pub node_key: String,
    pub position: Point,
    /// Node whose pin was dropped to make room, if any.
    pub evicted: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LayoutReset {
    pub cleared: usize,
}

/// GET /api/v1/graph
///
/// Campaign days and their assigned targets as nodes, assignments as edges.
pub async fn get_graph(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let links: Vec<GraphLink> = WaveAssignmentRepo::list_links(&state.pool)
        .await?
        .into_iter()
        .map(|row| GraphLink {
            campaign_day_id: row.campaign_day_id,
            campaign_date: row.campaign_date,
            target_id: row.target_id,
            target_handle: row.handle,
            wave: row.wave_number,
        })
        .collect();

    let pinned = state.layout_cache.read().await.positions(OUTREACH_GRAPH);
    let graph = OutreachGraph::build(&links, &pinned);

    Ok(Json(DataResponse { data: graph }))
}

/// PUT /api/v1/graph/positions/{node_key}
///
/// Pin a node at a position. Pins override the computed layout.
pub async fn pin_position(
    State(state): State<AppState>,
    Path(node_key): Path<String>,
    Json(position): Json<Point>,
) -> AppResult<impl IntoResponse> {
    validate_node_key(&node_key)?;

    let evicted = state
        .layout_cache
        .write()
        .await
        .set(OUTREACH_GRAPH, &node_key, position);
    if let Some(evicted) = &evicted {
        tracing::debug!(node_key = %evicted, "Evicted pinned graph position");
    }

    Ok(Json(DataResponse {
        data: PinnedPosition {
            node_key,
            position,
            evicted,
        },
    }))
}

/// DELETE /api/v1/graph/positions
///
/// Forget every pinned position.
pub async fn reset_positions(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let cleared = state.layout_cache.write().await.reset(OUTREACH_GRAPH);

    tracing::info!(cleared, "Graph layout reset");

    Ok(Json(DataResponse {
        data: LayoutReset { cleared },
    }))
}
