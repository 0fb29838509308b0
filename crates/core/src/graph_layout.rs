//! Outreach network graph and its layout cache.
//!
//! The graph links campaign days to the targets assigned in them. Nodes are
//! placed on a circle; positions a user has dragged are kept in a
//! [`LayoutCache`] keyed by `(graph, node)` and override the computed spot.
//! The cache is bounded per graph (least recently written entries are
//! evicted first) and can be reset explicitly.

use std::collections::{BTreeMap, HashMap};
use std::f64::consts::TAU;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{CampaignDate, DbId};
use crate::waves::WaveNumber;

// ---------------------------------------------------------------------------
// Layout constants
// ---------------------------------------------------------------------------

/// Centre of the circular layout.
pub const LAYOUT_CENTER: Point = Point { x: 400.0, y: 300.0 };

/// Radius of the circular layout.
pub const LAYOUT_RADIUS: f64 = 250.0;

/// Default number of pinned positions kept per graph.
pub const DEFAULT_LAYOUT_CAPACITY: usize = 500;

/// Graph instance name of the outreach network.
pub const OUTREACH_GRAPH: &str = "outreach";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Evenly spaced points on a circle, starting at 12 o'clock, clockwise.
pub fn circular_layout(count: usize, center: Point, radius: f64) -> Vec<Point> {
    (0..count)
        .map(|i| {
            let angle = TAU * i as f64 / count as f64 - TAU / 4.0;
            Point {
                x: center.x + radius * angle.cos(),
                y: center.y + radius * angle.sin(),
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Node keys
// ---------------------------------------------------------------------------

pub fn day_node_key(campaign_day_id: DbId) -> String {
    format!("day-{campaign_day_id}")
}

pub fn target_node_key(target_id: DbId) -> String {
    format!("target-{target_id}")
}

/// Validate a node key supplied by a client.
pub fn validate_node_key(key: &str) -> Result<(), CoreError> {
    let valid = ["day-", "target-"].iter().any(|prefix| {
        key.strip_prefix(prefix)
            .is_some_and(|rest| rest.parse::<DbId>().is_ok())
    });
    if valid {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid node key '{key}'. Expected 'day-<id>' or 'target-<id>'"
        )))
    }
}

// ---------------------------------------------------------------------------
// Layout cache
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
struct GraphPositions {
    entries: HashMap<String, (Point, u64)>,
}

/// Pinned node positions, keyed by graph instance and node key.
#[derive(Debug)]
pub struct LayoutCache {
    capacity: usize,
    clock: u64,
    graphs: HashMap<String, GraphPositions>,
}

impl Default for LayoutCache {
    fn default() -> Self {
        Self::new(DEFAULT_LAYOUT_CAPACITY)
    }
}

impl LayoutCache {
    /// `capacity` is the per-graph entry limit (minimum 1).
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            clock: 0,
            graphs: HashMap::new(),
        }
    }

    pub fn get(&self, graph: &str, node: &str) -> Option<Point> {
        self.graphs
            .get(graph)
            .and_then(|g| g.entries.get(node))
            .map(|(point, _)| *point)
    }

    /// Pin a node. Evicts the least recently written entry when the graph is
    /// full. Returns the evicted node key, if any.
    pub fn set(&mut self, graph: &str, node: &str, point: Point) -> Option<String> {
        self.clock += 1;
        let tick = self.clock;
        let capacity = self.capacity;
        let positions = self.graphs.entry(graph.to_string()).or_default();

        let mut evicted = None;
        if !positions.entries.contains_key(node) && positions.entries.len() >= capacity {
            evicted = positions
                .entries
                .iter()
                .min_by_key(|(_, (_, written))| *written)
                .map(|(key, _)| key.clone());
            if let Some(key) = &evicted {
                positions.entries.remove(key);
            }
        }
        positions.entries.insert(node.to_string(), (point, tick));
        evicted
    }

    /// All pinned positions of a graph.
    pub fn positions(&self, graph: &str) -> HashMap<String, Point> {
        self.graphs
            .get(graph)
            .map(|g| {
                g.entries
                    .iter()
                    .map(|(k, (p, _))| (k.clone(), *p))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Forget every pinned position of a graph. Returns how many were dropped.
    pub fn reset(&mut self, graph: &str) -> usize {
        self.graphs
            .remove(graph)
            .map(|g| g.entries.len())
            .unwrap_or(0)
    }

    pub fn len(&self, graph: &str) -> usize {
        self.graphs.get(graph).map(|g| g.entries.len()).unwrap_or(0)
    }

    pub fn is_empty(&self, graph: &str) -> bool {
        self.len(graph) == 0
    }
}

// ---------------------------------------------------------------------------
// Graph assembly
// ---------------------------------------------------------------------------

/// One joined `assignment -> campaign day, target` row.
#[derive(Debug, Clone)]
pub struct GraphLink {
    pub campaign_day_id: DbId,
    pub campaign_date: CampaignDate,
    pub target_id: DbId,
    pub target_handle: String,
    pub wave: WaveNumber,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    CampaignDay,
    Target,
}

#[derive(Debug, Clone, Serialize)]
pub struct GraphNode {
    pub key: String,
    pub kind: NodeKind,
    pub label: String,
    pub position: Point,
    /// Whether `position` came from the layout cache.
    pub pinned: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct GraphEdge {
    pub source: String,
    pub target: String,
    pub wave_number: WaveNumber,
}

#[derive(Debug, Clone, Serialize)]
pub struct OutreachGraph {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

impl OutreachGraph {
    /// Build nodes and edges from joined rows. Campaign days come first
    /// (oldest date first), then targets by id, so the circular layout is
    /// stable across reloads.
    pub fn build(links: &[GraphLink], pinned: &HashMap<String, Point>) -> Self {
        let mut days: BTreeMap<(CampaignDate, DbId), String> = BTreeMap::new();
        let mut targets: BTreeMap<DbId, String> = BTreeMap::new();
        let mut edges = Vec::with_capacity(links.len());

        for link in links {
            days.entry((link.campaign_date, link.campaign_day_id))
                .or_insert_with(|| link.campaign_date.to_string());
            targets
                .entry(link.target_id)
                .or_insert_with(|| format!("@{}", link.target_handle));
            edges.push(GraphEdge {
                source: day_node_key(link.campaign_day_id),
                target: target_node_key(link.target_id),
                wave_number: link.wave,
            });
        }

        let keyed = days
            .into_iter()
            .map(|((_, id), label)| (day_node_key(id), NodeKind::CampaignDay, label))
            .chain(
                targets
                    .into_iter()
                    .map(|(id, label)| (target_node_key(id), NodeKind::Target, label)),
            )
            .collect::<Vec<_>>();

        let spots = circular_layout(keyed.len(), LAYOUT_CENTER, LAYOUT_RADIUS);
        let nodes = keyed
            .into_iter()
            .zip(spots)
            .map(|((key, kind, label), computed)| {
                let cached = pinned.get(&key).copied();
                GraphNode {
                    pinned: cached.is_some(),
                    position: cached.unwrap_or(computed),
                    key,
                    kind,
                    label,
                }
            })
            .collect();

        Self { nodes, edges }
    }
}
