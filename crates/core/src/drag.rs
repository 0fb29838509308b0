//! Drag-and-drop gesture handling for the wave planner.
//!
//! One gesture runs `Idle -> Dragging -> (drop | cancel) -> Idle`. A drop is
//! resolved against the board into at most one mutation: assigning a pool
//! target to a wave, or moving an assignment between waves. Everything else
//! is ignored with a reason so callers can decide whether to log it.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::board::{PlacedAssignment, PoolTarget, WaveBoard};
use crate::error::CoreError;
use crate::types::DbId;
use crate::waves::WaveNumber;

// ---------------------------------------------------------------------------
// Identifiers
// ---------------------------------------------------------------------------

const TARGET_PREFIX: &str = "target-";
const ASSIGNMENT_PREFIX: &str = "assignment-";

/// Identifier of a draggable card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DraggableId {
    /// Card in the available pool.
    Target(DbId),
    /// Card inside a wave.
    Assignment(DbId),
}

impl DraggableId {
    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        let parse_id = |rest: &str| {
            rest.parse::<DbId>()
                .map_err(|_| CoreError::Validation(format!("Invalid draggable id '{raw}'")))
        };
        if let Some(rest) = raw.strip_prefix(TARGET_PREFIX) {
            parse_id(rest).map(DraggableId::Target)
        } else if let Some(rest) = raw.strip_prefix(ASSIGNMENT_PREFIX) {
            parse_id(rest).map(DraggableId::Assignment)
        } else {
            Err(CoreError::Validation(format!(
                "Invalid draggable id '{raw}'. Expected '{TARGET_PREFIX}<id>' or '{ASSIGNMENT_PREFIX}<id>'"
            )))
        }
    }
}

impl fmt::Display for DraggableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DraggableId::Target(id) => write!(f, "{TARGET_PREFIX}{id}"),
            DraggableId::Assignment(id) => write!(f, "{ASSIGNMENT_PREFIX}{id}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Collision detection
// ---------------------------------------------------------------------------

/// Axis-aligned rectangle in client coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Top-left, top-right, bottom-left, bottom-right.
    pub fn corners(&self) -> [(f64, f64); 4] {
        let right = self.x + self.width;
        let bottom = self.y + self.height;
        [
            (self.x, self.y),
            (right, self.y),
            (self.x, bottom),
            (right, bottom),
        ]
    }
}

/// A registered drop surface.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Droppable {
    pub id: String,
    pub rect: Rect,
}

/// Sum of distances between corresponding corners of two rectangles.
pub fn corner_distance(a: &Rect, b: &Rect) -> f64 {
    a.corners()
        .iter()
        .zip(b.corners().iter())
        .map(|((ax, ay), (bx, by))| (ax - bx).hypot(ay - by))
        .sum()
}

/// Nearest-corners collision: the droppable whose corners are closest to
/// the dragged rectangle's corners. Ties keep the first registered surface.
pub fn nearest_corners<'a>(active: &Rect, droppables: &'a [Droppable]) -> Option<&'a Droppable> {
    droppables
        .iter()
        .fold(None::<(&'a Droppable, f64)>, |best, d| {
            let distance = corner_distance(active, &d.rect);
            match best {
                Some((_, best_distance)) if best_distance <= distance => best,
                _ => Some((d, distance)),
            }
        })
        .map(|(d, _)| d)
}

// ---------------------------------------------------------------------------
// Drop resolution
// ---------------------------------------------------------------------------

/// Mutation a drop translates into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum DropAction {
    Assign {
        target_id: DbId,
        wave: WaveNumber,
    },
    Move {
        assignment_id: DbId,
        from: WaveNumber,
        to: WaveNumber,
    },
    Ignored {
        reason: IgnoreReason,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IgnoreReason {
    /// Released outside every drop surface.
    OutsideDropZone,
    /// Released over a surface that is not `wave-<n>`.
    NotAWave,
    /// Released over the wave the card came from.
    SameWave,
    /// The dragged card is not on the board (stale client state).
    UnknownItem,
    /// The pool target has an assign already in flight.
    InFlight,
    /// The gesture was cancelled.
    Cancelled,
    /// A drop arrived with no gesture in progress.
    NotDragging,
}

impl DropAction {
    pub fn is_mutation(&self) -> bool {
        !matches!(self, DropAction::Ignored { .. })
    }

    fn ignored(reason: IgnoreReason) -> Self {
        DropAction::Ignored { reason }
    }
}

/// Resolve a drop of `item` over the surface `over` (if any) against the
/// current board.
pub fn resolve_drop<T: PoolTarget, A: PlacedAssignment>(
    board: &WaveBoard<T, A>,
    item: DraggableId,
    over: Option<&str>,
) -> DropAction {
    let Some(zone) = over else {
        return DropAction::ignored(IgnoreReason::OutsideDropZone);
    };
    let Some(to) = WaveNumber::from_zone_id(zone) else {
        return DropAction::ignored(IgnoreReason::NotAWave);
    };

    match item {
        DraggableId::Target(target_id) => {
            if board.find_pool_target(target_id).is_none() {
                DropAction::ignored(IgnoreReason::UnknownItem)
            } else if !board.is_draggable(target_id) {
                DropAction::ignored(IgnoreReason::InFlight)
            } else {
                DropAction::Assign {
                    target_id,
                    wave: to,
                }
            }
        }
        DraggableId::Assignment(assignment_id) => match board.find_assignment(assignment_id) {
            None => DropAction::ignored(IgnoreReason::UnknownItem),
            Some((from, _)) if from == to => DropAction::ignored(IgnoreReason::SameWave),
            Some((from, _)) => DropAction::Move {
                assignment_id,
                from,
                to,
            },
        },
    }
}

// ---------------------------------------------------------------------------
// Gesture state machine
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum DragState {
    Idle,
    Dragging {
        item: DraggableId,
        /// Surface currently under the card, for highlighting.
        over: Option<String>,
    },
}

/// Tracks a single drag gesture at a time.
#[derive(Debug, Clone)]
pub struct DragController {
    state: DragState,
}

impl Default for DragController {
    fn default() -> Self {
        Self::new()
    }
}

impl DragController {
    pub fn new() -> Self {
        Self {
            state: DragState::Idle,
        }
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    /// Item shown in the drag preview overlay, if any.
    pub fn active_item(&self) -> Option<DraggableId> {
        match self.state {
            DragState::Dragging { item, .. } => Some(item),
            DragState::Idle => None,
        }
    }

    /// Begin a gesture. A new start replaces any unfinished gesture.
    pub fn start(&mut self, item: DraggableId) {
        self.state = DragState::Dragging { item, over: None };
    }

    /// Record the surface under the card by explicit id.
    pub fn hover(&mut self, over: Option<String>) {
        if let DragState::Dragging { over: current, .. } = &mut self.state {
            *current = over;
        }
    }

    /// Record the surface under the card using nearest-corners collision.
    pub fn hover_rect(&mut self, active: &Rect, droppables: &[Droppable]) {
        let over = nearest_corners(active, droppables).map(|d| d.id.clone());
        self.hover(over);
    }

    /// Release the card. Always returns the controller to idle.
    pub fn drop_on<T: PoolTarget, A: PlacedAssignment>(
        &mut self,
        board: &WaveBoard<T, A>,
    ) -> DropAction {
        match std::mem::replace(&mut self.state, DragState::Idle) {
            DragState::Idle => DropAction::ignored(IgnoreReason::NotDragging),
            DragState::Dragging { item, over } => resolve_drop(board, item, over.as_deref()),
        }
    }

    /// Abort the gesture without any mutation.
    pub fn cancel(&mut self) -> DropAction {
        self.state = DragState::Idle;
        DropAction::ignored(IgnoreReason::Cancelled)
    }
}
