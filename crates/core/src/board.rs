//! In-memory wave board for one campaign day.
//!
//! The board mirrors the persisted assignment relation: four wave buckets,
//! plus the pool of targets that are not assigned to this campaign day.
//! "Available" is never stored; a target is available exactly when no
//! assignment of this day references it.
//!
//! Mutations are applied only after the persistence write has settled.
//! While an assign is outstanding the target stays in the pool, marked
//! [`MutationState::InFlight`], and cannot be picked up again.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::error::CoreError;
use crate::types::DbId;
use crate::waves::{capacity_state, wave_slot, CapacityState, WaveNumber, WAVE_CAPACITY, WAVE_COUNT};

// ---------------------------------------------------------------------------
// Row traits
// ---------------------------------------------------------------------------

/// A target row that can sit in the available pool.
pub trait PoolTarget: Clone {
    fn target_id(&self) -> DbId;
}

/// An assignment row placed in a wave.
pub trait PlacedAssignment: Clone {
    fn assignment_id(&self) -> DbId;
    fn target_id(&self) -> DbId;
    fn wave(&self) -> WaveNumber;
}

// ---------------------------------------------------------------------------
// Pending mutation state
// ---------------------------------------------------------------------------

/// Progress of an assign attempt for a pool target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum MutationState {
    NotStarted,
    InFlight { wave: WaveNumber },
    /// The last attempt finished. Successful attempts remove the target from
    /// the pool, so only failed settles remain observable here.
    Settled { succeeded: bool },
}

impl MutationState {
    pub fn is_in_flight(self) -> bool {
        matches!(self, MutationState::InFlight { .. })
    }
}

// ---------------------------------------------------------------------------
// Wave summary
// ---------------------------------------------------------------------------

/// Render-ready description of one wave bucket.
#[derive(Debug, Clone, Serialize)]
pub struct WaveSummary {
    pub wave_number: WaveNumber,
    pub name: &'static str,
    pub count: usize,
    pub capacity: usize,
    /// True once the wave holds `capacity` or more assignments.
    pub at_capacity: bool,
    pub capacity_state: CapacityState,
}

// ---------------------------------------------------------------------------
// Board
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct WaveBoard<T, A> {
    campaign_day_id: Option<DbId>,
    pool: Vec<T>,
    waves: [Vec<A>; WAVE_COUNT],
    pending: HashMap<DbId, MutationState>,
}

impl<T: PoolTarget, A: PlacedAssignment> WaveBoard<T, A> {
    /// Build a board from freshly loaded rows.
    ///
    /// Pool targets that already hold an assignment are dropped, and duplicate
    /// pool rows are collapsed so every unassigned target appears once.
    pub fn new(campaign_day_id: Option<DbId>, pool: Vec<T>, assignments: Vec<A>) -> Self {
        let mut waves: [Vec<A>; WAVE_COUNT] = Default::default();
        for assignment in assignments {
            waves[assignment.wave().index()].push(assignment);
        }
        let mut board = Self {
            campaign_day_id,
            pool: Vec::new(),
            waves,
            pending: HashMap::new(),
        };
        board.replace_pool(pool);
        board
    }

    /// Board for a date without a campaign day: recent targets, no waves.
    pub fn without_campaign(recent: Vec<T>) -> Self {
        Self::new(None, recent, Vec::new())
    }

    pub fn campaign_day_id(&self) -> Option<DbId> {
        self.campaign_day_id
    }

    pub fn has_campaign(&self) -> bool {
        self.campaign_day_id.is_some()
    }

    pub fn pool(&self) -> &[T] {
        &self.pool
    }

    pub fn wave(&self, wave: WaveNumber) -> &[A] {
        &self.waves[wave.index()]
    }

    /// Total assignments across all waves.
    pub fn assignment_count(&self) -> usize {
        self.waves.iter().map(Vec::len).sum()
    }

    pub fn find_pool_target(&self, target_id: DbId) -> Option<&T> {
        self.pool.iter().find(|t| t.target_id() == target_id)
    }

    /// Locate an assignment and the wave currently holding it.
    pub fn find_assignment(&self, assignment_id: DbId) -> Option<(WaveNumber, &A)> {
        WaveNumber::ALL.into_iter().find_map(|wave| {
            self.waves[wave.index()]
                .iter()
                .find(|a| a.assignment_id() == assignment_id)
                .map(|a| (wave, a))
        })
    }

    /// Whether the target already holds an assignment on this board.
    pub fn is_assigned(&self, target_id: DbId) -> bool {
        self.waves.iter().flatten().any(|a| a.target_id() == target_id)
    }

    pub fn mutation_state(&self, target_id: DbId) -> MutationState {
        self.pending
            .get(&target_id)
            .copied()
            .unwrap_or(MutationState::NotStarted)
    }

    /// A pool target can be dragged when present and not already in flight.
    pub fn is_draggable(&self, target_id: DbId) -> bool {
        self.find_pool_target(target_id).is_some() && !self.mutation_state(target_id).is_in_flight()
    }

    /// Replace the pool after a reload, keeping the one-entry-per-target and
    /// not-assigned invariants.
    pub fn replace_pool(&mut self, pool: Vec<T>) {
        let assigned: HashSet<DbId> = self.waves.iter().flatten().map(|a| a.target_id()).collect();
        let mut seen = HashSet::new();
        self.pool = pool
            .into_iter()
            .filter(|t| !assigned.contains(&t.target_id()) && seen.insert(t.target_id()))
            .collect();
        let pool_ids: HashSet<DbId> = self.pool.iter().map(|t| t.target_id()).collect();
        self.pending.retain(|id, _| pool_ids.contains(id));
    }

    /// Mark a pool target in flight towards `wave` and return a copy of it
    /// for the persistence write.
    pub fn begin_assign(&mut self, target_id: DbId, wave: WaveNumber) -> Result<T, CoreError> {
        let target = self
            .find_pool_target(target_id)
            .cloned()
            .ok_or(CoreError::NotFound {
                entity: "PoolTarget",
                id: target_id,
            })?;
        if self.mutation_state(target_id).is_in_flight() {
            return Err(CoreError::Conflict(format!(
                "Target {target_id} already has an assignment in flight"
            )));
        }
        self.pending
            .insert(target_id, MutationState::InFlight { wave });
        Ok(target)
    }

    /// Settle a successful assign: drop the target from the pool and append
    /// the new assignment to its wave.
    pub fn complete_assign(&mut self, assignment: A) {
        let target_id = assignment.target_id();
        self.pool.retain(|t| t.target_id() != target_id);
        self.pending.remove(&target_id);
        self.waves[assignment.wave().index()].push(assignment);
    }

    /// Settle a failed assign: the target stays in the pool and may be
    /// dragged again.
    pub fn fail_assign(&mut self, target_id: DbId) {
        if self.find_pool_target(target_id).is_some() {
            self.pending
                .insert(target_id, MutationState::Settled { succeeded: false });
        } else {
            self.pending.remove(&target_id);
        }
    }

    /// Apply a persisted move: remove the assignment from `from` and append
    /// the updated row to the wave it now names.
    pub fn apply_move(&mut self, from: WaveNumber, updated: A) -> Result<(), CoreError> {
        let id = updated.assignment_id();
        let source = &mut self.waves[from.index()];
        let position = source
            .iter()
            .position(|a| a.assignment_id() == id)
            .ok_or(CoreError::NotFound {
                entity: "Assignment",
                id,
            })?;
        source.remove(position);
        self.waves[updated.wave().index()].push(updated);
        Ok(())
    }

    /// Replace an assignment row in place (progress updates).
    pub fn replace_assignment(&mut self, updated: A) -> Result<(), CoreError> {
        let id = updated.assignment_id();
        let slot = self.waves[updated.wave().index()]
            .iter_mut()
            .find(|a| a.assignment_id() == id)
            .ok_or(CoreError::NotFound {
                entity: "Assignment",
                id,
            })?;
        *slot = updated;
        Ok(())
    }

    /// Apply a persisted delete: the assignment leaves its wave and its target
    /// returns to the pool (once).
    pub fn apply_remove(&mut self, assignment_id: DbId, target: T) -> Result<A, CoreError> {
        let (wave, _) = self
            .find_assignment(assignment_id)
            .ok_or(CoreError::NotFound {
                entity: "Assignment",
                id: assignment_id,
            })?;
        let list = &mut self.waves[wave.index()];
        let position = list
            .iter()
            .position(|a| a.assignment_id() == assignment_id)
            .ok_or(CoreError::Internal(format!(
                "Assignment {assignment_id} vanished from wave {wave}"
            )))?;
        let removed = list.remove(position);
        if self.find_pool_target(target.target_id()).is_none() {
            self.pool.push(target);
        }
        Ok(removed)
    }

    /// Per-wave counts with advisory capacity indicators.
    pub fn summaries(&self) -> Vec<WaveSummary> {
        WaveNumber::ALL
            .into_iter()
            .map(|wave| {
                let count = self.waves[wave.index()].len();
                WaveSummary {
                    wave_number: wave,
                    name: wave_slot(wave).name,
                    count,
                    capacity: WAVE_CAPACITY,
                    at_capacity: count >= WAVE_CAPACITY,
                    capacity_state: capacity_state(count),
                }
            })
            .collect()
    }
}
