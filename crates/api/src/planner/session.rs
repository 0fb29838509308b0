use std::collections::HashMap;

use blitz_core::board::{WaveBoard, WaveSummary};
use blitz_core::drag::{DragController, DraggableId, DropAction, Droppable, IgnoreReason, Rect};
use blitz_core::error::CoreError;
use blitz_core::outreach::{lifecycle, validate_outcome, validate_wave_status};
use blitz_core::timezone::infer_timezone_opt;
use blitz_core::types::{CampaignDate, DbId};
use blitz_core::waves::{wave_slot, TimeRange, WaveNumber};
use blitz_db::models::campaign_day::CampaignDay;
use blitz_db::models::target::Target;
use blitz_db::models::wave_assignment::{
    CreateWaveAssignment, PlannedAssignment, UpdateAssignmentProgress,
};
use serde::{Deserialize, Serialize};

use super::store::PlannerStore;
use crate::error::{AppError, AppResult};

pub type PlannerBoard = WaveBoard<Target, PlannedAssignment>;

// ---------------------------------------------------------------------------
// Notices
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeLevel {
    Warning,
    Error,
}

/// Transient message for the user, e.g. a failed pool load.
#[derive(Debug, Clone, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

// ---------------------------------------------------------------------------
// Drop requests
// ---------------------------------------------------------------------------

/// Geometry for nearest-corners collision.
#[derive(Debug, Clone, Deserialize)]
pub struct CollisionInput {
    pub active_rect: Rect,
    pub droppables: Vec<Droppable>,
}

/// A finished drag gesture reported by a client.
///
/// The surface under the card is taken from `collision` when present,
/// otherwise from `over_id`.
#[derive(Debug, Clone, Deserialize)]
pub struct DropRequest {
    /// `target-<id>` or `assignment-<id>`.
    pub active_id: String,
    #[serde(default)]
    pub over_id: Option<String>,
    #[serde(default)]
    pub collision: Option<CollisionInput>,
    #[serde(default)]
    pub cancelled: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct DropOutcome {
    #[serde(flatten)]
    pub action: DropAction,
    /// The created or moved assignment, for mutating drops.
    pub assignment: Option<PlannedAssignment>,
}

// ---------------------------------------------------------------------------
// View
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct WaveColumn {
    #[serde(flatten)]
    pub summary: WaveSummary,
    pub zone_id: String,
    /// Local window of the wave in every timezone.
    pub time_ranges: Vec<TimeRange>,
    pub assignments: Vec<PlannedAssignment>,
}

/// Render-ready snapshot of a planner session.
#[derive(Debug, Clone, Serialize)]
pub struct PlannerView {
    pub date: CampaignDate,
    /// False when no campaign day exists for `date`; the client should offer
    /// to create one instead of showing waves.
    pub has_campaign: bool,
    pub campaign_day: Option<CampaignDay>,
    pub pool: Vec<Target>,
    pub waves: Vec<WaveColumn>,
    pub notices: Vec<Notice>,
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

pub struct WavePlanner<S> {
    store: S,
    pool_limit: i64,
    date: CampaignDate,
    campaign_day: Option<CampaignDay>,
    board: PlannerBoard,
    drag: DragController,
    notices: Vec<Notice>,
}

impl<S: PlannerStore> WavePlanner<S> {
    /// An empty session for `date`. Call [`select_date`](Self::select_date)
    /// to load it.
    pub fn new(store: S, pool_limit: i64, date: CampaignDate) -> Self {
        Self {
            store,
            pool_limit: pool_limit.max(1),
            date,
            campaign_day: None,
            board: WaveBoard::without_campaign(Vec::new()),
            drag: DragController::new(),
            notices: Vec::new(),
        }
    }

    pub async fn for_date(store: S, pool_limit: i64, date: CampaignDate) -> AppResult<Self> {
        let mut planner = Self::new(store, pool_limit, date);
        planner.select_date(date).await?;
        Ok(planner)
    }

    pub async fn for_campaign_day(store: S, pool_limit: i64, campaign_day_id: DbId) -> AppResult<Self> {
        let day = store
            .find_campaign_day(campaign_day_id)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "CampaignDay",
                id: campaign_day_id,
            }))?;
        Self::for_date(store, pool_limit, day.campaign_date).await
    }

    /// Session for the campaign day owning an assignment.
    pub async fn for_assignment(store: S, pool_limit: i64, assignment_id: DbId) -> AppResult<Self> {
        let assignment = store
            .find_assignment(assignment_id)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "WaveAssignment",
                id: assignment_id,
            }))?;
        Self::for_campaign_day(store, pool_limit, assignment.campaign_day_id).await
    }

    pub fn date(&self) -> CampaignDate {
        self.date
    }

    pub fn campaign_day(&self) -> Option<&CampaignDay> {
        self.campaign_day.as_ref()
    }

    pub fn board(&self) -> &PlannerBoard {
        &self.board
    }

    pub fn drag(&self) -> &DragController {
        &self.drag
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    // -----------------------------------------------------------------------
    // Loading
    // -----------------------------------------------------------------------

    /// Switch the session to `date`: load its campaign day and assignments,
    /// then reload the pool.
    ///
    /// Campaign-day and assignment lookups propagate errors and leave the
    /// session untouched. A failed pool load only records a notice.
    pub async fn select_date(&mut self, date: CampaignDate) -> AppResult<()> {
        let campaign_day = self.store.find_campaign_day_by_date(date).await?;
        let assignments = match &campaign_day {
            Some(day) => self.load_assignments(day.id).await?,
            None => Vec::new(),
        };

        let previous_pool = self.board.pool().to_vec();
        self.board = WaveBoard::new(
            campaign_day.as_ref().map(|d| d.id),
            previous_pool,
            assignments,
        );
        self.campaign_day = campaign_day;
        self.date = date;
        self.drag = DragController::new();

        self.reload_pool().await;

        tracing::debug!(
            date = %date,
            campaign_day_id = ?self.board.campaign_day_id(),
            pool = self.board.pool().len(),
            assignments = self.board.assignment_count(),
            "Planner loaded",
        );
        Ok(())
    }

    /// Reload the available pool. On failure the previous pool is kept and a
    /// notice is recorded.
    pub async fn reload_pool(&mut self) {
        let result = match self.board.campaign_day_id() {
            Some(day_id) => {
                self.store
                    .list_available_targets(day_id, self.pool_limit)
                    .await
            }
            None => self.store.list_recent_targets(self.pool_limit).await,
        };

        match result {
            Ok(targets) => self.board.replace_pool(targets),
            Err(err) => {
                tracing::warn!(date = %self.date, error = %err, "Target pool load failed, keeping previous pool");
                self.notify(NoticeLevel::Error, format!("Could not load targets: {err}"));
            }
        }
    }

    async fn load_assignments(&self, campaign_day_id: DbId) -> AppResult<Vec<PlannedAssignment>> {
        let rows = self.store.list_assignments(campaign_day_id).await?;
        let mut targets: HashMap<DbId, Target> = self
            .store
            .list_assigned_targets(campaign_day_id)
            .await?
            .into_iter()
            .map(|t| (t.id, t))
            .collect();

        // A row deleted between the two reads has no target left; the board
        // shows one card less until the next load.
        let mut planned = Vec::with_capacity(rows.len());
        for assignment in rows {
            match targets.remove(&assignment.target_id) {
                Some(target) => planned.push(PlannedAssignment { assignment, target }),
                None => tracing::warn!(
                    campaign_day_id,
                    assignment_id = assignment.id,
                    target_id = assignment.target_id,
                    "Assignment removed while loading, skipping",
                ),
            }
        }
        Ok(planned)
    }

    // -----------------------------------------------------------------------
    // Mutations
    // -----------------------------------------------------------------------

    /// Assign a target to a wave of the loaded campaign day.
    ///
    /// The target is marked in flight while the write is outstanding. On
    /// success it leaves the pool and the assignment is appended to the wave;
    /// on failure it stays in the pool and can be dragged again. Capacity is
    /// not checked.
    pub async fn assign(&mut self, target_id: DbId, wave: WaveNumber) -> AppResult<PlannedAssignment> {
        let campaign_day_id = self.editable_day_id()?;
        if self.board.is_assigned(target_id) {
            return Err(CoreError::Conflict(format!(
                "Target {target_id} is already assigned in campaign day {campaign_day_id}"
            ))
            .into());
        }
        if self.board.find_pool_target(target_id).is_none() {
            self.admit_to_pool(target_id).await?;
        }

        let target = self.board.begin_assign(target_id, wave)?;
        let input = CreateWaveAssignment {
            campaign_day_id,
            target_id,
            wave_number: wave,
            timezone_code: infer_timezone_opt(target.location.as_deref()).to_string(),
        };

        match self.store.create_assignment(&input).await {
            Ok(assignment) => {
                let planned = PlannedAssignment { assignment, target };
                self.board.complete_assign(planned.clone());
                tracing::info!(
                    assignment_id = planned.assignment.id,
                    target_id,
                    campaign_day_id,
                    wave = %wave,
                    timezone = %input.timezone_code,
                    "Target assigned to wave",
                );
                Ok(planned)
            }
            Err(err) => {
                self.board.fail_assign(target_id);
                self.write_failed("assign target", &err);
                Err(err)
            }
        }
    }

    /// Move an assignment to another wave. The stored status resets to
    /// `pending`. Moving onto the current wave changes nothing.
    pub async fn move_assignment(
        &mut self,
        assignment_id: DbId,
        to_wave: WaveNumber,
        expected_version: i32,
    ) -> AppResult<PlannedAssignment> {
        self.editable_day_id()?;
        let (from, current) = self.placed(assignment_id)?;

        if from == to_wave {
            if current.assignment.version != expected_version {
                return Err(stale(assignment_id, expected_version, current.assignment.version));
            }
            return Ok(current);
        }

        match self
            .store
            .move_assignment(assignment_id, to_wave, expected_version)
            .await
        {
            Ok(Some(updated)) => {
                let planned = PlannedAssignment {
                    assignment: updated,
                    target: current.target,
                };
                self.board.apply_move(from, planned.clone())?;
                tracing::info!(
                    assignment_id,
                    from = %from,
                    to = %to_wave,
                    version = planned.assignment.version,
                    "Assignment moved",
                );
                Ok(planned)
            }
            Ok(None) => {
                let err = self.stale_or_missing(assignment_id, expected_version).await;
                self.write_failed("move assignment", &err);
                Err(err)
            }
            Err(err) => {
                self.write_failed("move assignment", &err);
                Err(err)
            }
        }
    }

    /// Record outreach progress for an assignment.
    pub async fn update_progress(
        &mut self,
        assignment_id: DbId,
        input: &UpdateAssignmentProgress,
    ) -> AppResult<PlannedAssignment> {
        if input.wave_status.is_none() && input.outcome.is_none() {
            return Err(CoreError::Validation(
                "At least one of wave_status or outcome is required".to_string(),
            )
            .into());
        }
        if let Some(status) = &input.wave_status {
            validate_wave_status(status).map_err(CoreError::Validation)?;
        }
        if let Some(outcome) = &input.outcome {
            validate_outcome(outcome).map_err(CoreError::Validation)?;
        }
        self.editable_day_id()?;
        let (_, current) = self.placed(assignment_id)?;

        match self.store.update_progress(assignment_id, input).await {
            Ok(Some(updated)) => {
                let planned = PlannedAssignment {
                    assignment: updated,
                    target: current.target,
                };
                self.board.replace_assignment(planned.clone())?;
                tracing::info!(
                    assignment_id,
                    wave_status = %planned.assignment.wave_status,
                    outcome = %planned.assignment.outcome,
                    "Assignment progress recorded",
                );
                Ok(planned)
            }
            Ok(None) => {
                let err = self
                    .stale_or_missing(assignment_id, input.expected_version)
                    .await;
                self.write_failed("update assignment", &err);
                Err(err)
            }
            Err(err) => {
                self.write_failed("update assignment", &err);
                Err(err)
            }
        }
    }

    /// Delete an assignment and return its target to the pool.
    pub async fn remove(&mut self, assignment_id: DbId) -> AppResult<PlannedAssignment> {
        self.editable_day_id()?;
        let (_, current) = self.placed(assignment_id)?;

        match self.store.delete_assignment(assignment_id).await {
            Ok(Some(_)) => {
                let removed = self.board.apply_remove(assignment_id, current.target)?;
                tracing::info!(
                    assignment_id,
                    target_id = removed.assignment.target_id,
                    "Assignment removed",
                );
                Ok(removed)
            }
            Ok(None) => {
                let err = AppError::Core(CoreError::NotFound {
                    entity: "WaveAssignment",
                    id: assignment_id,
                });
                self.write_failed("remove assignment", &err);
                Err(err)
            }
            Err(err) => {
                self.write_failed("remove assignment", &err);
                Err(err)
            }
        }
    }

    // -----------------------------------------------------------------------
    // Drag and drop
    // -----------------------------------------------------------------------

    /// Run one drag gesture through the controller and apply the resulting
    /// mutation, if any.
    pub async fn handle_drop(&mut self, request: &DropRequest) -> AppResult<DropOutcome> {
        let item = DraggableId::parse(&request.active_id)?;
        self.drag.start(item);

        let action = if request.cancelled {
            self.drag.cancel()
        } else {
            match &request.collision {
                Some(collision) => self
                    .drag
                    .hover_rect(&collision.active_rect, &collision.droppables),
                None => self.drag.hover(request.over_id.clone()),
            }
            self.drag.drop_on(&self.board)
        };

        let assignment = match action {
            DropAction::Assign { target_id, wave } => Some(self.assign(target_id, wave).await?),
            DropAction::Move {
                assignment_id, to, ..
            } => {
                let (_, current) = self.placed(assignment_id)?;
                Some(
                    self.move_assignment(assignment_id, to, current.assignment.version)
                        .await?,
                )
            }
            DropAction::Ignored {
                reason: IgnoreReason::UnknownItem,
            } => {
                tracing::warn!(active_id = %item, "Dropped item is not on the board, gesture abandoned");
                self.notify(
                    NoticeLevel::Warning,
                    format!("{item} is no longer on the board"),
                );
                None
            }
            DropAction::Ignored { reason } => {
                tracing::debug!(active_id = %item, ?reason, "Drop ignored");
                None
            }
        };

        Ok(DropOutcome { action, assignment })
    }

    // -----------------------------------------------------------------------
    // View
    // -----------------------------------------------------------------------

    pub fn view(&self) -> PlannerView {
        let waves = if self.board.has_campaign() {
            self.board
                .summaries()
                .into_iter()
                .map(|summary| WaveColumn {
                    zone_id: summary.wave_number.zone_id(),
                    time_ranges: wave_slot(summary.wave_number).time_ranges(),
                    assignments: self.board.wave(summary.wave_number).to_vec(),
                    summary,
                })
                .collect()
        } else {
            Vec::new()
        };

        PlannerView {
            date: self.date,
            has_campaign: self.board.has_campaign(),
            campaign_day: self.campaign_day.clone(),
            pool: self.board.pool().to_vec(),
            waves,
            notices: self.notices.clone(),
        }
    }

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    fn editable_day_id(&self) -> AppResult<DbId> {
        let day = self.campaign_day.as_ref().ok_or_else(|| {
            CoreError::Validation(format!("No campaign day exists for {}", self.date))
        })?;
        if !lifecycle::is_editable(day.status_id) {
            return Err(CoreError::Validation(format!(
                "Campaign day {} is {} and its assignments can no longer change",
                day.id,
                lifecycle::status_name(day.status_id)
            ))
            .into());
        }
        Ok(day.id)
    }

    fn placed(&self, assignment_id: DbId) -> AppResult<(WaveNumber, PlannedAssignment)> {
        self.board
            .find_assignment(assignment_id)
            .map(|(wave, a)| (wave, a.clone()))
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "WaveAssignment",
                id: assignment_id,
            }))
    }

    /// Targets older than the loaded pool page are fetched on demand.
    async fn admit_to_pool(&mut self, target_id: DbId) -> AppResult<()> {
        let target = self
            .store
            .find_target(target_id)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "Target",
                id: target_id,
            }))?;
        let mut pool = self.board.pool().to_vec();
        pool.push(target);
        self.board.replace_pool(pool);
        Ok(())
    }

    async fn stale_or_missing(&self, assignment_id: DbId, expected_version: i32) -> AppError {
        match self.store.find_assignment(assignment_id).await {
            Ok(Some(row)) => stale(assignment_id, expected_version, row.version),
            Ok(None) => AppError::Core(CoreError::NotFound {
                entity: "WaveAssignment",
                id: assignment_id,
            }),
            Err(err) => err,
        }
    }

    fn write_failed(&mut self, operation: &str, err: &AppError) {
        tracing::warn!(operation, error = %err, "Planner write failed, board left unchanged");
        self.notify(NoticeLevel::Error, format!("Could not {operation}: {err}"));
    }

    fn notify(&mut self, level: NoticeLevel, message: String) {
        self.notices.push(Notice { level, message });
    }
}

fn stale(assignment_id: DbId, expected: i32, actual: i32) -> AppError {
    AppError::Core(CoreError::StaleVersion {
        entity: "WaveAssignment",
        id: assignment_id,
        expected,
        actual,
    })
}

