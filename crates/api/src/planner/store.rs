//! Persistence seam for the planner session.

use async_trait::async_trait;
use blitz_core::types::{CampaignDate, DbId};
use blitz_core::waves::WaveNumber;
use blitz_db::models::campaign_day::CampaignDay;
use blitz_db::models::target::Target;
use blitz_db::models::wave_assignment::{
    CreateWaveAssignment, UpdateAssignmentProgress, WaveAssignment,
};
use blitz_db::repositories::{CampaignDayRepo, TargetRepo, WaveAssignmentRepo};
use blitz_db::DbPool;

use crate::error::AppResult;

/// Reads and writes the planner needs.
///
/// Version-checked writes return `Ok(None)` when the row is missing or the
/// version did not match; the session tells the two apart.
#[async_trait]
pub trait PlannerStore: Send + Sync {
    async fn find_campaign_day(&self, id: DbId) -> AppResult<Option<CampaignDay>>;

    async fn find_campaign_day_by_date(&self, date: CampaignDate)
        -> AppResult<Option<CampaignDay>>;

    /// Targets not assigned in the campaign day, newest first.
    async fn list_available_targets(&self, campaign_day_id: DbId, limit: i64)
        -> AppResult<Vec<Target>>;

    /// Newest targets regardless of assignment.
    async fn list_recent_targets(&self, limit: i64) -> AppResult<Vec<Target>>;

    /// Targets referenced by the campaign day's assignments.
    async fn list_assigned_targets(&self, campaign_day_id: DbId) -> AppResult<Vec<Target>>;

    async fn find_target(&self, id: DbId) -> AppResult<Option<Target>>;

    /// Assignments of a campaign day in creation order.
    async fn list_assignments(&self, campaign_day_id: DbId) -> AppResult<Vec<WaveAssignment>>;

    async fn find_assignment(&self, id: DbId) -> AppResult<Option<WaveAssignment>>;

    async fn create_assignment(&self, input: &CreateWaveAssignment) -> AppResult<WaveAssignment>;

    async fn move_assignment(
        &self,
        id: DbId,
        to_wave: WaveNumber,
        expected_version: i32,
    ) -> AppResult<Option<WaveAssignment>>;

    async fn update_progress(
        &self,
        id: DbId,
        input: &UpdateAssignmentProgress,
    ) -> AppResult<Option<WaveAssignment>>;

    /// Delete an assignment, returning the removed row.
    async fn delete_assignment(&self, id: DbId) -> AppResult<Option<WaveAssignment>>;
}

/// [`PlannerStore`] backed by the PostgreSQL repositories.
#[derive(Clone)]
pub struct PgPlannerStore {
    pool: DbPool,
}

impl PgPlannerStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PlannerStore for PgPlannerStore {
    async fn find_campaign_day(&self, id: DbId) -> AppResult<Option<CampaignDay>> {
        Ok(CampaignDayRepo::find_by_id(&self.pool, id).await?)
    }

    async fn find_campaign_day_by_date(
        &self,
        date: CampaignDate,
    ) -> AppResult<Option<CampaignDay>> {
        Ok(CampaignDayRepo::find_by_date(&self.pool, date).await?)
    }

    async fn list_available_targets(
        &self,
        campaign_day_id: DbId,
        limit: i64,
    ) -> AppResult<Vec<Target>> {
        Ok(TargetRepo::list_available_for_day(&self.pool, campaign_day_id, limit).await?)
    }

    async fn list_recent_targets(&self, limit: i64) -> AppResult<Vec<Target>> {
        Ok(TargetRepo::list_recent(&self.pool, limit, 0).await?)
    }

    async fn list_assigned_targets(&self, campaign_day_id: DbId) -> AppResult<Vec<Target>> {
        Ok(TargetRepo::list_assigned_for_day(&self.pool, campaign_day_id).await?)
    }

    async fn find_target(&self, id: DbId) -> AppResult<Option<Target>> {
        Ok(TargetRepo::find_by_id(&self.pool, id).await?)
    }

    async fn list_assignments(&self, campaign_day_id: DbId) -> AppResult<Vec<WaveAssignment>> {
        Ok(WaveAssignmentRepo::list_by_campaign_day(&self.pool, campaign_day_id).await?)
    }

    async fn find_assignment(&self, id: DbId) -> AppResult<Option<WaveAssignment>> {
        Ok(WaveAssignmentRepo::find_by_id(&self.pool, id).await?)
    }

    async fn create_assignment(&self, input: &CreateWaveAssignment) -> AppResult<WaveAssignment> {
        Ok(WaveAssignmentRepo::create(&self.pool, input).await?)
    }

    async fn move_assignment(
        &self,
        id: DbId,
        to_wave: WaveNumber,
        expected_version: i32,
    ) -> AppResult<Option<WaveAssignment>> {
        Ok(WaveAssignmentRepo::move_to_wave(&self.pool, id, to_wave, expected_version).await?)
    }

    async fn update_progress(
        &self,
        id: DbId,
        input: &UpdateAssignmentProgress,
    ) -> AppResult<Option<WaveAssignment>> {
        Ok(WaveAssignmentRepo::update_progress(&self.pool, id, input).await?)
    }

    async fn delete_assignment(&self, id: DbId) -> AppResult<Option<WaveAssignment>> {
        Ok(WaveAssignmentRepo::delete(&self.pool, id).await?)
    }
}
