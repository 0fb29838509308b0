//! In-memory [`PlannerStore`] for session tests.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use blitz_core::error::CoreError;
use blitz_core::outreach::{OUTCOME_UNKNOWN, WAVE_STATUS_PENDING};
use blitz_core::types::{CampaignDate, DbId};
use blitz_core::waves::WaveNumber;
use blitz_db::models::campaign_day::CampaignDay;
use blitz_db::models::status::StatusId;
use blitz_db::models::target::Target;
use blitz_db::models::wave_assignment::{
    CreateWaveAssignment, UpdateAssignmentProgress, WaveAssignment,
};
use chrono::{Duration, Utc};

use super::store::PlannerStore;
use crate::error::{AppError, AppResult};

#[derive(Default)]
struct Tables {
    next_id: DbId,
    targets: Vec<Target>,
    days: Vec<CampaignDay>,
    assignments: Vec<WaveAssignment>,
}

impl Tables {
    fn next_id(&mut self) -> DbId {
        self.next_id += 1;
        self.next_id
    }
}

/// Clones share the same tables, so a test can keep a handle while a
/// planner owns another.
#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<Mutex<Tables>>,
    fail_pool_loads: Arc<AtomicBool>,
    fail_writes: Arc<AtomicBool>,
    delete_on_target_list: Arc<Mutex<Option<DbId>>>,
}

impl MemoryStore {
    pub fn fail_pool_loads(&self, fail: bool) {
        self.fail_pool_loads.store(fail, Ordering::SeqCst);
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Delete assignment `id` on the next `list_assigned_targets` call, as
    /// if another client removed it between the two reads of a load.
    pub fn delete_while_listing_targets(&self, id: DbId) {
        *self.delete_on_target_list.lock().unwrap() = Some(id);
    }

    /// Insert a target. Later inserts are newer.
    pub fn add_target(&self, handle: &str, location: Option<&str>) -> Target {
        let mut tables = self.tables.lock().unwrap();
        let id = tables.next_id();
        let created_at = Utc::now() + Duration::seconds(id);
        let target = Target {
            id,
            handle: handle.to_string(),
            display_name: None,
            location: location.map(str::to_string),
            follower_count: 0,
            bio: None,
            created_at,
            updated_at: created_at,
        };
        tables.targets.push(target.clone());
        target
    }

    pub fn add_day(&self, date: CampaignDate, status_id: StatusId) -> CampaignDay {
        let mut tables = self.tables.lock().unwrap();
        let id = tables.next_id();
        let day = CampaignDay {
            id,
            campaign_date: date,
            status_id,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        tables.days.push(day.clone());
        day
    }

    pub fn assignment_rows(&self) -> Vec<WaveAssignment> {
        self.tables.lock().unwrap().assignments.clone()
    }

    /// Bump a row's version as if another session had written it.
    pub fn touch_assignment(&self, id: DbId) {
        let mut tables = self.tables.lock().unwrap();
        if let Some(row) = tables.assignments.iter_mut().find(|a| a.id == id) {
            row.version += 1;
        }
    }

    fn check_write(&self) -> AppResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            Err(AppError::InternalError("simulated write failure".to_string()))
        } else {
            Ok(())
        }
    }

    fn check_pool_load(&self) -> AppResult<()> {
        if self.fail_pool_loads.load(Ordering::SeqCst) {
            Err(AppError::InternalError("simulated pool failure".to_string()))
        } else {
            Ok(())
        }
    }
}

fn newest_first(mut targets: Vec<Target>, limit: i64) -> Vec<Target> {
    targets.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
    targets.truncate(limit as usize);
    targets
}

#[async_trait]
impl PlannerStore for MemoryStore {
    async fn find_campaign_day(&self, id: DbId) -> AppResult<Option<CampaignDay>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.days.iter().find(|d| d.id == id).cloned())
    }

    async fn find_campaign_day_by_date(
        &self,
        date: CampaignDate,
    ) -> AppResult<Option<CampaignDay>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.days.iter().find(|d| d.campaign_date == date).cloned())
    }

    async fn list_available_targets(
        &self,
        campaign_day_id: DbId,
        limit: i64,
    ) -> AppResult<Vec<Target>> {
        self.check_pool_load()?;
        let tables = self.tables.lock().unwrap();
        let available = tables
            .targets
            .iter()
            .filter(|t| {
                !tables
                    .assignments
                    .iter()
                    .any(|a| a.campaign_day_id == campaign_day_id && a.target_id == t.id)
            })
            .cloned()
            .collect();
        Ok(newest_first(available, limit))
    }

    async fn list_recent_targets(&self, limit: i64) -> AppResult<Vec<Target>> {
        self.check_pool_load()?;
        let tables = self.tables.lock().unwrap();
        Ok(newest_first(tables.targets.clone(), limit))
    }

    async fn list_assigned_targets(&self, campaign_day_id: DbId) -> AppResult<Vec<Target>> {
        let mut tables = self.tables.lock().unwrap();
        if let Some(id) = self.delete_on_target_list.lock().unwrap().take() {
            tables.assignments.retain(|a| a.id != id);
        }
        Ok(tables
            .targets
            .iter()
            .filter(|t| {
                tables
                    .assignments
                    .iter()
                    .any(|a| a.campaign_day_id == campaign_day_id && a.target_id == t.id)
            })
            .cloned()
            .collect())
    }

    async fn find_target(&self, id: DbId) -> AppResult<Option<Target>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.targets.iter().find(|t| t.id == id).cloned())
    }

    async fn list_assignments(&self, campaign_day_id: DbId) -> AppResult<Vec<WaveAssignment>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .assignments
            .iter()
            .filter(|a| a.campaign_day_id == campaign_day_id)
            .cloned()
            .collect())
    }

    async fn find_assignment(&self, id: DbId) -> AppResult<Option<WaveAssignment>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.assignments.iter().find(|a| a.id == id).cloned())
    }

    async fn create_assignment(&self, input: &CreateWaveAssignment) -> AppResult<WaveAssignment> {
        self.check_write()?;
        let mut tables = self.tables.lock().unwrap();
        let duplicate = tables
            .assignments
            .iter()
            .any(|a| a.campaign_day_id == input.campaign_day_id && a.target_id == input.target_id);
        if duplicate {
            return Err(CoreError::Conflict("uq_wave_assignments_campaign_day_target".into()).into());
        }
        let id = tables.next_id();
        let row = WaveAssignment {
            id,
            campaign_day_id: input.campaign_day_id,
            target_id: input.target_id,
            wave_number: input.wave_number,
            timezone_code: input.timezone_code.clone(),
            wave_status: WAVE_STATUS_PENDING.to_string(),
            outcome: OUTCOME_UNKNOWN.to_string(),
            version: 1,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        tables.assignments.push(row.clone());
        Ok(row)
    }

    async fn move_assignment(
        &self,
        id: DbId,
        to_wave: WaveNumber,
        expected_version: i32,
    ) -> AppResult<Option<WaveAssignment>> {
        self.check_write()?;
        let mut tables = self.tables.lock().unwrap();
        Ok(tables
            .assignments
            .iter_mut()
            .find(|a| a.id == id && a.version == expected_version)
            .map(|row| {
                row.wave_number = to_wave;
                row.wave_status = WAVE_STATUS_PENDING.to_string();
                row.version += 1;
                row.clone()
            }))
    }

    async fn update_progress(
        &self,
        id: DbId,
        input: &UpdateAssignmentProgress,
    ) -> AppResult<Option<WaveAssignment>> {
        self.check_write()?;
        let mut tables = self.tables.lock().unwrap();
        Ok(tables
            .assignments
            .iter_mut()
            .find(|a| a.id == id && a.version == input.expected_version)
            .map(|row| {
                if let Some(status) = &input.wave_status {
                    row.wave_status = status.clone();
                }
                if let Some(outcome) = &input.outcome {
                    row.outcome = outcome.clone();
                }
                row.version += 1;
                row.clone()
            }))
    }

    async fn delete_assignment(&self, id: DbId) -> AppResult<Option<WaveAssignment>> {
        self.check_write()?;
        let mut tables = self.tables.lock().unwrap();
        let position = tables.assignments.iter().position(|a| a.id == id);
        Ok(position.map(|p| tables.assignments.remove(p)))
    }
}
