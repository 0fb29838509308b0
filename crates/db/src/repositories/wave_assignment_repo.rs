//! Repository for the `wave_assignments` table.
//!
//! Updates are version-checked: they only apply when the caller's
//! `expected_version` matches the stored one, and bump it on success.

use blitz_core::outreach::WAVE_STATUS_PENDING;
use blitz_core::types::DbId;
use blitz_core::waves::WaveNumber;
use sqlx::PgPool;

use crate::models::wave_assignment::{
    AssignmentLink, CreateWaveAssignment, UpdateAssignmentProgress, WaveAssignment,
};

const COLUMNS: &str = "id, campaign_day_id, target_id, wave_number, timezone_code, \
                       wave_status, outcome, version, created_at, updated_at";

/// Provides CRUD operations for wave assignments.
pub struct WaveAssignmentRepo;

impl WaveAssignmentRepo {
    /// Insert a new assignment in `pending` status.
    ///
    /// Assigning the same target twice within one campaign day violates
    /// `uq_wave_assignments_campaign_day_target`.
    pub async fn create(
        pool: &PgPool,
        input: &CreateWaveAssignment,
    ) -> Result<WaveAssignment, sqlx::Error> {
        let query = format!(
            "INSERT INTO wave_assignments
                (campaign_day_id, target_id, wave_number, timezone_code, wave_status)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, WaveAssignment>(&query)
            .bind(input.campaign_day_id)
            .bind(input.target_id)
            .bind(i16::from(input.wave_number))
            .bind(&input.timezone_code)
            .bind(WAVE_STATUS_PENDING)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<WaveAssignment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM wave_assignments WHERE id = $1");
        sqlx::query_as::<_, WaveAssignment>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// All assignments of a campaign day in creation order.
    pub async fn list_by_campaign_day(
        pool: &PgPool,
        campaign_day_id: DbId,
    ) -> Result<Vec<WaveAssignment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM wave_assignments
             WHERE campaign_day_id = $1
             ORDER BY created_at ASC, id ASC"
        );
        sqlx::query_as::<_, WaveAssignment>(&query)
            .bind(campaign_day_id)
            .fetch_all(pool)
            .await
    }

    /// Move an assignment to another wave and reset its status to `pending`.
    /// The outcome is kept.
    ///
    /// Returns `None` when the row is missing or its version differs from
    /// `expected_version`.
    pub async fn move_to_wave(
        pool: &PgPool,
        id: DbId,
        to_wave: WaveNumber,
        expected_version: i32,
    ) -> Result<Option<WaveAssignment>, sqlx::Error> {
        let query = format!(
            "UPDATE wave_assignments SET
                wave_number = $2,
                wave_status = $3,
                version = version + 1
             WHERE id = $1 AND version = $4
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, WaveAssignment>(&query)
            .bind(id)
            .bind(i16::from(to_wave))
            .bind(WAVE_STATUS_PENDING)
            .bind(expected_version)
            .fetch_optional(pool)
            .await
    }

    /// Record outreach progress. Only non-`None` fields are applied.
    ///
    /// Returns `None` when the row is missing or its version differs from
    /// `input.expected_version`.
    pub async fn update_progress(
        pool: &PgPool,
        id: DbId,
        input: &UpdateAssignmentProgress,
    ) -> Result<Option<WaveAssignment>, sqlx::Error> {
        let query = format!(
            "UPDATE wave_assignments SET
                wave_status = COALESCE($2, wave_status),
                outcome = COALESCE($3, outcome),
                version = version + 1
             WHERE id = $1 AND version = $4
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, WaveAssignment>(&query)
            .bind(id)
            .bind(&input.wave_status)
            .bind(&input.outcome)
            .bind(input.expected_version)
            .fetch_optional(pool)
            .await
    }

    /// Delete an assignment. Returns the removed row, or `None` if it was
    /// already gone.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<Option<WaveAssignment>, sqlx::Error> {
        let query = format!("DELETE FROM wave_assignments WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, WaveAssignment>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Joined assignment rows for the outreach network graph.
    pub async fn list_links(pool: &PgPool) -> Result<Vec<AssignmentLink>, sqlx::Error> {
        sqlx::query_as::<_, AssignmentLink>(
            "SELECT wa.campaign_day_id, cd.campaign_date, wa.target_id, t.handle, wa.wave_number
             FROM wave_assignments wa
             JOIN campaign_days cd ON cd.id = wa.campaign_day_id
             JOIN targets t ON t.id = wa.target_id
             ORDER BY cd.campaign_date ASC, wa.id ASC",
        )
        .fetch_all(pool)
        .await
    }
}
