//! Repository for the `targets` table.

use blitz_core::types::DbId;
use sqlx::PgPool;

use crate::models::target::{CreateTarget, Target};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, handle, display_name, location, follower_count, bio, created_at, updated_at";

/// Same columns qualified with the `t` alias for joined queries.
const T_COLUMNS: &str = "t.id, t.handle, t.display_name, t.location, t.follower_count, \
                         t.bio, t.created_at, t.updated_at";

/// Provides CRUD and pool queries for targets.
pub struct TargetRepo;

impl TargetRepo {
    /// Insert a new target, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateTarget) -> Result<Target, sqlx::Error> {
        let query = format!(
            "INSERT INTO targets (handle, display_name, location, follower_count, bio)
             VALUES ($1, $2, $3, COALESCE($4, 0), $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Target>(&query)
            .bind(&input.handle)
            .bind(&input.display_name)
            .bind(&input.location)
            .bind(input.follower_count)
            .bind(&input.bio)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Target>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM targets WHERE id = $1");
        sqlx::query_as::<_, Target>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Most recently discovered targets, newest first.
    pub async fn list_recent(
        pool: &PgPool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Target>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM targets
             ORDER BY created_at DESC, id DESC
             LIMIT $1 OFFSET $2"
        );
        sqlx::query_as::<_, Target>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Targets with no assignment in the given campaign day, newest first.
    pub async fn list_available_for_day(
        pool: &PgPool,
        campaign_day_id: DbId,
        limit: i64,
    ) -> Result<Vec<Target>, sqlx::Error> {
        let query = format!(
            "SELECT {T_COLUMNS} FROM targets t
             WHERE NOT EXISTS (
                 SELECT 1 FROM wave_assignments wa
                 WHERE wa.target_id = t.id AND wa.campaign_day_id = $1
             )
             ORDER BY t.created_at DESC, t.id DESC
             LIMIT $2"
        );
        sqlx::query_as::<_, Target>(&query)
            .bind(campaign_day_id)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Targets holding an assignment in the given campaign day.
    pub async fn list_assigned_for_day(
        pool: &PgPool,
        campaign_day_id: DbId,
    ) -> Result<Vec<Target>, sqlx::Error> {
        let query = format!(
            "SELECT {T_COLUMNS} FROM targets t
             JOIN wave_assignments wa ON wa.target_id = t.id
             WHERE wa.campaign_day_id = $1
             ORDER BY t.id"
        );
        sqlx::query_as::<_, Target>(&query)
            .bind(campaign_day_id)
            .fetch_all(pool)
            .await
    }
}
