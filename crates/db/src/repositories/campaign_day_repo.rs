//! Repository for the `campaign_days` table.

use blitz_core::types::{CampaignDate, DbId};
use sqlx::PgPool;

use crate::models::campaign_day::CampaignDay;
use crate::models::status::{CampaignDayStatus, StatusId};

const COLUMNS: &str = "id, campaign_date, status_id, created_at, updated_at";

/// Provides CRUD operations for campaign days.
pub struct CampaignDayRepo;

impl CampaignDayRepo {
    /// Insert a campaign day in `Planning` status.
    ///
    /// A second day for the same date violates
    /// `uq_campaign_days_campaign_date`.
    pub async fn create(pool: &PgPool, date: CampaignDate) -> Result<CampaignDay, sqlx::Error> {
        let query = format!(
            "INSERT INTO campaign_days (campaign_date, status_id)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CampaignDay>(&query)
            .bind(date)
            .bind(CampaignDayStatus::Planning.id())
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<CampaignDay>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM campaign_days WHERE id = $1");
        sqlx::query_as::<_, CampaignDay>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_date(
        pool: &PgPool,
        date: CampaignDate,
    ) -> Result<Option<CampaignDay>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM campaign_days WHERE campaign_date = $1");
        sqlx::query_as::<_, CampaignDay>(&query)
            .bind(date)
            .fetch_optional(pool)
            .await
    }

    /// List campaign days, most recent date first.
    pub async fn list(
        pool: &PgPool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<CampaignDay>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM campaign_days
             ORDER BY campaign_date DESC
             LIMIT $1 OFFSET $2"
        );
        sqlx::query_as::<_, CampaignDay>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Set the status of a campaign day. Transition rules are checked by the
    /// caller. Returns `None` if no row with the given `id` exists.
    pub async fn update_status(
        pool: &PgPool,
        id: DbId,
        status_id: StatusId,
    ) -> Result<Option<CampaignDay>, sqlx::Error> {
        let query = format!(
            "UPDATE campaign_days SET status_id = $2
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CampaignDay>(&query)
            .bind(id)
            .bind(status_id)
            .fetch_optional(pool)
            .await
    }
}
