//! Campaign-day entity model and DTOs.

use blitz_core::types::{CampaignDate, DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::status::StatusId;

/// A row from the `campaign_days` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CampaignDay {
    pub id: DbId,
    pub campaign_date: CampaignDate,
    pub status_id: StatusId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a campaign day. The date defaults to today (UTC).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateCampaignDay {
    pub campaign_date: Option<CampaignDate>,
}

/// DTO for a lifecycle transition.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateCampaignDayStatus {
    pub status_id: StatusId,
}
