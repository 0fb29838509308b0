//! Outreach target entity model and DTOs.

use blitz_core::board::PoolTarget;
use blitz_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `targets` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Target {
    pub id: DbId,
    pub handle: String,
    pub display_name: Option<String>,
    pub location: Option<String>,
    pub follower_count: i64,
    pub bio: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl PoolTarget for Target {
    fn target_id(&self) -> DbId {
        self.id
    }
}

/// DTO for registering a discovered target.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTarget {
    pub handle: String,
    pub display_name: Option<String>,
    pub location: Option<String>,
    /// Defaults to 0 if omitted.
    pub follower_count: Option<i64>,
    pub bio: Option<String>,
}
