//! Wave assignment entity model and DTOs.
//!
//! `version` starts at 1 and increases on every update. Writers pass the
//! version they last saw; a mismatch means someone else changed the row.

use blitz_core::board::PlacedAssignment;
use blitz_core::types::{CampaignDate, DbId, Timestamp};
use blitz_core::waves::WaveNumber;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::target::Target;

/// A row from the `wave_assignments` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct WaveAssignment {
    pub id: DbId,
    pub campaign_day_id: DbId,
    pub target_id: DbId,
    #[sqlx(try_from = "i16")]
    pub wave_number: WaveNumber,
    pub timezone_code: String,
    pub wave_status: String,
    pub outcome: String,
    pub version: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// An assignment together with its full target, as held on the wave board.
///
/// Carrying the target lets a removal put it back into the pool without
/// another fetch.
#[derive(Debug, Clone, Serialize)]
pub struct PlannedAssignment {
    #[serde(flatten)]
    pub assignment: WaveAssignment,
    pub target: Target,
}

impl PlacedAssignment for PlannedAssignment {
    fn assignment_id(&self) -> DbId {
        self.assignment.id
    }

    fn target_id(&self) -> DbId {
        self.assignment.target_id
    }

    fn wave(&self) -> WaveNumber {
        self.assignment.wave_number
    }
}

/// DTO for inserting an assignment. Status and outcome take column defaults.
#[derive(Debug, Clone)]
pub struct CreateWaveAssignment {
    pub campaign_day_id: DbId,
    pub target_id: DbId,
    pub wave_number: WaveNumber,
    pub timezone_code: String,
}

/// Request body for assigning a target to a wave.
#[derive(Debug, Clone, Deserialize)]
pub struct AssignTarget {
    pub target_id: DbId,
    pub wave_number: WaveNumber,
}

/// Request body for moving an assignment to another wave.
#[derive(Debug, Clone, Deserialize)]
pub struct MoveAssignment {
    pub to_wave: WaveNumber,
    pub expected_version: i32,
}

/// Request body for recording outreach progress. `None` fields are unchanged.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateAssignmentProgress {
    pub wave_status: Option<String>,
    pub outcome: Option<String>,
    pub expected_version: i32,
}

/// One joined assignment row for the outreach graph.
#[derive(Debug, Clone, FromRow)]
pub struct AssignmentLink {
    pub campaign_day_id: DbId,
    pub campaign_date: CampaignDate,
    pub target_id: DbId,
    pub handle: String,
    #[sqlx(try_from = "i16")]
    pub wave_number: WaveNumber,
}
