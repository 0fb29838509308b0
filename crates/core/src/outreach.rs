//! Outreach status vocabulary and the campaign-day lifecycle.
//!
//! Assignment progress (`wave_status`) and `outcome` are stored as text and
//! validated here so the DB and API layers agree on the accepted values.
//! Campaign-day statuses are SMALLINT ids matching the
//! `campaign_day_statuses` seed data.

// ---------------------------------------------------------------------------
// Wave status
// ---------------------------------------------------------------------------

/// Assigned, outreach not yet sent.
pub const WAVE_STATUS_PENDING: &str = "pending";

/// Outreach post / DM sent.
pub const WAVE_STATUS_POSTED: &str = "posted";

/// Target answered.
pub const WAVE_STATUS_RESPONDED: &str = "responded";

/// Wave window closed without a response.
pub const WAVE_STATUS_NO_RESPONSE: &str = "no_response";

/// All valid wave status values.
pub const VALID_WAVE_STATUSES: &[&str] = &[
    WAVE_STATUS_PENDING,
    WAVE_STATUS_POSTED,
    WAVE_STATUS_RESPONDED,
    WAVE_STATUS_NO_RESPONSE,
];

/// Validate that a wave status string is one of the accepted values.
pub fn validate_wave_status(status: &str) -> Result<(), String> {
    if VALID_WAVE_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(format!(
            "Invalid wave status '{status}'. Must be one of: {}",
            VALID_WAVE_STATUSES.join(", ")
        ))
    }
}

// ---------------------------------------------------------------------------
// Outcome
// ---------------------------------------------------------------------------

pub const OUTCOME_UNKNOWN: &str = "unknown";
pub const OUTCOME_DM_OPENED: &str = "dm_opened";
pub const OUTCOME_DM_REPLIED: &str = "dm_replied";
pub const OUTCOME_BOOKED_CALL: &str = "booked_call";
pub const OUTCOME_WON: &str = "won";
pub const OUTCOME_LOST: &str = "lost";

/// All valid outcome values.
pub const VALID_OUTCOMES: &[&str] = &[
    OUTCOME_UNKNOWN,
    OUTCOME_DM_OPENED,
    OUTCOME_DM_REPLIED,
    OUTCOME_BOOKED_CALL,
    OUTCOME_WON,
    OUTCOME_LOST,
];

/// Validate that an outcome string is one of the accepted values.
pub fn validate_outcome(outcome: &str) -> Result<(), String> {
    if VALID_OUTCOMES.contains(&outcome) {
        Ok(())
    } else {
        Err(format!(
            "Invalid outcome '{outcome}'. Must be one of: {}",
            VALID_OUTCOMES.join(", ")
        ))
    }
}

// ---------------------------------------------------------------------------
// Campaign-day lifecycle
// ---------------------------------------------------------------------------

/// Campaign-day status IDs (1-based SMALLSERIAL) and allowed transitions.
///
/// Duplicated from the `db` crate's `CampaignDayStatus` enum because `core`
/// has no internal deps.
pub mod lifecycle {
    pub const PLANNING: i16 = 1;
    pub const ACTIVE: i16 = 2;
    pub const COMPLETED: i16 = 3;
    pub const ARCHIVED: i16 = 4;

    /// Status IDs reachable from `from_status`.
    pub fn valid_transitions(from_status: i16) -> &'static [i16] {
        match from_status {
            PLANNING => &[ACTIVE, ARCHIVED],
            ACTIVE => &[COMPLETED, ARCHIVED],
            COMPLETED => &[ARCHIVED],
            // Archived is terminal; unknown ids go nowhere.
            _ => &[],
        }
    }

    pub fn can_transition(from: i16, to: i16) -> bool {
        valid_transitions(from).contains(&to)
    }

    /// Validate a transition, returning a descriptive message for invalid ones.
    pub fn validate_transition(from: i16, to: i16) -> Result<(), String> {
        if can_transition(from, to) {
            Ok(())
        } else {
            Err(format!(
                "Invalid campaign day transition: {} ({from}) -> {} ({to})",
                status_name(from),
                status_name(to)
            ))
        }
    }

    /// Whether assignments may still be changed in this status.
    pub fn is_editable(status: i16) -> bool {
        status == PLANNING || status == ACTIVE
    }

    pub fn status_name(id: i16) -> &'static str {
        match id {
            PLANNING => "Planning",
            ACTIVE => "Active",
            COMPLETED => "Completed",
            ARCHIVED => "Archived",
            _ => "Unknown",
        }
    }
}
