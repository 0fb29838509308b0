//! Shared query parameter types for API handlers.

use blitz_core::types::CampaignDate;
use serde::Deserialize;

/// Generic pagination parameters (`?limit=&offset=`).
///
/// Values are clamped in the handler via `clamp_limit` / `clamp_offset`.
#[derive(Debug, Deserialize)]
pub struct PaginationParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// `?date=YYYY-MM-DD`; defaults to today (UTC) when omitted.
#[derive(Debug, Deserialize)]
pub struct DateParams {
    pub date: Option<CampaignDate>,
}

impl DateParams {
    pub fn date_or_today(&self) -> CampaignDate {
        self.date.unwrap_or_else(|| chrono::Utc::now().date_naive())
    }
}
