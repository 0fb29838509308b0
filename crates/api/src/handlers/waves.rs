//! Static wave configuration.

use axum::Json;
use blitz_core::waves::{TimeRange, WaveNumber, WAVES, WAVE_CAPACITY};
use serde::Serialize;

use crate::response::DataResponse;

#[derive(Debug, Serialize)]
pub struct WaveInfo {
    pub wave_number: WaveNumber,
    pub name: &'static str,
    pub zone_id: String,
    pub start_hour_et: u32,
    pub duration_hours: u32,
    pub capacity: usize,
    pub time_ranges: Vec<TimeRange>,
}

/// GET /api/v1/waves
///
/// The four waves with their local time windows per timezone.
pub async fn list_waves() -> Json<DataResponse<Vec<WaveInfo>>> {
    let waves = WAVES
        .iter()
        .map(|slot| WaveInfo {
            wave_number: slot.number,
            name: slot.name,
            zone_id: slot.number.zone_id(),
            start_hour_et: slot.start_hour_et,
            duration_hours: slot.duration_hours,
            capacity: WAVE_CAPACITY,
            time_ranges: slot.time_ranges(),
        })
        .collect();

    Json(DataResponse { data: waves })
}
