//! Fixed wave configuration for outreach campaign days.
//!
//! Every campaign day has exactly four waves. Waves are not stored; they are
//! identified 1-4 and described by the compile-time table below.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::timezone::TimezoneCode;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Number of waves per campaign day.
pub const WAVE_COUNT: usize = 4;

/// Advisory per-wave capacity. Exceeding it is allowed and only reported.
pub const WAVE_CAPACITY: usize = 4;

/// Prefix of droppable wave zone identifiers (`wave-1` .. `wave-4`).
pub const WAVE_ZONE_PREFIX: &str = "wave-";

// ---------------------------------------------------------------------------
// Wave number
// ---------------------------------------------------------------------------

/// A validated wave number in `1..=4`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i16", into = "i16")]
pub struct WaveNumber(u8);

impl WaveNumber {
    pub const ALL: [WaveNumber; WAVE_COUNT] =
        [WaveNumber(1), WaveNumber(2), WaveNumber(3), WaveNumber(4)];

    /// Validate a raw wave number.
    pub fn new(value: i64) -> Result<Self, CoreError> {
        if (1..=WAVE_COUNT as i64).contains(&value) {
            Ok(WaveNumber(value as u8))
        } else {
            Err(CoreError::Validation(format!(
                "Wave number must be between 1 and {WAVE_COUNT}, got {value}"
            )))
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// Zero-based index into per-wave arrays.
    pub fn index(self) -> usize {
        usize::from(self.0) - 1
    }

    /// Identifier of this wave's drop zone.
    pub fn zone_id(self) -> String {
        format!("{WAVE_ZONE_PREFIX}{}", self.0)
    }

    /// Parse a drop zone identifier. Only `wave-<n>` with a valid `n`
    /// is accepted.
    pub fn from_zone_id(zone_id: &str) -> Option<Self> {
        zone_id
            .strip_prefix(WAVE_ZONE_PREFIX)
            .and_then(|n| n.parse::<i64>().ok())
            .and_then(|n| WaveNumber::new(n).ok())
    }
}

impl TryFrom<i16> for WaveNumber {
    type Error = CoreError;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        WaveNumber::new(i64::from(value))
    }
}

impl From<WaveNumber> for i16 {
    fn from(value: WaveNumber) -> Self {
        i16::from(value.0)
    }
}

impl fmt::Display for WaveNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Wave slots
// ---------------------------------------------------------------------------

/// Static description of one wave.
#[derive(Debug, Clone, Copy)]
pub struct WaveSlot {
    pub number: WaveNumber,
    pub name: &'static str,
    /// Start of the window, hour of day in Eastern time.
    pub start_hour_et: u32,
    pub duration_hours: u32,
}

pub const WAVES: [WaveSlot; WAVE_COUNT] = [
    WaveSlot {
        number: WaveNumber(1),
        name: "Morning",
        start_hour_et: 9,
        duration_hours: 2,
    },
    WaveSlot {
        number: WaveNumber(2),
        name: "Midday",
        start_hour_et: 12,
        duration_hours: 2,
    },
    WaveSlot {
        number: WaveNumber(3),
        name: "Afternoon",
        start_hour_et: 15,
        duration_hours: 2,
    },
    WaveSlot {
        number: WaveNumber(4),
        name: "Evening",
        start_hour_et: 19,
        duration_hours: 2,
    },
];

/// Look up the slot for a wave.
pub fn wave_slot(number: WaveNumber) -> &'static WaveSlot {
    &WAVES[number.index()]
}

impl WaveSlot {
    /// Human-readable local window for a timezone, e.g. `"6 AM - 8 AM PT"`.
    pub fn time_range(&self, tz: TimezoneCode) -> String {
        let start = local_hour(self.start_hour_et, tz);
        let end = local_hour(self.start_hour_et + self.duration_hours, tz);
        format!("{} - {} {tz}", format_hour(start), format_hour(end))
    }

    /// Local windows for every supported timezone.
    pub fn time_ranges(&self) -> Vec<TimeRange> {
        TimezoneCode::ALL
            .into_iter()
            .map(|timezone| TimeRange {
                timezone,
                label: self.time_range(timezone),
            })
            .collect()
    }
}

/// A wave window rendered for one timezone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeRange {
    pub timezone: TimezoneCode,
    pub label: String,
}

fn local_hour(hour_et: u32, tz: TimezoneCode) -> u32 {
    (hour_et as i32 + tz.offset_from_eastern()).rem_euclid(24) as u32
}

fn format_hour(hour: u32) -> String {
    match hour {
        0 => "12 AM".to_string(),
        12 => "12 PM".to_string(),
        h if h < 12 => format!("{h} AM"),
        h => format!("{} PM", h - 12),
    }
}

// ---------------------------------------------------------------------------
// Capacity
// ---------------------------------------------------------------------------

/// Advisory capacity indicator for a wave.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CapacityState {
    Open,
    AtCapacity,
    OverCapacity,
}

/// Capacity indicator for a wave holding `count` assignments.
pub fn capacity_state(count: usize) -> CapacityState {
    match count.cmp(&WAVE_CAPACITY) {
        std::cmp::Ordering::Less => CapacityState::Open,
        std::cmp::Ordering::Equal => CapacityState::AtCapacity,
        std::cmp::Ordering::Greater => CapacityState::OverCapacity,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wave_number_bounds() {
        assert!(WaveNumber::new(0).is_err());
        assert!(WaveNumber::new(5).is_err());
        assert_eq!(WaveNumber::new(3).unwrap().get(), 3);
    }

    #[test]
    fn zone_ids_round_trip() {
        for wave in WaveNumber::ALL {
            assert_eq!(WaveNumber::from_zone_id(&wave.zone_id()), Some(wave));
        }
    }

    #[test]
    fn non_wave_zones_are_rejected() {
        assert_eq!(WaveNumber::from_zone_id("pool"), None);
        assert_eq!(WaveNumber::from_zone_id("wave-0"), None);
        assert_eq!(WaveNumber::from_zone_id("wave-5"), None);
        assert_eq!(WaveNumber::from_zone_id("wave-"), None);
        assert_eq!(WaveNumber::from_zone_id("wavelength-1"), None);
    }

    #[test]
    fn slots_are_indexed_by_number() {
        for wave in WaveNumber::ALL {
            assert_eq!(wave_slot(wave).number, wave);
        }
    }

    #[test]
    fn time_range_shifts_by_timezone() {
        let morning = wave_slot(WaveNumber::ALL[0]);
        assert_eq!(morning.time_range(TimezoneCode::Et), "9 AM - 11 AM ET");
        assert_eq!(morning.time_range(TimezoneCode::Pt), "6 AM - 8 AM PT");
        assert_eq!(morning.time_range(TimezoneCode::Hst), "4 AM - 6 AM HST");
    }

    #[test]
    fn midday_formats_noon() {
        let midday = wave_slot(WaveNumber::ALL[1]);
        assert_eq!(midday.time_range(TimezoneCode::Et), "12 PM - 2 PM ET");
        assert_eq!(midday.time_ranges().len(), TimezoneCode::ALL.len());
    }

    #[test]
    fn capacity_is_advisory_indicator() {
        assert_eq!(capacity_state(0), CapacityState::Open);
        assert_eq!(capacity_state(3), CapacityState::Open);
        assert_eq!(capacity_state(4), CapacityState::AtCapacity);
        assert_eq!(capacity_state(5), CapacityState::OverCapacity);
    }

    #[test]
    fn wave_number_deserializes_with_validation() {
        let ok: WaveNumber = serde_json::from_str("2").unwrap();
        assert_eq!(ok.get(), 2);
        assert!(serde_json::from_str::<WaveNumber>("9").is_err());
    }
}
