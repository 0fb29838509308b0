//! US timezone inference from free-text profile locations.
//!
//! Outreach targets carry whatever the profile owner typed as a location
//! ("Austin, TX", "somewhere on the west coast", "NYC 🗽"). Waves are
//! scheduled per timezone, so every assignment gets a best-effort timezone
//! code derived from that text with a fixed keyword table. Anything that
//! does not match defaults to Eastern.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Timezone codes
// ---------------------------------------------------------------------------

/// Timezone codes an assignment can be tagged with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimezoneCode {
    #[serde(rename = "HST")]
    Hst,
    #[serde(rename = "PT")]
    Pt,
    #[serde(rename = "MT")]
    Mt,
    #[serde(rename = "CT")]
    Ct,
    #[serde(rename = "ET")]
    Et,
}

/// Timezone used when a location is empty or unrecognised.
pub const DEFAULT_TIMEZONE: TimezoneCode = TimezoneCode::Et;

impl TimezoneCode {
    /// All codes, west to east.
    pub const ALL: [TimezoneCode; 5] = [
        TimezoneCode::Hst,
        TimezoneCode::Pt,
        TimezoneCode::Mt,
        TimezoneCode::Ct,
        TimezoneCode::Et,
    ];

    /// Database / wire representation.
    pub fn as_str(self) -> &'static str {
        match self {
            TimezoneCode::Hst => "HST",
            TimezoneCode::Pt => "PT",
            TimezoneCode::Mt => "MT",
            TimezoneCode::Ct => "CT",
            TimezoneCode::Et => "ET",
        }
    }

    /// Standard-time hour offset relative to Eastern.
    pub fn offset_from_eastern(self) -> i32 {
        match self {
            TimezoneCode::Hst => -5,
            TimezoneCode::Pt => -3,
            TimezoneCode::Mt => -2,
            TimezoneCode::Ct => -1,
            TimezoneCode::Et => 0,
        }
    }
}

impl fmt::Display for TimezoneCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimezoneCode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TimezoneCode::ALL
            .into_iter()
            .find(|tz| tz.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "Invalid timezone code '{s}'. Must be one of: HST, PT, MT, CT, ET"
                ))
            })
    }
}

// ---------------------------------------------------------------------------
// Keyword table
// ---------------------------------------------------------------------------

struct TimezoneRule {
    zone: TimezoneCode,
    /// Lowercase substrings matched against the lowercased location.
    phrases: &'static [&'static str],
    /// Two-letter state abbreviations, matched case-sensitively as whole
    /// tokens so "or"/"me"/"in" in prose do not trigger.
    abbreviations: &'static [&'static str],
}

/// Rules are evaluated in order; the first match wins. Hawaii and Pacific
/// come first so "Mountain View, CA" resolves to PT.
const RULES: &[TimezoneRule] = &[
    TimezoneRule {
        zone: TimezoneCode::Hst,
        phrases: &["hawaii", "honolulu", "maui", "oahu", "kauai"],
        abbreviations: &["HI"],
    },
    TimezoneRule {
        zone: TimezoneCode::Pt,
        phrases: &[
            "pacific",
            "west coast",
            "california",
            "los angeles",
            "san francisco",
            "san diego",
            "san jose",
            "bay area",
            "sacramento",
            "seattle",
            "oregon",
            "washington state",
            "nevada",
            "las vegas",
        ],
        abbreviations: &["CA", "WA", "OR", "NV"],
    },
    TimezoneRule {
        zone: TimezoneCode::Mt,
        phrases: &[
            "mountain",
            "colorado",
            "denver",
            "boulder",
            "utah",
            "salt lake",
            "arizona",
            "phoenix",
            "scottsdale",
            "montana",
            "idaho",
            "boise",
            "wyoming",
            "new mexico",
            "albuquerque",
        ],
        abbreviations: &["CO", "UT", "AZ", "MT", "ID", "WY", "NM"],
    },
    TimezoneRule {
        zone: TimezoneCode::Ct,
        phrases: &[
            "central",
            "texas",
            "austin",
            "dallas",
            "houston",
            "san antonio",
            "chicago",
            "illinois",
            "minnesota",
            "minneapolis",
            "missouri",
            "st. louis",
            "kansas",
            "oklahoma",
            "louisiana",
            "new orleans",
            "tennessee",
            "nashville",
            "memphis",
            "wisconsin",
            "milwaukee",
            "iowa",
            "alabama",
            "mississippi",
            "nebraska",
        ],
        abbreviations: &[
            "TX", "IL", "MN", "MO", "KS", "OK", "LA", "TN", "WI", "IA", "AL", "AR", "MS", "NE",
        ],
    },
    TimezoneRule {
        zone: TimezoneCode::Et,
        phrases: &[
            "eastern",
            "east coast",
            "new york",
            "nyc",
            "brooklyn",
            "manhattan",
            "boston",
            "miami",
            "florida",
            "atlanta",
            "washington dc",
            "washington, dc",
            "d.c.",
            "philadelphia",
            "pennsylvania",
            "new jersey",
            "ohio",
            "michigan",
            "detroit",
            "carolina",
            "virginia",
            "massachusetts",
        ],
        abbreviations: &[
            "NY", "FL", "GA", "DC", "PA", "NJ", "OH", "MI", "NC", "SC", "VA", "MA", "CT", "MD",
            "ME", "NH", "VT", "RI", "DE",
        ],
    },
];

/// Infer a timezone code from a free-text location.
///
/// Pure function of its input: empty or unmatched text yields
/// [`DEFAULT_TIMEZONE`].
pub fn infer_timezone(location: &str) -> TimezoneCode {
    let lowered = location.to_lowercase();
    let tokens: Vec<&str> = location
        .split(|c: char| !c.is_ascii_alphabetic())
        .filter(|t| t.len() == 2)
        .collect();

    RULES
        .iter()
        .find(|rule| {
            rule.phrases.iter().any(|p| lowered.contains(p))
                || rule.abbreviations.iter().any(|a| tokens.contains(a))
                || (rule.zone == TimezoneCode::Pt && mentions_los_angeles(location))
        })
        .map(|rule| rule.zone)
        .unwrap_or(DEFAULT_TIMEZONE)
}

/// A whole-word "LA" means Los Angeles unless it sits after a comma in the
/// state position ("New Orleans, LA"), where it means Louisiana.
fn mentions_los_angeles(location: &str) -> bool {
    location.match_indices("LA").any(|(i, _)| {
        let (before, rest) = (&location[..i], &location[i + 2..]);
        let starts_word = !before.ends_with(|c: char| c.is_ascii_alphabetic());
        let ends_word = !rest.starts_with(|c: char| c.is_ascii_alphabetic());
        starts_word && ends_word && !before.trim_end().ends_with(',')
    })
}

/// Same as [`infer_timezone`] but tolerates a missing location.
pub fn infer_timezone_opt(location: Option<&str>) -> TimezoneCode {
    location.map(infer_timezone).unwrap_or(DEFAULT_TIMEZONE)
}
