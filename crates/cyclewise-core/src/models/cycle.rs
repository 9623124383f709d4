//! Menstrual cycle models.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::engine::{EngineError, EngineResult};

/// Cycle length used when a profile does not specify one.
pub const DEFAULT_CYCLE_LENGTH: i32 = 28;

/// Date format used for every date crossing a storage or FFI boundary.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// One of the four segments of a menstrual cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CyclePhase {
    Menstrual,
    Follicular,
    Ovulatory,
    Luteal,
}

impl CyclePhase {
    /// All phases in cycle order.
    pub const ALL: [CyclePhase; 4] = [
        CyclePhase::Menstrual,
        CyclePhase::Follicular,
        CyclePhase::Ovulatory,
        CyclePhase::Luteal,
    ];

    /// Storage/wire tag (e.g. `"luteal"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            CyclePhase::Menstrual => "menstrual",
            CyclePhase::Follicular => "follicular",
            CyclePhase::Ovulatory => "ovulatory",
            CyclePhase::Luteal => "luteal",
        }
    }

    /// Human readable label (e.g. `"Luteal"`).
    pub fn label(&self) -> &'static str {
        match self {
            CyclePhase::Menstrual => "Menstrual",
            CyclePhase::Follicular => "Follicular",
            CyclePhase::Ovulatory => "Ovulatory",
            CyclePhase::Luteal => "Luteal",
        }
    }

    /// The phase that follows this one, wrapping luteal back to menstrual.
    pub fn next(&self) -> CyclePhase {
        match self {
            CyclePhase::Menstrual => CyclePhase::Follicular,
            CyclePhase::Follicular => CyclePhase::Ovulatory,
            CyclePhase::Ovulatory => CyclePhase::Luteal,
            CyclePhase::Luteal => CyclePhase::Menstrual,
        }
    }
}

impl fmt::Display for CyclePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CyclePhase {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "menstrual" => Ok(CyclePhase::Menstrual),
            "follicular" => Ok(CyclePhase::Follicular),
            "ovulatory" => Ok(CyclePhase::Ovulatory),
            "luteal" => Ok(CyclePhase::Luteal),
            other => Err(format!("unknown cycle phase: {}", other)),
        }
    }
}

/// Where a given date falls inside the current cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CyclePosition {
    /// 0-based offset within the cycle (`0..cycle_length`)
    pub cycle_day: u32,
    /// Phase the offset falls into
    pub phase: CyclePhase,
}

impl CyclePosition {
    /// 1-based "Day N" for display.
    pub fn display_day(&self) -> u32 {
        self.cycle_day + 1
    }
}

/// Cycle data needed to place a date inside the cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleProfile {
    /// First day of the most recent period
    pub last_period_start: NaiveDate,
    /// Last day of that period, if recorded
    pub last_period_end: Option<NaiveDate>,
    /// Total days in one cycle
    pub cycle_length: i32,
}

impl CycleProfile {
    /// Create a profile with the default cycle length and no recorded period end.
    pub fn new(last_period_start: NaiveDate) -> Self {
        Self {
            last_period_start,
            last_period_end: None,
            cycle_length: DEFAULT_CYCLE_LENGTH,
        }
    }

    pub fn with_period_end(mut self, end: NaiveDate) -> Self {
        self.last_period_end = Some(end);
        self
    }

    pub fn with_cycle_length(mut self, cycle_length: i32) -> Self {
        self.cycle_length = cycle_length;
        self
    }

    /// Build a profile from ISO date strings as stored or received over FFI.
    ///
    /// A missing or blank start date, any unparseable date, and a non-positive
    /// cycle length are all reported as [`EngineError::InvalidProfile`].
    pub fn parse(
        last_period_start: Option<&str>,
        last_period_end: Option<&str>,
        cycle_length: Option<i32>,
    ) -> EngineResult<Self> {
        let start = match last_period_start.map(str::trim) {
            Some(s) if !s.is_empty() => parse_date(s)?,
            _ => {
                return Err(EngineError::InvalidProfile(
                    "last period start is required".into(),
                ))
            }
        };

        let end = match last_period_end.map(str::trim) {
            Some(s) if !s.is_empty() => Some(parse_date(s)?),
            _ => None,
        };

        let cycle_length = cycle_length.unwrap_or(DEFAULT_CYCLE_LENGTH);
        if cycle_length <= 0 {
            return Err(EngineError::InvalidProfile(format!(
                "cycle length must be positive, got {}",
                cycle_length
            )));
        }

        Ok(Self {
            last_period_start: start,
            last_period_end: end,
            cycle_length,
        })
    }
}

/// A forecast entry: a calendar date and its position in the cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledDay {
    pub date: NaiveDate,
    pub position: CyclePosition,
}

/// Parse an ISO `YYYY-MM-DD` date.
pub fn parse_date(s: &str) -> EngineResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
        .map_err(|e| EngineError::InvalidProfile(format!("invalid date '{}': {}", s, e)))
}
