//! PCOS profile and daily log models.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{CyclePosition, CycleProfile};
use crate::engine::{position_on, EngineResult};

/// PCOS subtype, used as a lookup key into food rating tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PcosType {
    InsulinResistant,
    Inflammatory,
    Adrenal,
    PostPill,
    #[default]
    Unknown,
}

impl PcosType {
    pub const ALL: [PcosType; 5] = [
        PcosType::InsulinResistant,
        PcosType::Inflammatory,
        PcosType::Adrenal,
        PcosType::PostPill,
        PcosType::Unknown,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PcosType::InsulinResistant => "insulin_resistant",
            PcosType::Inflammatory => "inflammatory",
            PcosType::Adrenal => "adrenal",
            PcosType::PostPill => "post_pill",
            PcosType::Unknown => "unknown",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PcosType::InsulinResistant => "Insulin Resistant",
            PcosType::Inflammatory => "Inflammatory",
            PcosType::Adrenal => "Adrenal",
            PcosType::PostPill => "Post-Pill",
            PcosType::Unknown => "Unknown",
        }
    }

    /// Lenient conversion: anything unrecognised (or absent) is `Unknown`.
    pub fn from_tag(tag: Option<&str>) -> PcosType {
        tag.and_then(|t| t.parse().ok()).unwrap_or_default()
    }
}

impl fmt::Display for PcosType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PcosType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['-', ' '], "_").as_str() {
            "insulin_resistant" => Ok(PcosType::InsulinResistant),
            "inflammatory" => Ok(PcosType::Inflammatory),
            "adrenal" => Ok(PcosType::Adrenal),
            "post_pill" => Ok(PcosType::PostPill),
            "unknown" => Ok(PcosType::Unknown),
            other => Err(format!("unknown PCOS type: {}", other)),
        }
    }
}

/// A user's stored PCOS and cycle profile (one per user).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PcosProfile {
    /// Row ID - None until first insert
    pub id: Option<i64>,
    /// Identity-provider subject
    pub user_id: String,
    pub pcos_type: PcosType,
    pub cycle_length: i32,
    /// First day of the most recent period
    pub last_period_date: NaiveDate,
    /// Last day of that period, if the user recorded it
    pub last_period_end: Option<NaiveDate>,
    /// Self-reported symptoms
    pub symptoms: Vec<String>,
    /// Last update timestamp (RFC 3339)
    pub updated_at: String,
}

impl PcosProfile {
    /// Create a new profile with default cycle length and unknown PCOS type.
    pub fn new(user_id: String, last_period_date: NaiveDate) -> Self {
        Self {
            id: None,
            user_id,
            pcos_type: PcosType::Unknown,
            cycle_length: super::DEFAULT_CYCLE_LENGTH,
            last_period_date,
            last_period_end: None,
            symptoms: Vec::new(),
            updated_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Cycle data for the phase calculator.
    pub fn cycle_profile(&self) -> CycleProfile {
        CycleProfile {
            last_period_start: self.last_period_date,
            last_period_end: self.last_period_end,
            cycle_length: self.cycle_length,
        }
    }
}

/// A single day's symptom log.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DailyLog {
    /// Row ID - None until first insert
    pub id: Option<i64>,
    pub user_id: String,
    pub date: NaiveDate,
    /// 1-based cycle day on `date`
    pub cycle_day: u32,
    pub symptoms: Vec<String>,
    /// Energy level 1-10
    pub energy_level: Option<u8>,
    pub mood: Option<String>,
    pub notes: Option<String>,
}

impl DailyLog {
    /// Create an empty log for a date whose cycle position is already known.
    pub fn new(user_id: String, date: NaiveDate, position: CyclePosition) -> Self {
        Self {
            id: None,
            user_id,
            date,
            cycle_day: position.display_day(),
            symptoms: Vec::new(),
            energy_level: None,
            mood: None,
            notes: None,
        }
    }

    /// Create an empty log for `date`, placing it in the profile's cycle.
    ///
    /// Dates before the last period start are allowed so earlier days can be
    /// back-filled after a new period is recorded.
    pub fn for_date(user_id: String, date: NaiveDate, profile: &PcosProfile) -> EngineResult<Self> {
        let position = position_on(&profile.cycle_profile(), date)?;
        Ok(Self::new(user_id, date, position))
    }

    /// Check whether the energy level is within 1-10 (or absent).
    pub fn has_valid_energy(&self) -> bool {
        self.energy_level.map_or(true, |e| (1..=10).contains(&e))
    }
}
