//! Cycle & suitability engine.
//!
//! Pipeline: Phase Calculator → Suitability Resolver → Ranking
//!
//! Everything here is pure: no I/O, no clock reads. Callers pass `today`
//! explicitly and own the profile and catalog data.

mod phase;
mod ranking;
mod suitability;

pub use phase::*;
pub use ranking::*;
pub use suitability::*;

use chrono::NaiveDate;
use thiserror::Error;

use crate::models::{CyclePosition, PcosProfile, PcosType};

/// Engine errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Invalid profile: {0}")]
    InvalidProfile(String),
}

pub type EngineResult<T> = Result<T, EngineError>;

/// The two lookup keys every suitability decision needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuitabilityContext {
    pub pcos_type: PcosType,
    pub position: CyclePosition,
}

impl SuitabilityContext {
    pub fn new(pcos_type: PcosType, position: CyclePosition) -> Self {
        Self { pcos_type, position }
    }

    /// Build the context for a stored profile on a given day.
    pub fn for_profile(profile: &PcosProfile, today: NaiveDate) -> EngineResult<Self> {
        let position = compute_phase(&profile.cycle_profile(), today)?;
        Ok(Self::new(profile.pcos_type, position))
    }
}
