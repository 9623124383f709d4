//! Cycle phase calculator.
//!
//! Phase boundaries (0-based cycle day):
//! - menstrual:  `0 .. menstrual_duration`
//! - follicular: `menstrual_duration .. 14`
//! - ovulatory:  `14 .. 17`
//! - luteal:     `17 ..`
//!
//! The 14/17 boundaries do not scale with cycle length. For cycles far from
//! 28 days this places ovulation too early or too late; it is kept as a
//! known approximation.

use chrono::{Duration, NaiveDate};
use tracing::debug;

use crate::models::{CyclePhase, CyclePosition, CycleProfile, ScheduledDay};

use super::{EngineError, EngineResult};

/// Menstrual duration used when no plausible period end is recorded.
pub const DEFAULT_MENSTRUAL_DURATION: u32 = 5;

/// Shortest recorded period accepted as a duration.
pub const MIN_MENSTRUAL_DURATION: i64 = 2;

/// Longest recorded period accepted as a duration.
pub const MAX_MENSTRUAL_DURATION: i64 = 10;

/// First 0-based cycle day of the ovulatory window.
pub const OVULATORY_START_DAY: u32 = 14;

/// First 0-based cycle day of the luteal phase.
pub const LUTEAL_START_DAY: u32 = 17;

/// Compute the 0-based cycle day and phase of `today`.
///
/// Fails when the cycle length is not positive or the period start lies
/// after `today`.
pub fn compute_phase(profile: &CycleProfile, today: NaiveDate) -> EngineResult<CyclePosition> {
    validate(profile)?;
    if profile.last_period_start > today {
        return Err(EngineError::InvalidProfile(format!(
            "last period start {} is after {}",
            profile.last_period_start, today
        )));
    }

    let offset = days_between(profile.last_period_start, today);
    let position = position_at_offset(profile, offset);

    debug!(
        cycle_day = position.cycle_day,
        phase = %position.phase,
        cycle_length = profile.cycle_length,
        "computed cycle position"
    );

    Ok(position)
}

/// Position for an arbitrary day offset from the period start.
///
/// Offsets may be negative; they are reduced with a true modulo so dates
/// before the start land in the previous cycle instead of producing a
/// negative cycle day.
pub fn position_at_offset(profile: &CycleProfile, offset_days: i64) -> CyclePosition {
    let cycle_length = i64::from(profile.cycle_length.max(1));
    let cycle_day = offset_days.rem_euclid(cycle_length) as u32;

    CyclePosition {
        cycle_day,
        phase: classify(cycle_day, menstrual_duration(profile)),
    }
}

/// Length of the menstrual phase for this profile.
///
/// Uses the recorded period when its inclusive length is within 2-10 days,
/// otherwise [`DEFAULT_MENSTRUAL_DURATION`].
pub fn menstrual_duration(profile: &CycleProfile) -> u32 {
    profile
        .last_period_end
        .map(|end| days_between(profile.last_period_start, end) + 1)
        .filter(|derived| (MIN_MENSTRUAL_DURATION..=MAX_MENSTRUAL_DURATION).contains(derived))
        .map(|derived| derived as u32)
        .unwrap_or(DEFAULT_MENSTRUAL_DURATION)
}

/// Classify a 0-based cycle day.
pub fn classify(cycle_day: u32, menstrual_duration: u32) -> CyclePhase {
    if cycle_day < menstrual_duration {
        CyclePhase::Menstrual
    } else if cycle_day < OVULATORY_START_DAY {
        CyclePhase::Follicular
    } else if cycle_day < LUTEAL_START_DAY {
        CyclePhase::Ovulatory
    } else {
        CyclePhase::Luteal
    }
}

/// Forecast cycle positions for `days` consecutive dates starting at `from`.
///
/// Unlike [`compute_phase`], `from` may precede the period start; those
/// days are placed in the previous cycle.
pub fn phase_schedule(
    profile: &CycleProfile,
    from: NaiveDate,
    days: u32,
) -> EngineResult<Vec<ScheduledDay>> {
    validate(profile)?;

    let first_offset = days_between(profile.last_period_start, from);
    (0..days)
        .map(|i| {
            let i = i64::from(i);
            let date = from.checked_add_signed(Duration::days(i)).ok_or_else(|| {
                EngineError::InvalidProfile(format!(
                    "schedule from {} runs past the last representable date",
                    from
                ))
            })?;
            Ok(ScheduledDay {
                date,
                position: position_at_offset(profile, first_offset + i),
            })
        })
        .collect()
}

/// Position of any calendar date, including dates before the period start.
///
/// Only the cycle length is validated; earlier dates fall into the
/// previous cycle as in [`position_at_offset`].
pub fn position_on(profile: &CycleProfile, date: NaiveDate) -> EngineResult<CyclePosition> {
    validate(profile)?;
    Ok(position_at_offset(profile, days_between(profile.last_period_start, date)))
}

/// Whole calendar days from `from` to `to` (negative when `to` is earlier).
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}

fn validate(profile: &CycleProfile) -> EngineResult<()> {
    if profile.cycle_length <= 0 {
        return Err(EngineError::InvalidProfile(format!(
            "cycle length must be positive, got {}",
            profile.cycle_length
        )));
    }
    Ok(())
}
