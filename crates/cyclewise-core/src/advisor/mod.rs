//! Grocery and fridge advice built on the engine and the catalog store.
//!
//! Pipeline: Profile → Cycle Position → Catalog Match → Verdict → Ranking

mod fridge;
mod grocery;
mod matcher;

pub use fridge::*;
pub use grocery::*;
pub use matcher::*;

use chrono::NaiveDate;
use thiserror::Error;

use crate::config::CoreConfig;
use crate::db::{Database, DbError};
use crate::engine::{EngineError, SuitabilityContext};

/// Advisor errors.
#[derive(Error, Debug)]
pub enum AdvisorError {
    #[error("Database error: {0}")]
    Database(#[from] DbError),

    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),
}

pub type AdvisorResult<T> = Result<T, AdvisorError>;

/// Coordinates catalog search and fridge assessment for one database.
pub struct Advisor<'a> {
    db: &'a Database,
    grocery: GroceryAdvisor<'a>,
    fridge: FridgeAssessor<'a>,
}

impl<'a> Advisor<'a> {
    /// Create a new advisor.
    pub fn new(db: &'a Database, config: &CoreConfig) -> Self {
        Self {
            db,
            grocery: GroceryAdvisor::new(db, config),
            fridge: FridgeAssessor::new(db, config),
        }
    }

    /// Load a user's profile and place `today` in their cycle.
    pub fn context_for_user(&self, user_id: &str, today: NaiveDate) -> AdvisorResult<SuitabilityContext> {
        let profile = self
            .db
            .get_pcos_profile(user_id)?
            .ok_or_else(|| DbError::NotFound(format!("profile for user {}", user_id)))?;
        Ok(SuitabilityContext::for_profile(&profile, today)?)
    }

    /// Get the grocery advisor for direct access.
    pub fn grocery(&self) -> &GroceryAdvisor<'a> {
        &self.grocery
    }

    /// Get the fridge assessor for direct access.
    pub fn fridge(&self) -> &FridgeAssessor<'a> {
        &self.fridge
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CyclePhase, PcosProfile, PcosType};

    #[test]
    fn test_context_for_user() {
        let db = Database::open_in_memory().unwrap();
        let mut profile = PcosProfile::new(
            "user-1".into(),
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        );
        profile.pcos_type = PcosType::PostPill;
        db.upsert_pcos_profile(&profile).unwrap();

        let advisor = Advisor::new(&db, &CoreConfig::default());
        let context = advisor
            .context_for_user("user-1", NaiveDate::from_ymd_opt(2024, 1, 15).unwrap())
            .unwrap();

        assert_eq!(context.pcos_type, PcosType::PostPill);
        assert_eq!(context.position.cycle_day, 14);
        assert_eq!(context.position.phase, CyclePhase::Ovulatory);
    }

    #[test]
    fn test_context_for_missing_user() {
        let db = Database::open_in_memory().unwrap();
        let advisor = Advisor::new(&db, &CoreConfig::default());

        let result = advisor.context_for_user("nobody", NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
        assert!(matches!(result, Err(AdvisorError::Database(DbError::NotFound(_)))));
    }

    #[test]
    fn test_context_for_future_period_start() {
        let db = Database::open_in_memory().unwrap();
        let profile = PcosProfile::new(
            "user-1".into(),
            NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
        );
        db.upsert_pcos_profile(&profile).unwrap();

        let advisor = Advisor::new(&db, &CoreConfig::default());
        let result = advisor.context_for_user("user-1", NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
        assert!(matches!(result, Err(AdvisorError::Engine(EngineError::InvalidProfile(_)))));
    }
}
