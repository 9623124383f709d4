//! Cyclewise Core Library
//!
//! Local-first cycle tracking and PCOS-aware grocery advice.
//!
//! # Architecture
//!
//! ```text
//!   Profile (last period, cycle length, PCOS type)      today
//!                         │                               │
//!                         └──────────────┬────────────────┘
//!                                        ▼
//!                               Phase Calculator
//!                         (cycle day 0..len, phase)
//!                                        │
//!        Catalog (FTS5) ──► Matcher ──► Suitability Resolver
//!                                (avoid > recommended > neutral)
//!                                        │
//!                                        ▼
//!                                     Ranking
//!                                        │
//!                 ┌──────────────────────┼──────────────────────┐
//!                 ▼                      ▼                      ▼
//!          Grocery Search         Fridge Report           Grocery Lists
//! ```
//!
//! # Core Principle
//!
//! **One engine for every screen.** The phase and verdict a user sees are
//! computed by the same pure functions whether they come from search, the
//! fridge scanner, or a shopping list. `today` is always passed in.
//!
//! # Modules
//!
//! - [`engine`]: Pure phase calculation, suitability resolution and ranking
//! - [`db`]: SQLite database layer with FTS5 search
//! - [`models`]: Domain types (PcosProfile, FoodItem, GroceryList, etc.)
//! - [`advisor`]: Grocery search and fridge assessment over the catalog
//! - [`config`]: Environment-driven configuration
//! - [`seed`]: Starter catalog

pub mod advisor;
pub mod config;
pub mod db;
pub mod engine;
pub mod models;
pub mod seed;

// Re-export commonly used types
pub use advisor::{Advisor, AdvisorError, FridgeAssessor, GroceryAdvisor, GroceryFilter};
pub use config::CoreConfig;
pub use db::Database;
pub use engine::{compute_phase, rank_by_suitability, resolve_suitability, EngineError, SuitabilityContext};
pub use models::{
    CyclePhase, CyclePosition, CycleProfile, DailyLog, FoodCategory, FoodItem, FridgeReport,
    GroceryList, GroceryListItem, PcosProfile, PcosType, RatedFood, SuitabilityRating,
    SuitabilityVerdict,
};

// UniFFI setup - using proc macros
uniffi::setup_scaffolding!();

use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use tracing::info;

// =========================================================================
// FFI Error Type
// =========================================================================

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum CyclewiseError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid profile: {0}")]
    InvalidProfile(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<db::DbError> for CyclewiseError {
    fn from(e: db::DbError) -> Self {
        match e {
            db::DbError::NotFound(what) => CyclewiseError::NotFound(what),
            db::DbError::Constraint(msg) => CyclewiseError::InvalidInput(msg),
            db::DbError::Json(e) => CyclewiseError::SerializationError(e.to_string()),
            other => CyclewiseError::DatabaseError(other.to_string()),
        }
    }
}

impl From<EngineError> for CyclewiseError {
    fn from(e: EngineError) -> Self {
        match e {
            EngineError::InvalidProfile(msg) => CyclewiseError::InvalidProfile(msg),
        }
    }
}

impl From<AdvisorError> for CyclewiseError {
    fn from(e: AdvisorError) -> Self {
        match e {
            AdvisorError::Database(e) => e.into(),
            AdvisorError::Engine(e) => e.into(),
        }
    }
}

impl From<serde_json::Error> for CyclewiseError {
    fn from(e: serde_json::Error) -> Self {
        CyclewiseError::SerializationError(e.to_string())
    }
}

impl<T> From<std::sync::PoisonError<T>> for CyclewiseError {
    fn from(e: std::sync::PoisonError<T>) -> Self {
        CyclewiseError::DatabaseError(format!("Lock poisoned: {}", e))
    }
}

/// Longest phase forecast served over FFI.
pub const MAX_FORECAST_DAYS: u32 = 366;

// =========================================================================
// Factory Functions (exported to FFI)
// =========================================================================

/// Open or create a database at the given path.
#[uniffi::export]
pub fn open_database(path: String) -> Result<Arc<CyclewiseCore>, CyclewiseError> {
    let config = CoreConfig {
        database_path: path,
        ..CoreConfig::from_env()
    };
    CyclewiseCore::open(config)
}

/// Create an in-memory database (for testing).
#[uniffi::export]
pub fn open_database_in_memory() -> Result<Arc<CyclewiseCore>, CyclewiseError> {
    let db = Database::open_in_memory()?;
    CyclewiseCore::with_database(db, CoreConfig::default())
}

/// Open the database named by `CYCLEWISE_DB_PATH`, with all other settings
/// taken from the environment.
#[uniffi::export]
pub fn open_database_from_env() -> Result<Arc<CyclewiseCore>, CyclewiseError> {
    CyclewiseCore::open(CoreConfig::from_env())
}

// =========================================================================
// Main API Object
// =========================================================================

/// Thread-safe database wrapper for FFI.
#[derive(uniffi::Object)]
pub struct CyclewiseCore {
    db: Arc<Mutex<Database>>,
    config: CoreConfig,
}

impl CyclewiseCore {
    fn open(config: CoreConfig) -> Result<Arc<Self>, CyclewiseError> {
        let db = Database::open(&config.database_path)?;
        info!(path = %config.database_path, "opened database");
        Self::with_database(db, config)
    }

    fn with_database(db: Database, config: CoreConfig) -> Result<Arc<Self>, CyclewiseError> {
        if config.seed_catalog {
            db.seed_catalog(&seed::default_catalog())?;
        }
        Ok(Arc::new(Self {
            db: Arc::new(Mutex::new(db)),
            config,
        }))
    }
}

#[uniffi::export]
impl CyclewiseCore {
    // =========================================================================
    // Profile Operations
    // =========================================================================

    /// Get a user's PCOS profile.
    pub fn get_profile(&self, user_id: String) -> Result<Option<FfiPcosProfile>, CyclewiseError> {
        let db = self.db.lock()?;
        let profile = db.get_pcos_profile(&user_id)?;
        Ok(profile.map(|p| p.into()))
    }

    /// Create or replace a user's PCOS profile.
    pub fn update_profile(&self, profile: FfiPcosProfileInput) -> Result<FfiPcosProfile, CyclewiseError> {
        let profile = PcosProfile::try_from(profile)?;
        let db = self.db.lock()?;
        let stored = db.upsert_pcos_profile(&profile)?;
        Ok(stored.into())
    }

    // =========================================================================
    // Cycle Operations
    // =========================================================================

    /// Where `today` (YYYY-MM-DD) falls in the user's cycle.
    pub fn current_position(&self, user_id: String, today: String) -> Result<FfiCyclePosition, CyclewiseError> {
        let today = parse_day(&today)?;
        let db = self.db.lock()?;
        let context = Advisor::new(&db, &self.config).context_for_user(&user_id, today)?;
        Ok(context.into())
    }

    /// Phase forecast for `days` consecutive days starting at `from`.
    ///
    /// `days` is capped at [`MAX_FORECAST_DAYS`].
    pub fn phase_forecast(
        &self,
        user_id: String,
        from: String,
        days: u32,
    ) -> Result<Vec<FfiScheduledDay>, CyclewiseError> {
        if days > MAX_FORECAST_DAYS {
            return Err(CyclewiseError::InvalidInput(format!(
                "forecast of {} days exceeds the limit of {}",
                days, MAX_FORECAST_DAYS
            )));
        }
        let from = parse_day(&from)?;
        let db = self.db.lock()?;
        let profile = require_profile(&db, &user_id)?;
        let schedule = engine::phase_schedule(&profile.cycle_profile(), from, days)?;
        Ok(schedule.into_iter().map(|d| d.into()).collect())
    }

    // =========================================================================
    // Daily Log Operations
    // =========================================================================

    /// Record a day's symptoms. The cycle day is computed from the profile.
    pub fn log_day(&self, log: FfiDailyLogInput) -> Result<FfiDailyLog, CyclewiseError> {
        let date = parse_day(&log.date)?;
        let db = self.db.lock()?;
        let profile = require_profile(&db, &log.user_id)?;

        let mut daily = DailyLog::for_date(log.user_id, date, &profile)?;
        daily.symptoms = log.symptoms;
        daily.energy_level = log.energy_level;
        daily.mood = log.mood;
        daily.notes = log.notes;

        let id = db.insert_daily_log(&daily)?;
        daily.id = Some(id);
        Ok(daily.into())
    }

    /// A user's logs, newest first.
    pub fn list_logs(&self, user_id: String) -> Result<Vec<FfiDailyLog>, CyclewiseError> {
        let db = self.db.lock()?;
        let logs = db.list_daily_logs(&user_id)?;
        Ok(logs.into_iter().map(|l| l.into()).collect())
    }

    // =========================================================================
    // Grocery Operations
    // =========================================================================

    /// Search the catalog with verdicts for the user's current phase.
    pub fn search_groceries(
        &self,
        user_id: String,
        query: String,
        today: String,
        suitability: Option<String>,
        dietary_tag: Option<String>,
    ) -> Result<Vec<FfiRatedFood>, CyclewiseError> {
        let today = parse_day(&today)?;
        let filter = GroceryFilter {
            suitability: suitability
                .as_deref()
                .map(str::parse)
                .transpose()
                .map_err(CyclewiseError::InvalidInput)?,
            dietary_tag,
        };

        let db = self.db.lock()?;
        let advisor = Advisor::new(&db, &self.config);
        let context = advisor.context_for_user(&user_id, today)?;
        let results = advisor.grocery().search(&query, &context, &filter)?;
        Ok(results.into_iter().map(|r| r.into()).collect())
    }

    /// Add or update a catalog item.
    pub fn upsert_food_item(&self, item: FfiFoodItem) -> Result<i64, CyclewiseError> {
        let item = FoodItem::try_from(item)?;
        let db = self.db.lock()?;
        Ok(db.upsert_food_item(&item)?)
    }

    /// Rate the contents of a scanned fridge.
    pub fn assess_fridge(
        &self,
        user_id: String,
        today: String,
        items: Vec<FfiScannedFood>,
    ) -> Result<FfiFridgeReport, CyclewiseError> {
        let today = parse_day(&today)?;
        let scanned: Vec<models::ScannedFood> = items.into_iter().map(|i| i.into()).collect();

        let db = self.db.lock()?;
        let advisor = Advisor::new(&db, &self.config);
        let context = advisor.context_for_user(&user_id, today)?;
        let report = advisor.fridge().assess(&scanned, &context)?;
        Ok(report.into())
    }

    // =========================================================================
    // Grocery List Operations
    // =========================================================================

    /// Create a shopping list for the user's phase on `today`.
    pub fn create_grocery_list(
        &self,
        user_id: String,
        name: String,
        today: String,
    ) -> Result<FfiGroceryList, CyclewiseError> {
        let today = parse_day(&today)?;
        let db = self.db.lock()?;
        let context = Advisor::new(&db, &self.config).context_for_user(&user_id, today)?;

        let list = GroceryList::new(user_id, name, context.position.phase, context.pcos_type);
        db.create_grocery_list(&list)?;
        Ok(list.into())
    }

    /// A user's lists, most recently changed first.
    pub fn list_grocery_lists(&self, user_id: String) -> Result<Vec<FfiGroceryList>, CyclewiseError> {
        let db = self.db.lock()?;
        let lists = db.list_grocery_lists(&user_id)?;
        Ok(lists.into_iter().map(|l| l.into()).collect())
    }

    /// Get a list by ID.
    pub fn get_grocery_list(&self, list_id: String) -> Result<Option<FfiGroceryList>, CyclewiseError> {
        let db = self.db.lock()?;
        let list = db.get_grocery_list(&list_id)?;
        Ok(list.map(|l| l.into()))
    }

    /// Delete a list and its items.
    pub fn delete_grocery_list(&self, list_id: String) -> Result<bool, CyclewiseError> {
        let db = self.db.lock()?;
        Ok(db.delete_grocery_list(&list_id)?)
    }

    /// Add an item, flagged against the catalog for the list's phase and type.
    pub fn add_grocery_list_item(
        &self,
        list_id: String,
        name: String,
        category: String,
        quantity: f64,
        unit: String,
    ) -> Result<FfiGroceryListItem, CyclewiseError> {
        let mut db = self.db.lock()?;
        let list = db
            .get_grocery_list(&list_id)?
            .ok_or_else(|| CyclewiseError::NotFound(format!("grocery list {}", list_id)))?;

        let item = GroceryAdvisor::new(&db, &self.config).list_item(&list, name, category, quantity, unit)?;
        db.add_grocery_list_item(&item)?;
        Ok(item.into())
    }

    /// Items on a list in the order they were added.
    pub fn list_grocery_list_items(&self, list_id: String) -> Result<Vec<FfiGroceryListItem>, CyclewiseError> {
        let db = self.db.lock()?;
        let items = db.list_grocery_list_items(&list_id)?;
        Ok(items.into_iter().map(|i| i.into()).collect())
    }

    /// Flip an item's checked flag, returning the new value.
    pub fn toggle_grocery_list_item(&self, item_id: String) -> Result<bool, CyclewiseError> {
        let mut db = self.db.lock()?;
        Ok(db.toggle_grocery_list_item(&item_id)?)
    }

    /// Remove an item from its list.
    pub fn remove_grocery_list_item(&self, item_id: String) -> Result<bool, CyclewiseError> {
        let mut db = self.db.lock()?;
        Ok(db.remove_grocery_list_item(&item_id)?)
    }
}

fn parse_day(s: &str) -> Result<NaiveDate, CyclewiseError> {
    NaiveDate::parse_from_str(s.trim(), models::DATE_FORMAT)
        .map_err(|e| CyclewiseError::InvalidInput(format!("invalid date '{}': {}", s, e)))
}

fn require_profile(db: &Database, user_id: &str) -> Result<PcosProfile, CyclewiseError> {
    db.get_pcos_profile(user_id)?
        .ok_or_else(|| CyclewiseError::NotFound(format!("profile for user {}", user_id)))
}

// =========================================================================
// FFI Types
// =========================================================================

/// FFI-safe PCOS profile.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiPcosProfile {
    pub user_id: String,
    pub pcos_type: String,
    pub cycle_length: i32,
    pub last_period_date: String,
    pub last_period_end: Option<String>,
    pub symptoms: Vec<String>,
    pub updated_at: String,
}

impl From<PcosProfile> for FfiPcosProfile {
    fn from(profile: PcosProfile) -> Self {
        Self {
            user_id: profile.user_id,
            pcos_type: profile.pcos_type.as_str().to_owned(),
            cycle_length: profile.cycle_length,
            last_period_date: profile.last_period_date.format(models::DATE_FORMAT).to_string(),
            last_period_end: profile
                .last_period_end
                .map(|d| d.format(models::DATE_FORMAT).to_string()),
            symptoms: profile.symptoms,
            updated_at: profile.updated_at,
        }
    }
}

/// FFI-safe profile update.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiPcosProfileInput {
    pub user_id: String,
    pub pcos_type: Option<String>,
    pub cycle_length: Option<i32>,
    pub last_period_date: String,
    pub last_period_end: Option<String>,
    pub symptoms: Vec<String>,
}

impl TryFrom<FfiPcosProfileInput> for PcosProfile {
    type Error = CyclewiseError;

    fn try_from(input: FfiPcosProfileInput) -> Result<Self, Self::Error> {
        let cycle = CycleProfile::parse(
            Some(&input.last_period_date),
            input.last_period_end.as_deref(),
            input.cycle_length,
        )?;
        let pcos_type = match input.pcos_type.as_deref() {
            Some(tag) => tag.parse().map_err(CyclewiseError::InvalidInput)?,
            None => PcosType::Unknown,
        };

        let mut profile = PcosProfile::new(input.user_id, cycle.last_period_start);
        profile.pcos_type = pcos_type;
        profile.cycle_length = cycle.cycle_length;
        profile.last_period_end = cycle.last_period_end;
        profile.symptoms = input.symptoms;
        Ok(profile)
    }
}

/// FFI-safe cycle position. `cycle_day` is 1-based.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiCyclePosition {
    pub cycle_day: u32,
    pub phase: String,
    pub phase_label: String,
    pub pcos_type: String,
}

impl From<SuitabilityContext> for FfiCyclePosition {
    fn from(context: SuitabilityContext) -> Self {
        Self {
            cycle_day: context.position.display_day(),
            phase: context.position.phase.as_str().to_owned(),
            phase_label: context.position.phase.label().to_owned(),
            pcos_type: context.pcos_type.as_str().to_owned(),
        }
    }
}

/// FFI-safe forecast day.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiScheduledDay {
    pub date: String,
    pub cycle_day: u32,
    pub phase: String,
}

impl From<models::ScheduledDay> for FfiScheduledDay {
    fn from(day: models::ScheduledDay) -> Self {
        Self {
            date: day.date.format(models::DATE_FORMAT).to_string(),
            cycle_day: day.position.display_day(),
            phase: day.position.phase.as_str().to_owned(),
        }
    }
}

/// FFI-safe daily log input.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiDailyLogInput {
    pub user_id: String,
    pub date: String,
    pub symptoms: Vec<String>,
    pub energy_level: Option<u8>,
    pub mood: Option<String>,
    pub notes: Option<String>,
}

/// FFI-safe daily log.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiDailyLog {
    pub id: Option<i64>,
    pub user_id: String,
    pub date: String,
    pub cycle_day: u32,
    pub symptoms: Vec<String>,
    pub energy_level: Option<u8>,
    pub mood: Option<String>,
    pub notes: Option<String>,
}

impl From<DailyLog> for FfiDailyLog {
    fn from(log: DailyLog) -> Self {
        Self {
            id: log.id,
            user_id: log.user_id,
            date: log.date.format(models::DATE_FORMAT).to_string(),
            cycle_day: log.cycle_day,
            symptoms: log.symptoms,
            energy_level: log.energy_level,
            mood: log.mood,
            notes: log.notes,
        }
    }
}

/// FFI-safe rating table entry.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiRating {
    pub key: String,
    pub rating: String,
}

/// FFI-safe catalog item.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiFoodItem {
    pub name: String,
    pub category: String,
    pub benefits: Option<String>,
    pub dietary_tags: Vec<String>,
    pub pcos_suitability: Vec<FfiRating>,
    pub cycle_phase_suitability: Vec<FfiRating>,
}

impl TryFrom<FfiFoodItem> for FoodItem {
    type Error = CyclewiseError;

    fn try_from(item: FfiFoodItem) -> Result<Self, Self::Error> {
        let category = item.category.parse().map_err(CyclewiseError::InvalidInput)?;
        let mut food = FoodItem::new(item.name, category);
        food.benefits = item.benefits;
        food.dietary_tags = item.dietary_tags;
        food.pcos_suitability = parse_ratings(item.pcos_suitability)?;
        food.cycle_phase_suitability = parse_ratings(item.cycle_phase_suitability)?;
        Ok(food)
    }
}

fn parse_ratings<K>(entries: Vec<FfiRating>) -> Result<models::RatingTable<K>, CyclewiseError>
where
    K: Ord + std::str::FromStr<Err = String>,
{
    entries
        .into_iter()
        .map(|e| -> Result<(K, SuitabilityRating), String> {
            let key = e.key.parse::<K>()?;
            let rating = e.rating.parse::<SuitabilityRating>()?;
            Ok((key, rating))
        })
        .collect::<Result<_, String>>()
        .map_err(CyclewiseError::InvalidInput)
}

/// FFI-safe rated catalog item.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiRatedFood {
    pub id: Option<i64>,
    pub name: String,
    pub category: String,
    pub category_label: String,
    pub benefits: Option<String>,
    pub dietary_tags: Vec<String>,
    pub pcos_rating: String,
    pub cycle_rating: String,
    pub suitability: String,
}

impl From<RatedFood> for FfiRatedFood {
    fn from(rated: RatedFood) -> Self {
        Self {
            id: rated.item.id,
            category: rated.item.category.as_str().to_owned(),
            category_label: rated.item.category.label().to_owned(),
            name: rated.item.name,
            benefits: rated.item.benefits,
            dietary_tags: rated.item.dietary_tags,
            pcos_rating: rated.verdict.pcos_rating.as_str().to_owned(),
            cycle_rating: rated.verdict.cycle_rating.as_str().to_owned(),
            suitability: rated.verdict.suitability.as_str().to_owned(),
        }
    }
}

/// FFI-safe scanned fridge item.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiScannedFood {
    pub name: String,
    pub category: String,
    pub quantity: String,
}

impl From<FfiScannedFood> for models::ScannedFood {
    fn from(item: FfiScannedFood) -> Self {
        models::ScannedFood {
            name: item.name,
            category: item.category,
            quantity: item.quantity,
        }
    }
}

/// FFI-safe assessed fridge item.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiAssessedFood {
    pub name: String,
    pub category: String,
    pub quantity: String,
    pub catalog_name: Option<String>,
    pub benefits: Option<String>,
    pub suitability: String,
    pub matched: bool,
}

impl From<models::AssessedFood> for FfiAssessedFood {
    fn from(item: models::AssessedFood) -> Self {
        Self {
            name: item.name,
            category: item.category.as_str().to_owned(),
            quantity: item.quantity,
            catalog_name: item.catalog_name,
            benefits: item.benefits,
            suitability: item.verdict.suitability.as_str().to_owned(),
            matched: item.matched,
        }
    }
}

/// FFI-safe fridge report.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiFridgeReport {
    pub phase: String,
    pub cycle_day: u32,
    pub pcos_type: String,
    pub items: Vec<FfiAssessedFood>,
    pub suggestions: Vec<FfiRatedFood>,
}

impl From<FridgeReport> for FfiFridgeReport {
    fn from(report: FridgeReport) -> Self {
        Self {
            phase: report.phase.as_str().to_owned(),
            cycle_day: report.cycle_day,
            pcos_type: report.pcos_type.as_str().to_owned(),
            items: report.items.into_iter().map(|i| i.into()).collect(),
            suggestions: report.suggestions.into_iter().map(|s| s.into()).collect(),
        }
    }
}

/// FFI-safe grocery list.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiGroceryList {
    pub list_id: String,
    pub user_id: String,
    pub name: String,
    pub cycle_phase: String,
    pub pcos_type: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<GroceryList> for FfiGroceryList {
    fn from(list: GroceryList) -> Self {
        Self {
            list_id: list.list_id,
            user_id: list.user_id,
            name: list.name,
            cycle_phase: list.cycle_phase.as_str().to_owned(),
            pcos_type: list.pcos_type.as_str().to_owned(),
            created_at: list.created_at,
            updated_at: list.updated_at,
        }
    }
}

/// FFI-safe grocery list item.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiGroceryListItem {
    pub item_id: String,
    pub list_id: String,
    pub name: String,
    pub category: String,
    pub quantity: f64,
    pub unit: String,
    pub checked: bool,
    pub is_recommended: bool,
    pub is_warned: bool,
    pub reason: Option<String>,
    pub added_at: String,
}

impl From<GroceryListItem> for FfiGroceryListItem {
    fn from(item: GroceryListItem) -> Self {
        Self {
            item_id: item.item_id,
            list_id: item.list_id,
            name: item.name,
            category: item.category,
            quantity: item.quantity,
            unit: item.unit,
            checked: item.checked,
            is_recommended: item.is_recommended,
            is_warned: item.is_warned,
            reason: item.reason,
            added_at: item.added_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn core_with_profile() -> Arc<CyclewiseCore> {
        let core = open_database_in_memory().unwrap();
        core.update_profile(FfiPcosProfileInput {
            user_id: "user-1".into(),
            pcos_type: Some("adrenal".into()),
            cycle_length: Some(28),
            last_period_date: "2024-01-01".into(),
            last_period_end: Some("2024-01-05".into()),
            symptoms: vec!["fatigue".into()],
        })
        .unwrap();
        core
    }

    #[test]
    fn test_profile_round_trip() {
        let core = core_with_profile();
        let profile = core.get_profile("user-1".into()).unwrap().unwrap();
        assert_eq!(profile.pcos_type, "adrenal");
        assert_eq!(profile.last_period_end.as_deref(), Some("2024-01-05"));
        assert!(core.get_profile("nobody".into()).unwrap().is_none());
    }

    #[test]
    fn test_update_profile_rejects_bad_input() {
        let core = open_database_in_memory().unwrap();
        let input = FfiPcosProfileInput {
            user_id: "user-1".into(),
            pcos_type: None,
            cycle_length: Some(0),
            last_period_date: "2024-01-01".into(),
            last_period_end: None,
            symptoms: vec![],
        };
        assert!(matches!(
            core.update_profile(input.clone()),
            Err(CyclewiseError::InvalidProfile(_))
        ));

        let bad_type = FfiPcosProfileInput {
            pcos_type: Some("thyroid".into()),
            cycle_length: None,
            ..input
        };
        assert!(matches!(
            core.update_profile(bad_type),
            Err(CyclewiseError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_current_position() {
        let core = core_with_profile();
        let position = core
            .current_position("user-1".into(), "2024-01-20".into())
            .unwrap();
        assert_eq!(position.cycle_day, 20);
        assert_eq!(position.phase, "luteal");
        assert_eq!(position.pcos_type, "adrenal");

        assert!(matches!(
            core.current_position("user-1".into(), "2023-12-01".into()),
            Err(CyclewiseError::InvalidProfile(_))
        ));
        assert!(matches!(
            core.current_position("user-1".into(), "yesterday".into()),
            Err(CyclewiseError::InvalidInput(_))
        ));
        assert!(matches!(
            core.current_position("nobody".into(), "2024-01-20".into()),
            Err(CyclewiseError::NotFound(_))
        ));
    }

    #[test]
    fn test_log_day_computes_cycle_day() {
        let core = core_with_profile();
        let log = core
            .log_day(FfiDailyLogInput {
                user_id: "user-1".into(),
                date: "2024-01-03".into(),
                symptoms: vec!["cramps".into()],
                energy_level: Some(4),
                mood: None,
                notes: None,
            })
            .unwrap();
        assert_eq!(log.cycle_day, 3);
        assert!(log.id.is_some());

        let logs = core.list_logs("user-1".into()).unwrap();
        assert_eq!(logs.len(), 1);
    }

    #[test]
    fn test_log_day_before_period_start() {
        let core = core_with_profile();
        let log = core
            .log_day(FfiDailyLogInput {
                user_id: "user-1".into(),
                date: "2023-12-31".into(),
                symptoms: vec!["bloating".into()],
                energy_level: None,
                mood: None,
                notes: None,
            })
            .unwrap();
        // Last day of the previous 28-day cycle
        assert_eq!(log.cycle_day, 28);
    }

    #[test]
    fn test_phase_forecast_limits() {
        let core = core_with_profile();
        let forecast = core
            .phase_forecast("user-1".into(), "2024-01-01".into(), MAX_FORECAST_DAYS)
            .unwrap();
        assert_eq!(forecast.len(), MAX_FORECAST_DAYS as usize);

        assert!(matches!(
            core.phase_forecast("user-1".into(), "2024-01-01".into(), MAX_FORECAST_DAYS + 1),
            Err(CyclewiseError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_operator_words_in_item_names() {
        let core = core_with_profile();
        let list = core
            .create_grocery_list("user-1".into(), "Weekly".into(), "2024-01-20".into())
            .unwrap();

        for name in ["Salt AND pepper", "NOT butter", "OR"] {
            let item = core
                .add_grocery_list_item(list.list_id.clone(), name.into(), "other".into(), 1.0, "".into())
                .unwrap();
            assert!(!item.is_warned && !item.is_recommended, "{} should be unflagged", name);
        }

        let report = core
            .assess_fridge(
                "user-1".into(),
                "2024-01-20".into(),
                vec![FfiScannedFood {
                    name: "Spinach AND kale".into(),
                    category: "vegetable".into(),
                    quantity: "1 bag".into(),
                }],
            )
            .unwrap();
        assert_eq!(report.items.len(), 1);
    }

    #[test]
    fn test_search_groceries_with_filter() {
        let core = core_with_profile();
        let results = core
            .search_groceries(
                "user-1".into(),
                "".into(),
                "2024-01-20".into(),
                Some("avoid".into()),
                None,
            )
            .unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name, "Green Tea");

        assert!(matches!(
            core.search_groceries("user-1".into(), "".into(), "2024-01-20".into(), Some("bad".into()), None),
            Err(CyclewiseError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_grocery_list_flow() {
        let core = core_with_profile();
        let list = core
            .create_grocery_list("user-1".into(), "Weekly".into(), "2024-01-20".into())
            .unwrap();
        assert_eq!(list.cycle_phase, "luteal");

        let item = core
            .add_grocery_list_item(list.list_id.clone(), "Green Tea".into(), "beverage".into(), 1.0, "box".into())
            .unwrap();
        assert!(item.is_warned);

        assert!(core.toggle_grocery_list_item(item.item_id.clone()).unwrap());
        assert_eq!(core.list_grocery_list_items(list.list_id.clone()).unwrap().len(), 1);
        assert!(core.remove_grocery_list_item(item.item_id).unwrap());

        assert!(matches!(
            core.add_grocery_list_item("missing".into(), "Kale".into(), "vegetable".into(), 1.0, "".into()),
            Err(CyclewiseError::NotFound(_))
        ));

        assert!(core.delete_grocery_list(list.list_id.clone()).unwrap());
        assert!(core.get_grocery_list(list.list_id).unwrap().is_none());
    }

    #[test]
    fn test_assess_fridge() {
        let core = core_with_profile();
        let report = core
            .assess_fridge(
                "user-1".into(),
                "2024-01-02".into(),
                vec![FfiScannedFood {
                    name: "Wild salmon fillet".into(),
                    category: "protein".into(),
                    quantity: "2 fillets".into(),
                }],
            )
            .unwrap();

        assert_eq!(report.phase, "menstrual");
        assert_eq!(report.items.len(), 1);
        assert!(report.items[0].matched);
        assert_eq!(report.items[0].suitability, "recommended");
    }

    #[test]
    fn test_upsert_food_item() {
        let core = open_database_in_memory().unwrap();
        let id = core
            .upsert_food_item(FfiFoodItem {
                name: "Lentils".into(),
                category: "protein".into(),
                benefits: Some("Iron and fibre".into()),
                dietary_tags: vec!["vegan".into()],
                pcos_suitability: vec![FfiRating {
                    key: "insulin_resistant".into(),
                    rating: "recommended".into(),
                }],
                cycle_phase_suitability: vec![],
            })
            .unwrap();
        assert!(id > 0);

        let bad = FfiFoodItem {
            name: "Mystery".into(),
            category: "protein".into(),
            benefits: None,
            dietary_tags: vec![],
            pcos_suitability: vec![FfiRating {
                key: "thyroid".into(),
                rating: "avoid".into(),
            }],
            cycle_phase_suitability: vec![],
        };
        assert!(matches!(core.upsert_food_item(bad), Err(CyclewiseError::InvalidInput(_))));
    }
}
