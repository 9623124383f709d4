//! Runtime configuration.
//!
//! Every setting has a default and may be overridden by a `CYCLEWISE_*`
//! environment variable. Unparseable values fall back to the default.

use std::env;

use serde::{Deserialize, Serialize};

/// Default number of catalog items returned by a browse/search.
pub const DEFAULT_SEARCH_LIMIT: usize = 20;

/// Default number of "add to fridge" suggestions.
pub const DEFAULT_SUGGESTION_LIMIT: usize = 5;

/// Default minimum similarity for a scanned name to match a catalog item.
pub const DEFAULT_FRIDGE_MATCH_THRESHOLD: f64 = 0.80;

/// Core library configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoreConfig {
    /// SQLite database path (`CYCLEWISE_DB_PATH`)
    pub database_path: String,
    /// Max catalog items per search (`CYCLEWISE_SEARCH_LIMIT`)
    pub search_limit: usize,
    /// Max fridge suggestions (`CYCLEWISE_SUGGESTION_LIMIT`)
    pub suggestion_limit: usize,
    /// Minimum name similarity 0.0-1.0 (`CYCLEWISE_FRIDGE_MATCH_THRESHOLD`)
    pub fridge_match_threshold: f64,
    /// Seed the static catalog into an empty database (`CYCLEWISE_SEED_CATALOG`)
    pub seed_catalog: bool,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            database_path: "cyclewise.db".to_owned(),
            search_limit: DEFAULT_SEARCH_LIMIT,
            suggestion_limit: DEFAULT_SUGGESTION_LIMIT,
            fridge_match_threshold: DEFAULT_FRIDGE_MATCH_THRESHOLD,
            seed_catalog: true,
        }
    }
}

impl CoreConfig {
    /// Load configuration from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let var_or = |key: &str, default: String| lookup(key).unwrap_or(default);

        let fridge_match_threshold = var_or(
            "CYCLEWISE_FRIDGE_MATCH_THRESHOLD",
            defaults.fridge_match_threshold.to_string(),
        )
        .parse::<f64>()
        .ok()
        .filter(|t| (0.0..=1.0).contains(t))
        .unwrap_or(defaults.fridge_match_threshold);

        Self {
            database_path: var_or("CYCLEWISE_DB_PATH", defaults.database_path),
            search_limit: var_or("CYCLEWISE_SEARCH_LIMIT", defaults.search_limit.to_string())
                .parse()
                .unwrap_or(defaults.search_limit),
            suggestion_limit: var_or(
                "CYCLEWISE_SUGGESTION_LIMIT",
                defaults.suggestion_limit.to_string(),
            )
            .parse()
            .unwrap_or(defaults.suggestion_limit),
            fridge_match_threshold,
            seed_catalog: var_or("CYCLEWISE_SEED_CATALOG", defaults.seed_catalog.to_string())
                .parse()
                .unwrap_or(defaults.seed_catalog),
        }
    }
}
