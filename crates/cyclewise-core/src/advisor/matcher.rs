//! Matching free-form food names to catalog items.

use strsim::{jaro_winkler, normalized_levenshtein};
use tracing::debug;

use crate::config::CoreConfig;
use crate::db::Database;
use crate::models::FoodItem;

use super::AdvisorResult;

/// Number of candidates to retrieve from FTS5.
const FTS_CANDIDATE_LIMIT: usize = 20;

/// A catalog item matched to a free-form name.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogMatch {
    pub item: FoodItem,
    /// Name similarity (0.0 - 1.0)
    pub score: f64,
}

/// Matches names from outside the catalog (fridge scans, list entries).
pub struct CatalogMatcher<'a> {
    db: &'a Database,
    threshold: f64,
    fallback_limit: usize,
}

impl<'a> CatalogMatcher<'a> {
    /// Create a new matcher.
    pub fn new(db: &'a Database, config: &CoreConfig) -> Self {
        Self {
            db,
            threshold: config.fridge_match_threshold,
            fallback_limit: config.search_limit,
        }
    }

    /// Find the best catalog item for `name`, if any scores above the threshold.
    pub fn best_match(&self, name: &str) -> AdvisorResult<Option<CatalogMatch>> {
        let query = name.trim();
        if query.is_empty() {
            return Ok(None);
        }

        // 1. Retrieve candidates via FTS5
        let mut candidates = self.db.search_food_items(query, FTS_CANDIDATE_LIMIT)?;

        // Misspellings miss the prefix index entirely; score the browse list instead
        if candidates.is_empty() {
            candidates = self.db.list_food_items(self.fallback_limit)?;
        }

        let best = candidates
            .into_iter()
            .map(|item| {
                let score = score_name_match(&item.name, query);
                CatalogMatch { item, score }
            })
            .filter(|m| m.score >= self.threshold)
            .max_by(|a, b| a.score.partial_cmp(&b.score).unwrap_or(std::cmp::Ordering::Equal));

        debug!(
            name = query,
            matched = best.as_ref().map(|m| m.item.name.as_str()),
            "catalog match"
        );
        Ok(best)
    }
}

/// Score name match quality (0.0 - 1.0).
///
/// Containment in either direction counts as an exact match, so
/// "Fresh Spinach" and "Spinach" score 1.0.
pub fn score_name_match(catalog_name: &str, query: &str) -> f64 {
    let name_lower = catalog_name.to_lowercase();
    let query_lower = query.trim().to_lowercase();

    if query_lower.is_empty() {
        return 0.0;
    }
    if name_lower.contains(&query_lower) || query_lower.contains(&name_lower) {
        return 1.0;
    }

    fuzzy_match(&query_lower, &name_lower)
}

/// Compute fuzzy string similarity using combined metrics.
fn fuzzy_match(a: &str, b: &str) -> f64 {
    // Jaro-Winkler rewards shared prefixes, Levenshtein overall edit distance
    let jw = jaro_winkler(a, b);
    let lev = normalized_levenshtein(a, b);

    jw * 0.6 + lev * 0.4
}
