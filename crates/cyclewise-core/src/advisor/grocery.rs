//! Catalog search with suitability verdicts.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::CoreConfig;
use crate::db::Database;
use crate::engine::{filter_by_suitability, rank_by_suitability, rate_all, resolve_suitability, SuitabilityContext};
use crate::models::{GroceryList, GroceryListItem, RatedFood, SuitabilityRating, SuitabilityVerdict};

use super::{AdvisorResult, CatalogMatcher};

/// Optional narrowing applied after ranking.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroceryFilter {
    /// Keep only items with this combined tag
    pub suitability: Option<SuitabilityRating>,
    /// Keep only items carrying this dietary tag
    pub dietary_tag: Option<String>,
}

impl GroceryFilter {
    fn apply(&self, items: Vec<RatedFood>) -> Vec<RatedFood> {
        let items = match self.suitability {
            Some(suitability) => filter_by_suitability(items, suitability),
            None => items,
        };

        match self.dietary_tag.as_deref().map(str::trim) {
            Some(tag) if !tag.is_empty() => items
                .into_iter()
                .filter(|rated| rated.item.has_dietary_tag(tag))
                .collect(),
            _ => items,
        }
    }
}

/// Searches the catalog and rates every result for the user's context.
pub struct GroceryAdvisor<'a> {
    db: &'a Database,
    matcher: CatalogMatcher<'a>,
    search_limit: usize,
}

impl<'a> GroceryAdvisor<'a> {
    /// Create a new grocery advisor.
    pub fn new(db: &'a Database, config: &CoreConfig) -> Self {
        Self {
            db,
            matcher: CatalogMatcher::new(db, config),
            search_limit: config.search_limit,
        }
    }

    /// Search the catalog, rate results, rank them, then apply `filter`.
    ///
    /// A blank query browses the catalog.
    pub fn search(
        &self,
        query: &str,
        context: &SuitabilityContext,
        filter: &GroceryFilter,
    ) -> AdvisorResult<Vec<RatedFood>> {
        let items = if query.trim().is_empty() {
            self.db.list_food_items(self.search_limit)?
        } else {
            self.db.search_food_items(query, self.search_limit)?
        };

        let ranked = rank_by_suitability(rate_all(items, context));
        let results = filter.apply(ranked);

        debug!(
            query,
            phase = %context.position.phase,
            pcos_type = %context.pcos_type,
            results = results.len(),
            "grocery search"
        );
        Ok(results)
    }

    /// Verdict for a free-form name under a list's PCOS type and phase.
    ///
    /// Names with no catalog match are neutral.
    pub fn verdict_for_name(&self, name: &str, list: &GroceryList) -> AdvisorResult<SuitabilityVerdict> {
        let verdict = match self.matcher.best_match(name)? {
            Some(m) => resolve_suitability(&m.item, list.pcos_type, list.cycle_phase),
            None => SuitabilityVerdict::neutral(),
        };
        Ok(verdict)
    }

    /// Build a list entry flagged against the catalog.
    pub fn list_item(
        &self,
        list: &GroceryList,
        name: String,
        category: String,
        quantity: f64,
        unit: String,
    ) -> AdvisorResult<GroceryListItem> {
        let verdict = self.verdict_for_name(&name, list)?;
        Ok(GroceryListItem::new(list, name, category, quantity, unit).with_verdict(&verdict, list))
    }
}
