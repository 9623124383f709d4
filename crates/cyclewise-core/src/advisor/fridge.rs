//! Fridge assessment: rate scanned items and suggest what is missing.

use std::collections::HashSet;

use tracing::{debug, info};

use crate::config::CoreConfig;
use crate::db::Database;
use crate::engine::{rank_by_suitability, rate_all, resolve_suitability, SuitabilityContext};
use crate::models::{
    AssessedFood, FoodCategory, FridgeReport, ScannedFood, SuitabilityRating, SuitabilityVerdict,
};

use super::{AdvisorResult, CatalogMatcher};

/// Rates the contents of a fridge against the catalog.
pub struct FridgeAssessor<'a> {
    db: &'a Database,
    matcher: CatalogMatcher<'a>,
    browse_limit: usize,
    suggestion_limit: usize,
}

impl<'a> FridgeAssessor<'a> {
    /// Create a new fridge assessor.
    pub fn new(db: &'a Database, config: &CoreConfig) -> Self {
        Self {
            db,
            matcher: CatalogMatcher::new(db, config),
            browse_limit: config.search_limit,
            suggestion_limit: config.suggestion_limit,
        }
    }

    /// Assess every scanned item and build the report.
    pub fn assess(&self, scanned: &[ScannedFood], context: &SuitabilityContext) -> AdvisorResult<FridgeReport> {
        let mut in_fridge = HashSet::new();
        let mut items = Vec::with_capacity(scanned.len());

        for food in scanned {
            let assessed = self.assess_one(food, context)?;
            if let Some(name) = &assessed.catalog_name {
                in_fridge.insert(name.clone());
            }
            items.push(assessed);
        }

        let suggestions: Vec<_> = rate_all(self.db.list_food_items(self.browse_limit)?, context)
            .into_iter()
            .filter(|rated| rated.verdict.suitability == SuitabilityRating::Recommended)
            .filter(|rated| !in_fridge.contains(&rated.item.name))
            .take(self.suggestion_limit)
            .collect();

        let report = FridgeReport {
            phase: context.position.phase,
            cycle_day: context.position.display_day(),
            pcos_type: context.pcos_type,
            items: rank_by_suitability(items),
            suggestions,
        };

        info!(
            scanned = scanned.len(),
            matched = in_fridge.len(),
            warnings = report.warnings().count(),
            suggestions = report.suggestions.len(),
            "assessed fridge"
        );
        Ok(report)
    }

    fn assess_one(&self, food: &ScannedFood, context: &SuitabilityContext) -> AdvisorResult<AssessedFood> {
        let category = FoodCategory::from_tag(&food.category);

        let assessed = match self.matcher.best_match(&food.name)? {
            Some(m) => AssessedFood {
                name: food.name.clone(),
                category,
                quantity: food.quantity.clone(),
                verdict: resolve_suitability(&m.item, context.pcos_type, context.position.phase),
                benefits: m.item.benefits.clone(),
                catalog_name: Some(m.item.name),
                match_score: m.score,
                matched: true,
            },
            None => {
                debug!(name = %food.name, "no catalog match, rating neutral");
                AssessedFood {
                    name: food.name.clone(),
                    category,
                    quantity: food.quantity.clone(),
                    catalog_name: None,
                    match_score: 0.0,
                    benefits: None,
                    verdict: SuitabilityVerdict::neutral(),
                    matched: false,
                }
            }
        };
        Ok(assessed)
    }
}
