//! Fridge assessment models.

use serde::{Deserialize, Serialize};

use super::{CyclePhase, FoodCategory, PcosType, RatedFood, SuitabilityVerdict};

/// A scanned fridge item with its verdict.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AssessedFood {
    /// Name as reported by the vision service
    pub name: String,
    pub category: FoodCategory,
    pub quantity: String,
    /// Catalog item the name was matched to
    pub catalog_name: Option<String>,
    /// Similarity of the match (0.0 - 1.0), 0.0 when unmatched
    pub match_score: f64,
    pub benefits: Option<String>,
    pub verdict: SuitabilityVerdict,
    /// Whether the item was found in the catalog
    pub matched: bool,
}

/// Result of assessing a whole fridge.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FridgeReport {
    /// Phase the assessment was made for
    pub phase: CyclePhase,
    /// 1-based cycle day
    pub cycle_day: u32,
    pub pcos_type: PcosType,
    /// Scanned items, recommended first
    pub items: Vec<AssessedFood>,
    /// Recommended catalog items not already in the fridge
    pub suggestions: Vec<RatedFood>,
}

impl FridgeReport {
    /// Items the engine flagged to avoid.
    pub fn warnings(&self) -> impl Iterator<Item = &AssessedFood> {
        self.items
            .iter()
            .filter(|i| i.verdict.suitability == super::SuitabilityRating::Avoid)
    }
}
