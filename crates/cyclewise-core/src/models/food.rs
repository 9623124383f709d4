//! Food catalog models.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{CyclePhase, PcosType};

/// Closed set of food categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FoodCategory {
    Protein,
    Vegetable,
    Fruit,
    Grain,
    Fat,
    Spice,
    Beverage,
    Dairy,
    #[default]
    Other,
}

impl FoodCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            FoodCategory::Protein => "protein",
            FoodCategory::Vegetable => "vegetable",
            FoodCategory::Fruit => "fruit",
            FoodCategory::Grain => "grain",
            FoodCategory::Fat => "fat",
            FoodCategory::Spice => "spice",
            FoodCategory::Beverage => "beverage",
            FoodCategory::Dairy => "dairy",
            FoodCategory::Other => "other",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FoodCategory::Fat => "Healthy Fat",
            FoodCategory::Protein => "Protein",
            FoodCategory::Vegetable => "Vegetable",
            FoodCategory::Fruit => "Fruit",
            FoodCategory::Grain => "Grain",
            FoodCategory::Spice => "Spice",
            FoodCategory::Beverage => "Beverage",
            FoodCategory::Dairy => "Dairy",
            FoodCategory::Other => "Other",
        }
    }

    /// Lenient conversion for externally recognised items; unknown tags map to `Other`.
    pub fn from_tag(tag: &str) -> FoodCategory {
        tag.parse().unwrap_or_default()
    }
}

impl fmt::Display for FoodCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FoodCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "protein" => Ok(FoodCategory::Protein),
            "vegetable" => Ok(FoodCategory::Vegetable),
            "fruit" => Ok(FoodCategory::Fruit),
            "grain" => Ok(FoodCategory::Grain),
            "fat" => Ok(FoodCategory::Fat),
            "spice" => Ok(FoodCategory::Spice),
            "beverage" => Ok(FoodCategory::Beverage),
            "dairy" => Ok(FoodCategory::Dairy),
            "other" => Ok(FoodCategory::Other),
            other => Err(format!("unknown food category: {}", other)),
        }
    }
}

/// Three-valued suitability tag.
///
/// Declaration order is the display order: recommended first, avoid last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SuitabilityRating {
    Recommended,
    #[default]
    Neutral,
    Avoid,
}

impl SuitabilityRating {
    /// Ordinal sort key: recommended=0, neutral=1, avoid=2.
    pub fn rank(&self) -> u8 {
        match self {
            SuitabilityRating::Recommended => 0,
            SuitabilityRating::Neutral => 1,
            SuitabilityRating::Avoid => 2,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SuitabilityRating::Recommended => "recommended",
            SuitabilityRating::Neutral => "neutral",
            SuitabilityRating::Avoid => "avoid",
        }
    }
}

impl fmt::Display for SuitabilityRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SuitabilityRating {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "recommended" => Ok(SuitabilityRating::Recommended),
            "neutral" => Ok(SuitabilityRating::Neutral),
            "avoid" => Ok(SuitabilityRating::Avoid),
            other => Err(format!("unknown suitability rating: {}", other)),
        }
    }
}

/// Fixed-key rating table. Keys absent from the table read as `Neutral`.
///
/// Serialises as a plain JSON object, e.g. `{"insulin_resistant":"avoid"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RatingTable<K: Ord> {
    entries: BTreeMap<K, SuitabilityRating>,
}

impl<K: Ord> Default for RatingTable<K> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }
}

impl<K: Ord> RatingTable<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: K, rating: SuitabilityRating) -> Self {
        self.entries.insert(key, rating);
        self
    }

    pub fn set(&mut self, key: K, rating: SuitabilityRating) {
        self.entries.insert(key, rating);
    }

    /// Rating for `key`, `Neutral` when the key is missing.
    pub fn get(&self, key: &K) -> SuitabilityRating {
        self.entries.get(key).copied().unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

impl<K: Ord> FromIterator<(K, SuitabilityRating)> for RatingTable<K> {
    fn from_iter<I: IntoIterator<Item = (K, SuitabilityRating)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// A catalog food item. Never mutated by the engine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FoodItem {
    /// Row ID - None until first insert
    pub id: Option<i64>,
    pub name: String,
    pub category: FoodCategory,
    /// Short description of why the food helps
    pub benefits: Option<String>,
    /// Dietary tags (e.g. "vegan", "gluten_free")
    pub dietary_tags: Vec<String>,
    pub pcos_suitability: RatingTable<PcosType>,
    pub cycle_phase_suitability: RatingTable<CyclePhase>,
}

impl FoodItem {
    /// Create a new food item with empty rating tables.
    pub fn new(name: String, category: FoodCategory) -> Self {
        Self {
            id: None,
            name,
            category,
            benefits: None,
            dietary_tags: Vec::new(),
            pcos_suitability: RatingTable::new(),
            cycle_phase_suitability: RatingTable::new(),
        }
    }

    /// Check if the item carries a dietary tag (case-insensitive).
    pub fn has_dietary_tag(&self, tag: &str) -> bool {
        self.dietary_tags.iter().any(|t| t.eq_ignore_ascii_case(tag))
    }
}

/// Display-time verdict for one item under one PCOS type and phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuitabilityVerdict {
    pub pcos_rating: SuitabilityRating,
    pub cycle_rating: SuitabilityRating,
    /// Combined tag
    pub suitability: SuitabilityRating,
}

impl SuitabilityVerdict {
    /// Verdict for items with no rating information at all.
    pub fn neutral() -> Self {
        Self {
            pcos_rating: SuitabilityRating::Neutral,
            cycle_rating: SuitabilityRating::Neutral,
            suitability: SuitabilityRating::Neutral,
        }
    }
}

/// A catalog item paired with its verdict.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RatedFood {
    pub item: FoodItem,
    pub verdict: SuitabilityVerdict,
}

/// A food item recognised in a fridge photo by an external vision service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScannedFood {
    pub name: String,
    /// Category tag as reported by the vision service
    pub category: String,
    /// Free-form quantity (e.g. "1 bag", "~500g")
    pub quantity: String,
}
