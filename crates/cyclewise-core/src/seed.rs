//! Static starter catalog inserted into an empty database.

use crate::models::{
    CyclePhase, FoodCategory, FoodItem, PcosType, RatingTable, SuitabilityRating,
};

use SuitabilityRating::{Avoid, Recommended};

fn food(
    name: &str,
    category: FoodCategory,
    benefits: &str,
    dietary_tags: &[&str],
    pcos: RatingTable<PcosType>,
    cycle: RatingTable<CyclePhase>,
) -> FoodItem {
    FoodItem {
        id: None,
        name: name.to_owned(),
        category,
        benefits: Some(benefits.to_owned()),
        dietary_tags: dietary_tags.iter().map(|t| (*t).to_owned()).collect(),
        pcos_suitability: pcos,
        cycle_phase_suitability: cycle,
    }
}

/// The seven starter foods with their PCOS and cycle-phase ratings.
pub fn default_catalog() -> Vec<FoodItem> {
    vec![
        food(
            "Wild Salmon",
            FoodCategory::Protein,
            "Omega-3 fatty acids ease cramps and inflammation",
            &["gluten_free", "dairy_free", "pescatarian"],
            RatingTable::new()
                .with(PcosType::InsulinResistant, Recommended)
                .with(PcosType::Inflammatory, Recommended),
            RatingTable::new()
                .with(CyclePhase::Menstrual, Recommended)
                .with(CyclePhase::Luteal, Recommended),
        ),
        food(
            "Spinach",
            FoodCategory::Vegetable,
            "Iron and magnesium rich leafy green",
            &["vegan", "gluten_free", "dairy_free"],
            RatingTable::new()
                .with(PcosType::Inflammatory, Recommended)
                .with(PcosType::PostPill, Recommended),
            RatingTable::new()
                .with(CyclePhase::Menstrual, Recommended)
                .with(CyclePhase::Ovulatory, Recommended),
        ),
        food(
            "Berries",
            FoodCategory::Fruit,
            "Low-glycemic antioxidants",
            &["vegan", "gluten_free", "dairy_free"],
            RatingTable::new()
                .with(PcosType::InsulinResistant, Recommended)
                .with(PcosType::Inflammatory, Recommended),
            RatingTable::new()
                .with(CyclePhase::Follicular, Recommended)
                .with(CyclePhase::Ovulatory, Recommended),
        ),
        food(
            "Quinoa",
            FoodCategory::Grain,
            "Complex carbohydrate and complete protein",
            &["vegan", "gluten_free", "dairy_free"],
            RatingTable::new().with(PcosType::Adrenal, Recommended),
            RatingTable::new()
                .with(CyclePhase::Follicular, Recommended)
                .with(CyclePhase::Luteal, Recommended),
        ),
        food(
            "Avocado",
            FoodCategory::Fat,
            "Healthy fats and magnesium for hormone production",
            &["vegan", "gluten_free", "dairy_free", "keto"],
            RatingTable::new()
                .with(PcosType::InsulinResistant, Recommended)
                .with(PcosType::Adrenal, Recommended),
            RatingTable::new().with(CyclePhase::Luteal, Recommended),
        ),
        food(
            "Turmeric",
            FoodCategory::Spice,
            "Anti-inflammatory curcumin",
            &["vegan", "gluten_free", "dairy_free"],
            RatingTable::new().with(PcosType::Inflammatory, Recommended),
            RatingTable::new()
                .with(CyclePhase::Menstrual, Recommended)
                .with(CyclePhase::Ovulatory, Recommended),
        ),
        food(
            "Green Tea",
            FoodCategory::Beverage,
            "Antioxidants that support insulin sensitivity",
            &["vegan", "gluten_free", "dairy_free"],
            RatingTable::new()
                .with(PcosType::InsulinResistant, Recommended)
                .with(PcosType::Adrenal, Avoid),
            RatingTable::new().with(CyclePhase::Luteal, Avoid),
        ),
    ]
}
