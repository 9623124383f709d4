//! Suitability ranking.

use crate::models::{AssessedFood, FoodItem, RatedFood, SuitabilityRating, SuitabilityVerdict};

/// Anything that carries a combined suitability tag.
pub trait Rated {
    fn suitability(&self) -> SuitabilityRating;
}

impl Rated for SuitabilityVerdict {
    fn suitability(&self) -> SuitabilityRating {
        self.suitability
    }
}

impl Rated for RatedFood {
    fn suitability(&self) -> SuitabilityRating {
        self.verdict.suitability
    }
}

impl Rated for AssessedFood {
    fn suitability(&self) -> SuitabilityRating {
        self.verdict.suitability
    }
}

impl Rated for (FoodItem, SuitabilityVerdict) {
    fn suitability(&self) -> SuitabilityRating {
        self.1.suitability
    }
}

/// Order items recommended → neutral → avoid.
///
/// The sort is stable: items with equal suitability keep their relative
/// order, so ranking an already ranked sequence changes nothing.
pub fn rank_by_suitability<T: Rated>(mut items: Vec<T>) -> Vec<T> {
    items.sort_by_key(|item| item.suitability().rank());
    items
}

/// Keep only items with the given combined tag, preserving order.
pub fn filter_by_suitability<T: Rated>(items: Vec<T>, suitability: SuitabilityRating) -> Vec<T> {
    items
        .into_iter()
        .filter(|item| item.suitability() == suitability)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FoodCategory;

    use crate::models::SuitabilityRating::{Avoid, Neutral, Recommended};

    fn rated(name: &str, suitability: SuitabilityRating) -> (FoodItem, SuitabilityVerdict) {
        (
            FoodItem::new(name.into(), FoodCategory::Other),
            SuitabilityVerdict {
                pcos_rating: suitability,
                cycle_rating: Neutral,
                suitability,
            },
        )
    }

    fn names(items: &[(FoodItem, SuitabilityVerdict)]) -> Vec<&str> {
        items.iter().map(|(item, _)| item.name.as_str()).collect()
    }

    #[test]
    fn test_rank_order() {
        let items = vec![
            rated("a", Avoid),
            rated("b", Neutral),
            rated("c", Recommended),
        ];
        let ranked = rank_by_suitability(items);
        assert_eq!(names(&ranked), vec!["c", "b", "a"]);
    }

    #[test]
    fn test_rank_is_stable() {
        let items = vec![
            rated("avoid-1", Avoid),
            rated("rec-1", Recommended),
            rated("neutral-1", Neutral),
            rated("rec-2", Recommended),
            rated("avoid-2", Avoid),
            rated("neutral-2", Neutral),
        ];
        let ranked = rank_by_suitability(items);
        assert_eq!(
            names(&ranked),
            vec!["rec-1", "rec-2", "neutral-1", "neutral-2", "avoid-1", "avoid-2"]
        );

        let again = rank_by_suitability(ranked.clone());
        assert_eq!(again, ranked);
    }

    #[test]
    fn test_rank_empty() {
        let ranked: Vec<SuitabilityVerdict> = rank_by_suitability(Vec::new());
        assert!(ranked.is_empty());
    }

    #[test]
    fn test_filter() {
        let items = vec![rated("a", Avoid), rated("b", Recommended), rated("c", Avoid)];
        let avoided = filter_by_suitability(items, Avoid);
        assert_eq!(names(&avoided), vec!["a", "c"]);
    }
}
