//! Suitability resolver.
//!
//! Precedence: avoid on either axis wins, then recommended on either axis,
//! otherwise neutral.

use crate::models::{CyclePhase, FoodItem, PcosType, RatedFood, SuitabilityRating, SuitabilityVerdict};

use super::SuitabilityContext;

/// Resolve one item's verdict for a PCOS type and cycle phase.
pub fn resolve_suitability(item: &FoodItem, pcos_type: PcosType, phase: CyclePhase) -> SuitabilityVerdict {
    let pcos_rating = item.pcos_suitability.get(&pcos_type);
    let cycle_rating = item.cycle_phase_suitability.get(&phase);

    SuitabilityVerdict {
        pcos_rating,
        cycle_rating,
        suitability: combine(pcos_rating, cycle_rating),
    }
}

/// Combine the two axis ratings into one tag.
pub fn combine(pcos_rating: SuitabilityRating, cycle_rating: SuitabilityRating) -> SuitabilityRating {
    use crate::models::SuitabilityRating::{Avoid, Neutral, Recommended};

    match (pcos_rating, cycle_rating) {
        (Avoid, _) | (_, Avoid) => Avoid,
        (Recommended, _) | (_, Recommended) => Recommended,
        _ => Neutral,
    }
}

/// Rate every item under the same context, preserving input order.
pub fn rate_all<I>(items: I, context: &SuitabilityContext) -> Vec<RatedFood>
where
    I: IntoIterator<Item = FoodItem>,
{
    items
        .into_iter()
        .map(|item| {
            let verdict = resolve_suitability(&item, context.pcos_type, context.position.phase);
            RatedFood { item, verdict }
        })
        .collect()
}
