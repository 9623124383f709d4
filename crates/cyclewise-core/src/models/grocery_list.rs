//! Shopping list models.

use serde::{Deserialize, Serialize};

use super::{CyclePhase, PcosType, SuitabilityRating, SuitabilityVerdict};

/// A named shopping list, created for a given phase and PCOS type.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GroceryList {
    /// Local UUID
    pub list_id: String,
    pub user_id: String,
    pub name: String,
    /// Phase the list was built for
    pub cycle_phase: CyclePhase,
    /// PCOS type the list was built for
    pub pcos_type: PcosType,
    /// Creation timestamp (RFC 3339)
    pub created_at: String,
    /// Last change to the list or any of its items (RFC 3339)
    pub updated_at: String,
}

impl GroceryList {
    pub fn new(user_id: String, name: String, cycle_phase: CyclePhase, pcos_type: PcosType) -> Self {
        let now = chrono::Utc::now().to_rfc3339();
        Self {
            list_id: uuid::Uuid::new_v4().to_string(),
            user_id,
            name,
            cycle_phase,
            pcos_type,
            created_at: now.clone(),
            updated_at: now,
        }
    }
}

/// A single entry on a shopping list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GroceryListItem {
    /// Local UUID
    pub item_id: String,
    pub list_id: String,
    pub user_id: String,
    pub name: String,
    pub category: String,
    pub quantity: f64,
    pub unit: String,
    pub checked: bool,
    /// Engine verdict was "recommended"
    pub is_recommended: bool,
    /// Engine verdict was "avoid"
    pub is_warned: bool,
    /// Why the item was flagged
    pub reason: Option<String>,
    /// Timestamp the item was added (RFC 3339)
    pub added_at: String,
}

impl GroceryListItem {
    /// Create an unflagged, unchecked item.
    pub fn new(list: &GroceryList, name: String, category: String, quantity: f64, unit: String) -> Self {
        Self {
            item_id: uuid::Uuid::new_v4().to_string(),
            list_id: list.list_id.clone(),
            user_id: list.user_id.clone(),
            name,
            category,
            quantity,
            unit,
            checked: false,
            is_recommended: false,
            is_warned: false,
            reason: None,
            added_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Set the recommended/warned flags and reason from an engine verdict.
    pub fn with_verdict(mut self, verdict: &SuitabilityVerdict, list: &GroceryList) -> Self {
        self.is_recommended = verdict.suitability == SuitabilityRating::Recommended;
        self.is_warned = verdict.suitability == SuitabilityRating::Avoid;
        self.reason = flag_reason(verdict, list);
        self
    }
}

fn flag_reason(verdict: &SuitabilityVerdict, list: &GroceryList) -> Option<String> {
    let pcos = verdict.pcos_rating;
    let cycle = verdict.cycle_rating;
    match verdict.suitability {
        SuitabilityRating::Neutral => None,
        flagged => {
            let mut reasons = Vec::new();
            if pcos == flagged {
                reasons.push(format!("{} for {} PCOS", flagged, list.pcos_type.label()));
            }
            if cycle == flagged {
                reasons.push(format!("{} during the {} phase", flagged, list.cycle_phase.label()));
            }
            Some(reasons.join("; "))
        }
    }
}
