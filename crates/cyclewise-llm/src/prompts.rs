//! Prompts for PCOS analysis and cycle-aware nutrition planning.
//!
//! Every prompt asks for a bare JSON object; replies are parsed by
//! [`crate::extraction`].

use chrono::Datelike;
use serde::{Deserialize, Serialize};

use cyclewise_core::models::{CyclePosition, PcosType, ScheduledDay};

use crate::questionnaire::SymptomQuestionnaire;

/// System prompt for PCOS type analysis.
pub const ANALYSIS_SYSTEM_PROMPT: &str =
    "You are a specialized gynecological health assistant helping identify PCOS types.";

/// System prompt for meal planning.
pub const NUTRITION_SYSTEM_PROMPT: &str =
    "You are a PCOS nutrition specialist. Always respond with valid JSON only, no markdown.";

/// Dietary guidance per PCOS type, included in meal plan prompts.
pub const PCOS_TYPE_GUIDELINES: &str = r#"Guidelines by PCOS type:
- Insulin Resistant: Low-glycemic foods, lean proteins, healthy fats. Avoid refined carbs and sugar.
- Inflammatory: Anti-inflammatory foods (turmeric, omega-3s, leafy greens). Avoid dairy, gluten, processed foods.
- Adrenal: Stress-reducing foods, balanced meals, adequate carbs. Avoid caffeine.
- Post-Pill: Liver-supporting foods, zinc, B vitamins. Avoid excess estrogen-mimicking foods."#;

/// Dietary guidance per cycle phase, included in meal plan prompts.
pub const PHASE_GUIDELINES: &str = r#"Guidelines by cycle phase:
- Menstrual: Iron-rich foods, warming meals, gentle on digestion
- Follicular: Light, fresh foods, sprouted grains, fermented foods
- Ovulatory: Raw vegetables, anti-inflammatory foods, fiber
- Luteal: Complex carbs, magnesium-rich foods, serotonin boosters"#;

/// Inputs for a weekly meal plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MealPlanRequest {
    pub pcos_type: PcosType,
    /// Position on the first day of the plan
    pub position: CyclePosition,
    pub cycle_length: i32,
    pub preferences: Vec<String>,
    pub allergies: Vec<String>,
}

impl MealPlanRequest {
    pub fn new(pcos_type: PcosType, position: CyclePosition, cycle_length: i32) -> Self {
        Self {
            pcos_type,
            position,
            cycle_length,
            preferences: Vec::new(),
            allergies: Vec::new(),
        }
    }

    pub fn with_preferences(mut self, preferences: Vec<String>) -> Self {
        self.preferences = preferences;
        self
    }

    pub fn with_allergies(mut self, allergies: Vec<String>) -> Self {
        self.allergies = allergies;
        self
    }
}

/// English weekday name for a scheduled date.
pub fn day_label(day: &ScheduledDay) -> &'static str {
    match day.date.weekday() {
        chrono::Weekday::Mon => "Monday",
        chrono::Weekday::Tue => "Tuesday",
        chrono::Weekday::Wed => "Wednesday",
        chrono::Weekday::Thu => "Thursday",
        chrono::Weekday::Fri => "Friday",
        chrono::Weekday::Sat => "Saturday",
        chrono::Weekday::Sun => "Sunday",
    }
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}

/// User prompt for PCOS type analysis.
pub fn make_analysis_prompt(questionnaire: &SymptomQuestionnaire) -> String {
    let symptoms = if questionnaire.symptoms.is_empty() {
        "none reported".to_owned()
    } else {
        questionnaire.symptoms.join(", ")
    };

    format!(
        r#"Analyze the following patient profile for PCOS type and give recommendations.
Symptoms: {}
Cycle Regularity: {}
Physical Signs:
- Weight Concerns: {}
- Hair Growth (Hirsutism): {}
- Acne: {}
- Fatigue: {}

Determine the most likely PCOS type from: 'insulin_resistant', 'inflammatory', 'adrenal', 'post_pill'.
If unclear, use 'unknown'.
Provide a confidence score (0-1).
Explain why.
Give 3 top recommendations.

Respond in JSON format:
{{
  "detectedType": "enum value",
  "confidence": number,
  "explanation": "string",
  "recommendations": ["string"]
}}"#,
        symptoms,
        questionnaire.cycle_regularity.as_str(),
        yes_no(questionnaire.weight_concerns),
        yes_no(questionnaire.hair_growth),
        yes_no(questionnaire.acne),
        yes_no(questionnaire.fatigue),
    )
}

/// User prompt for today's phase-specific plan.
pub fn make_daily_plan_prompt(pcos_type: PcosType, position: &CyclePosition) -> String {
    format!(
        r#"User Profile:
- PCOS Type: {}
- Current Cycle Phase: {} (Day {})

Generate a daily plan JSON:
{{
  "phase": "{}",
  "nutrition": {{ "focus": "string", "foodsToEat": ["string"], "foodsToAvoid": ["string"] }},
  "exercise": {{ "focus": "string", "recommendedTypes": ["string"], "intensity": "low/medium/high" }},
  "lifestyle": "string"
}}"#,
        pcos_type.as_str(),
        position.phase,
        position.display_day(),
        position.phase,
    )
}

/// User prompt for a meal plan covering `schedule`.
pub fn make_meal_plan_prompt(request: &MealPlanRequest, schedule: &[ScheduledDay]) -> String {
    let phases = schedule
        .iter()
        .enumerate()
        .map(|(i, day)| format!("Day {} ({}): {}", i + 1, day_label(day), day.position.phase))
        .collect::<Vec<_>>()
        .join(", ");

    let mut prompt = format!(
        r#"You are a certified nutritionist specializing in PCOS management and menstrual cycle nutrition.

Create a detailed {}-day meal plan for a woman with:
- PCOS Type: {}
- Starting Cycle Day: {} of {}
- Phases for each day: {}
"#,
        schedule.len(),
        request.pcos_type.label(),
        request.position.display_day(),
        request.cycle_length,
        phases,
    );

    if !request.preferences.is_empty() {
        prompt.push_str(&format!("- Dietary Preferences: {}\n", request.preferences.join(", ")));
    }
    if !request.allergies.is_empty() {
        prompt.push_str(&format!("- Allergies/Restrictions: {}\n", request.allergies.join(", ")));
    }

    prompt.push('\n');
    prompt.push_str(PCOS_TYPE_GUIDELINES);
    prompt.push_str("\n\n");
    prompt.push_str(PHASE_GUIDELINES);
    prompt.push_str(
        r#"

Respond ONLY with valid JSON (no markdown):
{
  "days": [
    {
      "day": 1,
      "dayLabel": "Monday",
      "phase": "phase_name",
      "breakfast": { "name": "string", "ingredients": ["string"], "benefits": "string", "prepTime": "string" },
      "lunch": { "name": "string", "ingredients": ["string"], "benefits": "string", "prepTime": "string" },
      "dinner": { "name": "string", "ingredients": ["string"], "benefits": "string", "prepTime": "string" },
      "snacks": ["string"]
    }
  ],
  "hydration": "string",
  "supplements": ["string"]
}"#,
    );

    prompt
}
