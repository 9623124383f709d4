//! Parsing structured guidance out of LLM replies.

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;
use tracing::warn;

use cyclewise_core::models::{CyclePhase, PcosType, ScheduledDay};

use crate::fallback::{default_daily_recommendation, default_weekly_plan};
use crate::prompts::MealPlanRequest;

/// Extraction errors.
#[derive(Error, Debug)]
pub enum ExtractionError {
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Invalid response format: {0}")]
    InvalidFormat(String),
}

pub type ExtractionResult<T> = Result<T, ExtractionError>;

/// Default hydration advice when the model omits it.
pub const DEFAULT_HYDRATION: &str = "8 glasses of water daily";

/// PCOS type analysis from the questionnaire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PcosAnalysis {
    #[serde(default, deserialize_with = "lenient_pcos_type")]
    pub detected_type: PcosType,
    /// 0.0 - 1.0
    #[serde(default, deserialize_with = "clamped_confidence")]
    pub confidence: f64,
    #[serde(default)]
    pub explanation: String,
    #[serde(default)]
    pub recommendations: Vec<String>,
}

/// Nutrition part of a daily plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NutritionAdvice {
    pub focus: String,
    #[serde(default)]
    pub foods_to_eat: Vec<String>,
    #[serde(default)]
    pub foods_to_avoid: Vec<String>,
}

/// Exercise part of a daily plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseAdvice {
    pub focus: String,
    #[serde(default)]
    pub recommended_types: Vec<String>,
    /// "low", "medium" or "high"
    pub intensity: String,
}

/// Phase-specific daily plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyRecommendation {
    pub phase: CyclePhase,
    pub nutrition: NutritionAdvice,
    pub exercise: ExerciseAdvice,
    pub lifestyle: String,
}

/// One meal in a weekly plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meal {
    pub name: String,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub benefits: String,
    #[serde(default)]
    pub prep_time: String,
}

/// One day of a weekly plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayMealPlan {
    /// 1-based position in the week
    pub day: u32,
    pub day_label: String,
    pub phase: CyclePhase,
    pub breakfast: Meal,
    pub lunch: Meal,
    pub dinner: Meal,
    #[serde(default)]
    pub snacks: Vec<String>,
}

/// Seven-day meal plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyMealPlan {
    pub current_phase: CyclePhase,
    /// 1-based cycle day of the first plan day
    pub cycle_day: u32,
    pub days: Vec<DayMealPlan>,
    pub hydration: String,
    pub supplements: Vec<String>,
}

/// The part of a weekly plan the model is asked to produce.
#[derive(Debug, Deserialize)]
struct WeeklyPlanReply {
    days: Vec<DayMealPlan>,
    hydration: Option<String>,
    #[serde(default)]
    supplements: Vec<String>,
}

fn lenient_pcos_type<'de, D>(deserializer: D) -> Result<PcosType, D::Error>
where
    D: Deserializer<'de>,
{
    let tag = Option::<String>::deserialize(deserializer)?;
    Ok(PcosType::from_tag(tag.as_deref()))
}

fn clamped_confidence<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<f64>::deserialize(deserializer)?.unwrap_or(0.0);
    Ok(clamp_confidence(value))
}

/// Clamp a model-reported confidence into 0.0 - 1.0.
pub fn clamp_confidence(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// Cut the outermost JSON object out of a reply.
///
/// Handles markdown code fences and prose around the object.
pub fn extract_json_object(reply: &str) -> ExtractionResult<&str> {
    // Try to find JSON in the response (in case LLM adds extra text)
    let json_start = reply.find('{').ok_or_else(|| {
        ExtractionError::InvalidFormat("No JSON object found in response".into())
    })?;
    let json_end = reply.rfind('}').ok_or_else(|| {
        ExtractionError::InvalidFormat("No closing brace found in response".into())
    })?;

    if json_end < json_start {
        return Err(ExtractionError::InvalidFormat(
            "Closing brace precedes opening brace".into(),
        ));
    }

    Ok(&reply[json_start..=json_end])
}

/// Parse a PCOS type analysis reply.
///
/// Unrecognised types become `unknown`; confidence is clamped to 0.0 - 1.0.
pub fn parse_analysis(reply: &str) -> ExtractionResult<PcosAnalysis> {
    Ok(serde_json::from_str(extract_json_object(reply)?)?)
}

/// Parse a daily plan reply.
pub fn parse_daily_recommendation(reply: &str) -> ExtractionResult<DailyRecommendation> {
    Ok(serde_json::from_str(extract_json_object(reply)?)?)
}

/// Parse a weekly plan reply, filling in phase and cycle day from the request.
pub fn parse_weekly_plan(reply: &str, request: &MealPlanRequest) -> ExtractionResult<WeeklyMealPlan> {
    let parsed: WeeklyPlanReply = serde_json::from_str(extract_json_object(reply)?)?;

    if parsed.days.is_empty() {
        return Err(ExtractionError::InvalidFormat("Meal plan has no days".into()));
    }

    Ok(WeeklyMealPlan {
        current_phase: request.position.phase,
        cycle_day: request.position.display_day(),
        days: parsed.days,
        hydration: parsed
            .hydration
            .filter(|h| !h.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_HYDRATION.to_owned()),
        supplements: parsed.supplements,
    })
}

/// Parse a daily plan, falling back to the static plan for `phase`.
///
/// `reply` is `None` when the model call itself failed.
pub fn daily_recommendation_or_default(reply: Option<&str>, phase: CyclePhase) -> DailyRecommendation {
    match reply.map(parse_daily_recommendation) {
        Some(Ok(plan)) => plan,
        Some(Err(e)) => {
            warn!(error = %e, %phase, "unusable daily plan reply, using fallback");
            default_daily_recommendation(phase)
        }
        None => {
            warn!(%phase, "no daily plan reply, using fallback");
            default_daily_recommendation(phase)
        }
    }
}

/// Parse a weekly plan, falling back to the per-phase templates.
pub fn weekly_plan_or_default(
    reply: Option<&str>,
    request: &MealPlanRequest,
    schedule: &[ScheduledDay],
) -> WeeklyMealPlan {
    match reply.map(|r| parse_weekly_plan(r, request)) {
        Some(Ok(plan)) => plan,
        Some(Err(e)) => {
            warn!(error = %e, "unusable meal plan reply, using fallback");
            default_weekly_plan(request, schedule)
        }
        None => {
            warn!("no meal plan reply, using fallback");
            default_weekly_plan(request, schedule)
        }
    }
}
