//! Symptom questionnaire and the offline PCOS type classifier.

use serde::{Deserialize, Serialize};

use cyclewise_core::models::PcosType;

use crate::extraction::PcosAnalysis;

/// How regular the user's periods are.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CycleRegularity {
    #[default]
    Regular,
    Irregular,
    Absent,
}

impl CycleRegularity {
    pub fn as_str(&self) -> &'static str {
        match self {
            CycleRegularity::Regular => "regular",
            CycleRegularity::Irregular => "irregular",
            CycleRegularity::Absent => "absent",
        }
    }
}

/// Answers to the onboarding questionnaire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SymptomQuestionnaire {
    pub symptoms: Vec<String>,
    pub cycle_regularity: CycleRegularity,
    pub weight_concerns: bool,
    /// Hirsutism
    pub hair_growth: bool,
    pub acne: bool,
    pub fatigue: bool,
}

impl SymptomQuestionnaire {
    fn mentions(&self, keywords: &[&str]) -> usize {
        self.symptoms
            .iter()
            .map(|s| s.to_lowercase())
            .filter(|s| keywords.iter().any(|k| s.contains(k)))
            .count()
    }
}

/// Keyword classifier for offline use and tests.
pub struct MockAnalyzer;

impl MockAnalyzer {
    /// Classify a questionnaire using simple weighted signals.
    pub fn classify(questionnaire: &SymptomQuestionnaire) -> PcosAnalysis {
        let q = questionnaire;

        let scores = [
            (
                PcosType::InsulinResistant,
                2 * usize::from(q.weight_concerns)
                    + q.mentions(&["sugar", "craving", "weight", "dark patches"]),
            ),
            (
                PcosType::Inflammatory,
                usize::from(q.acne)
                    + usize::from(q.fatigue)
                    + q.mentions(&["bloat", "headache", "joint", "eczema", "gut"]),
            ),
            (
                PcosType::Adrenal,
                usize::from(q.hair_growth) + q.mentions(&["stress", "anxiety", "sleep"]),
            ),
            (
                PcosType::PostPill,
                2 * usize::from(q.cycle_regularity == CycleRegularity::Absent)
                    + q.mentions(&["pill", "contraceptive"]),
            ),
        ];

        let total: usize = scores.iter().map(|(_, s)| s).sum();
        // First entry wins ties
        let best = scores
            .iter()
            .copied()
            .fold(None::<(PcosType, usize)>, |best, candidate| match best {
                Some(b) if b.1 >= candidate.1 => Some(b),
                _ => Some(candidate),
            });

        match best {
            Some((pcos_type, score)) if score > 0 => PcosAnalysis {
                detected_type: pcos_type,
                confidence: score as f64 / total as f64,
                explanation: format!(
                    "Reported signs most consistent with {} PCOS.",
                    pcos_type.label()
                ),
                recommendations: default_recommendations(pcos_type),
            },
            _ => PcosAnalysis {
                detected_type: PcosType::Unknown,
                confidence: 0.0,
                explanation: "Not enough information to suggest a PCOS type.".into(),
                recommendations: default_recommendations(PcosType::Unknown),
            },
        }
    }
}

fn default_recommendations(pcos_type: PcosType) -> Vec<String> {
    let recs: &[&str] = match pcos_type {
        PcosType::InsulinResistant => &[
            "Favour low-glycemic foods, lean proteins and healthy fats",
            "Limit refined carbohydrates and added sugar",
            "Walk after meals to help blood sugar",
        ],
        PcosType::Inflammatory => &[
            "Eat anti-inflammatory foods such as turmeric, omega-3s and leafy greens",
            "Reduce dairy, gluten and processed foods",
            "Prioritise gut health with fermented foods",
        ],
        PcosType::Adrenal => &[
            "Eat balanced meals with adequate carbohydrates",
            "Cut back on caffeine",
            "Build in daily stress reduction and consistent sleep",
        ],
        PcosType::PostPill => &[
            "Support the liver with cruciferous vegetables",
            "Include zinc and B-vitamin rich foods",
            "Give your cycle time to re-establish",
        ],
        PcosType::Unknown => &[
            "Track your cycle and symptoms daily",
            "Eat whole, minimally processed foods",
            "Discuss testing options with your doctor",
        ],
    };
    recs.iter().map(|r| (*r).to_owned()).collect()
}
