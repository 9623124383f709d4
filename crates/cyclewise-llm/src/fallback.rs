//! Static plans used when the model is unavailable or its reply is unusable.

use cyclewise_core::models::{CyclePhase, ScheduledDay};

use crate::extraction::{
    DailyRecommendation, DayMealPlan, ExerciseAdvice, Meal, NutritionAdvice, WeeklyMealPlan,
};
use crate::prompts::{day_label, MealPlanRequest};

pub const FALLBACK_HYDRATION: &str = "8 glasses of water, warm ginger-lemon water, herbal teas";

pub const FALLBACK_SUPPLEMENTS: [&str; 4] = [
    "Magnesium",
    "Vitamin D",
    "Omega-3",
    "Iron (during menstrual phase)",
];

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_owned()).collect()
}

fn meal(name: &str, ingredients: &[&str], benefits: &str, prep_time: &str) -> Meal {
    Meal {
        name: name.to_owned(),
        ingredients: strings(ingredients),
        benefits: benefits.to_owned(),
        prep_time: prep_time.to_owned(),
    }
}

/// Generic daily plan.
pub fn default_daily_recommendation(phase: CyclePhase) -> DailyRecommendation {
    DailyRecommendation {
        phase,
        nutrition: NutritionAdvice {
            focus: "Balanced".into(),
            foods_to_eat: strings(&["Whole foods"]),
            foods_to_avoid: strings(&["Sugar"]),
        },
        exercise: ExerciseAdvice {
            focus: "Movement".into(),
            recommended_types: strings(&["Walking"]),
            intensity: "medium".into(),
        },
        lifestyle: "Sleep well".into(),
    }
}

struct PhaseMeals {
    breakfast: Meal,
    lunch: Meal,
    dinner: Meal,
    snacks: Vec<String>,
}

fn phase_meals(phase: CyclePhase) -> PhaseMeals {
    match phase {
        CyclePhase::Menstrual => PhaseMeals {
            breakfast: meal(
                "Warm Oatmeal Bowl",
                &["oats", "banana", "cinnamon", "walnuts", "iron-fortified milk"],
                "Iron-rich to replenish during menstruation",
                "10 min",
            ),
            lunch: meal(
                "Lentil & Spinach Soup",
                &["red lentils", "spinach", "turmeric", "garlic", "bone broth"],
                "Anti-inflammatory, iron and protein rich",
                "30 min",
            ),
            dinner: meal(
                "Salmon with Sweet Potato",
                &["wild salmon", "sweet potato", "steamed broccoli", "olive oil"],
                "Omega-3s reduce cramps, complex carbs for energy",
                "25 min",
            ),
            snacks: strings(&["Dark chocolate (70%+)", "Trail mix with pumpkin seeds"]),
        },
        CyclePhase::Follicular => PhaseMeals {
            breakfast: meal(
                "Green Smoothie Bowl",
                &["kale", "banana", "flax seeds", "almond milk", "avocado"],
                "Estrogen-supporting nutrients for follicle development",
                "5 min",
            ),
            lunch: meal(
                "Quinoa Buddha Bowl",
                &["quinoa", "chickpeas", "roasted vegetables", "tahini dressing"],
                "Balanced macros for rising energy levels",
                "20 min",
            ),
            dinner: meal(
                "Chicken Stir-Fry",
                &["chicken breast", "broccoli", "bell peppers", "brown rice", "coconut aminos"],
                "Lean protein supports hormone production",
                "20 min",
            ),
            snacks: strings(&["Apple with almond butter", "Fermented foods (kimchi)"]),
        },
        CyclePhase::Ovulatory => PhaseMeals {
            breakfast: meal(
                "Berry Protein Parfait",
                &["Greek yogurt", "mixed berries", "granola", "chia seeds"],
                "Antioxidants and protein for peak fertility",
                "5 min",
            ),
            lunch: meal(
                "Mediterranean Salad",
                &["mixed greens", "grilled chicken", "olives", "cucumber", "feta"],
                "Anti-inflammatory fats support ovulation",
                "15 min",
            ),
            dinner: meal(
                "Baked Cod with Vegetables",
                &["cod fillet", "asparagus", "cherry tomatoes", "lemon", "herbs"],
                "Light, nutrient-dense for hormonal peak",
                "25 min",
            ),
            snacks: strings(&["Raw veggie sticks with hummus", "Brazil nuts"]),
        },
        CyclePhase::Luteal => PhaseMeals {
            breakfast: meal(
                "Pumpkin Seed Pancakes",
                &["oat flour", "pumpkin seeds", "banana", "eggs", "cinnamon"],
                "Magnesium-rich to reduce PMS symptoms",
                "15 min",
            ),
            lunch: meal(
                "Turkey & Avocado Wrap",
                &["whole wheat wrap", "turkey", "avocado", "spinach", "tomato"],
                "Tryptophan and B6 for serotonin production",
                "10 min",
            ),
            dinner: meal(
                "Beef & Root Vegetable Stew",
                &["grass-fed beef", "carrots", "parsnips", "potatoes", "rosemary"],
                "Complex carbs and iron for luteal support",
                "45 min",
            ),
            snacks: strings(&["Dark chocolate squares", "Banana with cashew butter"]),
        },
    }
}

/// Template meal plan following the phase of each scheduled day.
pub fn default_weekly_plan(request: &MealPlanRequest, schedule: &[ScheduledDay]) -> WeeklyMealPlan {
    let days = schedule
        .iter()
        .zip(1u32..)
        .map(|(scheduled, day)| {
            let phase = scheduled.position.phase;
            let meals = phase_meals(phase);
            DayMealPlan {
                day,
                day_label: day_label(scheduled).to_owned(),
                phase,
                breakfast: meals.breakfast,
                lunch: meals.lunch,
                dinner: meals.dinner,
                snacks: meals.snacks,
            }
        })
        .collect();

    WeeklyMealPlan {
        current_phase: request.position.phase,
        cycle_day: request.position.display_day(),
        days,
        hydration: FALLBACK_HYDRATION.to_owned(),
        supplements: strings(&FALLBACK_SUPPLEMENTS),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use cyclewise_core::engine::phase_schedule;
    use cyclewise_core::models::{CycleProfile, PcosType};

    #[test]
    fn test_default_daily_recommendation() {
        let plan = default_daily_recommendation(CyclePhase::Luteal);
        assert_eq!(plan.phase, CyclePhase::Luteal);
        assert_eq!(plan.nutrition.focus, "Balanced");
        assert_eq!(plan.exercise.intensity, "medium");
        assert_eq!(plan.lifestyle, "Sleep well");
    }

    #[test]
    fn test_default_weekly_plan_follows_schedule() {
        // Cycle days 12..=18 cross follicular, ovulatory and luteal
        let profile = CycleProfile::new(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        let schedule =
            phase_schedule(&profile, NaiveDate::from_ymd_opt(2024, 1, 13).unwrap(), 7).unwrap();
        let request = MealPlanRequest::new(PcosType::InsulinResistant, schedule[0].position, 28);

        let plan = default_weekly_plan(&request, &schedule);

        assert_eq!(plan.days.len(), 7);
        assert_eq!(plan.current_phase, CyclePhase::Follicular);
        assert_eq!(plan.cycle_day, 13);
        assert_eq!(plan.days[0].day, 1);
        assert_eq!(plan.days[0].day_label, "Saturday");
        assert_eq!(plan.days[0].lunch.name, "Quinoa Buddha Bowl");
        assert_eq!(plan.days[2].phase, CyclePhase::Ovulatory);
        assert_eq!(plan.days[2].breakfast.name, "Berry Protein Parfait");
        assert_eq!(plan.days[6].phase, CyclePhase::Luteal);
        assert_eq!(plan.days[6].dinner.prep_time, "45 min");
        assert_eq!(plan.hydration, FALLBACK_HYDRATION);
        assert_eq!(plan.supplements.len(), 4);
    }

    #[test]
    fn test_default_weekly_plan_empty_schedule() {
        let request = MealPlanRequest::new(
            PcosType::Unknown,
            cyclewise_core::models::CyclePosition {
                cycle_day: 0,
                phase: CyclePhase::Menstrual,
            },
            28,
        );
        let plan = default_weekly_plan(&request, &[]);
        assert!(plan.days.is_empty());
        assert_eq!(plan.cycle_day, 1);
    }
}
