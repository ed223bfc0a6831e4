//! Nutrition calculation module
//!
//! Pure calorie budget pipeline:
//! body profile -> BMR -> TDEE -> target calories -> macros -> meal breakdown.
//! Nothing here touches storage or keeps state between calls.

pub mod bmi;
pub mod coach;
pub mod energy;
pub mod macros;
pub mod meals;
pub mod profile;
pub mod progress;

use serde::{Deserialize, Serialize};

pub use bmi::{bmi, BmiCategory, BmiStandard};
pub use coach::{coaching_feed, exercise_minutes, CoachFeed, CoachItem, Exercise, Recommendation};
pub use energy::{
    compute_bmr, compute_target_calories, compute_tdee, EnergyEstimate, MIN_TARGET_CALORIES,
};
pub use macros::{compute_macros, protein_multiplier, MacroBreakdown};
pub use meals::{compute_meal_breakdown, MealPlan, MealSlot, MealTarget};
pub use profile::{
    ActivityLevel, BodyProfile, Gender, Goal, ProfileError, TrainingTag, TrainingTags,
};
pub use progress::{calorie_progress, CalorieProgress, IntakeAdvice, ProgressStatus};

/// Round to the nearest integer, halves toward positive infinity
///
/// Out-of-range values saturate at `i64::MIN`/`i64::MAX` and NaN maps to 0.
pub(crate) fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

/// Energy and macro targets for one day
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NutritionSummary {
    pub bmr: i64,
    pub tdee: i64,
    pub target_calories: i64,
    pub protein: i64,
    pub carbs: i64,
    pub fat: i64,
}

impl NutritionSummary {
    pub fn energy(&self) -> EnergyEstimate {
        EnergyEstimate {
            bmr: self.bmr,
            tdee: self.tdee,
            target_calories: self.target_calories,
        }
    }

    pub fn macros(&self) -> MacroBreakdown {
        MacroBreakdown {
            protein: self.protein,
            carbs: self.carbs,
            fat: self.fat,
        }
    }

    /// Per-slot breakdown of this summary
    pub fn meal_plan(&self) -> MealPlan {
        compute_meal_breakdown(&self.energy(), &self.macros())
    }
}

/// Run the full pipeline for a profile; `None` gives the all-zero summary
pub fn daily_nutrition(profile: Option<&BodyProfile>) -> NutritionSummary {
    let Some(profile) = profile else {
        return NutritionSummary::default();
    };

    let energy = EnergyEstimate::for_profile(profile);
    let macros = compute_macros(
        energy.target_calories,
        profile.weight_kg,
        profile.goal,
        &profile.training_tags,
    );

    NutritionSummary {
        bmr: energy.bmr,
        tdee: energy.tdee,
        target_calories: energy.target_calories,
        protein: macros.protein,
        carbs: macros.carbs,
        fat: macros.fat,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference_profile() -> BodyProfile {
        BodyProfile {
            weight_kg: Some(70.0),
            height_cm: Some(175.0),
            age: Some(30),
            gender: Gender::Male,
            activity_level: ActivityLevel::Moderate,
            goal: Goal::Maintain,
            training_tags: TrainingTags::new(),
        }
    }

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up(2.5), 3);
        assert_eq!(round_half_up(2.49), 2);
        assert_eq!(round_half_up(-2.5), -2);
        assert_eq!(round_half_up(-2.51), -3);
        assert_eq!(round_half_up(1e300), i64::MAX);
        assert_eq!(round_half_up(f64::NEG_INFINITY), i64::MIN);
        assert_eq!(round_half_up(f64::NAN), 0);
    }

    #[test]
    fn test_full_pipeline_worked_example() {
        let summary = daily_nutrition(Some(&reference_profile()));
        assert_eq!(
            summary,
            NutritionSummary {
                bmr: 1649,
                tdee: 2556,
                target_calories: 2556,
                protein: 112,
                carbs: 354,
                fat: 77,
            }
        );
    }

    #[test]
    fn test_pipeline_is_deterministic() {
        let profile = reference_profile();
        let first = daily_nutrition(Some(&profile));
        let second = daily_nutrition(Some(&profile));
        assert_eq!(first, second);
        assert_eq!(first.meal_plan(), second.meal_plan());
    }

    #[test]
    fn test_lose_goal_pipeline() {
        let profile = BodyProfile { goal: Goal::Lose, ..reference_profile() };
        let summary = daily_nutrition(Some(&profile));
        assert_eq!(summary.target_calories, 2056);
        assert_eq!(summary.protein, 126);
    }

    #[test]
    fn test_running_pipeline() {
        let profile = BodyProfile {
            training_tags: TrainingTags::parse(["running"]),
            ..reference_profile()
        };
        let summary = daily_nutrition(Some(&profile));
        assert_eq!(summary.fat, 62);
        assert!((summary.carbs - 354 - 32).abs() <= 1);
    }

    #[test]
    fn test_incomplete_profile_degrades_to_zero() {
        for profile in [
            BodyProfile { weight_kg: None, ..reference_profile() },
            BodyProfile { height_cm: Some(-1.0), ..reference_profile() },
            BodyProfile { age: Some(0), ..reference_profile() },
        ] {
            let summary = daily_nutrition(Some(&profile));
            assert_eq!(summary, NutritionSummary::default());
            assert_eq!(summary.meal_plan(), MealPlan::default());
        }
    }

    #[test]
    fn test_missing_profile() {
        assert_eq!(daily_nutrition(None), NutritionSummary::default());
    }

    #[test]
    fn test_small_lose_profile_hits_floor() {
        let profile = BodyProfile {
            weight_kg: Some(45.0),
            height_cm: Some(150.0),
            age: Some(60),
            gender: Gender::Female,
            activity_level: ActivityLevel::Sedentary,
            goal: Goal::Lose,
            training_tags: TrainingTags::new(),
        };
        let summary = daily_nutrition(Some(&profile));
        assert!(summary.tdee - 500 < MIN_TARGET_CALORIES);
        assert_eq!(summary.target_calories, MIN_TARGET_CALORIES);
    }

    #[test]
    fn test_extreme_profiles_do_not_panic() {
        for goal in [Goal::Lose, Goal::Maintain, Goal::Gain] {
            for (weight, height) in [(1e18, 175.0), (f64::MAX, 175.0), (70.0, f64::MAX), (f64::MAX, f64::MAX)] {
                let profile = BodyProfile {
                    weight_kg: Some(weight),
                    height_cm: Some(height),
                    age: Some(i64::MAX),
                    goal,
                    training_tags: TrainingTags::parse(["strength", "running"]),
                    ..reference_profile()
                };
                let summary = daily_nutrition(Some(&profile));
                assert!(summary.target_calories >= MIN_TARGET_CALORIES, "{:?}", summary);
                let plan = summary.meal_plan();
                let _ = plan.total();
                let _ = summary.macros().calories();
            }
        }
    }

    #[test]
    fn test_huge_weight_gain_saturates() {
        let profile = BodyProfile {
            weight_kg: Some(1e18),
            goal: Goal::Gain,
            ..reference_profile()
        };
        let summary = daily_nutrition(Some(&profile));
        assert_eq!(summary.tdee, i64::MAX);
        assert_eq!(summary.target_calories, i64::MAX);
    }
}
