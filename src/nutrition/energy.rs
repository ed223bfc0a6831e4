//! Energy expenditure estimates
//!
//! BMR (Mifflin-St Jeor), TDEE via activity multipliers, and the goal-adjusted
//! daily calorie target.

use serde::{Deserialize, Serialize};

use super::profile::{positive, ActivityLevel, BodyProfile, Gender, Goal};
use super::round_half_up;

/// Lowest daily target the calculator will recommend
pub const MIN_TARGET_CALORIES: i64 = 1200;

/// Calorie deficit applied for `Goal::Lose`
pub const LOSE_DEFICIT: i64 = 500;

/// Calorie surplus applied for `Goal::Gain`
pub const GAIN_SURPLUS: i64 = 300;

/// BMR, TDEE and target calories, all in kcal/day
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnergyEstimate {
    pub bmr: i64,
    pub tdee: i64,
    pub target_calories: i64,
}

impl EnergyEstimate {
    /// Run BMR -> TDEE -> target for a profile
    pub fn for_profile(profile: &BodyProfile) -> Self {
        let bmr = compute_bmr(profile.weight_kg, profile.height_cm, profile.age, profile.gender);
        let tdee = compute_tdee(bmr, profile.activity_level);
        let target_calories = compute_target_calories(tdee, profile.goal);
        Self { bmr, tdee, target_calories }
    }

    /// True when the profile could not produce a target
    pub fn is_zero(&self) -> bool {
        self.target_calories == 0
    }
}

/// Basal metabolic rate in kcal/day
///
/// Returns 0 when weight, height or age is missing, non-finite or not positive.
pub fn compute_bmr(
    weight_kg: Option<f64>,
    height_cm: Option<f64>,
    age: Option<i64>,
    gender: Gender,
) -> i64 {
    let (Some(weight), Some(height), Some(age)) =
        (positive(weight_kg), positive(height_cm), age.filter(|a| *a > 0))
    else {
        return 0;
    };
    let age = age as f64;

    let base = 10.0 * weight + 6.25 * height - 5.0 * age;
    let male = base + 5.0;
    let female = base - 161.0;

    let bmr = match gender {
        Gender::Male => male,
        Gender::Female => female,
        Gender::Other => (male + female) / 2.0,
    };

    round_half_up(bmr)
}

/// Total daily energy expenditure in kcal/day
pub fn compute_tdee(bmr: i64, activity_level: ActivityLevel) -> i64 {
    if bmr == 0 {
        return 0;
    }
    round_half_up(bmr as f64 * activity_level.factor())
}

/// Goal-adjusted daily target, never below [`MIN_TARGET_CALORIES`]
///
/// Saturates at `i64::MAX` for absurdly large TDEE values.
pub fn compute_target_calories(tdee: i64, goal: Goal) -> i64 {
    if tdee == 0 {
        return 0;
    }

    let adjusted = match goal {
        Goal::Lose => tdee.saturating_sub(LOSE_DEFICIT),
        Goal::Gain => tdee.saturating_add(GAIN_SURPLUS),
        Goal::Maintain => tdee,
    };

    adjusted.max(MIN_TARGET_CALORIES)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bmr_male_worked_example() {
        // 700 + 1093.75 - 150 + 5 = 1648.75
        assert_eq!(compute_bmr(Some(70.0), Some(175.0), Some(30), Gender::Male), 1649);
    }

    #[test]
    fn test_bmr_female_and_other() {
        // 1643.75 - 161 = 1482.75
        assert_eq!(compute_bmr(Some(70.0), Some(175.0), Some(30), Gender::Female), 1483);
        // mean of 1648.75 and 1482.75
        assert_eq!(compute_bmr(Some(70.0), Some(175.0), Some(30), Gender::Other), 1566);
    }

    #[test]
    fn test_bmr_zero_for_missing_or_non_positive() {
        assert_eq!(compute_bmr(None, Some(175.0), Some(30), Gender::Male), 0);
        assert_eq!(compute_bmr(Some(70.0), None, Some(30), Gender::Male), 0);
        assert_eq!(compute_bmr(Some(70.0), Some(175.0), None, Gender::Male), 0);
        assert_eq!(compute_bmr(Some(-70.0), Some(175.0), Some(30), Gender::Male), 0);
        assert_eq!(compute_bmr(Some(70.0), Some(0.0), Some(30), Gender::Male), 0);
        assert_eq!(compute_bmr(Some(70.0), Some(175.0), Some(0), Gender::Male), 0);
        assert_eq!(compute_bmr(Some(f64::INFINITY), Some(175.0), Some(30), Gender::Male), 0);
    }

    #[test]
    fn test_extreme_finite_inputs_saturate() {
        assert_eq!(compute_bmr(Some(1e18), Some(175.0), Some(30), Gender::Male), i64::MAX);
        assert_eq!(compute_bmr(Some(f64::MAX), Some(f64::MAX), Some(30), Gender::Other), i64::MAX);
        assert_eq!(compute_bmr(Some(70.0), Some(175.0), Some(i64::MAX), Gender::Female), i64::MIN);

        assert_eq!(compute_tdee(i64::MAX, ActivityLevel::Active), i64::MAX);
        assert_eq!(compute_target_calories(i64::MAX, Goal::Gain), i64::MAX);
        assert_eq!(compute_target_calories(i64::MIN, Goal::Lose), MIN_TARGET_CALORIES);

        let profile = BodyProfile {
            weight_kg: Some(1e18),
            height_cm: Some(175.0),
            age: Some(30),
            goal: Goal::Gain,
            ..Default::default()
        };
        let estimate = EnergyEstimate::for_profile(&profile);
        assert_eq!(estimate.target_calories, i64::MAX);
        assert!(!estimate.is_zero());
    }

    #[test]
    fn test_tdee_factors() {
        assert_eq!(compute_tdee(1649, ActivityLevel::Moderate), 2556);
        assert_eq!(compute_tdee(1000, ActivityLevel::Sedentary), 1200);
        assert_eq!(compute_tdee(1000, ActivityLevel::Light), 1375);
        assert_eq!(compute_tdee(1000, ActivityLevel::Active), 1725);
        assert_eq!(compute_tdee(0, ActivityLevel::Active), 0);
    }

    #[test]
    fn test_unrecognized_activity_uses_moderate_factor() {
        let level = ActivityLevel::from_str("couch potato");
        assert_eq!(compute_tdee(1649, level), 2556);
    }

    #[test]
    fn test_target_goal_adjustments() {
        assert_eq!(compute_target_calories(2556, Goal::Maintain), 2556);
        assert_eq!(compute_target_calories(2556, Goal::Lose), 2056);
        assert_eq!(compute_target_calories(2556, Goal::Gain), 2856);
        assert_eq!(compute_target_calories(0, Goal::Gain), 0);
    }

    #[test]
    fn test_target_safety_floor() {
        assert_eq!(compute_target_calories(1500, Goal::Lose), 1200);
        assert_eq!(compute_target_calories(1699, Goal::Lose), 1200);
        assert_eq!(compute_target_calories(800, Goal::Gain), 1200);
        assert_eq!(compute_target_calories(1100, Goal::Maintain), 1200);
    }

    #[test]
    fn test_estimate_for_incomplete_profile_is_zero() {
        let profile = BodyProfile {
            weight_kg: Some(70.0),
            height_cm: Some(175.0),
            age: None,
            ..Default::default()
        };
        let estimate = EnergyEstimate::for_profile(&profile);
        assert_eq!(estimate, EnergyEstimate::default());
        assert!(estimate.is_zero());
    }
}
