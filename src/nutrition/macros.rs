//! Macronutrient partitioning
//!
//! Splits a calorie target into protein, carbohydrate and fat grams using the
//! 4/4/9 kcal-per-gram convention.

use serde::{Deserialize, Serialize};

use super::profile::{positive, Goal, TrainingTags};
use super::round_half_up;

pub const KCAL_PER_G_PROTEIN: f64 = 4.0;
pub const KCAL_PER_G_CARBS: f64 = 4.0;
pub const KCAL_PER_G_FAT: f64 = 9.0;

/// Share of calories from fat before any endurance shift
pub const BASE_FAT_SHARE: f64 = 0.27;

/// Share of calories moved from fat to carbs for endurance training
pub const ENDURANCE_CARB_SHIFT: f64 = 0.05;

/// Extra grams of protein per kg for strength-adjacent training
pub const STRENGTH_PROTEIN_BONUS: f64 = 0.2;

/// Daily macronutrient targets in grams
///
/// `carbs` is signed: very high protein at a low calorie target leaves a
/// negative remainder, which is reported as-is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacroBreakdown {
    pub protein: i64,
    pub carbs: i64,
    pub fat: i64,
}

impl MacroBreakdown {
    /// Calories represented by the rounded grams, saturating on overflow
    pub fn calories(&self) -> i64 {
        self.protein
            .saturating_mul(KCAL_PER_G_PROTEIN as i64)
            .saturating_add(self.carbs.saturating_mul(KCAL_PER_G_CARBS as i64))
            .saturating_add(self.fat.saturating_mul(KCAL_PER_G_FAT as i64))
    }
}

/// Grams of protein per kg of body weight for a goal and training set
pub fn protein_multiplier(goal: Goal, tags: &TrainingTags) -> f64 {
    let base = match goal {
        Goal::Gain => 2.0,
        Goal::Lose => 1.8,
        Goal::Maintain => 1.6,
    };

    if tags.is_strength_adjacent() {
        base + STRENGTH_PROTEIN_BONUS
    } else {
        base
    }
}

/// Split `target_calories` into protein, carbs and fat
///
/// Returns all zeros when the target is 0 or the weight is unusable. A
/// negative target is partitioned like any other.
pub fn compute_macros(
    target_calories: i64,
    weight_kg: Option<f64>,
    goal: Goal,
    tags: &TrainingTags,
) -> MacroBreakdown {
    let Some(weight) = positive(weight_kg) else {
        return MacroBreakdown::default();
    };
    if target_calories == 0 {
        return MacroBreakdown::default();
    }

    let target = target_calories as f64;

    let protein = weight * protein_multiplier(goal, tags);
    let mut fat = target * BASE_FAT_SHARE / KCAL_PER_G_FAT;

    let carb_calories = target - protein * KCAL_PER_G_PROTEIN - fat * KCAL_PER_G_FAT;
    let mut carbs = carb_calories / KCAL_PER_G_CARBS;

    // Carbs are computed from the base fat share, then the shift is applied to both.
    if tags.is_endurance_adjacent() && goal != Goal::Lose {
        carbs += target * ENDURANCE_CARB_SHIFT / KCAL_PER_G_CARBS;
        fat = target * (BASE_FAT_SHARE - ENDURANCE_CARB_SHIFT) / KCAL_PER_G_FAT;
    }

    MacroBreakdown {
        protein: round_half_up(protein),
        carbs: round_half_up(carbs),
        fat: round_half_up(fat),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_tags() -> TrainingTags {
        TrainingTags::new()
    }

    #[test]
    fn test_maintain_worked_example() {
        let m = compute_macros(2556, Some(70.0), Goal::Maintain, &no_tags());
        assert_eq!(m, MacroBreakdown { protein: 112, carbs: 354, fat: 77 });
    }

    #[test]
    fn test_partition_stays_within_rounding_slack() {
        let m = compute_macros(2556, Some(70.0), Goal::Maintain, &no_tags());
        assert!((m.calories() - 2556).abs() <= 3, "got {}", m.calories());
    }

    #[test]
    fn test_lose_raises_protein() {
        let m = compute_macros(2056, Some(70.0), Goal::Lose, &no_tags());
        assert_eq!(m.protein, 126);
        assert_eq!(m.fat, 62);
        assert_eq!(m.carbs, 249);
    }

    #[test]
    fn test_gain_protein() {
        let m = compute_macros(2856, Some(70.0), Goal::Gain, &no_tags());
        assert_eq!(m.protein, 140);
    }

    #[test]
    fn test_strength_bonus_stacks_with_goal() {
        let tags = TrainingTags::parse(["weightlifting"]);
        assert!((protein_multiplier(Goal::Gain, &tags) - 2.2).abs() < 1e-9);
        assert!((protein_multiplier(Goal::Maintain, &tags) - 1.8).abs() < 1e-9);

        let m = compute_macros(2556, Some(70.0), Goal::Maintain, &tags);
        assert_eq!(m.protein, 126);
    }

    #[test]
    fn test_endurance_shifts_fat_to_carbs() {
        let tags = TrainingTags::parse(["running"]);
        let m = compute_macros(2556, Some(70.0), Goal::Maintain, &tags);
        assert_eq!(m.fat, 62);
        assert_eq!(m.protein, 112);
        // 354.47 + 31.95
        assert_eq!(m.carbs, 386);
    }

    #[test]
    fn test_endurance_ignored_when_losing() {
        let tags = TrainingTags::parse(["cycling"]);
        let with = compute_macros(2056, Some(70.0), Goal::Lose, &tags);
        let without = compute_macros(2056, Some(70.0), Goal::Lose, &no_tags());
        assert_eq!(with, without);
    }

    #[test]
    fn test_strength_and_endurance_both_apply() {
        let tags = TrainingTags::parse(["hiit", "swimming"]);
        let m = compute_macros(2556, Some(70.0), Goal::Maintain, &tags);
        assert_eq!(m.protein, 126);
        assert_eq!(m.fat, 62);
        // (2556 - 504 - 690.12) / 4 + 31.95
        assert_eq!(m.carbs, 372);
    }

    #[test]
    fn test_zero_for_missing_inputs() {
        assert_eq!(compute_macros(0, Some(70.0), Goal::Maintain, &no_tags()), MacroBreakdown::default());
        assert_eq!(compute_macros(2000, None, Goal::Maintain, &no_tags()), MacroBreakdown::default());
        assert_eq!(compute_macros(2000, Some(0.0), Goal::Maintain, &no_tags()), MacroBreakdown::default());
    }

    #[test]
    fn test_negative_carbs_are_not_clamped() {
        let tags = TrainingTags::parse(["strength"]);
        // protein 440 g = 1760 kcal, fat 36 g = 324 kcal, both above a 1200 target
        let m = compute_macros(1200, Some(200.0), Goal::Gain, &tags);
        assert_eq!(m.protein, 440);
        assert_eq!(m.fat, 36);
        assert_eq!(m.carbs, -221);
    }

    #[test]
    fn test_negative_target_is_partitioned() {
        let m = compute_macros(-900, Some(70.0), Goal::Maintain, &no_tags());
        // fat = -900 * 0.27 / 9, carbs = (-900 - 448 + 243) / 4 = -276.25
        assert_eq!(m, MacroBreakdown { protein: 112, carbs: -276, fat: -27 });
    }

    #[test]
    fn test_calories_saturate() {
        let m = compute_macros(i64::MAX, Some(f64::MAX), Goal::Gain, &TrainingTags::parse(["strength"]));
        assert_eq!(m.protein, i64::MAX);
        assert_eq!(m.carbs, i64::MIN);
        let huge = MacroBreakdown { protein: i64::MAX, carbs: i64::MAX, fat: i64::MAX };
        assert_eq!(huge.calories(), i64::MAX);
    }
}
