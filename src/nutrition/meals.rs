//! Meal distribution
//!
//! Spreads the daily budget across breakfast, lunch, dinner and snacks. Each
//! macro has its own per-slot weights; every value is rounded on its own, so
//! the slot sums can drift from the daily total by a gram or calorie.

use serde::{Deserialize, Serialize};

use super::energy::EnergyEstimate;
use super::macros::MacroBreakdown;
use super::round_half_up;

/// One of the four daily meal slots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealSlot {
    Breakfast,
    Lunch,
    Dinner,
    Snacks,
}

impl MealSlot {
    pub const ALL: [MealSlot; 4] = [
        MealSlot::Breakfast,
        MealSlot::Lunch,
        MealSlot::Dinner,
        MealSlot::Snacks,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MealSlot::Breakfast => "breakfast",
            MealSlot::Lunch => "lunch",
            MealSlot::Dinner => "dinner",
            MealSlot::Snacks => "snacks",
        }
    }

    /// Share of daily calories
    pub fn calorie_weight(&self) -> f64 {
        match self {
            MealSlot::Breakfast => 0.25,
            MealSlot::Lunch => 0.30,
            MealSlot::Dinner => 0.30,
            MealSlot::Snacks => 0.15,
        }
    }

    /// Share of daily protein
    pub fn protein_weight(&self) -> f64 {
        self.calorie_weight()
    }

    /// Share of daily carbs (heavier at breakfast)
    pub fn carbs_weight(&self) -> f64 {
        match self {
            MealSlot::Breakfast => 0.30,
            MealSlot::Lunch => 0.30,
            MealSlot::Dinner => 0.25,
            MealSlot::Snacks => 0.15,
        }
    }

    /// Share of daily fat (heavier at dinner)
    pub fn fat_weight(&self) -> f64 {
        match self {
            MealSlot::Breakfast => 0.20,
            MealSlot::Lunch => 0.30,
            MealSlot::Dinner => 0.35,
            MealSlot::Snacks => 0.15,
        }
    }
}

/// Calories and macros for one meal slot
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MealTarget {
    pub calories: i64,
    pub protein: i64,
    pub carbs: i64,
    pub fat: i64,
}

/// Per-slot targets for a day
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MealPlan {
    pub breakfast: MealTarget,
    pub lunch: MealTarget,
    pub dinner: MealTarget,
    pub snacks: MealTarget,
}

impl MealPlan {
    pub fn slot(&self, slot: MealSlot) -> &MealTarget {
        match slot {
            MealSlot::Breakfast => &self.breakfast,
            MealSlot::Lunch => &self.lunch,
            MealSlot::Dinner => &self.dinner,
            MealSlot::Snacks => &self.snacks,
        }
    }

    fn slot_mut(&mut self, slot: MealSlot) -> &mut MealTarget {
        match slot {
            MealSlot::Breakfast => &mut self.breakfast,
            MealSlot::Lunch => &mut self.lunch,
            MealSlot::Dinner => &mut self.dinner,
            MealSlot::Snacks => &mut self.snacks,
        }
    }

    /// Sum over all four slots
    pub fn total(&self) -> MealTarget {
        MealSlot::ALL.iter().fold(MealTarget::default(), |acc, s| {
            let t = self.slot(*s);
            MealTarget {
                calories: acc.calories.saturating_add(t.calories),
                protein: acc.protein.saturating_add(t.protein),
                carbs: acc.carbs.saturating_add(t.carbs),
                fat: acc.fat.saturating_add(t.fat),
            }
        })
    }
}

/// Distribute a day's energy target and macros across meal slots
pub fn compute_meal_breakdown(estimate: &EnergyEstimate, macros: &MacroBreakdown) -> MealPlan {
    let mut plan = MealPlan::default();
    if estimate.is_zero() {
        return plan;
    }

    let share = |total: i64, weight: f64| round_half_up(total as f64 * weight);

    for slot in MealSlot::ALL {
        *plan.slot_mut(slot) = MealTarget {
            calories: share(estimate.target_calories, slot.calorie_weight()),
            protein: share(macros.protein, slot.protein_weight()),
            carbs: share(macros.carbs, slot.carbs_weight()),
            fat: share(macros.fat, slot.fat_weight()),
        };
    }

    plan
}

#[cfg(test)]
mod tests {
    use super::*;

    fn worked_example() -> (EnergyEstimate, MacroBreakdown) {
        (
            EnergyEstimate { bmr: 1649, tdee: 2556, target_calories: 2556 },
            MacroBreakdown { protein: 112, carbs: 354, fat: 77 },
        )
    }

    #[test]
    fn test_weights_sum_to_one() {
        for weight in [
            MealSlot::calorie_weight as fn(&MealSlot) -> f64,
            MealSlot::protein_weight,
            MealSlot::carbs_weight,
            MealSlot::fat_weight,
        ] {
            let sum: f64 = MealSlot::ALL.iter().map(weight).sum();
            assert!((sum - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_breakdown_worked_example() {
        let (estimate, macros) = worked_example();
        let plan = compute_meal_breakdown(&estimate, &macros);

        assert_eq!(plan.breakfast, MealTarget { calories: 639, protein: 28, carbs: 106, fat: 15 });
        assert_eq!(plan.lunch, MealTarget { calories: 767, protein: 34, carbs: 106, fat: 23 });
        assert_eq!(plan.dinner, MealTarget { calories: 767, protein: 34, carbs: 89, fat: 27 });
        assert_eq!(plan.snacks, MealTarget { calories: 383, protein: 17, carbs: 53, fat: 12 });
    }

    #[test]
    fn test_slot_calories_sum_close_to_target() {
        let (estimate, macros) = worked_example();
        let plan = compute_meal_breakdown(&estimate, &macros);
        assert!((plan.total().calories - estimate.target_calories).abs() <= 2);
    }

    #[test]
    fn test_rounding_residue_is_not_corrected() {
        let (estimate, macros) = worked_example();
        let plan = compute_meal_breakdown(&estimate, &macros);
        // 34 + 34 + 28 + 17 = 113 vs 112 total
        assert_eq!(plan.total().protein, 113);
    }

    #[test]
    fn test_zero_target_gives_zero_plan() {
        let plan = compute_meal_breakdown(&EnergyEstimate::default(), &MacroBreakdown::default());
        assert_eq!(plan, MealPlan::default());

        // Macros are ignored when there is no calorie target
        let macros = MacroBreakdown { protein: 100, carbs: 100, fat: 100 };
        assert_eq!(compute_meal_breakdown(&EnergyEstimate::default(), &macros), MealPlan::default());
    }
}
