//! Coaching feed
//!
//! General, diet and exercise suggestions built from today's calorie gap
//! (target minus consumed) and the BMI band under a chosen standard. Like the
//! rest of the calculator this is pure: the same inputs give the same feed.

use serde::{Deserialize, Serialize};

use super::bmi::{BmiCategory, BmiStandard};

/// Shortfalls below this get a light dinner suggestion
pub const LIGHT_DINNER_GAP: i64 = 200;

/// Shortfalls below this (and at least [`LIGHT_DINNER_GAP`]) get a balanced dinner
pub const BALANCED_DINNER_GAP: i64 = 400;

/// Exercise offered for burning off an excess
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Exercise {
    /// Brisk walking, 6 km/h
    Walking,
    /// Jogging, 8 km/h
    Jogging,
    /// Jump rope
    Skipping,
}

impl Exercise {
    pub const ALL: [Exercise; 3] = [Exercise::Walking, Exercise::Jogging, Exercise::Skipping];

    pub fn as_str(&self) -> &'static str {
        match self {
            Exercise::Walking => "walking",
            Exercise::Jogging => "jogging",
            Exercise::Skipping => "skipping",
        }
    }

    /// Unknown names fall back to walking
    pub fn from_str(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "jogging" => Exercise::Jogging,
            "skipping" => Exercise::Skipping,
            _ => Exercise::Walking,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Exercise::Walking => "Brisk Walking",
            Exercise::Jogging => "Jogging",
            Exercise::Skipping => "Skipping Rope",
        }
    }

    pub fn kcal_per_minute(&self) -> i64 {
        match self {
            Exercise::Walking => 5,
            Exercise::Jogging => 10,
            Exercise::Skipping => 15,
        }
    }
}

/// Minutes of `exercise` needed to burn `calories`, rounded up
pub fn exercise_minutes(exercise: Exercise, calories: i64) -> i64 {
    let rate = exercise.kcal_per_minute();
    calories / rate + i64::from(calories % rate > 0)
}

/// Which list of the feed a recommendation belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoachSection {
    General,
    Diet,
    Exercise,
}

/// One entry of the coaching feed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Recommendation {
    IntakeShortfall { calories: i64 },
    IntakeExceeded { calories: i64 },
    LightDinner,
    BalancedDinner,
    NutrientRichDinner,
    MuscleGainSnack,
    BurnPlan { calories: i64 },

    // Underweight
    IncreaseNutrients,
    WeightGainMealPlan,
    StrengthTraining,

    // Normal weight
    MaintainStatus,
    HealthyDiet,
    ComprehensiveExercise,

    // Overweight
    ControlWeight,
    FatLossDiet,
    FatLossExercise,

    // Obese
    GradualWeightLoss,
    WeightLossDiet,
    ProgressiveExercise,

    StayHydrated,
    AdequateSleep,
}

impl Recommendation {
    pub fn section(&self) -> CoachSection {
        use Recommendation::*;
        match self {
            IntakeShortfall { .. } | IntakeExceeded { .. } | IncreaseNutrients | MaintainStatus
            | ControlWeight | GradualWeightLoss | StayHydrated | AdequateSleep => {
                CoachSection::General
            }
            LightDinner | BalancedDinner | NutrientRichDinner | MuscleGainSnack
            | WeightGainMealPlan | HealthyDiet | FatLossDiet | WeightLossDiet => CoachSection::Diet,
            BurnPlan { .. } | StrengthTraining | ComprehensiveExercise | FatLossExercise
            | ProgressiveExercise => CoachSection::Exercise,
        }
    }

    pub fn title(&self) -> &'static str {
        use Recommendation::*;
        match self {
            IntakeShortfall { .. } => "Intake Insufficient Today",
            IntakeExceeded { .. } => "Intake Exceeded Today",
            LightDinner => "Light Dinner Suggestion",
            BalancedDinner => "Balanced Dinner Recommendation",
            NutrientRichDinner => "Nutrient-Rich Dinner",
            MuscleGainSnack => "Muscle Gain Snack",
            BurnPlan { .. } => "Exercise Burn Plan",
            IncreaseNutrients => "Increase Nutrient Intake",
            WeightGainMealPlan => "Weight Gain Meal Plan",
            StrengthTraining => "Strength Training Plan",
            MaintainStatus => "Maintain Good Status",
            HealthyDiet => "Maintain Healthy Diet",
            ComprehensiveExercise => "Comprehensive Exercise Plan",
            ControlWeight => "Control Weight Appropriately",
            FatLossDiet => "Fat Loss Diet Strategy",
            FatLossExercise => "Fat Loss Exercise Combination",
            GradualWeightLoss => "Healthy Weight Loss Plan",
            WeightLossDiet => "Healthy Weight Loss Diet",
            ProgressiveExercise => "Progressive Exercise Plan",
            StayHydrated => "Stay Hydrated",
            AdequateSleep => "Adequate Sleep",
        }
    }

    pub fn description(&self) -> String {
        use Recommendation::*;
        let text = match self {
            IntakeShortfall { calories } => {
                return format!(
                    "You need about {} more calories to reach your daily goal. Consider adding some healthy snacks.",
                    calories
                )
            }
            IntakeExceeded { calories } => {
                return format!(
                    "You've exceeded your goal by about {} calories today. Consider increasing exercise to burn off the excess.",
                    calories
                )
            }
            BurnPlan { calories } => {
                return format!(
                    "You need to burn {} calories to reach today's goal. Choose one of the following exercise options:",
                    calories
                )
            }
            LightDinner => "Recommended: A simple vegetable soup or fruit salad with a handful of nuts to add energy without overloading your digestive system.",
            BalancedDinner => "Suggestion: Lean protein (chicken breast/fish) with steamed vegetables and a small portion of whole grains for balanced nutrients.",
            NutrientRichDinner => "Recommended: A high-protein, low-fat main dish with plenty of complex carbohydrates and vegetables for balanced nutrition.",
            MuscleGainSnack => "Consider adding high-protein snacks between meals, such as Greek yogurt with protein powder, milk with oats, or nuts with fruits to help build muscle.",
            IncreaseNutrients => "Your weight is below the recommended range. You should increase nutrient intake and engage in appropriate muscle-building exercises.",
            WeightGainMealPlan => "Eat 5-6 meals daily, increasing healthy fats (nuts, olive oil), quality protein (fish, chicken, legumes), and complex carbs (brown rice, whole grain bread).",
            StrengthTraining => "3-4 strength training sessions per week, focusing on large muscle groups with compound movements like squats, deadlifts, and bench presses.",
            MaintainStatus => "Your weight is in the ideal range! Continue with balanced diet and regular exercise.",
            HealthyDiet => "Maintain balanced intake of protein, carbs, and fats. Eat plenty of fruits and vegetables. Limit processed foods and refined sugars.",
            ComprehensiveExercise => "3-5 workouts per week combining cardio, strength, and flexibility training for balanced physical development.",
            ControlWeight => "Your weight is slightly above recommended. Adjusting diet and increasing exercise can improve your health significantly.",
            FatLossDiet => "Control daily calorie intake (300-500 calories less than expenditure), increase vegetable and protein intake, reduce refined carbs and saturated fats.",
            FatLossExercise => "Exercise 5 times weekly, including 3 cardio sessions (45 minutes each) and 2 strength training sessions to boost metabolism and muscle ratio.",
            GradualWeightLoss => "Consider a gradual weight loss plan combining dietary control and regular exercise to improve health progressively.",
            WeightLossDiet => "Adopt a low-calorie, nutrient-dense diet, increase fiber intake, control portion sizes, avoid high-sugar and high-fat foods.",
            ProgressiveExercise => "Start with low-intensity cardio (like walking), gradually increase duration and intensity. Aim for at least 150 minutes of moderate exercise weekly.",
            StayHydrated => "Drinking enough water daily aids metabolism and overall health. Aim for at least 8 glasses of water per day.",
            AdequateSleep => "Good sleep is essential for health. Aim for 7-9 hours of quality sleep each night.",
        };
        text.to_string()
    }
}

/// Time needed for one exercise in a burn plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExerciseOption {
    pub exercise: Exercise,
    pub name: &'static str,
    pub minutes: i64,
    pub description: String,
}

impl ExerciseOption {
    fn new(exercise: Exercise, calories: i64) -> Self {
        let minutes = exercise_minutes(exercise, calories);
        let description = match exercise {
            Exercise::Walking => format!("Need to walk briskly for about {} minutes (6km/h)", minutes),
            Exercise::Jogging => format!("Need to jog for about {} minutes (8km/h)", minutes),
            Exercise::Skipping => format!("Need to skip rope for about {} minutes", minutes),
        };
        Self {
            exercise,
            name: exercise.display_name(),
            minutes,
            description,
        }
    }
}

/// A recommendation with its rendered text
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CoachItem {
    #[serde(flatten)]
    pub recommendation: Recommendation,
    pub title: &'static str,
    pub description: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub exercise_options: Vec<ExerciseOption>,
}

impl From<Recommendation> for CoachItem {
    fn from(recommendation: Recommendation) -> Self {
        let exercise_options = match recommendation {
            Recommendation::BurnPlan { calories } => Exercise::ALL
                .iter()
                .map(|e| ExerciseOption::new(*e, calories))
                .collect(),
            _ => Vec::new(),
        };
        Self {
            recommendation,
            title: recommendation.title(),
            description: recommendation.description(),
            exercise_options,
        }
    }
}

/// The three recommendation lists, each in display order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CoachFeed {
    pub general: Vec<CoachItem>,
    pub diet: Vec<CoachItem>,
    pub exercise: Vec<CoachItem>,
}

impl CoachFeed {
    fn push(&mut self, recommendation: Recommendation) {
        let list = match recommendation.section() {
            CoachSection::General => &mut self.general,
            CoachSection::Diet => &mut self.diet,
            CoachSection::Exercise => &mut self.exercise,
        };
        list.push(recommendation.into());
    }

    /// Every recommendation in the feed, general first
    pub fn recommendations(&self) -> Vec<Recommendation> {
        self.general
            .iter()
            .chain(&self.diet)
            .chain(&self.exercise)
            .map(|item| item.recommendation)
            .collect()
    }
}

/// Build the feed for a calorie gap (`target - consumed`) and an optional BMI
pub fn coaching_feed(calorie_gap: i64, bmi: Option<f64>, standard: BmiStandard) -> CoachFeed {
    let mut feed = CoachFeed::default();
    let category = bmi.map(|b| standard.category(b));

    if calorie_gap > 0 {
        feed.push(Recommendation::IntakeShortfall { calories: calorie_gap });

        // Dinner suggestions need a BMI to go with them
        if let Some(category) = category {
            feed.push(if calorie_gap < LIGHT_DINNER_GAP {
                Recommendation::LightDinner
            } else if calorie_gap < BALANCED_DINNER_GAP {
                Recommendation::BalancedDinner
            } else {
                Recommendation::NutrientRichDinner
            });
            if category == BmiCategory::Underweight {
                feed.push(Recommendation::MuscleGainSnack);
            }
        }
    } else if calorie_gap < 0 {
        let excess = calorie_gap.saturating_neg();
        feed.push(Recommendation::IntakeExceeded { calories: excess });
        feed.push(Recommendation::BurnPlan { calories: excess });
    }

    let by_band = match category {
        Some(BmiCategory::Underweight) => [
            Recommendation::IncreaseNutrients,
            Recommendation::WeightGainMealPlan,
            Recommendation::StrengthTraining,
        ],
        Some(BmiCategory::NormalWeight) => [
            Recommendation::MaintainStatus,
            Recommendation::HealthyDiet,
            Recommendation::ComprehensiveExercise,
        ],
        Some(BmiCategory::Overweight) => [
            Recommendation::ControlWeight,
            Recommendation::FatLossDiet,
            Recommendation::FatLossExercise,
        ],
        Some(BmiCategory::Obese) => [
            Recommendation::GradualWeightLoss,
            Recommendation::WeightLossDiet,
            Recommendation::ProgressiveExercise,
        ],
        None => return finish(feed),
    };
    for recommendation in by_band {
        feed.push(recommendation);
    }

    finish(feed)
}

fn finish(mut feed: CoachFeed) -> CoachFeed {
    feed.push(Recommendation::StayHydrated);
    feed.push(Recommendation::AdequateSleep);
    feed
}
