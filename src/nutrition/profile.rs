//! Body profile types
//!
//! The calculator's input record and the closed enumerations it is built from.
//! Text values are parsed once at the boundary; anything unrecognized maps to
//! the documented default for that field.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Gender used to pick the BMR constant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    /// Averages the male and female formulas
    #[default]
    Other,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Other => "other",
        }
    }

    /// Parse from text; unknown values become `Other`
    pub fn from_str(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "male" | "m" => Gender::Male,
            "female" | "f" => Gender::Female,
            _ => Gender::Other,
        }
    }
}

/// Weekly activity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityLevel {
    /// Little to no exercise
    Sedentary,
    /// Light exercise, 1-3 days/week
    Light,
    /// Moderate exercise, 3-5 days/week
    #[default]
    Moderate,
    /// Heavy exercise, 6-7 days/week
    Active,
}

impl ActivityLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "sedentary",
            ActivityLevel::Light => "light",
            ActivityLevel::Moderate => "moderate",
            ActivityLevel::Active => "active",
        }
    }

    /// Parse from text; unknown values become `Moderate`
    pub fn from_str(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "sedentary" => ActivityLevel::Sedentary,
            "light" => ActivityLevel::Light,
            "active" => ActivityLevel::Active,
            _ => ActivityLevel::Moderate,
        }
    }

    /// TDEE multiplier applied to BMR
    pub fn factor(&self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::Light => 1.375,
            ActivityLevel::Moderate => 1.55,
            ActivityLevel::Active => 1.725,
        }
    }
}

/// Fitness goal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Goal {
    Lose,
    #[default]
    Maintain,
    Gain,
}

impl Goal {
    pub fn as_str(&self) -> &'static str {
        match self {
            Goal::Lose => "lose",
            Goal::Maintain => "maintain",
            Goal::Gain => "gain",
        }
    }

    /// Parse from text; unknown values become `Maintain`
    pub fn from_str(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "lose" => Goal::Lose,
            "gain" => Goal::Gain,
            _ => Goal::Maintain,
        }
    }
}

/// A training activity the user does regularly
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TrainingTag {
    Running,
    Cycling,
    Swimming,
    Yoga,
    Strength,
    Hiit,
    Weightlifting,
    Basketball,
    Football,
    /// Any tag outside the known vocabulary, stored lowercased
    Other(String),
}

/// Tags that raise the protein multiplier
pub const STRENGTH_TAGS: [TrainingTag; 3] = [
    TrainingTag::Strength,
    TrainingTag::Hiit,
    TrainingTag::Weightlifting,
];

/// Tags that shift calories from fat to carbs
pub const ENDURANCE_TAGS: [TrainingTag; 3] = [
    TrainingTag::Running,
    TrainingTag::Cycling,
    TrainingTag::Swimming,
];

impl TrainingTag {
    pub fn as_str(&self) -> &str {
        match self {
            TrainingTag::Running => "running",
            TrainingTag::Cycling => "cycling",
            TrainingTag::Swimming => "swimming",
            TrainingTag::Yoga => "yoga",
            TrainingTag::Strength => "strength",
            TrainingTag::Hiit => "hiit",
            TrainingTag::Weightlifting => "weightlifting",
            TrainingTag::Basketball => "basketball",
            TrainingTag::Football => "football",
            TrainingTag::Other(s) => s,
        }
    }

    pub fn from_str(s: &str) -> Self {
        let lower = s.trim().to_lowercase();
        match lower.as_str() {
            "running" => TrainingTag::Running,
            "cycling" => TrainingTag::Cycling,
            "swimming" => TrainingTag::Swimming,
            "yoga" => TrainingTag::Yoga,
            "strength" => TrainingTag::Strength,
            "hiit" => TrainingTag::Hiit,
            "weightlifting" => TrainingTag::Weightlifting,
            "basketball" => TrainingTag::Basketball,
            "football" => TrainingTag::Football,
            _ => TrainingTag::Other(lower),
        }
    }
}

impl From<String> for TrainingTag {
    fn from(s: String) -> Self {
        TrainingTag::from_str(&s)
    }
}

impl From<TrainingTag> for String {
    fn from(tag: TrainingTag) -> Self {
        tag.as_str().to_string()
    }
}

/// Set of training tags
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrainingTags(BTreeSet<TrainingTag>);

impl TrainingTags {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a list of free-form tag strings, dropping blanks
    pub fn parse<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        tags.into_iter()
            .filter(|s| !s.as_ref().trim().is_empty())
            .map(|s| TrainingTag::from_str(s.as_ref()))
            .collect()
    }

    pub fn contains(&self, tag: &TrainingTag) -> bool {
        self.0.contains(tag)
    }

    /// True if any of `subset` is present
    pub fn intersects(&self, subset: &[TrainingTag]) -> bool {
        subset.iter().any(|t| self.0.contains(t))
    }

    pub fn is_strength_adjacent(&self) -> bool {
        self.intersects(&STRENGTH_TAGS)
    }

    pub fn is_endurance_adjacent(&self) -> bool {
        self.intersects(&ENDURANCE_TAGS)
    }

    pub fn to_strings(&self) -> Vec<String> {
        self.0.iter().map(|t| t.as_str().to_string()).collect()
    }
}

impl FromIterator<TrainingTag> for TrainingTags {
    fn from_iter<I: IntoIterator<Item = TrainingTag>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Why a profile cannot produce a calorie budget
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProfileError {
    #[error("weight is missing")]
    MissingWeight,

    #[error("weight must be a positive number of kilograms, got {0}")]
    InvalidWeight(f64),

    #[error("height is missing")]
    MissingHeight,

    #[error("height must be a positive number of centimeters, got {0}")]
    InvalidHeight(f64),

    #[error("age is missing")]
    MissingAge,

    #[error("age must be a positive number of years, got {0}")]
    InvalidAge(i64),
}

/// Body metrics and preferences for one person
///
/// Units: kilograms, centimeters, whole years.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BodyProfile {
    pub weight_kg: Option<f64>,
    pub height_cm: Option<f64>,
    pub age: Option<i64>,
    #[serde(default)]
    pub gender: Gender,
    #[serde(default)]
    pub activity_level: ActivityLevel,
    #[serde(default)]
    pub goal: Goal,
    #[serde(default)]
    pub training_tags: TrainingTags,
}

impl BodyProfile {
    /// Check that weight, height and age are all usable
    pub fn validate(&self) -> Result<(), ProfileError> {
        match self.weight_kg {
            None => return Err(ProfileError::MissingWeight),
            Some(w) if positive(Some(w)).is_none() => return Err(ProfileError::InvalidWeight(w)),
            _ => {}
        }
        match self.height_cm {
            None => return Err(ProfileError::MissingHeight),
            Some(h) if positive(Some(h)).is_none() => return Err(ProfileError::InvalidHeight(h)),
            _ => {}
        }
        match self.age {
            None => Err(ProfileError::MissingAge),
            Some(a) if a <= 0 => Err(ProfileError::InvalidAge(a)),
            _ => Ok(()),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.validate().is_ok()
    }
}

/// The value if present, finite and positive
pub(crate) fn positive(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && *v > 0.0)
}
