//! Body mass index

use serde::{Deserialize, Serialize};

use super::profile::positive;

/// BMI band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BmiCategory {
    Underweight,
    NormalWeight,
    Overweight,
    Obese,
}

impl BmiCategory {
    pub fn from_bmi(bmi: f64) -> Self {
        if bmi < 18.5 {
            BmiCategory::Underweight
        } else if bmi < 24.9 {
            BmiCategory::NormalWeight
        } else if bmi < 29.9 {
            BmiCategory::Overweight
        } else {
            BmiCategory::Obese
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            BmiCategory::Underweight => "Underweight",
            BmiCategory::NormalWeight => "Normal weight",
            BmiCategory::Overweight => "Overweight",
            BmiCategory::Obese => "Obese",
        }
    }
}

/// Cut-off table used by the coaching feed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BmiStandard {
    /// 18.5 / 25 / 30
    Who,
    /// 18.5 / 24 / 28
    #[default]
    Chinese,
}

impl BmiStandard {
    pub fn as_str(&self) -> &'static str {
        match self {
            BmiStandard::Who => "who",
            BmiStandard::Chinese => "chinese",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "who" => BmiStandard::Who,
            _ => BmiStandard::Chinese,
        }
    }

    pub fn category(&self, bmi: f64) -> BmiCategory {
        let (normal_below, overweight_below) = match self {
            BmiStandard::Who => (25.0, 30.0),
            BmiStandard::Chinese => (24.0, 28.0),
        };

        if bmi < 18.5 {
            BmiCategory::Underweight
        } else if bmi < normal_below {
            BmiCategory::NormalWeight
        } else if bmi < overweight_below {
            BmiCategory::Overweight
        } else {
            BmiCategory::Obese
        }
    }
}

/// BMI rounded to one decimal, or `None` if weight or height is unusable
pub fn bmi(weight_kg: Option<f64>, height_cm: Option<f64>) -> Option<f64> {
    let weight = positive(weight_kg)?;
    let height_m = positive(height_cm)? / 100.0;

    let value = weight / (height_m * height_m);
    Some((value * 10.0).round() / 10.0)
}
