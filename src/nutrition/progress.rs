//! Calorie progress against the daily target

use serde::{Deserialize, Serialize};

/// Where today's intake sits relative to the target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressStatus {
    /// Under 50%
    BelowHalf,
    /// 50% up to 90%
    Approaching,
    /// 90% up to and including 100%
    NearTarget,
    Exceeded,
}

/// Advice shown with the progress figures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntakeAdvice {
    BreakfastReminder,
    IncreaseIntake,
    GoodProgress,
    GoalReached,
    OverTarget,
}

impl IntakeAdvice {
    pub fn title(&self) -> &'static str {
        match self {
            IntakeAdvice::BreakfastReminder => "Breakfast is Important",
            IntakeAdvice::IncreaseIntake => "Increase Nutrient Intake",
            IntakeAdvice::GoodProgress => "Good Progress",
            IntakeAdvice::GoalReached => "Perfect Achievement",
            IntakeAdvice::OverTarget => "Slightly Over",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            IntakeAdvice::BreakfastReminder => {
                "It's morning. Have breakfast to provide energy for the day."
            }
            IntakeAdvice::IncreaseIntake => {
                "Intake is less than half of the daily goal. Consider eating more while keeping a balanced diet."
            }
            IntakeAdvice::GoodProgress => {
                "Intake is on track. Continue with a balanced, varied diet."
            }
            IntakeAdvice::GoalReached => {
                "Intake has reached or is close to the goal. Prefer low-calorie snacks or some exercise."
            }
            IntakeAdvice::OverTarget => {
                "Intake has exceeded the daily goal. Consider eating less tomorrow and adding physical activity."
            }
        }
    }
}

/// Consumed calories compared with the daily target
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalorieProgress {
    pub consumed: i64,
    pub target: i64,
    pub remaining: i64,
    /// consumed / target * 100, uncapped
    pub percent_of_target: f64,
    /// percent_of_target capped at 100 for progress bars
    pub display_percent: f64,
    pub status: ProgressStatus,
    pub advice: IntakeAdvice,
    pub advice_title: String,
    pub advice_message: String,
}

/// Compare `consumed` calories with `target` at local hour `hour` (0-23)
pub fn calorie_progress(consumed: i64, target: i64, hour: u32) -> CalorieProgress {
    let percent = if target > 0 {
        consumed as f64 / target as f64 * 100.0
    } else {
        0.0
    };

    let status = if percent < 50.0 {
        ProgressStatus::BelowHalf
    } else if percent < 90.0 {
        ProgressStatus::Approaching
    } else if percent <= 100.0 {
        ProgressStatus::NearTarget
    } else {
        ProgressStatus::Exceeded
    };

    let advice = if percent < 30.0 && hour < 12 {
        IntakeAdvice::BreakfastReminder
    } else if percent < 50.0 {
        IntakeAdvice::IncreaseIntake
    } else if percent < 90.0 {
        IntakeAdvice::GoodProgress
    } else if percent <= 110.0 {
        IntakeAdvice::GoalReached
    } else {
        IntakeAdvice::OverTarget
    };

    CalorieProgress {
        consumed,
        target,
        remaining: target.saturating_sub(consumed).max(0),
        percent_of_target: (percent * 10.0).round() / 10.0,
        display_percent: (percent.min(100.0) * 10.0).round() / 10.0,
        status,
        advice,
        advice_title: advice.title().to_string(),
        advice_message: advice.message().to_string(),
    }
}
