//! Nutrition Plan MCP Tools
//!
//! Tools for computing calorie budgets, tracking the daily target and building
//! the coaching feed.

use chrono::Timelike;
use serde::Serialize;

use crate::db::Database;
use crate::models::{CalorieTarget, TargetSource, UserProfile};
use crate::nutrition::{
    bmi, calorie_progress, coaching_feed, daily_nutrition, protein_multiplier, BmiCategory,
    BmiStandard, BodyProfile, CalorieProgress, CoachFeed, MealPlan, NutritionSummary,
};

/// Full calculator output for one profile
#[derive(Debug, Clone, Serialize)]
pub struct NutritionReport {
    /// False when weight, height or age is missing or invalid
    pub profile_complete: bool,
    /// Reason the profile is incomplete
    pub issue: Option<String>,
    pub summary: NutritionSummary,
    pub protein_per_kg: f64,
    pub meal_plan: MealPlan,
    pub bmi: Option<f64>,
    pub bmi_category: Option<BmiCategory>,
    pub bmi_label: Option<&'static str>,
}

/// Response for get_calorie_progress
#[derive(Debug, Serialize)]
pub struct CalorieProgressResponse {
    pub target_source: TargetSource,
    #[serde(flatten)]
    pub progress: CalorieProgress,
}

/// Response for get_recommendations
#[derive(Debug, Serialize)]
pub struct RecommendationsResponse {
    pub consumed: i64,
    pub target: i64,
    pub target_source: TargetSource,
    /// target - consumed; negative when over target
    pub calorie_gap: i64,
    pub bmi: Option<f64>,
    pub bmi_standard: BmiStandard,
    pub bmi_category: Option<BmiCategory>,
    pub bmi_label: Option<&'static str>,
    #[serde(flatten)]
    pub feed: CoachFeed,
}

/// Build a report for a profile without touching storage
pub fn calculate_nutrition(profile: &BodyProfile) -> NutritionReport {
    let summary = daily_nutrition(Some(profile));
    let issue = profile.validate().err().map(|e| e.to_string());

    if let Some(ref reason) = issue {
        tracing::debug!(reason = %reason, "profile incomplete, returning zero budget");
    }

    let bmi_value = bmi(profile.weight_kg, profile.height_cm);
    let bmi_category = bmi_value.map(BmiCategory::from_bmi);

    NutritionReport {
        profile_complete: issue.is_none(),
        issue,
        summary,
        protein_per_kg: protein_multiplier(profile.goal, &profile.training_tags),
        meal_plan: summary.meal_plan(),
        bmi: bmi_value,
        bmi_category,
        bmi_label: bmi_category.map(|c| c.display_name()),
    }
}

/// Report for the stored profile
pub fn get_nutrition_plan(db: &Database) -> Result<Option<NutritionReport>, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let profile = UserProfile::get(&conn)
        .map_err(|e| format!("Failed to get profile: {}", e))?;

    Ok(profile.map(|p| calculate_nutrition(&p.body)))
}

/// Get the stored daily calorie target
pub fn get_calorie_target(db: &Database) -> Result<Option<CalorieTarget>, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    CalorieTarget::get(&conn).map_err(|e| format!("Failed to get calorie target: {}", e))
}

/// Override the daily calorie target by hand
pub fn set_calorie_target(db: &Database, calories: i64) -> Result<CalorieTarget, String> {
    if calories <= 0 {
        return Err(format!("Calorie target must be a positive number, got {}", calories));
    }

    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let target = CalorieTarget::set(&conn, calories, TargetSource::Manual)
        .map_err(|e| format!("Failed to set calorie target: {}", e))?;

    tracing::info!(calories = target.calories, "manual calorie target saved");
    Ok(target)
}

/// Compare consumed calories with the stored target
///
/// `hour` is the local hour of day (0-23); defaults to now.
pub fn get_calorie_progress(
    db: &Database,
    consumed: i64,
    hour: Option<u32>,
) -> Result<CalorieProgressResponse, String> {
    if consumed < 0 {
        return Err(format!("Consumed calories cannot be negative, got {}", consumed));
    }
    let hour = match hour {
        Some(h) if h > 23 => return Err(format!("Hour must be between 0 and 23, got {}", h)),
        Some(h) => h,
        None => chrono::Local::now().hour(),
    };

    let target = get_calorie_target(db)?
        .ok_or_else(|| "No calorie target set. Save a profile or call set_calorie_target first.".to_string())?;

    Ok(CalorieProgressResponse {
        target_source: target.source,
        progress: calorie_progress(consumed, target.calories, hour),
    })
}

/// Coaching feed for today's intake against the stored target and profile
///
/// BMI advice is left out when no profile with weight and height is stored.
pub fn get_recommendations(
    db: &Database,
    consumed: i64,
    standard: BmiStandard,
) -> Result<RecommendationsResponse, String> {
    if consumed < 0 {
        return Err(format!("Consumed calories cannot be negative, got {}", consumed));
    }

    let target = get_calorie_target(db)?
        .ok_or_else(|| "No calorie target set. Save a profile or call set_calorie_target first.".to_string())?;

    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;
    let profile = UserProfile::get(&conn)
        .map_err(|e| format!("Failed to get profile: {}", e))?;

    let bmi_value = profile.and_then(|p| bmi(p.body.weight_kg, p.body.height_cm));
    let bmi_category = bmi_value.map(|b| standard.category(b));
    let calorie_gap = target.calories.saturating_sub(consumed);

    let feed = coaching_feed(calorie_gap, bmi_value, standard);
    tracing::debug!(
        calorie_gap,
        standard = standard.as_str(),
        items = feed.recommendations().len(),
        "coaching feed built"
    );

    Ok(RecommendationsResponse {
        consumed,
        target: target.calories,
        target_source: target.source,
        calorie_gap,
        bmi: bmi_value,
        bmi_standard: standard,
        bmi_category,
        bmi_label: bmi_category.map(|c| c.display_name()),
        feed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nutrition::{ActivityLevel, Gender, Goal, IntakeAdvice, Recommendation, TrainingTags};

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
    fn test_report_for_complete_profile() {
        let report = calculate_nutrition(&reference_profile());
        assert!(report.profile_complete);
        assert!(report.issue.is_none());
        assert_eq!(report.summary.target_calories, 2556);
        assert_eq!(report.meal_plan.breakfast.calories, 639);
        assert_eq!(report.bmi, Some(22.9));
        assert_eq!(report.bmi_category, Some(BmiCategory::NormalWeight));
        assert_eq!(report.bmi_label, Some("Normal weight"));
        assert!((report.protein_per_kg - 1.6).abs() < 1e-9);
    }

    #[test]
    fn test_report_flags_incomplete_profile() {
        let profile = BodyProfile { age: None, ..reference_profile() };
        let report = calculate_nutrition(&profile);
        assert!(!report.profile_complete);
        assert_eq!(report.issue.as_deref(), Some("age is missing"));
        assert_eq!(report.summary, NutritionSummary::default());
        // BMI only needs weight and height
        assert_eq!(report.bmi, Some(22.9));
    }

    #[test]
    fn test_manual_target_and_progress() {
        let db = Database::in_memory().unwrap();
        assert!(get_calorie_progress(&db, 500, Some(9)).is_err());

        set_calorie_target(&db, 2000).unwrap();
        let resp = get_calorie_progress(&db, 1200, Some(14)).unwrap();
        assert_eq!(resp.target_source, TargetSource::Manual);
        assert_eq!(resp.progress.remaining, 800);
        assert_eq!(resp.progress.advice, IntakeAdvice::GoodProgress);
    }

    #[test]
    fn test_rejects_bad_inputs() {
        let db = Database::in_memory().unwrap();
        assert!(set_calorie_target(&db, 0).is_err());
        set_calorie_target(&db, 1800).unwrap();
        assert!(get_calorie_progress(&db, -1, Some(9)).is_err());
        assert!(get_calorie_progress(&db, 100, Some(24)).is_err());
    }

    #[test]
    fn test_plan_without_profile_is_none() {
        let db = Database::in_memory().unwrap();
        assert!(get_nutrition_plan(&db).unwrap().is_none());
    }

    #[test]
    fn test_recommendations_need_a_target() {
        let db = Database::in_memory().unwrap();
        assert!(get_recommendations(&db, 500, BmiStandard::Who).is_err());
    }

    #[test]
    fn test_recommendations_without_profile() {
        let db = Database::in_memory().unwrap();
        set_calorie_target(&db, 2000).unwrap();

        let resp = get_recommendations(&db, 2300, BmiStandard::Chinese).unwrap();
        assert_eq!(resp.calorie_gap, -300);
        assert!(resp.bmi.is_none());
        assert_eq!(resp.feed.general[0].recommendation, Recommendation::IntakeExceeded { calories: 300 });
        assert_eq!(resp.feed.exercise.len(), 1);
        assert_eq!(resp.feed.exercise[0].exercise_options[0].minutes, 60);
    }

    #[test]
    fn test_recommendations_use_stored_profile_bmi() {
        let db = Database::in_memory().unwrap();
        crate::tools::profile::set_profile(
            &db,
            crate::models::UserProfileUpdate {
                weight_kg: Some(70.0),
                height_cm: Some(175.0),
                age: Some(30),
                gender: Some(Gender::Male),
                ..Default::default()
            },
        )
        .unwrap();

        let resp = get_recommendations(&db, 2256, BmiStandard::Who).unwrap();
        assert_eq!(resp.target, 2556);
        assert_eq!(resp.calorie_gap, 300);
        assert_eq!(resp.bmi, Some(22.9));
        assert_eq!(resp.bmi_category, Some(BmiCategory::NormalWeight));
        assert_eq!(
            resp.feed.diet.iter().map(|i| i.recommendation).collect::<Vec<_>>(),
            vec![Recommendation::BalancedDinner, Recommendation::HealthyDiet]
        );
    }
}
