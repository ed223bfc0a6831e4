//! Profile MCP Tools
//!
//! Tools for storing the body profile. Saving recomputes the plan and writes
//! the daily calorie target.

use serde::Serialize;

use crate::db::Database;
use crate::models::{CalorieTarget, TargetSource, UserProfile, UserProfileUpdate};
use crate::tools::nutrition::{calculate_nutrition, NutritionReport};

/// Response for set_profile
#[derive(Debug, Serialize)]
pub struct SetProfileResponse {
    pub profile: UserProfile,
    pub nutrition: NutritionReport,
    /// Stored target after the save; unchanged if the new plan has no target
    pub calorie_target: Option<CalorieTarget>,
    pub target_updated: bool,
}

/// Get the stored profile
pub fn get_profile(db: &Database) -> Result<Option<UserProfile>, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    UserProfile::get(&conn).map_err(|e| format!("Failed to get profile: {}", e))
}

/// Merge `update` into the stored profile, save it, and persist the new target
///
/// The profile and the target are written in one transaction.
pub fn set_profile(db: &Database, update: UserProfileUpdate) -> Result<SetProfileResponse, String> {
    db.with_conn_mut(|conn| {
        let tx = conn.transaction()?;

        let current = UserProfile::get(&tx)?;
        let (name, body) = update.merge(current);
        let profile = UserProfile::save(&tx, name.as_deref(), &body)?;

        let nutrition = calculate_nutrition(&profile.body);
        let target_calories = nutrition.summary.target_calories;

        let target_updated = target_calories > 0;
        let calorie_target = if target_updated {
            Some(CalorieTarget::set(&tx, target_calories, TargetSource::Profile)?)
        } else {
            CalorieTarget::get(&tx)?
        };

        tx.commit()?;

        if target_updated {
            tracing::info!(calories = target_calories, "calorie target updated from profile");
        } else {
            tracing::warn!(
                issue = nutrition.issue.as_deref().unwrap_or("unknown"),
                "profile saved without a calorie target"
            );
        }

        Ok(SetProfileResponse {
            profile,
            nutrition,
            calorie_target,
            target_updated,
        })
    })
    .map_err(|e| format!("Failed to save profile: {}", e))
}
