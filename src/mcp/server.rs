//! FitCal MCP Server Implementation
//!
//! Implements the MCP server with all FitCal tools.

use std::path::PathBuf;
use std::sync::Arc;

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::{schemars, tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::db::Database;
use crate::models::UserProfileUpdate;
use crate::nutrition::{ActivityLevel, BmiStandard, BodyProfile, Gender, Goal, TrainingTags};
use crate::tools::nutrition;
use crate::tools::profile;
use crate::tools::status::StatusTracker;

/// FitCal MCP Service
#[derive(Clone)]
pub struct FitcalService {
    status_tracker: Arc<Mutex<StatusTracker>>,
    database: Database,
    tool_router: ToolRouter<FitcalService>,
}

impl FitcalService {
    pub fn new(database_path: PathBuf, database: Database) -> Self {
        Self {
            status_tracker: Arc::new(Mutex::new(StatusTracker::new(database_path))),
            database,
            tool_router: Self::tool_router(),
        }
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(format!("Serialization error: {}", e), None))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

// ============================================================================
// Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct CalculateNutritionParams {
    /// Body weight in kilograms
    pub weight_kg: Option<f64>,
    /// Height in centimeters
    pub height_cm: Option<f64>,
    /// Age in whole years
    pub age: Option<i64>,
    /// male, female, or other (default other)
    pub gender: Option<String>,
    /// sedentary, light, moderate, or active (default moderate)
    pub activity_level: Option<String>,
    /// lose, maintain, or gain (default maintain)
    pub goal: Option<String>,
    /// Training activities, e.g. ["strength", "running"]
    #[serde(default)]
    pub training_tags: Vec<String>,
}

impl CalculateNutritionParams {
    fn into_profile(self) -> BodyProfile {
        BodyProfile {
            weight_kg: self.weight_kg,
            height_cm: self.height_cm,
            age: self.age,
            gender: self.gender.as_deref().map(Gender::from_str).unwrap_or_default(),
            activity_level: self
                .activity_level
                .as_deref()
                .map(ActivityLevel::from_str)
                .unwrap_or_default(),
            goal: self.goal.as_deref().map(Goal::from_str).unwrap_or_default(),
            training_tags: TrainingTags::parse(self.training_tags),
        }
    }
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SetProfileParams {
    /// Display name (optional)
    pub name: Option<String>,
    /// Body weight in kilograms (optional)
    pub weight_kg: Option<f64>,
    /// Height in centimeters (optional)
    pub height_cm: Option<f64>,
    /// Age in whole years (optional)
    pub age: Option<i64>,
    /// male, female, or other (optional)
    pub gender: Option<String>,
    /// sedentary, light, moderate, or active (optional)
    pub activity_level: Option<String>,
    /// lose, maintain, or gain (optional)
    pub goal: Option<String>,
    /// Replaces the stored training tags when given (optional)
    pub training_tags: Option<Vec<String>>,
}

impl From<SetProfileParams> for UserProfileUpdate {
    fn from(p: SetProfileParams) -> Self {
        UserProfileUpdate {
            name: p.name,
            weight_kg: p.weight_kg,
            height_cm: p.height_cm,
            age: p.age,
            gender: p.gender.as_deref().map(Gender::from_str),
            activity_level: p.activity_level.as_deref().map(ActivityLevel::from_str),
            goal: p.goal.as_deref().map(Goal::from_str),
            training_tags: p.training_tags.map(TrainingTags::parse),
        }
    }
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SetCalorieTargetParams {
    /// Daily calorie target in kcal (must be positive)
    pub calories: i64,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GetCalorieProgressParams {
    /// Calories consumed so far today
    pub consumed_calories: i64,
    /// Local hour of day 0-23 (default: current hour)
    pub hour: Option<u32>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GetRecommendationsParams {
    /// Calories consumed so far today
    pub consumed_calories: i64,
    /// BMI cut-offs: chinese (18.5/24/28) or who (18.5/25/30). Default chinese.
    pub bmi_standard: Option<String>,
}

impl GetRecommendationsParams {
    fn standard(&self) -> BmiStandard {
        self.bmi_standard.as_deref().map(BmiStandard::from_str).unwrap_or_default()
    }
}

// ============================================================================
// Tool Implementations
// ============================================================================

#[tool_router]
impl FitcalService {
    // --- Status ---

    #[tool(description = "Get the current status of the FitCal service including build info, database status, and process information")]
    async fn fitcal_status(&self) -> Result<CallToolResult, McpError> {
        let tracker = self.status_tracker.lock().await;
        let status = tracker.get_status(&self.database);
        to_json(&status)
    }

    #[tool(description = "Get instructions for using the nutrition tools: units, profile fields, and the recommended workflow. Call this before the first profile or plan request.")]
    fn nutrition_instructions(&self) -> Result<CallToolResult, McpError> {
        use crate::tools::status::NUTRITION_INSTRUCTIONS;
        Ok(CallToolResult::success(vec![Content::text(NUTRITION_INSTRUCTIONS)]))
    }

    // --- Calculator ---

    #[tool(description = "Calculate BMR, TDEE, target calories, macros, meal breakdown and BMI for a profile without saving it")]
    fn calculate_nutrition(&self, Parameters(p): Parameters<CalculateNutritionParams>) -> Result<CallToolResult, McpError> {
        let report = nutrition::calculate_nutrition(&p.into_profile());
        to_json(&report)
    }

    #[tool(description = "Get the full nutrition plan for the stored profile")]
    fn get_nutrition_plan(&self) -> Result<CallToolResult, McpError> {
        let result = nutrition::get_nutrition_plan(&self.database).map_err(|e| McpError::internal_error(e, None))?;
        match result {
            Some(report) => to_json(&report),
            None => Ok(CallToolResult::success(vec![Content::text(
                r#"{"error": "No profile saved. Call set_profile first."}"#,
            )])),
        }
    }

    // --- Profile ---

    #[tool(description = "Create or update the body profile. Only the given fields change. Recomputes the plan and stores the daily calorie target.")]
    fn set_profile(&self, Parameters(p): Parameters<SetProfileParams>) -> Result<CallToolResult, McpError> {
        let result = profile::set_profile(&self.database, p.into()).map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }

    #[tool(description = "Get the stored body profile")]
    fn get_profile(&self) -> Result<CallToolResult, McpError> {
        let result = profile::get_profile(&self.database).map_err(|e| McpError::internal_error(e, None))?;
        match result {
            Some(stored) => to_json(&stored),
            None => Ok(CallToolResult::success(vec![Content::text(
                r#"{"error": "No profile saved"}"#,
            )])),
        }
    }

    // --- Calorie Target ---

    #[tool(description = "Set the daily calorie target by hand. Replaced again the next time the profile is saved.")]
    fn set_calorie_target(&self, Parameters(p): Parameters<SetCalorieTargetParams>) -> Result<CallToolResult, McpError> {
        let result = nutrition::set_calorie_target(&self.database, p.calories).map_err(|e| McpError::invalid_params(e, None))?;
        to_json(&result)
    }

    #[tool(description = "Get the stored daily calorie target and where it came from (profile or manual)")]
    fn get_calorie_target(&self) -> Result<CallToolResult, McpError> {
        let result = nutrition::get_calorie_target(&self.database).map_err(|e| McpError::internal_error(e, None))?;
        match result {
            Some(target) => to_json(&target),
            None => Ok(CallToolResult::success(vec![Content::text(
                r#"{"error": "No calorie target set"}"#,
            )])),
        }
    }

    #[tool(description = "Compare calories consumed today with the daily target: remaining calories, percent of target, status and advice")]
    fn get_calorie_progress(&self, Parameters(p): Parameters<GetCalorieProgressParams>) -> Result<CallToolResult, McpError> {
        let result = nutrition::get_calorie_progress(&self.database, p.consumed_calories, p.hour)
            .map_err(|e| McpError::invalid_params(e, None))?;
        to_json(&result)
    }

    // --- Coaching ---

    #[tool(description = "Build the coaching feed: general, diet and exercise suggestions from today's calorie gap and the stored profile's BMI band. An excess comes with walking/jogging/skipping minutes to burn it off.")]
    fn get_recommendations(&self, Parameters(p): Parameters<GetRecommendationsParams>) -> Result<CallToolResult, McpError> {
        let standard = p.standard();
        let result = nutrition::get_recommendations(&self.database, p.consumed_calories, standard)
            .map_err(|e| McpError::invalid_params(e, None))?;
        to_json(&result)
    }
}

// ============================================================================
// Server Handler
// ============================================================================

#[tool_handler]
impl ServerHandler for FitcalService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "fitcal".into(),
                version: crate::build_info::VERSION.into(),
                title: Some("FitCal Nutrition Planner".into()),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "FitCal - calorie budget and macro planning. \
                 Call nutrition_instructions first. \
                 Profile: set_profile/get_profile (kg, cm, years). \
                 Plans: get_nutrition_plan for the stored profile, calculate_nutrition for a what-if profile. \
                 Target: set_calorie_target/get_calorie_target, get_calorie_progress with calories eaten today. \
                 Coaching: get_recommendations with calories eaten today."
                    .into(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_params_parse_with_defaults() {
        let p: CalculateNutritionParams = serde_json::from_str(
            r#"{"weight_kg": 70, "height_cm": 175, "age": 30, "gender": "male", "activity_level": "very", "training_tags": ["Running"]}"#,
        )
        .unwrap();
        let profile = p.into_profile();
        assert_eq!(profile.gender, Gender::Male);
        assert_eq!(profile.activity_level, ActivityLevel::Moderate);
        assert_eq!(profile.goal, Goal::Maintain);
        assert!(profile.training_tags.is_endurance_adjacent());
    }

    #[test]
    fn test_set_profile_params_leave_unset_fields_alone() {
        let p: SetProfileParams = serde_json::from_str(r#"{"goal": "gain"}"#).unwrap();
        let update: UserProfileUpdate = p.into();
        assert_eq!(update.goal, Some(Goal::Gain));
        assert!(update.gender.is_none());
        assert!(update.training_tags.is_none());
    }

    #[test]
    fn test_recommendations_params_standard() {
        let p: GetRecommendationsParams =
            serde_json::from_str(r#"{"consumed_calories": 1800, "bmi_standard": "WHO"}"#).unwrap();
        assert_eq!(p.standard(), BmiStandard::Who);

        let p: GetRecommendationsParams = serde_json::from_str(r#"{"consumed_calories": 1800}"#).unwrap();
        assert_eq!(p.standard(), BmiStandard::Chinese);
    }
}
