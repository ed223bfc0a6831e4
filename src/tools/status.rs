//! FitCal Status Tool
//!
//! Provides runtime status information about the FitCal service.

use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;
use sysinfo::{Pid, ProcessesToUpdate, System};

use crate::build_info::BuildInfo;
use crate::db::{migrations, Database};

/// Usage guide for AI assistants
pub const NUTRITION_INSTRUCTIONS: &str = r#"
# FitCal Nutrition Plan Instructions

FitCal turns a body profile into a daily calorie budget, macro targets, and a
per-meal breakdown.

## Units

| Field | Unit |
|-------|------|
| weight_kg | kilograms |
| height_cm | centimeters |
| age | whole years |
| calories | kilocalories |
| protein / carbs / fat | grams |

Convert pounds (1 lb = 0.453592 kg) and inches (1 in = 2.54 cm) before calling
any tool.

## Profile Fields

- **gender**: `male`, `female`, `other` (other averages the two formulas)
- **activity_level**: `sedentary`, `light`, `moderate`, `active`
- **goal**: `lose` (-500 kcal), `maintain`, `gain` (+300 kcal)
- **training_tags**: any list of activities. These change the plan:
  - `strength`, `hiit`, `weightlifting` add 0.2 g/kg protein
  - `running`, `cycling`, `swimming` move 5% of calories from fat to carbs
    (not applied when the goal is `lose`)

Unrecognized gender, activity level or goal values fall back to `other`,
`moderate` and `maintain`.

## Workflow

1. `set_profile` with weight, height, age and preferences. Only the fields you
   pass are changed. Saving recomputes the plan and stores the daily target.
2. `get_nutrition_plan` shows BMR, TDEE, target calories, macros, meal
   breakdown and BMI for the stored profile.
3. `get_calorie_progress` with calories eaten so far compares them to the
   stored target and returns advice.
4. `set_calorie_target` overrides the target by hand. The next profile save
   replaces it again.
5. `get_recommendations` with calories eaten so far returns general, diet and
   exercise suggestions. Pass `bmi_standard` as `chinese` (default, cut-offs
   24/28) or `who` (25/30). An excess includes walking, jogging and skipping
   minutes to burn it off.

Use `calculate_nutrition` to try a profile without saving it.

## Incomplete Profiles

If weight, height or age is missing or not positive, every figure is 0 and
`profile_complete` is false with an `issue` explaining which field is wrong.
Ask the user for the missing value instead of reporting a 0 kcal budget.

## Notes

- Target calories never go below 1200 kcal.
- Each value is rounded on its own, so meal slots may not add up exactly to the
  daily totals.
- Carbs can be negative for very high protein at a low target. Flag this to
  the user rather than clamping it.
"#;

/// Runtime status of the FitCal service
#[derive(Debug, Clone, Serialize)]
pub struct FitcalStatus {
    /// Build information
    pub build_number: u64,
    pub build_timestamp: &'static str,
    pub version: &'static str,

    /// Database information
    pub database_path: String,
    pub database_size_bytes: Option<u64>,
    pub schema_version: Option<i32>,
    pub needs_migration: Option<bool>,

    /// Process information
    pub uptime_seconds: u64,
    pub process_id: u32,
    pub memory_usage_bytes: u64,
}

/// Status tracker for collecting runtime information
pub struct StatusTracker {
    start_time: Instant,
    database_path: PathBuf,
}

impl StatusTracker {
    /// Create a new status tracker
    pub fn new(database_path: PathBuf) -> Self {
        Self {
            start_time: Instant::now(),
            database_path,
        }
    }

    /// Get the current status
    pub fn get_status(&self, database: &Database) -> FitcalStatus {
        let build_info = BuildInfo::current();

        // Get database size if it exists
        let database_size_bytes = std::fs::metadata(&self.database_path)
            .ok()
            .map(|m| m.len());

        let schema_version = database
            .with_conn(migrations::get_schema_version)
            .ok();
        let needs_migration = database
            .with_conn(migrations::needs_migration)
            .ok();

        // Get process info
        let pid = std::process::id();
        let mut sys = System::new();
        sys.refresh_processes(ProcessesToUpdate::Some(&[Pid::from_u32(pid)]));

        let memory_usage_bytes = sys
            .process(Pid::from_u32(pid))
            .map(|p| p.memory())
            .unwrap_or(0);

        FitcalStatus {
            build_number: build_info.build_number,
            build_timestamp: build_info.build_timestamp,
            version: build_info.version,
            database_path: self.database_path.display().to_string(),
            database_size_bytes,
            schema_version,
            needs_migration,
            uptime_seconds: self.start_time.elapsed().as_secs(),
            process_id: pid,
            memory_usage_bytes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_reports_schema() {
        let db = Database::in_memory().unwrap();
        let tracker = StatusTracker::new(PathBuf::from("does-not-exist.db"));
        let status = tracker.get_status(&db);

        assert_eq!(status.schema_version, Some(1));
        assert_eq!(status.needs_migration, Some(false));
        assert_eq!(status.database_size_bytes, None);
        assert_eq!(status.process_id, std::process::id());
    }
}
