//! User profile model
//!
//! The stored body profile the calculator reads from. Single row table.

use rusqlite::types::Type;
use rusqlite::{params, Connection, Row};
use serde::{Deserialize, Serialize};

use crate::db::DbResult;
use crate::nutrition::{ActivityLevel, BodyProfile, Gender, Goal, TrainingTags};

/// Stored user profile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: Option<String>,
    #[serde(flatten)]
    pub body: BodyProfile,
    pub created_at: String,
    pub updated_at: String,
}

/// Partial profile update; `None` keeps the stored value
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserProfileUpdate {
    pub name: Option<String>,
    pub weight_kg: Option<f64>,
    pub height_cm: Option<f64>,
    pub age: Option<i64>,
    pub gender: Option<Gender>,
    pub activity_level: Option<ActivityLevel>,
    pub goal: Option<Goal>,
    pub training_tags: Option<TrainingTags>,
}

impl UserProfileUpdate {
    /// Apply this update on top of `current`
    pub fn merge(self, current: Option<UserProfile>) -> (Option<String>, BodyProfile) {
        let (name, body) = match current {
            Some(p) => (p.name, p.body),
            None => (None, BodyProfile::default()),
        };

        let body = BodyProfile {
            weight_kg: self.weight_kg.or(body.weight_kg),
            height_cm: self.height_cm.or(body.height_cm),
            age: self.age.or(body.age),
            gender: self.gender.unwrap_or(body.gender),
            activity_level: self.activity_level.unwrap_or(body.activity_level),
            goal: self.goal.unwrap_or(body.goal),
            training_tags: self.training_tags.unwrap_or(body.training_tags),
        };

        (self.name.or(name), body)
    }
}

impl UserProfile {
    /// Create from a database row
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        let gender: String = row.get("gender")?;
        let activity_level: String = row.get("activity_level")?;
        let goal: String = row.get("goal")?;
        let tags_json: String = row.get("training_tags")?;

        let tags: Vec<String> = serde_json::from_str(&tags_json).map_err(|e| {
            let idx = row.as_ref().column_index("training_tags").unwrap_or(0);
            rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e))
        })?;

        Ok(Self {
            name: row.get("name")?,
            body: BodyProfile {
                weight_kg: row.get("weight_kg")?,
                height_cm: row.get("height_cm")?,
                age: row.get("age")?,
                gender: Gender::from_str(&gender),
                activity_level: ActivityLevel::from_str(&activity_level),
                goal: Goal::from_str(&goal),
                training_tags: TrainingTags::parse(tags),
            },
            created_at: row.get("created_at")?,
            updated_at: row.get("updated_at")?,
        })
    }

    /// Get the stored profile, if one was saved
    pub fn get(conn: &Connection) -> DbResult<Option<Self>> {
        let mut stmt = conn.prepare("SELECT * FROM user_profile WHERE id = 1")?;

        let result = stmt.query_row([], Self::from_row);
        match result {
            Ok(profile) => Ok(Some(profile)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Replace the stored profile (upsert)
    pub fn save(conn: &Connection, name: Option<&str>, body: &BodyProfile) -> DbResult<Self> {
        let tags_json = serde_json::to_string(&body.training_tags.to_strings())
            .map_err(|e| crate::db::DbError::InvalidData(e.to_string()))?;

        conn.execute(
            r#"
            INSERT INTO user_profile
                (id, name, weight_kg, height_cm, age, gender, activity_level, goal, training_tags)
            VALUES (1, ?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                weight_kg = excluded.weight_kg,
                height_cm = excluded.height_cm,
                age = excluded.age,
                gender = excluded.gender,
                activity_level = excluded.activity_level,
                goal = excluded.goal,
                training_tags = excluded.training_tags,
                updated_at = datetime('now')
            "#,
            params![
                name,
                body.weight_kg,
                body.height_cm,
                body.age,
                body.gender.as_str(),
                body.activity_level.as_str(),
                body.goal.as_str(),
                tags_json,
            ],
        )?;

        Self::get(conn)?.ok_or_else(|| {
            crate::db::DbError::Sqlite(rusqlite::Error::QueryReturnedNoRows)
        })
    }
}
