//! Daily calorie target model
//!
//! A single persisted scalar, written either from a computed profile plan or
//! set by hand.

use rusqlite::{params, Connection, Row};
use serde::{Deserialize, Serialize};

use crate::db::{DbError, DbResult};

/// Where the stored target came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetSource {
    Profile,
    Manual,
}

impl TargetSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            TargetSource::Profile => "profile",
            TargetSource::Manual => "manual",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "profile" => Some(TargetSource::Profile),
            "manual" => Some(TargetSource::Manual),
            _ => None,
        }
    }
}

/// Stored daily calorie target
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalorieTarget {
    pub calories: i64,
    pub source: TargetSource,
    pub updated_at: String,
}

impl CalorieTarget {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        let source: String = row.get("source")?;
        Ok(Self {
            calories: row.get("calories")?,
            source: TargetSource::from_str(&source).unwrap_or(TargetSource::Manual),
            updated_at: row.get("updated_at")?,
        })
    }

    /// Get the stored target, if any
    pub fn get(conn: &Connection) -> DbResult<Option<Self>> {
        let mut stmt = conn.prepare("SELECT * FROM calorie_target WHERE id = 1")?;

        let result = stmt.query_row([], Self::from_row);
        match result {
            Ok(target) => Ok(Some(target)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Store a new target; `calories` must be positive
    pub fn set(conn: &Connection, calories: i64, source: TargetSource) -> DbResult<Self> {
        if calories <= 0 {
            return Err(DbError::InvalidData(format!(
                "calorie target must be positive, got {}",
                calories
            )));
        }

        conn.execute(
            r#"
            INSERT INTO calorie_target (id, calories, source)
            VALUES (1, ?1, ?2)
            ON CONFLICT(id) DO UPDATE SET
                calories = excluded.calories,
                source = excluded.source,
                updated_at = datetime('now')
            "#,
            params![calories, source.as_str()],
        )?;

        Self::get(conn)?.ok_or_else(|| DbError::Sqlite(rusqlite::Error::QueryReturnedNoRows))
    }
}
