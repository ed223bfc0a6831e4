//! Database migrations
//!
//! Schema creation and migration logic.

use rusqlite::Connection;

use super::connection::DbResult;

/// Current schema version
const SCHEMA_VERSION: i32 = 1;

/// Run all migrations to bring the database up to the current schema version
pub fn run_migrations(conn: &Connection) -> DbResult<()> {
    // Create migrations table if it doesn't exist
    conn.execute(
        "CREATE TABLE IF NOT EXISTS schema_migrations (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        )",
        [],
    )?;

    let current_version = get_schema_version(conn)?;

    if current_version < 1 {
        migrate_v1(conn)?;
        conn.execute("INSERT INTO schema_migrations (version) VALUES (1)", [])?;
    }

    Ok(())
}

/// Migration v1: Initial schema
fn migrate_v1(conn: &Connection) -> DbResult<()> {
    conn.execute_batch(
        r#"
        -- ============================================
        -- USER PROFILE
        -- Single row (id = 1): calculator input
        -- ============================================
        CREATE TABLE user_profile (
            id INTEGER PRIMARY KEY CHECK(id = 1),
            name TEXT,
            weight_kg REAL,                      -- nullable: incomplete profiles are allowed
            height_cm REAL,
            age INTEGER,
            gender TEXT NOT NULL DEFAULT 'other'
                CHECK(gender IN ('male', 'female', 'other')),
            activity_level TEXT NOT NULL DEFAULT 'moderate'
                CHECK(activity_level IN ('sedentary', 'light', 'moderate', 'active')),
            goal TEXT NOT NULL DEFAULT 'maintain'
                CHECK(goal IN ('lose', 'maintain', 'gain')),
            training_tags TEXT NOT NULL DEFAULT '[]',  -- JSON array of tag strings

            created_at TEXT NOT NULL DEFAULT (datetime('now')),
            updated_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        -- ============================================
        -- CALORIE TARGET
        -- Single row (id = 1): daily calorie target scalar
        -- ============================================
        CREATE TABLE calorie_target (
            id INTEGER PRIMARY KEY CHECK(id = 1),
            calories INTEGER NOT NULL CHECK(calories > 0),
            source TEXT NOT NULL CHECK(source IN ('profile', 'manual')),
            updated_at TEXT NOT NULL DEFAULT (datetime('now'))
        );
        "#,
    )?;

    Ok(())
}

/// Get the current schema version
pub fn get_schema_version(conn: &Connection) -> DbResult<i32> {
    let version: i32 = conn
        .query_row(
            "SELECT COALESCE(MAX(version), 0) FROM schema_migrations",
            [],
            |row| row.get(0),
        )
        .unwrap_or(0);
    Ok(version)
}

/// Check if the database needs migration
pub fn needs_migration(conn: &Connection) -> DbResult<bool> {
    let current = get_schema_version(conn)?;
    Ok(current < SCHEMA_VERSION)
}
