//! Runtime configuration
//!
//! Settings come from environment variables with defaults next to the project.

use std::path::PathBuf;

/// Environment variable that overrides the database location
pub const DATABASE_PATH_ENV: &str = "FITCAL_DATABASE_PATH";

/// Default log directive when `RUST_LOG` is not set
pub const DEFAULT_LOG_DIRECTIVE: &str = "fitcal=info";

/// Get the database path from environment or use default
pub fn database_path() -> PathBuf {
    std::env::var(DATABASE_PATH_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| default_database_path())
}

fn default_database_path() -> PathBuf {
    let mut path = std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(|p| p.to_path_buf()))
        .unwrap_or_else(|| PathBuf::from("."));

    // Go up from target/release or target/debug to project root
    if path.ends_with("release") || path.ends_with("debug") {
        if let Some(parent) = path.parent() {
            if let Some(grandparent) = parent.parent() {
                path = grandparent.to_path_buf();
            }
        }
    }

    path.push("data");
    path.push("fitcal.db");
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_path_ends_in_data_dir() {
        let path = default_database_path();
        assert!(path.ends_with("data/fitcal.db"));
    }
}
