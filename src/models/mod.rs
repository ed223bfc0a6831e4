//! Data models
//!
//! Rust structs representing database entities.

mod calorie_target;
mod profile;

pub use calorie_target::{CalorieTarget, TargetSource};
pub use profile::{UserProfile, UserProfileUpdate};
