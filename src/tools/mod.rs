//! FitCal Tools module
//!
//! MCP tool implementations for the nutrition planner.

pub mod nutrition;
pub mod profile;
pub mod status;
