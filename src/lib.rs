//! FitCal Library
//!
//! Calorie budget and macronutrient planning, with a SQLite profile store and
//! MCP tools on top.

pub mod build_info;
pub mod config;
pub mod db;
pub mod mcp;
pub mod models;
pub mod nutrition;
pub mod tools;
