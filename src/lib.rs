//! FitMeal Library
//!
//! Food search, meal logging, and nutrient intake tracking.

pub mod build_info;
pub mod catalog;
pub mod config;
pub mod mcp;
pub mod models;
pub mod nutrition;
pub mod session;
pub mod tools;
