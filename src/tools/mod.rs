//! FitMeal Tools module
//!
//! MCP tool implementations for FitMeal.

pub mod custom_diets;
pub mod foods;
pub mod meals;
pub mod profile;
pub mod status;
