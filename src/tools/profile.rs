//! Profile MCP Tools

use serde::Serialize;

use crate::models::NutrientLabel;
use crate::nutrition::{calorie_target as estimate_target, ACTIVITY_FACTOR};
use crate::session::SessionState;

/// Response for calorie_target
#[derive(Debug, Serialize)]
pub struct CalorieTargetResponse {
    /// Whole kcal, absent when any input is not a number
    pub daily_calories: Option<i64>,
    pub activity_factor: f64,
    pub applied: bool,
    /// Calorie target the session is now using
    pub session_target: f64,
}

/// Estimate the daily calorie target and optionally make it the session's target
pub fn calorie_target(
    state: &mut SessionState,
    height_cm: &str,
    weight_kg: &str,
    age: &str,
    apply: bool,
) -> CalorieTargetResponse {
    let daily_calories = estimate_target(height_cm, weight_kg, age);

    let applied = match daily_calories {
        Some(kcal) if apply && kcal > 0 => {
            state.intake = state
                .intake
                .clone()
                .with_target(NutrientLabel::Calories, kcal as f64);
            tracing::info!(kcal, "Applied calorie target to session");
            true
        }
        _ => false,
    };

    CalorieTargetResponse {
        daily_calories,
        activity_factor: ACTIVITY_FACTOR,
        applied,
        session_target: state.intake.target(NutrientLabel::Calories),
    }
}
