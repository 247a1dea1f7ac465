//! Per-session state
//!
//! Everything a user builds up while using the tracker. Lives in memory only;
//! the server serializes access to it behind a single mutex.

use chrono::{Local, NaiveDate, Timelike};

use crate::catalog::FavoriteSet;
use crate::models::{CustomDietBuilder, MealLedger, MealSlot, NutrientLabel, SavedDiet};
use crate::nutrition::RecommendedIntake;

#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub favorites: FavoriteSet,
    pub ledger: MealLedger,
    pub diet_builder: CustomDietBuilder,
    pub saved_diets: Vec<SavedDiet>,
    pub intake: RecommendedIntake,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Session whose calorie target differs from the standard table
    pub fn with_daily_calories(daily_calories: Option<f64>) -> Self {
        let mut state = Self::new();
        if let Some(kcal) = daily_calories {
            state.intake = state.intake.with_target(NutrientLabel::Calories, kcal);
        }
        state
    }
}

/// Today's calendar day in the local timezone
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Meal slot matching the current local hour
pub fn current_meal_slot() -> MealSlot {
    MealSlot::for_hour(Local::now().hour())
}

/// Parse an ISO date (`YYYY-MM-DD`), defaulting to today
pub fn resolve_date(date: Option<&str>) -> Result<NaiveDate, String> {
    match date.map(str::trim).filter(|d| !d.is_empty()) {
        Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map_err(|_| format!("Invalid date '{}': expected YYYY-MM-DD", raw)),
        None => Ok(today()),
    }
}

/// Parse a meal slot name, defaulting to the slot for the current hour
pub fn resolve_slot(slot: Option<&str>) -> Result<MealSlot, String> {
    match slot.map(str::trim).filter(|s| !s.is_empty()) {
        Some(raw) => MealSlot::from_str(raw).ok_or_else(|| {
            format!(
                "Invalid meal slot '{}': expected 아침/점심/저녁 or breakfast/lunch/dinner",
                raw
            )
        }),
        None => Ok(current_meal_slot()),
    }
}
