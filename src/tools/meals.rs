//! Meal logging MCP Tools
//!
//! Record portions into the ledger and read back totals against the daily targets.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::{DayMeals, FoodItem, MealEntry, MealSlot, NutrientLabel, NutrientMap};
use crate::nutrition::{scale, summarize, NutrientProgress};
use crate::session::SessionState;

/// Response for log_meal
#[derive(Debug, Serialize)]
pub struct LogMealResponse {
    pub date: NaiveDate,
    pub meal_slot: MealSlot,
    pub food_name: String,
    pub grams: f64,
    pub nutrients: NutrientMap,
    pub slot_entry_count: usize,
}

/// Response for get_meal
#[derive(Debug, Serialize)]
pub struct MealDetail {
    pub date: NaiveDate,
    pub meal_slot: MealSlot,
    pub entries: Vec<MealEntry>,
    pub totals: NutrientMap,
    pub progress: Vec<NutrientProgress>,
}

/// Response for get_day
#[derive(Debug, Serialize)]
pub struct DayDetail {
    pub date: NaiveDate,
    pub meals: DayMeals,
    pub slot_totals: BTreeMap<MealSlot, NutrientMap>,
    pub totals: NutrientMap,
    pub progress: Vec<NutrientProgress>,
}

/// Day summary for listing
#[derive(Debug, Serialize)]
pub struct DaySummary {
    pub date: NaiveDate,
    pub entry_count: usize,
    pub total_calories: f64,
}

/// Response for list_logged_days
#[derive(Debug, Serialize)]
pub struct ListDaysResponse {
    pub days: Vec<DaySummary>,
    pub total: usize,
}

/// Scale a food to the portion and record it
pub fn log_meal(
    state: &mut SessionState,
    date: NaiveDate,
    slot: MealSlot,
    item: &FoodItem,
    grams: f64,
) -> Result<LogMealResponse, String> {
    let nutrients = scale(item, grams).ok_or_else(|| "grams must be greater than 0".to_string())?;

    let entry = state
        .ledger
        .append(date, slot, item.name.clone(), grams, nutrients)
        .clone();

    Ok(LogMealResponse {
        date,
        meal_slot: slot,
        food_name: entry.food_name,
        grams: entry.grams,
        nutrients: entry.nutrients,
        slot_entry_count: state.ledger.entries_for(date, slot).len(),
    })
}

/// Entries and totals of one meal slot
pub fn get_meal(state: &SessionState, date: NaiveDate, slot: MealSlot) -> MealDetail {
    let totals = state.ledger.totals_for(date, slot);
    MealDetail {
        date,
        meal_slot: slot,
        entries: state.ledger.entries_for(date, slot).to_vec(),
        progress: summarize(&totals, &state.intake),
        totals,
    }
}

/// All three slots of a day with per-slot and day totals
pub fn get_day(state: &SessionState, date: NaiveDate) -> DayDetail {
    let slot_totals = MealSlot::ALL
        .into_iter()
        .map(|slot| (slot, state.ledger.totals_for(date, slot)))
        .collect();
    let totals = state.ledger.day_totals(date);

    DayDetail {
        date,
        meals: state.ledger.day(date).cloned().unwrap_or_default(),
        slot_totals,
        progress: summarize(&totals, &state.intake),
        totals,
    }
}

/// Every day with at least one entry, oldest first
pub fn list_logged_days(state: &SessionState) -> ListDaysResponse {
    let days: Vec<DaySummary> = state
        .ledger
        .dates()
        .map(|date| DaySummary {
            date,
            entry_count: state.ledger.entry_count(date),
            total_calories: state
                .ledger
                .day_totals(date)
                .get(NutrientLabel::Calories),
        })
        .collect();

    ListDaysResponse {
        total: days.len(),
        days,
    }
}
