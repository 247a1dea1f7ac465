//! FitMeal Status Tool
//!
//! Provides runtime status information about the FitMeal service.

use serde::Serialize;
use std::time::Instant;
use sysinfo::{Pid, ProcessesToUpdate, System};

use crate::build_info::BuildInfo;
use crate::catalog::FoodSearchCache;
use crate::session::SessionState;

/// Meal logging instructions for AI assistants
pub const MEAL_INSTRUCTIONS: &str = r#"
# FitMeal Meal Logging Instructions

FitMeal looks foods up in the Korean public food nutrition catalog
(data.go.kr), scales them to the portion eaten, and keeps a per-day record
of breakfast, lunch, and dinner.

## Overview

1. **Categories** - The catalog is split into food categories with two-digit codes
   (`01` 밥류, `02` 빵 및 과자류, ... `27` 수조어육류). Call `list_categories` to see them.
2. **Foods** - Every catalog value is per 100 g. Calories are kcal, sodium is mg,
   everything else is g.
3. **Meal entries** - A food scaled to the grams eaten, filed under a date and a meal slot.

---

## Finding a Food

**Tool:** `search_foods`
- `category`: two-digit code, defaults to `01`
- `query`: case-insensitive substring of the food name; empty lists the whole category
- `favorites_first`: favorites are listed before the rest (default true)

The first search in a category downloads it; later searches are served from memory.

**Tool:** `get_food_detail` shows the per-100g values with each nutrient's share of
the daily target. Shares here are not capped and may exceed 100%.

**Tool:** `toggle_favorite` marks or unmarks a food name.

---

## Logging a Meal

**Tool:** `preview_nutrients` shows what a portion contains without recording it.

**Tool:** `log_meal`
- `category`, `food_name`: the food as returned by `search_foods`
- `grams`: portion weight, must be greater than 0
- `date`: `YYYY-MM-DD`, defaults to today (local time)
- `meal_slot`: `아침`/`점심`/`저녁` or `breakfast`/`lunch`/`dinner`.
  Defaults by the current hour: 06-10 breakfast, 11-16 lunch, otherwise dinner.

Logging the same food twice records it twice. There is no edit or delete.

---

## Reviewing Intake

- `get_meal`: entries and totals of one slot
- `get_day`: all three slots, per-slot totals, day totals, and progress
- `list_logged_days`: every day with at least one entry

Progress rows compare totals with the daily targets
(2000 kcal, 300 g carbohydrates, 50 g protein, 70 g fat, 20 g saturated fat,
2300 mg sodium, 50 g sugar). Progress percentages are capped at 100.

---

## Custom Diets

1. `start_custom_diet` with a name. Starting again discards the diet in progress.
2. `add_to_custom_diet` with a food and grams, as many times as needed.
3. `get_custom_diet` shows the entries and running total.
4. `save_custom_diet` stores it; saving under an existing name replaces that diet.

Foods cannot be added before the diet is named.

---

## Calorie Target

`calorie_target` takes height (cm), weight (kg), and age (years) and returns
`(10*weight + 6.25*height - 5*age + 5) * 1.55`. Pass `apply: true` to use it as
the session's daily calorie target.
"#;

/// Runtime status of the FitMeal service
#[derive(Debug, Clone, Serialize)]
pub struct FitMealStatus {
    /// Build information
    pub build_number: u64,
    pub build_timestamp: &'static str,
    pub version: &'static str,

    /// Session information
    pub cached_categories: Vec<&'static str>,
    pub logged_days: usize,
    pub saved_diets: usize,
    pub favorites: usize,

    /// Process information
    pub uptime_seconds: u64,
    pub process_id: u32,
    pub memory_usage_bytes: u64,
}

/// Status tracker for collecting runtime information
pub struct StatusTracker {
    start_time: Instant,
}

impl StatusTracker {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
        }
    }

    /// Get the current status
    pub fn get_status(&self, cache: &FoodSearchCache, state: &SessionState) -> FitMealStatus {
        let build_info = BuildInfo::current();

        let pid = std::process::id();
        let mut sys = System::new();
        sys.refresh_processes(ProcessesToUpdate::Some(&[Pid::from_u32(pid)]));

        let memory_usage_bytes = sys
            .process(Pid::from_u32(pid))
            .map(|p| p.memory())
            .unwrap_or(0);

        FitMealStatus {
            build_number: build_info.build_number,
            build_timestamp: build_info.build_timestamp,
            version: build_info.version,
            cached_categories: cache.cached_categories(),
            logged_days: state.ledger.dates().count(),
            saved_diets: state.saved_diets.len(),
            favorites: state.favorites.len(),
            uptime_seconds: self.start_time.elapsed().as_secs(),
            process_id: pid,
            memory_usage_bytes,
        }
    }
}

impl Default for StatusTracker {
    fn default() -> Self {
        Self::new()
    }
}
