//! Data models
//!
//! In-memory entities of a meal-tracking session.

mod custom_diet;
mod food_item;
mod meal_entry;
mod meal_ledger;
mod nutrition;

pub use custom_diet::{CustomDietBuilder, DietEntry, DietError, SavedDiet};
pub use food_item::{FoodItem, REFERENCE_GRAMS};
pub use meal_entry::{MealEntry, MealSlot};
pub use meal_ledger::{DayMeals, MealLedger};
pub use nutrition::{NutrientLabel, NutrientMap, Nutrition};
