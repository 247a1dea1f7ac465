//! Meal ledger
//!
//! Meal entries grouped by calendar day and meal slot. Totals are never
//! stored; every read folds the entries again.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use super::{MealEntry, MealSlot, NutrientMap};

/// The three meal slots of one day
#[derive(Debug, Clone, Default, Serialize)]
pub struct DayMeals {
    pub breakfast: Vec<MealEntry>,
    pub lunch: Vec<MealEntry>,
    pub dinner: Vec<MealEntry>,
}

impl DayMeals {
    pub fn slot(&self, slot: MealSlot) -> &[MealEntry] {
        match slot {
            MealSlot::Breakfast => &self.breakfast,
            MealSlot::Lunch => &self.lunch,
            MealSlot::Dinner => &self.dinner,
        }
    }

    fn slot_mut(&mut self, slot: MealSlot) -> &mut Vec<MealEntry> {
        match slot {
            MealSlot::Breakfast => &mut self.breakfast,
            MealSlot::Lunch => &mut self.lunch,
            MealSlot::Dinner => &mut self.dinner,
        }
    }

    pub fn entry_count(&self) -> usize {
        self.breakfast.len() + self.lunch.len() + self.dinner.len()
    }

    /// Fold of every entry of the day
    pub fn totals(&self) -> NutrientMap {
        MealSlot::ALL
            .into_iter()
            .flat_map(|slot| self.slot(slot))
            .map(|entry| &entry.nutrients)
            .sum()
    }
}

/// Append-only record of meals by day.
///
/// A day, once present, always carries all three slots.
#[derive(Debug, Clone, Default)]
pub struct MealLedger {
    days: BTreeMap<NaiveDate, DayMeals>,
}

impl MealLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a consumption event. Adding the same food twice records it twice.
    pub fn append(
        &mut self,
        date: NaiveDate,
        slot: MealSlot,
        food_name: impl Into<String>,
        grams: f64,
        nutrients: NutrientMap,
    ) -> &MealEntry {
        let entry = MealEntry::new(food_name, grams, nutrients);
        tracing::debug!(%date, %slot, food = %entry.food_name, grams, "Appending meal entry");

        let bucket = self.days.entry(date).or_default().slot_mut(slot);
        bucket.push(entry);
        &bucket[bucket.len() - 1]
    }

    /// Entries of one slot in insertion order; empty when nothing was logged
    pub fn entries_for(&self, date: NaiveDate, slot: MealSlot) -> &[MealEntry] {
        self.days.get(&date).map(|day| day.slot(slot)).unwrap_or(&[])
    }

    /// Per-label sum over one slot, with every canonical label present
    pub fn totals_for(&self, date: NaiveDate, slot: MealSlot) -> NutrientMap {
        self.entries_for(date, slot)
            .iter()
            .map(|entry| &entry.nutrients)
            .sum()
    }

    /// Per-label sum over all three slots of a day
    pub fn day_totals(&self, date: NaiveDate) -> NutrientMap {
        self.days
            .get(&date)
            .map(DayMeals::totals)
            .unwrap_or_else(NutrientMap::zeroed)
    }

    pub fn day(&self, date: NaiveDate) -> Option<&DayMeals> {
        self.days.get(&date)
    }

    /// Logged days, oldest first
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.days.keys().copied()
    }

    pub fn entry_count(&self, date: NaiveDate) -> usize {
        self.days.get(&date).map(DayMeals::entry_count).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}
