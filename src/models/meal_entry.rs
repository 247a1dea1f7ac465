//! Meal Entry model
//!
//! One recorded consumption event inside a meal slot.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::NutrientMap;

/// Meal slot of a day
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MealSlot {
    #[serde(rename = "아침", alias = "breakfast")]
    Breakfast,
    #[serde(rename = "점심", alias = "lunch")]
    Lunch,
    #[serde(rename = "저녁", alias = "dinner")]
    Dinner,
}

impl MealSlot {
    pub const ALL: [MealSlot; 3] = [MealSlot::Breakfast, MealSlot::Lunch, MealSlot::Dinner];

    pub fn as_str(&self) -> &'static str {
        match self {
            MealSlot::Breakfast => "아침",
            MealSlot::Lunch => "점심",
            MealSlot::Dinner => "저녁",
        }
    }

    /// Parse a Korean or English slot name
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "아침" | "breakfast" => Some(MealSlot::Breakfast),
            "점심" | "lunch" => Some(MealSlot::Lunch),
            "저녁" | "dinner" => Some(MealSlot::Dinner),
            _ => None,
        }
    }

    /// Default slot for a local hour of day: 6-10 breakfast, 11-16 lunch, else dinner
    pub fn for_hour(hour: u32) -> Self {
        match hour {
            6..=10 => MealSlot::Breakfast,
            11..=16 => MealSlot::Lunch,
            _ => MealSlot::Dinner,
        }
    }
}

impl fmt::Display for MealSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A meal entry representing consumed food
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealEntry {
    pub food_name: String,
    /// Portion the nutrients were scaled to
    pub grams: f64,
    pub nutrients: NutrientMap,
}

impl MealEntry {
    pub fn new(food_name: impl Into<String>, grams: f64, nutrients: NutrientMap) -> Self {
        Self {
            food_name: food_name.into(),
            grams,
            nutrients,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_from_str() {
        assert_eq!(MealSlot::from_str("점심"), Some(MealSlot::Lunch));
        assert_eq!(MealSlot::from_str(" Dinner "), Some(MealSlot::Dinner));
        assert_eq!(MealSlot::from_str("snack"), None);
    }

    #[test]
    fn test_slot_for_hour_boundaries() {
        assert_eq!(MealSlot::for_hour(5), MealSlot::Dinner);
        assert_eq!(MealSlot::for_hour(6), MealSlot::Breakfast);
        assert_eq!(MealSlot::for_hour(10), MealSlot::Breakfast);
        assert_eq!(MealSlot::for_hour(11), MealSlot::Lunch);
        assert_eq!(MealSlot::for_hour(16), MealSlot::Lunch);
        assert_eq!(MealSlot::for_hour(17), MealSlot::Dinner);
        assert_eq!(MealSlot::for_hour(23), MealSlot::Dinner);
    }

    #[test]
    fn test_slot_serializes_korean() {
        assert_eq!(serde_json::to_string(&MealSlot::Breakfast).unwrap(), r#""아침""#);
        let slot: MealSlot = serde_json::from_str(r#""lunch""#).unwrap();
        assert_eq!(slot, MealSlot::Lunch);
    }
}
