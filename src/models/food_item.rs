//! Food Item model
//!
//! A catalog food with its nutritional information per 100 g.

use serde::{Deserialize, Serialize};

use super::{NutrientMap, Nutrition};

/// Reference amount the catalog values are expressed against
pub const REFERENCE_GRAMS: f64 = 100.0;

/// A food item with nutritional information per 100 g.
///
/// Names are unique within one category's results, not across the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodItem {
    pub name: String,
    pub nutrition: Nutrition,
}

impl FoodItem {
    pub fn new(name: impl Into<String>, nutrition: Nutrition) -> Self {
        Self {
            name: name.into(),
            nutrition,
        }
    }

    /// Build an item from a label-keyed mapping; absent labels become 0
    pub fn from_nutrients(name: impl Into<String>, nutrients: &NutrientMap) -> Self {
        Self::new(name, nutrients.to_nutrition())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NutrientLabel;

    #[test]
    fn test_from_nutrients_defaults_missing_to_zero() {
        let item = FoodItem::from_nutrients(
            "김치",
            &NutrientMap::new().with(NutrientLabel::Calories, 20.0),
        );
        assert_eq!(item.name, "김치");
        assert_eq!(item.nutrition.calories, 20.0);
        assert_eq!(item.nutrition.sodium, 0.0);
        assert_eq!(item.nutrition.sugar, 0.0);
    }
}
