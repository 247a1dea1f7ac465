//! Shared nutrition data structures
//!
//! `Nutrition` holds the seven fixed per-100g reference values of a food.
//! `NutrientMap` is the label-keyed form used once a food has been scaled to
//! an actual portion, and for every total derived from those portions.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the seven canonical nutrient labels.
///
/// Serialized with the Korean display label; English names are accepted on input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum NutrientLabel {
    #[serde(rename = "칼로리", alias = "calories")]
    Calories,
    #[serde(rename = "탄수화물", alias = "carbs", alias = "carbohydrates")]
    Carbohydrates,
    #[serde(rename = "단백질", alias = "protein")]
    Protein,
    #[serde(rename = "지방", alias = "fat")]
    Fat,
    #[serde(rename = "포화지방", alias = "saturated_fat")]
    SaturatedFat,
    #[serde(rename = "나트륨", alias = "sodium")]
    Sodium,
    #[serde(rename = "당", alias = "sugar")]
    Sugar,
}

impl NutrientLabel {
    /// All labels in display order
    pub const ALL: [NutrientLabel; 7] = [
        NutrientLabel::Calories,
        NutrientLabel::Carbohydrates,
        NutrientLabel::Protein,
        NutrientLabel::Fat,
        NutrientLabel::SaturatedFat,
        NutrientLabel::Sodium,
        NutrientLabel::Sugar,
    ];

    /// Korean display label
    pub fn as_str(&self) -> &'static str {
        match self {
            NutrientLabel::Calories => "칼로리",
            NutrientLabel::Carbohydrates => "탄수화물",
            NutrientLabel::Protein => "단백질",
            NutrientLabel::Fat => "지방",
            NutrientLabel::SaturatedFat => "포화지방",
            NutrientLabel::Sodium => "나트륨",
            NutrientLabel::Sugar => "당",
        }
    }

    /// Measurement unit of the quantity
    pub fn unit(&self) -> &'static str {
        match self {
            NutrientLabel::Calories => "kcal",
            NutrientLabel::Sodium => "mg",
            _ => "g",
        }
    }
}

impl fmt::Display for NutrientLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-100g reference nutrition of a food
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Nutrition {
    pub calories: f64,      // kcal
    pub carbs: f64,         // grams
    pub protein: f64,       // grams
    pub fat: f64,           // grams
    pub saturated_fat: f64, // grams
    pub sodium: f64,        // milligrams
    pub sugar: f64,         // grams
}

impl Nutrition {
    pub fn zero() -> Self {
        Self::default()
    }

    /// Value for a single label
    pub fn get(&self, label: NutrientLabel) -> f64 {
        match label {
            NutrientLabel::Calories => self.calories,
            NutrientLabel::Carbohydrates => self.carbs,
            NutrientLabel::Protein => self.protein,
            NutrientLabel::Fat => self.fat,
            NutrientLabel::SaturatedFat => self.saturated_fat,
            NutrientLabel::Sodium => self.sodium,
            NutrientLabel::Sugar => self.sugar,
        }
    }
}

/// Nutrient quantities keyed by label.
///
/// Labels that were never set read as zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NutrientMap(BTreeMap<NutrientLabel, f64>);

impl NutrientMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map with every canonical label present at zero
    pub fn zeroed() -> Self {
        NutrientLabel::ALL.into_iter().map(|label| (label, 0.0)).collect()
    }

    pub fn get(&self, label: NutrientLabel) -> f64 {
        self.0.get(&label).copied().unwrap_or(0.0)
    }

    pub fn contains(&self, label: NutrientLabel) -> bool {
        self.0.contains_key(&label)
    }

    pub fn set(&mut self, label: NutrientLabel, value: f64) {
        self.0.insert(label, value);
    }

    /// Builder-style `set`
    pub fn with(mut self, label: NutrientLabel, value: f64) -> Self {
        self.set(label, value);
        self
    }

    /// Add every label of `other` into this map
    pub fn accumulate(&mut self, other: &NutrientMap) {
        for (label, value) in other.iter() {
            *self.0.entry(label).or_insert(0.0) += value;
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (NutrientLabel, f64)> + '_ {
        self.0.iter().map(|(label, value)| (*label, *value))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Project onto the seven fixed fields; missing labels become 0
    pub fn to_nutrition(&self) -> Nutrition {
        Nutrition {
            calories: self.get(NutrientLabel::Calories),
            carbs: self.get(NutrientLabel::Carbohydrates),
            protein: self.get(NutrientLabel::Protein),
            fat: self.get(NutrientLabel::Fat),
            saturated_fat: self.get(NutrientLabel::SaturatedFat),
            sodium: self.get(NutrientLabel::Sodium),
            sugar: self.get(NutrientLabel::Sugar),
        }
    }
}

impl FromIterator<(NutrientLabel, f64)> for NutrientMap {
    fn from_iter<I: IntoIterator<Item = (NutrientLabel, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> std::iter::Sum<&'a NutrientMap> for NutrientMap {
    /// Folds from a zeroed map, so every canonical label is present in the result
    fn sum<I: Iterator<Item = &'a NutrientMap>>(iter: I) -> Self {
        iter.fold(NutrientMap::zeroed(), |mut acc, n| {
            acc.accumulate(n);
            acc
        })
    }
}
