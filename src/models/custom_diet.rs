//! Custom diet composition
//!
//! A user-named, ordered list of foods with a running nutrient total.
//! The name is fixed before the first food goes in and never changes.

use serde::Serialize;
use thiserror::Error;

use super::{FoodItem, NutrientMap};

/// Custom diet error types
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DietError {
    #[error("Diet name cannot be empty")]
    EmptyName,

    #[error("Diet is already named '{0}'")]
    AlreadyNamed(String),

    #[error("Name the diet before adding foods")]
    NotNamed,
}

/// One composed food
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DietEntry {
    pub food_name: String,
    pub nutrients: NutrientMap,
}

#[derive(Debug, Clone, Default)]
enum BuilderState {
    #[default]
    Naming,
    Composing {
        name: String,
        entries: Vec<DietEntry>,
        total: NutrientMap,
    },
}

/// Two-phase builder: name first, then compose.
#[derive(Debug, Clone, Default)]
pub struct CustomDietBuilder {
    state: BuilderState,
}

impl CustomDietBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Name the diet and start composing
    pub fn begin(&mut self, name: &str) -> Result<(), DietError> {
        if let BuilderState::Composing { name: current, .. } = &self.state {
            return Err(DietError::AlreadyNamed(current.clone()));
        }

        let name = name.trim();
        if name.is_empty() {
            return Err(DietError::EmptyName);
        }

        self.state = BuilderState::Composing {
            name: name.to_string(),
            entries: Vec::new(),
            total: NutrientMap::new(),
        };
        Ok(())
    }

    /// Append a food and fold its nutrients into the running total.
    ///
    /// While still naming this is rejected and nothing changes.
    pub fn add(&mut self, food_name: impl Into<String>, nutrients: NutrientMap) -> Result<(), DietError> {
        match &mut self.state {
            BuilderState::Naming => {
                tracing::warn!("Ignoring food added to an unnamed custom diet");
                Err(DietError::NotNamed)
            }
            BuilderState::Composing { entries, total, .. } => {
                total.accumulate(&nutrients);
                entries.push(DietEntry {
                    food_name: food_name.into(),
                    nutrients,
                });
                Ok(())
            }
        }
    }

    pub fn is_composing(&self) -> bool {
        matches!(self.state, BuilderState::Composing { .. })
    }

    pub fn name(&self) -> Option<&str> {
        match &self.state {
            BuilderState::Naming => None,
            BuilderState::Composing { name, .. } => Some(name),
        }
    }

    pub fn entries(&self) -> &[DietEntry] {
        match &self.state {
            BuilderState::Naming => &[],
            BuilderState::Composing { entries, .. } => entries,
        }
    }

    /// Running total; only labels that were ever supplied are present
    pub fn total(&self) -> NutrientMap {
        match &self.state {
            BuilderState::Naming => NutrientMap::new(),
            BuilderState::Composing { total, .. } => total.clone(),
        }
    }

    /// Turn each composed food into a `FoodItem`.
    ///
    /// Only the seven canonical labels survive; absent ones become 0.
    pub fn materialize(&self) -> Vec<FoodItem> {
        self.entries()
            .iter()
            .map(|entry| FoodItem::from_nutrients(entry.food_name.clone(), &entry.nutrients))
            .collect()
    }
}

/// A materialized custom diet kept for reuse
#[derive(Debug, Clone, Serialize)]
pub struct SavedDiet {
    pub name: String,
    pub foods: Vec<FoodItem>,
}
