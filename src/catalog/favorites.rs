//! Favorite foods and favorites-first ordering

use std::collections::BTreeSet;

use crate::models::FoodItem;

/// Food names marked as favorite for this session
#[derive(Debug, Clone, Default)]
pub struct FavoriteSet {
    names: BTreeSet<String>,
}

impl FavoriteSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>) -> bool {
        self.names.insert(name.into())
    }

    /// Flip a name's favorite state and return the new state
    pub fn toggle(&mut self, name: &str) -> bool {
        if self.names.remove(name) {
            false
        } else {
            self.names.insert(name.to_string());
            true
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Favorites first, everything else after; both groups keep their order.
pub fn order_by_favorites(items: &[FoodItem], favorites: &FavoriteSet) -> Vec<FoodItem> {
    let (mut ordered, rest): (Vec<FoodItem>, Vec<FoodItem>) = items
        .iter()
        .cloned()
        .partition(|item| favorites.contains(&item.name));
    ordered.extend(rest);
    ordered
}
