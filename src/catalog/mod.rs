//! Food catalog module
//!
//! Category table, the public nutrition API client, and the search cache.

pub mod cache;
pub mod categories;
pub mod client;
pub mod favorites;

pub use cache::FoodSearchCache;
pub use categories::{category_name, FoodCategory, CATEGORIES, DEFAULT_CATEGORY};
pub use client::{
    decode_catalog_response, CatalogError, CatalogFetcher, CatalogResult, PublicNutritionClient,
};
pub use favorites::{order_by_favorites, FavoriteSet};
