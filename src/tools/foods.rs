//! Food search MCP tools
//!
//! Category browsing, search-as-you-type, favorites, and single-food detail.

use serde::Serialize;

use crate::catalog::{self, order_by_favorites, FavoriteSet, FoodSearchCache};
use crate::models::{FoodItem, NutrientLabel, NutrientMap};
use crate::nutrition::{scale, share_of_daily, RecommendedIntake};
use crate::session::SessionState;

/// Category entry for list_categories
#[derive(Debug, Serialize)]
pub struct CategorySummary {
    pub code: &'static str,
    pub name: &'static str,
    pub cached: bool,
}

/// Response for list_categories
#[derive(Debug, Serialize)]
pub struct ListCategoriesResponse {
    pub categories: Vec<CategorySummary>,
}

/// Summary of a food item for search results
#[derive(Debug, Serialize)]
pub struct FoodItemSummary {
    pub name: String,
    pub calories_per_100g: f64,
    pub favorite: bool,
}

/// Response for search_foods
#[derive(Debug, Serialize)]
pub struct SearchFoodsResponse {
    pub category: String,
    pub category_name: &'static str,
    pub query: String,
    pub items: Vec<FoodItemSummary>,
    pub total: usize,
}

/// One nutrient of a food's per-100g detail
#[derive(Debug, Serialize)]
pub struct DailyValueRow {
    pub label: NutrientLabel,
    pub amount: f64,
    pub unit: &'static str,
    /// Share of the daily target, not capped
    pub daily_value_percent: f64,
}

/// Response for get_food_detail
#[derive(Debug, Serialize)]
pub struct FoodDetailResponse {
    pub name: String,
    pub category: String,
    pub per_100g: Vec<DailyValueRow>,
}

/// Response for preview_nutrients
#[derive(Debug, Serialize)]
pub struct PreviewNutrientsResponse {
    pub food_name: String,
    pub grams: f64,
    pub nutrients: NutrientMap,
}

/// Response for toggle_favorite
#[derive(Debug, Serialize)]
pub struct ToggleFavoriteResponse {
    pub name: String,
    pub favorite: bool,
}

/// Response for list_favorites
#[derive(Debug, Serialize)]
pub struct ListFavoritesResponse {
    pub favorites: Vec<String>,
    pub count: usize,
}

/// List all catalog categories and whether each is cached
pub fn list_categories(cache: &FoodSearchCache) -> ListCategoriesResponse {
    ListCategoriesResponse {
        categories: catalog::CATEGORIES
            .iter()
            .map(|c| CategorySummary {
                code: c.code,
                name: c.name,
                cached: cache.is_cached(c.code),
            })
            .collect(),
    }
}

/// Search a category, fetching it on first use
pub async fn search_foods(
    cache: &FoodSearchCache,
    favorites: &FavoriteSet,
    category: &str,
    query: &str,
    favorites_first: bool,
) -> Result<SearchFoodsResponse, String> {
    let category_name = catalog::category_name(category)
        .ok_or_else(|| format!("Unknown food category: {}", category))?;

    cache
        .get_or_fetch(category)
        .await
        .map_err(|e| format!("Failed to load category {}: {}", category, e))?;

    let mut items = cache.filter(query, category);
    if favorites_first {
        items = order_by_favorites(&items, favorites);
    }

    let items: Vec<FoodItemSummary> = items
        .iter()
        .map(|item| FoodItemSummary {
            name: item.name.clone(),
            calories_per_100g: item.nutrition.calories,
            favorite: favorites.contains(&item.name),
        })
        .collect();

    Ok(SearchFoodsResponse {
        category: category.trim().to_string(),
        category_name,
        query: query.to_string(),
        total: items.len(),
        items,
    })
}

/// Find a food by exact name within a category
pub async fn find_food(
    cache: &FoodSearchCache,
    category: &str,
    food_name: &str,
) -> Result<FoodItem, String> {
    let items = cache
        .get_or_fetch(category)
        .await
        .map_err(|e| format!("Failed to load category {}: {}", category, e))?;

    let food_name = food_name.trim();
    items
        .iter()
        .find(|item| item.name == food_name)
        .cloned()
        .ok_or_else(|| format!("Food '{}' not found in category {}", food_name, category))
}

/// Per-100g values of a food with their share of the daily targets
pub async fn get_food_detail(
    cache: &FoodSearchCache,
    intake: &RecommendedIntake,
    category: &str,
    food_name: &str,
) -> Result<FoodDetailResponse, String> {
    let item = find_food(cache, category, food_name).await?;

    let per_100g = NutrientLabel::ALL
        .into_iter()
        .map(|label| {
            let amount = item.nutrition.get(label);
            DailyValueRow {
                label,
                amount,
                unit: label.unit(),
                daily_value_percent: share_of_daily(amount, intake.target(label)),
            }
        })
        .collect();

    Ok(FoodDetailResponse {
        name: item.name,
        category: category.trim().to_string(),
        per_100g,
    })
}

/// Nutrients of a portion, without recording anything
pub async fn preview_nutrients(
    cache: &FoodSearchCache,
    category: &str,
    food_name: &str,
    grams: f64,
) -> Result<PreviewNutrientsResponse, String> {
    let item = find_food(cache, category, food_name).await?;
    let nutrients = scale(&item, grams).ok_or_else(|| "grams must be greater than 0".to_string())?;

    Ok(PreviewNutrientsResponse {
        food_name: item.name,
        grams,
        nutrients,
    })
}

/// Flip a food's favorite flag
pub fn toggle_favorite(state: &mut SessionState, name: &str) -> Result<ToggleFavoriteResponse, String> {
    let name = name.trim();
    if name.is_empty() {
        return Err("Food name cannot be empty".to_string());
    }

    let favorite = state.favorites.toggle(name);
    Ok(ToggleFavoriteResponse {
        name: name.to_string(),
        favorite,
    })
}

pub fn list_favorites(state: &SessionState) -> ListFavoritesResponse {
    let favorites: Vec<String> = state.favorites.iter().map(str::to_string).collect();
    ListFavoritesResponse {
        count: favorites.len(),
        favorites,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CatalogFetcher, CatalogResult};
    use crate::models::Nutrition;
    use async_trait::async_trait;
    use std::sync::Arc;

    struct StaticFetcher;

    #[async_trait]
    impl CatalogFetcher for StaticFetcher {
        async fn fetch_category(&self, _code: &str) -> CatalogResult<Vec<FoodItem>> {
            Ok(vec![
                FoodItem::new(
                    "쌀밥",
                    Nutrition {
                        calories: 143.0,
                        sodium: 2300.0,
                        ..Nutrition::zero()
                    },
                ),
                FoodItem::new("김밥", Nutrition { calories: 180.0, ..Nutrition::zero() }),
                FoodItem::new("볶음밥", Nutrition { calories: 190.0, ..Nutrition::zero() }),
            ])
        }
    }

    fn cache() -> FoodSearchCache {
        FoodSearchCache::new(Arc::new(StaticFetcher))
    }

    #[tokio::test]
    async fn test_search_orders_favorites_first() {
        let cache = cache();
        let mut favorites = FavoriteSet::new();
        favorites.insert("볶음밥");

        let result = search_foods(&cache, &favorites, "01", "", true).await.unwrap();
        let names: Vec<_> = result.items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["볶음밥", "쌀밥", "김밥"]);
        assert!(result.items[0].favorite);
        assert_eq!(result.category_name, "밥류");

        let plain = search_foods(&cache, &favorites, "01", "", false).await.unwrap();
        assert_eq!(plain.items[0].name, "쌀밥");
    }

    #[tokio::test]
    async fn test_search_filters_query() {
        let result = search_foods(&cache(), &FavoriteSet::new(), "01", "김", true)
            .await
            .unwrap();
        assert_eq!(result.total, 1);
        assert_eq!(result.items[0].name, "김밥");
    }

    #[tokio::test]
    async fn test_search_unknown_category() {
        let err = search_foods(&cache(), &FavoriteSet::new(), "21", "", true)
            .await
            .unwrap_err();
        assert!(err.contains("Unknown food category"));
    }

    #[tokio::test]
    async fn test_food_detail_daily_share() {
        let detail = get_food_detail(&cache(), &RecommendedIntake::standard(), "01", "쌀밥")
            .await
            .unwrap();
        let sodium = detail
            .per_100g
            .iter()
            .find(|r| r.label == NutrientLabel::Sodium)
            .unwrap();
        assert_eq!(sodium.daily_value_percent, 100.0);
        assert_eq!(detail.per_100g.len(), 7);
    }

    #[tokio::test]
    async fn test_preview_requires_weight() {
        let cache = cache();
        let preview = preview_nutrients(&cache, "01", "쌀밥", 150.0).await.unwrap();
        assert!((preview.nutrients.get(NutrientLabel::Calories) - 214.5).abs() < 1e-9);
        assert!(preview_nutrients(&cache, "01", "쌀밥", 0.0).await.is_err());
        assert!(preview_nutrients(&cache, "01", "라면", 100.0).await.is_err());
    }

    #[test]
    fn test_toggle_and_list_favorites() {
        let mut state = SessionState::new();
        assert!(toggle_favorite(&mut state, "김밥").unwrap().favorite);
        assert_eq!(list_favorites(&state).favorites, vec!["김밥".to_string()]);
        assert!(!toggle_favorite(&mut state, "김밥").unwrap().favorite);
        assert!(toggle_favorite(&mut state, " ").is_err());
    }
}
