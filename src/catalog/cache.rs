//! Per-category search cache
//!
//! Each category is fetched at most once and then served from memory.
//! Search-as-you-type filters the cached results without touching the network.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use super::categories;
use super::client::{CatalogError, CatalogFetcher, CatalogResult};
use crate::models::FoodItem;

/// Category-keyed cache over a `CatalogFetcher`.
///
/// The lock is never held across a fetch; two concurrent fetches of the same
/// category both store their result and the later one wins.
pub struct FoodSearchCache {
    fetcher: Arc<dyn CatalogFetcher>,
    results: RwLock<HashMap<&'static str, Arc<Vec<FoodItem>>>>,
}

impl FoodSearchCache {
    pub fn new(fetcher: Arc<dyn CatalogFetcher>) -> Self {
        Self {
            fetcher,
            results: RwLock::new(HashMap::new()),
        }
    }

    /// Cached results for a category, if it was fetched before
    pub fn cached(&self, category: &str) -> Option<Arc<Vec<FoodItem>>> {
        let code = categories::find(category)?.code;
        self.results
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(code)
            .cloned()
    }

    pub fn is_cached(&self, category: &str) -> bool {
        self.cached(category).is_some()
    }

    /// Codes of every category currently cached, sorted
    pub fn cached_categories(&self) -> Vec<&'static str> {
        let mut codes: Vec<_> = self
            .results
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .copied()
            .collect();
        codes.sort_unstable();
        codes
    }

    /// Serve a category from cache, fetching it on first use.
    ///
    /// A failed fetch leaves the category uncached so the next call retries.
    pub async fn get_or_fetch(&self, category: &str) -> CatalogResult<Arc<Vec<FoodItem>>> {
        let code = categories::find(category)
            .ok_or_else(|| CatalogError::UnknownCategory(category.trim().to_string()))?
            .code;

        if let Some(items) = self.cached(code) {
            tracing::debug!(category = code, count = items.len(), "Catalog cache hit");
            return Ok(items);
        }

        match self.fetcher.fetch_category(code).await {
            Ok(items) => {
                let items = Arc::new(items);
                tracing::info!(category = code, count = items.len(), "Cached catalog results");
                self.results
                    .write()
                    .unwrap_or_else(PoisonError::into_inner)
                    .insert(code, Arc::clone(&items));
                Ok(items)
            }
            Err(e) => {
                tracing::warn!(category = code, error = %e, "Catalog fetch failed");
                Err(e)
            }
        }
    }

    /// Cached items of `category` whose name contains `query`, ignoring case.
    ///
    /// An empty query returns everything cached; an uncached category returns
    /// nothing. Never fetches.
    pub fn filter(&self, query: &str, category: &str) -> Vec<FoodItem> {
        let Some(items) = self.cached(category) else {
            return Vec::new();
        };

        if query.is_empty() {
            return items.as_ref().clone();
        }

        let needle = query.to_lowercase();
        items
            .iter()
            .filter(|item| item.name.to_lowercase().contains(&needle))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Nutrition;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingFetcher {
        calls: AtomicUsize,
        fail: bool,
    }

    impl CountingFetcher {
        fn new(fail: bool) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                fail,
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl CatalogFetcher for CountingFetcher {
        async fn fetch_category(&self, code: &str) -> CatalogResult<Vec<FoodItem>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(CatalogError::Status(503));
            }
            let item = |name: &str| {
                FoodItem::new(
                    name,
                    Nutrition {
                        calories: 100.0,
                        ..Nutrition::zero()
                    },
                )
            };
            Ok(vec![
                item(&format!("{} Rice Bowl", code)),
                item("쌀밥"),
                item("현미밥"),
                item("Fried RICE"),
            ])
        }
    }

    #[tokio::test]
    async fn test_second_fetch_served_from_cache() {
        let fetcher = CountingFetcher::new(false);
        let cache = FoodSearchCache::new(fetcher.clone());

        let first = cache.get_or_fetch("01").await.unwrap();
        let second = cache.get_or_fetch("01").await.unwrap();

        assert_eq!(fetcher.calls(), 1);
        assert_eq!(first, second);
        assert_eq!(cache.filter("", "01"), cache.filter("", "01"));
        assert_eq!(cache.filter("", "01").len(), 4);
        assert_eq!(fetcher.calls(), 1);
    }

    #[tokio::test]
    async fn test_categories_cached_independently() {
        let fetcher = CountingFetcher::new(false);
        let cache = FoodSearchCache::new(fetcher.clone());

        cache.get_or_fetch("01").await.unwrap();
        cache.get_or_fetch("15").await.unwrap();
        cache.get_or_fetch("01").await.unwrap();

        assert_eq!(fetcher.calls(), 2);
        assert_eq!(cache.cached_categories(), vec!["01", "15"]);
        assert_eq!(cache.filter("rice bowl", "15")[0].name, "15 Rice Bowl");
    }

    #[tokio::test]
    async fn test_filter_case_insensitive_preserves_order() {
        let cache = FoodSearchCache::new(CountingFetcher::new(false));
        cache.get_or_fetch("01").await.unwrap();

        let names: Vec<_> = cache
            .filter("rice", "01")
            .into_iter()
            .map(|i| i.name)
            .collect();
        assert_eq!(names, vec!["01 Rice Bowl", "Fried RICE"]);

        let korean: Vec<_> = cache.filter("밥", "01").into_iter().map(|i| i.name).collect();
        assert_eq!(korean, vec!["쌀밥", "현미밥"]);
    }

    #[test]
    fn test_filter_uncached_category_is_empty() {
        let fetcher = CountingFetcher::new(false);
        let cache = FoodSearchCache::new(fetcher.clone());
        assert!(cache.filter("", "01").is_empty());
        assert!(cache.filter("쌀", "01").is_empty());
        assert_eq!(fetcher.calls(), 0);
    }

    #[tokio::test]
    async fn test_failed_fetch_leaves_cache_unset() {
        let fetcher = CountingFetcher::new(true);
        let cache = FoodSearchCache::new(fetcher.clone());

        let err = cache.get_or_fetch("01").await.unwrap_err();
        assert!(matches!(err, CatalogError::Status(503)));
        assert!(!cache.is_cached("01"));

        // No automatic retry, but the next selection fetches again
        assert!(cache.get_or_fetch("01").await.is_err());
        assert_eq!(fetcher.calls(), 2);
    }

    #[tokio::test]
    async fn test_unknown_category_never_fetches() {
        let fetcher = CountingFetcher::new(false);
        let cache = FoodSearchCache::new(fetcher.clone());

        let err = cache.get_or_fetch("99").await.unwrap_err();
        assert!(matches!(err, CatalogError::UnknownCategory(code) if code == "99"));
        assert_eq!(fetcher.calls(), 0);
    }
}
