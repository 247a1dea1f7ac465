//! Public nutrition catalog client
//!
//! Fetches one category page from the data.go.kr food nutrition API and
//! decodes its JSON envelope into `FoodItem`s.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::models::{FoodItem, Nutrition};

/// Default catalog endpoint
pub const DEFAULT_BASE_URL: &str =
    "http://api.data.go.kr/openapi/tn_pubr_public_nutri_food_info_api";

/// Paging is fixed: first page, 100 rows
pub const PAGE_NO: u32 = 1;
pub const NUM_OF_ROWS: u32 = 100;

/// Catalog error types
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Catalog responded with status {0}")]
    Status(u16),

    #[error("Failed to decode catalog response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Unknown food category: {0}")]
    UnknownCategory(String),
}

/// Result type for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Source of catalog items for one category
#[async_trait]
pub trait CatalogFetcher: Send + Sync {
    async fn fetch_category(&self, code: &str) -> CatalogResult<Vec<FoodItem>>;
}

/// reqwest-backed fetcher for the public nutrition API
#[derive(Debug, Clone)]
pub struct PublicNutritionClient {
    client: Client,
    base_url: String,
    service_key: String,
}

impl PublicNutritionClient {
    /// Create a client. The service key is sent verbatim, so pass the
    /// URL-encoded form data.go.kr issues.
    pub fn new(
        base_url: impl Into<String>,
        service_key: impl Into<String>,
        timeout: Duration,
    ) -> CatalogResult<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
            service_key: service_key.into(),
        })
    }

    fn category_url(&self, code: &str) -> String {
        format!(
            "{}?serviceKey={}&foodLv3Cd={}&pageNo={}&numOfRows={}&type=json",
            self.base_url.trim_end_matches('?'),
            self.service_key,
            code,
            PAGE_NO,
            NUM_OF_ROWS
        )
    }
}

#[async_trait]
impl CatalogFetcher for PublicNutritionClient {
    async fn fetch_category(&self, code: &str) -> CatalogResult<Vec<FoodItem>> {
        tracing::info!(category = code, "Fetching food catalog");

        let response = self.client.get(self.category_url(code)).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        decode_catalog_response(&body)
    }
}

// ============================================================================
// Wire format
// ============================================================================

#[derive(Debug, Deserialize)]
struct NutritionEnvelope {
    response: ResponseBody,
}

#[derive(Debug, Deserialize)]
struct ResponseBody {
    body: ResponseBodyContent,
}

#[derive(Debug, Deserialize)]
struct ResponseBodyContent {
    #[serde(default)]
    items: Vec<NutritionItem>,
}

#[derive(Debug, Deserialize)]
struct NutritionItem {
    #[serde(rename = "foodNm")]
    food_name: String,
    #[serde(default)]
    enerc: Option<Value>,
    #[serde(default)]
    chocdf: Option<Value>,
    #[serde(default)]
    prot: Option<Value>,
    #[serde(default)]
    fatce: Option<Value>,
    #[serde(default)]
    fasat: Option<Value>,
    #[serde(default)]
    nat: Option<Value>,
    #[serde(default)]
    sugar: Option<Value>,
}

impl From<NutritionItem> for FoodItem {
    fn from(item: NutritionItem) -> Self {
        FoodItem::new(
            item.food_name,
            Nutrition {
                calories: parse_amount(item.enerc.as_ref()),
                carbs: parse_amount(item.chocdf.as_ref()),
                protein: parse_amount(item.prot.as_ref()),
                fat: parse_amount(item.fatce.as_ref()),
                saturated_fat: parse_amount(item.fasat.as_ref()),
                sodium: parse_amount(item.nat.as_ref()),
                sugar: parse_amount(item.sugar.as_ref()),
            },
        )
    }
}

/// Decode a catalog response body into food items
pub fn decode_catalog_response(body: &str) -> CatalogResult<Vec<FoodItem>> {
    let envelope: NutritionEnvelope = serde_json::from_str(body)?;
    Ok(envelope
        .response
        .body
        .items
        .into_iter()
        .map(FoodItem::from)
        .collect())
}

/// Nutrient amounts arrive as decimal strings; anything unusable is 0
fn parse_amount(value: Option<&Value>) -> f64 {
    let parsed = match value {
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        Some(Value::Number(n)) => n.as_f64(),
        _ => None,
    };

    match parsed {
        Some(v) if v.is_finite() && v >= 0.0 => v,
        _ => 0.0,
    }
}
