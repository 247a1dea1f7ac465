//! Catalog client against a mock data.go.kr endpoint

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use fitmeal::catalog::{CatalogError, CatalogFetcher, FoodSearchCache, PublicNutritionClient};

const CATALOG_PATH: &str = "/openapi/tn_pubr_public_nutri_food_info_api";

fn client_for(server: &MockServer) -> PublicNutritionClient {
    PublicNutritionClient::new(
        format!("{}{}", server.uri(), CATALOG_PATH),
        "TEST%3D%3D",
        Duration::from_secs(5),
    )
    .unwrap()
}

#[tokio::test]
async fn test_fetch_category_decodes_items() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(CATALOG_PATH))
        .and(query_param("foodLv3Cd", "01"))
        .and(query_param("numOfRows", "100"))
        .and(query_param("type", "json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": {
                "header": {"resultCode": "00", "resultMsg": "NORMAL SERVICE"},
                "body": {
                    "items": [
                        {"foodNm": "쌀밥", "enerc": "143", "chocdf": "31.7", "prot": "2.5",
                         "fatce": "0.3", "nat": "2", "fasat": "0.08", "sugar": "0"},
                        {"foodNm": "김밥", "enerc": "180", "nat": "350"}
                    ],
                    "totalCount": "2"
                }
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let items = client_for(&server).fetch_category("01").await.unwrap();

    assert_eq!(items.len(), 2);
    assert_eq!(items[0].name, "쌀밥");
    assert_eq!(items[0].nutrition.calories, 143.0);
    assert_eq!(items[0].nutrition.carbs, 31.7);
    assert_eq!(items[1].nutrition.sodium, 350.0);
    assert_eq!(items[1].nutrition.protein, 0.0);
}

#[tokio::test]
async fn test_server_error_is_status_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(CATALOG_PATH))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = client_for(&server).fetch_category("01").await.unwrap_err();
    assert!(matches!(err, CatalogError::Status(500)));
}

#[tokio::test]
async fn test_non_json_body_is_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(CATALOG_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<OpenAPI_ServiceResponse/>"))
        .mount(&server)
        .await;

    let err = client_for(&server).fetch_category("01").await.unwrap_err();
    assert!(matches!(err, CatalogError::Decode(_)));
}

#[tokio::test]
async fn test_unreachable_endpoint_is_http_error() {
    let client =
        PublicNutritionClient::new("http://127.0.0.1:1/catalog", "KEY", Duration::from_secs(5))
            .unwrap();
    let err = client.fetch_category("01").await.unwrap_err();
    assert!(matches!(err, CatalogError::Http(_)));
}

#[tokio::test]
async fn test_failed_fetch_leaves_category_uncached() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(CATALOG_PATH))
        .respond_with(ResponseTemplate::new(500))
        .expect(2)
        .mount(&server)
        .await;

    let cache = FoodSearchCache::new(Arc::new(client_for(&server)));

    assert!(matches!(
        cache.get_or_fetch("01").await.unwrap_err(),
        CatalogError::Status(500)
    ));
    assert!(!cache.is_cached("01"));
    assert!(cache.filter("", "01").is_empty());

    // Not cached, so the next call goes to the network again
    assert!(cache.get_or_fetch("01").await.is_err());
    assert!(cache.cached_categories().is_empty());
}
