// tests/api_http.rs
//
// HTTP-level tests for the public API Router without opening sockets.
// We exercise the router directly via tower::ServiceExt::oneshot.
//
// Covered:
// - GET /health
// - GET /api/market
// - GET /api/phones (filter pipeline + bounds)
// - GET /api/brands
// - GET /api/bot

use std::sync::Arc;

use serde_json::Value as Json;
use shuttle_axum::axum::{
    body::{self, Body},
    http::{Request, StatusCode},
    Router,
};
use tower::ServiceExt as _; // for `oneshot`

use mobile_price_watcher::api::{create_router, AppState};
use mobile_price_watcher::bot::BotOptions;
use mobile_price_watcher::data;
use mobile_price_watcher::notify::TelegramNotifier;

const BODY_LIMIT: usize = 1 * 1024 * 1024; // 1MB, safe for tests

/// Build the same Router the binary uses, minus the metrics recorder.
fn test_router() -> Router {
    let state = AppState::new(
        data::phones().to_vec(),
        Arc::new(TelegramNotifier::new(None)),
        BotOptions::default(),
    );
    create_router(state)
}

async fn get_json(app: Router, uri: &str) -> Json {
    let req = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .expect("build GET request");

    let resp = app.oneshot(req).await.expect("oneshot");
    assert_eq!(resp.status(), StatusCode::OK, "GET {uri} should be 200");

    let bytes = body::to_bytes(resp.into_body(), BODY_LIMIT)
        .await
        .expect("read body")
        .to_vec();
    serde_json::from_slice(&bytes).expect("parse json")
}

#[tokio::test]
async fn api_health_returns_200_and_ok_body() {
    let app = test_router();

    let req = Request::builder()
        .method("GET")
        .uri("/health")
        .body(Body::empty())
        .expect("build GET /health");

    let resp = app.oneshot(req).await.expect("oneshot /health");
    assert_eq!(resp.status(), StatusCode::OK, "health should be 200");

    let bytes = body::to_bytes(resp.into_body(), BODY_LIMIT)
        .await
        .expect("read body")
        .to_vec();
    let body = String::from_utf8(bytes).expect("utf8");
    assert_eq!(body.trim(), "ok", "health body should be 'ok'");
}

#[tokio::test]
async fn api_market_reports_the_seed_numbers() {
    let v = get_json(test_router(), "/api/market").await;

    assert_eq!(v["totalListings"], 17);
    let avg = v["averagePrice"].as_f64().expect("averagePrice");
    assert!((avg - 31_416_666.666_666_668).abs() < 1e-3, "got {avg}");
    let median = v["medianSpread"].as_f64().expect("medianSpread");
    assert!((median - 1_200_000.0).abs() < f64::EPSILON, "got {median}");

    let best = &v["bestValue"];
    assert_eq!(best["name"], "Redmi Note 13");
    assert_eq!(best["brand"], "شیائومی");
    assert_eq!(best["price"], 9_300_000);
    assert_eq!(best["store"], "تکنولایف");

    let rising = v["risingBrands"].as_array().expect("risingBrands");
    let brands: Vec<&str> = rising
        .iter()
        .map(|b| b["brand"].as_str().expect("brand"))
        .collect();
    assert_eq!(brands, vec!["ناتینگ", "شیائومی", "سامسونگ"]);
    assert!(rising[0]["avgSpread"].is_number(), "missing 'avgSpread'");
    assert!(rising[0]["maxSpread"].is_number(), "missing 'maxSpread'");
}

#[tokio::test]
async fn api_phones_defaults_to_best_price_over_the_whole_catalog() {
    let v = get_json(test_router(), "/api/phones").await;

    assert_eq!(v["count"], 6);
    assert_eq!(v["bounds"]["min"], 9_300_000);
    assert_eq!(v["bounds"]["max"], 63_900_000);

    let ids: Vec<&str> = v["phones"]
        .as_array()
        .expect("phones")
        .iter()
        .map(|p| p["id"].as_str().expect("id"))
        .collect();
    assert_eq!(
        ids,
        vec![
            "redmi-note-13",
            "galaxy-a55",
            "nothing-phone-2",
            "xiaomi-13t-pro",
            "galaxy-s24-ultra",
            "iphone-15-pro"
        ]
    );

    // Each rankable phone carries derived metrics next to the raw listing.
    let first = &v["phones"][0];
    assert_eq!(first["metrics"]["lowestPrice"], 9_300_000);
    assert_eq!(first["metrics"]["lowestStore"], "تکنولایف");
    assert_eq!(first["metrics"]["spread"], 600_000);
}

#[tokio::test]
async fn api_phones_range_keeps_phones_with_any_listing_inside() {
    // iPhone's cheapest offer (59.8M) and two Galaxy S24 offers fall in range;
    // nothing else has a listing between 52M and 60M.
    let v = get_json(
        test_router(),
        "/api/phones?min=52000000&max=60000000",
    )
    .await;

    let ids: Vec<&str> = v["phones"]
        .as_array()
        .expect("phones")
        .iter()
        .map(|p| p["id"].as_str().expect("id"))
        .collect();
    assert_eq!(ids, vec!["galaxy-s24-ultra", "iphone-15-pro"]);
    // Bounds still describe the whole catalog, not the filtered page.
    assert_eq!(v["bounds"]["max"], 63_900_000);
}

#[tokio::test]
async fn api_phones_brand_filter_and_newest_sort() {
    // brand=سامسونگ percent-encoded
    let v = get_json(
        test_router(),
        "/api/phones?brand=%D8%B3%D8%A7%D9%85%D8%B3%D9%88%D9%86%DA%AF&sort=newest",
    )
    .await;

    let ids: Vec<&str> = v["phones"]
        .as_array()
        .expect("phones")
        .iter()
        .map(|p| p["id"].as_str().expect("id"))
        .collect();
    assert_eq!(ids, vec!["galaxy-a55", "galaxy-s24-ultra"]);

    // `all` is the picker's no-filter sentinel.
    let v = get_json(test_router(), "/api/phones?brand=all").await;
    assert_eq!(v["count"], 6);
}

#[tokio::test]
async fn api_phones_search_and_spread_sort() {
    let v = get_json(test_router(), "/api/phones?search=iphone").await;
    assert_eq!(v["count"], 1);
    assert_eq!(v["phones"][0]["id"], "iphone-15-pro");

    let v = get_json(test_router(), "/api/phones?sort=price-spread").await;
    assert_eq!(v["phones"][0]["id"], "galaxy-s24-ultra");
    assert_eq!(v["phones"][0]["metrics"]["spread"], 4_800_000);
}

#[tokio::test]
async fn api_brands_lists_catalog_order() {
    let v = get_json(test_router(), "/api/brands").await;
    let brands: Vec<&str> = v
        .as_array()
        .expect("array")
        .iter()
        .map(|b| b.as_str().expect("brand"))
        .collect();
    assert_eq!(brands, vec!["اپل", "سامسونگ", "شیائومی", "ناتینگ"]);
}

#[tokio::test]
async fn api_bot_get_reports_readiness() {
    let v = get_json(test_router(), "/api/bot").await;
    assert_eq!(v["ok"], true);
    assert_eq!(
        v["message"],
        "Telegram bot webhook ready. Send POST requests from Telegram."
    );
}
