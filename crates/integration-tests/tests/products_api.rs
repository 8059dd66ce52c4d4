//! Product API flows: creation validation, filtering, and the restock
//! sweep.

use axum::http::StatusCode;
use serde_json::json;

use clementine_integration_tests::{app, create_product, get, post, strings};

#[tokio::test]
async fn create_validates_price_and_stock() {
    let app = app();

    let (status, body) = post(
        &app,
        "/products",
        &json!({ "name": "Freebie", "price": "0", "stock": 1 }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["field"], "price");

    let (status, body) = post(
        &app,
        "/products",
        &json!({ "name": "Ghost", "price": "9.99", "stock": -1 }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["field"], "stock");

    // Stock defaults to zero when omitted.
    let (status, body) = post(
        &app,
        "/products",
        &json!({ "name": "Hub", "price": "49.99" }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["stock"], 0);
}

async fn seed_catalog(app: &axum::Router) {
    create_product(app, "MacBook Pro 16\"", "2499.99", 15).await;
    create_product(app, "AirPods Pro", "249.99", 100).await;
    create_product(app, "USB-C Hub", "49.99", 80).await;
    create_product(app, "Webcam HD 1080p", "79.99", 0).await;
    create_product(app, "LG Monitor", "449.99", 3).await;
}

#[tokio::test]
async fn listing_filters_through_the_engine() {
    let app = app();
    seed_catalog(&app).await;

    let (_, body) = get(&app, "/products?low_stock=10").await;
    assert_eq!(strings(&body, "name"), vec!["LG Monitor", "Webcam HD 1080p"]);

    let (_, body) = get(&app, "/products?low_stock=abc").await;
    assert_eq!(body.as_array().expect("array").len(), 0);

    let (_, body) = get(&app, "/products?price_category=luxury").await;
    assert_eq!(strings(&body, "name"), vec!["MacBook Pro 16\""]);

    let (_, body) = get(&app, "/products?in_stock=true&ordering=-price").await;
    assert_eq!(
        strings(&body, "name"),
        vec!["MacBook Pro 16\"", "LG Monitor", "AirPods Pro", "USB-C Hub"]
    );
}

#[tokio::test]
async fn restock_sweep_updates_only_low_stock_products() {
    let app = app();
    seed_catalog(&app).await;

    let (status, body) = post(&app, "/products/restock", &json!(null)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Low stock products updated successfully");

    let mut updated = strings(&body["updated_products"], "name");
    updated.sort();
    assert_eq!(updated, vec!["LG Monitor", "Webcam HD 1080p"]);

    // Nothing is low on stock afterwards.
    let (_, body) = get(&app, "/products?low_stock=10").await;
    assert_eq!(body.as_array().expect("array").len(), 0);

    // The webcam went from 0 to 10 units.
    let (_, body) = get(&app, "/products?name=webcam").await;
    assert_eq!(body[0]["stock"], 10);
}
