//! In-process test harness for the CRM HTTP API.
//!
//! Drives the real axum router through `tower::ServiceExt::oneshot`, so the
//! full request path (extractors, engine, store, serialization) runs without
//! a network listener.

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::missing_panics_doc)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use clementine_server::{AppState, ServerConfig};

/// A fresh application over an empty store.
#[must_use]
pub fn app() -> Router {
    clementine_server::app(AppState::new(ServerConfig::default()))
}

/// Send one request, returning status and parsed JSON body (or `Null` for
/// empty / non-JSON bodies).
pub async fn send(app: &Router, method: &str, uri: &str, body: Option<&Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .expect("request"),
        None => builder.body(Body::empty()).expect("request"),
    };

    let response = app.clone().oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

/// GET shorthand.
pub async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, "GET", uri, None).await
}

/// POST shorthand.
pub async fn post(app: &Router, uri: &str, body: &Value) -> (StatusCode, Value) {
    send(app, "POST", uri, Some(body)).await
}

/// Create a customer, asserting success, and return its JSON record.
pub async fn create_customer(app: &Router, name: &str, email: &str, phone: Option<&str>) -> Value {
    let (status, body) = post(
        app,
        "/customers",
        &serde_json::json!({ "name": name, "email": email, "phone": phone }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "create customer {name}: {body}");
    body["customer"].clone()
}

/// Create a product, asserting success, and return its JSON record.
pub async fn create_product(app: &Router, name: &str, price: &str, stock: i64) -> Value {
    let (status, body) = post(
        app,
        "/products",
        &serde_json::json!({ "name": name, "price": price, "stock": stock }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "create product {name}: {body}");
    body
}

/// Create an order, asserting success, and return its JSON record.
pub async fn create_order(app: &Router, customer: &Value, products: &[&Value]) -> Value {
    let product_ids: Vec<&str> = products
        .iter()
        .map(|p| p["id"].as_str().expect("product id"))
        .collect();
    let (status, body) = post(
        app,
        "/orders",
        &serde_json::json!({
            "customer_id": customer["id"],
            "product_ids": product_ids,
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "create order: {body}");
    body
}

/// Names (or another string field) from a JSON array response, in order.
#[must_use]
pub fn strings(rows: &Value, field: &str) -> Vec<String> {
    rows.as_array()
        .expect("array body")
        .iter()
        .map(|row| row[field].as_str().expect("string field").to_owned())
        .collect()
}
