//! Customer API flows: creation, validation, bulk partial success,
//! filtering, ordering, cascade deletion.

use axum::http::StatusCode;
use serde_json::json;

use clementine_integration_tests::{
    app, create_customer, create_order, create_product, get, post, send, strings,
};

#[tokio::test]
async fn health_endpoint_responds() {
    let app = app();
    let (status, _) = get(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn create_and_fetch_customer() {
    let app = app();
    let alice = create_customer(&app, "Alice", "alice@example.com", Some("+1234567890")).await;

    let id = alice["id"].as_str().expect("id");
    let (status, body) = get(&app, &format!("/customers/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Alice");
    assert_eq!(body["phone"], "+1234567890");
}

#[tokio::test]
async fn duplicate_email_conflicts() {
    let app = app();
    create_customer(&app, "Alice", "alice@example.com", None).await;

    let (status, body) = post(
        &app,
        "/customers",
        &json!({ "name": "Alice Again", "email": "alice@example.com" }),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["field"], "email");
    assert_eq!(body["error"]["message"], "Email already exists");
}

#[tokio::test]
async fn invalid_phone_is_a_field_error() {
    let app = app();
    let (status, body) = post(
        &app,
        "/customers",
        &json!({ "name": "Bob", "email": "bob@example.com", "phone": "12345" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["field"], "phone");
}

#[tokio::test]
async fn bulk_create_reports_partial_failures_by_index() {
    let app = app();
    let (status, body) = post(
        &app,
        "/customers/bulk",
        &json!([
            { "name": "Alice", "email": "alice@example.com" },
            { "name": "Dup", "email": "alice@example.com" },
            { "name": "Carol", "email": "carol@example.com", "phone": "bad" },
        ]),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["customers"].as_array().expect("array").len(), 1);

    let errors = body["errors"].as_array().expect("errors");
    assert_eq!(errors.len(), 2);
    assert_eq!(errors[0]["field"], "customer_1_email");
    assert_eq!(errors[1]["field"], "customer_2_phone");

    // The valid row landed despite its neighbors failing.
    let (_, listed) = get(&app, "/customers").await;
    assert_eq!(strings(&listed, "name"), vec!["Alice"]);
}

#[tokio::test]
async fn end_to_end_phone_pattern_filter() {
    let app = app();
    create_customer(&app, "Alice", "alice@example.com", Some("+1234567890")).await;
    create_customer(&app, "Bob", "bob@example.com", Some("123-456-7890")).await;

    let (status, body) = get(&app, "/customers?phone_pattern=%2B1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(strings(&body, "name"), vec!["Alice"]);
}

#[tokio::test]
async fn listing_supports_filters_and_ordering() {
    let app = app();
    create_customer(&app, "John Doe", "john.doe@gmail.com", None).await;
    create_customer(&app, "Jane Smith", "jane.smith@yahoo.com", None).await;
    create_customer(&app, "Bob Johnson", "bob.johnson@gmail.com", None).await;

    let (_, body) = get(&app, "/customers?email_domain=gmail.com&ordering=-name").await;
    assert_eq!(strings(&body, "name"), vec!["John Doe", "Bob Johnson"]);

    // Unrecognized criteria keys ride along without failing the query.
    let (_, body) = get(&app, "/customers?page=3&page_size=10").await;
    assert_eq!(body.as_array().expect("array").len(), 3);
}

#[tokio::test]
async fn deleting_a_customer_cascades_to_orders() {
    let app = app();
    let alice = create_customer(&app, "Alice", "alice@example.com", None).await;
    let bob = create_customer(&app, "Bob", "bob@example.com", None).await;
    let hub = create_product(&app, "USB-C Hub", "49.99", 80).await;

    create_order(&app, &alice, &[&hub]).await;
    create_order(&app, &alice, &[&hub]).await;
    create_order(&app, &bob, &[&hub]).await;

    let id = alice["id"].as_str().expect("id");
    let (status, body) = send(&app, "DELETE", &format!("/customers/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["deleted_orders"], 2);

    let (_, orders) = get(&app, "/orders").await;
    assert_eq!(orders.as_array().expect("array").len(), 1);

    let (status, _) = get(&app, &format!("/customers/{id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn unknown_customer_is_not_found() {
    let app = app();
    let (status, _) = get(
        &app,
        "/customers/00000000-0000-4000-8000-000000000000",
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
