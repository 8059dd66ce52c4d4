//! Product route handlers.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use serde::Serialize;
use uuid::Uuid;

use clementine_core::{CreateProductInput, Product, ProductId};
use clementine_engine::ProductQuery;

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Create the product routes router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(index).post(create))
        .route("/restock", post(restock))
        .route("/{id}", get(show))
}

/// List products matching the query-string criteria.
async fn index(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Json<Vec<Product>> {
    let (criteria, ordering) = super::criteria_from_query(pairs);
    let mut query = ProductQuery::new(criteria);
    if let Some(key) = ordering {
        query = query.order_by(key);
    }

    let data = state.store().snapshot();
    let rows: Vec<Product> = query.execute(&data).into_iter().cloned().collect();
    Json(rows)
}

/// Create a product.
async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateProductInput>,
) -> Result<impl IntoResponse> {
    let product = state.store().products().create(&input)?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// Fetch a single product.
async fn show(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<Json<Product>> {
    state
        .store()
        .products()
        .get(ProductId::from_uuid(id))
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))
}

#[derive(Debug, Serialize)]
struct RestockResponse {
    message: String,
    updated_products: Vec<Product>,
}

/// Restock every low-stock product (the scheduled maintenance sweep,
/// exposed for external schedulers to call).
async fn restock(State(state): State<AppState>) -> Json<RestockResponse> {
    let updated_products = state.store().products().restock_low_stock();
    Json(RestockResponse {
        message: "Low stock products updated successfully".to_owned(),
        updated_products,
    })
}
