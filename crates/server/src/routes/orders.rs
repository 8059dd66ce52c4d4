//! Order route handlers.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use uuid::Uuid;

use clementine_core::{CreateOrderInput, Order, OrderId};
use clementine_engine::OrderQuery;

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Create the order routes router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(index).post(create))
        .route("/{id}", get(show))
}

/// List orders matching the query-string criteria.
async fn index(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Json<Vec<Order>> {
    let (criteria, ordering) = super::criteria_from_query(pairs);
    let mut query = OrderQuery::new(criteria);
    if let Some(key) = ordering {
        query = query.order_by(key);
    }

    let data = state.store().snapshot();
    let rows: Vec<Order> = query.execute(&data).into_iter().cloned().collect();
    Json(rows)
}

/// Create an order. The total amount is always recomputed server-side from
/// the resolved product prices.
async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateOrderInput>,
) -> Result<impl IntoResponse> {
    let order = state.store().orders().create(&input)?;
    Ok((StatusCode::CREATED, Json(order)))
}

/// Fetch a single order.
async fn show(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<Json<Order>> {
    state
        .store()
        .orders()
        .get(OrderId::from_uuid(id))
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("order {id}")))
}
