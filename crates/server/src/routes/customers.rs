//! Customer route handlers.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use serde::Serialize;
use uuid::Uuid;

use clementine_core::{CreateCustomerInput, Customer, CustomerId};
use clementine_engine::CustomerQuery;

use crate::error::{AppError, FieldError, Result};
use crate::state::AppState;

/// Create the customer routes router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(index).post(create))
        .route("/bulk", post(bulk_create))
        .route("/{id}", get(show).delete(destroy))
}

/// List customers matching the query-string criteria.
async fn index(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Json<Vec<Customer>> {
    let (criteria, ordering) = super::criteria_from_query(pairs);
    let mut query = CustomerQuery::new(criteria);
    if let Some(key) = ordering {
        query = query.order_by(key);
    }

    let data = state.store().snapshot();
    let rows: Vec<Customer> = query.execute(&data).into_iter().cloned().collect();
    Json(rows)
}

#[derive(Debug, Serialize)]
struct CreateCustomerResponse {
    message: String,
    customer: Customer,
}

/// Create a customer.
async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateCustomerInput>,
) -> Result<impl IntoResponse> {
    let customer = state.store().customers().create(&input)?;
    let message = format!("Customer '{}' created successfully!", customer.name);
    Ok((
        StatusCode::CREATED,
        Json(CreateCustomerResponse { message, customer }),
    ))
}

#[derive(Debug, Serialize)]
struct BulkCreateResponse {
    customers: Vec<Customer>,
    errors: Vec<FieldError>,
}

/// Create many customers at once. Valid entries are created even when
/// others fail; failures come back tagged with their input index.
async fn bulk_create(
    State(state): State<AppState>,
    Json(inputs): Json<Vec<CreateCustomerInput>>,
) -> Json<BulkCreateResponse> {
    let outcome = state.store().customers().bulk_create(&inputs);
    let errors = outcome
        .failures
        .into_iter()
        .map(|(index, err)| FieldError {
            field: format!("customer_{index}_{}", err.field()),
            message: err.to_string(),
        })
        .collect();
    Json(BulkCreateResponse {
        customers: outcome.created,
        errors,
    })
}

/// Fetch a single customer.
async fn show(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<Json<Customer>> {
    state
        .store()
        .customers()
        .get(CustomerId::from_uuid(id))
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("customer {id}")))
}

#[derive(Debug, Serialize)]
struct DeleteCustomerResponse {
    message: String,
    deleted_orders: usize,
}

/// Delete a customer, cascading to its orders.
async fn destroy(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<DeleteCustomerResponse>> {
    let deleted_orders = state.store().customers().delete(CustomerId::from_uuid(id))?;
    Ok(Json(DeleteCustomerResponse {
        message: "Customer deleted".to_owned(),
        deleted_orders,
    }))
}
