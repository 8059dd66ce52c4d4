//! Reporting route handlers.

use axum::{Json, Router, extract::State, routing::get};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::state::AppState;

/// Create the reporting routes router.
pub fn routes() -> Router<AppState> {
    Router::new().route("/report", get(report))
}

#[derive(Debug, Serialize)]
struct ReportResponse {
    total_customers: usize,
    total_orders: usize,
    total_revenue: Decimal,
}

/// Store-wide totals: customer count, order count, and revenue (the sum of
/// all order totals).
async fn report(State(state): State<AppState>) -> Json<ReportResponse> {
    let data = state.store().snapshot();
    let total_revenue = data.orders().iter().map(|o| o.total_amount).sum();
    Json(ReportResponse {
        total_customers: data.customers().len(),
        total_orders: data.orders().len(),
        total_revenue,
    })
}
