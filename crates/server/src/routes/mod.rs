//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health               - Liveness check (in lib.rs)
//!
//! # Customers
//! GET    /customers            - Filtered, ordered customer listing
//! POST   /customers            - Create a customer
//! POST   /customers/bulk       - Create many customers (partial success)
//! GET    /customers/{id}       - Fetch one customer
//! DELETE /customers/{id}       - Delete a customer (cascades to orders)
//!
//! # Products
//! GET    /products             - Filtered, ordered product listing
//! POST   /products             - Create a product
//! POST   /products/restock     - Restock all low-stock products
//! GET    /products/{id}        - Fetch one product
//!
//! # Orders
//! GET    /orders               - Filtered, ordered order listing
//! POST   /orders               - Create an order (total computed server-side)
//! GET    /orders/{id}          - Fetch one order
//!
//! # Reporting
//! GET    /report               - Totals: customers, orders, revenue
//! ```
//!
//! Listing endpoints accept filter criteria as query-string pairs; every
//! value arrives as text and the engine's coercion rules apply. The
//! reserved `ordering` / `order_by` parameter selects the sort key.

pub mod customers;
pub mod orders;
pub mod products;
pub mod report;

use axum::Router;
use clementine_engine::Criteria;

use crate::state::AppState;

/// Query parameters reserved for the ordering resolver rather than the
/// filter registry.
const ORDERING_KEYS: &[&str] = &["ordering", "order_by"];

/// Split raw query pairs into a criteria map and an optional sort key.
pub(crate) fn criteria_from_query(pairs: Vec<(String, String)>) -> (Criteria, Option<String>) {
    let mut ordering = None;
    let mut filters = Vec::new();
    for (key, value) in pairs {
        if ORDERING_KEYS.contains(&key.as_str()) {
            ordering = Some(value);
        } else {
            filters.push((key, value));
        }
    }
    (filters.into_iter().collect(), ordering)
}

/// Create all API routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/customers", customers::routes())
        .nest("/products", products::routes())
        .nest("/orders", orders::routes())
        .merge(report::routes())
}
