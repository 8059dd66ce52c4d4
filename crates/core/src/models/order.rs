//! Order domain types.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{CustomerId, OrderId, ProductId};

/// An order (domain type).
///
/// Belongs to exactly one customer and references one or more products.
/// `total_amount` is derived: it is recomputed from the associated product
/// prices whenever the product set changes, never set independently.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    /// Unique order ID.
    pub id: OrderId,
    /// Customer who placed the order.
    pub customer_id: CustomerId,
    /// Products on the order. Non-empty at creation; readers must still
    /// tolerate an empty set.
    pub product_ids: Vec<ProductId>,
    /// Sum of the associated product prices.
    pub total_amount: Decimal,
    /// When the order was placed.
    pub order_date: DateTime<Utc>,
    /// When the order record was created.
    pub created_at: DateTime<Utc>,
    /// When the order record was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// Number of distinct products on the order.
    #[must_use]
    pub fn distinct_product_count(&self) -> usize {
        self.product_ids.iter().collect::<HashSet<_>>().len()
    }

    /// Whether the order references the given product.
    #[must_use]
    pub fn contains_product(&self, id: ProductId) -> bool {
        self.product_ids.contains(&id)
    }
}

/// Input for creating a new order.
///
/// IDs arrive as strings so the write path can report every invalid token
/// back to the caller instead of rejecting the request shape outright.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateOrderInput {
    /// ID of the customer placing the order.
    pub customer_id: String,
    /// IDs of the products on the order; at least one required.
    pub product_ids: Vec<String>,
    /// Optional order date; defaults to the time of creation.
    pub order_date: Option<DateTime<Utc>>,
}
