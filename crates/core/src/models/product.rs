//! Product domain types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::ProductId;

/// A product (domain type).
///
/// Referenced by zero or more orders through a shared many-to-many
/// association; neither side owns the other.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// Unique product ID.
    pub id: ProductId,
    /// Product name.
    pub name: String,
    /// Unit price. Always positive.
    pub price: Decimal,
    /// Units in stock.
    pub stock: u32,
    /// When the product was created.
    pub created_at: DateTime<Utc>,
    /// When the product was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new product.
///
/// `stock` is signed so that a negative quantity surfaces as a field-level
/// validation error instead of a deserialization failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProductInput {
    /// Product name.
    pub name: String,
    /// Unit price; must be positive.
    pub price: Decimal,
    /// Units in stock; defaults to 0.
    pub stock: Option<i64>,
}
