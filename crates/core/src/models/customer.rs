//! Customer domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{CustomerId, Email, Phone};

/// A customer (domain type).
///
/// Owns zero or more [`Order`](crate::Order)s; deleting a customer deletes
/// its orders with it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    /// Unique customer ID.
    pub id: CustomerId,
    /// Customer's display name.
    pub name: String,
    /// Email address, globally unique across the store.
    pub email: Email,
    /// Optional phone number.
    pub phone: Option<Phone>,
    /// When the customer was created.
    pub created_at: DateTime<Utc>,
    /// When the customer was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new customer.
///
/// Fields arrive unvalidated from the transport; the store's write path
/// parses `email`/`phone` and enforces email uniqueness.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCustomerInput {
    /// Customer's display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Optional phone number (`+999999999` or `999-999-9999`).
    pub phone: Option<String>,
}
