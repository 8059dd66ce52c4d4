//! In-memory store and write path.
//!
//! The store owns the authoritative entity collections behind a single
//! `RwLock` and exposes repository views per entity. All write-path
//! invariants live here: email uniqueness, phone/price/stock validation,
//! non-empty order product sets, `total_amount` recomputation, and cascade
//! deletion of a customer's orders.
//!
//! Reads for querying go through [`Store::snapshot`], which clones the three
//! collections under one read guard so an aggregate pre-pass and the
//! subsequent filtering always see a consistent view.

pub mod customers;
pub mod orders;
pub mod products;

use clementine_core::{Customer, EmailError, Order, PhoneError, Product};
use clementine_engine::Dataset;
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use thiserror::Error;

pub use customers::{BulkCreateOutcome, CustomerRepository};
pub use orders::OrderRepository;
pub use products::ProductRepository;

/// Errors raised by the write path.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A customer with this email already exists.
    #[error("Email already exists")]
    DuplicateEmail,

    /// Email failed validation.
    #[error("{0}")]
    InvalidEmail(#[from] EmailError),

    /// Phone failed validation.
    #[error("Invalid phone format. Use +1234567890 or 123-456-7890")]
    InvalidPhone(#[from] PhoneError),

    /// Price must be strictly positive.
    #[error("Price must be positive")]
    NonPositivePrice,

    /// Stock must be zero or greater.
    #[error("Stock must be non-negative (0 or greater)")]
    NegativeStock,

    /// Referenced customer does not exist.
    #[error("Customer does not exist")]
    CustomerNotFound,

    /// An order needs at least one product.
    #[error("At least one product must be selected")]
    EmptyProductList,

    /// One or more product identifiers were invalid or unknown.
    #[error("Invalid product IDs: {0}")]
    InvalidProductIds(String),

    /// Entity lookup by id failed.
    #[error("Not found")]
    NotFound,
}

impl StoreError {
    /// The input field this error should be reported against.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::DuplicateEmail | Self::InvalidEmail(_) => "email",
            Self::InvalidPhone(_) => "phone",
            Self::NonPositivePrice => "price",
            Self::NegativeStock => "stock",
            Self::CustomerNotFound => "customer_id",
            Self::EmptyProductList | Self::InvalidProductIds(_) => "product_ids",
            Self::NotFound => "id",
        }
    }
}

#[derive(Debug, Default)]
pub(crate) struct Inner {
    pub(crate) customers: Vec<Customer>,
    pub(crate) products: Vec<Product>,
    pub(crate) orders: Vec<Order>,
}

/// The in-memory entity store.
#[derive(Debug, Default)]
pub struct Store {
    inner: RwLock<Inner>,
}

impl Store {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Repository view over customers.
    #[must_use]
    pub const fn customers(&self) -> CustomerRepository<'_> {
        CustomerRepository::new(self)
    }

    /// Repository view over products.
    #[must_use]
    pub const fn products(&self) -> ProductRepository<'_> {
        ProductRepository::new(self)
    }

    /// Repository view over orders.
    #[must_use]
    pub const fn orders(&self) -> OrderRepository<'_> {
        OrderRepository::new(self)
    }

    /// Take a point-in-time snapshot of all three collections under a single
    /// read guard.
    #[must_use]
    pub fn snapshot(&self) -> Dataset {
        let inner = self.inner.read();
        Dataset::new(
            inner.customers.clone(),
            inner.products.clone(),
            inner.orders.clone(),
        )
    }

    pub(crate) fn read(&self) -> RwLockReadGuard<'_, Inner> {
        self.inner.read()
    }

    pub(crate) fn write(&self) -> RwLockWriteGuard<'_, Inner> {
        self.inner.write()
    }
}
