//! Product repository: write path, lookups, and the restocking sweep.

use chrono::Utc;
use clementine_core::{CreateProductInput, Product, ProductId};
use rust_decimal::Decimal;

use super::{Store, StoreError};

/// Stock level below which a product is considered low on stock.
pub const LOW_STOCK_THRESHOLD: u32 = 10;

/// Units added to each low-stock product by the restocking sweep.
pub const RESTOCK_INCREMENT: u32 = 10;

/// Repository for product operations.
pub struct ProductRepository<'a> {
    store: &'a Store,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(store: &'a Store) -> Self {
        Self { store }
    }

    /// Create a product after validating price and stock.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NonPositivePrice` for a zero/negative price and
    /// `StoreError::NegativeStock` for a negative stock quantity.
    pub fn create(&self, input: &CreateProductInput) -> Result<Product, StoreError> {
        if input.price <= Decimal::ZERO {
            return Err(StoreError::NonPositivePrice);
        }
        let stock = match input.stock {
            None => 0,
            Some(n) if n < 0 => return Err(StoreError::NegativeStock),
            Some(n) => u32::try_from(n).map_err(|_| StoreError::NegativeStock)?,
        };

        let now = Utc::now();
        let product = Product {
            id: ProductId::new(),
            name: input.name.trim().to_owned(),
            price: input.price,
            stock,
            created_at: now,
            updated_at: now,
        };
        self.store.write().products.push(product.clone());
        tracing::info!(id = %product.id, "product created");
        Ok(product)
    }

    /// Look up a product by id.
    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<Product> {
        self.store
            .read()
            .products
            .iter()
            .find(|p| p.id == id)
            .cloned()
    }

    /// Restock every product whose stock sits below
    /// [`LOW_STOCK_THRESHOLD`], adding [`RESTOCK_INCREMENT`] units each.
    /// Returns the updated products.
    #[must_use]
    pub fn restock_low_stock(&self) -> Vec<Product> {
        let mut inner = self.store.write();
        let now = Utc::now();
        let mut updated = Vec::new();
        for product in &mut inner.products {
            if product.stock < LOW_STOCK_THRESHOLD {
                product.stock += RESTOCK_INCREMENT;
                product.updated_at = now;
                updated.push(product.clone());
            }
        }
        tracing::info!(count = updated.len(), "low-stock products restocked");
        updated
    }
}
