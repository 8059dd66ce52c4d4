//! Order repository: write path and lookups.
//!
//! Creation validates the owning customer, resolves every product token,
//! and computes `total_amount` from the resolved product prices. Duplicate
//! product tokens collapse into the set semantics of the association.

use chrono::Utc;
use clementine_core::{CreateOrderInput, CustomerId, Order, OrderId, ProductId};
use rust_decimal::Decimal;

use super::{Store, StoreError};

/// Repository for order operations.
pub struct OrderRepository<'a> {
    store: &'a Store,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(store: &'a Store) -> Self {
        Self { store }
    }

    /// Create an order.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::CustomerNotFound` for an unknown or unparseable
    /// customer id, `StoreError::EmptyProductList` when no products were
    /// given, and `StoreError::InvalidProductIds` listing every token that
    /// failed to parse or resolve.
    pub fn create(&self, input: &CreateOrderInput) -> Result<Order, StoreError> {
        let customer_id = CustomerId::parse(input.customer_id.trim())
            .map_err(|_| StoreError::CustomerNotFound)?;

        if input.product_ids.is_empty() {
            return Err(StoreError::EmptyProductList);
        }

        let mut inner = self.store.write();
        if !inner.customers.iter().any(|c| c.id == customer_id) {
            return Err(StoreError::CustomerNotFound);
        }

        // Resolve every token, collecting the bad ones for one combined
        // error message.
        let mut product_ids: Vec<ProductId> = Vec::new();
        let mut invalid: Vec<String> = Vec::new();
        for token in &input.product_ids {
            let token = token.trim();
            match ProductId::parse(token) {
                Ok(id) if inner.products.iter().any(|p| p.id == id) => {
                    // Many-to-many set semantics: a repeated token is one
                    // association.
                    if !product_ids.contains(&id) {
                        product_ids.push(id);
                    }
                }
                _ => invalid.push(token.to_owned()),
            }
        }
        if !invalid.is_empty() {
            return Err(StoreError::InvalidProductIds(invalid.join(", ")));
        }

        let total_amount: Decimal = inner
            .products
            .iter()
            .filter(|p| product_ids.contains(&p.id))
            .map(|p| p.price)
            .sum();

        let now = Utc::now();
        let order = Order {
            id: OrderId::new(),
            customer_id,
            product_ids,
            total_amount,
            order_date: input.order_date.unwrap_or(now),
            created_at: now,
            updated_at: now,
        };
        inner.orders.push(order.clone());
        tracing::info!(id = %order.id, total = %order.total_amount, "order created");
        Ok(order)
    }

    /// Look up an order by id.
    #[must_use]
    pub fn get(&self, id: OrderId) -> Option<Order> {
        self.store.read().orders.iter().find(|o| o.id == id).cloned()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use clementine_core::{CreateCustomerInput, CreateProductInput, Customer, Product};

    use super::*;

    fn seed(store: &Store) -> (Customer, Product, Product) {
        let alice = store
            .customers()
            .create(&CreateCustomerInput {
                name: "Alice".to_owned(),
                email: "alice@example.com".to_owned(),
                phone: None,
            })
            .unwrap();
        let laptop = store
            .products()
            .create(&CreateProductInput {
                name: "Laptop".to_owned(),
                price: "999.99".parse().unwrap(),
                stock: Some(5),
            })
            .unwrap();
        let mouse = store
            .products()
            .create(&CreateProductInput {
                name: "Mouse".to_owned(),
                price: "89.99".parse().unwrap(),
                stock: Some(70),
            })
            .unwrap();
        (alice, laptop, mouse)
    }

    #[test]
    fn test_create_computes_total_from_product_prices() {
        let store = Store::new();
        let (alice, laptop, mouse) = seed(&store);

        let order = store
            .orders()
            .create(&CreateOrderInput {
                customer_id: alice.id.to_string(),
                product_ids: vec![laptop.id.to_string(), mouse.id.to_string()],
                order_date: None,
            })
            .unwrap();

        assert_eq!(order.total_amount, "1089.98".parse::<Decimal>().unwrap());
        assert_eq!(order.product_ids.len(), 2);
    }

    #[test]
    fn test_duplicate_product_tokens_collapse() {
        let store = Store::new();
        let (alice, laptop, _) = seed(&store);

        let order = store
            .orders()
            .create(&CreateOrderInput {
                customer_id: alice.id.to_string(),
                product_ids: vec![laptop.id.to_string(), laptop.id.to_string()],
                order_date: None,
            })
            .unwrap();

        assert_eq!(order.product_ids.len(), 1);
        assert_eq!(order.total_amount, "999.99".parse::<Decimal>().unwrap());
    }

    #[test]
    fn test_create_requires_existing_customer() {
        let store = Store::new();
        let (_, laptop, _) = seed(&store);

        for bad in ["not-a-uuid", &CustomerId::new().to_string()] {
            let err = store
                .orders()
                .create(&CreateOrderInput {
                    customer_id: (*bad).to_owned(),
                    product_ids: vec![laptop.id.to_string()],
                    order_date: None,
                })
                .unwrap_err();
            assert!(matches!(err, StoreError::CustomerNotFound));
        }
    }

    #[test]
    fn test_create_requires_products() {
        let store = Store::new();
        let (alice, _, _) = seed(&store);

        let err = store
            .orders()
            .create(&CreateOrderInput {
                customer_id: alice.id.to_string(),
                product_ids: Vec::new(),
                order_date: None,
            })
            .unwrap_err();
        assert!(matches!(err, StoreError::EmptyProductList));
    }

    #[test]
    fn test_create_reports_all_invalid_tokens() {
        let store = Store::new();
        let (alice, laptop, _) = seed(&store);
        let missing = ProductId::new().to_string();

        let err = store
            .orders()
            .create(&CreateOrderInput {
                customer_id: alice.id.to_string(),
                product_ids: vec![
                    laptop.id.to_string(),
                    "garbage".to_owned(),
                    missing.clone(),
                ],
                order_date: None,
            })
            .unwrap_err();

        let StoreError::InvalidProductIds(list) = err else {
            panic!("expected InvalidProductIds");
        };
        assert!(list.contains("garbage"));
        assert!(list.contains(&missing));
    }
}
