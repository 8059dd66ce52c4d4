//! Point-in-time snapshot of the entity graph.

use std::collections::HashMap;

use clementine_core::{Customer, CustomerId, Order, Product, ProductId};

/// An immutable snapshot of the three entity collections, with id indexes
/// for relationship traversal.
///
/// A `Dataset` is taken once per query execution (by the data-access layer,
/// under a single consistent read), so an aggregate pre-pass and the
/// subsequent filtering always see the same view.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    customers: Vec<Customer>,
    products: Vec<Product>,
    orders: Vec<Order>,
    customers_by_id: HashMap<CustomerId, usize>,
    products_by_id: HashMap<ProductId, usize>,
}

impl Dataset {
    /// Build a snapshot from the three collections.
    #[must_use]
    pub fn new(customers: Vec<Customer>, products: Vec<Product>, orders: Vec<Order>) -> Self {
        let customers_by_id = customers.iter().enumerate().map(|(i, c)| (c.id, i)).collect();
        let products_by_id = products.iter().enumerate().map(|(i, p)| (p.id, i)).collect();
        Self {
            customers,
            products,
            orders,
            customers_by_id,
            products_by_id,
        }
    }

    /// All customers, in insertion order.
    #[must_use]
    pub fn customers(&self) -> &[Customer] {
        &self.customers
    }

    /// All products, in insertion order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// All orders, in insertion order.
    #[must_use]
    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    /// Resolve a customer by id.
    #[must_use]
    pub fn customer(&self, id: CustomerId) -> Option<&Customer> {
        self.customers_by_id
            .get(&id)
            .and_then(|&i| self.customers.get(i))
    }

    /// Resolve a product by id.
    #[must_use]
    pub fn product(&self, id: ProductId) -> Option<&Product> {
        self.products_by_id
            .get(&id)
            .and_then(|&i| self.products.get(i))
    }

    /// Iterate the products referenced by an order, skipping dangling
    /// references.
    pub fn order_products<'s>(&'s self, order: &'s Order) -> impl Iterator<Item = &'s Product> {
        order.product_ids.iter().filter_map(|id| self.product(*id))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::Utc;
    use clementine_core::{Email, OrderId};
    use rust_decimal::Decimal;

    use super::*;

    fn customer(name: &str) -> Customer {
        Customer {
            id: CustomerId::new(),
            name: name.to_owned(),
            email: Email::parse(&format!("{name}@example.com")).unwrap(),
            phone: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn product(name: &str) -> Product {
        Product {
            id: ProductId::new(),
            name: name.to_owned(),
            price: Decimal::from(10),
            stock: 1,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_lookup_by_id() {
        let alice = customer("alice");
        let alice_id = alice.id;
        let laptop = product("laptop");
        let laptop_id = laptop.id;

        let data = Dataset::new(vec![alice], vec![laptop], Vec::new());
        assert_eq!(data.customer(alice_id).map(|c| c.name.as_str()), Some("alice"));
        assert_eq!(data.product(laptop_id).map(|p| p.name.as_str()), Some("laptop"));
        assert!(data.customer(CustomerId::new()).is_none());
    }

    #[test]
    fn test_order_products_skips_dangling_references() {
        let alice = customer("alice");
        let laptop = product("laptop");
        let laptop_id = laptop.id;

        let order = Order {
            id: OrderId::new(),
            customer_id: alice.id,
            product_ids: vec![laptop_id, ProductId::new()],
            total_amount: Decimal::from(10),
            order_date: Utc::now(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let data = Dataset::new(vec![alice], vec![laptop], vec![order]);
        let order_ref = data.orders().first().unwrap();
        let names: Vec<_> = data.order_products(order_ref).map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["laptop"]);
    }
}
