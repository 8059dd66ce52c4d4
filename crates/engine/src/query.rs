//! Query executor.
//!
//! A query is a cheap value object holding criteria and an optional sort
//! key; nothing runs until [`execute`](CustomerQuery::execute) is called
//! against a [`Dataset`] snapshot. Every call recomputes from scratch, so a
//! query is restartable and two executions never share mutable state.

use std::collections::HashSet;

use chrono::Utc;
use clementine_core::{Customer, Order, Product};

use crate::criteria::Criteria;
use crate::dataset::Dataset;
use crate::{filters, ordering};

/// A filtered, ordered customer query.
#[derive(Debug, Clone, Default)]
pub struct CustomerQuery {
    criteria: Criteria,
    order_by: Option<String>,
}

impl CustomerQuery {
    /// Create a query from a criteria map.
    #[must_use]
    pub fn new(criteria: Criteria) -> Self {
        Self {
            criteria,
            order_by: None,
        }
    }

    /// Set the sort key (leading `-` for descending).
    #[must_use]
    pub fn order_by(mut self, key: impl Into<String>) -> Self {
        self.order_by = Some(key.into());
        self
    }

    /// Run the query against a snapshot, returning matches in sorted order.
    #[must_use]
    pub fn execute<'a>(&self, data: &'a Dataset) -> Vec<&'a Customer> {
        let plan = filters::customer::compile(&self.criteria);
        if plan.is_never() {
            return Vec::new();
        }
        let mut rows: Vec<&Customer> = data.customers().iter().filter(|c| plan.matches(c)).collect();
        ordering::sort_customers(&mut rows, self.order_by.as_deref());
        rows
    }
}

/// A filtered, ordered product query.
#[derive(Debug, Clone, Default)]
pub struct ProductQuery {
    criteria: Criteria,
    order_by: Option<String>,
}

impl ProductQuery {
    /// Create a query from a criteria map.
    #[must_use]
    pub fn new(criteria: Criteria) -> Self {
        Self {
            criteria,
            order_by: None,
        }
    }

    /// Set the sort key (leading `-` for descending).
    #[must_use]
    pub fn order_by(mut self, key: impl Into<String>) -> Self {
        self.order_by = Some(key.into());
        self
    }

    /// Run the query against a snapshot, returning matches in sorted order.
    #[must_use]
    pub fn execute<'a>(&self, data: &'a Dataset) -> Vec<&'a Product> {
        let plan = filters::product::compile(&self.criteria);
        if plan.is_never() {
            return Vec::new();
        }
        let mut rows: Vec<&Product> = data.products().iter().filter(|p| plan.matches(p)).collect();
        ordering::sort_products(&mut rows, self.order_by.as_deref());
        rows
    }
}

/// A filtered, ordered order query.
#[derive(Debug, Clone, Default)]
pub struct OrderQuery {
    criteria: Criteria,
    order_by: Option<String>,
}

impl OrderQuery {
    /// Create a query from a criteria map.
    #[must_use]
    pub fn new(criteria: Criteria) -> Self {
        Self {
            criteria,
            order_by: None,
        }
    }

    /// Set the sort key (leading `-` for descending).
    #[must_use]
    pub fn order_by(mut self, key: impl Into<String>) -> Self {
        self.order_by = Some(key.into());
        self
    }

    /// Run the query against a snapshot, returning matches in sorted order.
    ///
    /// "Now" is captured once here, so time-relative clauses see a single
    /// instant. When any clause traversed the many-to-many product relation,
    /// results are deduplicated by order identity before sorting.
    #[must_use]
    pub fn execute<'a>(&self, data: &'a Dataset) -> Vec<&'a Order> {
        let now = Utc::now();
        let plan = filters::order::compile(&self.criteria, data, now);
        if plan.is_never() {
            return Vec::new();
        }
        let mut rows: Vec<&Order> = data.orders().iter().filter(|o| plan.matches(o)).collect();
        if plan.traversed_many_valued() {
            let mut seen = HashSet::new();
            rows.retain(|o| seen.insert(o.id));
        }
        ordering::sort_orders(&mut rows, self.order_by.as_deref(), data);
        rows
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::Duration;
    use clementine_core::{CustomerId, Email, OrderId, Phone, ProductId};
    use rust_decimal::Decimal;

    use super::*;

    fn seeded() -> Dataset {
        let now = Utc::now();
        let mk_customer = |name: &str, email: &str, phone: Option<&str>| Customer {
            id: CustomerId::new(),
            name: name.to_owned(),
            email: Email::parse(email).unwrap(),
            phone: phone.map(|p| Phone::parse(p).unwrap()),
            created_at: now,
            updated_at: now,
        };
        let mk_product = |name: &str, price: &str, stock: u32| Product {
            id: ProductId::new(),
            name: name.to_owned(),
            price: price.parse().unwrap(),
            stock,
            created_at: now,
            updated_at: now,
        };

        let alice = mk_customer("Alice", "alice@example.com", Some("+1234567890"));
        let bob = mk_customer("Bob", "bob@example.com", Some("123-456-7890"));
        let laptop = mk_product("Laptop", "999.99", 5);
        let mouse = mk_product("Mouse", "89.99", 70);

        let order = |customer: &Customer, products: &[&Product], days_ago: i64| Order {
            id: OrderId::new(),
            customer_id: customer.id,
            product_ids: products.iter().map(|p| p.id).collect(),
            total_amount: products.iter().map(|p| p.price).sum(),
            order_date: now - Duration::days(days_ago),
            created_at: now,
            updated_at: now,
        };

        let orders = vec![
            order(&alice, &[&laptop, &mouse], 1),
            order(&bob, &[&mouse], 3),
        ];
        Dataset::new(vec![alice, bob], vec![laptop, mouse], orders)
    }

    #[test]
    fn test_no_recognized_keys_returns_default_ordered_collection() {
        let data = seeded();
        let criteria = Criteria::new().with("page", "2").with("per_page", "50");
        let rows = CustomerQuery::new(criteria).execute(&data);
        let names: Vec<_> = rows.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Alice", "Bob"]);
    }

    #[test]
    fn test_end_to_end_phone_pattern() {
        let data = seeded();
        let criteria = Criteria::new().with("phone_pattern", "+1");
        let rows = CustomerQuery::new(criteria).execute(&data);
        let names: Vec<_> = rows.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Alice"]);
    }

    #[test]
    fn test_execute_is_restartable() {
        let data = seeded();
        let query = ProductQuery::new(Criteria::new().with("in_stock", true));
        let first = query.execute(&data);
        let second = query.execute(&data);
        let ids = |rows: &[&Product]| rows.iter().map(|p| p.id).collect::<Vec<_>>();
        assert_eq!(ids(&first), ids(&second));
    }

    #[test]
    fn test_orders_default_to_most_recent_first() {
        let data = seeded();
        let rows = OrderQuery::new(Criteria::new()).execute(&data);
        assert_eq!(rows.len(), 2);
        assert!(rows[0].order_date >= rows[1].order_date);
    }

    #[test]
    fn test_order_by_descending_and_unknown_keys() {
        let data = seeded();

        let by_amount = OrderQuery::new(Criteria::new())
            .order_by("-total_amount")
            .execute(&data);
        assert!(by_amount[0].total_amount >= by_amount[1].total_amount);

        let unknown = OrderQuery::new(Criteria::new())
            .order_by("shoe_size")
            .execute(&data);
        assert!(unknown[0].order_date >= unknown[1].order_date);
    }

    #[test]
    fn test_order_by_customer_name_traverses_relation() {
        let data = seeded();
        let rows = OrderQuery::new(Criteria::new())
            .order_by("customer_name")
            .execute(&data);
        let owners: Vec<_> = rows
            .iter()
            .map(|o| data.customer(o.customer_id).unwrap().name.as_str())
            .collect();
        assert_eq!(owners, vec!["Alice", "Bob"]);
    }

    #[test]
    fn test_search_deduplicates_orders() {
        // An order matching on both customer and product fields must appear
        // once, even when the input snapshot carries duplicate rows.
        let data = seeded();
        let base = data.orders().first().unwrap().clone();
        let duplicated = Dataset::new(
            data.customers().to_vec(),
            data.products().to_vec(),
            vec![base.clone(), base],
        );

        let rows = OrderQuery::new(Criteria::new().with("search", "mouse")).execute(&duplicated);
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn test_total_is_sum_of_decimal_prices() {
        let data = seeded();
        let rows = OrderQuery::new(Criteria::new().with("min_products", "2")).execute(&data);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].total_amount, Decimal::new(108_998, 2));
    }
}
