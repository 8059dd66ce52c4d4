//! Shared fixtures for the filter test suites.

#![allow(dead_code)]

use chrono::{DateTime, Duration, Utc};
use clementine_core::{Customer, CustomerId, Email, Order, OrderId, Phone, Product, ProductId};
use clementine_engine::Dataset;

pub fn now() -> DateTime<Utc> {
    Utc::now()
}

pub fn customer(name: &str, email: &str, phone: Option<&str>) -> Customer {
    let ts = now();
    Customer {
        id: CustomerId::new(),
        name: name.to_owned(),
        email: Email::parse(email).expect("valid fixture email"),
        phone: phone.map(|p| Phone::parse(p).expect("valid fixture phone")),
        created_at: ts,
        updated_at: ts,
    }
}

pub fn product(name: &str, price: &str, stock: u32) -> Product {
    let ts = now();
    Product {
        id: ProductId::new(),
        name: name.to_owned(),
        price: price.parse().expect("valid fixture price"),
        stock,
        created_at: ts,
        updated_at: ts,
    }
}

/// An order whose total is the sum of its product prices, placed
/// `days_ago` days in the past.
pub fn order(customer: &Customer, products: &[&Product], days_ago: i64) -> Order {
    let ts = now();
    Order {
        id: OrderId::new(),
        customer_id: customer.id,
        product_ids: products.iter().map(|p| p.id).collect(),
        total_amount: products.iter().map(|p| p.price).sum(),
        order_date: ts - Duration::days(days_ago),
        created_at: ts,
        updated_at: ts,
    }
}

/// The six test customers the filter suites share.
pub fn test_customers() -> Vec<Customer> {
    vec![
        customer("John Doe", "john.doe@gmail.com", Some("+1234567890")),
        customer("Jane Smith", "jane.smith@yahoo.com", Some("+1987654321")),
        customer("Bob Johnson", "bob.johnson@gmail.com", Some("+44123456789")),
        customer("Alice Brown", "alice.brown@hotmail.com", None),
        customer("Charlie Wilson", "charlie@company.com", Some("+33123456789")),
        customer("David Lee", "david.lee@gmail.com", Some("555-123-4567")),
    ]
}

pub fn customers_only(customers: Vec<Customer>) -> Dataset {
    Dataset::new(customers, Vec::new(), Vec::new())
}

pub fn products_only(products: Vec<Product>) -> Dataset {
    Dataset::new(Vec::new(), products, Vec::new())
}
