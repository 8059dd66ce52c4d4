//! Ordering resolver.
//!
//! Sort keys are validated against per-entity allow-lists; a leading `-`
//! requests descending order. Unrecognized keys leave the default order in
//! place: customers and products by name ascending, orders by order date
//! descending. All sorts are stable.

use std::cmp::Ordering;

use clementine_core::{Customer, Order, Product};

use crate::dataset::Dataset;

/// Sortable customer fields.
const CUSTOMER_FIELDS: &[&str] = &["name", "email", "created_at", "updated_at"];

/// Sortable product fields.
const PRODUCT_FIELDS: &[&str] = &["name", "price", "stock", "created_at", "updated_at"];

/// Sortable order fields. `customer_name` resolves through the to-one
/// relation.
const ORDER_FIELDS: &[&str] = &[
    "order_date",
    "total_amount",
    "created_at",
    "updated_at",
    "customer_name",
];

struct SortKey<'k> {
    field: &'k str,
    descending: bool,
}

/// Validate a raw sort key against an allow-list.
fn resolve<'k>(raw: &'k str, allowed: &[&str]) -> Option<SortKey<'k>> {
    let trimmed = raw.trim();
    let (field, descending) = trimmed
        .strip_prefix('-')
        .map_or((trimmed, false), |f| (f, true));
    allowed
        .contains(&field)
        .then_some(SortKey { field, descending })
}

fn directed(ord: Ordering, descending: bool) -> Ordering {
    if descending { ord.reverse() } else { ord }
}

pub(crate) fn sort_customers(rows: &mut [&Customer], key: Option<&str>) {
    let key = key.and_then(|k| resolve(k, CUSTOMER_FIELDS));
    let (field, descending) = key.map_or(("name", false), |k| (k.field, k.descending));
    rows.sort_by(|a, b| directed(customer_cmp(field, a, b), descending));
}

fn customer_cmp(field: &str, a: &Customer, b: &Customer) -> Ordering {
    match field {
        "email" => a.email.as_str().cmp(b.email.as_str()),
        "created_at" => a.created_at.cmp(&b.created_at),
        "updated_at" => a.updated_at.cmp(&b.updated_at),
        _ => a.name.cmp(&b.name),
    }
}

pub(crate) fn sort_products(rows: &mut [&Product], key: Option<&str>) {
    let key = key.and_then(|k| resolve(k, PRODUCT_FIELDS));
    let (field, descending) = key.map_or(("name", false), |k| (k.field, k.descending));
    rows.sort_by(|a, b| directed(product_cmp(field, a, b), descending));
}

fn product_cmp(field: &str, a: &Product, b: &Product) -> Ordering {
    match field {
        "price" => a.price.cmp(&b.price),
        "stock" => a.stock.cmp(&b.stock),
        "created_at" => a.created_at.cmp(&b.created_at),
        "updated_at" => a.updated_at.cmp(&b.updated_at),
        _ => a.name.cmp(&b.name),
    }
}

pub(crate) fn sort_orders(rows: &mut [&Order], key: Option<&str>, data: &Dataset) {
    let key = key.and_then(|k| resolve(k, ORDER_FIELDS));
    let (field, descending) = key.map_or(("order_date", true), |k| (k.field, k.descending));
    rows.sort_by(|a, b| directed(order_cmp(field, a, b, data), descending));
}

fn order_cmp(field: &str, a: &Order, b: &Order, data: &Dataset) -> Ordering {
    match field {
        "total_amount" => a.total_amount.cmp(&b.total_amount),
        "created_at" => a.created_at.cmp(&b.created_at),
        "updated_at" => a.updated_at.cmp(&b.updated_at),
        "customer_name" => owner_name(a, data).cmp(owner_name(b, data)),
        _ => a.order_date.cmp(&b.order_date),
    }
}

fn owner_name<'d>(order: &Order, data: &'d Dataset) -> &'d str {
    data.customer(order.customer_id).map_or("", |c| &c.name)
}
