//! Order filter registry and predicate compiler.
//!
//! Orders are the one entity whose predicates traverse relationships: to-one
//! into the owning customer, many-to-many into the product set. Clauses that
//! walk the many-valued side mark the plan so the executor deduplicates by
//! order identity.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use clementine_core::{Customer, Order, OrderId, ProductId};
use rust_decimal::Decimal;

use crate::criteria::{Coerced, Criteria, FilterValue};
use crate::dataset::Dataset;
use crate::plan::{Clause, Plan};

use super::{Bound, TextOp, contains_ci};

/// Orders with a total above this amount count as high-value.
const HIGH_VALUE_THRESHOLD: i64 = 500;

/// Orders within this many days of "now" count as recent.
const RECENT_WINDOW_DAYS: i64 = 30;

/// How a registered key binds to the order record.
enum Binding {
    /// One-sided bound on `total_amount`.
    TotalAmount { bound: Bound },
    /// Two-sided `(min, max)` range on `total_amount`.
    TotalAmountRange,
    /// One-sided bound on `order_date`.
    OrderDate { bound: Bound },
    /// Two-sided range on `order_date`.
    OrderDateRange,
    /// One-sided bound on `created_at`.
    CreatedAt { bound: Bound },
    /// Two-sided range on `created_at`.
    CreatedAtRange,
    /// Exact owning-customer identifier.
    CustomerId,
    /// Text comparison against a field of the owning customer.
    CustomerText {
        field: fn(&Customer) -> &str,
        op: TextOp,
    },
    /// Exact product identifier across the many-to-many set.
    ProductId,
    /// Substring match against any associated product's name.
    ProductName,
    /// Identifier-or-name lookup for a single product.
    ContainsProduct,
    /// Comma-separated (or list-valued) product identifiers, any-of.
    ProductIds,
    /// `total_amount > 500` / its complement.
    HighValue,
    /// `order_date` within the last 30 days / its complement.
    Recent,
    /// Minimum distinct-product count (aggregate pre-pass).
    MinProducts,
    /// Categorical order-value bucket.
    ValueCategory,
    /// Cross-field search across customer name/email and product names.
    Search,
}

fn customer_name(c: &Customer) -> &str {
    &c.name
}

fn customer_email(c: &Customer) -> &str {
    c.email.as_str()
}

/// Enumerated filter registry for orders. Unknown keys are ignored.
const REGISTRY: &[(&str, Binding)] = &[
    ("total_amount_gte", Binding::TotalAmount { bound: Bound::Gte }),
    ("total_amount_lte", Binding::TotalAmount { bound: Bound::Lte }),
    ("total_amount_range", Binding::TotalAmountRange),
    ("order_date_gte", Binding::OrderDate { bound: Bound::Gte }),
    ("order_date_lte", Binding::OrderDate { bound: Bound::Lte }),
    ("order_date_range", Binding::OrderDateRange),
    ("created_at_gte", Binding::CreatedAt { bound: Bound::Gte }),
    ("created_at_lte", Binding::CreatedAt { bound: Bound::Lte }),
    ("created_at_range", Binding::CreatedAtRange),
    ("customer_id", Binding::CustomerId),
    ("customer_name", Binding::CustomerText { field: customer_name, op: TextOp::Contains }),
    ("customer_email", Binding::CustomerText { field: customer_email, op: TextOp::Contains }),
    ("product_id", Binding::ProductId),
    ("product_name", Binding::ProductName),
    ("contains_product", Binding::ContainsProduct),
    ("product_ids", Binding::ProductIds),
    ("high_value_orders", Binding::HighValue),
    ("recent_orders", Binding::Recent),
    ("min_products", Binding::MinProducts),
    ("order_value_category", Binding::ValueCategory),
    ("search", Binding::Search),
];

fn lookup(key: &str) -> Option<&'static Binding> {
    REGISTRY.iter().find(|(k, _)| *k == key).map(|(_, b)| b)
}

/// Compile a criteria map into an order predicate plan.
///
/// `now` is captured once per execution so time-relative clauses evaluate
/// against a single instant, not per record. The aggregate pre-pass for
/// `min_products` runs here, before any filtering.
pub(crate) fn compile<'a>(
    criteria: &Criteria,
    data: &'a Dataset,
    now: DateTime<Utc>,
) -> Plan<'a, Order> {
    let mut plan = Plan::new();
    for (key, value) in criteria.iter() {
        let Some(binding) = lookup(key) else {
            tracing::debug!(key, "ignoring unrecognized order filter key");
            continue;
        };
        match binding {
            Binding::ProductId
            | Binding::ProductName
            | Binding::ContainsProduct
            | Binding::ProductIds
            | Binding::Search => plan.push_many_valued(build(binding, value, data, now)),
            _ => plan.push(build(binding, value, data, now)),
        }
    }
    plan
}

#[allow(clippy::too_many_lines)]
fn build<'a>(
    binding: &'static Binding,
    value: &FilterValue,
    data: &'a Dataset,
    now: DateTime<Utc>,
) -> Clause<'a, Order> {
    match binding {
        Binding::TotalAmount { bound } => match value.coerce_number() {
            Coerced::Blank => Clause::Pass,
            Coerced::Invalid => Clause::Never,
            Coerced::Value(limit) => {
                let bound = *bound;
                Clause::test(move |o: &Order| bound.holds(&o.total_amount, &limit))
            }
        },
        Binding::TotalAmountRange => match value.coerce_decimal_range() {
            Coerced::Blank => Clause::Pass,
            Coerced::Invalid => Clause::Never,
            Coerced::Value((min, max)) => Clause::test(move |o: &Order| {
                min.is_none_or(|lo| o.total_amount >= lo)
                    && max.is_none_or(|hi| o.total_amount <= hi)
            }),
        },
        Binding::OrderDate { bound } => match value.coerce_datetime() {
            Coerced::Blank => Clause::Pass,
            Coerced::Invalid => Clause::Never,
            Coerced::Value(limit) => {
                let bound = *bound;
                Clause::test(move |o: &Order| bound.holds(&o.order_date, &limit))
            }
        },
        Binding::OrderDateRange => match value.coerce_datetime_range() {
            Coerced::Blank => Clause::Pass,
            Coerced::Invalid => Clause::Never,
            Coerced::Value((min, max)) => Clause::test(move |o: &Order| {
                min.is_none_or(|lo| o.order_date >= lo) && max.is_none_or(|hi| o.order_date <= hi)
            }),
        },
        Binding::CreatedAt { bound } => match value.coerce_datetime() {
            Coerced::Blank => Clause::Pass,
            Coerced::Invalid => Clause::Never,
            Coerced::Value(limit) => {
                let bound = *bound;
                Clause::test(move |o: &Order| bound.holds(&o.created_at, &limit))
            }
        },
        Binding::CreatedAtRange => match value.coerce_datetime_range() {
            Coerced::Blank => Clause::Pass,
            Coerced::Invalid => Clause::Never,
            Coerced::Value((min, max)) => Clause::test(move |o: &Order| {
                min.is_none_or(|lo| o.created_at >= lo) && max.is_none_or(|hi| o.created_at <= hi)
            }),
        },
        Binding::CustomerId => match value.coerce_text() {
            Coerced::Blank => Clause::Pass,
            Coerced::Invalid => Clause::Never,
            Coerced::Value(raw) => match clementine_core::CustomerId::parse(&raw) {
                Ok(id) => Clause::test(move |o: &Order| o.customer_id == id),
                Err(_) => Clause::Never,
            },
        },
        Binding::CustomerText { field, op } => match value.coerce_text() {
            Coerced::Blank => Clause::Pass,
            Coerced::Invalid => Clause::Never,
            Coerced::Value(needle) => {
                let (field, op) = (*field, *op);
                Clause::test(move |o: &Order| {
                    data.customer(o.customer_id)
                        .is_some_and(|c| op.matches(field(c), &needle))
                })
            }
        },
        Binding::ProductId => match value.coerce_text() {
            Coerced::Blank => Clause::Pass,
            Coerced::Invalid => Clause::Never,
            Coerced::Value(raw) => match ProductId::parse(&raw) {
                Ok(id) => Clause::test(move |o: &Order| o.contains_product(id)),
                Err(_) => Clause::Never,
            },
        },
        Binding::ProductName => match value.coerce_text() {
            Coerced::Blank => Clause::Pass,
            Coerced::Invalid => Clause::Never,
            Coerced::Value(needle) => Clause::test(move |o: &Order| {
                data.order_products(o).any(|p| contains_ci(&p.name, &needle))
            }),
        },
        Binding::ContainsProduct => match value.coerce_text() {
            Coerced::Blank => Clause::Pass,
            Coerced::Invalid => Clause::Never,
            // Identifier first; anything that does not parse as one falls
            // back to a name substring match.
            Coerced::Value(term) => match ProductId::parse(&term) {
                Ok(id) => Clause::test(move |o: &Order| o.contains_product(id)),
                Err(_) => Clause::test(move |o: &Order| {
                    data.order_products(o).any(|p| contains_ci(&p.name, &term))
                }),
            },
        },
        Binding::ProductIds => product_ids(value),
        Binding::HighValue => match value.coerce_boolean() {
            Coerced::Blank => Clause::Pass,
            Coerced::Invalid => Clause::Never,
            Coerced::Value(wanted) => {
                let threshold = Decimal::from(HIGH_VALUE_THRESHOLD);
                Clause::test(move |o: &Order| (o.total_amount > threshold) == wanted)
            }
        },
        Binding::Recent => match value.coerce_boolean() {
            Coerced::Blank => Clause::Pass,
            Coerced::Invalid => Clause::Never,
            Coerced::Value(wanted) => {
                let cutoff = now - Duration::days(RECENT_WINDOW_DAYS);
                Clause::test(move |o: &Order| (o.order_date >= cutoff) == wanted)
            }
        },
        Binding::MinProducts => match value.coerce_integer() {
            Coerced::Blank => Clause::Pass,
            Coerced::Invalid => Clause::Never,
            Coerced::Value(min) => {
                // Aggregate pre-pass: annotate every order with its distinct
                // product count before any predicate runs.
                let counts: HashMap<OrderId, usize> = data
                    .orders()
                    .iter()
                    .map(|o| (o.id, o.distinct_product_count()))
                    .collect();
                let min = usize::try_from(min).unwrap_or(0);
                Clause::test(move |o: &Order| {
                    counts.get(&o.id).copied().unwrap_or_default() >= min
                })
            }
        },
        Binding::ValueCategory => value_category(value),
        Binding::Search => match value.coerce_text() {
            Coerced::Blank => Clause::Pass,
            Coerced::Invalid => Clause::Never,
            Coerced::Value(needle) => Clause::test(move |o: &Order| {
                data.customer(o.customer_id).is_some_and(|c| {
                    contains_ci(&c.name, &needle) || contains_ci(c.email.as_str(), &needle)
                }) || data.order_products(o).any(|p| contains_ci(&p.name, &needle))
            }),
        },
    }
}

/// Any-of match over a comma-separated (or list-valued) set of product
/// identifiers. Tokens that fail to parse are silently skipped; zero valid
/// identifiers selects the empty set, which distinguishes "no valid filter
/// value" from "filter absent".
fn product_ids<'a>(value: &FilterValue) -> Clause<'a, Order> {
    let tokens: Vec<String> = match value {
        FilterValue::List(items) => items.clone(),
        _ => match value.coerce_text() {
            Coerced::Blank => return Clause::Pass,
            Coerced::Invalid => return Clause::Never,
            Coerced::Value(raw) => raw.split(',').map(str::to_owned).collect(),
        },
    };

    let ids: Vec<ProductId> = tokens
        .iter()
        .filter_map(|t| ProductId::parse(t.trim()).ok())
        .collect();

    if ids.is_empty() {
        Clause::Never
    } else {
        Clause::test(move |o: &Order| ids.iter().any(|id| o.contains_product(*id)))
    }
}

/// Fixed, half-open order-value buckets. Values outside the enumerated set
/// pass every record through.
fn value_category<'a>(value: &FilterValue) -> Clause<'a, Order> {
    let category = match value.coerce_text() {
        Coerced::Blank => return Clause::Pass,
        Coerced::Invalid => return Clause::Never,
        Coerced::Value(c) => c,
    };

    let (lo, hi) = match category.as_str() {
        "small" => (None, Some(Decimal::from(100))),
        "medium" => (Some(Decimal::from(100)), Some(Decimal::from(500))),
        "large" => (Some(Decimal::from(500)), Some(Decimal::from(1000))),
        "enterprise" => (Some(Decimal::from(1000)), None),
        _ => return Clause::Pass,
    };
    Clause::test(move |o: &Order| {
        lo.is_none_or(|lo| o.total_amount >= lo) && hi.is_none_or(|hi| o.total_amount < hi)
    })
}
