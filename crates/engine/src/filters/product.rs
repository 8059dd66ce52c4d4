//! Product filter registry and predicate compiler.

use clementine_core::Product;
use rust_decimal::Decimal;

use crate::criteria::{Coerced, Criteria, FilterValue};
use crate::plan::{Clause, Plan};

use super::{Bound, TextOp};

/// Default threshold for the low-stock filter when the caller supplies the
/// key without a value.
const LOW_STOCK_DEFAULT: u32 = 10;

/// How a registered key binds to the product record.
enum Binding {
    /// Plain text field comparison.
    Text {
        field: fn(&Product) -> &str,
        op: TextOp,
    },
    /// One-sided bound on `price`.
    Price { bound: Bound },
    /// Two-sided `(min, max)` range on `price`.
    PriceRange,
    /// Exact stock quantity.
    StockExact,
    /// One-sided bound on `stock`.
    Stock { bound: Bound },
    /// Two-sided `(min, max)` range on `stock`.
    StockRange,
    /// One-sided bound on `created_at`.
    CreatedAt { bound: Bound },
    /// Two-sided range on `created_at`.
    CreatedAtRange,
    /// Stock below a threshold (restocking view).
    LowStock,
    /// `stock == 0` / its complement.
    OutOfStock,
    /// `stock > 0` / its complement.
    InStock,
    /// Categorical price bucket.
    PriceCategory,
    /// Multi-field search (currently the name field).
    Search,
}

fn name(p: &Product) -> &str {
    &p.name
}

/// Enumerated filter registry for products. Unknown keys are ignored.
const REGISTRY: &[(&str, Binding)] = &[
    ("name", Binding::Text { field: name, op: TextOp::Contains }),
    ("name_exact", Binding::Text { field: name, op: TextOp::Exact }),
    ("name_startswith", Binding::Text { field: name, op: TextOp::Prefix }),
    ("price_gte", Binding::Price { bound: Bound::Gte }),
    ("price_lte", Binding::Price { bound: Bound::Lte }),
    ("price_range", Binding::PriceRange),
    ("stock", Binding::StockExact),
    ("stock_gte", Binding::Stock { bound: Bound::Gte }),
    ("stock_lte", Binding::Stock { bound: Bound::Lte }),
    ("stock_range", Binding::StockRange),
    ("created_at_gte", Binding::CreatedAt { bound: Bound::Gte }),
    ("created_at_lte", Binding::CreatedAt { bound: Bound::Lte }),
    ("created_at_range", Binding::CreatedAtRange),
    ("low_stock", Binding::LowStock),
    ("out_of_stock", Binding::OutOfStock),
    ("in_stock", Binding::InStock),
    ("price_category", Binding::PriceCategory),
    ("search", Binding::Search),
];

fn lookup(key: &str) -> Option<&'static Binding> {
    REGISTRY.iter().find(|(k, _)| *k == key).map(|(_, b)| b)
}

/// Compile a criteria map into a product predicate plan.
pub(crate) fn compile(criteria: &Criteria) -> Plan<'static, Product> {
    let mut plan = Plan::new();
    for (key, value) in criteria.iter() {
        let Some(binding) = lookup(key) else {
            tracing::debug!(key, "ignoring unrecognized product filter key");
            continue;
        };
        plan.push(build(binding, value));
    }
    plan
}

fn stock_decimal(p: &Product) -> Decimal {
    Decimal::from(p.stock)
}

fn build(binding: &'static Binding, value: &FilterValue) -> Clause<'static, Product> {
    match binding {
        Binding::Text { field, op } => text_clause(*field, *op, value),
        Binding::Search => text_clause(name, TextOp::Contains, value),
        Binding::Price { bound } => match value.coerce_number() {
            Coerced::Blank => Clause::Pass,
            Coerced::Invalid => Clause::Never,
            Coerced::Value(limit) => {
                let bound = *bound;
                Clause::test(move |p: &Product| bound.holds(&p.price, &limit))
            }
        },
        Binding::PriceRange => match value.coerce_decimal_range() {
            Coerced::Blank => Clause::Pass,
            Coerced::Invalid => Clause::Never,
            Coerced::Value((min, max)) => Clause::test(move |p: &Product| {
                min.is_none_or(|lo| p.price >= lo) && max.is_none_or(|hi| p.price <= hi)
            }),
        },
        Binding::StockExact => match value.coerce_number() {
            Coerced::Blank => Clause::Pass,
            Coerced::Invalid => Clause::Never,
            Coerced::Value(n) => Clause::test(move |p: &Product| stock_decimal(p) == n),
        },
        Binding::Stock { bound } => match value.coerce_number() {
            Coerced::Blank => Clause::Pass,
            Coerced::Invalid => Clause::Never,
            Coerced::Value(limit) => {
                let bound = *bound;
                Clause::test(move |p: &Product| bound.holds(&stock_decimal(p), &limit))
            }
        },
        Binding::StockRange => match value.coerce_decimal_range() {
            Coerced::Blank => Clause::Pass,
            Coerced::Invalid => Clause::Never,
            Coerced::Value((min, max)) => Clause::test(move |p: &Product| {
                let stock = stock_decimal(p);
                min.is_none_or(|lo| stock >= lo) && max.is_none_or(|hi| stock <= hi)
            }),
        },
        Binding::CreatedAt { bound } => match value.coerce_datetime() {
            Coerced::Blank => Clause::Pass,
            Coerced::Invalid => Clause::Never,
            Coerced::Value(limit) => {
                let bound = *bound;
                Clause::test(move |p: &Product| bound.holds(&p.created_at, &limit))
            }
        },
        Binding::CreatedAtRange => match value.coerce_datetime_range() {
            Coerced::Blank => Clause::Pass,
            Coerced::Invalid => Clause::Never,
            Coerced::Value((min, max)) => Clause::test(move |p: &Product| {
                min.is_none_or(|lo| p.created_at >= lo) && max.is_none_or(|hi| p.created_at <= hi)
            }),
        },
        Binding::LowStock => match value.coerce_number() {
            // Key present without a usable value: fall back to the default
            // restocking threshold.
            Coerced::Blank => {
                Clause::test(|p: &Product| p.stock < LOW_STOCK_DEFAULT)
            }
            Coerced::Invalid => Clause::Never,
            Coerced::Value(threshold) => {
                Clause::test(move |p: &Product| stock_decimal(p) < threshold)
            }
        },
        Binding::OutOfStock => match value.coerce_boolean() {
            Coerced::Blank => Clause::Pass,
            Coerced::Invalid => Clause::Never,
            Coerced::Value(true) => Clause::test(|p: &Product| p.stock == 0),
            Coerced::Value(false) => Clause::test(|p: &Product| p.stock > 0),
        },
        Binding::InStock => match value.coerce_boolean() {
            Coerced::Blank => Clause::Pass,
            Coerced::Invalid => Clause::Never,
            Coerced::Value(true) => Clause::test(|p: &Product| p.stock > 0),
            Coerced::Value(false) => Clause::test(|p: &Product| p.stock == 0),
        },
        Binding::PriceCategory => price_category(value),
    }
}

fn text_clause(
    field: fn(&Product) -> &str,
    op: TextOp,
    value: &FilterValue,
) -> Clause<'static, Product> {
    match value.coerce_text() {
        Coerced::Blank => Clause::Pass,
        Coerced::Invalid => Clause::Never,
        Coerced::Value(needle) => Clause::test(move |p: &Product| op.matches(field(p), &needle)),
    }
}

/// Fixed, half-open price buckets. Values outside the enumerated set pass
/// every record through.
fn price_category(value: &FilterValue) -> Clause<'static, Product> {
    let category = match value.coerce_text() {
        Coerced::Blank => return Clause::Pass,
        Coerced::Invalid => return Clause::Never,
        Coerced::Value(c) => c,
    };

    let (lo, hi) = match category.as_str() {
        "budget" => (None, Some(Decimal::from(50))),
        "mid-range" => (Some(Decimal::from(50)), Some(Decimal::from(200))),
        "premium" => (Some(Decimal::from(200)), Some(Decimal::from(500))),
        "luxury" => (Some(Decimal::from(500)), None),
        _ => return Clause::Pass,
    };
    Clause::test(move |p: &Product| {
        lo.is_none_or(|lo| p.price >= lo) && hi.is_none_or(|hi| p.price < hi)
    })
}
