//! Clementine Engine - filter/query composition over the CRM entity graph.
//!
//! The engine turns a flat, caller-supplied criteria map into a composed
//! predicate over Customers, Products, and Orders, applies it to a
//! point-in-time [`Dataset`] snapshot, and returns the matching records in a
//! well-defined order.
//!
//! # Data flow
//!
//! ```text
//! caller -> Criteria -> filter registry (key binding)
//!        -> predicate compiler (clause tree, AND across keys)
//!        -> query executor (filter, aggregate pre-pass, dedup)
//!        -> ordering resolver (sorted sequence)
//!        -> caller
//! ```
//!
//! # Design rules
//!
//! - Unknown criteria keys are ignored, so unrelated parameters (pagination
//!   hints, ordering) can ride alongside filter keys.
//! - A value that fails type coercion makes *that clause* select the empty
//!   set; it never aborts the query or surfaces an error.
//! - Empty/blank string values pass every record through.
//! - The engine is pure and stateless per call: queries are cheap value
//!   objects and every [`execute`](OrderQuery::execute) recomputes from the
//!   snapshot it is given.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod criteria;
pub mod dataset;
mod filters;
mod ordering;
mod plan;
pub mod query;

pub use criteria::{Coerced, Criteria, FilterValue};
pub use dataset::Dataset;
pub use query::{CustomerQuery, OrderQuery, ProductQuery};
