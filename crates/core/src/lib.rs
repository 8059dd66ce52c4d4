//! Clementine Core - Shared types library.
//!
//! This crate provides common types used across all Clementine components:
//! - `engine` - Filter/query-composition engine
//! - `server` - HTTP API and in-memory store
//! - `cli` - Command-line management tools
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access, no HTTP
//! clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, emails, and phone numbers
//! - [`models`] - The Customer / Product / Order entity records

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod models;
pub mod types;

pub use models::*;
pub use types::*;
