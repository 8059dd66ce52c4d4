//! Entity records for the CRM domain.
//!
//! These are validated domain objects. Raw, unvalidated transport inputs
//! (`Create*Input`) live alongside them so the HTTP server and CLI share
//! one request shape.

pub mod customer;
pub mod order;
pub mod product;

pub use customer::{CreateCustomerInput, Customer};
pub use order::{CreateOrderInput, Order};
pub use product::{CreateProductInput, Product};
