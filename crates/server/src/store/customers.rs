//! Customer repository: write path and lookups.

use chrono::Utc;
use clementine_core::{CreateCustomerInput, Customer, CustomerId, Email, Phone};

use super::{Store, StoreError};

/// Outcome of a bulk creation: created records plus per-index failures.
/// Valid entries are created even when others fail.
#[derive(Debug, Default)]
pub struct BulkCreateOutcome {
    pub created: Vec<Customer>,
    pub failures: Vec<(usize, StoreError)>,
}

/// Repository for customer operations.
pub struct CustomerRepository<'a> {
    store: &'a Store,
}

impl<'a> CustomerRepository<'a> {
    /// Create a new customer repository.
    #[must_use]
    pub const fn new(store: &'a Store) -> Self {
        Self { store }
    }

    /// Create a customer after validating email uniqueness and phone format.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::DuplicateEmail` if the email is taken,
    /// `StoreError::InvalidEmail` / `StoreError::InvalidPhone` on malformed
    /// input.
    pub fn create(&self, input: &CreateCustomerInput) -> Result<Customer, StoreError> {
        let email = Email::parse(input.email.trim())?;
        let phone = input
            .phone
            .as_deref()
            .filter(|p| !p.trim().is_empty())
            .map(Phone::parse)
            .transpose()?;

        let mut inner = self.store.write();
        if inner
            .customers
            .iter()
            .any(|c| c.email.as_str().eq_ignore_ascii_case(email.as_str()))
        {
            return Err(StoreError::DuplicateEmail);
        }

        let now = Utc::now();
        let customer = Customer {
            id: CustomerId::new(),
            name: input.name.trim().to_owned(),
            email,
            phone,
            created_at: now,
            updated_at: now,
        };
        inner.customers.push(customer.clone());
        tracing::info!(id = %customer.id, "customer created");
        Ok(customer)
    }

    /// Create many customers, collecting per-index failures instead of
    /// aborting on the first invalid entry.
    #[must_use]
    pub fn bulk_create(&self, inputs: &[CreateCustomerInput]) -> BulkCreateOutcome {
        let mut outcome = BulkCreateOutcome::default();
        for (index, input) in inputs.iter().enumerate() {
            match self.create(input) {
                Ok(customer) => outcome.created.push(customer),
                Err(error) => outcome.failures.push((index, error)),
            }
        }
        outcome
    }

    /// Look up a customer by id.
    #[must_use]
    pub fn get(&self, id: CustomerId) -> Option<Customer> {
        self.store
            .read()
            .customers
            .iter()
            .find(|c| c.id == id)
            .cloned()
    }

    /// Delete a customer and, owning its orders' lifecycle, cascade-delete
    /// every order that references it.
    ///
    /// Returns the number of orders removed.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if no such customer exists.
    pub fn delete(&self, id: CustomerId) -> Result<usize, StoreError> {
        let mut inner = self.store.write();
        let before = inner.customers.len();
        inner.customers.retain(|c| c.id != id);
        if inner.customers.len() == before {
            return Err(StoreError::NotFound);
        }

        let orders_before = inner.orders.len();
        inner.orders.retain(|o| o.customer_id != id);
        let removed = orders_before - inner.orders.len();
        tracing::info!(customer = %id, orders = removed, "customer deleted with cascade");
        Ok(removed)
    }
}
