//! Thread-safe customer storage
//!
//! Same contract as `CustomerStore`, backed by `DashMap` so customers can be
//! saved and listed from several threads at once.

use crate::types::{Customer, CustomerId};
use dashmap::DashMap;

/// Thread-safe customer store
#[derive(Debug, Default)]
pub struct AsyncCustomerStore {
    customers: DashMap<CustomerId, Customer>,
}

impl AsyncCustomerStore {
    pub fn new() -> Self {
        Self {
            customers: DashMap::new(),
        }
    }

    /// Insert or overwrite a customer by id
    pub fn save(&self, customer: Customer) {
        self.customers.insert(customer.id, customer);
    }

    /// Snapshot of all customers, in no particular order
    pub fn find_all(&self) -> Vec<Customer> {
        self.customers
            .iter()
            .map(|entry| entry.value().clone())
            .collect()
    }
}
