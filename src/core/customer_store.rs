//! Customer storage
//!
//! Holds customer records keyed by customer id. Ids are generated by the
//! service, so no uniqueness is enforced beyond key equality.

use crate::core::traits::CustomerRepository;
use crate::types::{Customer, CustomerId};
use std::collections::HashMap;

/// In-memory customer store
#[derive(Debug, Default)]
pub struct CustomerStore {
    /// Map of customer ids to customer records
    customers: HashMap<CustomerId, Customer>,
}

impl CustomerStore {
    /// Create a new empty customer store
    pub fn new() -> Self {
        CustomerStore {
            customers: HashMap::new(),
        }
    }

    /// Number of stored customers
    pub fn len(&self) -> usize {
        self.customers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.customers.is_empty()
    }
}

impl CustomerRepository for CustomerStore {
    fn save(&mut self, customer: Customer) {
        self.customers.insert(customer.id, customer);
    }

    fn find_all(&self) -> Vec<Customer> {
        self.customers.values().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_creates_empty_store() {
        let store = CustomerStore::new();
        assert!(store.is_empty());
        assert!(store.find_all().is_empty());
    }

    #[test]
    fn test_save_and_find_all() {
        let mut store = CustomerStore::new();

        store.save(Customer::new("Alice", "a@x.com"));
        store.save(Customer::new("Bob", "b@x.com"));

        let mut names: Vec<String> = store.find_all().into_iter().map(|c| c.name).collect();
        names.sort();
        assert_eq!(names, vec!["Alice", "Bob"]);
    }

    #[test]
    fn test_save_overwrites_by_id() {
        let mut store = CustomerStore::new();

        let customer = Customer::new("Alice", "a@x.com");
        let renamed = Customer {
            name: "Alice Smith".to_string(),
            ..customer.clone()
        };

        store.save(customer);
        store.save(renamed);

        assert_eq!(store.len(), 1);
        assert_eq!(store.find_all()[0].name, "Alice Smith");
    }
}
