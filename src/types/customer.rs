//! Customer records

use uuid::Uuid;

/// Customer identifier (random v4 UUID)
pub type CustomerId = Uuid;

/// Owner of one or more accounts. Immutable after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
    pub email: String,
}

impl Customer {
    /// Create a customer with a freshly generated id
    pub fn new(name: &str, email: &str) -> Self {
        Customer {
            id: Uuid::new_v4(),
            name: name.to_string(),
            email: email.to_string(),
        }
    }

    /// Case-insensitive substring match against the customer name
    ///
    /// An empty query matches every customer.
    pub fn name_matches(&self, query: &str) -> bool {
        self.name.to_lowercase().contains(&query.to_lowercase())
    }
}
