//! Account storage module
//!
//! This module provides the `AccountStore` struct which holds every account
//! keyed by its account number.
//!
//! The AccountStore is responsible for:
//! - Inserting and overwriting accounts by number
//! - Looking up accounts by number (absence is `None`, not an error)
//! - Finding the accounts owned by a customer
//! - Handing out snapshot copies so callers never alias stored state

use crate::core::traits::AccountRepository;
use crate::types::{Account, AccountNumber, CustomerId};
use std::collections::HashMap;

/// In-memory account store
///
/// Balances are only changed by the service, which loads a copy, validates,
/// and saves the updated account back.
#[derive(Debug, Default)]
pub struct AccountStore {
    /// Map of account numbers to accounts
    accounts: HashMap<AccountNumber, Account>,
}

impl AccountStore {
    /// Create a new AccountStore with no accounts
    pub fn new() -> Self {
        AccountStore {
            accounts: HashMap::new(),
        }
    }

    /// Number of stored accounts
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

impl AccountRepository for AccountStore {
    fn save(&mut self, account: Account) {
        self.accounts.insert(account.account_number.clone(), account);
    }

    fn find_all(&self) -> Vec<Account> {
        self.accounts.values().cloned().collect()
    }

    fn find_by_number(&self, account_number: &str) -> Option<Account> {
        self.accounts.get(account_number).cloned()
    }

    fn find_by_customer_id(&self, customer_id: CustomerId) -> Vec<Account> {
        self.accounts
            .values()
            .filter(|account| account.customer_id == customer_id)
            .cloned()
            .collect()
    }
}
