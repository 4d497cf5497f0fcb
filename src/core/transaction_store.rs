//! Transaction storage for account statements
//!
//! This module provides the TransactionStore component that keeps the
//! append-only transaction history of every account. Lists are created on the
//! first transaction of an account and only ever grow.

use crate::core::traits::TransactionRepository;
use crate::types::{AccountNumber, Transaction};
use std::collections::HashMap;

/// Per-account transaction history
///
/// Maintains a HashMap of account number to the account's transactions in
/// insertion order.
#[derive(Debug, Default)]
pub struct TransactionStore {
    /// Map of account number to its transactions
    transactions: HashMap<AccountNumber, Vec<Transaction>>,
}

impl TransactionStore {
    /// Create a new empty transaction store
    pub fn new() -> Self {
        TransactionStore {
            transactions: HashMap::new(),
        }
    }

    /// Total number of stored transactions across all accounts
    pub fn len(&self) -> usize {
        self.transactions.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl TransactionRepository for TransactionStore {
    fn add(&mut self, transaction: Transaction) {
        self.transactions
            .entry(transaction.account_number.clone())
            .or_default()
            .push(transaction);
    }

    fn find_by_account(&self, account_number: &str) -> Vec<Transaction> {
        self.transactions
            .get(account_number)
            .cloned()
            .unwrap_or_default()
    }
}
