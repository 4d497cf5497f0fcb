//! Thread-safe transaction storage for concurrent processing
//!
//! This module provides the `AsyncTransactionStore` struct, which keeps the
//! append-only history of every account in a `DashMap`.
//!
//! # Ordering
//!
//! Appends for one account are serialized by the map entry lock. The bank
//! service additionally appends while holding the account's mutex, so an
//! account's history order always matches the order of its balance changes.

use crate::types::{AccountNumber, Transaction};
use dashmap::DashMap;

/// Thread-safe per-account transaction history
#[derive(Debug, Default)]
pub struct AsyncTransactionStore {
    /// Concurrent map of account number to its transactions
    transactions: DashMap<AccountNumber, Vec<Transaction>>,
}

impl AsyncTransactionStore {
    /// Create a new empty AsyncTransactionStore
    pub fn new() -> Self {
        Self {
            transactions: DashMap::new(),
        }
    }

    /// Append a transaction to its account's history
    pub fn add(&self, transaction: Transaction) {
        self.transactions
            .entry(transaction.account_number.clone())
            .or_default()
            .push(transaction);
    }

    /// Snapshot of an account's history (empty when none)
    pub fn find_by_account(&self, account_number: &str) -> Vec<Transaction> {
        self.transactions
            .get(account_number)
            .map(|entry| entry.value().clone())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TransactionType;
    use rust_decimal::Decimal;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_add_and_find_by_account() {
        let store = AsyncTransactionStore::new();

        store.add(Transaction::record(
            "AC000001",
            Decimal::new(10000, 2),
            "init",
            TransactionType::Deposit,
        ));

        let history = store.find_by_account("AC000001");
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].tx_type, TransactionType::Deposit);
        assert!(store.find_by_account("AC000002").is_empty());
    }

    #[test]
    fn test_concurrent_adds_to_same_account() {
        let store = Arc::new(AsyncTransactionStore::new());

        let handles: Vec<_> = (0..10)
            .map(|_| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    for _ in 0..50 {
                        store.add(Transaction::record(
                            "AC000001",
                            Decimal::ONE,
                            "",
                            TransactionType::Deposit,
                        ));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(store.find_by_account("AC000001").len(), 500);
    }
}
