//! Thread-safe account storage for concurrent processing
//!
//! This module provides the `AsyncAccountStore` struct, which keeps accounts in
//! concurrent data structures so that several threads can work on the ledger
//! at the same time.
//!
//! # Design
//!
//! Accounts live in a `DashMap` keyed by account number. Each value is an
//! `Arc<Mutex<Account>>`: the map only guards membership, while the mutex is the
//! per-account lock that makes a balance change and its transaction append a
//! single critical section.
//!
//! # Thread Safety
//!
//! `handle` clones the `Arc` and releases the map shard before the caller locks
//! the account, so a thread never holds a shard guard while waiting on an
//! account mutex held by a thread that needs the same shard.

use crate::types::{Account, AccountNumber, CustomerId};
use dashmap::DashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Shared, lockable account
pub type AccountHandle = Arc<Mutex<Account>>;

/// Lock an account, recovering the data if a previous holder panicked
///
/// Every mutation validates before writing, so a poisoned account still holds
/// consistent state.
pub fn lock_account(handle: &Mutex<Account>) -> MutexGuard<'_, Account> {
    handle.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Thread-safe account store
///
/// # Thread Safety
///
/// All methods take `&self` and are safe to call from multiple threads. Lookups
/// return snapshot copies; the copy may be stale as soon as it is returned.
#[derive(Debug, Default)]
pub struct AsyncAccountStore {
    /// Concurrent map of account numbers to lockable accounts
    accounts: DashMap<AccountNumber, AccountHandle>,
}

impl AsyncAccountStore {
    /// Create a new empty AsyncAccountStore
    pub fn new() -> Self {
        Self {
            accounts: DashMap::new(),
        }
    }

    /// Insert or overwrite an account by account number
    pub fn save(&self, account: Account) {
        self.accounts
            .insert(account.account_number.clone(), Arc::new(Mutex::new(account)));
    }

    /// Lockable handle to an account, or `None` if the number has no match
    pub fn handle(&self, account_number: &str) -> Option<AccountHandle> {
        self.accounts
            .get(account_number)
            .map(|entry| Arc::clone(entry.value()))
    }

    /// Snapshot of one account
    pub fn find_by_number(&self, account_number: &str) -> Option<Account> {
        self.handle(account_number)
            .map(|handle| lock_account(&handle).clone())
    }

    /// Snapshot of all accounts, in no particular order
    pub fn find_all(&self) -> Vec<Account> {
        self.handles()
            .iter()
            .map(|handle| lock_account(handle).clone())
            .collect()
    }

    /// Snapshot of the accounts owned by a customer
    pub fn find_by_customer_id(&self, customer_id: CustomerId) -> Vec<Account> {
        self.find_all()
            .into_iter()
            .filter(|account| account.customer_id == customer_id)
            .collect()
    }

    fn handles(&self) -> Vec<AccountHandle> {
        self.accounts
            .iter()
            .map(|entry| Arc::clone(entry.value()))
            .collect()
    }
}
