//! Concurrent implementations of core components
//!
//! This module provides thread-safe counterparts of the ledger stores and the
//! bank service, built on `DashMap` for membership and a per-account mutex for
//! balance changes.
//!
//! # Architecture
//!
//! - **AsyncCustomerStore**: Thread-safe customer records
//! - **AsyncAccountStore**: Accounts behind per-account locks
//! - **AsyncTransactionStore**: Thread-safe per-account history
//! - **AsyncBankService**: Ledger operations through `&self`
//! - **BatchProcessor**: Applies batches with account-based partitioning
//!
//! # Thread Safety
//!
//! Operations on different accounts proceed in parallel. Operations on the
//! same account are serialized by that account's lock, and a transfer holds
//! both of its locks, taken in ascending account-number order.

pub mod account_store;
pub mod bank;
pub mod batch_processor;
pub mod customer_store;
pub mod transaction_store;

pub use account_store::{lock_account, AccountHandle, AsyncAccountStore};
pub use bank::AsyncBankService;
pub use batch_processor::{BatchProcessor, ProcessingResult};
pub use customer_store::AsyncCustomerStore;
pub use transaction_store::AsyncTransactionStore;
