//! Core business logic module
//!
//! This module contains the ledger components:
//! - `traits` - Repository and ledger abstractions
//! - `bank` - Business rules for accounts, money movements and statements
//! - `customer_store`, `account_store`, `transaction_store` - In-memory storage
//! - `async` - Thread-safe implementations for concurrent processing

pub mod account_store;
pub mod r#async;
pub mod bank;
pub mod customer_store;
pub mod traits;
pub mod transaction_store;

pub use account_store::AccountStore;
pub use bank::BankService;
pub use customer_store::CustomerStore;
pub use r#async::{
    AsyncAccountStore, AsyncBankService, AsyncCustomerStore, AsyncTransactionStore, BatchProcessor,
};
pub use traits::{AccountRepository, CustomerRepository, Ledger, TransactionRepository};
pub use transaction_store::TransactionStore;
