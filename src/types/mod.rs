//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `account`: Account state and account-number format
//! - `customer`: Customer records
//! - `transaction`: Recorded transactions and ledger operations
//! - `error`: Error types for the ledger

pub mod account;
pub mod customer;
pub mod error;
pub mod transaction;

pub use account::{
    format_account_number, parse_account_sequence, Account, AccountNumber, MAX_ACCOUNT_SEQUENCE,
};
pub use customer::{Customer, CustomerId};
pub use error::BankError;
pub use transaction::{Operation, Transaction, TransactionId, TransactionType};
