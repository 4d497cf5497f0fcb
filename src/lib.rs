//! Bank Ledger Library
//! # Overview
//!
//! This library provides an in-memory banking ledger: customers, accounts with
//! decimal balances, deposits, withdrawals, transfers and per-account
//! statements. A CSV replay front-end applies operations from a file through a
//! sync or an async strategy.
//!
//! # Architecture
//!
//! - [`types`] - Core data types (Customer, Account, Transaction, Operation, BankError)
//! - [`cli`] - CLI arguments parsing
//! - [`core`] - Business logic components:
//!   - [`core::bank`] - Ledger rules and account number issuance
//!   - [`core::traits`] - Repository and ledger abstractions
//!   - [`core::r#async`] - Thread-safe stores, service and batch processor
//! - [`io`] - CSV parsing and report output
//! - [`strategy`] - Replay pipelines selectable at runtime
//!
//! # Ledger Rules
//!
//! - Account numbers are `AC` followed by six digits, issued sequentially
//! - Balances never go negative
//! - A transfer moves funds between two distinct accounts and records one
//!   `TRANSFER_OUT` and one `TRANSFER_IN` transaction
//! - A rejected operation leaves every store unchanged

// Module declarations
pub mod cli;
pub mod core;
pub mod io;
pub mod strategy;
pub mod types;

pub use core::{AsyncBankService, BankService, Ledger};
pub use io::{write_accounts_csv, write_statement_csv};
pub use types::{
    Account, AccountNumber, BankError, Customer, CustomerId, Operation, Transaction,
    TransactionId, TransactionType,
};
