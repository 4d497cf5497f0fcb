//! Core traits for the stores and the ledger services
//!
//! The repository traits let `BankService` run over any store implementation
//! injected at construction time. The `Ledger` trait allows the single-threaded
//! and the thread-safe services to be driven interchangeably.

use crate::types::{
    Account, AccountNumber, BankError, Customer, CustomerId, Operation, Transaction,
};

/// Storage for customer records
pub trait CustomerRepository {
    /// Insert or overwrite a customer by id
    fn save(&mut self, customer: Customer);

    /// All customers, in no particular order
    fn find_all(&self) -> Vec<Customer>;
}

/// Storage for accounts keyed by account number
pub trait AccountRepository {
    /// Insert or overwrite an account by account number
    fn save(&mut self, account: Account);

    /// Snapshot of all accounts, in no particular order
    fn find_all(&self) -> Vec<Account>;

    /// Look up an account; `None` when the number has no match
    fn find_by_number(&self, account_number: &str) -> Option<Account>;

    /// All accounts owned by a customer, in no particular order
    fn find_by_customer_id(&self, customer_id: CustomerId) -> Vec<Account>;
}

/// Append-only per-account transaction history
pub trait TransactionRepository {
    /// Append a transaction to its account's history
    fn add(&mut self, transaction: Transaction);

    /// Snapshot of an account's history in insertion order (empty when none)
    fn find_by_account(&self, account_number: &str) -> Vec<Transaction>;
}

/// Trait for ledger services
///
/// Provides the operation-replay interface shared by `BankService` and
/// `AsyncBankService`.
pub trait Ledger {
    /// Execute a single operation
    ///
    /// Returns the new account number for `Operation::OpenAccount`, `None` otherwise.
    fn apply(&mut self, operation: Operation) -> Result<Option<AccountNumber>, BankError>;

    /// All accounts sorted by account number
    fn accounts(&self) -> Vec<Account>;

    /// Transactions of one account sorted by timestamp
    fn statement(&self, account_number: &str) -> Vec<Transaction>;

    /// Accounts of customers whose name contains `query`, sorted by account number
    fn search(&self, query: &str) -> Vec<Account>;
}
