//! Thread-safe bank service for concurrent processing
//!
//! This module provides the `AsyncBankService` struct, which offers the same
//! operations as `BankService` through `&self`, so one instance can be shared
//! across threads and async tasks behind an `Arc`.
//!
//! # Critical Sections
//!
//! - Each balance change and the matching transaction append happen while the
//!   account's mutex is held.
//! - A transfer locks both accounts, always in ascending account-number order,
//!   so two opposite transfers cannot deadlock.
//! - Account numbers come from an `AtomicU64`, never from the store size.

use super::{lock_account, AsyncAccountStore, AsyncCustomerStore, AsyncTransactionStore};
use crate::core::traits::Ledger;
use crate::types::{
    format_account_number, parse_account_sequence, Account, AccountNumber, BankError, Customer,
    Operation, Transaction, TransactionType, MAX_ACCOUNT_SEQUENCE,
};
use rust_decimal::Decimal;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, info};

/// Thread-safe bank service
#[derive(Debug)]
pub struct AsyncBankService {
    customers: Arc<AsyncCustomerStore>,
    accounts: Arc<AsyncAccountStore>,
    transactions: Arc<AsyncTransactionStore>,
    /// Highest account sequence handed out so far
    sequence: AtomicU64,
}

impl AsyncBankService {
    /// Create a service over empty stores
    pub fn new() -> Self {
        Self::with_stores(
            Arc::new(AsyncCustomerStore::new()),
            Arc::new(AsyncAccountStore::new()),
            Arc::new(AsyncTransactionStore::new()),
        )
    }

    /// Create a service over shared stores
    ///
    /// The account sequence resumes after the highest account number already
    /// present in `accounts`.
    pub fn with_stores(
        customers: Arc<AsyncCustomerStore>,
        accounts: Arc<AsyncAccountStore>,
        transactions: Arc<AsyncTransactionStore>,
    ) -> Self {
        let last_sequence = accounts
            .find_all()
            .iter()
            .filter_map(|account| parse_account_sequence(&account.account_number))
            .max()
            .unwrap_or(0);

        Self {
            customers,
            accounts,
            transactions,
            sequence: AtomicU64::new(last_sequence),
        }
    }

    /// Open an account for a new customer
    pub fn open_account(
        &self,
        name: &str,
        email: &str,
        account_type: &str,
    ) -> Result<AccountNumber, BankError> {
        let sequence = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;
        if sequence > MAX_ACCOUNT_SEQUENCE {
            return Err(BankError::AccountNumbersExhausted { sequence });
        }
        let account_number = format_account_number(sequence);

        let customer = Customer::new(name, email);
        let account = Account::new(account_number.clone(), account_type, customer.id);

        info!(
            account = %account_number,
            customer = %customer.id,
            account_type,
            "opened account"
        );

        self.customers.save(customer);
        self.accounts.save(account);

        Ok(account_number)
    }

    /// All accounts sorted by account number
    pub fn list_accounts(&self) -> Vec<Account> {
        let mut accounts = self.accounts.find_all();
        accounts.sort_by(|a, b| a.account_number.cmp(&b.account_number));
        accounts
    }

    /// Snapshot of an account, turning absence into `AccountNotFound`
    pub fn find_account(&self, account_number: &str) -> Result<Account, BankError> {
        self.accounts
            .find_by_number(account_number)
            .ok_or_else(|| BankError::account_not_found(account_number))
    }

    /// Deposit funds into an account
    pub fn deposit(&self, account_number: &str, amount: Decimal, note: &str) -> Result<(), BankError> {
        let handle = self
            .accounts
            .handle(account_number)
            .ok_or_else(|| BankError::account_not_found(account_number))?;
        let mut account = lock_account(&handle);

        account.balance = account
            .balance
            .checked_add(amount)
            .ok_or_else(|| BankError::arithmetic_overflow("deposit", account_number))?;
        self.transactions.add(Transaction::record(
            account_number,
            amount,
            note,
            TransactionType::Deposit,
        ));

        debug!(account = account_number, %amount, balance = %account.balance, "deposit");
        Ok(())
    }

    /// Withdraw funds from an account
    pub fn withdraw(
        &self,
        account_number: &str,
        amount: Decimal,
        note: &str,
    ) -> Result<(), BankError> {
        let handle = self
            .accounts
            .handle(account_number)
            .ok_or_else(|| BankError::account_not_found(account_number))?;
        let mut account = lock_account(&handle);

        if account.balance < amount {
            return Err(BankError::insufficient_balance(
                account_number,
                account.balance,
                amount,
            ));
        }

        account.balance = account
            .balance
            .checked_sub(amount)
            .ok_or_else(|| BankError::arithmetic_overflow("withdraw", account_number))?;
        self.transactions.add(Transaction::record(
            account_number,
            amount,
            note,
            TransactionType::Withdraw,
        ));

        debug!(account = account_number, %amount, balance = %account.balance, "withdraw");
        Ok(())
    }

    /// Transfer funds between two distinct accounts
    ///
    /// Error precedence matches `BankService::transfer`.
    pub fn transfer(&self, from: &str, to: &str, amount: Decimal, note: &str) -> Result<(), BankError> {
        if from == to {
            return Err(BankError::invalid_operation(
                "Cannot transfer to the same account",
            ));
        }

        let source_handle = self
            .accounts
            .handle(from)
            .ok_or_else(|| BankError::account_not_found(from))?;
        let destination_handle = self
            .accounts
            .handle(to)
            .ok_or_else(|| BankError::account_not_found(to))?;

        let (mut source, mut destination) = if from < to {
            let source = lock_account(&source_handle);
            let destination = lock_account(&destination_handle);
            (source, destination)
        } else {
            let destination = lock_account(&destination_handle);
            let source = lock_account(&source_handle);
            (source, destination)
        };

        if source.balance < amount {
            return Err(BankError::insufficient_balance(from, source.balance, amount));
        }

        let new_source = source
            .balance
            .checked_sub(amount)
            .ok_or_else(|| BankError::arithmetic_overflow("transfer", from))?;
        let new_destination = destination
            .balance
            .checked_add(amount)
            .ok_or_else(|| BankError::arithmetic_overflow("transfer", to))?;

        source.balance = new_source;
        destination.balance = new_destination;
        self.transactions.add(Transaction::record(
            from,
            amount,
            note,
            TransactionType::TransferOut,
        ));
        self.transactions.add(Transaction::record(
            to,
            amount,
            note,
            TransactionType::TransferIn,
        ));

        debug!(from, to, %amount, "transfer");
        Ok(())
    }

    /// Transactions of an account sorted by timestamp
    pub fn get_statement(&self, account_number: &str) -> Vec<Transaction> {
        let mut statement = self.transactions.find_by_account(account_number);
        statement.sort_by_key(|transaction| transaction.timestamp);
        statement
    }

    /// Accounts of every customer whose name contains `query`, case-insensitive
    pub fn search_accounts_by_customer_name(&self, query: &str) -> Vec<Account> {
        let mut accounts: Vec<Account> = self
            .customers
            .find_all()
            .iter()
            .filter(|customer| customer.name_matches(query))
            .flat_map(|customer| self.accounts.find_by_customer_id(customer.id))
            .collect();
        accounts.sort_by(|a, b| a.account_number.cmp(&b.account_number));
        accounts
    }

    /// Execute a single operation through a shared reference
    pub fn execute(&self, operation: Operation) -> Result<Option<AccountNumber>, BankError> {
        match operation {
            Operation::OpenAccount {
                name,
                email,
                account_type,
            } => self.open_account(&name, &email, &account_type).map(Some),
            Operation::Deposit {
                account,
                amount,
                note,
            } => self.deposit(&account, amount, &note).map(|_| None),
            Operation::Withdraw {
                account,
                amount,
                note,
            } => self.withdraw(&account, amount, &note).map(|_| None),
            Operation::Transfer {
                from,
                to,
                amount,
                note,
            } => self.transfer(&from, &to, amount, &note).map(|_| None),
        }
    }
}

impl Default for AsyncBankService {
    fn default() -> Self {
        Self::new()
    }
}

impl Ledger for AsyncBankService {
    fn apply(&mut self, operation: Operation) -> Result<Option<AccountNumber>, BankError> {
        self.execute(operation)
    }

    fn accounts(&self) -> Vec<Account> {
        self.list_accounts()
    }

    fn statement(&self, account_number: &str) -> Vec<Transaction> {
        self.get_statement(account_number)
    }

    fn search(&self, query: &str) -> Vec<Account> {
        self.search_accounts_by_customer_name(query)
    }
}
