//! Bank service
//!
//! This module provides the BankService that implements the ledger operations
//! by coordinating the customer, account and transaction stores.
//!
//! The service enforces business rules such as:
//! - Unknown account numbers fail with `AccountNotFound`
//! - Balances never go negative (`InsufficientBalance`)
//! - Transfers need two distinct accounts (`InvalidOperation`)
//! - Validation always happens before any store is touched

use crate::core::account_store::AccountStore;
use crate::core::customer_store::CustomerStore;
use crate::core::traits::{
    AccountRepository, CustomerRepository, Ledger, TransactionRepository,
};
use crate::core::transaction_store::TransactionStore;
use crate::types::{
    format_account_number, parse_account_sequence, Account, AccountNumber, BankError, Customer,
    Operation, Transaction, TransactionType, MAX_ACCOUNT_SEQUENCE,
};
use rust_decimal::Decimal;
use tracing::{debug, info};

/// Single-threaded bank service
///
/// Owns its stores, which are injected at construction time. Account numbers
/// are issued from a monotonic sequence, so they stay unique even when the
/// service is built over stores that already hold accounts.
pub struct BankService<C = CustomerStore, A = AccountStore, T = TransactionStore> {
    customers: C,
    accounts: A,
    transactions: T,
    /// Highest account sequence issued so far
    last_sequence: u64,
}

impl BankService {
    /// Create a service over empty in-memory stores
    pub fn new() -> Self {
        Self::with_stores(
            CustomerStore::new(),
            AccountStore::new(),
            TransactionStore::new(),
        )
    }
}

impl Default for BankService {
    fn default() -> Self {
        Self::new()
    }
}

impl<C, A, T> BankService<C, A, T>
where
    C: CustomerRepository,
    A: AccountRepository,
    T: TransactionRepository,
{
    /// Create a service over the given stores
    ///
    /// The account sequence resumes after the highest account number already
    /// present in `accounts`.
    pub fn with_stores(customers: C, accounts: A, transactions: T) -> Self {
        let last_sequence = accounts
            .find_all()
            .iter()
            .filter_map(|account| parse_account_sequence(&account.account_number))
            .max()
            .unwrap_or(0);

        BankService {
            customers,
            accounts,
            transactions,
            last_sequence,
        }
    }

    fn next_account_number(&mut self) -> Result<AccountNumber, BankError> {
        let sequence = self.last_sequence + 1;
        if sequence > MAX_ACCOUNT_SEQUENCE {
            return Err(BankError::AccountNumbersExhausted { sequence });
        }
        self.last_sequence = sequence;
        Ok(format_account_number(sequence))
    }

    /// Open an account for a new customer
    ///
    /// Creates the customer with a fresh id and an account with a zero balance.
    ///
    /// # Returns
    ///
    /// The number of the new account, e.g. `"AC000001"` for the first account.
    ///
    /// # Errors
    ///
    /// `AccountNumbersExhausted` once every six-digit number has been issued.
    pub fn open_account(
        &mut self,
        name: &str,
        email: &str,
        account_type: &str,
    ) -> Result<AccountNumber, BankError> {
        let account_number = self.next_account_number()?;

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

    /// Look up an account, turning absence into `AccountNotFound`
    pub fn find_account(&self, account_number: &str) -> Result<Account, BankError> {
        self.accounts
            .find_by_number(account_number)
            .ok_or_else(|| BankError::account_not_found(account_number))
    }

    /// Deposit funds into an account
    ///
    /// Increases the balance by `amount` and records a DEPOSIT transaction.
    /// The amount is taken as given.
    ///
    /// # Errors
    ///
    /// - `AccountNotFound` if the account does not exist
    /// - `ArithmeticOverflow` if the balance cannot hold the result
    pub fn deposit(
        &mut self,
        account_number: &str,
        amount: Decimal,
        note: &str,
    ) -> Result<(), BankError> {
        let mut account = self.find_account(account_number)?;

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
        self.accounts.save(account);

        Ok(())
    }

    /// Withdraw funds from an account
    ///
    /// Decreases the balance by `amount` and records a WITHDRAW transaction.
    ///
    /// # Errors
    ///
    /// - `AccountNotFound` if the account does not exist
    /// - `InsufficientBalance` if the balance is lower than `amount`
    pub fn withdraw(
        &mut self,
        account_number: &str,
        amount: Decimal,
        note: &str,
    ) -> Result<(), BankError> {
        let mut account = self.find_account(account_number)?;

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
        self.accounts.save(account);

        Ok(())
    }

    /// Transfer funds between two distinct accounts
    ///
    /// Debits `from`, credits `to`, and records a TRANSFER_OUT on the source and
    /// a TRANSFER_IN on the destination, both carrying `amount` and `note`.
    ///
    /// # Errors
    ///
    /// Checked in this order:
    /// - `InvalidOperation` if `from` and `to` are the same account
    /// - `AccountNotFound` if either account does not exist
    /// - `InsufficientBalance` if the source balance is lower than `amount`
    /// - `ArithmeticOverflow` if the destination cannot hold the result
    pub fn transfer(
        &mut self,
        from: &str,
        to: &str,
        amount: Decimal,
        note: &str,
    ) -> Result<(), BankError> {
        if from == to {
            return Err(BankError::invalid_operation(
                "Cannot transfer to the same account",
            ));
        }

        let mut source = self.find_account(from)?;
        let mut destination = self.find_account(to)?;

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

        self.accounts.save(source);
        self.accounts.save(destination);

        Ok(())
    }

    /// Transactions of an account sorted by timestamp
    ///
    /// Transactions sharing a timestamp keep their recording order. Unknown
    /// accounts yield an empty statement.
    pub fn get_statement(&self, account_number: &str) -> Vec<Transaction> {
        let mut statement = self.transactions.find_by_account(account_number);
        statement.sort_by_key(|transaction| transaction.timestamp);
        statement
    }

    /// Accounts of every customer whose name contains `query`
    ///
    /// Matching is case-insensitive; an empty query matches all customers.
    /// Results are sorted by account number.
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
}

impl<C, A, T> Ledger for BankService<C, A, T>
where
    C: CustomerRepository,
    A: AccountRepository,
    T: TransactionRepository,
{
    fn apply(&mut self, operation: Operation) -> Result<Option<AccountNumber>, BankError> {
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
