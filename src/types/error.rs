//! Error types for the bank ledger
//!
//! This module defines all error types that can occur while operating the ledger
//! or replaying operations from a CSV file.
//!
//! # Error Categories
//!
//! - **Ledger Errors**: Unknown account, insufficient balance, invalid operation
//! - **Arithmetic Errors**: Overflow in balance calculations
//! - **File I/O Errors**: File not found, permission denied, etc.
//! - **CSV Parsing Errors**: Malformed CSV, invalid data types, etc.

use rust_decimal::Decimal;
use thiserror::Error;

/// Main error type for the bank ledger
///
/// Every failing ledger operation returns one of these variants before any
/// state has been modified.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BankError {
    /// The operation referenced an account number with no match
    #[error("Account not found: {account}")]
    AccountNotFound {
        /// The account number that was looked up
        account: String,
    },

    /// A withdrawal or transfer exceeds the available balance
    #[error("Insufficient balance in account {account}: balance {balance}, requested {requested}")]
    InsufficientBalance {
        /// Account being debited
        account: String,
        /// Balance at the time of the request
        balance: Decimal,
        /// Requested amount
        requested: Decimal,
    },

    /// The request is not allowed, e.g. a transfer to the same account
    #[error("Invalid operation: {reason}")]
    InvalidOperation {
        /// Why the request was rejected
        reason: String,
    },

    /// Every account number of the six-digit format has been issued
    #[error("Account numbers exhausted: cannot issue sequence {sequence}")]
    AccountNumbersExhausted {
        /// Sequence value that could not be formatted
        sequence: u64,
    },

    /// Arithmetic overflow would occur
    #[error("Arithmetic overflow in {operation} for account {account}")]
    ArithmeticOverflow {
        /// Operation that would overflow
        operation: String,
        /// Account being updated
        account: String,
    },

    /// File not found at the specified path
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was not found
        path: String,
    },

    /// I/O error occurred while reading or writing files
    #[error("I/O error: {message}")]
    IoError {
        /// Description of the I/O error
        message: String,
    },

    /// CSV parsing error occurred
    #[error("CSV parse error{}: {message}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    ParseError {
        /// Line number where the error occurred (if available)
        line: Option<u64>,
        /// Description of the parsing error
        message: String,
    },
}

impl From<std::io::Error> for BankError {
    fn from(error: std::io::Error) -> Self {
        BankError::IoError {
            message: error.to_string(),
        }
    }
}

impl From<csv::Error> for BankError {
    fn from(error: csv::Error) -> Self {
        let line = error.position().map(|pos| pos.line());

        BankError::ParseError {
            line,
            message: error.to_string(),
        }
    }
}

impl BankError {
    /// Create an AccountNotFound error
    pub fn account_not_found(account: &str) -> Self {
        BankError::AccountNotFound {
            account: account.to_string(),
        }
    }

    /// Create an InsufficientBalance error
    pub fn insufficient_balance(account: &str, balance: Decimal, requested: Decimal) -> Self {
        BankError::InsufficientBalance {
            account: account.to_string(),
            balance,
            requested,
        }
    }

    /// Create an InvalidOperation error
    pub fn invalid_operation(reason: &str) -> Self {
        BankError::InvalidOperation {
            reason: reason.to_string(),
        }
    }

    /// Create an ArithmeticOverflow error
    pub fn arithmetic_overflow(operation: &str, account: &str) -> Self {
        BankError::ArithmeticOverflow {
            operation: operation.to_string(),
            account: account.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal::Decimal;

    #[rstest]
    #[case::account_not_found(
        BankError::AccountNotFound { account: "AC999999".to_string() },
        "Account not found: AC999999"
    )]
    #[case::insufficient_balance(
        BankError::InsufficientBalance { account: "AC000001".to_string(), balance: Decimal::new(6000, 2), requested: Decimal::new(10000, 2) },
        "Insufficient balance in account AC000001: balance 60.00, requested 100.00"
    )]
    #[case::invalid_operation(
        BankError::InvalidOperation { reason: "Cannot transfer to the same account".to_string() },
        "Invalid operation: Cannot transfer to the same account"
    )]
    #[case::exhausted(
        BankError::AccountNumbersExhausted { sequence: 1_000_000 },
        "Account numbers exhausted: cannot issue sequence 1000000"
    )]
    #[case::overflow(
        BankError::ArithmeticOverflow { operation: "deposit".to_string(), account: "AC000001".to_string() },
        "Arithmetic overflow in deposit for account AC000001"
    )]
    #[case::parse_error_with_line(
        BankError::ParseError { line: Some(42), message: "Invalid field".to_string() },
        "CSV parse error at line 42: Invalid field"
    )]
    #[case::parse_error_without_line(
        BankError::ParseError { line: None, message: "Invalid field".to_string() },
        "CSV parse error: Invalid field"
    )]
    fn test_error_display(#[case] error: BankError, #[case] expected: &str) {
        assert_eq!(error.to_string(), expected);
    }

    #[rstest]
    #[case::account_not_found(
        BankError::account_not_found("AC000009"),
        BankError::AccountNotFound { account: "AC000009".to_string() }
    )]
    #[case::insufficient_balance(
        BankError::insufficient_balance("AC000001", Decimal::ONE, Decimal::TEN),
        BankError::InsufficientBalance { account: "AC000001".to_string(), balance: Decimal::ONE, requested: Decimal::TEN }
    )]
    #[case::invalid_operation(
        BankError::invalid_operation("nope"),
        BankError::InvalidOperation { reason: "nope".to_string() }
    )]
    fn test_helper_functions(#[case] result: BankError, #[case] expected: BankError) {
        assert_eq!(result, expected);
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error =
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "Permission denied");
        let error: BankError = io_error.into();
        assert!(matches!(error, BankError::IoError { .. }));
        assert_eq!(error.to_string(), "I/O error: Permission denied");
    }
}
