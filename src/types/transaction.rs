//! Transaction-related types for the bank ledger
//!
//! This module defines the recorded transaction, its type, and the
//! `Operation` requests that the ledger services execute.

use super::account::AccountNumber;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::fmt;
use uuid::Uuid;

/// Transaction identifier (random v4 UUID)
pub type TransactionId = Uuid;

/// Kind of balance movement recorded on an account
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionType {
    /// Funds credited by a deposit
    Deposit,

    /// Funds debited by a withdrawal
    Withdraw,

    /// Credit side of a transfer, recorded on the destination account
    TransferIn,

    /// Debit side of a transfer, recorded on the source account
    TransferOut,
}

impl TransactionType {
    /// Name used in statements, e.g. `"TRANSFER_OUT"`
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Deposit => "DEPOSIT",
            TransactionType::Withdraw => "WITHDRAW",
            TransactionType::TransferIn => "TRANSFER_IN",
            TransactionType::TransferOut => "TRANSFER_OUT",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Recorded transaction
///
/// Immutable once created. Transactions are only ever appended to an
/// account's history, never changed or removed.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    /// Account the transaction was recorded on
    pub account_number: AccountNumber,

    /// Amount moved (positive)
    pub amount: Decimal,

    /// Unique transaction id
    pub id: TransactionId,

    /// Free text supplied by the caller
    pub note: String,

    /// Moment the transaction was recorded
    pub timestamp: DateTime<Utc>,

    /// Kind of movement
    pub tx_type: TransactionType,
}

impl Transaction {
    /// Record a transaction with a fresh id and the current time
    pub fn record(
        account_number: &str,
        amount: Decimal,
        note: &str,
        tx_type: TransactionType,
    ) -> Self {
        Transaction {
            account_number: account_number.to_string(),
            amount,
            id: Uuid::new_v4(),
            note: note.to_string(),
            timestamp: Utc::now(),
            tx_type,
        }
    }
}

/// A single ledger request, as parsed from an input row
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    /// Create a customer and an account for them
    OpenAccount {
        name: String,
        email: String,
        account_type: String,
    },

    /// Credit an account
    Deposit {
        account: AccountNumber,
        amount: Decimal,
        note: String,
    },

    /// Debit an account
    Withdraw {
        account: AccountNumber,
        amount: Decimal,
        note: String,
    },

    /// Move funds between two accounts
    Transfer {
        from: AccountNumber,
        to: AccountNumber,
        amount: Decimal,
        note: String,
    },
}

impl Operation {
    /// Account numbers touched by this operation
    ///
    /// Opening an account touches no existing account.
    pub fn accounts(&self) -> Vec<&str> {
        match self {
            Operation::OpenAccount { .. } => Vec::new(),
            Operation::Deposit { account, .. } | Operation::Withdraw { account, .. } => {
                vec![account.as_str()]
            }
            Operation::Transfer { from, to, .. } => vec![from.as_str(), to.as_str()],
        }
    }

    /// Short name used in log lines
    pub fn name(&self) -> &'static str {
        match self {
            Operation::OpenAccount { .. } => "open",
            Operation::Deposit { .. } => "deposit",
            Operation::Withdraw { .. } => "withdraw",
            Operation::Transfer { .. } => "transfer",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(TransactionType::Deposit, "DEPOSIT")]
    #[case(TransactionType::Withdraw, "WITHDRAW")]
    #[case(TransactionType::TransferIn, "TRANSFER_IN")]
    #[case(TransactionType::TransferOut, "TRANSFER_OUT")]
    fn test_transaction_type_display(#[case] tx_type: TransactionType, #[case] expected: &str) {
        assert_eq!(tx_type.to_string(), expected);
    }

    #[test]
    fn test_record_assigns_fresh_ids() {
        let a = Transaction::record("AC000001", Decimal::ONE, "a", TransactionType::Deposit);
        let b = Transaction::record("AC000001", Decimal::ONE, "a", TransactionType::Deposit);
        assert_ne!(a.id, b.id);
        assert!(a.timestamp <= b.timestamp);
    }

    #[test]
    fn test_operation_accounts() {
        let open = Operation::OpenAccount {
            name: "Alice".to_string(),
            email: "a@x.com".to_string(),
            account_type: "SAVINGS".to_string(),
        };
        assert!(open.accounts().is_empty());

        let transfer = Operation::Transfer {
            from: "AC000001".to_string(),
            to: "AC000002".to_string(),
            amount: Decimal::TEN,
            note: String::new(),
        };
        assert_eq!(transfer.accounts(), vec!["AC000001", "AC000002"]);
        assert_eq!(transfer.name(), "transfer");
    }
}
