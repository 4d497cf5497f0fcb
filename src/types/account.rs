//! Account-related types for the bank ledger
//!
//! This module defines the Account structure and the account-number format
//! used to identify accounts.

use super::customer::CustomerId;
use rust_decimal::Decimal;

/// Account number ("AC" followed by six zero-padded digits)
pub type AccountNumber = String;

/// Prefix shared by every account number
pub const ACCOUNT_PREFIX: &str = "AC";

/// Number of digits following the prefix
pub const ACCOUNT_DIGITS: usize = 6;

/// Largest sequence value that still fits the six-digit format
pub const MAX_ACCOUNT_SEQUENCE: u64 = 999_999;

/// Format a sequence value as an account number
///
/// `format_account_number(1)` yields `"AC000001"`. Values above
/// [`MAX_ACCOUNT_SEQUENCE`] are the caller's responsibility to reject.
pub fn format_account_number(sequence: u64) -> AccountNumber {
    format!("{}{:0width$}", ACCOUNT_PREFIX, sequence, width = ACCOUNT_DIGITS)
}

/// Extract the sequence value from a well-formed account number
///
/// Returns `None` for anything that is not `"AC"` followed by exactly six digits.
pub fn parse_account_sequence(number: &str) -> Option<u64> {
    let digits = number.strip_prefix(ACCOUNT_PREFIX)?;
    if digits.len() != ACCOUNT_DIGITS || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// Bank account state
///
/// The balance only changes through deposits, withdrawals and transfers
/// and is never negative.
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    /// Unique account number
    pub account_number: AccountNumber,

    /// Free-form account type, e.g. "SAVINGS"
    pub account_type: String,

    /// Current balance
    pub balance: Decimal,

    /// Owner of the account
    pub customer_id: CustomerId,
}

impl Account {
    /// Create a new account with a zero balance
    pub fn new(account_number: AccountNumber, account_type: &str, customer_id: CustomerId) -> Self {
        Account {
            account_number,
            account_type: account_type.to_string(),
            balance: Decimal::ZERO,
            customer_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use uuid::Uuid;

    #[rstest]
    #[case::first(1, "AC000001")]
    #[case::tens(42, "AC000042")]
    #[case::last(MAX_ACCOUNT_SEQUENCE, "AC999999")]
    fn test_format_account_number(#[case] sequence: u64, #[case] expected: &str) {
        assert_eq!(format_account_number(sequence), expected);
    }

    #[rstest]
    #[case::valid("AC000017", Some(17))]
    #[case::empty("", None)]
    #[case::wrong_prefix("XX000001", None)]
    #[case::too_short("AC0001", None)]
    #[case::too_long("AC0000001", None)]
    #[case::not_digits("AC00a001", None)]
    #[case::signed("AC+00001", None)]
    fn test_parse_account_sequence(#[case] number: &str, #[case] expected: Option<u64>) {
        assert_eq!(parse_account_sequence(number), expected);
    }

    #[test]
    fn test_new_account_has_zero_balance() {
        let customer = Uuid::new_v4();
        let account = Account::new(format_account_number(1), "SAVINGS", customer);

        assert_eq!(account.account_number, "AC000001");
        assert_eq!(account.account_type, "SAVINGS");
        assert_eq!(account.balance, Decimal::ZERO);
        assert_eq!(account.customer_id, customer);
    }
}
