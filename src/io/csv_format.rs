//! CSV format handling for ledger operations and reports
//!
//! This module centralizes all CSV format concerns, providing:
//! - CsvRecord structure for deserialization
//! - Conversion from CSV records to `Operation`s
//! - Account and statement report serialization
//!
//! All functions are pure (no file I/O) for easy testing.

use crate::types::{Account, BankError, Operation, Transaction};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::io::Write;
use std::str::FromStr;

/// CSV record structure for deserialization
///
/// Matches the input columns `op,account,target,amount,note,name,email,account_type`.
/// Which fields are required depends on `op`, so every field but `op` is optional.
#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
pub struct CsvRecord {
    pub op: String,
    pub account: Option<String>,
    pub target: Option<String>,
    pub amount: Option<String>,
    pub note: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub account_type: Option<String>,
}

/// Decimal places of every amount accepted on input and printed in reports
pub const AMOUNT_DECIMAL_PLACES: u32 = 2;

/// Take a required field, treating blank values as missing
fn required(value: Option<String>, field: &str, op: &str) -> Result<String, String> {
    match value {
        Some(value) if !value.trim().is_empty() => Ok(value.trim().to_string()),
        _ => Err(format!("'{}' operation requires field '{}'", op, field)),
    }
}

fn parse_amount(value: Option<String>, op: &str) -> Result<Decimal, String> {
    let raw = required(value, "amount", op)?;
    let amount =
        Decimal::from_str(&raw).map_err(|_| format!("Invalid amount '{}' for {}", raw, op))?;

    if amount <= Decimal::ZERO {
        return Err(format!("Amount must be positive for {}, got {}", op, amount));
    }

    // Reports print amounts at this precision
    if amount.normalize().scale() > AMOUNT_DECIMAL_PLACES {
        return Err(format!(
            "Amount '{}' for {} has more than {} decimal places",
            raw, op, AMOUNT_DECIMAL_PLACES
        ));
    }

    Ok(amount)
}

fn format_amount(amount: Decimal) -> String {
    format!("{:.*}", AMOUNT_DECIMAL_PLACES as usize, amount)
}

/// Convert a CsvRecord to an Operation
///
/// # Arguments
///
/// * `csv_record` - The deserialized CSV record
///
/// # Returns
///
/// * `Ok(Operation)` - Successfully converted record
/// * `Err(String)` - Description of what is missing or malformed
pub fn convert_csv_record(csv_record: CsvRecord) -> Result<Operation, String> {
    let op = csv_record.op.trim().to_lowercase();
    let note = csv_record
        .note
        .map(|note| note.trim().to_string())
        .unwrap_or_default();

    match op.as_str() {
        "open" => Ok(Operation::OpenAccount {
            name: required(csv_record.name, "name", &op)?,
            email: required(csv_record.email, "email", &op)?,
            account_type: required(csv_record.account_type, "account_type", &op)?,
        }),
        "deposit" => Ok(Operation::Deposit {
            account: required(csv_record.account, "account", &op)?,
            amount: parse_amount(csv_record.amount, &op)?,
            note,
        }),
        "withdraw" => Ok(Operation::Withdraw {
            account: required(csv_record.account, "account", &op)?,
            amount: parse_amount(csv_record.amount, &op)?,
            note,
        }),
        "transfer" => Ok(Operation::Transfer {
            from: required(csv_record.account, "account", &op)?,
            to: required(csv_record.target, "target", &op)?,
            amount: parse_amount(csv_record.amount, &op)?,
            note,
        }),
        _ => Err(format!("Invalid operation: '{}'", csv_record.op)),
    }
}

/// Write accounts in CSV format
///
/// Columns: `account,type,balance`. Accounts are sorted by account number and
/// balances are rendered with two decimal places.
///
/// # Errors
///
/// Returns `BankError` if the writer fails.
pub fn write_accounts_csv(accounts: &[Account], output: &mut dyn Write) -> Result<(), BankError> {
    let mut writer = csv::Writer::from_writer(output);
    writer.write_record(["account", "type", "balance"])?;

    let mut sorted_accounts = accounts.to_vec();
    sorted_accounts.sort_by(|a, b| a.account_number.cmp(&b.account_number));

    for account in sorted_accounts {
        writer.write_record(&[
            account.account_number,
            account.account_type,
            format_amount(account.balance),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

/// Write a statement in CSV format
///
/// Columns: `id,type,amount,note,timestamp`, in the order given. Timestamps are
/// RFC 3339.
///
/// # Errors
///
/// Returns `BankError` if the writer fails.
pub fn write_statement_csv(
    transactions: &[Transaction],
    output: &mut dyn Write,
) -> Result<(), BankError> {
    let mut writer = csv::Writer::from_writer(output);
    writer.write_record(["id", "type", "amount", "note", "timestamp"])?;

    for transaction in transactions {
        writer.write_record(&[
            transaction.id.to_string(),
            transaction.tx_type.to_string(),
            format_amount(transaction.amount),
            transaction.note.clone(),
            transaction.timestamp.to_rfc3339(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}
