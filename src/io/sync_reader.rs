//! Synchronous CSV reader with iterator interface
//!
//! Provides a streaming iterator over ledger operations from a CSV file.
//! Delegates CSV format concerns to the csv_format module.
//!
//! # Iterator Interface
//!
//! SyncReader implements the Iterator trait, yielding `Result<Operation, String>`
//! for each CSV row:
//!
//! ```no_run
//! use bank_ledger::io::sync_reader::SyncReader;
//! use std::path::Path;
//!
//! let reader = SyncReader::new(Path::new("operations.csv")).unwrap();
//! for result in reader {
//!     match result {
//!         Ok(operation) => println!("Applying {}", operation.name()),
//!         Err(e) => eprintln!("Skipping row: {}", e),
//!     }
//! }
//! ```
//!
//! # Error Handling
//!
//! - Opening the file fails with `BankError::FileNotFound` or `BankError::IoError`
//! - Row errors are yielded as `Err` values carrying the line number

use crate::io::csv_format::{convert_csv_record, CsvRecord};
use crate::types::{BankError, Operation};
use csv::{ReaderBuilder, Trim};
use std::fs::File;
use std::io::ErrorKind;
use std::path::Path;

/// Synchronous CSV reader
///
/// Reads one row at a time, so memory use does not grow with the file size.
#[derive(Debug)]
pub struct SyncReader {
    reader: csv::Reader<File>,
    line_num: usize,
}

impl SyncReader {
    /// Open a CSV file for streaming iteration
    ///
    /// Fields are trimmed and rows may omit trailing columns.
    ///
    /// # Errors
    ///
    /// * `BankError::FileNotFound` if nothing exists at `path`
    /// * `BankError::IoError` for any other open failure
    pub fn new(path: &Path) -> Result<Self, BankError> {
        let file = File::open(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => BankError::FileNotFound {
                path: path.display().to_string(),
            },
            _ => BankError::from(e),
        })?;

        let reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .buffer_capacity(8 * 1024)
            .from_reader(file);

        Ok(Self {
            reader,
            line_num: 1,
        })
    }
}

impl Iterator for SyncReader {
    type Item = Result<Operation, String>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut deserializer = self.reader.deserialize::<CsvRecord>();
        let row = deserializer.next()?;
        self.line_num += 1;

        Some(match row {
            Ok(csv_record) => {
                convert_csv_record(csv_record).map_err(|e| format!("Line {}: {}", self.line_num, e))
            }
            Err(e) => Err(format!("Line {}: CSV parse error: {}", self.line_num, e)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const HEADER: &str = "op,account,target,amount,note,name,email,account_type\n";

    fn create_temp_csv(rows: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(HEADER.as_bytes())
            .and_then(|_| file.write_all(rows.as_bytes()))
            .expect("Failed to write to temp file");
        file.flush().expect("Failed to flush temp file");
        file
    }

    #[test]
    fn test_sync_reader_new_fails_on_missing_file() {
        let result = SyncReader::new(Path::new("nonexistent.csv"));

        assert_eq!(
            result.unwrap_err(),
            BankError::FileNotFound {
                path: "nonexistent.csv".to_string()
            }
        );
    }

    #[test]
    fn test_sync_reader_iterates_operations_in_order() {
        let file = create_temp_csv(
            "open,,,,,Alice,a@x.com,SAVINGS\n\
             deposit,AC000001,,100.00,init,,,\n\
             transfer,AC000001,AC000002,30,rent,,,\n",
        );

        let operations: Vec<Operation> = SyncReader::new(file.path())
            .unwrap()
            .map(Result::unwrap)
            .collect();

        assert_eq!(operations.len(), 3);
        assert_eq!(operations[0].name(), "open");
        assert_eq!(
            operations[1],
            Operation::Deposit {
                account: "AC000001".to_string(),
                amount: Decimal::new(10000, 2),
                note: "init".to_string(),
            }
        );
        assert_eq!(operations[2].accounts(), vec!["AC000001", "AC000002"]);
    }

    #[test]
    fn test_sync_reader_accepts_short_rows() {
        let file = create_temp_csv("deposit,AC000001,,5\n");

        let records: Vec<_> = SyncReader::new(file.path()).unwrap().collect();

        assert_eq!(records.len(), 1);
        assert!(records[0].is_ok());
    }

    #[test]
    fn test_sync_reader_includes_line_numbers_in_errors() {
        let file = create_temp_csv(
            "deposit,AC000001,,100,,,,\n\
             deposit,AC000001,,abc,,,,\n\
             withdraw,AC000001,,-1,,,,\n\
             deposit,AC000001,,50,,,,\n",
        );

        let records: Vec<_> = SyncReader::new(file.path()).unwrap().collect();

        assert_eq!(records.len(), 4);
        assert!(records[0].is_ok());
        let error = records[1].as_ref().unwrap_err();
        assert!(error.contains("Line 3"), "got: {}", error);
        assert!(error.contains("Invalid amount"));
        let error = records[2].as_ref().unwrap_err();
        assert!(error.contains("Line 4"), "got: {}", error);
        assert!(records[3].is_ok());
    }

    #[test]
    fn test_sync_reader_empty_file() {
        let file = create_temp_csv("");

        assert_eq!(SyncReader::new(file.path()).unwrap().count(), 0);
    }
}
