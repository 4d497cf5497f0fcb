//! Synchronous processing strategy
//!
//! This module provides a single-threaded implementation of the
//! ProcessingStrategy trait. It streams rows from `SyncReader` into a
//! `BankService` one at a time, then writes the requested report.
//!
//! # Memory Efficiency
//!
//! Rows are never buffered: memory grows with the ledger state, not with the
//! input size.

use crate::core::{BankService, Ledger};
use crate::io::sync_reader::SyncReader;
use crate::strategy::{write_report, ProcessingStrategy, Report};
use std::io::Write;
use std::path::Path;
use tracing::warn;

/// Synchronous processing strategy
///
/// # Examples
///
/// ```no_run
/// use bank_ledger::strategy::{ProcessingStrategy, Report, SyncProcessingStrategy};
/// use std::path::Path;
/// use std::io;
///
/// let strategy = SyncProcessingStrategy;
/// let mut output = io::stdout();
///
/// strategy
///     .process(Path::new("operations.csv"), &Report::Accounts, &mut output)
///     .expect("Processing failed");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct SyncProcessingStrategy;

impl ProcessingStrategy for SyncProcessingStrategy {
    fn process(
        &self,
        input_path: &Path,
        report: &Report,
        output: &mut dyn Write,
    ) -> Result<(), String> {
        let mut bank = BankService::new();

        let reader = SyncReader::new(input_path)
            .map_err(|e| format!("Failed to open file '{}': {}", input_path.display(), e))?;

        for row in reader {
            match row {
                Ok(operation) => {
                    let name = operation.name();
                    if let Err(e) = bank.apply(operation) {
                        warn!(operation = name, error = %e, "operation rejected");
                    }
                }
                Err(e) => warn!(error = %e, "skipping malformed row"),
            }
        }

        write_report(&bank, report, output).map_err(|e| e.to_string())
    }
}
