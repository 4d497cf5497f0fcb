//! Processing strategy module for ledger replay
//!
//! This module defines the Strategy pattern for complete replay pipelines,
//! covering CSV parsing, applying operations to a ledger and writing a report.
//! Different implementations (synchronous, asynchronous batch) can be selected
//! at runtime.

use crate::cli::StrategyType;
use crate::core::Ledger;
use crate::io::csv_format::{write_accounts_csv, write_statement_csv};
use crate::types::BankError;
use std::io::Write;
use std::path::Path;

pub mod r#async;
pub mod sync;

pub use self::r#async::{AsyncProcessingStrategy, BatchConfig};
pub use sync::SyncProcessingStrategy;

/// Report written once every operation has been applied
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Report {
    /// Every account with its balance
    #[default]
    Accounts,
    /// Chronological transactions of one account
    Statement(String),
    /// Accounts of customers whose name contains the query
    Search(String),
}

/// Processing strategy trait for complete replay pipelines
pub trait ProcessingStrategy: Send + Sync {
    /// Replay operations from the input file and write the requested report
    ///
    /// # Arguments
    ///
    /// * `input_path` - Path to the input CSV file
    /// * `report` - Which report to produce at the end
    /// * `output` - Writer receiving the report
    ///
    /// # Errors
    ///
    /// Returns an error if the input file cannot be opened or the report cannot
    /// be written. Rejected operations and malformed rows are logged and skipped;
    /// they never fail the run.
    fn process(&self, input_path: &Path, report: &Report, output: &mut dyn Write)
        -> Result<(), String>;
}

/// Write `report` for the final state of `ledger`
pub fn write_report<L: Ledger + ?Sized>(
    ledger: &L,
    report: &Report,
    output: &mut dyn Write,
) -> Result<(), BankError> {
    match report {
        Report::Accounts => write_accounts_csv(&ledger.accounts(), output),
        Report::Statement(account_number) => {
            write_statement_csv(&ledger.statement(account_number), output)
        }
        Report::Search(query) => write_accounts_csv(&ledger.search(query), output),
    }
}

/// Create a processing strategy based on the specified strategy type
///
/// # Arguments
///
/// * `strategy_type` - The type of processing strategy to create (Sync or Async)
/// * `config` - Optional configuration for async batch processing (ignored for sync)
pub fn create_strategy(
    strategy_type: StrategyType,
    config: Option<BatchConfig>,
) -> Box<dyn ProcessingStrategy> {
    match strategy_type {
        StrategyType::Sync => Box::new(SyncProcessingStrategy),
        StrategyType::Async => Box::new(AsyncProcessingStrategy::new(config.unwrap_or_default())),
    }
}
