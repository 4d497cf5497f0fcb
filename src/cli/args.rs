use crate::strategy::{BatchConfig, Report};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Replay bank ledger operations from a CSV file
#[derive(Parser, Debug)]
#[command(name = "bank-ledger")]
#[command(about = "Replay bank ledger operations from a CSV file", long_about = None)]
pub struct CliArgs {
    /// Input CSV file path containing ledger operations
    #[arg(value_name = "INPUT", help = "Path to the input CSV file")]
    pub input_file: PathBuf,

    /// Processing strategy
    #[arg(
        long = "strategy",
        value_name = "STRATEGY",
        default_value = "sync",
        help = "Processing strategy: 'sync' for sequential or 'async' for concurrent batches"
    )]
    pub strategy: StrategyType,

    /// Number of rows per batch (async mode only)
    #[arg(
        long = "batch-size",
        value_name = "SIZE",
        help = "Number of rows per batch (default: 1000)"
    )]
    pub batch_size: Option<usize>,

    /// Number of worker threads (async mode only)
    #[arg(
        long = "max-concurrent",
        value_name = "COUNT",
        help = "Number of worker threads applying operations (default: CPU cores)"
    )]
    pub max_concurrent_batches: Option<usize>,

    /// Print the statement of one account instead of the account list
    #[arg(long = "statement", value_name = "ACCOUNT", conflicts_with = "search")]
    pub statement: Option<String>,

    /// Print the accounts of customers whose name contains QUERY
    #[arg(long = "search", value_name = "QUERY")]
    pub search: Option<String>,

    /// Log filter used when RUST_LOG is not set
    #[arg(long = "log-level", value_name = "LEVEL", default_value = "warn")]
    pub log_level: String,
}

/// Available processing strategies
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum StrategyType {
    Sync,
    Async,
}

impl CliArgs {
    /// Create a BatchConfig from CLI arguments
    ///
    /// Missing values fall back to the defaults; zero values are replaced by the
    /// defaults with a warning.
    pub fn to_batch_config(&self) -> BatchConfig {
        if self.batch_size.is_some() || self.max_concurrent_batches.is_some() {
            let default = BatchConfig::default();
            BatchConfig::new(
                self.batch_size.unwrap_or(default.batch_size),
                self.max_concurrent_batches
                    .unwrap_or(default.max_concurrent_batches),
            )
        } else {
            BatchConfig::default()
        }
    }

    /// The report requested on the command line
    pub fn report(&self) -> Report {
        match (&self.statement, &self.search) {
            (Some(account), _) => Report::Statement(account.clone()),
            (None, Some(query)) => Report::Search(query.clone()),
            (None, None) => Report::Accounts,
        }
    }
}
