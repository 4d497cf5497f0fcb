//! Asynchronous batch processing strategy
//!
//! This module provides a multi-threaded implementation of the
//! ProcessingStrategy trait. Rows are read in batches and each batch is applied
//! through a `BatchProcessor` backed by a shared `AsyncBankService`.
//!
//! # Architecture
//!
//! ```text
//! AsyncProcessingStrategy
//!     ├── BatchConfig (batch_size, max_concurrent_batches)
//!     ├── AsyncReader (batch CSV reading)
//!     ├── BatchProcessor (open barriers + account partitioning)
//!     └── AsyncBankService (thread-safe ledger)
//!         ├── AsyncCustomerStore
//!         ├── AsyncAccountStore
//!         └── AsyncTransactionStore
//! ```
//!
//! # Ordering
//!
//! Batches are applied one after another. Inside a batch, only operations on
//! disjoint account sets run concurrently, so the final balances always equal
//! those of the synchronous strategy.

use crate::core::r#async::{AsyncBankService, BatchProcessor};
use crate::io::async_reader::AsyncReader;
use crate::strategy::{write_report, ProcessingStrategy, Report};
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, warn};

/// Configuration for batch processing
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BatchConfig {
    /// Number of rows read per batch
    pub batch_size: usize,

    /// Number of runtime worker threads applying account groups
    pub max_concurrent_batches: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            batch_size: 1000,
            max_concurrent_batches: num_cpus::get(),
        }
    }
}

impl BatchConfig {
    /// Create a BatchConfig, replacing zero values by the defaults
    pub fn new(batch_size: usize, max_concurrent_batches: usize) -> Self {
        let default = Self::default();

        let batch_size = if batch_size == 0 {
            warn!(
                batch_size,
                default = default.batch_size,
                "invalid batch_size, using default"
            );
            default.batch_size
        } else {
            batch_size
        };

        let max_concurrent_batches = if max_concurrent_batches == 0 {
            warn!(
                max_concurrent_batches,
                default = default.max_concurrent_batches,
                "invalid max_concurrent_batches, using default"
            );
            default.max_concurrent_batches
        } else {
            max_concurrent_batches
        };

        Self {
            batch_size,
            max_concurrent_batches,
        }
    }
}

/// Asynchronous batch processing strategy
#[derive(Debug, Clone)]
pub struct AsyncProcessingStrategy {
    config: BatchConfig,
}

impl AsyncProcessingStrategy {
    pub fn new(config: BatchConfig) -> Self {
        Self { config }
    }
}

impl ProcessingStrategy for AsyncProcessingStrategy {
    fn process(
        &self,
        input_path: &Path,
        report: &Report,
        output: &mut dyn Write,
    ) -> Result<(), String> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(self.config.max_concurrent_batches)
            .build()
            .map_err(|e| format!("Failed to create tokio runtime: {}", e))?;

        runtime.block_on(async {
            let service = Arc::new(AsyncBankService::new());
            let processor = BatchProcessor::new(Arc::clone(&service));

            let file = tokio::fs::File::open(input_path)
                .await
                .map_err(|e| format!("Failed to open file '{}': {}", input_path.display(), e))?;

            // csv-async reads through the futures-io traits
            let compat_file = tokio_util::compat::TokioAsyncReadCompatExt::compat(file);
            let mut reader = AsyncReader::new(compat_file);

            loop {
                let batch = reader.read_batch(self.config.batch_size).await;
                if batch.is_empty() {
                    break;
                }

                let results = processor.process_batch(batch).await;
                debug!(
                    applied = results.iter().filter(|r| r.result.is_ok()).count(),
                    rejected = results.iter().filter(|r| r.result.is_err()).count(),
                    "batch done"
                );
            }

            write_report(&*service, report, output).map_err(|e| e.to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::SyncProcessingStrategy;
    use rstest::rstest;
    use tempfile::NamedTempFile;

    const HEADER: &str = "op,account,target,amount,note,name,email,account_type\n";

    fn create_temp_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(content.as_bytes())
            .expect("Failed to write to temp file");
        file.flush().expect("Failed to flush temp file");
        file
    }

    fn run(strategy: &dyn ProcessingStrategy, file: &NamedTempFile, report: &Report) -> String {
        let mut output = Vec::new();
        strategy.process(file.path(), report, &mut output).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[rstest]
    #[case::defaults(0, 0, 1000, num_cpus::get())]
    #[case::custom(50, 3, 50, 3)]
    #[case::zero_batch_only(0, 2, 1000, 2)]
    fn test_batch_config_new(
        #[case] batch_size: usize,
        #[case] max_concurrent: usize,
        #[case] expected_batch_size: usize,
        #[case] expected_max_concurrent: usize,
    ) {
        let config = BatchConfig::new(batch_size, max_concurrent);

        assert_eq!(config.batch_size, expected_batch_size);
        assert_eq!(config.max_concurrent_batches, expected_max_concurrent);
    }

    #[test]
    fn test_async_strategy_replays_scenario() {
        let file = create_temp_csv(&format!(
            "{HEADER}\
             open,,,,,Alice,a@x.com,SAVINGS\n\
             open,,,,,Bob,b@x.com,CHECKING\n\
             deposit,AC000001,,100,init,,,\n\
             transfer,AC000001,AC000002,30,rent,,,\n\
             withdraw,AC000002,,10,atm,,,\n"
        ));

        let strategy = AsyncProcessingStrategy::new(BatchConfig::default());

        assert_eq!(
            run(&strategy, &file, &Report::Accounts),
            "account,type,balance\nAC000001,SAVINGS,70.00\nAC000002,CHECKING,20.00\n"
        );
    }

    #[test]
    fn test_async_strategy_handles_missing_file() {
        let strategy = AsyncProcessingStrategy::new(BatchConfig::default());
        let mut output = Vec::new();

        let result = strategy.process(Path::new("nonexistent.csv"), &Report::Accounts, &mut output);
        assert!(result.unwrap_err().contains("Failed to open file"));
    }

    #[rstest]
    #[case::one_row_batches(1)]
    #[case::small_batches(3)]
    #[case::single_batch(1000)]
    fn test_async_strategy_matches_sync_across_batch_sizes(#[case] batch_size: usize) {
        let mut content = String::from(HEADER);
        for i in 0..4 {
            content.push_str(&format!("open,,,,,Customer {i},c{i}@x.com,SAVINGS\n"));
        }
        for round in 0..10 {
            content.push_str(&format!("deposit,AC00000{},,{},,,,\n", round % 4 + 1, 10 + round));
            content.push_str(&format!(
                "transfer,AC00000{},AC00000{},7,,,,\n",
                round % 4 + 1,
                (round + 1) % 4 + 1
            ));
            content.push_str(&format!("withdraw,AC00000{},,12,,,,\n", (round + 2) % 4 + 1));
            if round == 5 {
                content.push_str("open,,,,,Late,late@x.com,CHECKING\n");
                content.push_str("deposit,AC000005,,1,,,,\n");
            }
        }
        let file = create_temp_csv(&content);

        let expected = run(&SyncProcessingStrategy, &file, &Report::Accounts);
        let strategy = AsyncProcessingStrategy::new(BatchConfig::new(batch_size, 4));

        assert_eq!(run(&strategy, &file, &Report::Accounts), expected);
    }

    #[test]
    fn test_async_strategy_search_report() {
        let file = create_temp_csv(&format!(
            "{HEADER}\
             open,,,,,Alice Smith,a@x.com,SAVINGS\n\
             open,,,,,Bob,b@x.com,CHECKING\n\
             open,,,,,alicia,c@x.com,CHECKING\n"
        ));

        let strategy = AsyncProcessingStrategy::new(BatchConfig::default());

        assert_eq!(
            run(&strategy, &file, &Report::Search("ALI".to_string())),
            "account,type,balance\nAC000001,SAVINGS,0.00\nAC000003,CHECKING,0.00\n"
        );
    }
}
