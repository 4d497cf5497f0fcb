//! Bank Ledger CLI
//!
//! Replays ledger operations from a CSV file and prints a report to stdout.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- operations.csv > accounts.csv
//! cargo run -- --strategy async --batch-size 2000 --max-concurrent 8 operations.csv
//! cargo run -- --statement AC000001 operations.csv
//! cargo run -- --search smith operations.csv
//! RUST_LOG=debug cargo run -- operations.csv
//! ```
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (missing arguments, file not found, output not writable, etc.)

use bank_ledger::cli;
use bank_ledger::strategy;
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    let args = cli::parse_args();

    // RUST_LOG wins over --log-level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let strategy = {
        let config = if matches!(args.strategy, cli::StrategyType::Async) {
            Some(args.to_batch_config())
        } else {
            None
        };
        strategy::create_strategy(args.strategy, config)
    };

    let mut output = std::io::stdout();
    if let Err(e) = strategy.process(&args.input_file, &args.report(), &mut output) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
