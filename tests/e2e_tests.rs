//! End-to-end integration tests
//!
//! These tests validate the complete replay pipeline using CSV fixtures. Each
//! fixture run:
//! 1. Reads input.csv from a fixture directory
//! 2. Applies every operation through the selected strategy
//! 3. Writes the accounts report
//! 4. Compares the report with expected.csv
//!
//! Fixtures live in tests/fixtures/ and cover the happy path, rejected
//! operations (insufficient balance, unknown accounts, self transfers),
//! malformed rows and decimal precision.
//!
//! Each fixture is run with both the sync and the async strategy.

#[cfg(test)]
mod tests {
    use bank_ledger::cli::StrategyType;
    use bank_ledger::strategy::{create_strategy, BatchConfig, Report};
    use rstest::rstest;
    use std::fs;
    use std::io::Write;
    use std::path::Path;
    use tempfile::NamedTempFile;

    fn run_strategy(input_path: &Path, strategy_type: StrategyType, report: &Report) -> String {
        let config = match strategy_type {
            StrategyType::Sync => None,
            // Tiny batches so fixtures span several of them
            StrategyType::Async => Some(BatchConfig::new(2, 4)),
        };
        let strategy = create_strategy(strategy_type, config);

        let mut temp_output = NamedTempFile::new().expect("Failed to create temp file");
        strategy
            .process(input_path, report, &mut temp_output)
            .unwrap_or_else(|e| panic!("Failed to process operations: {}", e));
        temp_output.flush().expect("Failed to flush temp file");

        fs::read_to_string(temp_output.path())
            .unwrap_or_else(|e| panic!("Failed to read temp output file: {}", e))
    }

    /// Run a fixture and compare the accounts report with expected.csv
    fn run_test_fixture(fixture_name: &str, strategy_type: StrategyType) {
        let fixture_dir = format!("tests/fixtures/{}", fixture_name);
        let input_path = format!("{}/input.csv", fixture_dir);
        let expected_path = format!("{}/expected.csv", fixture_dir);

        assert!(
            Path::new(&input_path).exists(),
            "Input file not found: {}",
            input_path
        );

        let actual_output = run_strategy(Path::new(&input_path), strategy_type, &Report::Accounts);
        let expected_output = fs::read_to_string(&expected_path)
            .unwrap_or_else(|e| panic!("Failed to read expected file {}: {}", expected_path, e));

        assert_eq!(
            actual_output, expected_output,
            "\n\nOutput mismatch for fixture: {} (strategy: {:?})\n\nActual output:\n{}\n\nExpected output:\n{}\n",
            fixture_name, strategy_type, actual_output, expected_output
        );
    }

    #[rstest]
    #[case("happy_path")]
    #[case("insufficient_balance")]
    #[case("unknown_accounts")]
    #[case("self_transfer")]
    #[case("malformed_data")]
    #[case("multiple_customers")]
    #[case("decimal_precision")]
    #[case("empty_input")]
    fn test_fixtures(
        #[case] fixture: &str,
        #[values(StrategyType::Sync, StrategyType::Async)] strategy: StrategyType,
    ) {
        run_test_fixture(fixture, strategy);
    }

    #[rstest]
    #[case::by_last_name("jones", "account,type,balance\nAC000002,CHECKING,80.75\n")]
    #[case::case_insensitive("ALICE", "account,type,balance\nAC000001,SAVINGS,49.75\n")]
    #[case::shared_substring("o", "account,type,balance\nAC000002,CHECKING,80.75\n")]
    #[case::no_match("zed", "account,type,balance\n")]
    fn test_search_report(
        #[case] query: &str,
        #[case] expected: &str,
        #[values(StrategyType::Sync, StrategyType::Async)] strategy: StrategyType,
    ) {
        let output = run_strategy(
            Path::new("tests/fixtures/happy_path/input.csv"),
            strategy,
            &Report::Search(query.to_string()),
        );

        assert_eq!(output, expected);
    }

    #[rstest]
    fn test_statement_report(
        #[values(StrategyType::Sync, StrategyType::Async)] strategy: StrategyType,
    ) {
        let output = run_strategy(
            Path::new("tests/fixtures/happy_path/input.csv"),
            strategy,
            &Report::Statement("AC000001".to_string()),
        );

        let rows: Vec<Vec<&str>> = output.lines().map(|l| l.split(',').collect()).collect();
        assert_eq!(rows[0], vec!["id", "type", "amount", "note", "timestamp"]);

        let movements: Vec<(&str, &str, &str)> =
            rows[1..].iter().map(|r| (r[1], r[2], r[3])).collect();
        assert_eq!(
            movements,
            vec![
                ("DEPOSIT", "100.00", "salary"),
                ("WITHDRAW", "20.00", "atm"),
                ("TRANSFER_OUT", "30.25", "rent"),
            ]
        );
    }
}
