//! Batch processing with account-based partitioning for async ledger replay
//!
//! This module provides the `BatchProcessor` struct, which runs a batch of
//! ledger operations concurrently while producing the same final state as
//! replaying them one by one in file order.
//!
//! # Design
//!
//! - `open` operations are barriers. They run alone and in file order, so
//!   account numbers are issued exactly as a sequential replay would issue them.
//! - Money operations between two barriers are partitioned into groups whose
//!   account sets are disjoint. A transfer ties the groups of both of its
//!   accounts together.
//! - Each group runs sequentially in its own tokio task. Groups never touch a
//!   common account, so their relative order cannot change any outcome.
//!
//! # Architecture
//!
//! ```text
//! BatchProcessor
//!     └── Arc<AsyncBankService>  (shared ledger)
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, error, warn};

use super::AsyncBankService;
use crate::types::{AccountNumber, BankError, Operation};

/// Result of applying a single operation
#[derive(Debug, Clone)]
pub struct ProcessingResult {
    /// The operation that was applied
    pub operation: Operation,

    /// The issued account number for `open`, `None` for money operations
    pub result: Result<Option<AccountNumber>, BankError>,
}

/// Batch processor with account-based partitioning
///
/// Cheap to clone; every clone shares the same `AsyncBankService`.
#[derive(Debug, Clone)]
pub struct BatchProcessor {
    service: Arc<AsyncBankService>,
}

impl BatchProcessor {
    /// Create a new BatchProcessor
    ///
    /// # Arguments
    ///
    /// * `service` - Arc-wrapped AsyncBankService the batches are applied to
    pub fn new(service: Arc<AsyncBankService>) -> Self {
        Self { service }
    }

    /// Partition money operations into groups with disjoint account sets
    ///
    /// # Arguments
    ///
    /// * `operations` - Operations in file order, none of them `open`
    ///
    /// # Returns
    ///
    /// Groups of operations. Within a group the input order is kept.
    ///
    /// # Guarantees
    ///
    /// - Each operation appears in exactly one group
    /// - No account is referenced by operations of two different groups
    /// - Operations touching the same account keep their relative order
    pub fn partition_by_accounts(&self, operations: Vec<Operation>) -> Vec<Vec<Operation>> {
        let mut groups: Vec<Vec<(usize, Operation)>> = Vec::new();
        let mut owner: HashMap<String, usize> = HashMap::new();

        for (position, operation) in operations.into_iter().enumerate() {
            let accounts: Vec<String> = operation
                .accounts()
                .into_iter()
                .map(str::to_string)
                .collect();

            let mut targets: Vec<usize> = accounts
                .iter()
                .filter_map(|account| owner.get(account).copied())
                .collect();
            targets.sort_unstable();
            targets.dedup();

            let index = match targets.split_first() {
                None => {
                    groups.push(Vec::new());
                    groups.len() - 1
                }
                Some((&first, rest)) => {
                    for &other in rest {
                        let mut merged = std::mem::take(&mut groups[first]);
                        merged.extend(std::mem::take(&mut groups[other]));
                        merged.sort_by_key(|(position, _)| *position);
                        groups[first] = merged;
                        for group in owner.values_mut() {
                            if *group == other {
                                *group = first;
                            }
                        }
                    }
                    first
                }
            };

            for account in accounts {
                owner.insert(account, index);
            }
            groups[index].push((position, operation));
        }

        groups
            .into_iter()
            .filter(|group| !group.is_empty())
            .map(|group| group.into_iter().map(|(_, operation)| operation).collect())
            .collect()
    }

    /// Apply a group of operations sequentially, in order
    ///
    /// Failures are captured in the results and never stop the group.
    pub async fn process_group(&self, operations: Vec<Operation>) -> Vec<ProcessingResult> {
        let mut results = Vec::with_capacity(operations.len());

        for operation in operations {
            let result = self.service.execute(operation.clone());
            if let Err(e) = &result {
                warn!(operation = operation.name(), error = %e, "operation rejected");
            }
            results.push(ProcessingResult { operation, result });
        }

        results
    }

    /// Apply a batch of operations
    ///
    /// # Arguments
    ///
    /// * `batch` - Operations in file order
    ///
    /// # Returns
    ///
    /// One `ProcessingResult` per operation. Results of `open` operations keep
    /// their file position; results of concurrent groups may be interleaved.
    pub async fn process_batch(&self, batch: Vec<Operation>) -> Vec<ProcessingResult> {
        let mut results = Vec::with_capacity(batch.len());
        let mut pending: Vec<Operation> = Vec::new();

        for operation in batch {
            if matches!(operation, Operation::OpenAccount { .. }) {
                results.extend(self.run_concurrently(std::mem::take(&mut pending)).await);
                results.extend(self.process_group(vec![operation]).await);
            } else {
                pending.push(operation);
            }
        }
        results.extend(self.run_concurrently(pending).await);

        results
    }

    async fn run_concurrently(&self, operations: Vec<Operation>) -> Vec<ProcessingResult> {
        if operations.is_empty() {
            return Vec::new();
        }

        let groups = self.partition_by_accounts(operations);
        debug!(groups = groups.len(), "spawning account groups");

        let mut tasks = Vec::with_capacity(groups.len());
        for group in groups {
            let processor = self.clone();
            tasks.push(tokio::spawn(
                async move { processor.process_group(group).await },
            ));
        }

        let mut results = Vec::new();
        for task in tasks {
            match task.await {
                Ok(group_results) => results.extend(group_results),
                Err(e) => error!(error = %e, "account group task failed"),
            }
        }

        results
    }
}
