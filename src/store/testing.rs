//! Test fixtures shared by store, stats and server tests.

use crate::catalog::{
    Algorithm, AlgorithmCategory, AlgorithmDraft, CategoryFilter, ExecutionDraft, ExecutionRecord,
};
use crate::error::{ApiError, Result};
use crate::stats::CatalogCount;
use crate::store::{ExecutionRow, ExecutionStore};
use std::time::Duration;

pub(crate) fn algorithm_draft(name: &str, category: AlgorithmCategory) -> AlgorithmDraft {
    AlgorithmDraft {
        name: name.to_string(),
        description: format!("{} test fixture", name),
        algorithm_type: category,
        complexity_time: "O(n)".to_string(),
        complexity_space: "O(1)".to_string(),
        code_sample: "fn run() {}".to_string(),
    }
}

pub(crate) fn execution_draft(
    algorithm: u64,
    execution_time: f64,
    comparisons: u64,
    swaps: u64,
) -> ExecutionDraft {
    ExecutionDraft {
        algorithm,
        array_size: 100,
        execution_time,
        comparisons,
        swaps,
    }
}

/// Store whose every call fails, optionally after a delay.
pub(crate) struct OfflineStore {
    pub delay: Option<Duration>,
}

impl OfflineStore {
    async fn fail<T: Send>(&self) -> Result<T> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        Err(ApiError::StoreUnavailable("connection refused".to_string()))
    }
}

impl ExecutionStore for OfflineStore {
    async fn list_algorithms(&self, _filter: &CategoryFilter) -> Result<Vec<Algorithm>> {
        self.fail().await
    }

    async fn get_algorithm(&self, _id: u64) -> Result<Algorithm> {
        self.fail().await
    }

    async fn create_algorithm(&self, _draft: AlgorithmDraft) -> Result<Algorithm> {
        self.fail().await
    }

    async fn update_algorithm(&self, _id: u64, _draft: AlgorithmDraft) -> Result<Algorithm> {
        self.fail().await
    }

    async fn delete_algorithm(&self, _id: u64) -> Result<()> {
        self.fail().await
    }

    async fn catalog_counts(&self) -> Result<Vec<CatalogCount>> {
        self.fail().await
    }

    async fn list_executions(&self, _filter: &CategoryFilter) -> Result<Vec<ExecutionRow>> {
        self.fail().await
    }

    async fn executions_for_algorithm(&self, _algorithm: Option<u64>) -> Result<Vec<ExecutionRecord>> {
        self.fail().await
    }

    async fn get_execution(&self, _id: u64) -> Result<ExecutionRecord> {
        self.fail().await
    }

    async fn record_execution(&self, _draft: ExecutionDraft) -> Result<ExecutionRecord> {
        self.fail().await
    }
}
