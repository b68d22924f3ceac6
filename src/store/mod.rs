//! @ai:module:intent Storage interface for algorithms and execution records
//! @ai:module:layer infrastructure
//! @ai:module:public_api ExecutionStore, ExecutionRow, MemoryStore, seed_catalog

pub mod memory;
#[cfg(test)]
pub(crate) mod testing;

pub use memory::MemoryStore;

use crate::catalog::{
    Algorithm, AlgorithmCategory, AlgorithmDraft, CategoryFilter, ExecutionDraft, ExecutionRecord,
};
use crate::error::Result;
use crate::stats::CatalogCount;
use std::future::Future;

/// @ai:intent An execution record joined with its algorithm's category
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutionRow {
    pub category: AlgorithmCategory,
    pub record: ExecutionRecord,
}

/// @ai:intent Trait for the catalog and execution datastore
pub trait ExecutionStore: Send + Sync {
    /// @ai:intent List algorithms in a category scope, ordered by id
    fn list_algorithms(
        &self,
        filter: &CategoryFilter,
    ) -> impl Future<Output = Result<Vec<Algorithm>>> + Send;

    /// @ai:intent Fetch one algorithm
    fn get_algorithm(&self, id: u64) -> impl Future<Output = Result<Algorithm>> + Send;

    /// @ai:intent Insert a new algorithm
    fn create_algorithm(
        &self,
        draft: AlgorithmDraft,
    ) -> impl Future<Output = Result<Algorithm>> + Send;

    /// @ai:intent Replace an algorithm's editable fields
    fn update_algorithm(
        &self,
        id: u64,
        draft: AlgorithmDraft,
    ) -> impl Future<Output = Result<Algorithm>> + Send;

    /// @ai:intent Delete an algorithm and every execution referencing it
    fn delete_algorithm(&self, id: u64) -> impl Future<Output = Result<()>> + Send;

    /// @ai:intent Count algorithms per category, omitting empty categories
    fn catalog_counts(&self) -> impl Future<Output = Result<Vec<CatalogCount>>> + Send;

    /// @ai:intent List executions in a category scope, in creation order
    fn list_executions(
        &self,
        filter: &CategoryFilter,
    ) -> impl Future<Output = Result<Vec<ExecutionRow>>> + Send;

    /// @ai:intent List executions, optionally for a single algorithm, in creation order
    fn executions_for_algorithm(
        &self,
        algorithm: Option<u64>,
    ) -> impl Future<Output = Result<Vec<ExecutionRecord>>> + Send;

    /// @ai:intent Fetch one execution
    fn get_execution(&self, id: u64) -> impl Future<Output = Result<ExecutionRecord>> + Send;

    /// @ai:intent Record a new execution against an existing algorithm
    /// @ai:post fails with a validation error on `algorithm` when it does not exist
    fn record_execution(
        &self,
        draft: ExecutionDraft,
    ) -> impl Future<Output = Result<ExecutionRecord>> + Send;
}

/// @ai:intent Insert seed algorithms into a store that has none yet
/// @ai:effects state:write
pub async fn seed_catalog<S: ExecutionStore>(store: &S, drafts: Vec<AlgorithmDraft>) -> Result<usize> {
    if !store.list_algorithms(&CategoryFilter::All).await?.is_empty() {
        tracing::info!("Catalog already populated, skipping seed");
        return Ok(0);
    }

    let total = drafts.len();

    for draft in drafts {
        let algorithm = store.create_algorithm(draft).await?;
        tracing::debug!(id = algorithm.id, "Seeded {}", algorithm);
    }

    tracing::info!("Seeded {} algorithms", total);
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::testing::algorithm_draft;

    #[tokio::test]
    async fn test_seed_only_into_empty_store() {
        let store = MemoryStore::new();

        let seeded = seed_catalog(
            &store,
            vec![
                algorithm_draft("Bubble Sort", AlgorithmCategory::Sorting),
                algorithm_draft("A*", AlgorithmCategory::Pathfinding),
            ],
        )
        .await
        .unwrap();
        assert_eq!(seeded, 2);

        let again = seed_catalog(
            &store,
            vec![algorithm_draft("Linear Search", AlgorithmCategory::Searching)],
        )
        .await
        .unwrap();
        assert_eq!(again, 0);

        let all = store.list_algorithms(&CategoryFilter::All).await.unwrap();
        assert_eq!(all.len(), 2);
    }
}
