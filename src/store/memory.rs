//! @ai:module:intent In-process datastore with optional JSON snapshot persistence
//! @ai:module:layer infrastructure
//! @ai:module:public_api MemoryStore
//! @ai:module:stateless false

use crate::catalog::{
    Algorithm, AlgorithmDraft, CategoryFilter, ExecutionDraft, ExecutionRecord, KNOWN_CATEGORIES,
};
use crate::error::{ApiError, Result, ValidationErrors};
use crate::stats::CatalogCount;
use crate::store::{ExecutionRow, ExecutionStore};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;

/// @ai:intent Complete store contents; also the snapshot file layout
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct StoreState {
    last_algorithm_id: u64,
    last_execution_id: u64,
    algorithms: BTreeMap<u64, Algorithm>,
    executions: Vec<ExecutionRecord>,
}

/// @ai:intent Datastore holding all records in memory behind a read/write lock
///
/// With a snapshot file, writers work on a copy of the state and only swap it
/// in once the file has been written, so a failed write leaves the store
/// unchanged. Without one, writers update the state in place.
pub struct MemoryStore {
    state: RwLock<StoreState>,
    snapshot: Option<PathBuf>,
}

impl MemoryStore {
    /// @ai:intent Create an empty, non-persistent store
    /// @ai:effects pure
    pub fn new() -> Self {
        Self {
            state: RwLock::new(StoreState::default()),
            snapshot: None,
        }
    }

    /// @ai:intent Open a store backed by a snapshot file, loading it when present
    /// @ai:effects fs:read
    pub async fn open(path: &Path) -> Result<Self> {
        let state = match tokio::fs::read_to_string(path).await {
            Ok(content) => {
                let state: StoreState = serde_json::from_str(&content)?;
                tracing::info!(
                    algorithms = state.algorithms.len(),
                    executions = state.executions.len(),
                    "Loaded store snapshot from {}",
                    path.display()
                );
                state
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => StoreState::default(),
            Err(e) => return Err(e.into()),
        };

        Ok(Self {
            state: RwLock::new(state),
            snapshot: Some(path.to_path_buf()),
        })
    }

    /// @ai:intent Write the state to the snapshot file via a temporary sibling
    /// @ai:effects fs:write
    async fn persist(path: &Path, state: &StoreState) -> Result<()> {
        let json = serde_json::to_vec_pretty(state)?;
        let tmp = path.with_extension("json.tmp");

        tokio::fs::write(&tmp, json).await?;
        tokio::fs::rename(&tmp, path).await?;
        Ok(())
    }

    /// @ai:intent Apply a mutation atomically with respect to readers and the snapshot
    /// @ai:pre `apply` returns its errors before touching the state
    /// @ai:effects state:write, fs:write
    async fn mutate<T, F>(&self, apply: F) -> Result<T>
    where
        F: FnOnce(&mut StoreState) -> Result<T> + Send,
        T: Send,
    {
        let mut guard = self.state.write().await;

        let Some(path) = &self.snapshot else {
            return apply(&mut guard);
        };

        // Each persisted write copies and rewrites the whole state under the
        // write lock, so cost grows with the number of stored records.
        let mut next = guard.clone();
        let value = apply(&mut next)?;
        Self::persist(path, &next).await?;

        *guard = next;
        Ok(value)
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

fn now() -> chrono::DateTime<chrono::Utc> {
    chrono::Utc::now()
}

impl ExecutionStore for MemoryStore {
    async fn list_algorithms(&self, filter: &CategoryFilter) -> Result<Vec<Algorithm>> {
        let state = self.state.read().await;

        Ok(state
            .algorithms
            .values()
            .filter(|a| filter.matches(a.algorithm_type))
            .cloned()
            .collect())
    }

    async fn get_algorithm(&self, id: u64) -> Result<Algorithm> {
        let state = self.state.read().await;
        state.algorithms.get(&id).cloned().ok_or(ApiError::NotFound)
    }

    async fn create_algorithm(&self, draft: AlgorithmDraft) -> Result<Algorithm> {
        self.mutate(move |state| {
            state.last_algorithm_id += 1;
            let algorithm = draft.into_algorithm(state.last_algorithm_id, now());
            state.algorithms.insert(algorithm.id, algorithm.clone());
            Ok(algorithm)
        })
        .await
    }

    async fn update_algorithm(&self, id: u64, draft: AlgorithmDraft) -> Result<Algorithm> {
        self.mutate(move |state| {
            let algorithm = state.algorithms.get_mut(&id).ok_or(ApiError::NotFound)?;
            algorithm.apply(draft, now());

            let updated = algorithm.clone();
            for execution in state.executions.iter_mut().filter(|e| e.algorithm == id) {
                execution.algorithm_name = updated.name.clone();
            }

            Ok(updated)
        })
        .await
    }

    async fn delete_algorithm(&self, id: u64) -> Result<()> {
        let removed = self
            .mutate(move |state| {
                state.algorithms.remove(&id).ok_or(ApiError::NotFound)?;

                let before = state.executions.len();
                state.executions.retain(|e| e.algorithm != id);
                Ok(before - state.executions.len())
            })
            .await?;

        tracing::info!(algorithm = id, executions = removed, "Deleted algorithm");
        Ok(())
    }

    async fn catalog_counts(&self) -> Result<Vec<CatalogCount>> {
        let state = self.state.read().await;

        Ok(KNOWN_CATEGORIES
            .iter()
            .map(|category| CatalogCount {
                category: *category,
                count: state
                    .algorithms
                    .values()
                    .filter(|a| a.algorithm_type == *category)
                    .count() as u64,
            })
            .filter(|c| c.count > 0)
            .collect())
    }

    async fn list_executions(&self, filter: &CategoryFilter) -> Result<Vec<ExecutionRow>> {
        let state = self.state.read().await;

        Ok(state
            .executions
            .iter()
            .filter_map(|record| {
                let algorithm = state.algorithms.get(&record.algorithm)?;
                filter
                    .matches(algorithm.algorithm_type)
                    .then(|| ExecutionRow {
                        category: algorithm.algorithm_type,
                        record: record.clone(),
                    })
            })
            .collect())
    }

    async fn executions_for_algorithm(&self, algorithm: Option<u64>) -> Result<Vec<ExecutionRecord>> {
        let state = self.state.read().await;

        Ok(state
            .executions
            .iter()
            .filter(|e| algorithm.map(|id| e.algorithm == id).unwrap_or(true))
            .cloned()
            .collect())
    }

    async fn get_execution(&self, id: u64) -> Result<ExecutionRecord> {
        let state = self.state.read().await;

        state
            .executions
            .iter()
            .find(|e| e.id == id)
            .cloned()
            .ok_or(ApiError::NotFound)
    }

    async fn record_execution(&self, draft: ExecutionDraft) -> Result<ExecutionRecord> {
        self.mutate(move |state| {
            let Some(algorithm) = state.algorithms.get(&draft.algorithm) else {
                let mut errors = ValidationErrors::new();
                errors.add(
                    "algorithm",
                    format!("Invalid pk \"{}\" - object does not exist.", draft.algorithm),
                );
                return Err(ApiError::Validation(errors));
            };

            let record = draft.into_record(state.last_execution_id + 1, algorithm, now());
            state.last_execution_id = record.id;
            state.executions.push(record.clone());
            Ok(record)
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::AlgorithmCategory;
    use crate::store::testing::{algorithm_draft, execution_draft};
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_ids_start_at_one_and_increase() {
        let store = MemoryStore::new();
        let a = store
            .create_algorithm(algorithm_draft("Bubble Sort", AlgorithmCategory::Sorting))
            .await
            .unwrap();
        let b = store
            .create_algorithm(algorithm_draft("BFS", AlgorithmCategory::Pathfinding))
            .await
            .unwrap();

        assert_eq!((a.id, b.id), (1, 2));
        assert_eq!(a.created_at, a.updated_at);
    }

    #[tokio::test]
    async fn test_record_execution_resolves_algorithm_name() {
        let store = MemoryStore::new();
        let algorithm = store
            .create_algorithm(algorithm_draft("Merge Sort", AlgorithmCategory::Sorting))
            .await
            .unwrap();

        let record = store
            .record_execution(execution_draft(algorithm.id, 12.0, 30, 4))
            .await
            .unwrap();

        assert_eq!(record.id, 1);
        assert_eq!(record.algorithm_name, "Merge Sort");
        assert_eq!(store.get_execution(1).await.unwrap(), record);
    }

    #[tokio::test]
    async fn test_record_execution_unknown_algorithm() {
        let store = MemoryStore::new();
        let err = store
            .record_execution(execution_draft(9, 1.0, 0, 0))
            .await
            .unwrap_err();

        let ApiError::Validation(errors) = err else {
            panic!("expected validation error, got {err:?}");
        };
        assert_eq!(
            errors.field("algorithm").unwrap()[0],
            "Invalid pk \"9\" - object does not exist."
        );
        assert!(store.executions_for_algorithm(None).await.unwrap().is_empty());

        let algorithm = store
            .create_algorithm(algorithm_draft("Linear Search", AlgorithmCategory::Searching))
            .await
            .unwrap();
        let record = store
            .record_execution(execution_draft(algorithm.id, 1.0, 0, 0))
            .await
            .unwrap();
        assert_eq!(record.id, 1);
    }

    #[tokio::test]
    async fn test_list_executions_filters_by_category_in_creation_order() {
        let store = MemoryStore::new();
        let sort = store
            .create_algorithm(algorithm_draft("Quick Sort", AlgorithmCategory::Sorting))
            .await
            .unwrap();
        let search = store
            .create_algorithm(algorithm_draft("Binary Search", AlgorithmCategory::Searching))
            .await
            .unwrap();

        store.record_execution(execution_draft(search.id, 1.0, 3, 0)).await.unwrap();
        store.record_execution(execution_draft(sort.id, 5.0, 10, 2)).await.unwrap();
        store.record_execution(execution_draft(search.id, 2.0, 4, 0)).await.unwrap();

        let all = store.list_executions(&CategoryFilter::All).await.unwrap();
        let categories: Vec<_> = all.iter().map(|r| r.category).collect();
        assert_eq!(
            categories,
            vec![
                AlgorithmCategory::Searching,
                AlgorithmCategory::Sorting,
                AlgorithmCategory::Searching
            ]
        );

        let searching = store
            .list_executions(&CategoryFilter::Only(AlgorithmCategory::Searching))
            .await
            .unwrap();
        assert_eq!(searching.len(), 2);

        let unknown = store
            .list_executions(&CategoryFilter::from_param(Some("graph")))
            .await
            .unwrap();
        assert!(unknown.is_empty());
    }

    #[tokio::test]
    async fn test_update_refreshes_names_on_executions() {
        let store = MemoryStore::new();
        let algorithm = store
            .create_algorithm(algorithm_draft("Linear Search", AlgorithmCategory::Searching))
            .await
            .unwrap();
        store
            .record_execution(execution_draft(algorithm.id, 1.0, 10, 0))
            .await
            .unwrap();

        let updated = store
            .update_algorithm(
                algorithm.id,
                algorithm_draft("Sequential Search", AlgorithmCategory::Searching),
            )
            .await
            .unwrap();

        assert_eq!(updated.created_at, algorithm.created_at);
        let executions = store.executions_for_algorithm(Some(algorithm.id)).await.unwrap();
        assert_eq!(executions[0].algorithm_name, "Sequential Search");

        assert!(matches!(
            store
                .update_algorithm(42, algorithm_draft("x", AlgorithmCategory::Sorting))
                .await,
            Err(ApiError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_delete_cascades_to_executions() {
        let store = MemoryStore::new();
        let keep = store
            .create_algorithm(algorithm_draft("Heap Sort", AlgorithmCategory::Sorting))
            .await
            .unwrap();
        let gone = store
            .create_algorithm(algorithm_draft("Dijkstra", AlgorithmCategory::Pathfinding))
            .await
            .unwrap();

        store.record_execution(execution_draft(keep.id, 1.0, 1, 1)).await.unwrap();
        store.record_execution(execution_draft(gone.id, 2.0, 2, 0)).await.unwrap();

        store.delete_algorithm(gone.id).await.unwrap();

        let remaining = store.executions_for_algorithm(None).await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].algorithm, keep.id);
        assert!(matches!(store.get_algorithm(gone.id).await, Err(ApiError::NotFound)));
        assert!(matches!(store.delete_algorithm(gone.id).await, Err(ApiError::NotFound)));
    }

    #[tokio::test]
    async fn test_catalog_counts_skip_empty_categories() {
        let store = MemoryStore::new();
        for (name, category) in [
            ("BFS", AlgorithmCategory::Pathfinding),
            ("Quick Sort", AlgorithmCategory::Sorting),
            ("A*", AlgorithmCategory::Pathfinding),
        ] {
            store.create_algorithm(algorithm_draft(name, category)).await.unwrap();
        }

        let counts = store.catalog_counts().await.unwrap();
        assert_eq!(
            counts,
            vec![
                CatalogCount {
                    category: AlgorithmCategory::Sorting,
                    count: 1
                },
                CatalogCount {
                    category: AlgorithmCategory::Pathfinding,
                    count: 2
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_snapshot_survives_reopen() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("store.json");

        {
            let store = MemoryStore::open(&path).await.unwrap();
            let algorithm = store
                .create_algorithm(algorithm_draft("Jump Search", AlgorithmCategory::Searching))
                .await
                .unwrap();
            store
                .record_execution(execution_draft(algorithm.id, 3.5, 7, 0))
                .await
                .unwrap();
        }

        let reopened = MemoryStore::open(&path).await.unwrap();
        let algorithms = reopened.list_algorithms(&CategoryFilter::All).await.unwrap();
        assert_eq!(algorithms.len(), 1);
        assert_eq!(algorithms[0].name, "Jump Search");

        let next = reopened
            .create_algorithm(algorithm_draft("Exponential Search", AlgorithmCategory::Searching))
            .await
            .unwrap();
        assert_eq!(next.id, 2);
    }

    #[tokio::test]
    async fn test_failed_snapshot_write_leaves_state_untouched() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("missing-dir").join("store.json");

        let store = MemoryStore::open(&path).await.unwrap();
        let err = store
            .create_algorithm(algorithm_draft("Bogo Sort", AlgorithmCategory::Sorting))
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::StoreUnavailable(_)));
        assert!(store.list_algorithms(&CategoryFilter::All).await.unwrap().is_empty());
    }
}
