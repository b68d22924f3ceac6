//! @ai:module:intent HTTP handlers for catalog, execution and statistics endpoints
//! @ai:module:layer presentation
//! @ai:module:public_api (crate-internal handlers)
//! @ai:module:stateless true

use crate::catalog::{
    Algorithm, AlgorithmDraft, CategoryFilter, ExecutionDraft, ExecutionRecord,
};
use crate::error::{ApiError, Result};
use crate::server::SharedState;
use crate::stats::{CatalogCount, CategoryStatsEntry};
use crate::store::ExecutionStore;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::Value;

/// Optional `?type=` query parameter
#[derive(Debug, Default, Deserialize)]
pub(crate) struct TypeQuery {
    #[serde(rename = "type")]
    category: Option<String>,
}

impl TypeQuery {
    /// An empty value counts as absent.
    fn value(&self) -> Option<&str> {
        self.category.as_deref().filter(|s| !s.is_empty())
    }

    fn filter(&self) -> CategoryFilter {
        CategoryFilter::from_param(self.value())
    }
}

// Extractor failures are turned into `ApiError` so every error body is JSON.
type IdPath = std::result::Result<Path<u64>, PathRejection>;
type JsonBody = std::result::Result<Json<Value>, JsonRejection>;

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ExecutionQuery {
    algorithm: Option<u64>,
}

pub(crate) async fn health() -> Json<Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

pub(crate) async fn list_algorithms<S: ExecutionStore>(
    State(state): State<SharedState<S>>,
    Query(query): Query<TypeQuery>,
) -> Result<Json<Vec<Algorithm>>> {
    let algorithms = state.store.list_algorithms(&query.filter()).await?;
    Ok(Json(algorithms))
}

pub(crate) async fn algorithms_by_type<S: ExecutionStore>(
    State(state): State<SharedState<S>>,
    Query(query): Query<TypeQuery>,
) -> Result<Json<Vec<Algorithm>>> {
    if query.value().is_none() {
        return Err(ApiError::MissingParameter(
            "Type parameter is required".to_string(),
        ));
    }

    let algorithms = state.store.list_algorithms(&query.filter()).await?;
    Ok(Json(algorithms))
}

pub(crate) async fn algorithm_counts<S: ExecutionStore>(
    State(state): State<SharedState<S>>,
) -> Result<Json<Vec<CatalogCount>>> {
    Ok(Json(state.store.catalog_counts().await?))
}

pub(crate) async fn create_algorithm<S: ExecutionStore>(
    State(state): State<SharedState<S>>,
    body: JsonBody,
) -> Result<(StatusCode, Json<Algorithm>)> {
    let Json(body) = body?;
    let draft = AlgorithmDraft::from_json(&body)?;
    let algorithm = state.store.create_algorithm(draft).await?;

    tracing::info!(id = algorithm.id, "Created algorithm {}", algorithm);
    Ok((StatusCode::CREATED, Json(algorithm)))
}

pub(crate) async fn get_algorithm<S: ExecutionStore>(
    State(state): State<SharedState<S>>,
    id: IdPath,
) -> Result<Json<Algorithm>> {
    let Path(id) = id?;
    Ok(Json(state.store.get_algorithm(id).await?))
}

pub(crate) async fn update_algorithm<S: ExecutionStore>(
    State(state): State<SharedState<S>>,
    id: IdPath,
    body: JsonBody,
) -> Result<Json<Algorithm>> {
    let Path(id) = id?;
    // 404 takes precedence over payload errors
    state.store.get_algorithm(id).await?;

    let Json(body) = body?;
    let draft = AlgorithmDraft::from_json(&body)?;
    Ok(Json(state.store.update_algorithm(id, draft).await?))
}

pub(crate) async fn partial_update_algorithm<S: ExecutionStore>(
    State(state): State<SharedState<S>>,
    id: IdPath,
    body: JsonBody,
) -> Result<Json<Algorithm>> {
    let Path(id) = id?;
    let current = state.store.get_algorithm(id).await?;

    let Json(body) = body?;
    let draft = AlgorithmDraft::from_patch(&current, &body)?;
    Ok(Json(state.store.update_algorithm(id, draft).await?))
}

pub(crate) async fn delete_algorithm<S: ExecutionStore>(
    State(state): State<SharedState<S>>,
    id: IdPath,
) -> Result<StatusCode> {
    let Path(id) = id?;
    state.store.delete_algorithm(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub(crate) async fn list_executions<S: ExecutionStore>(
    State(state): State<SharedState<S>>,
    query: std::result::Result<Query<ExecutionQuery>, QueryRejection>,
) -> Result<Json<Vec<ExecutionRecord>>> {
    let Query(query) = query?;
    Ok(Json(
        state.store.executions_for_algorithm(query.algorithm).await?,
    ))
}

pub(crate) async fn get_execution<S: ExecutionStore>(
    State(state): State<SharedState<S>>,
    id: IdPath,
) -> Result<Json<ExecutionRecord>> {
    let Path(id) = id?;
    Ok(Json(state.store.get_execution(id).await?))
}

pub(crate) async fn record_execution<S: ExecutionStore>(
    State(state): State<SharedState<S>>,
    body: JsonBody,
) -> Result<(StatusCode, Json<ExecutionRecord>)> {
    let Json(body) = body?;
    let draft = ExecutionDraft::from_json(&body)?;
    let record = state.store.record_execution(draft).await?;

    tracing::info!(
        id = record.id,
        algorithm = record.algorithm,
        execution_time = record.execution_time,
        "Recorded execution"
    );
    Ok((StatusCode::CREATED, Json(record)))
}

pub(crate) async fn performance_stats<S: ExecutionStore>(
    State(state): State<SharedState<S>>,
    Query(query): Query<TypeQuery>,
) -> Result<Json<Vec<CategoryStatsEntry>>> {
    let stats = state
        .aggregator
        .compute_stats(&state.store, &query.filter())
        .await?;
    Ok(Json(stats))
}
