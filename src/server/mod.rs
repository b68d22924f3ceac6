//! @ai:module:intent HTTP API surface over the store and aggregator
//! @ai:module:layer presentation
//! @ai:module:public_api AppContext, SharedState, router, serve

mod handlers;

use crate::stats::StatsAggregator;
use crate::store::ExecutionStore;
use axum::extract::Request;
use axum::routing::{get, post};
use axum::{Router, ServiceExt};
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::normalize_path::NormalizePathLayer;
use tower_http::trace::TraceLayer;
use tower_layer::Layer;

/// Shared application state
pub type SharedState<S> = Arc<AppContext<S>>;

/// @ai:intent Everything a request handler needs
pub struct AppContext<S> {
    pub store: S,
    pub aggregator: StatsAggregator,
}

impl<S: ExecutionStore> AppContext<S> {
    /// @ai:intent Bundle a store with the aggregator that reads from it
    /// @ai:effects pure
    pub fn new(store: S, aggregator: StatsAggregator) -> Self {
        Self { store, aggregator }
    }
}

/// @ai:intent Build the API routes
/// @ai:effects pure
pub fn router<S: ExecutionStore + 'static>(context: AppContext<S>) -> Router {
    let state: SharedState<S> = Arc::new(context);

    Router::new()
        .route("/health", get(handlers::health))
        .route(
            "/algorithms",
            get(handlers::list_algorithms::<S>).post(handlers::create_algorithm::<S>),
        )
        .route("/algorithms/by_type", get(handlers::algorithms_by_type::<S>))
        .route("/algorithms/stats", get(handlers::algorithm_counts::<S>))
        .route(
            "/algorithms/:id",
            get(handlers::get_algorithm::<S>)
                .put(handlers::update_algorithm::<S>)
                .patch(handlers::partial_update_algorithm::<S>)
                .delete(handlers::delete_algorithm::<S>),
        )
        .route("/executions", get(handlers::list_executions::<S>))
        .route(
            "/executions/performance_stats",
            get(handlers::performance_stats::<S>),
        )
        .route(
            "/executions/record_execution",
            post(handlers::record_execution::<S>),
        )
        .route("/executions/:id", get(handlers::get_execution::<S>))
        .with_state(state)
}

/// @ai:intent Serve the API on a bound listener until `shutdown` resolves
/// @ai:effects network
pub async fn serve<S, F>(listener: TcpListener, context: AppContext<S>, shutdown: F) -> anyhow::Result<()>
where
    S: ExecutionStore + 'static,
    F: Future<Output = ()> + Send + 'static,
{
    let app = router(context)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    // Clients address collections with and without a trailing slash.
    let app = NormalizePathLayer::trim_trailing_slash().layer(app);

    tracing::info!("Algorithm telemetry API listening on http://{}", listener.local_addr()?);

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown)
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}
