//! HTTP route handlers.

use axum::{
    BoxError, Json, Router,
    error_handling::HandleErrorLayer,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};
use busroute_core::{BusInfo, RoutingResult, StopInfo};
use serde::Deserialize;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::ServerConfig;
use crate::error::AppError;
use crate::state::AppState;

/// Query string of `GET /route`
#[derive(Debug, Deserialize)]
pub struct RouteQuery {
    pub from: String,
    pub to: String,
}

/// Create the application router.
pub fn create_router(state: AppState, config: &ServerConfig) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/route", get(route))
        .route("/bus/{name}", get(bus_info))
        .route("/stop/{name}", get(stop_info))
        .layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(handle_middleware_error))
                .timeout(config.request_timeout())
                .concurrency_limit(config.concurrency_limit),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Fastest route between two stops.
async fn route(
    State(state): State<AppState>,
    Query(query): Query<RouteQuery>,
) -> Result<Json<RoutingResult>, AppError> {
    state
        .model
        .build_route(&query.from, &query.to)
        .map(Json)
        .ok_or(AppError::NotFound)
}

/// Statistics of a bus.
async fn bus_info(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<BusInfo>, AppError> {
    state.model.bus_info(&name)?.map(Json).ok_or(AppError::NotFound)
}

/// Buses calling at a stop.
async fn stop_info(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<StopInfo>, AppError> {
    state.model.stop_info(&name).map(Json).ok_or(AppError::NotFound)
}

async fn handle_middleware_error(err: BoxError) -> (StatusCode, String) {
    if err.is::<tower::timeout::error::Elapsed>() {
        (StatusCode::REQUEST_TIMEOUT, "request timed out".to_string())
    } else {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("unhandled internal error: {err}"),
        )
    }
}
