use crate::app::dto::*;
use crate::app::engine::SimulationEngine;
use crate::domain::error::CbtcError;
use anyhow::Result;
use axum::{
    Json, Router,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Serialize;
use std::net::SocketAddr;
use tokio::task::{JoinError, spawn_blocking};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

fn api_error(status: StatusCode, msg: impl Into<String>) -> Response {
    (status, Json(ApiErrorBody { error: msg.into() })).into_response()
}

/// Domain errors are the caller's fault; anything else is ours.
fn status_for(err: &anyhow::Error) -> StatusCode {
    if err.chain().any(|cause| cause.downcast_ref::<CbtcError>().is_some()) {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

fn respond<T: Serialize>(outcome: std::result::Result<Result<T>, JoinError>) -> Response {
    match outcome {
        Ok(Ok(res)) => Json(res).into_response(),
        Ok(Err(e)) => api_error(status_for(&e), format!("{e:#}")),
        Err(e) => api_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("task join error: {e}"),
        ),
    }
}

pub fn build_router() -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/simulate", post(simulate))
        .route("/compare", post(compare))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

pub async fn serve(addr: SocketAddr) -> Result<()> {
    let app = build_router();

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "listening");
    axum::serve(listener, app).await?;
    Ok(())
}

async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

async fn simulate(Json(req): Json<SimulateRequest>) -> Response {
    respond(spawn_blocking(move || SimulationEngine::simulate(req)).await)
}

async fn compare(Json(req): Json<SimulateRequest>) -> Response {
    respond(spawn_blocking(move || SimulationEngine::compare_suite(req)).await)
}
