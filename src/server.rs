// ABOUTME: HTTP server assembly: router, middleware stack, and graceful shutdown
// ABOUTME: Binds the configured address and closes the database after the last request drains
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 BeautyPro

//! # HTTP Server
//!
//! Layer order, outermost first: CORS, timeout, request tracing, request id.
//! Domain routes live under `/api`; liveness also answers on `/`.

use crate::middleware::{make_request_span, record_response, request_id_middleware, setup_cors};
use crate::resources::ServerResources;
use crate::routes::{self, HealthRoutes};
use anyhow::{Context, Result};
use axum::http::StatusCode;
use axum::Router;
use std::sync::Arc;
use std::time::Duration;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

/// Upper bound on a single request, including bcrypt work
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Build the complete application router
pub fn build_router(resources: &Arc<ServerResources>) -> Router {
    Router::new()
        .nest("/api", routes::api_routes(resources))
        .merge(HealthRoutes::routes(Arc::clone(resources)))
        .layer(axum::middleware::from_fn(request_id_middleware))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(make_request_span)
                .on_response(record_response),
        )
        .layer(timeout_layer(REQUEST_TIMEOUT))
        .layer(setup_cors(&resources.config))
}

/// Requests still running after `timeout` answer 408
fn timeout_layer(timeout: Duration) -> TimeoutLayer {
    TimeoutLayer::with_status_code(StatusCode::REQUEST_TIMEOUT, timeout)
}

/// Serve until Ctrl+C or SIGTERM, then close the database
///
/// # Errors
///
/// Returns an error if the address cannot be bound or the server fails
pub async fn run(resources: Arc<ServerResources>) -> Result<()> {
    let addr = resources.config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {addr}"))?;

    info!("BeautyPro API listening on http://{addr}");

    axum::serve(listener, build_router(&resources))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    resources.database.close().await;
    info!("Server stopped");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown");
}
