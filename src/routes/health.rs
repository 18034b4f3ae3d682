// ABOUTME: Health check route handlers for liveness and readiness probes
// ABOUTME: Root and /api/ liveness bodies plus a database-backed readiness check
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 BeautyPro

//! Health check routes
//!
//! `GET /` and `GET /api/` answer without touching the store.
//! `GET /api/health/ready` pings the database and answers 503 when it is
//! unreachable.

use crate::constants::{defaults, messages};
use crate::resources::ServerResources;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;

/// Liveness body
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Always `"healthy"`
    pub status: &'static str,
    /// Service banner
    pub message: &'static str,
    /// API version, omitted on the bare root
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<&'static str>,
}

/// Health routes implementation
pub struct HealthRoutes;

impl HealthRoutes {
    /// Create all health check routes (absolute paths, merged at the top level)
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/", get(Self::handle_root))
            .route("/api/", get(Self::handle_api_root))
            .route("/api/health/ready", get(Self::handle_ready))
            .with_state(resources)
    }

    async fn handle_root() -> Json<HealthResponse> {
        Json(HealthResponse {
            status: "healthy",
            message: messages::API_RUNNING,
            version: None,
        })
    }

    async fn handle_api_root() -> Json<HealthResponse> {
        Json(HealthResponse {
            status: "healthy",
            message: messages::API_RUNNING,
            version: Some(defaults::API_VERSION),
        })
    }

    async fn handle_ready(State(resources): State<Arc<ServerResources>>) -> Response {
        match resources.database.ping().await {
            Ok(()) => (
                StatusCode::OK,
                Json(serde_json::json!({
                    "status": "ready",
                    "timestamp": chrono::Utc::now().to_rfc3339()
                })),
            )
                .into_response(),
            Err(e) => {
                tracing::warn!(error = %e, "Readiness check failed");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    Json(serde_json::json!({ "status": "unavailable" })),
                )
                    .into_response()
            }
        }
    }
}
