// ABOUTME: Catalog route handlers for the caller's services and products
// ABOUTME: Create, list, full replace, and delete, all scoped to the authenticated professional
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 BeautyPro

//! Catalog routes
//!
//! A service id that is malformed, unknown, or owned by someone else answers
//! the same 404 ("Serviço não encontrado").

use super::extract::AppJson;
use crate::constants::messages;
use crate::errors::AppError;
use crate::middleware::authenticate;
use crate::models::ServiceInput;
use crate::resources::ServerResources;
use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, put},
    Json, Router,
};
use std::sync::Arc;
use uuid::Uuid;

/// Catalog routes implementation
pub struct CatalogRoutes;

impl CatalogRoutes {
    /// Create catalog routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/services",
                get(Self::handle_list).post(Self::handle_create),
            )
            .route(
                "/services/:id",
                put(Self::handle_replace).delete(Self::handle_delete),
            )
            .with_state(resources)
    }

    fn parse_service_id(id: &str) -> Result<Uuid, AppError> {
        Uuid::parse_str(id).map_err(|_| AppError::not_found(messages::SERVICE_NOT_FOUND))
    }

    /// Handle POST /services
    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        AppJson(input): AppJson<ServiceInput>,
    ) -> Result<Response, AppError> {
        let user = authenticate(&headers, &resources).await?;
        let service = resources.database.catalog().create(user.id, input).await?;
        Ok((StatusCode::OK, Json(service)).into_response())
    }

    /// Handle GET /services
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let user = authenticate(&headers, &resources).await?;
        let services = resources.database.catalog().list(user.id).await?;
        Ok((StatusCode::OK, Json(services)).into_response())
    }

    /// Handle PUT /services/:id
    async fn handle_replace(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<String>,
        AppJson(input): AppJson<ServiceInput>,
    ) -> Result<Response, AppError> {
        let user = authenticate(&headers, &resources).await?;
        let id = Self::parse_service_id(&id)?;
        let service = resources
            .database
            .catalog()
            .replace(user.id, id, input)
            .await
            .map_err(|e| e.forbidden_as_not_found(messages::SERVICE_NOT_FOUND))?;
        Ok((StatusCode::OK, Json(service)).into_response())
    }

    /// Handle DELETE /services/:id
    async fn handle_delete(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<String>,
    ) -> Result<Response, AppError> {
        let user = authenticate(&headers, &resources).await?;
        let id = Self::parse_service_id(&id)?;
        resources
            .database
            .catalog()
            .delete(user.id, id)
            .await
            .map_err(|e| e.forbidden_as_not_found(messages::SERVICE_NOT_FOUND))?;
        Ok((
            StatusCode::OK,
            Json(serde_json::json!({ "message": messages::SERVICE_DELETED })),
        )
            .into_response())
    }
}
