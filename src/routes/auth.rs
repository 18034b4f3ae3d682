// ABOUTME: Registration and login route handlers
// ABOUTME: Thin wrappers that delegate to the identity service and return the token response
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 BeautyPro

//! Authentication routes
//!
//! Both endpoints answer `{access_token, token_type: "bearer", user}`.

use super::extract::AppJson;
use crate::errors::AppError;
use crate::resources::ServerResources;
use crate::services::identity::{self, LoginRequest, RegisterRequest};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use std::sync::Arc;

/// Authentication routes implementation
pub struct AuthRoutes;

impl AuthRoutes {
    /// Create registration and login routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/auth/register", post(Self::handle_register))
            .route("/auth/login", post(Self::handle_login))
            .with_state(resources)
    }

    /// Handle POST /auth/register
    async fn handle_register(
        State(resources): State<Arc<ServerResources>>,
        AppJson(request): AppJson<RegisterRequest>,
    ) -> Result<Response, AppError> {
        let response =
            identity::register(&resources.database, &resources.auth_manager, request).await?;
        Ok((StatusCode::OK, Json(response)).into_response())
    }

    /// Handle POST /auth/login
    async fn handle_login(
        State(resources): State<Arc<ServerResources>>,
        AppJson(request): AppJson<LoginRequest>,
    ) -> Result<Response, AppError> {
        let response =
            identity::login(&resources.database, &resources.auth_manager, request).await?;
        Ok((StatusCode::OK, Json(response)).into_response())
    }
}
