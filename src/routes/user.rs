// ABOUTME: Profile route for the authenticated professional
// ABOUTME: Returns the caller's profile without the password hash
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 BeautyPro

use crate::errors::AppError;
use crate::middleware::authenticate;
use crate::models::UserProfile;
use crate::resources::ServerResources;
use axum::{extract::State, http::HeaderMap, routing::get, Json, Router};
use std::sync::Arc;

/// Profile routes implementation
pub struct UserRoutes;

impl UserRoutes {
    /// Create profile routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/user/profile", get(Self::handle_profile))
            .with_state(resources)
    }

    /// Handle GET /user/profile
    async fn handle_profile(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Json<UserProfile>, AppError> {
        let user = authenticate(&headers, &resources).await?;
        Ok(Json(UserProfile::from(user)))
    }
}
