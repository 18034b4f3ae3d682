// ABOUTME: Public booking page routes that require no authentication
// ABOUTME: Professional card with bookable services and free slots for a date
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 BeautyPro

use super::extract::AppQuery;
use crate::constants::messages;
use crate::errors::AppError;
use crate::models::{SlotTime, TenantId};
use crate::resources::ServerResources;
use crate::services::availability;
use crate::services::booking::{self, BookingPage};
use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Query for the free-slot lookup
#[derive(Debug, Deserialize)]
pub struct AvailableTimesQuery {
    /// Date to look up (YYYY-MM-DD)
    #[serde(deserialize_with = "crate::models::iso_date::deserialize")]
    pub date: NaiveDate,
}

/// Free slots, in grid order
#[derive(Debug, Serialize)]
pub struct AvailableTimesResponse {
    /// Slot labels ("HH:MM")
    pub available_times: Vec<SlotTime>,
}

/// Public booking routes implementation
pub struct PublicRoutes;

impl PublicRoutes {
    /// Create public booking routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/public/professional/:user_id", get(Self::handle_professional))
            .route(
                "/public/available-times/:user_id",
                get(Self::handle_available_times),
            )
            .with_state(resources)
    }

    /// Handle GET /public/professional/:user_id
    async fn handle_professional(
        State(resources): State<Arc<ServerResources>>,
        Path(user_id): Path<String>,
    ) -> Result<Json<BookingPage>, AppError> {
        let professional_id = user_id
            .parse::<TenantId>()
            .map_err(|_| AppError::not_found(messages::PROFESSIONAL_NOT_FOUND))?;
        let page = booking::booking_page(&resources.database, professional_id).await?;
        Ok(Json(page))
    }

    /// Handle GET /public/available-times/:user_id?date=YYYY-MM-DD
    ///
    /// An id that is not a UUID cannot own appointments, so it sees the full grid.
    async fn handle_available_times(
        State(resources): State<Arc<ServerResources>>,
        Path(user_id): Path<String>,
        AppQuery(query): AppQuery<AvailableTimesQuery>,
    ) -> Result<Json<AvailableTimesResponse>, AppError> {
        let available_times = match user_id.parse::<TenantId>() {
            Ok(professional_id) => {
                booking::available_times(&resources.database, professional_id, query.date).await?
            }
            Err(_) => availability::slot_grid(),
        };
        Ok(Json(AvailableTimesResponse { available_times }))
    }
}
