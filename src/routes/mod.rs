// ABOUTME: Route module organization for the BeautyPro HTTP API
// ABOUTME: Route structs per domain plus the assembled /api router
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 BeautyPro

//! Route module for the BeautyPro API
//!
//! Each domain module contains only route definitions and thin handlers that
//! delegate to the service layer or a database manager.

/// Appointment booking requests and owner lifecycle changes
pub mod appointments;
/// Registration and login
pub mod auth;
/// Catalog (services and products) CRUD
pub mod catalog;
/// Extractors whose rejections render as the API error body
pub mod extract;
/// Ledger entries and balances
pub mod financial;
/// Liveness and readiness
pub mod health;
/// Public booking page
pub mod public;
/// Caller profile
pub mod user;

pub use appointments::AppointmentRoutes;
pub use auth::AuthRoutes;
pub use catalog::CatalogRoutes;
pub use financial::FinancialRoutes;
pub use health::HealthRoutes;
pub use public::PublicRoutes;
pub use user::UserRoutes;

use crate::resources::ServerResources;
use axum::Router;
use std::sync::Arc;

/// All domain routes, relative to the `/api` prefix
pub fn api_routes(resources: &Arc<ServerResources>) -> Router {
    Router::new()
        .merge(AuthRoutes::routes(Arc::clone(resources)))
        .merge(UserRoutes::routes(Arc::clone(resources)))
        .merge(CatalogRoutes::routes(Arc::clone(resources)))
        .merge(FinancialRoutes::routes(Arc::clone(resources)))
        .merge(AppointmentRoutes::routes(Arc::clone(resources)))
        .merge(PublicRoutes::routes(Arc::clone(resources)))
}
