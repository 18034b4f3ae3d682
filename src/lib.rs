// ABOUTME: Main library entry point for the BeautyPro scheduling and bookkeeping API
// ABOUTME: Wires identity, catalog, ledger, appointments, and the public booking page over HTTP
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 BeautyPro

#![deny(unsafe_code)]

//! # BeautyPro Server
//!
//! Multi-tenant backend for independent beauty professionals. Each registered
//! professional is a tenant owning a catalog of services and products, a
//! financial ledger, and a calendar of appointments. Clients book through a
//! public page without an account; the professional confirms, rejects, moves,
//! or proposes new times from the authenticated side.
//!
//! ## Architecture
//!
//! - **routes**: axum handlers, one route struct per domain
//! - **services**: appointment lifecycle, availability grid, booking facade, identity
//! - **database**: `SQLite` managers, one per table
//! - **auth**: HS256 tokens and bcrypt password hashes
//! - **config** / **logging**: environment-driven configuration and tracing setup
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use beautypro_server::config::ServerConfig;
//! use beautypro_server::resources::ServerResources;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::from_env()?;
//!     let resources = Arc::new(ServerResources::from_config(config).await?);
//!     beautypro_server::server::run(resources).await
//! }
//! ```

pub use beautypro_core::{constants, errors, models};

/// Token signing and password hashing
pub mod auth;
/// Environment-driven configuration
pub mod config;
/// `SQLite` storage managers
pub mod database;
/// Structured logging setup
pub mod logging;
/// HTTP middleware for tracing, authentication, and CORS
pub mod middleware;
/// Shared resources injected into handlers
pub mod resources;
/// HTTP route handlers
pub mod routes;
/// Router assembly and server lifecycle
pub mod server;
/// Domain services behind the HTTP handlers
pub mod services;
