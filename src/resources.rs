// ABOUTME: Centralized resource container shared by every request handler
// ABOUTME: Holds the database handle, the credential manager, and the loaded configuration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 BeautyPro

//! # Server Resources
//!
//! Built once at startup and shared as `Arc<ServerResources>` through axum
//! state. Nothing here is mutated after construction.

use crate::auth::AuthManager;
use crate::config::ServerConfig;
use crate::database::Database;
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;

/// Shared server resources
#[derive(Clone)]
pub struct ServerResources {
    /// Store handle (connection pool)
    pub database: Arc<Database>,
    /// Token signing and password hashing
    pub auth_manager: Arc<AuthManager>,
    /// Loaded configuration
    pub config: Arc<ServerConfig>,
}

impl ServerResources {
    /// Assemble resources from already constructed parts
    #[must_use]
    pub fn new(database: Database, auth_manager: AuthManager, config: Arc<ServerConfig>) -> Self {
        Self {
            database: Arc::new(database),
            auth_manager: Arc::new(auth_manager),
            config,
        }
    }

    /// Open the database and build the credential manager from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or migrated, or if a
    /// signing secret cannot be generated
    pub async fn from_config(config: ServerConfig) -> Result<Self> {
        let database = Database::new(&config.database.url.to_connection_string())
            .await
            .context("Failed to initialize database")?;
        info!(database = %config.database.url, "Database initialized");

        let auth_manager = AuthManager::new(config.jwt_secret_bytes()?, config.auth.jwt_expiry_hours)
            .with_bcrypt_cost(config.auth.bcrypt_cost);

        Ok(Self::new(database, auth_manager, Arc::new(config)))
    }
}
