// ABOUTME: SQLite persistence layer: connection pool, schema migration, and per-entity managers
// ABOUTME: Database is the injected store handle shared through ServerResources
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 BeautyPro

//! # Database Management
//!
//! One table per entity, keyed by caller-assigned UUID text. Every owned row
//! carries a `user_id` column and every query a professional can reach is
//! filtered by it. Insertion order is the implicit `rowid`.

/// Appointment storage and slot occupancy
pub mod appointments;
/// Catalog (services and products) storage
pub mod catalog;
/// Financial ledger storage
pub mod ledger;
/// Professional accounts
pub mod users;

pub use appointments::{AppointmentFilter, AppointmentStore, AppointmentsManager};
pub use catalog::CatalogManager;
pub use ledger::{LedgerFilter, LedgerManager};
pub use users::UsersManager;

use crate::errors::{AppError, AppResult};
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use std::path::Path;
use tracing::info;
use uuid::Uuid;

/// Database manager owning the `SQLite` connection pool
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open the database and create the schema if needed
    ///
    /// `sqlite::memory:` uses a single long-lived connection so every query
    /// sees the same in-memory database.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection or the migration fails
    pub async fn new(database_url: &str) -> AppResult<Self> {
        let pool = if database_url.contains(":memory:") {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .connect(database_url)
                .await
        } else {
            ensure_parent_dir(database_url)?;
            // Ensure SQLite creates the database file if it doesn't exist
            SqlitePoolOptions::new()
                .connect(&format!("{database_url}?mode=rwc"))
                .await
        }
        .map_err(|e| AppError::database(format!("Failed to connect to database: {e}")))?;

        let db = Self { pool };
        db.migrate().await?;
        info!("Database ready at {}", database_url);
        Ok(db)
    }

    /// Get a reference to the database pool
    #[must_use]
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Professional accounts
    #[must_use]
    pub fn users(&self) -> UsersManager {
        UsersManager::new(self.pool.clone())
    }

    /// Catalog entries
    #[must_use]
    pub fn catalog(&self) -> CatalogManager {
        CatalogManager::new(self.pool.clone())
    }

    /// Ledger entries
    #[must_use]
    pub fn ledger(&self) -> LedgerManager {
        LedgerManager::new(self.pool.clone())
    }

    /// Appointments
    #[must_use]
    pub fn appointments(&self) -> AppointmentsManager {
        AppointmentsManager::new(self.pool.clone())
    }

    /// Create all tables and indexes (idempotent)
    ///
    /// # Errors
    ///
    /// Returns an error if any DDL statement fails
    pub async fn migrate(&self) -> AppResult<()> {
        self.users().migrate().await?;
        self.catalog().migrate().await?;
        self.ledger().migrate().await?;
        self.appointments().migrate().await?;
        Ok(())
    }

    /// Round-trip a trivial query for readiness checks
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be reached
    pub async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Database ping failed: {e}")))?;
        Ok(())
    }

    /// Close every pooled connection
    pub async fn close(&self) {
        self.pool.close().await;
        info!("Database connections closed");
    }
}

/// Create the directory holding a file database
fn ensure_parent_dir(database_url: &str) -> AppResult<()> {
    let path = database_url.strip_prefix("sqlite:").unwrap_or(database_url);
    let path = path.strip_prefix("//").unwrap_or(path);
    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| {
                AppError::database(format!(
                    "Failed to create database directory {}: {e}",
                    parent.display()
                ))
            })?;
        }
    }
    Ok(())
}

fn parse_uuid(value: &str) -> AppResult<Uuid> {
    Uuid::parse_str(value).map_err(|e| AppError::internal(format!("Invalid UUID: {e}")))
}

fn parse_timestamp(value: &str) -> AppResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| AppError::internal(format!("Invalid datetime: {e}")))
}

fn parse_date(value: &str) -> AppResult<NaiveDate> {
    value
        .parse()
        .map_err(|e| AppError::internal(format!("Invalid date {value}: {e}")))
}
