// ABOUTME: Catalog storage for a professional's services and products
// ABOUTME: Create, list, full replace, and delete, each scoped to the owning tenant
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 BeautyPro

use super::{parse_timestamp, parse_uuid};
use crate::constants::messages;
use crate::errors::{AppError, AppResult};
use crate::models::{ensure_owned, Service, ServiceCategory, ServiceInput, TenantId};
use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use tracing::info;
use uuid::Uuid;

/// Catalog operations
pub struct CatalogManager {
    pool: SqlitePool,
}

impl CatalogManager {
    /// Create a new catalog manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create the services table
    ///
    /// # Errors
    ///
    /// Returns an error if table or index creation fails
    pub async fn migrate(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS services (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL,
                name TEXT NOT NULL,
                description TEXT,
                price TEXT NOT NULL,
                duration_minutes INTEGER NOT NULL DEFAULT 0,
                category TEXT NOT NULL CHECK (category IN ('service', 'product')),
                stock_quantity INTEGER,
                created_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create services table: {e}")))?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_services_user_id ON services(user_id)")
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to create services index: {e}")))?;

        Ok(())
    }

    /// Add a catalog entry for `owner`
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for a negative price or duration, or a database error
    pub async fn create(&self, owner: TenantId, input: ServiceInput) -> AppResult<Service> {
        let duration_minutes = input.validate()?;
        let service = Service {
            id: Uuid::new_v4(),
            user_id: owner,
            name: input.name,
            description: input.description,
            price: input.price,
            duration_minutes,
            category: input.category,
            stock_quantity: input.stock_quantity,
            created_at: Utc::now(),
        };

        sqlx::query(
            r"
            INSERT INTO services (id, user_id, name, description, price, duration_minutes,
                                  category, stock_quantity, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ",
        )
        .bind(service.id.to_string())
        .bind(owner.to_string())
        .bind(&service.name)
        .bind(&service.description)
        .bind(service.price.to_string())
        .bind(i64::from(service.duration_minutes))
        .bind(service.category.as_str())
        .bind(service.stock_quantity)
        .bind(service.created_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create service: {e}")))?;

        info!(tenant_id = %owner, service_id = %service.id, "Service created");
        Ok(service)
    }

    /// List `owner`'s catalog in insertion order
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn list(&self, owner: TenantId) -> AppResult<Vec<Service>> {
        let rows = sqlx::query(
            r"
            SELECT id, user_id, name, description, price, duration_minutes, category,
                   stock_quantity, created_at
            FROM services
            WHERE user_id = $1
            ORDER BY rowid ASC
            ",
        )
        .bind(owner.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list services: {e}")))?;

        rows.iter().map(row_to_service).collect()
    }

    /// List `owner`'s catalog restricted to one category
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn list_by_category(
        &self,
        owner: TenantId,
        category: ServiceCategory,
    ) -> AppResult<Vec<Service>> {
        let rows = sqlx::query(
            r"
            SELECT id, user_id, name, description, price, duration_minutes, category,
                   stock_quantity, created_at
            FROM services
            WHERE user_id = $1 AND category = $2
            ORDER BY rowid ASC
            ",
        )
        .bind(owner.to_string())
        .bind(category.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list services: {e}")))?;

        rows.iter().map(row_to_service).collect()
    }

    /// Load a catalog entry by id, whoever owns it
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn get(&self, id: Uuid) -> AppResult<Option<Service>> {
        let row = sqlx::query(
            r"
            SELECT id, user_id, name, description, price, duration_minutes, category,
                   stock_quantity, created_at
            FROM services
            WHERE id = $1
            ",
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get service: {e}")))?;

        row.map(|r| row_to_service(&r)).transpose()
    }

    /// Load a catalog entry `owner` is allowed to modify
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` for an unknown id and `PermissionDenied` for
    /// another tenant's entry
    pub async fn get_owned(&self, owner: TenantId, id: Uuid) -> AppResult<Service> {
        let service = self
            .get(id)
            .await?
            .ok_or_else(|| AppError::not_found(messages::SERVICE_NOT_FOUND))?;
        ensure_owned(service, owner)
    }

    /// Overwrite every mutable field of an owned entry
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput`, `ResourceNotFound`, `PermissionDenied`, or a database error
    pub async fn replace(
        &self,
        owner: TenantId,
        id: Uuid,
        input: ServiceInput,
    ) -> AppResult<Service> {
        let duration_minutes = input.validate()?;
        let existing = self.get_owned(owner, id).await?;

        let updated = Service {
            name: input.name,
            description: input.description,
            price: input.price,
            duration_minutes,
            category: input.category,
            stock_quantity: input.stock_quantity,
            ..existing
        };

        let result = sqlx::query(
            r"
            UPDATE services SET
                name = $1, description = $2, price = $3, duration_minutes = $4,
                category = $5, stock_quantity = $6
            WHERE id = $7 AND user_id = $8
            ",
        )
        .bind(&updated.name)
        .bind(&updated.description)
        .bind(updated.price.to_string())
        .bind(i64::from(updated.duration_minutes))
        .bind(updated.category.as_str())
        .bind(updated.stock_quantity)
        .bind(id.to_string())
        .bind(owner.to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to update service: {e}")))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(messages::SERVICE_NOT_FOUND));
        }

        info!(tenant_id = %owner, service_id = %id, "Service replaced");
        Ok(updated)
    }

    /// Remove an owned entry
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound`, `PermissionDenied`, or a database error
    pub async fn delete(&self, owner: TenantId, id: Uuid) -> AppResult<()> {
        self.get_owned(owner, id).await?;

        let result = sqlx::query("DELETE FROM services WHERE id = $1 AND user_id = $2")
            .bind(id.to_string())
            .bind(owner.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to delete service: {e}")))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(messages::SERVICE_NOT_FOUND));
        }

        info!(tenant_id = %owner, service_id = %id, "Service deleted");
        Ok(())
    }
}

fn row_to_service(row: &SqliteRow) -> AppResult<Service> {
    let id: String = row.get("id");
    let user_id: String = row.get("user_id");
    let price: String = row.get("price");
    let duration_minutes: i64 = row.get("duration_minutes");
    let category: String = row.get("category");
    let created_at: String = row.get("created_at");

    Ok(Service {
        id: parse_uuid(&id)?,
        user_id: TenantId::from_uuid(parse_uuid(&user_id)?),
        name: row.get("name"),
        description: row.get("description"),
        price: price
            .parse::<Decimal>()
            .map_err(|e| AppError::internal(format!("Invalid price {price}: {e}")))?,
        duration_minutes: u32::try_from(duration_minutes)
            .map_err(|e| AppError::internal(format!("Invalid duration: {e}")))?,
        category: ServiceCategory::parse(&category),
        stock_quantity: row.get("stock_quantity"),
        created_at: parse_timestamp(&created_at)?,
    })
}
