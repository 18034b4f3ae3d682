// ABOUTME: Financial ledger storage with date-range and type filters plus balance aggregation
// ABOUTME: Rows are read through StoredFinancialEntry so legacy single-service records upconvert
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 BeautyPro

use super::{parse_date, parse_timestamp, parse_uuid};
use crate::errors::{AppError, AppResult};
use crate::models::{
    BalancePeriod, BalanceSummary, EntryType, FinancialEntry, FinancialEntryInput,
    StoredFinancialEntry, TenantId,
};
use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use tracing::info;
use uuid::Uuid;

/// Optional listing filters; date bounds are inclusive
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct LedgerFilter {
    /// Earliest date included
    #[serde(default, deserialize_with = "crate::models::iso_date::option::deserialize")]
    pub start_date: Option<NaiveDate>,
    /// Latest date included
    #[serde(default, deserialize_with = "crate::models::iso_date::option::deserialize")]
    pub end_date: Option<NaiveDate>,
    /// Restrict to income or expense
    #[serde(default)]
    pub entry_type: Option<EntryType>,
}

impl From<BalancePeriod> for LedgerFilter {
    fn from(period: BalancePeriod) -> Self {
        Self {
            start_date: period.start_date,
            end_date: period.end_date,
            entry_type: None,
        }
    }
}

/// Ledger operations
pub struct LedgerManager {
    pool: SqlitePool,
}

impl LedgerManager {
    /// Create a new ledger manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create the `financial_entries` table
    ///
    /// `service_id` is the pre-multi-service column; new rows leave it null.
    ///
    /// # Errors
    ///
    /// Returns an error if table or index creation fails
    pub async fn migrate(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS financial_entries (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL,
                entry_type TEXT NOT NULL CHECK (entry_type IN ('income', 'expense')),
                description TEXT NOT NULL,
                amount TEXT NOT NULL,
                category TEXT NOT NULL,
                service_ids TEXT,
                service_id TEXT,
                date TEXT NOT NULL,
                created_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::database(format!("Failed to create financial_entries table: {e}"))
        })?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_financial_user_date ON financial_entries(user_id, date)",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create ledger index: {e}")))?;

        Ok(())
    }

    /// Record an entry for `owner`
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for a negative amount, or a database error
    pub async fn create(
        &self,
        owner: TenantId,
        input: FinancialEntryInput,
    ) -> AppResult<FinancialEntry> {
        input.validate()?;
        let entry = FinancialEntry {
            id: Uuid::new_v4(),
            user_id: owner,
            entry_type: input.entry_type,
            description: input.description,
            amount: input.amount,
            category: input.category,
            service_ids: input.service_ids.unwrap_or_default(),
            date: input.date,
            created_at: Utc::now(),
        };
        let service_ids_json = serde_json::to_string(&entry.service_ids)?;

        sqlx::query(
            r"
            INSERT INTO financial_entries (id, user_id, entry_type, description, amount,
                                           category, service_ids, date, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ",
        )
        .bind(entry.id.to_string())
        .bind(owner.to_string())
        .bind(entry.entry_type.as_str())
        .bind(&entry.description)
        .bind(entry.amount.to_string())
        .bind(&entry.category)
        .bind(service_ids_json)
        .bind(entry.date.to_string())
        .bind(entry.created_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create financial entry: {e}")))?;

        info!(
            tenant_id = %owner,
            entry_id = %entry.id,
            entry_type = entry.entry_type.as_str(),
            "Financial entry recorded"
        );
        Ok(entry)
    }

    /// List `owner`'s entries, newest date first, ties in insertion order
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row is corrupt
    pub async fn list(
        &self,
        owner: TenantId,
        filter: &LedgerFilter,
    ) -> AppResult<Vec<FinancialEntry>> {
        let rows = sqlx::query(
            r"
            SELECT id, user_id, entry_type, description, amount, category,
                   service_ids, service_id, date, created_at
            FROM financial_entries
            WHERE user_id = $1
              AND ($2 IS NULL OR date >= $2)
              AND ($3 IS NULL OR date <= $3)
              AND ($4 IS NULL OR entry_type = $4)
            ORDER BY date DESC, rowid ASC
            ",
        )
        .bind(owner.to_string())
        .bind(filter.start_date.map(|d| d.to_string()))
        .bind(filter.end_date.map(|d| d.to_string()))
        .bind(filter.entry_type.map(|t| t.as_str()))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list financial entries: {e}")))?;

        rows.iter()
            .map(|row| row_to_stored_entry(row).map(StoredFinancialEntry::upconvert))
            .collect()
    }

    /// Sum income and expenses over an inclusive period
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row is corrupt
    pub async fn balance(&self, owner: TenantId, period: BalancePeriod) -> AppResult<BalanceSummary> {
        let entries = self.list(owner, &LedgerFilter::from(period)).await?;
        Ok(BalanceSummary::from_entries(&entries, period))
    }
}

fn row_to_stored_entry(row: &SqliteRow) -> AppResult<StoredFinancialEntry> {
    let id: String = row.get("id");
    let user_id: String = row.get("user_id");
    let entry_type: String = row.get("entry_type");
    let amount: String = row.get("amount");
    let service_ids: Option<String> = row.get("service_ids");
    let date: String = row.get("date");
    let created_at: String = row.get("created_at");

    Ok(StoredFinancialEntry {
        id: parse_uuid(&id)?,
        user_id: TenantId::from_uuid(parse_uuid(&user_id)?),
        entry_type: EntryType::parse(&entry_type)
            .ok_or_else(|| AppError::internal(format!("Unknown entry type: {entry_type}")))?,
        description: row.get("description"),
        amount: amount
            .parse::<Decimal>()
            .map_err(|e| AppError::internal(format!("Invalid amount {amount}: {e}")))?,
        category: row.get("category"),
        service_ids: service_ids
            .map(|json| serde_json::from_str::<Vec<String>>(&json))
            .transpose()?,
        service_id: row.get("service_id"),
        date: parse_date(&date)?,
        created_at: parse_timestamp(&created_at)?,
    })
}
