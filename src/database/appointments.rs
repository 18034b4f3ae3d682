// ABOUTME: Appointment storage: inserts, owner listings, single-row status writes, and slot occupancy
// ABOUTME: Defines the AppointmentStore trait the availability engine reads occupied slots through
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 BeautyPro

use super::{parse_date, parse_timestamp, parse_uuid};
use crate::errors::{AppError, AppResult};
use crate::models::{Appointment, AppointmentStatus, RescheduleProposal, SlotTime, TenantId};
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Deserialize;
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use uuid::Uuid;

/// Source of the times already taken on a professional's day
#[async_trait]
pub trait AppointmentStore: Send + Sync {
    /// Times of `owner`'s appointments on `date` that hold their slot
    async fn occupied_times(&self, owner: TenantId, date: NaiveDate) -> AppResult<Vec<SlotTime>>;
}

/// Optional listing filters
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct AppointmentFilter {
    /// Exact date
    #[serde(default, deserialize_with = "crate::models::iso_date::option::deserialize")]
    pub date: Option<NaiveDate>,
    /// Exact status
    #[serde(default)]
    pub status: Option<AppointmentStatus>,
}

/// Appointment operations
pub struct AppointmentsManager {
    pool: SqlitePool,
}

impl AppointmentsManager {
    /// Create a new appointments manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create the appointments table
    ///
    /// # Errors
    ///
    /// Returns an error if table or index creation fails
    pub async fn migrate(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS appointments (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL,
                client_name TEXT NOT NULL,
                client_phone TEXT NOT NULL,
                service_id TEXT NOT NULL,
                service_name TEXT NOT NULL,
                date TEXT NOT NULL,
                time TEXT NOT NULL,
                status TEXT NOT NULL DEFAULT 'pending',
                notes TEXT,
                reschedule_proposal TEXT,
                created_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create appointments table: {e}")))?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_appointments_user_date ON appointments(user_id, date)",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create appointments index: {e}")))?;

        Ok(())
    }

    /// Persist a new appointment
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails
    pub async fn insert(&self, appointment: &Appointment) -> AppResult<()> {
        let proposal = appointment
            .reschedule_proposal
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;

        sqlx::query(
            r"
            INSERT INTO appointments (id, user_id, client_name, client_phone, service_id,
                                      service_name, date, time, status, notes,
                                      reschedule_proposal, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            ",
        )
        .bind(appointment.id.to_string())
        .bind(appointment.user_id.to_string())
        .bind(&appointment.client_name)
        .bind(&appointment.client_phone)
        .bind(appointment.service_id.to_string())
        .bind(&appointment.service_name)
        .bind(appointment.date.to_string())
        .bind(appointment.time.as_str())
        .bind(appointment.status.as_str())
        .bind(&appointment.notes)
        .bind(proposal)
        .bind(appointment.created_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create appointment: {e}")))?;

        Ok(())
    }

    /// Load an appointment by id, whoever owns it
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or the row is corrupt
    pub async fn get(&self, id: Uuid) -> AppResult<Option<Appointment>> {
        let row = sqlx::query(
            r"
            SELECT id, user_id, client_name, client_phone, service_id, service_name,
                   date, time, status, notes, reschedule_proposal, created_at
            FROM appointments
            WHERE id = $1
            ",
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get appointment: {e}")))?;

        row.map(|r| row_to_appointment(&r)).transpose()
    }

    /// List `owner`'s appointments by date, then time, then insertion order
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row is corrupt
    pub async fn list(
        &self,
        owner: TenantId,
        filter: &AppointmentFilter,
    ) -> AppResult<Vec<Appointment>> {
        let rows = sqlx::query(
            r"
            SELECT id, user_id, client_name, client_phone, service_id, service_name,
                   date, time, status, notes, reschedule_proposal, created_at
            FROM appointments
            WHERE user_id = $1
              AND ($2 IS NULL OR date = $2)
              AND ($3 IS NULL OR status = $3)
            ORDER BY date ASC, time ASC, rowid ASC
            ",
        )
        .bind(owner.to_string())
        .bind(filter.date.map(|d| d.to_string()))
        .bind(filter.status.map(|s| s.as_str()))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list appointments: {e}")))?;

        rows.iter().map(row_to_appointment).collect()
    }

    /// Set the status, and optionally move the slot, in one write
    ///
    /// Returns `false` when no row matched `(id, owner)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails
    pub async fn update_status(
        &self,
        owner: TenantId,
        id: Uuid,
        status: AppointmentStatus,
        new_slot: Option<(NaiveDate, SlotTime)>,
    ) -> AppResult<bool> {
        let (new_date, new_time) = new_slot
            .map(|(date, time)| (date.to_string(), time.to_string()))
            .unzip();

        let result = sqlx::query(
            r"
            UPDATE appointments SET
                status = $1,
                date = COALESCE($2, date),
                time = COALESCE($3, time)
            WHERE id = $4 AND user_id = $5
            ",
        )
        .bind(status.as_str())
        .bind(new_date)
        .bind(new_time)
        .bind(id.to_string())
        .bind(owner.to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to update appointment: {e}")))?;

        Ok(result.rows_affected() > 0)
    }

    /// Store a proposal and move the appointment to `reschedule_proposed`
    ///
    /// Returns `false` when no row matched `(id, owner)`.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the update fails
    pub async fn set_reschedule_proposal(
        &self,
        owner: TenantId,
        id: Uuid,
        proposal: &RescheduleProposal,
    ) -> AppResult<bool> {
        let proposal_json = serde_json::to_string(proposal)?;

        let result = sqlx::query(
            r"
            UPDATE appointments SET status = $1, reschedule_proposal = $2
            WHERE id = $3 AND user_id = $4
            ",
        )
        .bind(AppointmentStatus::RescheduleProposed.as_str())
        .bind(proposal_json)
        .bind(id.to_string())
        .bind(owner.to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to store reschedule proposal: {e}")))?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl AppointmentStore for AppointmentsManager {
    async fn occupied_times(&self, owner: TenantId, date: NaiveDate) -> AppResult<Vec<SlotTime>> {
        let rows = sqlx::query(
            r"
            SELECT time FROM appointments
            WHERE user_id = $1 AND date = $2 AND status IN ($3, $4)
            ",
        )
        .bind(owner.to_string())
        .bind(date.to_string())
        .bind(AppointmentStatus::Pending.as_str())
        .bind(AppointmentStatus::Confirmed.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to load occupied slots: {e}")))?;

        // Rows with an unparseable time cannot collide with a grid slot
        Ok(rows
            .iter()
            .filter_map(|row| row.get::<String, _>("time").parse::<SlotTime>().ok())
            .collect())
    }
}

fn row_to_appointment(row: &SqliteRow) -> AppResult<Appointment> {
    let id: String = row.get("id");
    let user_id: String = row.get("user_id");
    let service_id: String = row.get("service_id");
    let date: String = row.get("date");
    let time: String = row.get("time");
    let status: String = row.get("status");
    let proposal: Option<String> = row.get("reschedule_proposal");
    let created_at: String = row.get("created_at");

    Ok(Appointment {
        id: parse_uuid(&id)?,
        user_id: TenantId::from_uuid(parse_uuid(&user_id)?),
        client_name: row.get("client_name"),
        client_phone: row.get("client_phone"),
        service_id: parse_uuid(&service_id)?,
        service_name: row.get("service_name"),
        date: parse_date(&date)?,
        time: time
            .parse()
            .map_err(|e| AppError::internal(format!("Invalid slot time {time}: {e}")))?,
        status: AppointmentStatus::parse(&status)
            .ok_or_else(|| AppError::internal(format!("Unknown appointment status: {status}")))?,
        notes: row.get("notes"),
        reschedule_proposal: proposal
            .map(|json| serde_json::from_str::<RescheduleProposal>(&json))
            .transpose()?,
        created_at: parse_timestamp(&created_at)?,
    })
}
