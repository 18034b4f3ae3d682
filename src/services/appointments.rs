// ABOUTME: Appointment state machine: public creation, owner listing, status changes, proposals
// ABOUTME: Mutations load the row, check ownership explicitly, then write filtered by owner
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 BeautyPro

//! Appointment lifecycle
//!
//! ```text
//! pending ──► confirmed | rejected | rescheduled      (owner status change)
//!    │
//!    └──────► reschedule_proposed                      (owner proposal)
//! ```
//!
//! Status changes carry no transition guard: any state may be set to any of
//! `confirmed`, `rejected` or `rescheduled`. Slot exclusivity is not enforced
//! at creation either; a request for a held slot is logged and accepted.

use crate::constants::messages;
use crate::database::{AppointmentFilter, AppointmentStore, Database};
use crate::errors::{AppError, AppResult};
use crate::models::{
    ensure_owned, Appointment, AppointmentRequest, AppointmentStatus, RescheduleProposal,
    ServiceCategory, StatusChange, TenantId,
};
use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

/// An appointment after a proposal was stored, with the text to relay to the client
#[derive(Debug, Clone)]
pub struct ProposalOutcome {
    /// The appointment in `reschedule_proposed` state
    pub appointment: Appointment,
    /// Message for the professional to forward (e.g. over `WhatsApp`)
    pub notification: String,
}

/// Create a `pending` appointment on behalf of an unauthenticated client
///
/// # Errors
///
/// Returns `ResourceNotFound` when the professional is unknown, or when the
/// service is unknown or belongs to someone else
#[tracing::instrument(skip_all, fields(tenant_id = %professional_id))]
pub async fn create_appointment(
    database: &Database,
    professional_id: TenantId,
    request: AppointmentRequest,
) -> AppResult<Appointment> {
    database
        .users()
        .get(professional_id)
        .await?
        .ok_or_else(|| AppError::not_found(messages::PROFESSIONAL_NOT_FOUND))?;

    let service_id = Uuid::parse_str(&request.service_id)
        .map_err(|_| AppError::not_found(messages::SERVICE_NOT_FOUND))?;
    let service = database
        .catalog()
        .get(service_id)
        .await?
        .filter(|service| service.user_id == professional_id)
        .ok_or_else(|| AppError::not_found(messages::SERVICE_NOT_FOUND))?;

    if service.category == ServiceCategory::Product {
        warn!(service_id = %service.id, "Appointment requested for a product entry");
    }

    let store = database.appointments();
    let occupied = store.occupied_times(professional_id, request.date).await?;
    if occupied.contains(&request.time) {
        warn!(
            date = %request.date,
            time = %request.time,
            "Appointment requested for a slot that is already held"
        );
    }

    let appointment = Appointment {
        id: Uuid::new_v4(),
        user_id: professional_id,
        client_name: request.client_name,
        client_phone: request.client_phone,
        service_id: service.id,
        service_name: service.name,
        date: request.date,
        time: request.time,
        status: AppointmentStatus::Pending,
        notes: request.notes,
        reschedule_proposal: None,
        created_at: Utc::now(),
    };
    store.insert(&appointment).await?;

    info!(
        appointment_id = %appointment.id,
        date = %appointment.date,
        time = %appointment.time,
        "Appointment requested"
    );
    Ok(appointment)
}

/// List the caller's appointments
///
/// # Errors
///
/// Returns an error if the store cannot be read
pub async fn list_appointments(
    database: &Database,
    owner: TenantId,
    filter: &AppointmentFilter,
) -> AppResult<Vec<Appointment>> {
    database.appointments().list(owner, filter).await
}

/// Load an appointment the caller is allowed to modify
///
/// # Errors
///
/// Returns `ResourceNotFound` for an unknown id and `PermissionDenied` for a
/// row owned by another professional
pub async fn load_owned(database: &Database, owner: TenantId, id: Uuid) -> AppResult<Appointment> {
    let appointment = database
        .appointments()
        .get(id)
        .await?
        .ok_or_else(|| AppError::not_found(messages::APPOINTMENT_NOT_FOUND))?;
    ensure_owned(appointment, owner)
}

/// Apply a professional's status change
///
/// With `rescheduled` and both `new_date` and `new_time`, the appointment is
/// moved in the same write.
///
/// # Errors
///
/// Returns `ResourceNotFound`, `PermissionDenied`, or a database error
#[tracing::instrument(skip_all, fields(tenant_id = %owner, appointment_id = %id))]
pub async fn update_status(
    database: &Database,
    owner: TenantId,
    id: Uuid,
    change: &StatusChange,
) -> AppResult<Appointment> {
    let mut appointment = load_owned(database, owner, id).await?;
    let status = AppointmentStatus::from(change.status);
    let new_slot = change.new_slot();

    let updated = database
        .appointments()
        .update_status(owner, id, status, new_slot.clone())
        .await?;
    if !updated {
        return Err(AppError::not_found(messages::APPOINTMENT_NOT_FOUND));
    }

    info!(
        from = appointment.status.as_str(),
        to = status.as_str(),
        moved = new_slot.is_some(),
        "Appointment status changed"
    );

    appointment.status = status;
    if let Some((date, time)) = new_slot {
        appointment.date = date;
        appointment.time = time;
    }
    Ok(appointment)
}

/// Store a reschedule proposal and compose the client notification
///
/// Proposed dates and times are kept verbatim and never checked against the
/// grid or the calendar.
///
/// # Errors
///
/// Returns `ResourceNotFound`, `PermissionDenied`, or a database error
#[tracing::instrument(skip_all, fields(tenant_id = %owner, appointment_id = %id))]
pub async fn propose_reschedule(
    database: &Database,
    owner: TenantId,
    id: Uuid,
    proposal: RescheduleProposal,
) -> AppResult<ProposalOutcome> {
    let mut appointment = load_owned(database, owner, id).await?;

    let stored = database
        .appointments()
        .set_reschedule_proposal(owner, id, &proposal)
        .await?;
    if !stored {
        return Err(AppError::not_found(messages::APPOINTMENT_NOT_FOUND));
    }

    info!(options = proposal.options.len(), "Reschedule proposed");

    let notification = proposal.notification_text(&appointment.client_name);
    appointment.status = AppointmentStatus::RescheduleProposed;
    appointment.reschedule_proposal = Some(proposal);

    Ok(ProposalOutcome {
        appointment,
        notification,
    })
}
