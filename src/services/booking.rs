// ABOUTME: Public booking facade used by the unauthenticated booking page
// ABOUTME: Professional card with bookable services, free slots, and appointment requests
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 BeautyPro

use super::{appointments, availability};
use crate::constants::messages;
use crate::database::Database;
use crate::errors::{AppError, AppResult};
use crate::models::{
    Appointment, AppointmentRequest, ProfessionalCard, Service, ServiceCategory, SlotTime,
    TenantId,
};
use chrono::NaiveDate;
use serde::Serialize;

/// What a client sees when opening a professional's booking link
#[derive(Debug, Clone, Serialize)]
pub struct BookingPage {
    /// Public contact details (no email, no credentials)
    pub professional: ProfessionalCard,
    /// Bookable services; products are not listed
    pub services: Vec<Service>,
}

/// Load the booking page for a professional
///
/// # Errors
///
/// Returns `ResourceNotFound` if the professional does not exist
pub async fn booking_page(database: &Database, professional_id: TenantId) -> AppResult<BookingPage> {
    let professional = database
        .users()
        .get(professional_id)
        .await?
        .ok_or_else(|| AppError::not_found(messages::PROFESSIONAL_NOT_FOUND))?;

    let services = database
        .catalog()
        .list_by_category(professional_id, ServiceCategory::Service)
        .await?;

    Ok(BookingPage {
        professional: ProfessionalCard::from(professional),
        services,
    })
}

/// Free slots for a professional on a date
///
/// # Errors
///
/// Returns an error if the store cannot be read
pub async fn available_times(
    database: &Database,
    professional_id: TenantId,
    date: NaiveDate,
) -> AppResult<Vec<SlotTime>> {
    availability::available_times(&database.appointments(), professional_id, date).await
}

/// Submit a booking request
///
/// # Errors
///
/// See [`appointments::create_appointment`]
pub async fn request_appointment(
    database: &Database,
    professional_id: TenantId,
    request: AppointmentRequest,
) -> AppResult<Appointment> {
    appointments::create_appointment(database, professional_id, request).await
}
