// ABOUTME: Appointment route handlers: public booking requests and owner-side lifecycle changes
// ABOUTME: Listing, status updates, and reschedule proposals for the authenticated professional
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 BeautyPro

//! Appointment routes
//!
//! Owner routes answer a foreign appointment exactly like an unknown one:
//! 404 with "Agendamento não encontrado".

use super::extract::{AppJson, AppQuery};
use crate::constants::messages;
use crate::database::AppointmentFilter;
use crate::errors::AppError;
use crate::middleware::authenticate;
use crate::models::{
    Appointment, AppointmentRequest, RescheduleProposal, RescheduleProposalForm, StatusChange,
    TenantId,
};
use crate::resources::ServerResources;
use crate::services::{appointments, booking};
use axum::{
    extract::{Path, State},
    http::HeaderMap,
    routing::{get, post, put},
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

/// Acknowledgement carrying the affected appointment
#[derive(Debug, Serialize)]
pub struct AppointmentAck {
    /// Portuguese confirmation text
    pub message: String,
    /// The appointment after the operation
    pub appointment: Appointment,
}

/// Response to a reschedule proposal
#[derive(Debug, Serialize)]
pub struct ProposalAck {
    /// Portuguese confirmation text
    pub message: String,
    /// Ready-to-send text for the client
    pub whatsapp_message: String,
    /// The appointment in `reschedule_proposed` state
    pub appointment: Appointment,
}

/// Appointment routes implementation
pub struct AppointmentRoutes;

impl AppointmentRoutes {
    /// Create appointment routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/appointments", get(Self::handle_list))
            .route("/appointments/public/:user_id", post(Self::handle_public_create))
            .route("/appointments/:id", put(Self::handle_update_status))
            .route(
                "/appointments/:id/propose-reschedule",
                post(Self::handle_propose_reschedule),
            )
            .with_state(resources)
    }

    fn parse_appointment_id(id: &str) -> Result<Uuid, AppError> {
        Uuid::parse_str(id).map_err(|_| AppError::not_found(messages::APPOINTMENT_NOT_FOUND))
    }

    /// Handle POST /appointments/public/:user_id (no authentication)
    async fn handle_public_create(
        State(resources): State<Arc<ServerResources>>,
        Path(user_id): Path<String>,
        AppJson(request): AppJson<AppointmentRequest>,
    ) -> Result<Json<AppointmentAck>, AppError> {
        let professional_id = user_id
            .parse::<TenantId>()
            .map_err(|_| AppError::not_found(messages::PROFESSIONAL_NOT_FOUND))?;
        let appointment =
            booking::request_appointment(&resources.database, professional_id, request).await?;

        Ok(Json(AppointmentAck {
            message: messages::APPOINTMENT_REQUESTED.to_owned(),
            appointment,
        }))
    }

    /// Handle GET /appointments?date=&status=
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        AppQuery(filter): AppQuery<AppointmentFilter>,
    ) -> Result<Json<Vec<Appointment>>, AppError> {
        let user = authenticate(&headers, &resources).await?;
        let appointments =
            appointments::list_appointments(&resources.database, user.id, &filter).await?;
        Ok(Json(appointments))
    }

    /// Handle PUT /appointments/:id
    async fn handle_update_status(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<String>,
        AppJson(change): AppJson<StatusChange>,
    ) -> Result<Json<AppointmentAck>, AppError> {
        let user = authenticate(&headers, &resources).await?;
        let id = Self::parse_appointment_id(&id)?;
        let appointment = appointments::update_status(&resources.database, user.id, id, &change)
            .await
            .map_err(|e| e.forbidden_as_not_found(messages::APPOINTMENT_NOT_FOUND))?;

        Ok(Json(AppointmentAck {
            message: messages::appointment_status_updated(appointment.status.as_str()),
            appointment,
        }))
    }

    /// Handle POST /appointments/:id/propose-reschedule
    async fn handle_propose_reschedule(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<String>,
        AppJson(form): AppJson<RescheduleProposalForm>,
    ) -> Result<Json<ProposalAck>, AppError> {
        let user = authenticate(&headers, &resources).await?;
        let id = Self::parse_appointment_id(&id)?;
        let outcome = appointments::propose_reschedule(
            &resources.database,
            user.id,
            id,
            RescheduleProposal::from(form),
        )
        .await
        .map_err(|e| e.forbidden_as_not_found(messages::APPOINTMENT_NOT_FOUND))?;

        Ok(Json(ProposalAck {
            message: messages::RESCHEDULE_PROPOSED.to_owned(),
            whatsapp_message: outcome.notification,
            appointment: outcome.appointment,
        }))
    }
}
