// ABOUTME: Appointment lifecycle models: status enum, status-change input, and reschedule proposals
// ABOUTME: Includes the flat proposal form adapter and the client notification text
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 BeautyPro

use super::{SlotTime, TenantId, TenantOwned};
use crate::constants::scheduling::MAX_PROPOSAL_OPTIONS;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use uuid::Uuid;

/// Lifecycle state of an appointment
///
/// `Pending` is only reachable through creation. `RescheduleProposed` waits
/// for the client to answer out of band; nothing moves it forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    /// Requested by a client, awaiting the professional
    Pending,
    /// Accepted by the professional
    Confirmed,
    /// Declined by the professional
    Rejected,
    /// Professional offered alternative slots
    RescheduleProposed,
    /// Moved to another date/time
    Rescheduled,
}

impl AppointmentStatus {
    /// Convert to database string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Rejected => "rejected",
            Self::RescheduleProposed => "reschedule_proposed",
            Self::Rescheduled => "rescheduled",
        }
    }

    /// Parse from string representation
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "confirmed" => Some(Self::Confirmed),
            "rejected" => Some(Self::Rejected),
            "reschedule_proposed" => Some(Self::RescheduleProposed),
            "rescheduled" => Some(Self::Rescheduled),
            _ => None,
        }
    }

    /// Whether an appointment in this state holds its slot
    #[must_use]
    pub const fn occupies_slot(&self) -> bool {
        matches!(self, Self::Pending | Self::Confirmed)
    }
}

/// Target states a professional may set directly
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusUpdate {
    /// Accept the request
    Confirmed,
    /// Decline the request
    Rejected,
    /// Move the appointment
    Rescheduled,
}

impl From<StatusUpdate> for AppointmentStatus {
    fn from(update: StatusUpdate) -> Self {
        match update {
            StatusUpdate::Confirmed => Self::Confirmed,
            StatusUpdate::Rejected => Self::Rejected,
            StatusUpdate::Rescheduled => Self::Rescheduled,
        }
    }
}

/// Body of a status change
#[derive(Debug, Clone, Deserialize)]
pub struct StatusChange {
    /// Target status
    pub status: StatusUpdate,
    /// New date, applied only with `rescheduled` and `new_time`
    #[serde(default, deserialize_with = "crate::models::iso_date::option::deserialize")]
    pub new_date: Option<NaiveDate>,
    /// New time, applied only with `rescheduled` and `new_date`
    #[serde(default)]
    pub new_time: Option<SlotTime>,
}

impl StatusChange {
    /// The date/time pair to move to, if this change carries one
    #[must_use]
    pub fn new_slot(&self) -> Option<(NaiveDate, SlotTime)> {
        match (self.status, self.new_date, &self.new_time) {
            (StatusUpdate::Rescheduled, Some(date), Some(time)) => Some((date, time.clone())),
            _ => None,
        }
    }
}

/// One alternative offered in a reschedule proposal
///
/// Stored verbatim: neither field is validated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposedSlot {
    /// Proposed date as typed by the professional
    pub date: String,
    /// Proposed time as typed by the professional
    pub time: String,
}

/// Up to three alternatives plus a free-text note
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RescheduleProposal {
    /// Offered alternatives, in the order given
    pub options: Vec<ProposedSlot>,
    /// Free-text note for the client
    pub message: String,
}

impl RescheduleProposal {
    /// Compose the message the professional relays to the client
    #[must_use]
    pub fn notification_text(&self, client_name: &str) -> String {
        let mut text = format!(
            "Olá {client_name}! Preciso reagendar seu atendimento. \
             Estas são as opções disponíveis:\n\n"
        );
        for (index, option) in self.options.iter().enumerate() {
            let _ = writeln!(
                text,
                "Opção {}: {} às {}",
                index + 1,
                option.date,
                option.time
            );
        }
        let _ = write!(
            text,
            "\nMensagem: {}\n\nPor favor, responda qual opção prefere ou se nenhuma funciona.",
            self.message
        );
        text
    }
}

/// Wire shape of a proposal: `date1`, `time1` .. `date3`, `time3`, `message`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RescheduleProposalForm {
    /// First option date
    pub date1: Option<String>,
    /// First option time
    pub time1: Option<String>,
    /// Second option date
    pub date2: Option<String>,
    /// Second option time
    pub time2: Option<String>,
    /// Third option date
    pub date3: Option<String>,
    /// Third option time
    pub time3: Option<String>,
    /// Free-text note
    pub message: Option<String>,
}

impl From<RescheduleProposalForm> for RescheduleProposal {
    /// Pairs where both halves are missing are dropped; a half-filled pair
    /// keeps its present half and an empty string for the other.
    fn from(form: RescheduleProposalForm) -> Self {
        let pairs = [
            (form.date1, form.time1),
            (form.date2, form.time2),
            (form.date3, form.time3),
        ];
        let options = pairs
            .into_iter()
            .filter(|(date, time)| date.is_some() || time.is_some())
            .take(MAX_PROPOSAL_OPTIONS)
            .map(|(date, time)| ProposedSlot {
                date: date.unwrap_or_default(),
                time: time.unwrap_or_default(),
            })
            .collect();

        Self {
            options,
            message: form.message.unwrap_or_default(),
        }
    }
}

/// A client's booking with one professional
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    /// Unique identifier
    pub id: Uuid,
    /// The professional the appointment is with
    pub user_id: TenantId,
    /// Client name as typed on the booking page
    pub client_name: String,
    /// Client phone as typed on the booking page
    pub client_phone: String,
    /// Booked catalog service
    pub service_id: Uuid,
    /// Service name copied at creation; later renames do not propagate
    pub service_name: String,
    /// Appointment date
    pub date: NaiveDate,
    /// Appointment slot
    pub time: SlotTime,
    /// Lifecycle state
    pub status: AppointmentStatus,
    /// Optional client notes
    pub notes: Option<String>,
    /// Outstanding reschedule proposal
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reschedule_proposal: Option<RescheduleProposal>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

/// Body of a public booking request
#[derive(Debug, Clone, Deserialize)]
pub struct AppointmentRequest {
    /// Client name
    pub client_name: String,
    /// Client phone
    pub client_phone: String,
    /// Catalog service to book, kept as text so unknown ids answer not-found
    pub service_id: String,
    /// Requested date
    #[serde(deserialize_with = "crate::models::iso_date::deserialize")]
    pub date: NaiveDate,
    /// Requested slot
    pub time: SlotTime,
    /// Optional notes
    #[serde(default)]
    pub notes: Option<String>,
}

impl TenantOwned for Appointment {
    fn tenant_id(&self) -> TenantId {
        self.user_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_form() -> RescheduleProposalForm {
        RescheduleProposalForm {
            date1: Some("2025-03-15".into()),
            time1: Some("09:00".into()),
            date2: Some("2025-03-16".into()),
            time2: Some("10:30".into()),
            date3: Some("2025-03-17".into()),
            time3: Some("14:00".into()),
            message: Some("Imprevisto na agenda".into()),
        }
    }

    #[test]
    fn test_only_pending_and_confirmed_occupy_slots() {
        assert!(AppointmentStatus::Pending.occupies_slot());
        assert!(AppointmentStatus::Confirmed.occupies_slot());
        assert!(!AppointmentStatus::Rejected.occupies_slot());
        assert!(!AppointmentStatus::RescheduleProposed.occupies_slot());
        assert!(!AppointmentStatus::Rescheduled.occupies_slot());
    }

    #[test]
    fn test_status_round_trips_through_strings() {
        for status in [
            AppointmentStatus::Pending,
            AppointmentStatus::Confirmed,
            AppointmentStatus::Rejected,
            AppointmentStatus::RescheduleProposed,
            AppointmentStatus::Rescheduled,
        ] {
            assert_eq!(AppointmentStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(AppointmentStatus::parse("cancelled"), None);
    }

    #[test]
    fn test_status_update_rejects_other_targets() {
        let parsed: Result<StatusChange, _> =
            serde_json::from_value(serde_json::json!({ "status": "pending" }));
        assert!(parsed.is_err());
        let parsed: Result<StatusChange, _> =
            serde_json::from_value(serde_json::json!({ "status": "reschedule_proposed" }));
        assert!(parsed.is_err());
    }

    #[test]
    fn test_new_slot_requires_rescheduled_and_both_fields() {
        let change: StatusChange = serde_json::from_value(serde_json::json!({
            "status": "rescheduled", "new_date": "2025-03-20", "new_time": "15:00"
        }))
        .unwrap();
        let (date, time) = change.new_slot().unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2025, 3, 20).unwrap());
        assert_eq!(time.as_str(), "15:00");

        let partial: StatusChange = serde_json::from_value(serde_json::json!({
            "status": "rescheduled", "new_date": "2025-03-20"
        }))
        .unwrap();
        assert!(partial.new_slot().is_none());

        let confirmed: StatusChange = serde_json::from_value(serde_json::json!({
            "status": "confirmed", "new_date": "2025-03-20", "new_time": "15:00"
        }))
        .unwrap();
        assert!(confirmed.new_slot().is_none());
    }

    #[test]
    fn test_form_keeps_all_three_pairs_in_order() {
        let proposal = RescheduleProposal::from(full_form());
        assert_eq!(proposal.options.len(), 3);
        assert_eq!(proposal.options[0].date, "2025-03-15");
        assert_eq!(proposal.options[1].time, "10:30");
        assert_eq!(proposal.options[2].date, "2025-03-17");
        assert_eq!(proposal.message, "Imprevisto na agenda");
    }

    #[test]
    fn test_form_drops_empty_pairs() {
        let form = RescheduleProposalForm {
            date1: Some("2025-03-15".into()),
            time1: Some("09:00".into()),
            time3: Some("18:00".into()),
            ..RescheduleProposalForm::default()
        };
        let proposal = RescheduleProposal::from(form);
        assert_eq!(proposal.options.len(), 2);
        assert_eq!(proposal.options[1].date, "");
        assert_eq!(proposal.options[1].time, "18:00");
        assert_eq!(proposal.message, "");
    }

    #[test]
    fn test_notification_text_lists_options_and_client() {
        let text = RescheduleProposal::from(full_form()).notification_text("Maria");
        assert!(text.starts_with("Olá Maria! Preciso reagendar seu atendimento."));
        assert!(text.contains("Opção 1: 2025-03-15 às 09:00\n"));
        assert!(text.contains("Opção 2: 2025-03-16 às 10:30\n"));
        assert!(text.contains("Opção 3: 2025-03-17 às 14:00\n"));
        assert!(text.contains("Mensagem: Imprevisto na agenda"));
        assert!(text.ends_with("Por favor, responda qual opção prefere ou se nenhuma funciona."));
    }
}
