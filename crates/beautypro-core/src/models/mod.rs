// ABOUTME: Core data models for the BeautyPro scheduling platform
// ABOUTME: Users and tenancy, catalog services, ledger entries, appointments, and slot labels
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 BeautyPro

//! Core data models
//!
//! Models are plain serde types. Conversions that encode business rules
//! (legacy ledger upconversion, proposal flattening, balance arithmetic) live
//! next to the type they produce and are pure functions.

mod appointment;
mod financial;
pub mod iso_date;
mod service;
mod slot;
mod tenant;
mod user;

pub use appointment::{
    Appointment, AppointmentRequest, AppointmentStatus, ProposedSlot, RescheduleProposal,
    RescheduleProposalForm, StatusChange, StatusUpdate,
};
pub use financial::{
    BalancePeriod, BalanceSummary, EntryType, FinancialEntry, FinancialEntryInput,
    StoredFinancialEntry,
};
pub use service::{Service, ServiceCategory, ServiceInput};
pub use slot::SlotTime;
pub use tenant::{ensure_owned, TenantId, TenantOwned};
pub use user::{ProfessionalCard, SubscriptionStatus, User, UserProfile};
