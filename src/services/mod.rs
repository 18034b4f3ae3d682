// ABOUTME: Domain service layer for business logic extracted from route handlers
// ABOUTME: Availability, appointment lifecycle, public booking, and identity operations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 BeautyPro

//! Domain service layer
//!
//! Route handlers stay thin: they authenticate, parse path ids, and call
//! into these functions with the shared [`Database`](crate::database::Database).

/// Appointment lifecycle: creation, listing, status changes, reschedule proposals
pub mod appointments;

/// Free-slot computation over the fixed daily grid
pub mod availability;

/// Unauthenticated booking page facade
pub mod booking;

/// Registration, login, and bearer token authentication
pub mod identity;
