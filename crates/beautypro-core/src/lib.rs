// ABOUTME: Core types and constants for the BeautyPro scheduling platform
// ABOUTME: Foundation crate with error handling, domain models, and user-facing messages
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 BeautyPro

#![deny(unsafe_code)]

//! # BeautyPro Core
//!
//! Foundation crate providing shared types and constants for the BeautyPro
//! server. It carries no I/O: everything here is a plain value type or a pure
//! conversion, so the scheduling rules can be tested without a database.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError` and `ErrorCode`
//! - **constants**: Slot grid bounds, defaults, and Portuguese response messages
//! - **models**: Users, catalog services, ledger entries, and appointments

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Core data models (User, Service, `FinancialEntry`, Appointment)
pub mod models;
