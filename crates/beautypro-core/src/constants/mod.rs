// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Slot grid bounds, server defaults, and client-facing Portuguese messages
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 BeautyPro

//! Constants module
//!
//! Client-facing messages are kept verbatim: existing frontends match on them.

/// Client-facing response messages (Portuguese)
pub mod messages;

/// Daily slot grid used by the availability engine
pub mod scheduling {
    /// First bookable slot, hour component
    pub const FIRST_SLOT_HOUR: u32 = 7;
    /// Last bookable slot, hour component (the 19:30 slot is the final one)
    pub const LAST_SLOT_HOUR: u32 = 19;
    /// Minutes between consecutive slots
    pub const SLOT_INTERVAL_MINUTES: u32 = 30;
    /// Number of slots in the daily grid
    pub const SLOTS_PER_DAY: usize = 26;
    /// Maximum number of options carried by a reschedule proposal
    pub const MAX_PROPOSAL_OPTIONS: usize = 3;
}

/// Identity and validation limits
pub mod limits {
    /// Default credential lifetime: 30 days
    pub const JWT_EXPIRY_HOURS: i64 = 30 * 24;
    /// Minimum characters in a display name
    pub const MIN_NAME_LENGTH: usize = 2;
    /// Minimum characters in a password
    pub const MIN_PASSWORD_LENGTH: usize = 6;
    /// Lowest bcrypt work factor the hasher accepts
    pub const MIN_BCRYPT_COST: u32 = 4;
    /// Highest bcrypt work factor the hasher accepts
    pub const MAX_BCRYPT_COST: u32 = 31;
}

/// Server defaults
pub mod defaults {
    /// Default HTTP port
    pub const HTTP_PORT: u16 = 8001;
    /// Default bind address
    pub const HOST: &str = "0.0.0.0";
    /// Default database location
    pub const DATABASE_URL: &str = "sqlite:./data/beautypro.db";
    /// Default allowed CORS origins
    pub const CORS_ORIGINS: &str = "*";
    /// API version reported by the health endpoint
    pub const API_VERSION: &str = "1.0.0";
}

/// Service names used in logging and health output
pub mod service_names {
    /// Server binary name
    pub const BEAUTYPRO_SERVER: &str = "beautypro-server";
}
