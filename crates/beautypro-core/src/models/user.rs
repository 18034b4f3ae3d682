// ABOUTME: Registered professional (tenant owner) with credentials and public profile views
// ABOUTME: User, UserProfile without password hash, and the public ProfessionalCard
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 BeautyPro

use super::TenantId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Subscription state of a professional's account
///
/// Recorded only; no route gates on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    /// Newly registered accounts
    #[default]
    Inactive,
    /// Paying accounts
    Active,
}

impl SubscriptionStatus {
    /// Convert to database string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Inactive => "inactive",
            Self::Active => "active",
        }
    }

    /// Parse from database string representation
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "active" => Self::Active,
            _ => Self::Inactive,
        }
    }
}

/// A registered professional
#[derive(Debug, Clone)]
pub struct User {
    /// Unique identifier, also the tenant id of everything the user owns
    pub id: TenantId,
    /// Display name
    pub name: String,
    /// Login email (unique)
    pub email: String,
    /// bcrypt hash of the password
    pub password_hash: String,
    /// Contact phone shown on the booking page
    pub phone: String,
    /// Business name shown on the booking page
    pub business_name: String,
    /// Subscription state
    pub subscription_status: SubscriptionStatus,
    /// Registration timestamp
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new inactive user with a fresh id
    #[must_use]
    pub fn new(
        name: String,
        email: String,
        password_hash: String,
        phone: String,
        business_name: String,
    ) -> Self {
        Self {
            id: TenantId::new(),
            name,
            email,
            password_hash,
            phone,
            business_name,
            subscription_status: SubscriptionStatus::Inactive,
            created_at: Utc::now(),
        }
    }
}

/// A user as returned to its owner (no password hash)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    /// Unique identifier
    pub id: TenantId,
    /// Display name
    pub name: String,
    /// Login email
    pub email: String,
    /// Contact phone
    pub phone: String,
    /// Business name
    pub business_name: String,
    /// Subscription state
    pub subscription_status: SubscriptionStatus,
    /// Registration timestamp
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            phone: user.phone,
            business_name: user.business_name,
            subscription_status: user.subscription_status,
            created_at: user.created_at,
        }
    }
}

/// The slice of a professional that clients see on the booking page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfessionalCard {
    /// Display name
    pub name: String,
    /// Business name
    pub business_name: String,
    /// Contact phone
    pub phone: String,
}

impl From<User> for ProfessionalCard {
    fn from(user: User) -> Self {
        Self {
            name: user.name,
            business_name: user.business_name,
            phone: user.phone,
        }
    }
}
