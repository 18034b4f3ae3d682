// ABOUTME: Tenant identifier newtype shared by every owned entity
// ABOUTME: A registered professional's user id doubles as the tenant id
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 BeautyPro

use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Type-safe wrapper for tenant identifiers
///
/// Every service, ledger entry and appointment is partitioned by the owning
/// professional's id, carried as a `TenantId` so it cannot be confused with
/// the entity's own id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TenantId(pub Uuid);

impl TenantId {
    /// Create a new random `TenantId`
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create a `TenantId` from a UUID
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Get the inner UUID value
    #[must_use]
    pub const fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for TenantId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for TenantId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl fmt::Display for TenantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TenantId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// An entity partitioned by its owning professional
pub trait TenantOwned {
    /// The professional that owns this entity
    fn tenant_id(&self) -> TenantId;
}

/// Authorize `caller` against a loaded entity
///
/// # Errors
///
/// Returns `PermissionDenied` when the entity belongs to another tenant
pub fn ensure_owned<T: TenantOwned>(entity: T, caller: TenantId) -> AppResult<T> {
    if entity.tenant_id() == caller {
        Ok(entity)
    } else {
        Err(AppError::forbidden(format!(
            "Tenant {caller} does not own the requested resource"
        )))
    }
}
