// ABOUTME: Catalog entries a professional sells: time-slotted services and stocked products
// ABOUTME: Service record, category enum, and the validated create/replace input
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 BeautyPro

use super::{TenantId, TenantOwned};
use crate::errors::{AppError, AppResult};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Catalog category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceCategory {
    /// Time-slotted service, listed on the booking page
    Service,
    /// Sellable product, usually with `duration_minutes == 0`
    Product,
}

impl ServiceCategory {
    /// Convert to database string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Service => "service",
            Self::Product => "product",
        }
    }

    /// Parse from database string representation
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "product" => Self::Product,
            _ => Self::Service,
        }
    }
}

/// A catalog entry owned by one professional
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Service {
    /// Unique identifier (immutable)
    pub id: Uuid,
    /// Owning professional
    pub user_id: TenantId,
    /// Display name
    pub name: String,
    /// Optional description
    pub description: Option<String>,
    /// Non-negative price
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    /// Duration in minutes, 0 for products
    pub duration_minutes: u32,
    /// Catalog category
    pub category: ServiceCategory,
    /// Units in stock (products only)
    pub stock_quantity: Option<i64>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

/// Body of a create or full-replace request
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceInput {
    /// Display name
    pub name: String,
    /// Optional description
    #[serde(default)]
    pub description: Option<String>,
    /// Price, must not be negative
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    /// Duration in minutes, must not be negative
    #[serde(default)]
    pub duration_minutes: i64,
    /// Catalog category
    pub category: ServiceCategory,
    /// Units in stock
    #[serde(default)]
    pub stock_quantity: Option<i64>,
}

impl ServiceInput {
    /// Check field ranges and return the duration as stored
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for a negative price or duration
    pub fn validate(&self) -> AppResult<u32> {
        if self.price < Decimal::ZERO {
            return Err(AppError::invalid_input("O preço não pode ser negativo"));
        }
        u32::try_from(self.duration_minutes)
            .map_err(|_| AppError::invalid_input("A duração não pode ser negativa"))
    }
}

impl TenantOwned for Service {
    fn tenant_id(&self) -> TenantId {
        self.user_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(price: &str, duration: i64) -> ServiceInput {
        serde_json::from_value(serde_json::json!({
            "name": "Corte",
            "price": price.parse::<f64>().unwrap(),
            "duration_minutes": duration,
            "category": "service",
        }))
        .unwrap()
    }

    #[test]
    fn test_validate_accepts_products_without_duration() {
        assert_eq!(input("35.5", 0).validate().unwrap(), 0);
        assert_eq!(input("0", 30).validate().unwrap(), 30);
    }

    #[test]
    fn test_validate_rejects_negative_values() {
        assert!(input("-1", 30).validate().is_err());
        assert!(input("10", -5).validate().is_err());
    }

    #[test]
    fn test_unknown_category_is_rejected() {
        let parsed: Result<ServiceInput, _> = serde_json::from_value(serde_json::json!({
            "name": "Corte",
            "price": 10.0,
            "category": "subscription",
        }));
        assert!(parsed.is_err());
    }
}
