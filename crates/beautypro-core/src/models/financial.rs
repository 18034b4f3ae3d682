// ABOUTME: Ledger models: income/expense entries, their legacy stored shape, and balances
// ABOUTME: StoredFinancialEntry::upconvert is the versioned-read adapter for old records
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 BeautyPro

use super::{TenantId, TenantOwned};
use crate::errors::{AppError, AppResult};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Direction of a ledger entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryType {
    /// Money in
    Income,
    /// Money out
    Expense,
}

impl EntryType {
    /// Convert to database string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }

    /// Parse from database string representation
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "income" => Some(Self::Income),
            "expense" => Some(Self::Expense),
            _ => None,
        }
    }
}

/// A ledger entry in its current shape
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinancialEntry {
    /// Unique identifier
    pub id: Uuid,
    /// Owning professional
    pub user_id: TenantId,
    /// Income or expense
    #[serde(rename = "type")]
    pub entry_type: EntryType,
    /// Free-text description
    pub description: String,
    /// Unsigned amount; the sign comes from `entry_type`
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    /// Free-text category
    pub category: String,
    /// Linked catalog services (not checked against the catalog)
    pub service_ids: Vec<String>,
    /// Calendar date of the transaction
    pub date: NaiveDate,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

/// A ledger entry exactly as persisted
///
/// Records written before entries could reference several services carry a
/// single `service_id` and no `service_ids`.
#[derive(Debug, Clone)]
pub struct StoredFinancialEntry {
    /// Unique identifier
    pub id: Uuid,
    /// Owning professional
    pub user_id: TenantId,
    /// Income or expense
    pub entry_type: EntryType,
    /// Free-text description
    pub description: String,
    /// Unsigned amount
    pub amount: Decimal,
    /// Free-text category
    pub category: String,
    /// Current plural reference, absent on legacy records
    pub service_ids: Option<Vec<String>>,
    /// Legacy singular reference
    pub service_id: Option<String>,
    /// Calendar date of the transaction
    pub date: NaiveDate,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl StoredFinancialEntry {
    /// Convert the persisted shape into the current entity shape
    ///
    /// The plural field wins when present. Otherwise a non-empty legacy
    /// `service_id` becomes a one-element set, and anything else an empty set.
    #[must_use]
    pub fn upconvert(self) -> FinancialEntry {
        let service_ids = match (self.service_ids, self.service_id) {
            (Some(ids), _) => ids,
            (None, Some(legacy)) if !legacy.is_empty() => vec![legacy],
            (None, _) => Vec::new(),
        };

        FinancialEntry {
            id: self.id,
            user_id: self.user_id,
            entry_type: self.entry_type,
            description: self.description,
            amount: self.amount,
            category: self.category,
            service_ids,
            date: self.date,
            created_at: self.created_at,
        }
    }
}

/// Body of a create request
#[derive(Debug, Clone, Deserialize)]
pub struct FinancialEntryInput {
    /// Income or expense
    #[serde(rename = "type")]
    pub entry_type: EntryType,
    /// Free-text description
    pub description: String,
    /// Unsigned amount
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    /// Free-text category
    pub category: String,
    /// Linked catalog services
    #[serde(default)]
    pub service_ids: Option<Vec<String>>,
    /// Calendar date (YYYY-MM-DD)
    #[serde(deserialize_with = "crate::models::iso_date::deserialize")]
    pub date: NaiveDate,
}

impl FinancialEntryInput {
    /// Reject negative amounts
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when `amount` is below zero
    pub fn validate(&self) -> AppResult<()> {
        if self.amount < Decimal::ZERO {
            return Err(AppError::invalid_input("O valor não pode ser negativo"));
        }
        Ok(())
    }
}

/// Inclusive date range echoed back with a balance
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalancePeriod {
    /// First included date
    #[serde(default, deserialize_with = "crate::models::iso_date::option::deserialize")]
    pub start_date: Option<NaiveDate>,
    /// Last included date
    #[serde(default, deserialize_with = "crate::models::iso_date::option::deserialize")]
    pub end_date: Option<NaiveDate>,
}

/// Income, expenses and their difference over a period
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalanceSummary {
    /// Sum of income amounts
    #[serde(with = "rust_decimal::serde::float")]
    pub income: Decimal,
    /// Sum of expense amounts
    #[serde(with = "rust_decimal::serde::float")]
    pub expenses: Decimal,
    /// `income - expenses`
    #[serde(with = "rust_decimal::serde::float")]
    pub balance: Decimal,
    /// The period the sums cover
    pub period: BalancePeriod,
}

impl BalanceSummary {
    /// Sum a set of entries already filtered to `period`
    #[must_use]
    pub fn from_entries<'a>(
        entries: impl IntoIterator<Item = &'a FinancialEntry>,
        period: BalancePeriod,
    ) -> Self {
        let (income, expenses) = entries.into_iter().fold(
            (Decimal::ZERO, Decimal::ZERO),
            |(income, expenses), entry| match entry.entry_type {
                EntryType::Income => (income + entry.amount, expenses),
                EntryType::Expense => (income, expenses + entry.amount),
            },
        );

        Self {
            income,
            expenses,
            balance: income - expenses,
            period,
        }
    }
}

impl TenantOwned for FinancialEntry {
    fn tenant_id(&self) -> TenantId {
        self.user_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored(service_ids: Option<Vec<String>>, service_id: Option<&str>) -> StoredFinancialEntry {
        StoredFinancialEntry {
            id: Uuid::new_v4(),
            user_id: TenantId::new(),
            entry_type: EntryType::Income,
            description: "Corte".into(),
            amount: Decimal::new(5000, 2),
            category: "Serviços".into(),
            service_ids,
            service_id: service_id.map(str::to_owned),
            date: NaiveDate::from_ymd_opt(2025, 3, 14).unwrap(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_entry_type_parse() {
        for entry_type in [EntryType::Income, EntryType::Expense] {
            assert_eq!(EntryType::parse(entry_type.as_str()), Some(entry_type));
        }
        assert_eq!(EntryType::parse("gift"), None);
        assert_eq!(EntryType::parse(""), None);
    }

    #[test]
    fn test_legacy_singular_reference_becomes_one_element_set() {
        let entry = stored(None, Some("svc-1")).upconvert();
        assert_eq!(entry.service_ids, vec!["svc-1".to_owned()]);
    }

    #[test]
    fn test_neither_field_reads_back_empty() {
        assert!(stored(None, None).upconvert().service_ids.is_empty());
    }

    #[test]
    fn test_empty_legacy_reference_reads_back_empty() {
        assert!(stored(None, Some("")).upconvert().service_ids.is_empty());
    }

    #[test]
    fn test_plural_field_takes_precedence() {
        let entry = stored(Some(vec!["a".into(), "b".into()]), Some("legacy")).upconvert();
        assert_eq!(entry.service_ids, vec!["a".to_owned(), "b".to_owned()]);
    }

    #[test]
    fn test_balance_arithmetic() {
        let mut income = stored(None, None).upconvert();
        income.amount = Decimal::new(15025, 2);
        let mut expense = stored(None, None).upconvert();
        expense.entry_type = EntryType::Expense;
        expense.amount = Decimal::new(505, 1);

        let summary = BalanceSummary::from_entries([&income, &expense], BalancePeriod::default());
        assert_eq!(summary.income, Decimal::new(15025, 2));
        assert_eq!(summary.expenses, Decimal::new(505, 1));
        assert_eq!(summary.balance, Decimal::new(9975, 2));

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["balance"], 99.75);
        assert!(json["period"]["start_date"].is_null());
    }
}
