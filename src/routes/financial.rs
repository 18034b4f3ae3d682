// ABOUTME: Ledger route handlers for income and expense entries
// ABOUTME: Create, filtered listing, and the period balance for the authenticated professional
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 BeautyPro

use super::extract::{AppJson, AppQuery};
use crate::database::LedgerFilter;
use crate::errors::AppError;
use crate::middleware::authenticate;
use crate::models::{BalancePeriod, BalanceSummary, FinancialEntry, FinancialEntryInput};
use crate::resources::ServerResources;
use axum::{extract::State, http::HeaderMap, routing::get, Json, Router};
use std::sync::Arc;

/// Ledger routes implementation
pub struct FinancialRoutes;

impl FinancialRoutes {
    /// Create ledger routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/financial", get(Self::handle_list).post(Self::handle_create))
            .route("/financial/balance", get(Self::handle_balance))
            .with_state(resources)
    }

    /// Handle POST /financial
    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        AppJson(input): AppJson<FinancialEntryInput>,
    ) -> Result<Json<FinancialEntry>, AppError> {
        let user = authenticate(&headers, &resources).await?;
        let entry = resources.database.ledger().create(user.id, input).await?;
        Ok(Json(entry))
    }

    /// Handle GET /financial?start_date=&end_date=&entry_type=
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        AppQuery(filter): AppQuery<LedgerFilter>,
    ) -> Result<Json<Vec<FinancialEntry>>, AppError> {
        let user = authenticate(&headers, &resources).await?;
        let entries = resources.database.ledger().list(user.id, &filter).await?;
        Ok(Json(entries))
    }

    /// Handle GET /financial/balance?start_date=&end_date=
    async fn handle_balance(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        AppQuery(period): AppQuery<BalancePeriod>,
    ) -> Result<Json<BalanceSummary>, AppError> {
        let user = authenticate(&headers, &resources).await?;
        let summary = resources.database.ledger().balance(user.id, period).await?;
        Ok(Json(summary))
    }
}
