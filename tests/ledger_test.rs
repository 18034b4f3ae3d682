// ABOUTME: Integration tests for the financial ledger
// ABOUTME: Filters, ordering, balance arithmetic, and reading rows in the legacy single-service shape
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 BeautyPro

mod common;

use anyhow::Result;
use axum::http::{Method, StatusCode};
use beautypro_server::database::LedgerFilter;
use beautypro_server::errors::ErrorCode;
use beautypro_server::models::{BalancePeriod, TenantId};
use chrono::NaiveDate;
use common::{create_test_app, create_test_resources, register_professional, send};
use rust_decimal::Decimal;
use serde_json::json;

async fn record(
    app: &axum::Router,
    token: &str,
    entry_type: &str,
    amount: f64,
    date: &str,
) -> Result<serde_json::Value> {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/financial",
        Some(token),
        Some(json!({
            "type": entry_type,
            "description": format!("{entry_type} {date}"),
            "amount": amount,
            "category": "geral",
            "date": date
        })),
    )
    .await?;
    assert_eq!(status, StatusCode::OK, "record failed: {body}");
    Ok(body)
}

#[tokio::test]
async fn test_entries_filters_and_balance() -> Result<()> {
    let (_resources, app) = create_test_app().await?;
    let pro = register_professional(&app, "ana@example.com").await?;

    let first = record(&app, &pro.token, "income", 150.0, "2025-03-10").await?;
    assert_eq!(first["service_ids"], json!([]));
    assert_eq!(first["type"], "income");
    record(&app, &pro.token, "expense", 40.0, "2025-03-12").await?;
    record(&app, &pro.token, "income", 60.0, "2025-03-20").await?;

    let (status, all) = send(&app, Method::GET, "/api/financial", Some(&pro.token), None).await?;
    assert_eq!(status, StatusCode::OK);
    let dates: Vec<&str> = all
        .as_array()
        .map(|items| items.iter().filter_map(|e| e["date"].as_str()).collect())
        .unwrap_or_default();
    assert_eq!(dates, vec!["2025-03-20", "2025-03-12", "2025-03-10"]);

    let (_, ranged) = send(
        &app,
        Method::GET,
        "/api/financial?start_date=2025-03-10&end_date=2025-03-12",
        Some(&pro.token),
        None,
    )
    .await?;
    assert_eq!(ranged.as_array().map(Vec::len), Some(2));

    let (_, expenses) = send(
        &app,
        Method::GET,
        "/api/financial?entry_type=expense",
        Some(&pro.token),
        None,
    )
    .await?;
    assert_eq!(expenses.as_array().map(Vec::len), Some(1));
    assert_eq!(expenses[0]["amount"], 40.0);

    let (_, balance) = send(
        &app,
        Method::GET,
        "/api/financial/balance?start_date=2025-03-01&end_date=2025-03-15",
        Some(&pro.token),
        None,
    )
    .await?;
    assert_eq!(balance["income"], 150.0);
    assert_eq!(balance["expenses"], 40.0);
    assert_eq!(balance["balance"], 110.0);
    assert_eq!(balance["period"]["start_date"], "2025-03-01");
    assert_eq!(balance["period"]["end_date"], "2025-03-15");

    let (_, total) = send(&app, Method::GET, "/api/financial/balance", Some(&pro.token), None).await?;
    assert_eq!(total["balance"], 170.0);
    assert!(total["period"]["start_date"].is_null());
    assert!(total["period"]["end_date"].is_null());

    Ok(())
}

#[tokio::test]
async fn test_ledger_is_isolated_per_professional() -> Result<()> {
    let (_resources, app) = create_test_app().await?;
    let ana = register_professional(&app, "ana@example.com").await?;
    let bia = register_professional(&app, "bia@example.com").await?;
    record(&app, &ana.token, "income", 99.0, "2025-03-10").await?;

    let (_, bia_entries) = send(&app, Method::GET, "/api/financial", Some(&bia.token), None).await?;
    assert_eq!(bia_entries.as_array().map(Vec::len), Some(0));
    let (_, bia_balance) =
        send(&app, Method::GET, "/api/financial/balance", Some(&bia.token), None).await?;
    assert_eq!(bia_balance["balance"], 0.0);

    Ok(())
}

#[tokio::test]
async fn test_invalid_ledger_input_is_rejected() -> Result<()> {
    let (_resources, app) = create_test_app().await?;
    let pro = register_professional(&app, "ana@example.com").await?;

    for body in [
        json!({ "type": "income", "description": "x", "amount": -1.0, "category": "c", "date": "2025-03-10" }),
        json!({ "type": "gift", "description": "x", "amount": 1.0, "category": "c", "date": "2025-03-10" }),
        json!({ "type": "income", "description": "x", "amount": 1.0, "category": "c", "date": "10/03/2025" }),
        json!({ "type": "income", "description": "x", "amount": 1.0, "category": "c", "date": "2025-3-10" }),
    ] {
        let (status, response) =
            send(&app, Method::POST, "/api/financial", Some(&pro.token), Some(body)).await?;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(response["code"], "INVALID_INPUT");
    }

    for uri in [
        "/api/financial?start_date=2025-3-01",
        "/api/financial?end_date=2025-03-1",
        "/api/financial/balance?start_date=2025-03-01&end_date=2025-3-15",
    ] {
        let (status, response) = send(&app, Method::GET, uri, Some(&pro.token), None).await?;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(response["code"], "INVALID_INPUT");
    }

    Ok(())
}

#[tokio::test]
async fn test_legacy_rows_are_upconverted_on_read() -> Result<()> {
    let resources = create_test_resources().await?;
    let owner = TenantId::new();
    let created_at = chrono::Utc::now().to_rfc3339();

    let rows = [
        ("singular", None, Some("svc-legacy"), "2025-01-03"),
        ("empty-singular", None, Some(""), "2025-01-02"),
        ("neither", None, None, "2025-01-01"),
        ("current", Some(r#"["a","b"]"#), None, "2025-01-04"),
    ];
    for (description, service_ids, service_id, date) in rows {
        sqlx::query(
            r"
            INSERT INTO financial_entries (id, user_id, entry_type, description, amount,
                                           category, service_ids, service_id, date, created_at)
            VALUES ($1, $2, 'income', $3, '10', 'geral', $4, $5, $6, $7)
            ",
        )
        .bind(uuid::Uuid::new_v4().to_string())
        .bind(owner.to_string())
        .bind(description)
        .bind(service_ids)
        .bind(service_id)
        .bind(date)
        .bind(&created_at)
        .execute(resources.database.pool())
        .await?;
    }

    let entries = resources
        .database
        .ledger()
        .list(owner, &LedgerFilter::default())
        .await?;
    let by_description = |name: &str| {
        entries
            .iter()
            .find(|e| e.description == name)
            .map(|e| e.service_ids.clone())
    };

    assert_eq!(by_description("current"), Some(vec!["a".to_owned(), "b".to_owned()]));
    assert_eq!(by_description("singular"), Some(vec!["svc-legacy".to_owned()]));
    assert_eq!(by_description("empty-singular"), Some(vec![]));
    assert_eq!(by_description("neither"), Some(vec![]));

    let summary = resources
        .database
        .ledger()
        .balance(
            owner,
            BalancePeriod {
                start_date: NaiveDate::from_ymd_opt(2025, 1, 2),
                end_date: NaiveDate::from_ymd_opt(2025, 1, 3),
            },
        )
        .await?;
    assert_eq!(summary.income, Decimal::from(20));
    assert_eq!(summary.balance, Decimal::from(20));

    Ok(())
}

#[tokio::test]
async fn test_unknown_entry_type_fails_the_read() -> Result<()> {
    let resources = create_test_resources().await?;
    let owner = TenantId::new();
    let pool = resources.database.pool();

    // Older tables carry no CHECK on entry_type
    sqlx::query("PRAGMA ignore_check_constraints = ON")
        .execute(pool)
        .await?;
    sqlx::query(
        r"
        INSERT INTO financial_entries (id, user_id, entry_type, description, amount,
                                       category, service_ids, service_id, date, created_at)
        VALUES ($1, $2, 'gift', 'presente', '10', 'geral', NULL, NULL, '2025-01-01', $3)
        ",
    )
    .bind(uuid::Uuid::new_v4().to_string())
    .bind(owner.to_string())
    .bind(chrono::Utc::now().to_rfc3339())
    .execute(pool)
    .await?;

    let err = resources
        .database
        .ledger()
        .list(owner, &LedgerFilter::default())
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::InternalError);
    assert!(err.message.contains("gift"), "{err}");

    Ok(())
}
