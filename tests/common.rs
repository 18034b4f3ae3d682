// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: In-memory resources, the full router, and JSON request helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 BeautyPro
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate
)]
//! Shared test utilities for `beautypro_server`

use anyhow::Result;
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use beautypro_server::{
    config::{AuthConfig, CorsConfig, DatabaseConfig, DatabaseUrl, Environment, ServerConfig},
    constants::limits,
    resources::ServerResources,
    server,
};
use serde_json::{json, Value};
use std::sync::{Arc, Once};
use tower::ServiceExt;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        let _ = tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .try_init();
    });
}

/// Configuration for an isolated in-memory server
pub fn test_config() -> ServerConfig {
    ServerConfig {
        http_port: 8001,
        host: "127.0.0.1".to_owned(),
        environment: Environment::Testing,
        database: DatabaseConfig {
            url: DatabaseUrl::Memory,
        },
        auth: AuthConfig {
            jwt_secret: Some("integration-test-secret-0123456789abcdef".to_owned()),
            jwt_expiry_hours: 24,
            bcrypt_cost: limits::MIN_BCRYPT_COST,
        },
        cors: CorsConfig {
            allowed_origins: vec!["*".to_owned()],
        },
    }
}

/// Fresh resources backed by a private in-memory database
pub async fn create_test_resources() -> Result<Arc<ServerResources>> {
    init_test_logging();
    Ok(Arc::new(ServerResources::from_config(test_config()).await?))
}

/// Fresh resources plus the complete application router
pub async fn create_test_app() -> Result<(Arc<ServerResources>, Router)> {
    let resources = create_test_resources().await?;
    let app = server::build_router(&resources);
    Ok((resources, app))
}

/// Send a request and decode the JSON body (`Value::Null` when empty)
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Result<(StatusCode, Value)> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&body)?))?,
        None => builder.body(Body::empty())?,
    };

    let response = app.clone().oneshot(request).await?;
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)?
    };
    Ok((status, value))
}

/// A registered professional
pub struct TestProfessional {
    pub token: String,
    pub user_id: String,
}

/// Register a professional and return its token and id
pub async fn register_professional(app: &Router, email: &str) -> Result<TestProfessional> {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/auth/register",
        None,
        Some(json!({
            "name": "Ana Souza",
            "email": email,
            "password": "segredo123",
            "phone": "11988887777",
            "business_name": "Studio Ana"
        })),
    )
    .await?;
    assert_eq!(status, StatusCode::OK, "register failed: {body}");

    Ok(TestProfessional {
        token: body["access_token"]
            .as_str()
            .map(str::to_owned)
            .unwrap_or_default(),
        user_id: body["user"]["id"].as_str().map(str::to_owned).unwrap_or_default(),
    })
}

/// Create a catalog entry and return its JSON
pub async fn create_service(app: &Router, token: &str, name: &str, category: &str) -> Result<Value> {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/services",
        Some(token),
        Some(json!({
            "name": name,
            "description": "Atendimento completo",
            "price": 80.0,
            "duration_minutes": 30,
            "category": category
        })),
    )
    .await?;
    assert_eq!(status, StatusCode::OK, "create service failed: {body}");
    Ok(body)
}

/// Book an appointment through the public endpoint and return its JSON
pub async fn book(
    app: &Router,
    professional_id: &str,
    service_id: &str,
    date: &str,
    time: &str,
) -> Result<Value> {
    let (status, body) = send(
        app,
        Method::POST,
        &format!("/api/appointments/public/{professional_id}"),
        None,
        Some(json!({
            "client_name": "Maria",
            "client_phone": "11977776666",
            "service_id": service_id,
            "date": date,
            "time": time,
            "notes": "Primeira vez"
        })),
    )
    .await?;
    assert_eq!(status, StatusCode::OK, "booking failed: {body}");
    Ok(body["appointment"].clone())
}

/// Free slots for a professional on a date
pub async fn available_times(app: &Router, professional_id: &str, date: &str) -> Result<Vec<String>> {
    let (status, body) = send(
        app,
        Method::GET,
        &format!("/api/public/available-times/{professional_id}?date={date}"),
        None,
        None,
    )
    .await?;
    assert_eq!(status, StatusCode::OK, "available-times failed: {body}");
    Ok(body["available_times"]
        .as_array()
        .map(|times| {
            times
                .iter()
                .filter_map(|t| t.as_str().map(str::to_owned))
                .collect()
        })
        .unwrap_or_default())
}
