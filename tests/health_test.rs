// ABOUTME: Integration tests for liveness, readiness, and request correlation
// ABOUTME: Exercises the full middleware stack through the assembled router
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 BeautyPro

mod common;

use anyhow::Result;
use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
};
use common::{create_test_app, send};
use tower::ServiceExt;

#[tokio::test]
async fn test_liveness_endpoints() -> Result<()> {
    let (_resources, app) = create_test_app().await?;

    let (status, root) = send(&app, Method::GET, "/", None, None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(root["status"], "healthy");
    assert!(root.get("version").is_none());

    let (status, api) = send(&app, Method::GET, "/api/", None, None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(api["status"], "healthy");
    assert_eq!(api["version"], "1.0.0");
    assert_eq!(api["message"], root["message"]);

    Ok(())
}

#[tokio::test]
async fn test_readiness_reports_database() -> Result<()> {
    let (resources, app) = create_test_app().await?;

    let (status, body) = send(&app, Method::GET, "/api/health/ready", None, None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ready");
    assert!(body["timestamp"].is_string());

    resources.database.close().await;
    let (status, body) = send(&app, Method::GET, "/api/health/ready", None, None).await?;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["status"], "unavailable");

    Ok(())
}

#[tokio::test]
async fn test_request_id_is_generated_or_echoed() -> Result<()> {
    let (_resources, app) = create_test_app().await?;

    let response = app
        .clone()
        .oneshot(Request::builder().uri("/").body(Body::empty())?)
        .await?;
    let generated = response
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert!(generated.starts_with("req_"));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/")
                .header("x-request-id", "upstream-42")
                .body(Body::empty())?,
        )
        .await?;
    assert_eq!(
        response
            .headers()
            .get("x-request-id")
            .and_then(|v| v.to_str().ok()),
        Some("upstream-42")
    );

    Ok(())
}

#[tokio::test]
async fn test_unknown_route_and_bad_json() -> Result<()> {
    let (_resources, app) = create_test_app().await?;

    let (status, _) = send(&app, Method::GET, "/api/nowhere", None, None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let response = app
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/api/auth/login")
                .header("content-type", "application/json")
                .body(Body::from("{not json"))?,
        )
        .await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    Ok(())
}
