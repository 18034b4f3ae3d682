// ABOUTME: HTTP middleware for request tracing, bearer authentication, and CORS
// ABOUTME: Provides request ID propagation, the http_request span, and caller resolution
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 BeautyPro

/// Bearer token extraction and caller resolution
pub mod auth;
/// CORS layer built from the configured origins
pub mod cors;
/// Request ids and the per-request tracing span
pub mod tracing;

/// Bearer authentication
pub use auth::{authenticate, bearer_token};

/// CORS configuration
pub use cors::setup_cors;

/// Request tracing
pub use tracing::{make_request_span, record_response, request_id_middleware, REQUEST_ID_HEADER};
