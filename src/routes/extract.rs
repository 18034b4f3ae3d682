// ABOUTME: Request extractors whose rejections render as the API error body
// ABOUTME: Wraps axum Json and Query so malformed input answers 400 with a detail message
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 BeautyPro

use crate::errors::AppError;
use axum::extract::{FromRequest, FromRequestParts};

/// JSON body extractor rejecting with [`AppError`]
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

/// Query string extractor rejecting with [`AppError`]
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct AppQuery<T>(pub T);
