// ABOUTME: Bearer authentication for protected routes
// ABOUTME: Extracts the Authorization header and resolves the token to the calling professional
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 BeautyPro

use crate::constants::messages;
use crate::errors::{AppError, AppResult};
use crate::models::User;
use crate::resources::ServerResources;
use crate::services::identity;
use axum::http::{header, HeaderMap};

/// Extract the token from an `Authorization: Bearer <token>` header
///
/// The scheme is matched case-insensitively.
///
/// # Errors
///
/// Returns `AuthRequired` ("Não autenticado") when the header is missing,
/// not UTF-8, uses another scheme, or carries an empty token
pub fn bearer_token(headers: &HeaderMap) -> AppResult<&str> {
    let value = headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| AppError::auth_required(messages::NOT_AUTHENTICATED))?;

    let (scheme, token) = value
        .split_once(' ')
        .ok_or_else(|| AppError::auth_required(messages::NOT_AUTHENTICATED))?;
    let token = token.trim();
    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return Err(AppError::auth_required(messages::NOT_AUTHENTICATED));
    }
    Ok(token)
}

/// Authenticate a request and return the calling professional
///
/// # Errors
///
/// Returns `AuthRequired` without credentials and `AuthInvalid` for a bad
/// token or a deleted user
#[tracing::instrument(
    skip_all,
    fields(user_id = tracing::field::Empty, success = tracing::field::Empty)
)]
pub async fn authenticate(headers: &HeaderMap, resources: &ServerResources) -> AppResult<User> {
    let token = bearer_token(headers)?;
    match identity::authenticate(&resources.database, &resources.auth_manager, token).await {
        Ok(user) => {
            tracing::Span::current()
                .record("user_id", user.id.to_string())
                .record("success", true);
            Ok(user)
        }
        Err(e) => {
            tracing::Span::current().record("success", false);
            tracing::debug!(error = %e, "Bearer authentication failed");
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorCode;
    use axum::http::HeaderValue;

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_bearer_token_extraction() {
        assert_eq!(bearer_token(&headers_with("Bearer abc.def")).unwrap(), "abc.def");
        assert_eq!(bearer_token(&headers_with("bearer abc")).unwrap(), "abc");
    }

    #[test]
    fn test_missing_or_foreign_scheme_is_not_authenticated() {
        for headers in [
            HeaderMap::new(),
            headers_with("Basic dXNlcjpwYXNz"),
            headers_with("Bearer "),
            headers_with("token"),
        ] {
            let error = bearer_token(&headers).unwrap_err();
            assert_eq!(error.code, ErrorCode::AuthRequired);
            assert_eq!(error.message, messages::NOT_AUTHENTICATED);
        }
    }
}
