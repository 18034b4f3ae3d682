// ABOUTME: Identity and tenancy: registration, login, and bearer token authentication
// ABOUTME: Produces the access-token response shape and resolves tokens back to users
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 BeautyPro

use crate::auth::AuthManager;
use crate::constants::{limits, messages};
use crate::database::Database;
use crate::errors::{AppError, AppResult};
use crate::models::{User, UserProfile};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Registration form
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    /// Display name, at least two characters
    pub name: String,
    /// Login email
    pub email: String,
    /// Password, at least six characters
    pub password: String,
    /// Contact phone
    pub phone: String,
    /// Business name
    pub business_name: String,
}

/// Login form
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    /// Login email
    pub email: String,
    /// Password
    pub password: String,
}

/// Response for successful registration and login
#[derive(Debug, Clone, Serialize)]
pub struct AuthResponse {
    /// Signed bearer token
    pub access_token: String,
    /// Always `"bearer"`
    pub token_type: &'static str,
    /// The authenticated professional
    pub user: UserProfile,
}

/// Lowercase and trim an email for storage and lookup
#[must_use]
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && !email.chars().any(char::is_whitespace)
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}

/// Check registration fields
///
/// # Errors
///
/// Returns `InvalidInput` for a short name, a malformed email, or a short password
pub fn validate_registration(request: &RegisterRequest) -> AppResult<()> {
    if request.name.trim().chars().count() < limits::MIN_NAME_LENGTH {
        return Err(AppError::invalid_input(format!(
            "O nome deve ter pelo menos {} caracteres",
            limits::MIN_NAME_LENGTH
        )));
    }
    if !is_valid_email(&normalize_email(&request.email)) {
        return Err(AppError::invalid_input("Email inválido"));
    }
    if request.password.chars().count() < limits::MIN_PASSWORD_LENGTH {
        return Err(AppError::invalid_input(format!(
            "A senha deve ter pelo menos {} caracteres",
            limits::MIN_PASSWORD_LENGTH
        )));
    }
    Ok(())
}

/// Create an account and sign the first token
///
/// # Errors
///
/// Returns `InvalidInput` for bad fields, `ResourceAlreadyExists` for a taken
/// email, or an internal error if hashing or signing fails
pub async fn register(
    database: &Database,
    auth: &AuthManager,
    request: RegisterRequest,
) -> AppResult<AuthResponse> {
    validate_registration(&request)?;
    let email = normalize_email(&request.email);

    let users = database.users();
    if users.get_by_email(&email).await?.is_some() {
        warn!(auth.event = "register", auth.success = false, "Email already registered");
        return Err(AppError::already_exists(messages::EMAIL_ALREADY_REGISTERED));
    }

    let password_hash = auth.hash_password(request.password).await?;
    let user = User::new(
        request.name.trim().to_owned(),
        email,
        password_hash,
        request.phone,
        request.business_name,
    );
    users.create(&user).await?;

    info!(user.id = %user.id, auth.event = "register", auth.success = true, "User registered");
    issue_token(auth, user)
}

/// Verify credentials and sign a token
///
/// # Errors
///
/// Returns `AuthInvalid` ("Email ou senha incorretos") for an unknown email or
/// a wrong password
pub async fn login(
    database: &Database,
    auth: &AuthManager,
    request: LoginRequest,
) -> AppResult<AuthResponse> {
    let email = normalize_email(&request.email);
    let Some(user) = database.users().get_by_email(&email).await? else {
        warn!(auth.event = "login", auth.success = false, "Unknown email");
        return Err(AppError::auth_invalid(messages::INVALID_CREDENTIALS));
    };

    if !auth
        .verify_password(request.password, user.password_hash.clone())
        .await?
    {
        warn!(user.id = %user.id, auth.event = "login", auth.success = false, "Wrong password");
        return Err(AppError::auth_invalid(messages::INVALID_CREDENTIALS));
    }

    info!(user.id = %user.id, auth.event = "login", auth.success = true, "User logged in");
    issue_token(auth, user)
}

/// Resolve a bearer token to its user
///
/// # Errors
///
/// Returns `AuthInvalid` with "Token inválido" for a bad or expired token and
/// "Usuário não encontrado" when the subject no longer exists
pub async fn authenticate(database: &Database, auth: &AuthManager, token: &str) -> AppResult<User> {
    let tenant_id = auth
        .validate_token_detailed(token)
        .and_then(|claims| claims.tenant_id())
        .map_err(|e| AppError::auth_invalid(messages::INVALID_TOKEN).with_source(e))?;

    database
        .users()
        .get(tenant_id)
        .await?
        .ok_or_else(|| AppError::auth_invalid(messages::USER_NOT_FOUND))
}

fn issue_token(auth: &AuthManager, user: User) -> AppResult<AuthResponse> {
    let access_token = auth.generate_token(user.id)?;
    Ok(AuthResponse {
        access_token,
        token_type: "bearer",
        user: UserProfile::from(user),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(name: &str, email: &str, password: &str) -> RegisterRequest {
        RegisterRequest {
            name: name.into(),
            email: email.into(),
            password: password.into(),
            phone: "11999990000".into(),
            business_name: "Studio".into(),
        }
    }

    #[test]
    fn test_valid_registration() {
        assert!(validate_registration(&request("Ana", "ana@example.com", "segredo")).is_ok());
    }

    #[test]
    fn test_registration_rejects_short_fields() {
        assert!(validate_registration(&request("A", "ana@example.com", "segredo")).is_err());
        assert!(validate_registration(&request("Ana", "ana@example.com", "12345")).is_err());
    }

    #[test]
    fn test_registration_rejects_malformed_email() {
        for email in ["ana", "ana@", "@example.com", "ana@example", "a b@example.com"] {
            assert!(
                validate_registration(&request("Ana", email, "segredo")).is_err(),
                "{email} should be rejected"
            );
        }
    }

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("  Ana@Example.COM "), "ana@example.com");
    }
}
