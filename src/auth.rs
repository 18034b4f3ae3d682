// ABOUTME: JWT-based professional authentication and password hashing
// ABOUTME: Issues and validates HS256 bearer tokens and runs bcrypt on the blocking pool
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 BeautyPro

//! # Authentication
//!
//! Tokens are HS256-signed with a server secret and carry the professional's
//! tenant id in `sub`. Validation checks the signature and the expiry only;
//! there is no revocation list, so a token stays valid until `exp`.

use crate::errors::{AppError, AppResult};
use crate::models::TenantId;
use anyhow::Result;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Why a bearer token was refused
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JwtValidationError {
    /// `exp` is in the past
    TokenExpired {
        /// The token's `exp` claim
        expired_at: DateTime<Utc>,
    },
    /// Signed with another secret, or rejected by the JWT library
    TokenInvalid {
        /// Library-level reason
        reason: String,
    },
    /// Not a decodable HS256 token, or `sub` is not a tenant id
    TokenMalformed {
        /// What failed to decode
        details: String,
    },
}

impl std::fmt::Display for JwtValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TokenExpired { expired_at } => {
                write!(f, "token expired at {}", expired_at.to_rfc3339())
            }
            Self::TokenInvalid { reason } => write!(f, "token rejected: {reason}"),
            Self::TokenMalformed { details } => write!(f, "token malformed: {details}"),
        }
    }
}

impl std::error::Error for JwtValidationError {}

/// `JWT` claims for professional authentication
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Tenant id of the professional
    pub sub: String,
    /// Issued at timestamp
    pub iat: i64,
    /// Expiration timestamp
    pub exp: i64,
}

impl Claims {
    /// Parse the subject as a tenant id
    ///
    /// # Errors
    ///
    /// Returns [`JwtValidationError::TokenMalformed`] if `sub` is not a UUID
    pub fn tenant_id(&self) -> Result<TenantId, JwtValidationError> {
        self.sub
            .parse()
            .map_err(|e| JwtValidationError::TokenMalformed {
                details: format!("Subject is not a valid tenant id: {e}"),
            })
    }
}

/// Authentication manager for `JWT` tokens and password hashes
#[derive(Clone)]
pub struct AuthManager {
    jwt_secret: Vec<u8>,
    token_expiry_hours: i64,
    bcrypt_cost: u32,
}

impl AuthManager {
    /// Create a new authentication manager with the default bcrypt cost
    #[must_use]
    pub const fn new(jwt_secret: Vec<u8>, token_expiry_hours: i64) -> Self {
        Self {
            jwt_secret,
            token_expiry_hours,
            bcrypt_cost: bcrypt::DEFAULT_COST,
        }
    }

    /// Override the bcrypt work factor (tests use `limits::MIN_BCRYPT_COST`)
    #[must_use]
    pub fn with_bcrypt_cost(mut self, cost: u32) -> Self {
        self.bcrypt_cost = cost;
        self
    }

    /// Configured token lifetime in hours
    #[must_use]
    pub const fn token_expiry_hours(&self) -> i64 {
        self.token_expiry_hours
    }

    /// Generate an HS256 `JWT` for a professional
    ///
    /// # Errors
    ///
    /// Returns an error if JWT encoding fails
    pub fn generate_token(&self, tenant_id: TenantId) -> AppResult<String> {
        let now = Utc::now();
        let expiry = now + Duration::hours(self.token_expiry_hours);

        let claims = Claims {
            sub: tenant_id.to_string(),
            iat: now.timestamp(),
            exp: expiry.timestamp(),
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(&self.jwt_secret),
        )
        .map_err(|e| AppError::internal(format!("Failed to sign token: {e}")))
    }

    /// Verify signature and expiry and return the claims
    ///
    /// An expired but otherwise valid token yields
    /// [`JwtValidationError::TokenExpired`].
    ///
    /// # Errors
    ///
    /// Returns the reason the token was refused
    pub fn validate_token_detailed(&self, token: &str) -> Result<Claims, JwtValidationError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;

        let key = DecodingKey::from_secret(&self.jwt_secret);
        let claims = decode::<Claims>(token, &key, &validation)
            .map(|data| data.claims)
            .map_err(|e| Self::classify(&e))?;

        let now = Utc::now();
        if claims.exp < now.timestamp() {
            let expired_at = DateTime::from_timestamp(claims.exp, 0).unwrap_or(now);
            tracing::debug!(sub = %claims.sub, expired_at = %expired_at, "Expired token presented");
            return Err(JwtValidationError::TokenExpired { expired_at });
        }
        Ok(claims)
    }

    fn classify(error: &jsonwebtoken::errors::Error) -> JwtValidationError {
        use jsonwebtoken::errors::ErrorKind;

        match error.kind() {
            ErrorKind::InvalidSignature => JwtValidationError::TokenInvalid {
                reason: "signature mismatch".to_owned(),
            },
            ErrorKind::InvalidToken
            | ErrorKind::Base64(_)
            | ErrorKind::Json(_)
            | ErrorKind::Utf8(_) => JwtValidationError::TokenMalformed {
                details: error.to_string(),
            },
            _ => JwtValidationError::TokenInvalid {
                reason: error.to_string(),
            },
        }
    }

    /// Hash a password with bcrypt on the blocking pool
    ///
    /// # Errors
    ///
    /// Returns an error if hashing fails or the blocking task panics
    pub async fn hash_password(&self, password: String) -> AppResult<String> {
        let cost = self.bcrypt_cost;
        tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
            .await
            .map_err(|e| AppError::internal(format!("Password hashing task failed: {e}")))?
            .map_err(|e| AppError::internal(format!("Failed to hash password: {e}")))
    }

    /// Verify a password against a bcrypt hash on the blocking pool
    ///
    /// A malformed stored hash verifies as `false`.
    ///
    /// # Errors
    ///
    /// Returns an error if the blocking task panics
    pub async fn verify_password(&self, password: String, hash: String) -> AppResult<bool> {
        tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash).unwrap_or(false))
            .await
            .map_err(|e| AppError::internal(format!("Password verification task failed: {e}")))
    }
}

/// 64 random bytes for an HS256 key
///
/// # Errors
///
/// Returns an error if the system RNG is unavailable
pub fn generate_jwt_secret() -> Result<[u8; 64]> {
    use ring::rand::{SecureRandom, SystemRandom};

    let mut secret = [0u8; 64];
    SystemRandom::new()
        .fill(&mut secret)
        .map_err(|_| anyhow::anyhow!("System RNG unavailable; cannot generate a signing secret"))?;
    Ok(secret)
}
