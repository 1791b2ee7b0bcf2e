//! Bearer token issuance and verification.
//!
//! Tokens are HS256 JWTs carrying the user id, issue time, and expiry. The
//! signing secret and lifetime come from [`crate::config::Config`]; nothing
//! here reads the environment.

use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::AppError;

/// Token claims.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User id, stringified per the JWT `sub` convention.
    pub sub: String,
    /// Issued-at, seconds since epoch.
    pub iat: i64,
    /// Expiry, seconds since epoch.
    pub exp: i64,
}

/// Issues a signed token for `user_id` valid for `ttl_seconds`.
pub fn issue(user_id: i64, secret: &str, ttl_seconds: u64) -> Result<String, AppError> {
    let now = Utc::now();
    let claims = Claims {
        sub: user_id.to_string(),
        iat: now.timestamp(),
        exp: (now + Duration::seconds(ttl_seconds as i64)).timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::internal("Failed to sign token", json!({ "source": e.to_string() })))
}

/// Verifies a token and returns the user id it was issued for.
///
/// # Errors
///
/// Returns [`AppError::Unauthorized`] on expiry, signature mismatch, or a
/// malformed token. The message is deliberately uniform across causes.
pub fn verify(token: &str, secret: &str) -> Result<i64, AppError> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|_| AppError::unauthorized("Invalid or expired token", json!({})))?;

    data.claims
        .sub
        .parse()
        .map_err(|_| AppError::unauthorized("Invalid or expired token", json!({})))
}
