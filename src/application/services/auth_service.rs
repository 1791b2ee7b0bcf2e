//! Registration, login, and bearer token verification.

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;

use crate::application::services::bound;
use crate::domain::entities::{NewUser, User};
use crate::domain::repositories::UserRepository;
use crate::error::AppError;
use crate::utils::token;

/// Service for account registration and credential verification.
///
/// Passwords are hashed with bcrypt on a blocking worker thread so the
/// deliberately slow cost factor never stalls the async executor. Login
/// failures are uniform: an unknown email and a wrong password return the
/// same error, and the unknown-email path still runs a bcrypt verification
/// against a fixed dummy hash so the two cases take comparable time.
pub struct AuthService {
    repository: Arc<dyn UserRepository>,
    token_secret: String,
    token_ttl_seconds: u64,
    bcrypt_cost: u32,
    store_timeout: Duration,
    dummy_hash: String,
}

impl AuthService {
    /// Creates a new authentication service.
    ///
    /// `bcrypt_cost` must be a valid bcrypt cost factor; configuration
    /// validates the range before construction.
    pub fn new(
        repository: Arc<dyn UserRepository>,
        token_secret: String,
        token_ttl_seconds: u64,
        bcrypt_cost: u32,
        store_timeout: Duration,
    ) -> Self {
        let dummy_hash = bcrypt::hash("timing-equalizer", bcrypt_cost)
            .expect("bcrypt accepts a validated cost factor");

        Self {
            repository,
            token_secret,
            token_ttl_seconds,
            bcrypt_cost,
            store_timeout,
            dummy_hash,
        }
    }

    /// Registers a new account and issues a bearer token for it.
    ///
    /// The email existence check is an optimization for the common case; the
    /// store's unique index is the authoritative guard, so a conflicting
    /// insert that slips past the check maps to the same error.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] when the email is already registered.
    pub async fn register(
        &self,
        email: String,
        password: String,
        name: String,
    ) -> Result<(User, String), AppError> {
        let existing = bound(self.store_timeout, self.repository.find_by_email(&email)).await?;
        if existing.is_some() {
            return Err(user_exists());
        }

        let password_hash = self.hash_password(password).await?;

        let new_user = NewUser {
            email,
            password_hash,
            name,
        };

        let user = match bound(self.store_timeout, self.repository.create(new_user)).await {
            Err(AppError::Conflict { .. }) => return Err(user_exists()),
            other => other?,
        };

        let token = token::issue(user.id, &self.token_secret, self.token_ttl_seconds)?;

        tracing::info!(user_id = user.id, "user registered");

        Ok((user, token))
    }

    /// Authenticates credentials and issues a fresh bearer token.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] with an identical message for an
    /// unknown email and a wrong password, preventing account enumeration.
    pub async fn login(&self, email: String, password: String) -> Result<(User, String), AppError> {
        let user = bound(self.store_timeout, self.repository.find_by_email(&email)).await?;

        let stored_hash = user
            .as_ref()
            .map(|u| u.password_hash.clone())
            .unwrap_or_else(|| self.dummy_hash.clone());

        let password_matches = self.verify_password(password, stored_hash).await?;

        match user {
            Some(user) if password_matches => {
                let token = token::issue(user.id, &self.token_secret, self.token_ttl_seconds)?;
                tracing::info!(user_id = user.id, "user logged in");
                Ok((user, token))
            }
            _ => Err(invalid_credentials()),
        }
    }

    /// Verifies a bearer token and returns the user id it encodes.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] on expiry, signature mismatch, or
    /// malformed structure.
    pub fn verify_token(&self, raw_token: &str) -> Result<i64, AppError> {
        token::verify(raw_token, &self.token_secret)
    }

    /// Hashes a plaintext password on a blocking worker thread.
    async fn hash_password(&self, password: String) -> Result<String, AppError> {
        let cost = self.bcrypt_cost;
        tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
            .await
            .map_err(|e| {
                AppError::internal("Hashing task failed", json!({ "source": e.to_string() }))
            })?
            .map_err(|e| {
                AppError::internal("Password hashing failed", json!({ "source": e.to_string() }))
            })
    }

    /// Verifies a plaintext password against a stored hash off the executor.
    async fn verify_password(&self, password: String, hash: String) -> Result<bool, AppError> {
        tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
            .await
            .map_err(|e| {
                AppError::internal("Hashing task failed", json!({ "source": e.to_string() }))
            })?
            .map_err(|e| {
                AppError::internal("Password verification failed", json!({ "source": e.to_string() }))
            })
    }
}

fn user_exists() -> AppError {
    AppError::bad_request("User already exists", json!({}))
}

fn invalid_credentials() -> AppError {
    AppError::unauthorized("Invalid credentials", json!({}))
}
