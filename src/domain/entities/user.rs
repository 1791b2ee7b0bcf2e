//! User entity for registered accounts.

use chrono::{DateTime, Utc};

/// A registered account.
///
/// The password hash never leaves the service layer; API responses are built
/// from a dedicated DTO that omits it.
#[derive(Debug, Clone)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input data for creating a new user.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub name: String,
}
