#![allow(dead_code)]

use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;

use refurl::application::services::{AuthService, LinkService};
use refurl::infrastructure::persistence::{PgLinkRepository, PgUserRepository};
use refurl::state::AppState;
use refurl::utils::token;

pub const TEST_SECRET: &str = "test-signing-secret";
pub const TEST_TOKEN_TTL: u64 = 3600;
// Minimum bcrypt cost keeps hashing fast in tests.
pub const TEST_BCRYPT_COST: u32 = 4;
pub const TEST_BASE_URL: &str = "http://short.test";

pub fn create_test_state(pool: PgPool) -> AppState {
    let pool = Arc::new(pool);

    let auth_service = Arc::new(AuthService::new(
        Arc::new(PgUserRepository::new(pool.clone())),
        TEST_SECRET.to_string(),
        TEST_TOKEN_TTL,
        TEST_BCRYPT_COST,
        Duration::from_secs(5),
    ));
    let link_service = Arc::new(LinkService::new(
        Arc::new(PgLinkRepository::new(pool)),
        6,
        5,
        Duration::from_secs(5),
    ));

    AppState::new(auth_service, link_service, TEST_BASE_URL.to_string())
}

pub async fn create_test_user(pool: &PgPool, email: &str, password: &str) -> i64 {
    let hash = bcrypt::hash(password, TEST_BCRYPT_COST).unwrap();
    sqlx::query_scalar(
        "INSERT INTO users (email, password_hash, name) VALUES ($1, $2, 'Test') RETURNING id",
    )
    .bind(email)
    .bind(hash)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub fn token_for(user_id: i64) -> String {
    token::issue(user_id, TEST_SECRET, TEST_TOKEN_TTL).unwrap()
}

pub async fn create_test_link(pool: &PgPool, owner: Option<i64>, code: &str, url: &str) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO links (owner, original_url, short_code) VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(owner)
    .bind(url)
    .bind(code)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn link_clicks(pool: &PgPool, code: &str) -> i64 {
    sqlx::query_scalar("SELECT clicks FROM links WHERE short_code = $1")
        .bind(code)
        .fetch_one(pool)
        .await
        .unwrap()
}
