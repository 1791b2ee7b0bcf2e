mod common;

use axum::{Router, routing::post};
use axum_test::TestServer;
use serde_json::json;
use sqlx::PgPool;

use refurl::api::handlers::{login_handler, register_handler};

fn auth_app(pool: PgPool) -> TestServer {
    let state = common::create_test_state(pool);
    let app = Router::new()
        .route("/api/v1/auth/register", post(register_handler))
        .route("/api/v1/auth/login", post(login_handler))
        .with_state(state);
    TestServer::new(app).unwrap()
}

#[sqlx::test]
async fn test_register_success(pool: PgPool) {
    let server = auth_app(pool);

    let response = server
        .post("/api/v1/auth/register")
        .json(&json!({
            "email": "a@x.com",
            "password": "secret1",
            "name": "A"
        }))
        .await;

    response.assert_status(axum::http::StatusCode::CREATED);

    let body = response.json::<serde_json::Value>();
    assert_eq!(body["user"]["email"], "a@x.com");
    assert_eq!(body["user"]["name"], "A");
    assert!(body["user"]["id"].is_i64());
    assert!(body["token"].is_string());
    assert!(body["user"].get("password_hash").is_none());
}

#[sqlx::test]
async fn test_register_duplicate_email(pool: PgPool) {
    common::create_test_user(&pool, "a@x.com", "secret1").await;
    let server = auth_app(pool);

    let response = server
        .post("/api/v1/auth/register")
        .json(&json!({
            "email": "a@x.com",
            "password": "other-password",
            "name": "B"
        }))
        .await;

    response.assert_status_bad_request();
    let body = response.json::<serde_json::Value>();
    assert_eq!(body["error"]["message"], "User already exists");
}

#[sqlx::test]
async fn test_register_duplicate_email_case_insensitive(pool: PgPool) {
    common::create_test_user(&pool, "a@x.com", "secret1").await;
    let server = auth_app(pool);

    let response = server
        .post("/api/v1/auth/register")
        .json(&json!({
            "email": "A@X.COM",
            "password": "other-password",
            "name": "B"
        }))
        .await;

    response.assert_status_bad_request();
}

#[sqlx::test]
async fn test_register_rejects_invalid_input(pool: PgPool) {
    let server = auth_app(pool);

    let bad_email = server
        .post("/api/v1/auth/register")
        .json(&json!({ "email": "nope", "password": "secret1", "name": "A" }))
        .await;
    bad_email.assert_status_bad_request();

    let short_password = server
        .post("/api/v1/auth/register")
        .json(&json!({ "email": "a@x.com", "password": "short", "name": "A" }))
        .await;
    short_password.assert_status_bad_request();
}

#[sqlx::test]
async fn test_login_success(pool: PgPool) {
    common::create_test_user(&pool, "a@x.com", "secret1").await;
    let server = auth_app(pool);

    let response = server
        .post("/api/v1/auth/login")
        .json(&json!({ "email": "a@x.com", "password": "secret1" }))
        .await;

    response.assert_status_ok();
    let body = response.json::<serde_json::Value>();
    assert_eq!(body["user"]["email"], "a@x.com");
    assert!(body["token"].is_string());
}

#[sqlx::test]
async fn test_login_failures_are_identical(pool: PgPool) {
    common::create_test_user(&pool, "a@x.com", "secret1").await;
    let server = auth_app(pool);

    let wrong_password = server
        .post("/api/v1/auth/login")
        .json(&json!({ "email": "a@x.com", "password": "wrong-password" }))
        .await;
    let unknown_email = server
        .post("/api/v1/auth/login")
        .json(&json!({ "email": "ghost@x.com", "password": "secret1" }))
        .await;

    wrong_password.assert_status_unauthorized();
    unknown_email.assert_status_unauthorized();

    // Same error body for both failure modes.
    assert_eq!(
        wrong_password.json::<serde_json::Value>()["error"],
        unknown_email.json::<serde_json::Value>()["error"]
    );
}

#[sqlx::test]
async fn test_register_then_login_scenario(pool: PgPool) {
    let server = auth_app(pool);

    let register = server
        .post("/api/v1/auth/register")
        .json(&json!({ "email": "a@x.com", "password": "secret1", "name": "A" }))
        .await;
    register.assert_status(axum::http::StatusCode::CREATED);
    let t1 = register.json::<serde_json::Value>()["token"]
        .as_str()
        .unwrap()
        .to_string();

    let login = server
        .post("/api/v1/auth/login")
        .json(&json!({ "email": "a@x.com", "password": "secret1" }))
        .await;
    login.assert_status_ok();
    let t2 = login.json::<serde_json::Value>()["token"]
        .as_str()
        .unwrap()
        .to_string();

    // Both tokens verify for the same user (they need not be equal).
    let id1 = refurl::utils::token::verify(&t1, common::TEST_SECRET).unwrap();
    let id2 = refurl::utils::token::verify(&t2, common::TEST_SECRET).unwrap();
    assert_eq!(id1, id2);

    let bad = server
        .post("/api/v1/auth/login")
        .json(&json!({ "email": "a@x.com", "password": "wrong" }))
        .await;
    bad.assert_status_unauthorized();
}
