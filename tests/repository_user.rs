mod common;

use std::sync::Arc;

use sqlx::PgPool;

use refurl::domain::entities::NewUser;
use refurl::domain::repositories::UserRepository;
use refurl::error::AppError;
use refurl::infrastructure::persistence::PgUserRepository;

fn repo(pool: PgPool) -> PgUserRepository {
    PgUserRepository::new(Arc::new(pool))
}

fn new_user(email: &str) -> NewUser {
    NewUser {
        email: email.to_string(),
        password_hash: "$2b$04$placeholderhashvalue".to_string(),
        name: "Test".to_string(),
    }
}

#[sqlx::test]
async fn test_create_and_find_by_id(pool: PgPool) {
    let repo = repo(pool);

    let user = repo.create(new_user("a@x.com")).await.unwrap();
    assert_eq!(user.email, "a@x.com");

    let found = repo.find_by_id(user.id).await.unwrap().unwrap();
    assert_eq!(found.email, "a@x.com");

    assert!(repo.find_by_id(999_999).await.unwrap().is_none());
}

#[sqlx::test]
async fn test_find_by_email_is_case_insensitive(pool: PgPool) {
    let repo = repo(pool);
    repo.create(new_user("Mixed@Case.com")).await.unwrap();

    let found = repo.find_by_email("mixed@case.com").await.unwrap();
    assert!(found.is_some());

    let found = repo.find_by_email("MIXED@CASE.COM").await.unwrap();
    assert!(found.is_some());

    assert!(repo.find_by_email("ghost@x.com").await.unwrap().is_none());
}

#[sqlx::test]
async fn test_duplicate_email_is_conflict(pool: PgPool) {
    let repo = repo(pool);
    repo.create(new_user("a@x.com")).await.unwrap();

    let same = repo.create(new_user("a@x.com")).await.unwrap_err();
    assert!(matches!(same, AppError::Conflict { .. }));

    // Uniqueness is case-insensitive.
    let different_case = repo.create(new_user("A@X.com")).await.unwrap_err();
    assert!(matches!(different_case, AppError::Conflict { .. }));
}

#[sqlx::test]
async fn test_update_password_hash(pool: PgPool) {
    let repo = repo(pool);
    let user = repo.create(new_user("a@x.com")).await.unwrap();

    let updated = repo
        .update_password_hash(user.id, "$2b$04$rotatedhashvalue")
        .await
        .unwrap();
    assert!(updated);

    let reloaded = repo.find_by_id(user.id).await.unwrap().unwrap();
    assert_eq!(reloaded.password_hash, "$2b$04$rotatedhashvalue");
    assert!(reloaded.updated_at >= user.updated_at);

    assert!(!repo.update_password_hash(999_999, "x").await.unwrap());
}
