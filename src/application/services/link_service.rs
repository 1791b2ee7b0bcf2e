//! Link creation, resolution, click recording, and ownership-scoped CRUD.

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;

use crate::application::services::bound;
use crate::domain::entities::{Link, LinkPatch, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::code_generator::{generate_code, validate_custom_code};
use crate::utils::url_normalizer::normalize_url;

/// Service for managing shortened links.
///
/// Collision handling leans on the store: generated codes are inserted
/// optimistically and retried on conflict rather than checked first, so two
/// concurrent creators can never both win the same code.
pub struct LinkService {
    repository: Arc<dyn LinkRepository>,
    code_length: usize,
    code_max_attempts: usize,
    store_timeout: Duration,
}

impl LinkService {
    pub fn new(
        repository: Arc<dyn LinkRepository>,
        code_length: usize,
        code_max_attempts: usize,
        store_timeout: Duration,
    ) -> Self {
        Self {
            repository,
            code_length,
            code_max_attempts,
            store_timeout,
        }
    }

    /// Creates a short link.
    ///
    /// # Arguments
    ///
    /// - `original_url` - destination; must be an absolute http(s) URL
    /// - `title` - optional display title
    /// - `owner` - owning user id; `None` for anonymous links
    /// - `requested_code` - optional caller-supplied code
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for an invalid URL, an invalid
    /// requested code, or a requested code that is already taken. Returns
    /// [`AppError::Conflict`] when the generation retry budget is exhausted.
    pub async fn create_link(
        &self,
        original_url: String,
        title: Option<String>,
        owner: Option<i64>,
        requested_code: Option<String>,
    ) -> Result<Link, AppError> {
        let normalized_url = normalize_url(&original_url).map_err(|e| {
            AppError::bad_request("Invalid URL format", json!({ "reason": e.to_string() }))
        })?;

        if let Some(code) = requested_code {
            validate_custom_code(&code)?;

            let new_link = NewLink {
                owner,
                original_url: normalized_url,
                short_code: code.clone(),
                title,
            };

            return match bound(self.store_timeout, self.repository.create(new_link)).await {
                Err(AppError::Conflict { .. }) => Err(AppError::bad_request(
                    "Short code already in use",
                    json!({ "code": code }),
                )),
                other => other,
            };
        }

        for attempt in 1..=self.code_max_attempts {
            let new_link = NewLink {
                owner,
                original_url: normalized_url.clone(),
                short_code: generate_code(self.code_length),
                title: title.clone(),
            };

            match bound(self.store_timeout, self.repository.create(new_link)).await {
                Ok(link) => return Ok(link),
                Err(AppError::Conflict { .. }) => {
                    tracing::debug!(attempt, "generated code collided, retrying");
                }
                Err(e) => return Err(e),
            }
        }

        Err(AppError::conflict(
            "Failed to generate a unique short code",
            json!({ "attempts": self.code_max_attempts }),
        ))
    }

    /// Resolves a short code to its link without touching click state.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] when no link has that code.
    pub async fn resolve(&self, code: &str) -> Result<Link, AppError> {
        bound(self.store_timeout, self.repository.find_by_code(code))
            .await?
            .ok_or_else(|| AppError::not_found("Short link not found", json!({ "code": code })))
    }

    /// Records one click: increments the count and refreshes `clicks_at`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] when the code is unknown.
    pub async fn record_click(&self, code: &str) -> Result<(), AppError> {
        let updated = bound(self.store_timeout, self.repository.record_click(code)).await?;

        if !updated {
            return Err(AppError::not_found(
                "Short link not found",
                json!({ "code": code }),
            ));
        }

        Ok(())
    }

    /// Lists the caller's links, newest first.
    pub async fn list_by_owner(&self, owner: i64) -> Result<Vec<Link>, AppError> {
        bound(self.store_timeout, self.repository.list_by_owner(owner)).await
    }

    /// Applies a partial update to a link owned by `owner`.
    ///
    /// A wrong owner and a nonexistent id produce the same error, so callers
    /// cannot probe for other users' link ids.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] when the patched URL is invalid and
    /// [`AppError::NotFound`] when no owned row matched.
    pub async fn update_link(
        &self,
        id: i64,
        owner: i64,
        mut patch: LinkPatch,
    ) -> Result<Link, AppError> {
        if let Some(raw) = patch.original_url.take() {
            let normalized = normalize_url(&raw).map_err(|e| {
                AppError::bad_request("Invalid URL format", json!({ "reason": e.to_string() }))
            })?;
            patch.original_url = Some(normalized);
        }

        bound(self.store_timeout, self.repository.update(id, owner, patch))
            .await?
            .ok_or_else(|| AppError::not_found("URL not found", json!({ "id": id })))
    }

    /// Deletes a link owned by `owner`.
    ///
    /// Returns whether a row was removed; `false` covers both a missing id
    /// and an id owned by someone else.
    pub async fn delete_link(&self, id: i64, owner: i64) -> Result<bool, AppError> {
        bound(self.store_timeout, self.repository.delete(id, owner)).await
    }

    /// Store connectivity probe for the health endpoint.
    pub async fn ping(&self) -> Result<(), AppError> {
        bound(self.store_timeout, self.repository.ping()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockLinkRepository;
    use chrono::Utc;

    const TIMEOUT: Duration = Duration::from_secs(5);

    fn service(repo: MockLinkRepository) -> LinkService {
        LinkService::new(Arc::new(repo), 6, 5, TIMEOUT)
    }

    fn test_link(id: i64, code: &str, url: &str, owner: Option<i64>) -> Link {
        let now = Utc::now();
        Link {
            id,
            owner,
            original_url: url.to_string(),
            short_code: code.to_string(),
            title: None,
            clicks: 0,
            created_at: now,
            clicks_at: now,
        }
    }

    fn conflict() -> AppError {
        AppError::conflict("Unique constraint violation", json!({}))
    }

    #[tokio::test]
    async fn test_create_link_generates_code() {
        let mut repo = MockLinkRepository::new();
        repo.expect_create()
            .withf(|new_link| new_link.short_code.len() == 6 && new_link.owner.is_none())
            .times(1)
            .returning(|new_link| {
                Ok(test_link(1, &new_link.short_code, &new_link.original_url, None))
            });

        let link = service(repo)
            .create_link("https://example.com".to_string(), None, None, None)
            .await
            .unwrap();

        assert_eq!(link.original_url, "https://example.com/");
        assert_eq!(link.clicks, 0);
    }

    #[tokio::test]
    async fn test_create_link_rejects_invalid_url() {
        let repo = MockLinkRepository::new();

        let err = service(repo)
            .create_link("not-a-url".to_string(), None, None, None)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_create_link_uses_requested_code() {
        let mut repo = MockLinkRepository::new();
        repo.expect_create()
            .withf(|new_link| new_link.short_code == "abc123")
            .times(1)
            .returning(|new_link| {
                Ok(test_link(1, &new_link.short_code, &new_link.original_url, Some(7)))
            });

        let link = service(repo)
            .create_link(
                "https://example.com".to_string(),
                None,
                Some(7),
                Some("abc123".to_string()),
            )
            .await
            .unwrap();

        assert_eq!(link.short_code, "abc123");
        assert_eq!(link.owner, Some(7));
    }

    #[tokio::test]
    async fn test_create_link_requested_code_collision_is_validation_error() {
        let mut repo = MockLinkRepository::new();
        repo.expect_create().times(1).returning(|_| Err(conflict()));

        let err = service(repo)
            .create_link(
                "https://other.com".to_string(),
                None,
                None,
                Some("abc123".to_string()),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Validation { .. }));
        assert!(err.to_string().contains("already in use"));
    }

    #[tokio::test]
    async fn test_create_link_retries_generated_code_on_collision() {
        let mut repo = MockLinkRepository::new();
        let mut calls = 0;
        repo.expect_create().times(3).returning(move |new_link| {
            calls += 1;
            if calls < 3 {
                Err(conflict())
            } else {
                Ok(test_link(9, &new_link.short_code, &new_link.original_url, None))
            }
        });

        let link = service(repo)
            .create_link("https://example.com".to_string(), None, None, None)
            .await
            .unwrap();

        assert_eq!(link.id, 9);
    }

    #[tokio::test]
    async fn test_create_link_exhausted_retries_is_conflict() {
        let mut repo = MockLinkRepository::new();
        repo.expect_create().times(5).returning(|_| Err(conflict()));

        let err = service(repo)
            .create_link("https://example.com".to_string(), None, None, None)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Conflict { .. }));
    }

    #[tokio::test]
    async fn test_resolve_does_not_record_clicks() {
        let mut repo = MockLinkRepository::new();
        repo.expect_find_by_code()
            .times(2)
            .returning(|code| Ok(Some(test_link(1, code, "https://example.com/", None))));
        repo.expect_record_click().times(0);

        let svc = service(repo);
        let first = svc.resolve("abc123").await.unwrap();
        let second = svc.resolve("abc123").await.unwrap();

        assert_eq!(first.clicks, second.clicks);
    }

    #[tokio::test]
    async fn test_resolve_unknown_code() {
        let mut repo = MockLinkRepository::new();
        repo.expect_find_by_code().times(1).returning(|_| Ok(None));

        let err = service(repo).resolve("missing").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_record_click_unknown_code() {
        let mut repo = MockLinkRepository::new();
        repo.expect_record_click().times(1).returning(|_| Ok(false));

        let err = service(repo).record_click("missing").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_update_link_validates_patched_url() {
        let repo = MockLinkRepository::new();

        let patch = LinkPatch {
            original_url: Some("javascript:alert(1)".to_string()),
            title: None,
        };
        let err = service(repo).update_link(1, 7, patch).await.unwrap_err();

        assert!(matches!(err, AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_update_link_wrong_owner_matches_missing_id() {
        // The repository returns None for both cases; the service must map
        // them to the identical error.
        let mut repo = MockLinkRepository::new();
        repo.expect_update().times(2).returning(|_, _, _| Ok(None));

        let svc = service(repo);
        let wrong_owner = svc
            .update_link(1, 999, LinkPatch::default())
            .await
            .unwrap_err();
        let missing_id = svc
            .update_link(12345, 7, LinkPatch::default())
            .await
            .unwrap_err();

        assert_eq!(wrong_owner.to_string(), missing_id.to_string());
        assert!(matches!(wrong_owner, AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_delete_link_reports_removal() {
        let mut repo = MockLinkRepository::new();
        repo.expect_delete()
            .withf(|id, owner| *id == 3 && *owner == 7)
            .times(1)
            .returning(|_, _| Ok(true));

        assert!(service(repo).delete_link(3, 7).await.unwrap());
    }
}
