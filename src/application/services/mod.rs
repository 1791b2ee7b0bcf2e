//! Application services orchestrating domain logic.

pub mod auth_service;
pub mod link_service;

pub use auth_service::AuthService;
pub use link_service::LinkService;

use crate::error::AppError;
use serde_json::json;
use std::future::Future;
use std::time::Duration;

/// Bounds a store round-trip with a timeout.
///
/// Request handling must not hang on a stalled store; expiry maps to a
/// retryable [`AppError::Unavailable`].
pub(crate) async fn bound<T, F>(limit: Duration, fut: F) -> Result<T, AppError>
where
    F: Future<Output = Result<T, AppError>>,
{
    match tokio::time::timeout(limit, fut).await {
        Ok(result) => result,
        Err(_) => Err(AppError::unavailable(
            "Storage operation timed out",
            json!({ "timeout_ms": limit.as_millis() as u64 }),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_bound_passes_result_through() {
        let ok = bound(Duration::from_secs(1), async { Ok::<_, AppError>(7) }).await;
        assert_eq!(ok.unwrap(), 7);
    }

    #[tokio::test]
    async fn test_bound_maps_timeout_to_unavailable() {
        let res: Result<(), AppError> = bound(Duration::from_millis(5), async {
            tokio::time::sleep(Duration::from_secs(10)).await;
            Ok(())
        })
        .await;

        assert!(matches!(res.unwrap_err(), AppError::Unavailable { .. }));
    }
}
