//! Bearer token authentication middleware.
//!
//! Two layers over the same verification path:
//!
//! - [`require`] rejects with 401 when the header is missing, not a Bearer
//!   credential, or fails verification; on success it attaches [`AuthUser`].
//! - [`optional`] never rejects; it attaches [`MaybeAuthUser`] so routes can
//!   behave differently for anonymous and authenticated callers.

use axum::{
    extract::{FromRequestParts, Request, State},
    middleware::Next,
    response::Response,
};
use axum_auth::AuthBearer;

use crate::{error::AppError, state::AppState};

/// Authenticated caller identity, attached as a request extension.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser(pub i64);

/// Caller identity for optionally-authenticated routes.
///
/// `None` is a true absence; anonymous callers carry no sentinel id.
#[derive(Debug, Clone, Copy)]
pub struct MaybeAuthUser(pub Option<i64>);

/// Requires a valid `Authorization: Bearer <token>` header.
///
/// # Errors
///
/// Returns `401 Unauthorized` (with `WWW-Authenticate: Bearer`) when the
/// header is missing, malformed, or the token fails verification.
pub async fn require(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let AuthBearer(token) = AuthBearer::from_request_parts(&mut parts, &())
        .await
        .map_err(|_| {
            AppError::unauthorized(
                "Unauthorized",
                serde_json::json!({ "reason": "Authorization header is missing or invalid" }),
            )
        })?;

    let user_id = state.auth_service.verify_token(&token)?;

    let mut req = Request::from_parts(parts, body);
    req.extensions_mut().insert(AuthUser(user_id));

    Ok(next.run(req).await)
}

/// Attaches caller identity when a valid token is present; continues
/// anonymously on any failure.
pub async fn optional(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let (mut parts, body) = req.into_parts();

    let user_id = match AuthBearer::from_request_parts(&mut parts, &()).await {
        Ok(AuthBearer(token)) => state.auth_service.verify_token(&token).ok(),
        Err(_) => None,
    };

    let mut req = Request::from_parts(parts, body);
    req.extensions_mut().insert(MaybeAuthUser(user_id));

    next.run(req).await
}
