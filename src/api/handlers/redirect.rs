//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its original URL and records the click.
///
/// # Endpoint
///
/// `GET /{code}`, public.
///
/// Resolution and click recording are separate service calls: the lookup is
/// read-only and the click increment is a single atomic update, so two
/// simultaneous hits both count.
///
/// # Errors
///
/// Returns 404 when the code is unknown.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    let link = state.link_service.resolve(&code).await?;
    state.link_service.record_click(&code).await?;

    tracing::debug!(code = %code, "redirecting");

    Ok((
        StatusCode::FOUND,
        [(header::LOCATION, link.original_url)],
    )
        .into_response())
}
