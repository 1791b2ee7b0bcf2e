//! Handlers for link creation and ownership-scoped management.

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde_json::json;
use validator::Validate;

use crate::api::dto::links::{DeleteResponse, LinkDto, ShortenRequest, UpdateLinkRequest};
use crate::api::middleware::auth::{AuthUser, MaybeAuthUser};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a shortened link.
///
/// # Endpoint
///
/// `POST /api/v1/shorten`. Authentication is optional; authenticated callers
/// own the link, anonymous callers create ownerless links.
///
/// # Errors
///
/// Returns 400 on an invalid URL or a custom code that is taken.
pub async fn shorten_handler(
    State(state): State<AppState>,
    Extension(MaybeAuthUser(owner)): Extension<MaybeAuthUser>,
    Json(payload): Json<ShortenRequest>,
) -> Result<(StatusCode, Json<LinkDto>), AppError> {
    payload.validate()?;

    let link = state
        .link_service
        .create_link(payload.original_url, payload.title, owner, payload.custom_code)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(LinkDto::from_link(&link, &state.base_url)),
    ))
}

/// Lists the caller's links, newest first.
///
/// # Endpoint
///
/// `GET /api/v1/urls`. Authentication required.
pub async fn list_links_handler(
    State(state): State<AppState>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
) -> Result<Json<Vec<LinkDto>>, AppError> {
    let links = state.link_service.list_by_owner(user_id).await?;

    let dtos = links
        .iter()
        .map(|link| LinkDto::from_link(link, &state.base_url))
        .collect();

    Ok(Json(dtos))
}

/// Partially updates one of the caller's links.
///
/// # Endpoint
///
/// `PUT /api/v1/urls/{id}`. Authentication required.
///
/// # Errors
///
/// Returns 404 when the id is unknown or owned by someone else; the two
/// cases are indistinguishable to the caller.
pub async fn update_link_handler(
    State(state): State<AppState>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateLinkRequest>,
) -> Result<Json<LinkDto>, AppError> {
    payload.validate()?;

    let link = state
        .link_service
        .update_link(id, user_id, payload.into())
        .await?;

    Ok(Json(LinkDto::from_link(&link, &state.base_url)))
}

/// Deletes one of the caller's links.
///
/// # Endpoint
///
/// `DELETE /api/v1/urls/{id}`. Authentication required.
///
/// # Errors
///
/// Returns 404 when nothing was removed, covering both a missing id and a
/// wrong owner.
pub async fn delete_link_handler(
    State(state): State<AppState>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    Path(id): Path<i64>,
) -> Result<Json<DeleteResponse>, AppError> {
    let deleted = state.link_service.delete_link(id, user_id).await?;

    if !deleted {
        return Err(AppError::not_found("URL not found", json!({ "id": id })));
    }

    Ok(Json(DeleteResponse {
        message: "URL deleted successfully",
    }))
}
