//! DTOs for link management endpoints.

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use validator::Validate;

use crate::domain::entities::{Link, LinkPatch};

/// Compiled pattern for caller-supplied short codes.
static CUSTOM_CODE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").unwrap());

/// Request body for `POST /api/v1/shorten`.
#[derive(Debug, Deserialize, Validate)]
pub struct ShortenRequest {
    /// The destination URL (must be valid HTTP/HTTPS).
    #[validate(url(message = "Valid URL is required"))]
    pub original_url: String,

    /// Optional display title.
    #[validate(length(max = 255))]
    pub title: Option<String>,

    /// Optional custom short code.
    #[validate(length(min = 4, max = 32))]
    #[validate(regex(path = "*CUSTOM_CODE_REGEX"))]
    pub custom_code: Option<String>,
}

/// Request body for `PUT /api/v1/urls/{id}`.
///
/// Absent fields are left unchanged.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateLinkRequest {
    #[validate(url(message = "Valid URL is required"))]
    pub original_url: Option<String>,

    #[validate(length(max = 255))]
    pub title: Option<String>,
}

impl From<UpdateLinkRequest> for LinkPatch {
    fn from(req: UpdateLinkRequest) -> Self {
        LinkPatch {
            original_url: req.original_url,
            title: req.title,
        }
    }
}

/// External link shape.
///
/// Built from the domain entity plus the configured base URL; the storage
/// row and the owner id never appear here.
#[derive(Debug, Serialize)]
pub struct LinkDto {
    pub id: i64,
    pub original_url: String,
    pub short_code: String,
    pub short_url: String,
    pub title: Option<String>,
    pub clicks: i64,
    pub created_at: DateTime<Utc>,
    pub clicks_at: DateTime<Utc>,
}

impl LinkDto {
    pub fn from_link(link: &Link, base_url: &str) -> Self {
        LinkDto {
            id: link.id,
            original_url: link.original_url.clone(),
            short_code: link.short_code.clone(),
            short_url: format!("{}/{}", base_url.trim_end_matches('/'), link.short_code),
            title: link.title.clone(),
            clicks: link.clicks,
            created_at: link.created_at,
            clicks_at: link.clicks_at,
        }
    }
}

/// Confirmation body for `DELETE /api/v1/urls/{id}`.
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub message: &'static str,
}
