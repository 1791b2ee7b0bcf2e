//! Link entity representing a shortened URL mapping.

use chrono::{DateTime, Utc};

/// A shortened URL with click metadata.
///
/// `owner` is a weak reference to a user id. Anonymous links carry `None`;
/// absence is a true null, never a sentinel value.
#[derive(Debug, Clone)]
pub struct Link {
    pub id: i64,
    pub owner: Option<i64>,
    pub original_url: String,
    pub short_code: String,
    pub title: Option<String>,
    pub clicks: i64,
    pub created_at: DateTime<Utc>,
    pub clicks_at: DateTime<Utc>,
}

impl Link {
    pub fn is_anonymous(&self) -> bool {
        self.owner.is_none()
    }
}

/// Input data for creating a new link.
///
/// Click state is not part of the input: new links always start at zero
/// clicks with `clicks_at` equal to the creation instant.
#[derive(Debug, Clone)]
pub struct NewLink {
    pub owner: Option<i64>,
    pub original_url: String,
    pub short_code: String,
    pub title: Option<String>,
}

/// Partial update for an existing link.
///
/// `None` fields are left unchanged. Click state is never patchable; it only
/// moves through click recording.
#[derive(Debug, Clone, Default)]
pub struct LinkPatch {
    pub original_url: Option<String>,
    pub title: Option<String>,
}

impl LinkPatch {
    pub fn is_empty(&self) -> bool {
        self.original_url.is_none() && self.title.is_none()
    }
}
