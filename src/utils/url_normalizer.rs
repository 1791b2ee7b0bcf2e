//! URL validation and normalization.

use url::Url;

/// Errors produced while normalizing a destination URL.
#[derive(Debug, thiserror::Error)]
pub enum UrlNormalizationError {
    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS protocols are allowed")]
    UnsupportedProtocol,
}

/// Validates that `raw` is an absolute http(s) URL and normalizes it.
///
/// `url::Url` lowercases the host and drops default ports during parsing;
/// path, query, and fragment are preserved so the redirect target is exact.
///
/// Rejecting non-http(s) schemes closes off `javascript:`, `data:`, and
/// `file:` redirect targets.
pub fn normalize_url(raw: &str) -> Result<String, UrlNormalizationError> {
    let parsed =
        Url::parse(raw.trim()).map_err(|e| UrlNormalizationError::InvalidFormat(e.to_string()))?;

    match parsed.scheme() {
        "http" | "https" => Ok(parsed.to_string()),
        _ => Err(UrlNormalizationError::UnsupportedProtocol),
    }
}
