//! Short code generation and validation.

use crate::error::AppError;
use rand::Rng;
use serde_json::json;

/// URL-safe alphabet used for generated codes: 64 symbols, so a 6-character
/// code spans 64^6 ≈ 6.8e10 combinations.
const ALPHABET: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_";

/// Bounds for caller-supplied custom codes.
const CUSTOM_CODE_MIN: usize = 4;
const CUSTOM_CODE_MAX: usize = 32;

/// Codes reserved for service endpoints; using them as short links would
/// shadow routes.
const RESERVED_CODES: &[&str] = &["api", "health", "admin"];

/// Generates a random short code of `length` characters from [`ALPHABET`].
///
/// Uniqueness is not guaranteed here; the store's unique index is the
/// authoritative guard and callers retry on collision.
pub fn generate_code(length: usize) -> String {
    let mut rng = rand::rng();
    (0..length)
        .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
        .collect()
}

/// Validates a caller-supplied custom short code.
///
/// # Rules
///
/// - Length: 4-32 characters
/// - Allowed characters: ASCII letters, digits, hyphen, underscore
/// - Cannot be a reserved route name
///
/// # Errors
///
/// Returns [`AppError::Validation`] if any rule is violated.
pub fn validate_custom_code(code: &str) -> Result<(), AppError> {
    if code.len() < CUSTOM_CODE_MIN || code.len() > CUSTOM_CODE_MAX {
        return Err(AppError::bad_request(
            "Custom code must be 4-32 characters",
            json!({ "provided_length": code.len() }),
        ));
    }

    if !code
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(AppError::bad_request(
            "Custom code can only contain letters, digits, hyphens, and underscores",
            json!({ "code": code }),
        ));
    }

    if RESERVED_CODES.contains(&code) {
        return Err(AppError::bad_request(
            "This code is reserved",
            json!({ "code": code }),
        ));
    }

    Ok(())
}
