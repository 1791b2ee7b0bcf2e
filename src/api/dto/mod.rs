//! Data Transfer Objects for API requests and responses.
//!
//! All DTOs use Serde for JSON serialization/deserialization and validator
//! for input validation. Responses are always mapped from domain entities;
//! storage rows never cross this boundary.

pub mod auth;
pub mod health;
pub mod links;
