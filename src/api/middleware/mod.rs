//! HTTP middleware for authentication.

pub mod auth;
