//! Shared utilities: code generation, URL normalization, token handling.

pub mod code_generator;
pub mod token;
pub mod url_normalizer;
