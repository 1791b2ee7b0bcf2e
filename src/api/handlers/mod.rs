//! HTTP request handlers for API endpoints.

pub mod auth;
pub mod health;
pub mod links;
pub mod redirect;

pub use auth::{login_handler, register_handler};
pub use health::health_handler;
pub use links::{delete_link_handler, list_links_handler, shorten_handler, update_link_handler};
pub use redirect::redirect_handler;
