//! Shared application state injected into handlers.

use std::sync::Arc;

use crate::application::services::{AuthService, LinkService};

/// Process-wide state: the two services and the public base URL used to
/// render short links. Cheap to clone; services are shared behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<AuthService>,
    pub link_service: Arc<LinkService>,
    pub base_url: String,
}

impl AppState {
    pub fn new(
        auth_service: Arc<AuthService>,
        link_service: Arc<LinkService>,
        base_url: String,
    ) -> Self {
        Self {
            auth_service,
            link_service,
            base_url,
        }
    }
}
