//! API route configuration.

use axum::{
    Router, middleware,
    routing::{get, post, put},
};

use crate::api::handlers::{
    delete_link_handler, list_links_handler, login_handler, register_handler, shorten_handler,
    update_link_handler,
};
use crate::api::middleware::auth;
use crate::state::AppState;

/// Versioned API routes.
///
/// # Endpoints
///
/// - `POST /auth/register`  - Create an account (public)
/// - `POST /auth/login`     - Authenticate (public)
/// - `POST /shorten`        - Create a short link (optional auth)
/// - `GET  /urls`           - List the caller's links (Bearer required)
/// - `PUT  /urls/{id}`      - Update an owned link (Bearer required)
/// - `DELETE /urls/{id}`    - Delete an owned link (Bearer required)
pub fn v1_routes(state: AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/auth/register", post(register_handler))
        .route("/auth/login", post(login_handler));

    let optional_auth = Router::new()
        .route("/shorten", post(shorten_handler))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::optional,
        ));

    let protected = Router::new()
        .route("/urls", get(list_links_handler))
        .route(
            "/urls/{id}",
            put(update_link_handler).delete(delete_link_handler),
        )
        .route_layer(middleware::from_fn_with_state(state, auth::require));

    public.merge(optional_auth).merge(protected)
}
