//! Handlers for registration and login endpoints.

use axum::{Json, extract::State, http::StatusCode};
use validator::Validate;

use crate::api::dto::auth::{AuthResponse, LoginRequest, RegisterRequest, UserDto};
use crate::error::AppError;
use crate::state::AppState;

/// Registers a new account.
///
/// # Endpoint
///
/// `POST /api/v1/auth/register`
///
/// # Errors
///
/// Returns 400 on invalid input or an already-registered email.
pub async fn register_handler(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), AppError> {
    payload.validate()?;

    let (user, token) = state
        .auth_service
        .register(payload.email, payload.password, payload.name)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            user: UserDto::from(&user),
            token,
        }),
    ))
}

/// Authenticates credentials and issues a fresh token.
///
/// # Endpoint
///
/// `POST /api/v1/auth/login`
///
/// # Errors
///
/// Returns 401 on bad credentials; unknown email and wrong password are
/// indistinguishable.
pub async fn login_handler(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    payload.validate()?;

    let (user, token) = state
        .auth_service
        .login(payload.email, payload.password)
        .await?;

    Ok(Json(AuthResponse {
        user: UserDto::from(&user),
        token,
    }))
}
