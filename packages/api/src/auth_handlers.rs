// ABOUTME: Login endpoint for the admin back-office
// ABOUTME: Returns the user and bearer token without the usual envelope

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use sleep_core::validation::validate_login;
use sleep_core::LoginRequest;
use tracing::{info, warn};

use crate::error::{ApiResult, AppError};
use crate::extract::ApiJson;
use crate::state::AppState;

/// Exchange the admin credentials for a bearer token. Failures never say
/// which half of the pair was wrong.
pub async fn login(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<LoginRequest>,
) -> ApiResult<impl IntoResponse> {
    info!("Login attempt for: {}", request.email);

    validate_login(&request)?;

    match state.auth.login(&request.email, &request.password) {
        Some(response) => Ok((StatusCode::OK, Json(response))),
        None => {
            warn!("Rejected login for: {}", request.email);
            Err(AppError::InvalidCredentials)
        }
    }
}
