// ABOUTME: HTTP request handlers for team applications
// ABOUTME: Public submission, admin listing and the approve/reject workflow

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json as ResponseJson},
};
use serde::Deserialize;
use sleep_core::{ApplicationForm, ReviewDecision};
use tracing::{info, warn};

use crate::auth::AdminUser;
use crate::error::ApiResult;
use crate::extract::{ApiJson, ApiPath};
use crate::response::{ack, ApiResponse};
use crate::state::AppState;

/// Submit a "join the team" application. It starts out pending.
pub async fn submit_application(
    State(state): State<AppState>,
    ApiJson(form): ApiJson<ApplicationForm>,
) -> ApiResult<impl IntoResponse> {
    info!("Submitting application from: {}", form.email);

    state.store.submit_application(form).await?;
    Ok((StatusCode::CREATED, ResponseJson(ack())))
}

/// List every application in storage order; reviewers sort client-side
pub async fn list_applications(
    _admin: AdminUser,
    State(state): State<AppState>,
) -> ApiResult<impl IntoResponse> {
    info!("Listing team applications");

    let applications = state.store.list_applications().await?;
    Ok((StatusCode::OK, ResponseJson(ApiResponse::success(applications))))
}

/// Request body for a review decision
#[derive(Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

/// Approve or reject an application, then notify the applicant
pub async fn update_application_status(
    _admin: AdminUser,
    State(state): State<AppState>,
    ApiPath(application_id): ApiPath<u32>,
    ApiJson(request): ApiJson<UpdateStatusRequest>,
) -> ApiResult<impl IntoResponse> {
    info!(
        "Setting application {} status to {}",
        application_id, request.status
    );

    let decision: ReviewDecision = request.status.parse()?;
    let application = state
        .store
        .set_application_status(application_id, decision)
        .await?;

    // Delivery problems never undo the decision
    if let Err(e) = state.notifier.application_reviewed(&application).await {
        warn!(application_id = application.id, error = %e, "Review notification failed");
    }

    Ok((StatusCode::OK, ResponseJson(ack())))
}
