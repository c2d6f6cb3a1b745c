// ABOUTME: HTTP request handlers for the public team page

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json as ResponseJson},
};
use tracing::info;

use crate::error::ApiResult;
use crate::response::ApiResponse;
use crate::state::AppState;

pub async fn list_team(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    info!("Listing team members");

    let team = state.store.list_team().await?;
    Ok((StatusCode::OK, ResponseJson(ApiResponse::success(team))))
}
