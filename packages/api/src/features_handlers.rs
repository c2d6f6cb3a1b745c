// ABOUTME: HTTP request handlers for landing page features
// ABOUTME: Public listing plus admin create, update and delete

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json as ResponseJson},
};
use sleep_core::{Feature, FeatureInput};
use tracing::info;

use crate::auth::AdminUser;
use crate::error::ApiResult;
use crate::extract::{ApiJson, ApiPath};
use crate::response::{ack, ApiResponse};
use crate::state::AppState;

/// List all features
pub async fn list_features(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    info!("Listing features");

    let features = state.store.list_features().await?;
    Ok((StatusCode::OK, ResponseJson(ApiResponse::success(features))))
}

/// Create a new feature
pub async fn create_feature(
    _admin: AdminUser,
    State(state): State<AppState>,
    ApiJson(input): ApiJson<FeatureInput>,
) -> ApiResult<impl IntoResponse> {
    info!("Creating feature: {}", input.title);

    let feature = state.store.create_feature(input).await?;
    Ok((StatusCode::CREATED, ResponseJson(ApiResponse::success(feature))))
}

/// Replace a feature. The path id wins over the body id.
pub async fn update_feature(
    _admin: AdminUser,
    State(state): State<AppState>,
    ApiPath(feature_id): ApiPath<u32>,
    ApiJson(feature): ApiJson<Feature>,
) -> ApiResult<impl IntoResponse> {
    info!("Updating feature: {}", feature_id);

    state
        .store
        .update_feature(Feature {
            id: feature_id,
            ..feature
        })
        .await?;
    Ok((StatusCode::OK, ResponseJson(ack())))
}

/// Delete a feature
pub async fn delete_feature(
    _admin: AdminUser,
    State(state): State<AppState>,
    ApiPath(feature_id): ApiPath<u32>,
) -> ApiResult<impl IntoResponse> {
    info!("Deleting feature: {}", feature_id);

    state.store.delete_feature(feature_id).await?;
    Ok((StatusCode::OK, ResponseJson(ack())))
}
