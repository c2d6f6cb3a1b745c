// ABOUTME: HTTP request handlers for supported devices
// ABOUTME: Public listing plus admin create, update and delete

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json as ResponseJson},
};
use sleep_core::{Device, DeviceInput};
use tracing::info;

use crate::auth::AdminUser;
use crate::error::ApiResult;
use crate::extract::{ApiJson, ApiPath};
use crate::response::{ack, ApiResponse};
use crate::state::AppState;

/// List all devices
pub async fn list_devices(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    info!("Listing devices");

    let devices = state.store.list_devices().await?;
    Ok((StatusCode::OK, ResponseJson(ApiResponse::success(devices))))
}

/// Register a device. A missing photo gets the placeholder image.
pub async fn create_device(
    _admin: AdminUser,
    State(state): State<AppState>,
    ApiJson(input): ApiJson<DeviceInput>,
) -> ApiResult<impl IntoResponse> {
    info!("Creating device: {} ({})", input.name, input.model);

    let device = state.store.create_device(input).await?;
    Ok((StatusCode::CREATED, ResponseJson(ApiResponse::success(device))))
}

/// Replace a device and return the stored record
pub async fn update_device(
    _admin: AdminUser,
    State(state): State<AppState>,
    ApiPath(device_id): ApiPath<u32>,
    ApiJson(device): ApiJson<Device>,
) -> ApiResult<impl IntoResponse> {
    info!("Updating device: {}", device_id);

    let device = state
        .store
        .update_device(Device {
            id: device_id,
            ..device
        })
        .await?;
    Ok((StatusCode::OK, ResponseJson(ApiResponse::success(device))))
}

pub async fn delete_device(
    _admin: AdminUser,
    State(state): State<AppState>,
    ApiPath(device_id): ApiPath<u32>,
) -> ApiResult<impl IntoResponse> {
    info!("Deleting device: {}", device_id);

    state.store.delete_device(device_id).await?;
    Ok((StatusCode::OK, ResponseJson(ack())))
}
