// ABOUTME: HTTP request handlers for the ROM download catalog
// ABOUTME: Search and type filtering for everyone, uploads and edits for admins

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json as ResponseJson},
};
use serde::Deserialize;
use sleep_core::{RomCreateInput, RomWithDevice};
use sleep_storage::RomQuery;
use tracing::info;

use crate::auth::AdminUser;
use crate::error::ApiResult;
use crate::extract::{ApiJson, ApiPath};
use crate::response::{ack, ApiResponse};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RomQueryParams {
    /// Free-text search over title, device name and codename
    pub q: Option<String>,
    /// Comma-joined OS types, e.g. `AOSP,Port`
    pub types: Option<String>,
}

/// Query the catalog, newest uploads first
pub async fn query_roms(
    State(state): State<AppState>,
    Query(params): Query<RomQueryParams>,
) -> ApiResult<impl IntoResponse> {
    info!(
        "Querying ROMs (q: {:?}, types: {:?})",
        params.q, params.types
    );

    let query = RomQuery::from_params(params.q.as_deref(), params.types.as_deref())?;
    let roms = state.store.query_roms(&query).await?;
    Ok((StatusCode::OK, ResponseJson(ApiResponse::success(roms))))
}

/// Upload a new ROM build
pub async fn create_rom(
    _admin: AdminUser,
    State(state): State<AppState>,
    ApiJson(input): ApiJson<RomCreateInput>,
) -> ApiResult<impl IntoResponse> {
    info!("Creating ROM: {} for device {}", input.title, input.device_id);

    state.store.create_rom(input).await?;
    Ok((StatusCode::CREATED, ResponseJson(ack())))
}

/// Replace a ROM. The nested device decides which device it belongs to.
pub async fn update_rom(
    _admin: AdminUser,
    State(state): State<AppState>,
    ApiPath(rom_id): ApiPath<u32>,
    ApiJson(mut rom): ApiJson<RomWithDevice>,
) -> ApiResult<impl IntoResponse> {
    info!("Updating ROM: {}", rom_id);

    rom.rom.id = rom_id;
    state.store.update_rom(rom).await?;
    Ok((StatusCode::OK, ResponseJson(ack())))
}

pub async fn delete_rom(
    _admin: AdminUser,
    State(state): State<AppState>,
    ApiPath(rom_id): ApiPath<u32>,
) -> ApiResult<impl IntoResponse> {
    info!("Deleting ROM: {}", rom_id);

    state.store.delete_rom(rom_id).await?;
    Ok((StatusCode::OK, ResponseJson(ack())))
}
