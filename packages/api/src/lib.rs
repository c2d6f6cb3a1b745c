// ABOUTME: HTTP API layer for Project Sleep providing REST endpoints and routing
// ABOUTME: Integration layer between the axum server and the catalog store

use axum::{
    routing::{get, post, put},
    Router,
};

pub mod applications_handlers;
pub mod auth;
pub mod auth_handlers;
pub mod devices_handlers;
pub mod error;
pub mod extract;
pub mod features_handlers;
pub mod health;
pub mod notify;
pub mod response;
pub mod roms_handlers;
pub mod state;
pub mod team_handlers;

pub use auth::{AdminAuth, AdminUser};
pub use error::{ApiResult, AppError};
pub use notify::{LogNotifier, Notifier, NotifyError};
pub use response::ApiResponse;
pub use state::AppState;

/// Creates the features API router (nested under /api/features)
pub fn create_features_router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(features_handlers::list_features).post(features_handlers::create_feature),
        )
        .route(
            "/{id}",
            put(features_handlers::update_feature).delete(features_handlers::delete_feature),
        )
}

/// Creates the devices API router (nested under /api/devices)
pub fn create_devices_router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(devices_handlers::list_devices).post(devices_handlers::create_device),
        )
        .route(
            "/{id}",
            put(devices_handlers::update_device).delete(devices_handlers::delete_device),
        )
}

/// Creates the ROM catalog router (nested under /api/roms)
pub fn create_roms_router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(roms_handlers::query_roms).post(roms_handlers::create_rom),
        )
        .route(
            "/{id}",
            put(roms_handlers::update_rom).delete(roms_handlers::delete_rom),
        )
}

/// Creates the admin back-office router (nested under /api/admin)
pub fn create_admin_router() -> Router<AppState> {
    Router::new()
        .route(
            "/applications",
            get(applications_handlers::list_applications),
        )
        .route(
            "/applications/{id}/status",
            put(applications_handlers::update_application_status),
        )
}

/// Creates the full `/api` router with its state attached
pub fn create_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/health", get(health::health_check))
        .route("/team", get(team_handlers::list_team))
        .route(
            "/applications",
            post(applications_handlers::submit_application),
        )
        .route("/login", post(auth_handlers::login))
        .nest("/features", create_features_router())
        .nest("/devices", create_devices_router())
        .nest("/roms", create_roms_router())
        .nest("/admin", create_admin_router());

    Router::new().nest("/api", api).with_state(state)
}
