use axum::{response::IntoResponse, Json};
use chrono::Utc;
use serde_json::json;

use crate::response::ApiResponse;

pub async fn health_check() -> impl IntoResponse {
    Json(ApiResponse::success(json!({
        "status": "healthy",
        "timestamp": Utc::now().timestamp(),
        "version": env!("CARGO_PKG_VERSION"),
        "service": "projectsleep-api"
    })))
}
