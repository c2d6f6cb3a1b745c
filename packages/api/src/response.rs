// ABOUTME: Shared API response envelope
// ABOUTME: Every successful endpoint except login wraps its payload in this shape

use serde::Serialize;

/// Standard API response wrapper
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        ApiResponse {
            success: true,
            data: Some(data),
            error: None,
        }
    }
}

/// Acknowledgement for mutations that only report success
pub fn ack() -> ApiResponse<bool> {
    ApiResponse::success(true)
}
