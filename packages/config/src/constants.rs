// ABOUTME: Environment variable name constants
// ABOUTME: Centralized definitions of all environment variable names used across Project Sleep

// Server
pub const SLEEP_API_PORT: &str = "SLEEP_API_PORT";
pub const SLEEP_API_HOST: &str = "SLEEP_API_HOST";
pub const PORT: &str = "PORT"; // Legacy

// CORS
pub const SLEEP_CORS_ORIGIN: &str = "SLEEP_CORS_ORIGIN";

// Data backend
pub const SLEEP_STORE_BACKEND: &str = "SLEEP_STORE_BACKEND";
pub const SLEEP_REMOTE_URL: &str = "SLEEP_REMOTE_URL";
pub const SLEEP_MOCK_LATENCY_MS: &str = "SLEEP_MOCK_LATENCY_MS";

// Application review
pub const SLEEP_STATUS_POLICY: &str = "SLEEP_STATUS_POLICY";

// Admin login
pub const SLEEP_ADMIN_EMAIL: &str = "SLEEP_ADMIN_EMAIL";
pub const SLEEP_ADMIN_PASSWORD: &str = "SLEEP_ADMIN_PASSWORD";
pub const SLEEP_ADMIN_TOKEN: &str = "SLEEP_ADMIN_TOKEN";

// Logging
pub const RUST_LOG: &str = "RUST_LOG";
