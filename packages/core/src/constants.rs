// ABOUTME: Shared constants and well-known paths for Project Sleep
// ABOUTME: Id floors, admin defaults, placeholders and the client data directory

use std::env;
use std::path::PathBuf;

/// Lowest id handed out for devices, features, team members and applications
pub const DEFAULT_ID_FLOOR: u32 = 0;

/// ROM ids start above this value
pub const ROM_ID_FLOOR: u32 = 100;

/// Id of the synthetic admin user returned by login
pub const ADMIN_USER_ID: u32 = 99;

/// Default login pair for the admin back-office
pub const DEFAULT_ADMIN_EMAIL: &str = "admin@projectsleep.com";
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin";

/// Placeholder used when a device is created without a photo
pub const DEFAULT_DEVICE_PHOTO: &str = "https://via.placeholder.com/300x400?text=No+Image";

/// Checksum recorded for ROMs uploaded without one
pub const DEFAULT_CHECKSUM: &str = "N/A";

/// Role assigned to applications that don't pick one
pub const DEFAULT_APPLICATION_ROLE: &str = "developer";

/// Port the API server listens on unless configured otherwise
pub const DEFAULT_API_PORT: u16 = 8000;

/// Base URL client commands and the remote backend talk to by default
pub const DEFAULT_REMOTE_URL: &str = "http://localhost:8000/api";

/// Get the path to the Project Sleep directory (~/.projectsleep)
pub fn sleep_dir() -> PathBuf {
    // HOME first so tests can redirect it
    if let Ok(home) = env::var("HOME") {
        PathBuf::from(home).join(".projectsleep")
    } else {
        dirs::home_dir()
            .unwrap_or_else(env::temp_dir)
            .join(".projectsleep")
    }
}

/// Get the path to the persisted client state (~/.projectsleep/client.json)
pub fn client_state_file() -> PathBuf {
    sleep_dir().join("client.json")
}
