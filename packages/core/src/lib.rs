// ABOUTME: Core types, validation and utilities for Project Sleep
// ABOUTME: Foundational package shared by storage, API and CLI

pub mod constants;
pub mod review;
pub mod types;
pub mod utils;
pub mod validation;

// Re-export main types
pub use types::{
    ApplicationForm, ApplicationStatus, Device, DeviceInput, Feature, FeatureInput, LoginRequest,
    LoginResponse, LoginUser, OsType, ReviewDecision, Rom, RomCreateInput, RomWithDevice,
    TeamApplication, TeamMember, TransitionPolicy, User, UserRole,
};

// Re-export constants
pub use constants::{client_state_file, sleep_dir};

// Re-export utilities
pub use review::{pending_count, sort_for_review};
pub use utils::{generate_token, today};

// Re-export validation
pub use validation::{ValidationError, ValidationResult};
