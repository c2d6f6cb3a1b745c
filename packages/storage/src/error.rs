// ABOUTME: Storage error types
// ABOUTME: Shared by the in-memory and remote catalog backends

use sleep_core::{ApplicationStatus, ValidationError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: u32 },

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),

    #[error("Device {0} does not exist")]
    UnknownDevice(u32),

    #[error("Application {id} has already been {status}")]
    InvalidTransition { id: u32, status: ApplicationStatus },

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Authentication required")]
    Unauthorized,

    #[error("{message}")]
    Remote { status: Option<u16>, message: String },

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type StorageResult<T> = Result<T, StorageError>;

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

impl StorageError {
    pub fn not_found(entity: &'static str, id: u32) -> Self {
        Self::NotFound { entity, id }
    }

    /// Remote 404s on id-addressed requests become `NotFound`
    pub fn or_not_found(self, entity: &'static str, id: u32) -> Self {
        match self {
            StorageError::Remote {
                status: Some(404), ..
            } => Self::NotFound { entity, id },
            other => other,
        }
    }
}

impl From<Vec<ValidationError>> for StorageError {
    fn from(errors: Vec<ValidationError>) -> Self {
        Self::Validation(errors)
    }
}

impl From<ValidationError> for StorageError {
    fn from(error: ValidationError) -> Self {
        Self::Validation(vec![error])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_message_lists_every_field() {
        let err = StorageError::Validation(vec![
            ValidationError::Required("title"),
            ValidationError::Required("version"),
        ]);
        assert_eq!(
            err.to_string(),
            "Validation failed: title is required, version is required"
        );
    }

    #[test]
    fn test_remote_404_maps_to_not_found() {
        let err = StorageError::Remote {
            status: Some(404),
            message: "API Error: 404".to_string(),
        }
        .or_not_found("Rom", 7);
        assert!(matches!(err, StorageError::NotFound { entity: "Rom", id: 7 }));

        let err = StorageError::Remote {
            status: Some(500),
            message: "boom".to_string(),
        }
        .or_not_found("Rom", 7);
        assert!(matches!(err, StorageError::Remote { .. }));
    }
}
