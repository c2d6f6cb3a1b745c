// ABOUTME: Input validation for catalog and application payloads
// ABOUTME: Checks required fields before anything reaches the store

use thiserror::Error;

use crate::types::{ApplicationForm, Device, DeviceInput, FeatureInput, Feature, LoginRequest, Rom, RomCreateInput};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    Required(&'static str),

    #[error("{0} must be a valid email address")]
    InvalidEmail(&'static str),

    #[error("Unknown OS type: {0}")]
    UnknownOsType(String),

    #[error("Unknown application status: {0}")]
    UnknownStatus(String),

    #[error("Unknown transition policy: {0}")]
    UnknownPolicy(String),
}

pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// Collects missing-field errors for a list of (name, value) pairs
fn require(fields: &[(&'static str, &str)]) -> Vec<ValidationError> {
    fields
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| ValidationError::Required(name))
        .collect()
}

fn finish(errors: Vec<ValidationError>) -> ValidationResult {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

pub fn validate_device_input(input: &DeviceInput) -> ValidationResult {
    finish(require(&[
        ("name", &input.name),
        ("model", &input.model),
        ("manufacturer", &input.manufacturer),
    ]))
}

pub fn validate_device(device: &Device) -> ValidationResult {
    finish(require(&[
        ("name", &device.name),
        ("model", &device.model),
        ("manufacturer", &device.manufacturer),
    ]))
}

pub fn validate_rom_input(input: &RomCreateInput) -> ValidationResult {
    finish(require(&[
        ("title", &input.title),
        ("version", &input.version),
        ("fileSize", &input.file_size),
        ("downloadUrl", &input.download_url),
    ]))
}

pub fn validate_rom(rom: &Rom) -> ValidationResult {
    finish(require(&[
        ("title", &rom.title),
        ("version", &rom.version),
        ("fileSize", &rom.file_size),
        ("downloadUrl", &rom.download_url),
    ]))
}

pub fn validate_feature_input(input: &FeatureInput) -> ValidationResult {
    finish(require(&[
        ("title", &input.title),
        ("description", &input.description),
        ("imageUrl", &input.image_url),
    ]))
}

pub fn validate_feature(feature: &Feature) -> ValidationResult {
    finish(require(&[
        ("title", &feature.title),
        ("description", &feature.description),
        ("imageUrl", &feature.image_url),
    ]))
}

pub fn validate_application_form(form: &ApplicationForm) -> ValidationResult {
    let mut errors = require(&[
        ("name", &form.name),
        ("email", &form.email),
        ("github", &form.github),
        ("message", &form.message),
    ]);

    if !form.email.trim().is_empty() && !looks_like_email(&form.email) {
        errors.push(ValidationError::InvalidEmail("email"));
    }

    finish(errors)
}

pub fn validate_login(request: &LoginRequest) -> ValidationResult {
    finish(require(&[
        ("email", &request.email),
        ("password", &request.password),
    ]))
}

fn looks_like_email(value: &str) -> bool {
    let value = value.trim();
    match value.split_once('@') {
        Some((local, domain)) => !local.is_empty() && domain.contains('.') && !domain.starts_with('.'),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> ApplicationForm {
        ApplicationForm {
            name: "Michael Code".to_string(),
            email: "mike@example.com".to_string(),
            role: Some("developer".to_string()),
            github: "github.com/mikecode".to_string(),
            message: "Kernel work".to_string(),
        }
    }

    #[test]
    fn test_valid_application_form() {
        assert!(validate_application_form(&form()).is_ok());
    }

    #[test]
    fn test_missing_fields_are_all_reported() {
        let mut input = form();
        input.name = "  ".to_string();
        input.message = String::new();

        let errors = validate_application_form(&input).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::Required("name"),
                ValidationError::Required("message")
            ]
        );
    }

    #[test]
    fn test_bad_email() {
        let mut input = form();
        input.email = "mike-at-example".to_string();

        let errors = validate_application_form(&input).unwrap_err();
        assert_eq!(errors, vec![ValidationError::InvalidEmail("email")]);
    }

    #[test]
    fn test_device_input_requires_codename() {
        let input = DeviceInput {
            name: "Mi 9".to_string(),
            model: String::new(),
            manufacturer: "Xiaomi".to_string(),
            photo: None,
        };

        let errors = validate_device_input(&input).unwrap_err();
        assert_eq!(errors, vec![ValidationError::Required("model")]);
    }

    #[test]
    fn test_feature_requires_image() {
        let input = FeatureInput {
            title: "Themes".to_string(),
            description: "Icon packs.".to_string(),
            image_url: " ".to_string(),
        };

        let errors = validate_feature_input(&input).unwrap_err();
        assert_eq!(errors, vec![ValidationError::Required("imageUrl")]);

        let errors = validate_feature(&input.into_feature(4)).unwrap_err();
        assert_eq!(errors, vec![ValidationError::Required("imageUrl")]);
    }

    #[test]
    fn test_login_requires_both_fields() {
        let request = LoginRequest {
            email: String::new(),
            password: String::new(),
        };
        assert_eq!(validate_login(&request).unwrap_err().len(), 2);
    }
}
