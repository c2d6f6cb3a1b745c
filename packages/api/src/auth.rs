// ABOUTME: Admin authentication for the back-office endpoints
// ABOUTME: Checks the login pair and validates bearer tokens in constant time

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use sha2::{Digest, Sha256};
use sleep_core::constants::ADMIN_USER_ID;
use sleep_core::{generate_token, LoginResponse, LoginUser, UserRole};
use subtle::ConstantTimeEq;
use tracing::{debug, warn};

use crate::error::AppError;
use crate::state::AppState;

/// The single admin account. There is no session table: every successful
/// login hands out the same process-wide token.
pub struct AdminAuth {
    email: String,
    password_hash: String,
    token: String,
    token_hash: String,
}

impl AdminAuth {
    /// Uses `token` when given, otherwise generates one for this process
    pub fn new(email: impl Into<String>, password: &str, token: Option<String>) -> Self {
        let token = token
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .unwrap_or_else(generate_token);

        Self {
            email: email.into(),
            password_hash: hash_secret(password),
            token_hash: hash_secret(&token),
            token,
        }
    }

    /// Email match is case-insensitive; the password must match exactly
    pub fn login(&self, email: &str, password: &str) -> Option<LoginResponse> {
        let email_ok = self.email.eq_ignore_ascii_case(email.trim());
        let password_ok = verify_secret(password, &self.password_hash);

        if !(email_ok && password_ok) {
            return None;
        }

        Some(LoginResponse {
            user: LoginUser {
                id: ADMIN_USER_ID,
                email: self.email.clone(),
                role: UserRole::Admin,
            },
            token: self.token.clone(),
        })
    }

    pub fn verify_token(&self, token: &str) -> bool {
        verify_secret(token, &self.token_hash)
    }

    pub fn token(&self) -> &str {
        &self.token
    }
}

fn hash_secret(secret: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(secret.as_bytes());
    hex::encode(hasher.finalize())
}

/// Hash first so the comparison length never depends on the input
fn verify_secret(secret: &str, stored_hash: &str) -> bool {
    let computed = hash_secret(secret);
    computed.as_bytes().ct_eq(stored_hash.as_bytes()).into()
}

/// Proof that the request carried the admin bearer token
#[derive(Debug, Clone, Copy)]
pub struct AdminUser;

impl FromRequestParts<AppState> for AdminUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let path = parts.uri.path().to_string();

        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(str::trim);

        let Some(token) = token else {
            warn!(path = %path, "Missing bearer token");
            return Err(AppError::Unauthorized);
        };

        if !state.auth.verify_token(token) {
            warn!(path = %path, "Invalid bearer token");
            return Err(AppError::Unauthorized);
        }

        debug!(path = %path, "Admin token validated");
        Ok(AdminUser)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn auth() -> AdminAuth {
        AdminAuth::new("admin@projectsleep.com", "admin", Some("fixed-token".to_string()))
    }

    #[test]
    fn test_configured_token_is_trimmed() {
        let auth = AdminAuth::new(
            "admin@projectsleep.com",
            "admin",
            Some("  padded-token\n".to_string()),
        );

        assert_eq!(auth.token(), "padded-token");
        assert!(auth.verify_token("padded-token"));
    }

    #[test]
    fn test_login_with_correct_pair() {
        let response = auth().login("admin@projectsleep.com", "admin").unwrap();
        assert_eq!(response.user.id, 99);
        assert_eq!(response.user.role, UserRole::Admin);
        assert_eq!(response.token, "fixed-token");
    }

    #[test]
    fn test_login_email_is_case_insensitive() {
        assert!(auth().login("Admin@ProjectSleep.com", "admin").is_some());
    }

    #[test]
    fn test_login_rejects_wrong_password_or_email() {
        assert!(auth().login("admin@projectsleep.com", "Admin").is_none());
        assert!(auth().login("root@projectsleep.com", "admin").is_none());
        assert!(auth().login("", "").is_none());
    }

    #[test]
    fn test_token_verification() {
        let auth = auth();
        assert!(auth.verify_token("fixed-token"));
        assert!(!auth.verify_token("fixed-token2"));
        assert!(!auth.verify_token(""));
    }

    #[test]
    fn test_generated_token_when_unset() {
        let auth = AdminAuth::new("a@b.co", "pw", None);
        assert_eq!(auth.token().len(), 32);
        assert!(auth.verify_token(&auth.token().to_string()));

        let blank = AdminAuth::new("a@b.co", "pw", Some("  ".to_string()));
        assert_eq!(blank.token().len(), 32);
    }
}
