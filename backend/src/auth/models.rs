//! Data structures for authentication-related entities.
//!
//! Request and response payloads for registration, login, logout, token
//! refresh and third-party login. Wire field names are camelCase to match the
//! public API (`token`, `refreshToken`, `phoneNumber`, ...).

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Registration request payload
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,

    #[validate(email(message = "A valid email is required"))]
    pub email: String,

    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,

    pub address: Option<Address>,

    pub phone_number: Option<String>,
}

/// Optional postal address captured at registration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub street: Option<String>,
    pub city: Option<String>,
    pub zip_code: Option<String>,
    pub country: Option<String>,
}

/// Login request payload. Deliberately unvalidated: a malformed email takes
/// the same invalid-credentials path as an unknown one.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Access/refresh token pair returned by register, login, refresh and
/// third-party login.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPairResponse {
    pub token: String,
    pub refresh_token: String,
}

/// Body carrying a refresh token (logout and refresh endpoints).
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RefreshTokenRequest {
    #[validate(length(min = 1, message = "Refresh token is required"))]
    pub refresh_token: String,
}

#[derive(Debug, Serialize)]
pub struct LogoutResponse {
    pub message: String,
    pub success: bool,
}

/// Third-party login request carrying the provider credential.
#[derive(Debug, Deserialize, Validate)]
pub struct GoogleLoginRequest {
    #[validate(length(min = 1, message = "Credential is required"))]
    pub credential: String,
}
