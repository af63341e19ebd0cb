//! Authentication Models
//! Mission: Wire types for login and token claims

use serde::{Deserialize, Serialize};

/// Token claims payload: who, and until when.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject — the user's email.
    pub sub: String,
    /// Expiration, seconds since the Unix epoch.
    pub exp: usize,
}

/// Login form body (`POST /token`). The `username` field carries the email,
/// matching the OAuth2 password-grant form shape.
#[derive(Debug, Deserialize)]
pub struct TokenRequest {
    pub username: String,
    pub password: String,
}

/// Login response.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

impl TokenResponse {
    pub fn bearer(access_token: String) -> Self {
        Self {
            access_token,
            token_type: "bearer".to_string(),
        }
    }
}

/// Signup request body (`POST /signup`).
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    pub username: String,
    #[serde(default)]
    pub occupation: Option<String>,
    #[serde(default)]
    pub fcm_token: Option<String>,
    #[serde(default)]
    pub location_id: Option<i64>,
}
