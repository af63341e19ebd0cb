//! API Error Types
//! Mission: Map every failure onto one structured response at the boundary

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::warn;

use crate::store::StoreError;

/// Request-boundary errors. Every handler failure becomes one of these and
/// is serialized as `{"detail": ...}` with the matching status code.
#[derive(Debug)]
pub enum ApiError {
    /// Malformed or missing field in an otherwise well-formed request.
    Validation(String),
    /// Signup against an email that is already registered.
    EmailTaken,
    /// Bad credentials at login. Deliberately does not say which field.
    Unauthenticated,
    MissingToken,
    InvalidToken,
    ExpiredToken,
    /// A foreign key does not resolve to an existing row.
    Referential(String),
    NotFound,
    Internal,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match &self {
            ApiError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::EmailTaken => (
                StatusCode::BAD_REQUEST,
                "Email already registered".to_string(),
            ),
            ApiError::Unauthenticated => (
                StatusCode::UNAUTHORIZED,
                "Incorrect email or password".to_string(),
            ),
            ApiError::MissingToken => (
                StatusCode::UNAUTHORIZED,
                "Missing authorization token".to_string(),
            ),
            ApiError::InvalidToken => (StatusCode::UNAUTHORIZED, "Invalid token".to_string()),
            ApiError::ExpiredToken => (StatusCode::UNAUTHORIZED, "Token has expired".to_string()),
            ApiError::Referential(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::NotFound => (StatusCode::NOT_FOUND, "Not found".to_string()),
            ApiError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        };

        let bearer_challenge = matches!(
            self,
            ApiError::Unauthenticated
                | ApiError::MissingToken
                | ApiError::InvalidToken
                | ApiError::ExpiredToken
        );

        let mut response = (status, Json(json!({ "detail": detail }))).into_response();
        if bearer_challenge {
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }
        response
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::EmailTaken => ApiError::EmailTaken,
            StoreError::MissingReference { table, id } => {
                ApiError::Referential(format!("Referenced {table} {id} does not exist"))
            }
            StoreError::ReferentialIntegrity => {
                ApiError::Referential("Operation violates a foreign key reference".to_string())
            }
            StoreError::NotFound => ApiError::NotFound,
            StoreError::Sqlite(e) => {
                warn!("database error: {e}");
                ApiError::Internal
            }
        }
    }
}
