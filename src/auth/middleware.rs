//! Authentication Middleware
//! Mission: Guard protected routes with bearer-token validation

use crate::auth::{token::TokenError, TokenService};
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

use crate::error::ApiError;

/// Middleware that requires a valid `Authorization: Bearer` token and makes
/// its claims available to handlers via request extensions.
pub async fn auth_middleware(
    State(tokens): State<Arc<TokenService>>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = bearer_token(&req).ok_or(ApiError::MissingToken)?;

    let claims = tokens.verify(&token).map_err(|e| match e {
        TokenError::Expired => ApiError::ExpiredToken,
        TokenError::Invalid => ApiError::InvalidToken,
    })?;

    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}

/// Optional variant: requests pass through without a token, but a valid one
/// still attaches claims. Used where anonymous access is allowed and an
/// authenticated caller gets bound as owner.
pub async fn optional_auth_middleware(
    State(tokens): State<Arc<TokenService>>,
    mut req: Request,
    next: Next,
) -> Response {
    if let Some(token) = bearer_token(&req) {
        if let Ok(claims) = tokens.verify(&token) {
            req.extensions_mut().insert(claims);
        }
    }

    next.run(req).await
}

fn bearer_token(req: &Request) -> Option<String> {
    req.headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
        .map(|t| t.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::models::Claims;
    use axum::body::Body;
    use axum::http::Request as HttpRequest;

    #[test]
    fn test_bearer_token_extraction() {
        let req = HttpRequest::builder()
            .header("Authorization", "Bearer abc.def.ghi")
            .body(Body::empty())
            .unwrap();
        assert_eq!(bearer_token(&req).as_deref(), Some("abc.def.ghi"));

        let req = HttpRequest::builder()
            .header("Authorization", "Basic dXNlcjpwdw==")
            .body(Body::empty())
            .unwrap();
        assert!(bearer_token(&req).is_none());

        let req = HttpRequest::new(Body::empty());
        assert!(bearer_token(&req).is_none());
    }

    #[test]
    fn test_claims_round_trip_through_extensions() {
        let mut req = HttpRequest::new(Body::empty());
        assert!(req.extensions().get::<Claims>().is_none());

        let claims = Claims {
            sub: "a@x.com".to_string(),
            exp: 1234567890,
        };
        req.extensions_mut().insert(claims);

        let stored = req.extensions().get::<Claims>().unwrap();
        assert_eq!(stored.sub, "a@x.com");
    }
}
