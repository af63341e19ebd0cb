//! Token Service
//! Mission: Issue and validate signed, time-bound bearer tokens

use crate::auth::models::Claims;
use anyhow::{Context, Result};
use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use tracing::debug;

/// Default ttl when the caller does not pass one.
const DEFAULT_TTL_MINUTES: i64 = 15;

/// Token verification failures. Bad signature and garbled input collapse
/// into `Invalid`; only a well-signed token past its expiry is `Expired`.
#[derive(Debug, PartialEq, Eq)]
pub enum TokenError {
    Expired,
    Invalid,
}

impl std::fmt::Display for TokenError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenError::Expired => write!(f, "Token has expired"),
            TokenError::Invalid => write!(f, "Invalid token"),
        }
    }
}

impl std::error::Error for TokenError {}

/// Stateless token service over a shared HMAC secret.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
}

impl TokenService {
    pub fn new(secret: &str, algorithm: Algorithm) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            algorithm,
        }
    }

    /// Issue a signed token for `subject`, valid for `ttl` (15 minutes when
    /// unspecified). The login flow passes its configured expiry window.
    pub fn issue(&self, subject: &str, ttl: Option<Duration>) -> Result<String> {
        let ttl = ttl.unwrap_or_else(|| Duration::minutes(DEFAULT_TTL_MINUTES));
        let expiration = Utc::now()
            .checked_add_signed(ttl)
            .context("Invalid expiry timestamp")?
            .timestamp();

        let claims = Claims {
            sub: subject.to_string(),
            exp: expiration as usize,
        };

        debug!(subject, exp = expiration, "issuing token");

        encode(&Header::new(self.algorithm), &claims, &self.encoding_key)
            .context("Failed to sign token")
    }

    /// Validate a token and return its claims.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(self.algorithm);
        // No leeway: a token is expired the second its exp passes.
        validation.leeway = 0;

        match decode::<Claims>(token, &self.decoding_key, &validation) {
            Ok(data) => Ok(data.claims),
            Err(e) => match e.kind() {
                ErrorKind::ExpiredSignature => Err(TokenError::Expired),
                _ => Err(TokenError::Invalid),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> TokenService {
        TokenService::new("test-secret-key-12345", Algorithm::HS256)
    }

    #[test]
    fn test_issue_and_verify_round_trip() {
        let svc = service();
        let token = svc.issue("a@x.com", None).unwrap();
        assert!(!token.is_empty());

        let claims = svc.verify(&token).unwrap();
        assert_eq!(claims.sub, "a@x.com");
        assert!(claims.exp > Utc::now().timestamp() as usize);
    }

    #[test]
    fn test_expired_token_rejected_as_expired() {
        let svc = service();
        // Negative ttl simulates the clock having moved past expiry.
        let token = svc.issue("a@x.com", Some(Duration::seconds(-10))).unwrap();
        assert_eq!(svc.verify(&token).unwrap_err(), TokenError::Expired);
    }

    #[test]
    fn test_garbage_token_rejected_as_invalid() {
        let svc = service();
        assert_eq!(
            svc.verify("not.a.token").unwrap_err(),
            TokenError::Invalid
        );
    }

    #[test]
    fn test_tampered_signature_rejected_as_invalid() {
        let svc = service();
        let token = svc.issue("a@x.com", None).unwrap();

        // Flip one byte inside the signature segment.
        let sig_start = token.rfind('.').unwrap() + 1;
        let mut bytes = token.into_bytes();
        let i = sig_start + 2;
        bytes[i] = if bytes[i] == b'A' { b'B' } else { b'A' };
        let tampered = String::from_utf8(bytes).unwrap();

        assert_eq!(svc.verify(&tampered).unwrap_err(), TokenError::Invalid);
    }

    #[test]
    fn test_different_secrets_reject() {
        let svc1 = TokenService::new("secret1", Algorithm::HS256);
        let svc2 = TokenService::new("secret2", Algorithm::HS256);

        let token = svc1.issue("a@x.com", None).unwrap();
        assert_eq!(svc2.verify(&token).unwrap_err(), TokenError::Invalid);
    }

    #[test]
    fn test_configured_algorithm_is_used() {
        let svc = TokenService::new("test-secret-key-12345", Algorithm::HS512);
        let token = svc.issue("a@x.com", None).unwrap();
        assert_eq!(svc.verify(&token).unwrap().sub, "a@x.com");

        // An HS256 verifier must not accept an HS512 token.
        assert!(service().verify(&token).is_err());
    }
}
