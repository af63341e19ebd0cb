//! Environment Configuration
//! Mission: Load and validate runtime settings before anything else starts

use anyhow::{bail, Context, Result};
use jsonwebtoken::Algorithm;
use std::env;
use std::path::{Path, PathBuf};

/// Runtime configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite database file.
    pub database_path: String,
    /// Token signing secret. Required; there is no default.
    pub secret_key: String,
    /// Token signing algorithm (HS256 unless overridden).
    pub algorithm: Algorithm,
    /// Expiry window handed to the login flow, in minutes.
    pub token_expire_minutes: i64,
    /// Listen address for the HTTP server.
    pub bind_addr: String,
}

impl Config {
    /// Read configuration from the environment.
    ///
    /// An unset or blank `SECRET_KEY` is a fatal misconfiguration: signing
    /// tokens with a baked-in default would make every deployment forgeable,
    /// so startup refuses instead of falling back.
    pub fn from_env() -> Result<Self> {
        let database_path = resolve_data_path(env::var("DATABASE_URL").ok(), "planner.db");

        let secret_key = env::var("SECRET_KEY")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .context("SECRET_KEY is not set; refusing to start without a signing secret")?;

        let algorithm = parse_algorithm(
            env::var("ALGORITHM")
                .unwrap_or_else(|_| "HS256".to_string())
                .as_str(),
        )?;

        let token_expire_minutes = env::var("ACCESS_TOKEN_EXPIRE_MINUTES")
            .ok()
            .and_then(|v| v.parse::<i64>().ok())
            .filter(|&v| v > 0)
            .unwrap_or(30);

        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8000".to_string());

        Ok(Self {
            database_path,
            secret_key,
            algorithm,
            token_expire_minutes,
            bind_addr,
        })
    }
}

/// Map the `ALGORITHM` env value onto a supported HMAC variant.
pub fn parse_algorithm(name: &str) -> Result<Algorithm> {
    match name.trim().to_ascii_uppercase().as_str() {
        "HS256" => Ok(Algorithm::HS256),
        "HS384" => Ok(Algorithm::HS384),
        "HS512" => Ok(Algorithm::HS512),
        other => bail!("unsupported signing algorithm: {other}"),
    }
}

/// Resolve the database path: absolute values pass through, relative values
/// are anchored at the crate directory so running from elsewhere doesn't
/// silently create a fresh empty DB in the caller's cwd.
fn resolve_data_path(env_value: Option<String>, default_filename: &str) -> String {
    let base = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let Some(raw) = env_value.filter(|v| !v.trim().is_empty()) else {
        return base.join(default_filename).to_string_lossy().to_string();
    };

    let p = PathBuf::from(raw);
    if p.is_absolute() {
        return p.to_string_lossy().to_string();
    }

    base.join(p).to_string_lossy().to_string()
}

/// Load `.env` files before any config is read.
pub fn load_env() {
    // Standard dotenv search (cwd + parents), then the manifest directory
    // for the --manifest-path-from-elsewhere case.
    let _ = dotenv::dotenv();

    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    let candidate = manifest_dir.join(".env");
    if candidate.exists() {
        let _ = dotenv::from_path(&candidate);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_algorithm_variants() {
        assert_eq!(parse_algorithm("HS256").unwrap(), Algorithm::HS256);
        assert_eq!(parse_algorithm("hs384").unwrap(), Algorithm::HS384);
        assert_eq!(parse_algorithm(" HS512 ").unwrap(), Algorithm::HS512);
        assert!(parse_algorithm("RS256").is_err());
        assert!(parse_algorithm("").is_err());
    }

    #[test]
    fn test_resolve_data_path_defaults_to_manifest_dir() {
        let resolved = resolve_data_path(None, "planner.db");
        assert!(resolved.ends_with("planner.db"));
        assert!(PathBuf::from(&resolved).is_absolute());

        // Blank values behave like unset.
        let blank = resolve_data_path(Some("   ".to_string()), "planner.db");
        assert_eq!(blank, resolved);
    }

    #[test]
    fn test_resolve_data_path_absolute_passthrough() {
        let resolved = resolve_data_path(Some("/tmp/custom.db".to_string()), "planner.db");
        assert_eq!(resolved, "/tmp/custom.db");
    }
}
