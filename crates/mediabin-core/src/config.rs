//! Configuration module
//!
//! Environment-based configuration with sensible defaults for local
//! development. Every value can be overridden through the environment.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_SERVER_PORT: u16 = 8080;
const DEFAULT_STORAGE_PATH: &str = "./data/media";
const DEFAULT_MAX_UPLOAD_BYTES: usize = 50 * 1024 * 1024;
const DEFAULT_TOKEN_TTL_SECS: u64 = 5;
const DEFAULT_TOKEN_SWEEP_INTERVAL_SECS: u64 = 1;

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    /// Port the HTTP server binds to.
    pub server_port: u16,
    /// Base URL embedded into public media URLs, e.g. `http://localhost:8080`.
    pub public_base_url: String,
    /// Root directory of the local blob store.
    pub storage_path: PathBuf,
    /// Maximum accepted multipart body size.
    pub max_upload_bytes: usize,
    /// Time-to-live of a viewer access token.
    pub token_ttl: Duration,
    /// Interval of the token cache background sweep.
    pub token_sweep_interval: Duration,
    /// Postgres catalog connection string; the in-memory catalog is used when unset.
    pub database_url: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        let server_port = parse_var("SERVER_PORT", DEFAULT_SERVER_PORT)?;
        let public_base_url = env::var("PUBLIC_BASE_URL")
            .unwrap_or_else(|_| format!("http://localhost:{}", server_port));
        let storage_path = PathBuf::from(
            env::var("STORAGE_PATH").unwrap_or_else(|_| DEFAULT_STORAGE_PATH.to_string()),
        );
        let max_upload_bytes = parse_var("MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES)?;
        let token_ttl = Duration::from_secs(parse_var("TOKEN_TTL_SECS", DEFAULT_TOKEN_TTL_SECS)?);
        let token_sweep_interval = Duration::from_secs(parse_var(
            "TOKEN_SWEEP_INTERVAL_SECS",
            DEFAULT_TOKEN_SWEEP_INTERVAL_SECS,
        )?);
        let database_url = env::var("DATABASE_URL").ok().filter(|v| !v.is_empty());

        Ok(Config {
            server_port,
            public_base_url,
            storage_path,
            max_upload_bytes,
            token_ttl,
            token_sweep_interval,
            database_url,
        })
    }
}

fn parse_var<T>(name: &str, default: T) -> Result<T, anyhow::Error>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) => raw
            .parse()
            .map_err(|e| anyhow::anyhow!("invalid value for {}: {}", name, e)),
        Err(_) => Ok(default),
    }
}
