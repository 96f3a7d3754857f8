//! Server Configuration
//!
//! Read once from the environment at startup and never mutated afterwards.

use std::env;
use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{Context, bail};
use auth::AuthConfig;
use auth::config::MIN_TOKEN_SECRET_LENGTH;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_TOKEN_TTL_HOURS: u64 = 12;
const MAX_TOKEN_TTL_HOURS: u64 = 24 * 365;
const DEFAULT_FRONTEND_ORIGINS: &str = "http://localhost:3000,http://127.0.0.1:3000";

#[derive(Debug)]
pub struct ServerConfig {
    pub database_url: String,
    pub max_connections: u32,
    pub bind_addr: SocketAddr,
    pub frontend_origins: Vec<String>,
    pub auth: AuthConfig,
}

impl ServerConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok(), cfg!(debug_assertions))
    }

    /// `allow_random_key` lets a missing `TOKEN_SIGNING_KEY` fall back to a
    /// per-process random key (debug builds only)
    pub fn from_lookup<F>(lookup: F, allow_random_key: bool) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL").context("DATABASE_URL must be set")?;

        let max_connections: u32 = match lookup("DATABASE_MAX_CONNECTIONS") {
            Some(v) => v
                .trim()
                .parse()
                .context("DATABASE_MAX_CONNECTIONS must be a positive integer")?,
            None => DEFAULT_MAX_CONNECTIONS,
        };

        let bind_addr: SocketAddr = lookup("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .trim()
            .parse()
            .context("BIND_ADDR must be a socket address such as 0.0.0.0:8080")?;

        let frontend_origins: Vec<String> = lookup("FRONTEND_ORIGINS")
            .unwrap_or_else(|| DEFAULT_FRONTEND_ORIGINS.to_string())
            .split(',')
            .map(str::trim)
            .filter(|o| !o.is_empty())
            .map(str::to_string)
            .collect();

        let ttl_hours: u64 = match lookup("TOKEN_TTL_HOURS") {
            Some(v) => v
                .trim()
                .parse()
                .context("TOKEN_TTL_HOURS must be a whole number of hours")?,
            None => DEFAULT_TOKEN_TTL_HOURS,
        };
        if ttl_hours == 0 || ttl_hours > MAX_TOKEN_TTL_HOURS {
            bail!("TOKEN_TTL_HOURS must be between 1 and {MAX_TOKEN_TTL_HOURS}");
        }
        let ttl_secs = ttl_hours
            .checked_mul(3600)
            .context("TOKEN_TTL_HOURS is out of range")?;

        let mut auth = match lookup("TOKEN_SIGNING_KEY") {
            Some(encoded) => {
                let secret = platform::crypto::from_base64(&encoded)
                    .context("TOKEN_SIGNING_KEY must be base64")?;
                if secret.len() < MIN_TOKEN_SECRET_LENGTH {
                    bail!(
                        "TOKEN_SIGNING_KEY must decode to at least {MIN_TOKEN_SECRET_LENGTH} bytes"
                    );
                }
                AuthConfig::default().with_token_secret(secret)
            }
            None if allow_random_key => {
                tracing::warn!("TOKEN_SIGNING_KEY not set, using a random key for this process");
                AuthConfig::development()
            }
            None => bail!("TOKEN_SIGNING_KEY must be set in production"),
        };

        auth = auth
            .with_token_ttl(Duration::from_secs(ttl_secs))
            .with_password_pepper(
                lookup("PASSWORD_PEPPER")
                    .filter(|p| !p.is_empty())
                    .map(String::into_bytes),
            );

        Ok(Self {
            database_url,
            max_connections,
            bind_addr,
            frontend_origins,
            auth,
        })
    }
}
