//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::fmt;
use std::time::Duration;

use platform::token::{DEFAULT_TOKEN_TTL, TokenCodec};

/// Minimum HMAC key length for the token codec (HS256 block size)
pub const MIN_TOKEN_SECRET_LENGTH: usize = 32;

/// Auth application configuration
#[derive(Clone)]
pub struct AuthConfig {
    /// HS256 signing key shared by every instance
    pub token_secret: Vec<u8>,
    /// Bearer token lifetime (12 hours)
    pub token_ttl: Duration,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_secret: platform::crypto::random_bytes(MIN_TOKEN_SECRET_LENGTH),
            token_ttl: DEFAULT_TOKEN_TTL,
            password_pepper: None,
        }
    }
}

impl AuthConfig {
    /// Random signing key; tokens do not survive a restart
    pub fn development() -> Self {
        Self::default()
    }

    pub fn with_token_secret(mut self, secret: Vec<u8>) -> Self {
        self.token_secret = secret;
        self
    }

    pub fn with_token_ttl(mut self, ttl: Duration) -> Self {
        self.token_ttl = ttl;
        self
    }

    pub fn with_password_pepper(mut self, pepper: Option<Vec<u8>>) -> Self {
        self.password_pepper = pepper;
        self
    }

    /// Get password pepper as slice
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }

    pub fn token_codec(&self) -> TokenCodec {
        TokenCodec::new(&self.token_secret, self.token_ttl)
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("token_secret", &"[REDACTED]")
            .field("token_ttl", &self.token_ttl)
            .field("password_pepper", &self.password_pepper.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}
