//! Bearer Token Codec
//!
//! Issues and validates self-contained HS256 JWTs carrying a single
//! identity claim. No server-side state: any instance holding the signing
//! key can validate a token, and a token stays valid until `exp`.
//!
//! Claims: `{ "authorized": true, "user_id": <int>, "exp": <unix seconds> }`

use std::time::Duration;

use chrono::Utc;
use jsonwebtoken::errors::ErrorKind as JwtErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

/// Default token lifetime
pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(12 * 3600);

const ALGORITHM: Algorithm = Algorithm::HS256;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    /// Signature, algorithm or encoding does not check out
    #[error("Token signature is invalid")]
    InvalidSignature,

    /// `exp` is in the past
    #[error("Token has expired")]
    Expired,

    /// Signature is fine but the identity claim is unusable
    #[error("Token claims are malformed")]
    Malformed,

    #[error("Token signing failed: {0}")]
    Signing(String),
}

#[derive(Debug, Serialize)]
struct IssuedClaims {
    authorized: bool,
    user_id: i64,
    exp: i64,
}

/// HS256 token codec bound to one service-wide key
#[derive(Clone)]
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
}

impl TokenCodec {
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Sign a token for `user_id`, expiring `ttl` from now
    pub fn issue(&self, user_id: i64) -> Result<String, TokenError> {
        let exp = i64::try_from(self.ttl.as_secs())
            .ok()
            .and_then(|ttl| Utc::now().timestamp().checked_add(ttl))
            .ok_or_else(|| TokenError::Signing("token lifetime out of range".to_string()))?;
        self.issue_with_expiry(user_id, exp)
    }

    /// Sign a token with an explicit `exp` (unix seconds)
    pub fn issue_with_expiry(&self, user_id: i64, exp: i64) -> Result<String, TokenError> {
        let claims = IssuedClaims {
            authorized: true,
            user_id,
            exp,
        };

        encode(&Header::new(ALGORITHM), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }

    /// Check signature, algorithm and expiry without reading claims
    pub fn validate(&self, token: &str) -> Result<(), TokenError> {
        self.decode_claims(token).map(|_| ())
    }

    /// Validate, then read `user_id` as an integer
    pub fn extract_user_id(&self, token: &str) -> Result<i64, TokenError> {
        let claims = self.decode_claims(token)?;
        claims
            .get("user_id")
            .and_then(integral_claim)
            .ok_or(TokenError::Malformed)
    }

    fn decode_claims(&self, token: &str) -> Result<Map<String, Value>, TokenError> {
        let mut validation = Validation::new(ALGORITHM);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        decode::<Map<String, Value>>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                JwtErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::InvalidSignature,
            })
    }
}

impl std::fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCodec")
            .field("key", &"[REDACTED]")
            .field("ttl", &self.ttl)
            .finish()
    }
}

/// Positive integer, tolerating `7.0` from encoders that emit floats
fn integral_claim(value: &Value) -> Option<i64> {
    let id = match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && *f <= i64::MAX as f64)
                .map(|f| f as i64)
        })?,
        _ => return None,
    };
    (id > 0).then_some(id)
}
