//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Random key material and Base64 helpers
//! - Password hashing (Argon2id, NIST SP 800-63B compliant)
//! - Signed, time-limited bearer tokens (HS256 JWT)

pub mod crypto;
pub mod password;
pub mod token;
