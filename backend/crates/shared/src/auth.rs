//! Authenticated caller
//!
//! Set by the authentication gate on every protected request and read by
//! downstream handlers. Lives only for the duration of one request.

use crate::id::UserId;

/// Identity resolved from a validated bearer token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
}

impl AuthenticatedUser {
    pub fn new(user_id: UserId) -> Self {
        Self { user_id }
    }
}
