//! User Entity

use kernel::id::UserId;
use platform::password::HashedPassword;

use crate::domain::value_object::{display_name::DisplayName, email::Email};

/// Persisted user account
///
/// The password is only ever held as an Argon2id hash.
#[derive(Debug, Clone)]
pub struct User {
    pub user_id: UserId,
    pub name: DisplayName,
    /// Unique, used as the login key
    pub email: Email,
    pub password_hash: HashedPassword,
}

/// User not yet persisted; the store assigns the id
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: DisplayName,
    pub email: Email,
    pub password_hash: HashedPassword,
}

impl NewUser {
    pub fn new(name: DisplayName, email: Email, password_hash: HashedPassword) -> Self {
        Self {
            name,
            email,
            password_hash,
        }
    }

    pub fn into_user(self, user_id: UserId) -> User {
        User {
            user_id,
            name: self.name,
            email: self.email,
            password_hash: self.password_hash,
        }
    }
}
