//! Sign In Use Case
//!
//! Verifies email + password and issues a bearer token.

use std::sync::Arc;

use platform::password::{ClearTextPassword, HashedPassword};
use platform::token::TokenCodec;

use crate::application::config::AuthConfig;
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::email::Email;
use crate::error::{AuthError, AuthResult};

pub struct SignInInput {
    pub email: String,
    pub password: String,
}

pub struct SignInOutput {
    pub token: String,
    pub user: User,
}

pub struct SignInUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    codec: Arc<TokenCodec>,
    config: Arc<AuthConfig>,
}

impl<U> SignInUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, codec: Arc<TokenCodec>, config: Arc<AuthConfig>) -> Self {
        Self {
            user_repo,
            codec,
            config,
        }
    }

    /// Every credential failure is reported as `InvalidCredentials`, so a
    /// caller cannot tell an unknown email from a wrong password.
    pub async fn execute(&self, input: SignInInput) -> AuthResult<SignInOutput> {
        let email = Email::new(input.email).map_err(|_| AuthError::InvalidCredentials)?;

        // No policy check here: accounts created under older rules must still sign in
        let password = ClearTextPassword::for_verification(input.password);

        let Some(user) = self.user_repo.find_by_email(&email).await? else {
            // Same Argon2 work as a wrong password
            let _ = HashedPassword::decoy().verify(&password, self.config.pepper());
            return Err(AuthError::InvalidCredentials);
        };

        if !user.password_hash.verify(&password, self.config.pepper()) {
            return Err(AuthError::InvalidCredentials);
        }

        let token = self
            .codec
            .issue(user.user_id.get())
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        tracing::info!(user_id = %user.user_id, "User signed in");

        Ok(SignInOutput { token, user })
    }
}
