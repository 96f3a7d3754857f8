//! Auth Router

use axum::{Router, routing::post};
use platform::token::TokenCodec;
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::repository::UserRepository;
use crate::infra::postgres::PgUserRepository;
use crate::presentation::handlers::{self, AuthAppState};

/// Unprotected sign-up / sign-in routes backed by PostgreSQL
pub fn auth_router(
    repo: PgUserRepository,
    codec: Arc<TokenCodec>,
    config: Arc<AuthConfig>,
) -> Router {
    auth_router_generic(repo, codec, config)
}

/// Same routes over any repository implementation
pub fn auth_router_generic<R>(repo: R, codec: Arc<TokenCodec>, config: Arc<AuthConfig>) -> Router
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let state = AuthAppState {
        repo: Arc::new(repo),
        codec,
        config,
    };

    Router::new()
        .route("/signup", post(handlers::sign_up::<R>))
        .route("/signin", post(handlers::sign_in::<R>))
        .with_state(state)
}
