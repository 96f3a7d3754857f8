//! Router Assembly

use std::sync::Arc;

use auth::{AuthConfig, PgUserRepository, auth_router, require_bearer_token};
use axum::{
    Json, Router, http,
    http::{Method, header},
    middleware,
    routing::get,
};
use kernel::error::app_error::AppError;
use serde_json::{Value, json};
use sqlx::PgPool;
use todo::{PgTodoRepository, todo_router};
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;

pub const API_PREFIX: &str = "/api/todo/v1";

/// Full application router
///
/// Sign-up and sign-in are public; every todo and category route sits behind
/// the bearer-token gate.
pub fn build_router(pool: PgPool, auth_config: AuthConfig, frontend_origins: &[String]) -> Router {
    let auth_config = Arc::new(auth_config);
    let codec = Arc::new(auth_config.token_codec());

    let protected = todo_router(PgTodoRepository::new(pool.clone())).route_layer(
        middleware::from_fn_with_state(codec.clone(), require_bearer_token),
    );

    let api = auth_router(PgUserRepository::new(pool), codec, auth_config).merge(protected);

    Router::new()
        .route("/health", get(health))
        .nest(API_PREFIX, api)
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(frontend_origins))
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn not_found() -> AppError {
    AppError::not_found("Route not found")
}

fn cors_layer(frontend_origins: &[String]) -> CorsLayer {
    let allowed_origins: Vec<http::HeaderValue> = frontend_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]))
}
