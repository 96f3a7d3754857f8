//! Use case and router tests against an in-memory user store

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::body::Body;
use axum::extract::Extension;
use axum::http::{Request, StatusCode, header};
use axum::routing::get;
use axum::{Router, middleware};
use chrono::Utc;
use kernel::auth::AuthenticatedUser;
use kernel::id::UserId;
use platform::password::ClearTextPassword;
use platform::token::TokenCodec;
use serde_json::{Value, json};
use tower::ServiceExt;

use crate::application::{AuthConfig, SignInInput, SignInUseCase, SignUpInput, SignUpUseCase};
use crate::domain::entity::user::{NewUser, User};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{display_name::DisplayName, email::Email};
use crate::error::{AuthError, AuthResult};
use crate::presentation::middleware::require_bearer_token;
use crate::presentation::router::auth_router_generic;

const PASSWORD: &str = "Correct-Horse-Battery-9";

#[derive(Clone, Default)]
struct InMemoryUsers {
    inner: Arc<Mutex<Store>>,
}

#[derive(Default)]
struct Store {
    next_id: i64,
    by_email: HashMap<String, User>,
}

impl UserRepository for InMemoryUsers {
    async fn create(&self, user: &NewUser) -> AuthResult<UserId> {
        let mut store = self.inner.lock().unwrap();
        if store.by_email.contains_key(user.email.as_str()) {
            return Err(AuthError::EmailTaken);
        }
        store.next_id += 1;
        let user_id = UserId::from_db(store.next_id);
        store
            .by_email
            .insert(user.email.as_str().to_string(), user.clone().into_user(user_id));
        Ok(user_id)
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        Ok(self.inner.lock().unwrap().by_email.get(email.as_str()).cloned())
    }

    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool> {
        Ok(self.inner.lock().unwrap().by_email.contains_key(email.as_str()))
    }
}

/// Exists check always says "free", so only the insert can catch duplicates
#[derive(Clone, Default)]
struct RacyUsers(InMemoryUsers);

impl UserRepository for RacyUsers {
    async fn create(&self, user: &NewUser) -> AuthResult<UserId> {
        self.0.create(user).await
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        self.0.find_by_email(email).await
    }

    async fn exists_by_email(&self, _email: &Email) -> AuthResult<bool> {
        Ok(false)
    }
}

struct Fixture {
    repo: Arc<InMemoryUsers>,
    codec: Arc<TokenCodec>,
    config: Arc<AuthConfig>,
}

impl Fixture {
    fn new() -> Self {
        let config = AuthConfig::development();
        Self {
            repo: Arc::new(InMemoryUsers::default()),
            codec: Arc::new(config.token_codec()),
            config: Arc::new(config),
        }
    }

    async fn sign_up(&self, email: &str, password: &str) -> AuthResult<UserId> {
        SignUpUseCase::new(self.repo.clone(), self.config.clone())
            .execute(SignUpInput {
                name: "Alice".to_string(),
                email: email.to_string(),
                password: password.to_string(),
            })
            .await
            .map(|out| out.user_id)
    }

    async fn sign_in(&self, email: &str, password: &str) -> AuthResult<String> {
        SignInUseCase::new(self.repo.clone(), self.codec.clone(), self.config.clone())
            .execute(SignInInput {
                email: email.to_string(),
                password: password.to_string(),
            })
            .await
            .map(|out| out.token)
    }
}

// ============================================================================
// Sign up / sign in
// ============================================================================

#[tokio::test]
async fn test_sign_up_then_sign_in_issues_token_for_that_user() {
    let fx = Fixture::new();
    let user_id = fx.sign_up("alice@example.com", PASSWORD).await.unwrap();

    let token = fx.sign_in("alice@example.com", PASSWORD).await.unwrap();

    assert_eq!(fx.codec.extract_user_id(&token), Ok(user_id.get()));
}

#[tokio::test]
async fn test_sign_in_is_case_insensitive_on_email() {
    let fx = Fixture::new();
    fx.sign_up("Alice@Example.com", PASSWORD).await.unwrap();

    assert!(fx.sign_in("ALICE@example.COM", PASSWORD).await.is_ok());
}

#[tokio::test]
async fn test_sign_up_duplicate_email() {
    let fx = Fixture::new();
    fx.sign_up("alice@example.com", PASSWORD).await.unwrap();

    let result = fx.sign_up("ALICE@example.com", PASSWORD).await;
    assert!(matches!(result, Err(AuthError::EmailTaken)));
}

#[tokio::test]
async fn test_sign_up_duplicate_caught_by_insert() {
    let repo = Arc::new(RacyUsers::default());
    let config = Arc::new(AuthConfig::development());
    let use_case = SignUpUseCase::new(repo, config);

    let input = || SignUpInput {
        name: "Bob".to_string(),
        email: "bob@example.com".to_string(),
        password: PASSWORD.to_string(),
    };

    use_case.execute(input()).await.unwrap();
    assert!(matches!(
        use_case.execute(input()).await,
        Err(AuthError::EmailTaken)
    ));
}

#[tokio::test]
async fn test_sign_up_rejects_bad_input() {
    let fx = Fixture::new();

    assert!(matches!(
        fx.sign_up("not-an-email", PASSWORD).await,
        Err(AuthError::InvalidEmail)
    ));
    assert!(matches!(
        fx.sign_up("carol@example.com", "short").await,
        Err(AuthError::Validation(_))
    ));
    assert!(matches!(
        fx.sign_up("carol@example.com", "password123").await,
        Err(AuthError::Validation(_))
    ));

    // Nothing was persisted by the failed attempts
    assert!(fx.repo.inner.lock().unwrap().by_email.is_empty());
}

#[tokio::test]
async fn test_sign_in_failures_are_indistinguishable() {
    let fx = Fixture::new();
    fx.sign_up("alice@example.com", PASSWORD).await.unwrap();

    let wrong_password = fx.sign_in("alice@example.com", "Wrong-Password-42").await;
    let unknown_email = fx.sign_in("nobody@example.com", PASSWORD).await;
    let malformed_email = fx.sign_in("nobody", PASSWORD).await;

    for result in [wrong_password, unknown_email, malformed_email] {
        let err = result.unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
        assert_eq!(err.to_app_error().message(), "Invalid email or password");
    }
}

#[tokio::test]
async fn test_sign_in_skips_password_policy() {
    let fx = Fixture::new();

    // Account created before the current policy existed
    let legacy = ClearTextPassword::for_verification("abc".to_string());
    fx.repo
        .create(&NewUser::new(
            DisplayName::new("Legacy").unwrap(),
            Email::new("legacy@example.com").unwrap(),
            legacy.hash(None).unwrap(),
        ))
        .await
        .unwrap();

    assert!(fx.sign_in("legacy@example.com", "abc").await.is_ok());
}

#[tokio::test]
async fn test_pepper_must_match() {
    let repo = Arc::new(InMemoryUsers::default());
    let peppered = Arc::new(AuthConfig::development().with_password_pepper(Some(b"pepper".to_vec())));
    let codec = Arc::new(peppered.token_codec());

    SignUpUseCase::new(repo.clone(), peppered.clone())
        .execute(SignUpInput {
            name: "Dana".to_string(),
            email: "dana@example.com".to_string(),
            password: PASSWORD.to_string(),
        })
        .await
        .unwrap();

    let unpeppered = Arc::new(AuthConfig::development());
    let result = SignInUseCase::new(repo, codec, unpeppered)
        .execute(SignInInput {
            email: "dana@example.com".to_string(),
            password: PASSWORD.to_string(),
        })
        .await;

    assert!(matches!(result, Err(AuthError::InvalidCredentials)));
}

// ============================================================================
// Router
// ============================================================================

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_router_sign_up_and_sign_in() {
    let fx = Fixture::new();
    let app = auth_router_generic(
        InMemoryUsers::default(),
        fx.codec.clone(),
        fx.config.clone(),
    );

    let response = app
        .clone()
        .oneshot(post_json(
            "/signup",
            json!({ "name": "Alice", "email": "alice@example.com", "password": PASSWORD }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .clone()
        .oneshot(post_json(
            "/signin",
            json!({ "email": "alice@example.com", "password": PASSWORD }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["user"]["email"], "alice@example.com");
    assert_eq!(body["user"]["name"], "Alice");
    assert!(body["user"].get("password").is_none());
    assert!(body["user"].get("passwordHash").is_none());

    let token = body["token"].as_str().unwrap();
    assert_eq!(
        fx.codec.extract_user_id(token),
        Ok(body["user"]["id"].as_i64().unwrap())
    );
}

#[tokio::test]
async fn test_router_sign_in_failure_is_401() {
    let fx = Fixture::new();
    let app = auth_router_generic(InMemoryUsers::default(), fx.codec, fx.config);

    let response = app
        .oneshot(post_json(
            "/signin",
            json!({ "email": "ghost@example.com", "password": PASSWORD }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(json_body(response).await.get("token").is_none());
}

// ============================================================================
// Bearer token gate
// ============================================================================

fn gated(codec: Arc<TokenCodec>) -> Router {
    Router::new()
        .route(
            "/whoami",
            get(|Extension(caller): Extension<AuthenticatedUser>| async move {
                caller.user_id.to_string()
            }),
        )
        .route_layer(middleware::from_fn_with_state(codec, require_bearer_token))
}

fn whoami(authorization: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri("/whoami");
    if let Some(value) = authorization {
        builder = builder.header(header::AUTHORIZATION, value);
    }
    builder.body(Body::empty()).unwrap()
}

#[tokio::test]
async fn test_gate_passes_caller_to_handler() {
    let codec = Arc::new(TokenCodec::new(b"gate-test-signing-key-0123456789ab", Duration::from_secs(60)));
    let token = codec.issue(7).unwrap();

    let response = gated(codec)
        .oneshot(whoami(Some(&format!("Bearer {token}"))))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&bytes[..], b"7");
}

#[tokio::test]
async fn test_gate_rejects_before_handler() {
    let codec = Arc::new(TokenCodec::new(b"gate-test-signing-key-0123456789ab", Duration::from_secs(60)));
    let other = TokenCodec::new(b"some-other-signing-key-0123456789", Duration::from_secs(60));
    let expired = codec
        .issue_with_expiry(7, Utc::now().timestamp() - 10)
        .unwrap();
    let forged = other.issue(7).unwrap();
    let valid = codec.issue(7).unwrap();

    for header_value in [
        None,
        Some("Bearer".to_string()),
        Some(valid.clone()),
        Some(format!("Bearer {valid} extra")),
        Some(format!("Bearer {expired}")),
        Some(format!("Bearer {forged}")),
    ] {
        let response = gated(codec.clone())
            .oneshot(whoami(header_value.as_deref()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{header_value:?}");
        assert_eq!(response.headers()[header::WWW_AUTHENTICATE], "Bearer");
    }
}

#[tokio::test]
async fn test_gate_unreadable_identity_is_500() {
    let codec = Arc::new(TokenCodec::new(b"gate-test-signing-key-0123456789ab", Duration::from_secs(60)));
    let token = codec.issue(0).unwrap();

    let response = gated(codec)
        .oneshot(whoami(Some(&format!("Bearer {token}"))))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}
