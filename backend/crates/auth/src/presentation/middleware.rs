//! Auth Middleware
//!
//! Bearer-token gate for protected routes. Install with
//! `axum::middleware::from_fn_with_state(codec, require_bearer_token)`.

use axum::extract::{Request, State};
use axum::http::{HeaderMap, header};
use axum::middleware::Next;
use axum::response::Response;
use kernel::auth::AuthenticatedUser;
use kernel::id::UserId;
use platform::token::TokenCodec;
use std::sync::Arc;

use crate::error::AuthError;

/// Token from `Authorization: <scheme> <token>`
///
/// An absent header, or one that does not split into exactly two parts on
/// single spaces, yields the empty token.
pub fn extract_bearer_token(headers: &HeaderMap) -> &str {
    let Some(value) = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
    else {
        return "";
    };

    let mut parts = value.split(' ');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(_), Some(token), None) => token,
        _ => "",
    }
}

/// Rejects the request before any handler runs unless it carries a valid
/// token, then exposes the caller as `Extension<AuthenticatedUser>`.
pub async fn require_bearer_token(
    State(codec): State<Arc<TokenCodec>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let token = extract_bearer_token(req.headers());

    if let Err(e) = codec.validate(token) {
        tracing::debug!(reason = %e, "Bearer token rejected");
        return Err(AuthError::TokenRejected);
    }

    let user_id = codec
        .extract_user_id(token)
        .ok()
        .and_then(|id| UserId::new(id).ok())
        .ok_or(AuthError::TokenUnreadable)?;

    req.extensions_mut()
        .insert(AuthenticatedUser::new(user_id));

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_extract_bearer_token() {
        assert_eq!(extract_bearer_token(&headers("Bearer abc.def.ghi")), "abc.def.ghi");
        // Scheme is not checked, only the shape
        assert_eq!(extract_bearer_token(&headers("Token xyz")), "xyz");
    }

    #[test]
    fn test_extract_bearer_token_malformed() {
        assert_eq!(extract_bearer_token(&HeaderMap::new()), "");
        assert_eq!(extract_bearer_token(&headers("abc.def.ghi")), "");
        assert_eq!(extract_bearer_token(&headers("Bearer a b")), "");
        assert_eq!(extract_bearer_token(&headers("Bearer  abc")), "");
    }
}
