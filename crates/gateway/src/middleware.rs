//! Middleware for session resolution and other cross-cutting concerns

use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts, HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::CookieJar;
use std::convert::Infallible;

use crate::error::GatewayError;
use crate::state::GatewayState;

/// Name of the session cookie
pub const SESSION_COOKIE: &str = "tastebook_session";

/// Identity resolved from a valid session, attached to the request
#[derive(Debug, Clone)]
pub struct SessionUser {
    pub username: String,
    pub token: String,
}

/// Session middleware: resolves the session token (cookie or bearer header)
/// and attaches the identity to the request extensions. Requests without a
/// valid session pass through anonymously; the extractors below decide
/// per-route whether that is acceptable.
pub async fn session_middleware(
    State(state): State<GatewayState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    if let Some(token) = extract_token(&jar, request.headers()) {
        if let Ok(session) = state.authenticator().authenticate_token(&token).await {
            request.extensions_mut().insert(SessionUser {
                username: session.username,
                token,
            });
        }
    }

    next.run(request).await
}

fn extract_token(jar: &CookieJar, headers: &HeaderMap) -> Option<String> {
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        return Some(cookie.value().to_string());
    }

    let value = headers
        .get(header::AUTHORIZATION)
        .and_then(|header| header.to_str().ok())?;

    let mut parts = value.split_whitespace();
    let scheme = parts.next().unwrap_or("");
    if !scheme.eq_ignore_ascii_case("Bearer") {
        return None;
    }

    let token = parts.next().unwrap_or("");
    if token.is_empty() {
        return None;
    }

    Some(token.to_string())
}

/// Extractor for routes that demand a signed-in identity
pub struct RequireUser(pub SessionUser);

#[async_trait]
impl<S> FromRequestParts<S> for RequireUser
where
    S: Send + Sync,
{
    type Rejection = GatewayError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<SessionUser>()
            .cloned()
            .map(RequireUser)
            .ok_or_else(|| GatewayError::Forbidden("authentication required".to_string()))
    }
}

/// Extractor for routes that behave differently for signed-in callers
pub struct OptionalUser(pub Option<SessionUser>);

#[async_trait]
impl<S> FromRequestParts<S> for OptionalUser
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(OptionalUser(parts.extensions.get::<SessionUser>().cloned()))
    }
}

/// Logging middleware for request/response logging
pub async fn logging_middleware(
    request: Request,
    next: Next,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let method = request.method().clone();
    let uri = request.uri().clone();

    let start = std::time::Instant::now();
    let response = next.run(request).await;
    let duration = start.elapsed();

    tracing::info!(
        method = %method,
        uri = %uri,
        status = %response.status(),
        duration_ms = duration.as_millis(),
        "Request completed"
    );

    Ok(response)
}
