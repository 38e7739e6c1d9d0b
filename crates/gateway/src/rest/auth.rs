//! Authentication REST endpoints

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::GatewayResult;
use crate::middleware::{OptionalUser, RequireUser, SESSION_COOKIE};
use crate::state::GatewayState;
use crate::util::ensure_signed_out;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CredentialsPayload {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SessionResponse {
    pub token: String,
    pub user: UserResponse,
    pub expires_at: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UserResponse {
    pub username: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl SessionResponse {
    pub fn new(session: tastebook_database::AuthSession, user: tastebook_database::User) -> Self {
        Self {
            token: session.token,
            user: UserResponse {
                username: user.username,
            },
            expires_at: session.expires_at,
        }
    }
}

/// Create authentication routes
pub fn create_auth_routes() -> Router<GatewayState> {
    Router::new()
        .route("/register", get(register_form).post(register))
        .route("/login", get(login_form).post(login))
        .route("/logout", get(logout))
        .route("/delete_account", get(delete_account))
}

fn session_cookie(token: &str) -> Cookie<'static> {
    let mut cookie = Cookie::new(SESSION_COOKIE, token.to_string());
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.set_same_site(SameSite::Lax);
    cookie
}

fn removal_cookie() -> Cookie<'static> {
    let mut cookie = Cookie::from(SESSION_COOKIE);
    cookie.set_path("/");
    cookie
}

#[utoipa::path(
    get,
    path = "/register",
    tag = "Auth",
    responses(
        (status = 200, description = "Registration form may be shown"),
        (status = 403, description = "Already signed in", body = ErrorResponse)
    )
)]
pub async fn register_form(OptionalUser(user): OptionalUser) -> GatewayResult<StatusCode> {
    ensure_signed_out(user.as_ref())?;
    Ok(StatusCode::OK)
}

#[utoipa::path(
    post,
    path = "/register",
    tag = "Auth",
    request_body = CredentialsPayload,
    responses(
        (status = 201, description = "Account created, session established", body = SessionResponse),
        (status = 403, description = "Already signed in", body = ErrorResponse),
        (status = 409, description = "Username already taken", body = ErrorResponse)
    )
)]
pub async fn register(
    State(state): State<GatewayState>,
    OptionalUser(user): OptionalUser,
    jar: CookieJar,
    Json(payload): Json<CredentialsPayload>,
) -> GatewayResult<(StatusCode, CookieJar, Json<SessionResponse>)> {
    ensure_signed_out(user.as_ref())?;

    let (user, session) = state
        .authenticator()
        .register(&payload.username, &payload.password)
        .await?;

    let jar = jar.add(session_cookie(&session.token));
    Ok((
        StatusCode::CREATED,
        jar,
        Json(SessionResponse::new(session, user)),
    ))
}

#[utoipa::path(
    get,
    path = "/login",
    tag = "Auth",
    responses(
        (status = 200, description = "Login form may be shown"),
        (status = 403, description = "Already signed in", body = ErrorResponse)
    )
)]
pub async fn login_form(OptionalUser(user): OptionalUser) -> GatewayResult<StatusCode> {
    ensure_signed_out(user.as_ref())?;
    Ok(StatusCode::OK)
}

#[utoipa::path(
    post,
    path = "/login",
    tag = "Auth",
    request_body = CredentialsPayload,
    responses(
        (status = 200, description = "Credentials verified, session established", body = SessionResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse),
        (status = 403, description = "Already signed in", body = ErrorResponse)
    )
)]
pub async fn login(
    State(state): State<GatewayState>,
    OptionalUser(user): OptionalUser,
    jar: CookieJar,
    Json(payload): Json<CredentialsPayload>,
) -> GatewayResult<(CookieJar, Json<SessionResponse>)> {
    ensure_signed_out(user.as_ref())?;

    let (user, session) = state
        .authenticator()
        .login(&payload.username, &payload.password)
        .await?;

    let jar = jar.add(session_cookie(&session.token));
    Ok((jar, Json(SessionResponse::new(session, user))))
}

#[utoipa::path(
    get,
    path = "/logout",
    tag = "Auth",
    responses(
        (status = 200, description = "Session revoked", body = MessageResponse),
        (status = 403, description = "Not signed in", body = ErrorResponse)
    )
)]
pub async fn logout(
    State(state): State<GatewayState>,
    RequireUser(user): RequireUser,
    jar: CookieJar,
) -> GatewayResult<(CookieJar, Json<MessageResponse>)> {
    state.authenticator().logout(&user.token).await?;

    let jar = jar.remove(removal_cookie());
    Ok((
        jar,
        Json(MessageResponse {
            message: "Signed out".to_string(),
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/delete_account",
    tag = "Auth",
    responses(
        (status = 200, description = "Account and sessions removed", body = MessageResponse),
        (status = 403, description = "Not signed in", body = ErrorResponse)
    )
)]
pub async fn delete_account(
    State(state): State<GatewayState>,
    RequireUser(user): RequireUser,
    jar: CookieJar,
) -> GatewayResult<(CookieJar, Json<MessageResponse>)> {
    state.authenticator().delete_account(&user.username).await?;

    let jar = jar.remove(removal_cookie());
    Ok((
        jar,
        Json(MessageResponse {
            message: "Account deleted".to_string(),
        }),
    ))
}
