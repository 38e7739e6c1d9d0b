//! Registration, login and session handling for the Tastebook backend.

use argon2::password_hash::{
    rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString,
};
use argon2::Argon2;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use chrono::{DateTime, Duration, Utc};
use rand::RngCore;
use sqlx::SqlitePool;
use tastebook_config::AuthConfig;
use tastebook_database::{
    AuthSession, SessionError, SessionRepository, User, UserError, UserRepository,
};
use thiserror::Error;
use tracing::info;

#[derive(Clone)]
pub struct Authenticator {
    users: UserRepository,
    sessions: SessionRepository,
    session_ttl: Duration,
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("username already taken")]
    UserExists,
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("session not found")]
    SessionNotFound,
    #[error("session expired")]
    SessionExpired,
    #[error("invalid session token")]
    InvalidSession,
    #[error("database error: {0}")]
    Database(String),
    #[error("password hashing failed: {0}")]
    PasswordHash(#[from] argon2::password_hash::Error),
}

impl From<UserError> for AuthError {
    fn from(value: UserError) -> Self {
        match value {
            UserError::UsernameTaken => AuthError::UserExists,
            other => AuthError::Database(other.to_string()),
        }
    }
}

impl From<SessionError> for AuthError {
    fn from(value: SessionError) -> Self {
        match value {
            SessionError::SessionNotFound => AuthError::SessionNotFound,
            SessionError::DatabaseError(message) => AuthError::Database(message),
        }
    }
}

impl Authenticator {
    pub fn new(pool: SqlitePool, config: AuthConfig) -> Self {
        let session_ttl = Duration::seconds(config.session_ttl_seconds as i64);

        Self {
            users: UserRepository::new(pool.clone()),
            sessions: SessionRepository::new(pool),
            session_ttl,
        }
    }

    /// Lowercase a submitted username. Registration and every lookup go
    /// through this, so usernames are case-insensitive everywhere.
    pub fn normalize_username(raw: &str) -> String {
        raw.trim().to_lowercase()
    }

    /// Create an account and establish its first session.
    pub async fn register(&self, username: &str, password: &str) -> Result<(User, AuthSession), AuthError> {
        let username = Self::normalize_username(username);

        if self.users.find_by_username(&username).await?.is_some() {
            return Err(AuthError::UserExists);
        }

        let password_hash = hash_password(password)?;
        let user = self.users.create(&username, &password_hash).await?;
        let session = self.issue_session(&username).await?;

        info!(user = %user.username, "registered new account");
        Ok((user, session))
    }

    /// Verify credentials and establish a session.
    ///
    /// An unknown username and a wrong password fail identically; nothing
    /// reveals which of the two occurred.
    pub async fn login(&self, username: &str, password: &str) -> Result<(User, AuthSession), AuthError> {
        let username = Self::normalize_username(username);

        let Some(user) = self.users.find_by_username(&username).await? else {
            return Err(AuthError::InvalidCredentials);
        };

        let stored_hash = PasswordHash::new(&user.password_hash)?;
        Argon2::default()
            .verify_password(password.as_bytes(), &stored_hash)
            .map_err(|_| AuthError::InvalidCredentials)?;

        let session = self.issue_session(&username).await?;
        Ok((user, session))
    }

    /// Resolve a session token to its session row.
    ///
    /// Expired sessions are deleted on first touch.
    pub async fn authenticate_token(&self, token: &str) -> Result<AuthSession, AuthError> {
        let Some(session) = self.sessions.find_by_token(token).await? else {
            return Err(AuthError::SessionNotFound);
        };

        let expires_at = DateTime::parse_from_rfc3339(&session.expires_at)
            .map_err(|_| AuthError::InvalidSession)?
            .with_timezone(&Utc);

        if expires_at <= Utc::now() {
            self.sessions.delete_by_token(token).await?;
            return Err(AuthError::SessionExpired);
        }

        Ok(session)
    }

    /// Revoke the session behind a token.
    pub async fn logout(&self, token: &str) -> Result<(), AuthError> {
        if !self.sessions.delete_by_token(token).await? {
            return Err(AuthError::SessionNotFound);
        }
        Ok(())
    }

    /// Delete an account and every session it holds.
    ///
    /// Recipes owned by the account are left in place; their `created_by`
    /// back-reference dangles from here on.
    pub async fn delete_account(&self, username: &str) -> Result<(), AuthError> {
        let username = Self::normalize_username(username);

        self.sessions.delete_for_username(&username).await?;

        if let Some(user) = self.users.find_by_username(&username).await? {
            self.users.delete(user.id).await?;
            info!(user = %username, "deleted account");
        }

        Ok(())
    }

    async fn issue_session(&self, username: &str) -> Result<AuthSession, AuthError> {
        let token = generate_session_token();
        let expires_at = (Utc::now() + self.session_ttl).to_rfc3339();

        let session = self.sessions.create(username, &token, &expires_at).await?;
        Ok(session)
    }
}

fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

fn generate_session_token() -> String {
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}
