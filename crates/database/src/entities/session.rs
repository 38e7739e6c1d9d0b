//! Session entity definitions

use serde::{Deserialize, Serialize};

/// A server-side session row, keyed by an opaque random token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthSession {
    pub id: i64,
    pub username: String,
    pub token: String,
    pub created_at: String,
    pub expires_at: String,
}
