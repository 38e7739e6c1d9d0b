//! User entity definitions

use serde::{Deserialize, Serialize};

/// User entity representing a registered account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    /// Lowercased at registration; doubles as display name and session identity.
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: String,
    pub updated_at: String,
}
