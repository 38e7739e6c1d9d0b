//! Error types for the database layer

use thiserror::Error;

/// General database error
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Database connection error: {0}")]
    ConnectionError(String),

    #[error("Database migration error: {0}")]
    MigrationError(String),
}

/// User-specific database errors
#[derive(Debug, Error, Clone)]
pub enum UserError {
    #[error("User not found")]
    UserNotFound,

    #[error("Username already taken")]
    UsernameTaken,

    #[error("Database error: {0}")]
    DatabaseError(String),
}

/// Recipe-specific errors, shared by the repository and the service layer
#[derive(Debug, Error, Clone)]
pub enum RecipeError {
    #[error("Recipe not found")]
    RecipeNotFound,

    #[error("Only the owner may modify this recipe")]
    NotOwner,

    #[error("A signed-in identity is required")]
    IdentityRequired,

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

/// Session-specific database errors
#[derive(Debug, Error, Clone)]
pub enum SessionError {
    #[error("Session not found")]
    SessionNotFound,

    #[error("Database error: {0}")]
    DatabaseError(String),
}
