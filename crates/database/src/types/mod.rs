//! Shared types for the database layer

pub mod errors;

pub use errors::{DatabaseError, RecipeError, SessionError, UserError};

/// Result types for store operations
pub type DatabaseResult<T> = Result<T, DatabaseError>;
pub type UserResult<T> = Result<T, UserError>;
pub type RecipeResult<T> = Result<T, RecipeError>;
pub type SessionResult<T> = Result<T, SessionError>;
