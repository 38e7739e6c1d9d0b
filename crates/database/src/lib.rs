//! # Tastebook Database Crate
//!
//! This crate provides database functionality for the Tastebook application,
//! including connection management, migrations, and repository implementations.

use sqlx::SqlitePool;
use tastebook_config::DatabaseConfig;

pub mod connection;
pub mod entities;
pub mod migrations;
pub mod repos;
pub mod types;

pub use connection::prepare_database;
pub use migrations::run_migrations;

// Re-export repositories
pub use repos::{RecipeRepository, SessionRepository, UserRepository};

// Re-export entities
pub use entities::{
    recipe::{FoodCategory, Recipe, RecipeDraft, RecipeFilter},
    session::AuthSession,
    user::User,
};

// Re-export types
pub use types::{
    errors::{DatabaseError, RecipeError, SessionError, UserError},
    DatabaseResult, RecipeResult, SessionResult, UserResult,
};

/// Initialize the database with migrations
pub async fn initialize_database(config: &DatabaseConfig) -> DatabaseResult<SqlitePool> {
    let pool = prepare_database(config)
        .await
        .map_err(|e| DatabaseError::ConnectionError(e.to_string()))?;

    run_migrations(&pool)
        .await
        .map_err(|e| DatabaseError::MigrationError(e.to_string()))?;

    Ok(pool)
}
