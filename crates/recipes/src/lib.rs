//! # Tastebook Recipes Crate
//!
//! Domain logic for the shared recipe collection: search filter construction,
//! ownership rules for mutation, and the recipe service used by the gateway.
//!
//! ## Architecture
//!
//! - **Query**: maps a category selection and free-text term to a store filter
//! - **Guard**: typed allow/deny for owner-only operations
//! - **Services**: business logic over a swappable recipe store

pub mod guard;
pub mod query;
pub mod services;

// Re-export database types and repositories
pub use tastebook_database::{
    FoodCategory, Recipe, RecipeDraft, RecipeError, RecipeFilter, RecipeRepository, RecipeResult,
};

// Re-export main types for convenience
pub use guard::OwnershipGuard;
pub use query::{build_filter, CategorySelector};
pub use services::{MockRecipeRepository, RecipeService, RecipeStore};
