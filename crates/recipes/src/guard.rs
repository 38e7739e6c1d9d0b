//! Ownership checking for recipe mutations.

use crate::{Recipe, RecipeError};

/// Ownership checks consumed by every mutating operation
pub struct OwnershipGuard;

impl OwnershipGuard {
    /// Check that `username` owns the recipe.
    ///
    /// The caller resolves the recipe first, so a missing recipe surfaces as
    /// not-found before ownership is ever evaluated.
    pub fn can_modify(recipe: &Recipe, username: &str) -> Result<(), RecipeError> {
        if recipe.created_by != username {
            return Err(RecipeError::NotOwner);
        }
        Ok(())
    }
}
