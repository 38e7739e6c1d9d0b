//! Service layer for recipe operations

pub mod mock_repositories;
pub mod recipe_service;

pub use mock_repositories::MockRecipeRepository;
pub use recipe_service::{RecipeService, RecipeStore};
