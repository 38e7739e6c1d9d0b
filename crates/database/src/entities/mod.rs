//! Entity definitions for the Tastebook store

pub mod recipe;
pub mod session;
pub mod user;

pub use recipe::{FoodCategory, Recipe, RecipeDraft, RecipeFilter};
pub use session::AuthSession;
pub use user::User;
