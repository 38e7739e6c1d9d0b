//! Search filter construction.
//!
//! A search request carries a category selection and an optional free-text
//! term; together with the session identity they determine the single filter
//! predicate handed to the recipe store.

use crate::{RecipeError, RecipeFilter, RecipeResult};

/// Selector value meaning "every category".
pub const ALL_TYPES: &str = "all-types";
/// Selector value meaning "only recipes owned by the current identity".
pub const MY_RECIPES: &str = "my_recipes";

/// Parsed form of the `category_select` input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategorySelector {
    AllTypes,
    MyRecipes,
    Category(String),
}

impl CategorySelector {
    /// Parse the raw selector value. A missing or empty selector means
    /// "all-types"; anything that is not a reserved word is a category label.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            None | Some("") | Some(ALL_TYPES) => CategorySelector::AllTypes,
            Some(MY_RECIPES) => CategorySelector::MyRecipes,
            Some(other) => CategorySelector::Category(other.to_string()),
        }
    }
}

/// Build the store filter for a search request.
///
/// First match wins:
///
/// | selector    | term | filter                                      |
/// |-------------|------|---------------------------------------------|
/// | all-types   | no   | match everything                            |
/// | all-types   | yes  | text search                                 |
/// | my_recipes  | no   | `created_by == current_user`                |
/// | my_recipes  | yes  | `created_by == current_user` AND text search|
/// | category    | no   | `food_category == label`                    |
/// | category    | yes  | `food_category == label` AND text search    |
///
/// A whitespace-only term counts as absent. `my_recipes` without a signed-in
/// identity fails before any query is issued.
pub fn build_filter(
    selector: &CategorySelector,
    search_term: Option<&str>,
    current_user: Option<&str>,
) -> RecipeResult<RecipeFilter> {
    let search_term = search_term
        .map(str::trim)
        .filter(|term| !term.is_empty())
        .map(str::to_string);

    let filter = match selector {
        CategorySelector::AllTypes => RecipeFilter {
            search_term,
            ..Default::default()
        },
        CategorySelector::MyRecipes => {
            let Some(current_user) = current_user else {
                return Err(RecipeError::IdentityRequired);
            };
            RecipeFilter {
                created_by: Some(current_user.to_string()),
                search_term,
                ..Default::default()
            }
        }
        CategorySelector::Category(label) => RecipeFilter {
            food_category: Some(label.clone()),
            search_term,
            ..Default::default()
        },
    };

    Ok(filter)
}
