//! Mock repository implementations for testing core service functionality

use crate::{Recipe, RecipeDraft, RecipeError, RecipeFilter, RecipeResult};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Mock recipe repository for testing
pub struct MockRecipeRepository {
    recipes: Arc<RwLock<HashMap<i64, Recipe>>>,
    next_id: Arc<RwLock<i64>>,
}

impl MockRecipeRepository {
    pub fn new() -> Self {
        Self {
            recipes: Arc::new(RwLock::new(HashMap::new())),
            next_id: Arc::new(RwLock::new(1)),
        }
    }

    pub async fn list_all(&self) -> RecipeResult<Vec<Recipe>> {
        self.find_filtered(&RecipeFilter::default()).await
    }

    pub async fn find_by_public_id(&self, public_id: &str) -> RecipeResult<Option<Recipe>> {
        let recipes = self.recipes.read().await;
        Ok(recipes.values().find(|r| r.public_id == public_id).cloned())
    }

    pub async fn find_filtered(&self, filter: &RecipeFilter) -> RecipeResult<Vec<Recipe>> {
        let recipes = self.recipes.read().await;

        let mut matches: Vec<Recipe> = recipes
            .values()
            .filter(|recipe| {
                if let Some(ref created_by) = filter.created_by {
                    if &recipe.created_by != created_by {
                        return false;
                    }
                }
                if let Some(ref category) = filter.food_category {
                    if recipe.food_category.as_str() != category {
                        return false;
                    }
                }
                if let Some(ref term) = filter.search_term {
                    let haystacks = [&recipe.title, &recipe.ingredients, &recipe.steps];
                    if !haystacks.iter().any(|field| field.contains(term.as_str())) {
                        return false;
                    }
                }
                true
            })
            .cloned()
            .collect();

        // Insertion order, matching the real store.
        matches.sort_by_key(|recipe| recipe.id);
        Ok(matches)
    }

    pub async fn create(&self, draft: &RecipeDraft, created_by: &str) -> RecipeResult<Recipe> {
        let mut next_id = self.next_id.write().await;
        let recipe_id = *next_id;
        *next_id += 1;

        let now = chrono::Utc::now().to_rfc3339();
        let recipe = Recipe {
            id: recipe_id,
            public_id: format!("recipe_{}", recipe_id),
            title: draft.title.clone(),
            food_category: draft.food_category,
            ingredients: draft.ingredients.clone(),
            steps: draft.steps.clone(),
            image_url: draft.image_url.clone(),
            extra: draft.extra.clone(),
            created_by: created_by.to_string(),
            created_at: now.clone(),
            updated_at: now,
        };

        let mut recipes = self.recipes.write().await;
        recipes.insert(recipe_id, recipe.clone());

        Ok(recipe)
    }

    pub async fn replace(
        &self,
        id: i64,
        draft: &RecipeDraft,
        created_by: &str,
    ) -> RecipeResult<Recipe> {
        let mut recipes = self.recipes.write().await;
        if let Some(recipe) = recipes.get_mut(&id) {
            recipe.title = draft.title.clone();
            recipe.food_category = draft.food_category;
            recipe.ingredients = draft.ingredients.clone();
            recipe.steps = draft.steps.clone();
            recipe.image_url = draft.image_url.clone();
            recipe.extra = draft.extra.clone();
            recipe.created_by = created_by.to_string();
            recipe.updated_at = chrono::Utc::now().to_rfc3339();
            Ok(recipe.clone())
        } else {
            Err(RecipeError::RecipeNotFound)
        }
    }

    pub async fn delete(&self, id: i64) -> RecipeResult<()> {
        let mut recipes = self.recipes.write().await;
        if recipes.remove(&id).is_none() {
            return Err(RecipeError::RecipeNotFound);
        }
        Ok(())
    }
}

impl Default for MockRecipeRepository {
    fn default() -> Self {
        Self::new()
    }
}
