//! Recipe service for collection and ownership operations.

use crate::guard::OwnershipGuard;
use crate::query::{build_filter, CategorySelector};
use crate::services::mock_repositories::MockRecipeRepository;
use crate::{Recipe, RecipeDraft, RecipeError, RecipeFilter, RecipeRepository, RecipeResult};
use sqlx::SqlitePool;

/// Service for recipe collection operations
pub struct RecipeService<R> {
    repository: R,
}

impl RecipeService<RecipeRepository> {
    /// Create a new recipe service instance with the real database repository
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            repository: RecipeRepository::new(pool),
        }
    }
}

impl RecipeService<MockRecipeRepository> {
    /// Create a new recipe service instance for testing
    pub fn new_for_testing() -> Self {
        Self {
            repository: MockRecipeRepository::new(),
        }
    }
}

impl<R> RecipeService<R>
where
    R: RecipeStore,
{
    /// List the whole collection in insertion order
    pub async fn list_all(&self) -> RecipeResult<Vec<Recipe>> {
        self.repository.find_filtered(&RecipeFilter::default()).await
    }

    /// List recipes owned by the given identity
    pub async fn list_owned(&self, identity: &str) -> RecipeResult<Vec<Recipe>> {
        let filter = build_filter(&CategorySelector::MyRecipes, None, Some(identity))?;
        self.repository.find_filtered(&filter).await
    }

    /// Run a search request through the filter builder and the store
    pub async fn search(
        &self,
        selector: &CategorySelector,
        search_term: Option<&str>,
        current_user: Option<&str>,
    ) -> RecipeResult<Vec<Recipe>> {
        let filter = build_filter(selector, search_term, current_user)?;
        self.repository.find_filtered(&filter).await
    }

    /// Get a recipe by its public ID
    pub async fn get(&self, public_id: &str) -> RecipeResult<Recipe> {
        self.repository
            .find_by_public_id(public_id)
            .await?
            .ok_or(RecipeError::RecipeNotFound)
    }

    /// Get a recipe for editing; only the owner may see the edit form
    pub async fn get_for_edit(&self, identity: &str, public_id: &str) -> RecipeResult<Recipe> {
        let recipe = self.get(public_id).await?;
        OwnershipGuard::can_modify(&recipe, identity)?;
        Ok(recipe)
    }

    /// Create a recipe stamped with the acting identity
    pub async fn create(&self, identity: &str, mut draft: RecipeDraft) -> RecipeResult<Recipe> {
        scrub_reserved_fields(&mut draft);

        let recipe = self.repository.create(&draft, identity).await?;
        tracing::info!(recipe = %recipe.public_id, owner = %identity, "created recipe");
        Ok(recipe)
    }

    /// Replace every field of an owned recipe.
    ///
    /// The owner stamp is rewritten from the acting identity on every edit,
    /// whatever the submitted payload claims.
    pub async fn edit(
        &self,
        identity: &str,
        public_id: &str,
        mut draft: RecipeDraft,
    ) -> RecipeResult<Recipe> {
        let existing = self.get(public_id).await?;
        OwnershipGuard::can_modify(&existing, identity)?;

        scrub_reserved_fields(&mut draft);

        let updated = self.repository.replace(existing.id, &draft, identity).await?;
        tracing::info!(recipe = %updated.public_id, owner = %identity, "updated recipe");
        Ok(updated)
    }

    /// Delete an owned recipe
    pub async fn delete(&self, identity: &str, public_id: &str) -> RecipeResult<()> {
        let existing = self.get(public_id).await?;
        OwnershipGuard::can_modify(&existing, identity)?;

        self.repository.delete(existing.id).await?;
        tracing::info!(recipe = %public_id, owner = %identity, "deleted recipe");
        Ok(())
    }
}

/// The owner stamp comes from the session identity alone; a `created_by`
/// smuggled into the open extension map is dropped.
fn scrub_reserved_fields(draft: &mut RecipeDraft) {
    draft.extra.remove("created_by");
}

/// Trait for recipe stores to allow generic usage
pub trait RecipeStore {
    async fn find_by_public_id(&self, public_id: &str) -> RecipeResult<Option<Recipe>>;
    async fn find_filtered(&self, filter: &RecipeFilter) -> RecipeResult<Vec<Recipe>>;
    async fn create(&self, draft: &RecipeDraft, created_by: &str) -> RecipeResult<Recipe>;
    async fn replace(&self, id: i64, draft: &RecipeDraft, created_by: &str)
        -> RecipeResult<Recipe>;
    async fn delete(&self, id: i64) -> RecipeResult<()>;
}

impl RecipeStore for RecipeRepository {
    async fn find_by_public_id(&self, public_id: &str) -> RecipeResult<Option<Recipe>> {
        self.find_by_public_id(public_id).await
    }

    async fn find_filtered(&self, filter: &RecipeFilter) -> RecipeResult<Vec<Recipe>> {
        self.find_filtered(filter).await
    }

    async fn create(&self, draft: &RecipeDraft, created_by: &str) -> RecipeResult<Recipe> {
        self.create(draft, created_by).await
    }

    async fn replace(
        &self,
        id: i64,
        draft: &RecipeDraft,
        created_by: &str,
    ) -> RecipeResult<Recipe> {
        self.replace(id, draft, created_by).await
    }

    async fn delete(&self, id: i64) -> RecipeResult<()> {
        self.delete(id).await
    }
}

impl RecipeStore for MockRecipeRepository {
    async fn find_by_public_id(&self, public_id: &str) -> RecipeResult<Option<Recipe>> {
        self.find_by_public_id(public_id).await
    }

    async fn find_filtered(&self, filter: &RecipeFilter) -> RecipeResult<Vec<Recipe>> {
        self.find_filtered(filter).await
    }

    async fn create(&self, draft: &RecipeDraft, created_by: &str) -> RecipeResult<Recipe> {
        self.create(draft, created_by).await
    }

    async fn replace(
        &self,
        id: i64,
        draft: &RecipeDraft,
        created_by: &str,
    ) -> RecipeResult<Recipe> {
        self.replace(id, draft, created_by).await
    }

    async fn delete(&self, id: i64) -> RecipeResult<()> {
        self.delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FoodCategory;

    fn create_test_service() -> RecipeService<MockRecipeRepository> {
        RecipeService::new_for_testing()
    }

    fn soup_draft() -> RecipeDraft {
        RecipeDraft {
            title: "Tomato Soup".to_string(),
            food_category: FoodCategory::Soup,
            ingredients: "tomatoes, basil, stock".to_string(),
            steps: "Simmer everything, then blend.".to_string(),
            image_url: None,
            extra: serde_json::Map::new(),
        }
    }

    fn pancake_draft() -> RecipeDraft {
        RecipeDraft {
            title: "Pancakes".to_string(),
            food_category: FoodCategory::Breakfast,
            ingredients: "flour, eggs, milk".to_string(),
            steps: "Whisk and fry.".to_string(),
            image_url: None,
            extra: serde_json::Map::new(),
        }
    }

    #[tokio::test]
    async fn test_create_stamps_acting_identity() {
        let service = create_test_service();

        let recipe = service.create("alice", soup_draft()).await.unwrap();

        assert_eq!(recipe.created_by, "alice");
        assert_eq!(recipe.title, "Tomato Soup");
    }

    #[tokio::test]
    async fn test_create_drops_smuggled_owner_field() {
        let service = create_test_service();

        let mut draft = soup_draft();
        draft.extra.insert(
            "created_by".to_string(),
            serde_json::json!("mallory"),
        );
        draft
            .extra
            .insert("serves".to_string(), serde_json::json!(4));

        let recipe = service.create("alice", draft).await.unwrap();

        assert_eq!(recipe.created_by, "alice");
        assert!(recipe.extra.get("created_by").is_none());
        assert_eq!(recipe.extra.get("serves"), Some(&serde_json::json!(4)));
    }

    #[tokio::test]
    async fn test_get_missing_recipe_is_not_found() {
        let service = create_test_service();

        let err = service.get("missing").await.unwrap_err();
        assert!(matches!(err, RecipeError::RecipeNotFound));
    }

    #[tokio::test]
    async fn test_edit_by_owner_replaces_fields_and_restamps() {
        let service = create_test_service();
        let recipe = service.create("alice", soup_draft()).await.unwrap();

        let mut draft = soup_draft();
        draft.title = "Roasted Tomato Soup".to_string();
        draft
            .extra
            .insert("created_by".to_string(), serde_json::json!("mallory"));

        let updated = service
            .edit("alice", &recipe.public_id, draft)
            .await
            .unwrap();

        assert_eq!(updated.title, "Roasted Tomato Soup");
        assert_eq!(updated.created_by, "alice");
        assert!(updated.extra.get("created_by").is_none());
    }

    #[tokio::test]
    async fn test_edit_by_non_owner_is_denied_and_leaves_recipe_unmodified() {
        let service = create_test_service();
        let recipe = service.create("alice", soup_draft()).await.unwrap();

        let mut draft = soup_draft();
        draft.title = "Hijacked".to_string();

        let err = service
            .edit("bob", &recipe.public_id, draft)
            .await
            .unwrap_err();
        assert!(matches!(err, RecipeError::NotOwner));

        let unchanged = service.get(&recipe.public_id).await.unwrap();
        assert_eq!(unchanged.title, "Tomato Soup");
        assert_eq!(unchanged.created_by, "alice");
    }

    #[tokio::test]
    async fn test_edit_missing_recipe_is_not_found_before_ownership() {
        let service = create_test_service();

        let err = service
            .edit("alice", "missing", soup_draft())
            .await
            .unwrap_err();
        assert!(matches!(err, RecipeError::RecipeNotFound));
    }

    #[tokio::test]
    async fn test_delete_by_non_owner_is_denied() {
        let service = create_test_service();
        let recipe = service.create("alice", soup_draft()).await.unwrap();

        let err = service.delete("bob", &recipe.public_id).await.unwrap_err();
        assert!(matches!(err, RecipeError::NotOwner));

        assert!(service.get(&recipe.public_id).await.is_ok());
    }

    #[tokio::test]
    async fn test_delete_by_owner_then_again_is_not_found() {
        let service = create_test_service();
        let recipe = service.create("alice", soup_draft()).await.unwrap();

        service.delete("alice", &recipe.public_id).await.unwrap();

        let err = service.get(&recipe.public_id).await.unwrap_err();
        assert!(matches!(err, RecipeError::RecipeNotFound));

        let err = service
            .delete("alice", &recipe.public_id)
            .await
            .unwrap_err();
        assert!(matches!(err, RecipeError::RecipeNotFound));
    }

    #[tokio::test]
    async fn test_get_for_edit_enforces_ownership() {
        let service = create_test_service();
        let recipe = service.create("alice", soup_draft()).await.unwrap();

        assert!(service
            .get_for_edit("alice", &recipe.public_id)
            .await
            .is_ok());

        let err = service
            .get_for_edit("bob", &recipe.public_id)
            .await
            .unwrap_err();
        assert!(matches!(err, RecipeError::NotOwner));

        let err = service.get_for_edit("alice", "missing").await.unwrap_err();
        assert!(matches!(err, RecipeError::RecipeNotFound));
    }

    #[tokio::test]
    async fn test_list_owned_returns_only_owned_recipes() {
        let service = create_test_service();
        service.create("alice", soup_draft()).await.unwrap();
        service.create("bob", pancake_draft()).await.unwrap();

        let owned = service.list_owned("alice").await.unwrap();
        assert_eq!(owned.len(), 1);
        assert_eq!(owned[0].created_by, "alice");
    }

    #[tokio::test]
    async fn test_search_all_types_returns_everything() {
        let service = create_test_service();
        service.create("alice", soup_draft()).await.unwrap();
        service.create("bob", pancake_draft()).await.unwrap();

        let results = service
            .search(&CategorySelector::AllTypes, Some(""), None)
            .await
            .unwrap();
        assert_eq!(results.len(), 2);
    }

    #[tokio::test]
    async fn test_search_my_recipes_without_identity_fails() {
        let service = create_test_service();
        service.create("alice", soup_draft()).await.unwrap();

        let err = service
            .search(&CategorySelector::MyRecipes, None, None)
            .await
            .unwrap_err();
        assert!(
            matches!(err, RecipeError::IdentityRequired),
            "must fail instead of returning an unfiltered or empty list"
        );
    }

    #[tokio::test]
    async fn test_search_by_category_and_term() {
        let service = create_test_service();
        service.create("alice", soup_draft()).await.unwrap();
        service.create("bob", pancake_draft()).await.unwrap();

        let selector = CategorySelector::Category("soup".to_string());
        let results = service.search(&selector, None, None).await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].title, "Tomato Soup");

        let results = service
            .search(&selector, Some("basil"), None)
            .await
            .unwrap();
        assert_eq!(results.len(), 1);

        let results = service
            .search(&selector, Some("flour"), None)
            .await
            .unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_list_all_preserves_insertion_order() {
        let service = create_test_service();
        service.create("alice", soup_draft()).await.unwrap();
        service.create("bob", pancake_draft()).await.unwrap();

        let all = service.list_all().await.unwrap();
        let titles: Vec<&str> = all.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["Tomato Soup", "Pancakes"]);
    }
}
