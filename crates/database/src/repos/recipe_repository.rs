//! Repository for recipe data access operations.

use crate::entities::{FoodCategory, Recipe, RecipeDraft, RecipeFilter};
use crate::types::{RecipeError, RecipeResult};
use chrono::Utc;
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};

const RECIPE_COLUMNS: &str =
    "id, public_id, title, food_category, ingredients, steps, image_url, extra, created_by, created_at, updated_at";

/// Repository for recipe database operations
#[derive(Clone)]
pub struct RecipeRepository {
    pool: SqlitePool,
}

impl RecipeRepository {
    /// Create a new recipe repository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Find recipe by public ID
    pub async fn find_by_public_id(&self, public_id: &str) -> RecipeResult<Option<Recipe>> {
        let row = sqlx::query(&format!(
            "SELECT {RECIPE_COLUMNS} FROM recipes WHERE public_id = ?"
        ))
        .bind(public_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RecipeError::DatabaseError(e.to_string()))?;

        row.map(|row| recipe_from_row(&row)).transpose()
    }

    /// Find recipes matching a filter predicate, in insertion order.
    ///
    /// Absent filter fields do not constrain the result; an empty filter
    /// returns the whole collection. The search term matches as a substring
    /// across title, ingredients and steps.
    pub async fn find_filtered(&self, filter: &RecipeFilter) -> RecipeResult<Vec<Recipe>> {
        let mut sql = format!("SELECT {RECIPE_COLUMNS} FROM recipes WHERE 1 = 1");
        let mut binds: Vec<String> = Vec::new();

        if let Some(ref created_by) = filter.created_by {
            sql.push_str(" AND created_by = ?");
            binds.push(created_by.clone());
        }

        if let Some(ref category) = filter.food_category {
            sql.push_str(" AND food_category = ?");
            binds.push(category.clone());
        }

        if let Some(ref term) = filter.search_term {
            sql.push_str(" AND (title LIKE ? OR ingredients LIKE ? OR steps LIKE ?)");
            let pattern = format!("%{}%", term);
            binds.push(pattern.clone());
            binds.push(pattern.clone());
            binds.push(pattern);
        }

        sql.push_str(" ORDER BY id");

        let mut query = sqlx::query(&sql);
        for value in &binds {
            query = query.bind(value);
        }

        let rows = query
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RecipeError::DatabaseError(e.to_string()))?;

        rows.iter().map(recipe_from_row).collect()
    }

    /// List the whole collection in insertion order
    pub async fn list_all(&self) -> RecipeResult<Vec<Recipe>> {
        self.find_filtered(&RecipeFilter::default()).await
    }

    /// Insert a new recipe owned by `created_by`
    pub async fn create(&self, draft: &RecipeDraft, created_by: &str) -> RecipeResult<Recipe> {
        let now = Utc::now().to_rfc3339();
        let public_id = cuid2::create_id();
        let extra = serde_json::to_string(&draft.extra)
            .map_err(|e| RecipeError::SerializationError(e.to_string()))?;

        sqlx::query(
            "INSERT INTO recipes (public_id, title, food_category, ingredients, steps, image_url, extra, created_by, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&public_id)
        .bind(&draft.title)
        .bind(draft.food_category.as_str())
        .bind(&draft.ingredients)
        .bind(&draft.steps)
        .bind(&draft.image_url)
        .bind(&extra)
        .bind(created_by)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await
        .map_err(|e| RecipeError::DatabaseError(e.to_string()))?;

        self.find_by_public_id(&public_id)
            .await?
            .ok_or_else(|| RecipeError::DatabaseError("Failed to retrieve created recipe".to_string()))
    }

    /// Replace every payload field of an existing recipe and re-stamp its owner
    pub async fn replace(
        &self,
        id: i64,
        draft: &RecipeDraft,
        created_by: &str,
    ) -> RecipeResult<Recipe> {
        let now = Utc::now().to_rfc3339();
        let extra = serde_json::to_string(&draft.extra)
            .map_err(|e| RecipeError::SerializationError(e.to_string()))?;

        let result = sqlx::query(
            "UPDATE recipes SET title = ?, food_category = ?, ingredients = ?, steps = ?, image_url = ?, extra = ?, created_by = ?, updated_at = ? WHERE id = ?",
        )
        .bind(&draft.title)
        .bind(draft.food_category.as_str())
        .bind(&draft.ingredients)
        .bind(&draft.steps)
        .bind(&draft.image_url)
        .bind(&extra)
        .bind(created_by)
        .bind(&now)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| RecipeError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RecipeError::RecipeNotFound);
        }

        let row = sqlx::query(&format!("SELECT {RECIPE_COLUMNS} FROM recipes WHERE id = ?"))
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| RecipeError::DatabaseError(e.to_string()))?;

        recipe_from_row(&row)
    }

    /// Delete a recipe row
    pub async fn delete(&self, id: i64) -> RecipeResult<()> {
        let result = sqlx::query("DELETE FROM recipes WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| RecipeError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RecipeError::RecipeNotFound);
        }

        Ok(())
    }

    /// Get recipe count
    pub async fn count(&self) -> RecipeResult<i64> {
        let count: Option<i64> = sqlx::query_scalar("SELECT COUNT(*) FROM recipes")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| RecipeError::DatabaseError(e.to_string()))?;

        Ok(count.unwrap_or(0))
    }
}

fn recipe_from_row(row: &SqliteRow) -> RecipeResult<Recipe> {
    let category_str: String = row
        .try_get("food_category")
        .map_err(|e| RecipeError::DatabaseError(e.to_string()))?;
    let food_category = FoodCategory::parse(&category_str)
        .ok_or_else(|| RecipeError::DatabaseError(format!("unknown food category: {category_str}")))?;

    let extra_str: String = row
        .try_get("extra")
        .map_err(|e| RecipeError::DatabaseError(e.to_string()))?;
    let extra = serde_json::from_str(&extra_str)
        .map_err(|e| RecipeError::SerializationError(e.to_string()))?;

    Ok(Recipe {
        id: row
            .try_get("id")
            .map_err(|e| RecipeError::DatabaseError(e.to_string()))?,
        public_id: row
            .try_get("public_id")
            .map_err(|e| RecipeError::DatabaseError(e.to_string()))?,
        title: row
            .try_get("title")
            .map_err(|e| RecipeError::DatabaseError(e.to_string()))?,
        food_category,
        ingredients: row
            .try_get("ingredients")
            .map_err(|e| RecipeError::DatabaseError(e.to_string()))?,
        steps: row
            .try_get("steps")
            .map_err(|e| RecipeError::DatabaseError(e.to_string()))?,
        image_url: row
            .try_get("image_url")
            .map_err(|e| RecipeError::DatabaseError(e.to_string()))?,
        extra,
        created_by: row
            .try_get("created_by")
            .map_err(|e| RecipeError::DatabaseError(e.to_string()))?,
        created_at: row
            .try_get("created_at")
            .map_err(|e| RecipeError::DatabaseError(e.to_string()))?,
        updated_at: row
            .try_get("updated_at")
            .map_err(|e| RecipeError::DatabaseError(e.to_string()))?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::migrations::run_migrations;
    use tempfile::TempDir;

    async fn create_test_pool() -> (SqlitePool, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("test.db");
        let db_url = format!("sqlite://{}?mode=rwc", db_path.display());

        let pool = SqlitePool::connect(&db_url).await.unwrap();
        run_migrations(&pool).await.unwrap();
        (pool, temp_dir)
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

    #[tokio::test]
    async fn test_create_and_fetch_recipe() {
        let (pool, _temp_dir) = create_test_pool().await;
        let repo = RecipeRepository::new(pool);

        let created = repo.create(&soup_draft(), "alice").await.unwrap();
        assert_eq!(created.title, "Tomato Soup");
        assert_eq!(created.created_by, "alice");
        assert_eq!(created.food_category, FoodCategory::Soup);
        assert!(!created.public_id.is_empty());

        let fetched = repo
            .find_by_public_id(&created.public_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(fetched, created);

        assert!(repo.find_by_public_id("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_extra_fields_round_trip() {
        let (pool, _temp_dir) = create_test_pool().await;
        let repo = RecipeRepository::new(pool);

        let mut draft = soup_draft();
        draft
            .extra
            .insert("serves".to_string(), serde_json::json!(4));

        let created = repo.create(&draft, "alice").await.unwrap();
        assert_eq!(created.extra.get("serves"), Some(&serde_json::json!(4)));
    }

    #[tokio::test]
    async fn test_filter_by_owner_category_and_term() {
        let (pool, _temp_dir) = create_test_pool().await;
        let repo = RecipeRepository::new(pool);

        repo.create(&soup_draft(), "alice").await.unwrap();

        let mut pancakes = soup_draft();
        pancakes.title = "Pancakes".to_string();
        pancakes.food_category = FoodCategory::Breakfast;
        pancakes.ingredients = "flour, eggs, milk".to_string();
        repo.create(&pancakes, "bob").await.unwrap();

        let all = repo.find_filtered(&RecipeFilter::default()).await.unwrap();
        assert_eq!(all.len(), 2);

        let by_owner = repo
            .find_filtered(&RecipeFilter {
                created_by: Some("alice".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(by_owner.len(), 1);
        assert_eq!(by_owner[0].title, "Tomato Soup");

        let by_category = repo
            .find_filtered(&RecipeFilter {
                food_category: Some("breakfast".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(by_category.len(), 1);
        assert_eq!(by_category[0].title, "Pancakes");

        let by_term = repo
            .find_filtered(&RecipeFilter {
                search_term: Some("basil".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(by_term.len(), 1);
        assert_eq!(by_term[0].title, "Tomato Soup");

        let combined = repo
            .find_filtered(&RecipeFilter {
                created_by: Some("bob".to_string()),
                search_term: Some("flour".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(combined.len(), 1);
        assert_eq!(combined[0].title, "Pancakes");

        let unknown_category = repo
            .find_filtered(&RecipeFilter {
                food_category: Some("sandwich".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert!(unknown_category.is_empty());
    }

    #[tokio::test]
    async fn test_results_come_back_in_insertion_order() {
        let (pool, _temp_dir) = create_test_pool().await;
        let repo = RecipeRepository::new(pool);

        for title in ["First", "Second", "Third"] {
            let mut draft = soup_draft();
            draft.title = title.to_string();
            repo.create(&draft, "alice").await.unwrap();
        }

        let all = repo.list_all().await.unwrap();
        let titles: Vec<&str> = all.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["First", "Second", "Third"]);
    }

    #[tokio::test]
    async fn test_replace_overwrites_fields_and_owner_stamp() {
        let (pool, _temp_dir) = create_test_pool().await;
        let repo = RecipeRepository::new(pool);

        let created = repo.create(&soup_draft(), "alice").await.unwrap();

        let mut updated_draft = soup_draft();
        updated_draft.title = "Roasted Tomato Soup".to_string();
        updated_draft.image_url = Some("https://example.com/soup.jpg".to_string());

        let updated = repo
            .replace(created.id, &updated_draft, "alice")
            .await
            .unwrap();
        assert_eq!(updated.title, "Roasted Tomato Soup");
        assert_eq!(
            updated.image_url.as_deref(),
            Some("https://example.com/soup.jpg")
        );
        assert_eq!(updated.created_by, "alice");
        assert_eq!(updated.public_id, created.public_id);

        let err = repo.replace(9999, &updated_draft, "alice").await.unwrap_err();
        assert!(matches!(err, RecipeError::RecipeNotFound));
    }

    #[tokio::test]
    async fn test_delete_recipe_twice_reports_not_found() {
        let (pool, _temp_dir) = create_test_pool().await;
        let repo = RecipeRepository::new(pool);

        let created = repo.create(&soup_draft(), "alice").await.unwrap();
        repo.delete(created.id).await.unwrap();

        let err = repo.delete(created.id).await.unwrap_err();
        assert!(matches!(err, RecipeError::RecipeNotFound));
        assert_eq!(repo.count().await.unwrap(), 0);
    }
}
