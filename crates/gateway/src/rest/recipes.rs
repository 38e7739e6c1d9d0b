//! Recipe REST endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Form, Json, Router,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use tastebook_database::{FoodCategory, Recipe, RecipeDraft};
use tastebook_recipes::CategorySelector;

use crate::error::{GatewayError, GatewayResult};
use crate::middleware::{OptionalUser, RequireUser};
use crate::state::GatewayState;

#[derive(Debug, Serialize, ToSchema)]
pub struct RecipeResponse {
    pub id: String,
    pub title: String,
    pub food_category: String,
    pub ingredients: String,
    pub steps: String,
    pub image_url: Option<String>,
    #[schema(value_type = Object)]
    pub extra: serde_json::Map<String, serde_json::Value>,
    pub created_by: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Recipe> for RecipeResponse {
    fn from(recipe: Recipe) -> Self {
        Self {
            id: recipe.public_id,
            title: recipe.title,
            food_category: recipe.food_category.as_str().to_string(),
            ingredients: recipe.ingredients,
            steps: recipe.steps,
            image_url: recipe.image_url,
            extra: recipe.extra,
            created_by: recipe.created_by,
            created_at: recipe.created_at,
            updated_at: recipe.updated_at,
        }
    }
}

/// Recipe payload for create and full-replacement edit.
///
/// Unknown top-level fields land in the open `extra` map; any owner claim
/// submitted there is ignored in favour of the session identity.
#[derive(Debug, Deserialize, ToSchema)]
pub struct RecipePayload {
    pub title: String,
    pub food_category: String,
    #[serde(default)]
    pub ingredients: String,
    #[serde(default)]
    pub steps: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(flatten)]
    #[schema(value_type = Object)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl RecipePayload {
    fn into_draft(self) -> GatewayResult<RecipeDraft> {
        let food_category = FoodCategory::parse(&self.food_category).ok_or_else(|| {
            GatewayError::InvalidRequest(format!("unknown food category: {}", self.food_category))
        })?;

        Ok(RecipeDraft {
            title: self.title,
            food_category,
            ingredients: self.ingredients,
            steps: self.steps,
            image_url: self.image_url,
            extra: self.extra,
        })
    }
}

#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct SearchParams {
    pub category_select: Option<String>,
    pub ingredient_search: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CreateRecipeContext {
    pub categories: Vec<&'static str>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

/// Create recipe routes
pub fn create_recipe_routes() -> Router<GatewayState> {
    Router::new()
        .route("/", get(home))
        .route("/browse-recipes", get(browse_recipes))
        .route(
            "/search_recipe",
            get(search_recipe_get).post(search_recipe_post),
        )
        .route("/my_recipes", get(my_recipes).post(my_recipes))
        .route("/view-recipe/:recipe_id", get(view_recipe))
        .route(
            "/create-recipe",
            get(create_recipe_form).post(create_recipe),
        )
        .route(
            "/edit_recipe/:recipe_id",
            get(edit_recipe_form).post(edit_recipe),
        )
        .route(
            "/delete_recipe/:recipe_id",
            get(delete_recipe).post(delete_recipe),
        )
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Recipes",
    responses(
        (status = 200, description = "Every recipe in insertion order", body = Vec<RecipeResponse>)
    )
)]
pub async fn home(State(state): State<GatewayState>) -> GatewayResult<Json<Vec<RecipeResponse>>> {
    let recipes = state.recipe_service().list_all().await?;
    Ok(Json(recipes.into_iter().map(RecipeResponse::from).collect()))
}

#[utoipa::path(
    get,
    path = "/browse-recipes",
    tag = "Recipes",
    responses(
        (status = 200, description = "Every recipe in insertion order", body = Vec<RecipeResponse>)
    )
)]
pub async fn browse_recipes(
    State(state): State<GatewayState>,
) -> GatewayResult<Json<Vec<RecipeResponse>>> {
    let recipes = state.recipe_service().list_all().await?;
    Ok(Json(recipes.into_iter().map(RecipeResponse::from).collect()))
}

#[utoipa::path(
    get,
    path = "/search_recipe",
    tag = "Recipes",
    params(SearchParams),
    responses(
        (status = 200, description = "Matching recipes", body = Vec<RecipeResponse>),
        (status = 403, description = "my_recipes selected without a session", body = ErrorResponse)
    )
)]
pub async fn search_recipe_get(
    State(state): State<GatewayState>,
    OptionalUser(user): OptionalUser,
    Query(params): Query<SearchParams>,
) -> GatewayResult<Json<Vec<RecipeResponse>>> {
    run_search(&state, user, params).await
}

#[utoipa::path(
    post,
    path = "/search_recipe",
    tag = "Recipes",
    responses(
        (status = 200, description = "Matching recipes", body = Vec<RecipeResponse>),
        (status = 403, description = "my_recipes selected without a session", body = ErrorResponse)
    )
)]
pub async fn search_recipe_post(
    State(state): State<GatewayState>,
    OptionalUser(user): OptionalUser,
    Form(params): Form<SearchParams>,
) -> GatewayResult<Json<Vec<RecipeResponse>>> {
    run_search(&state, user, params).await
}

async fn run_search(
    state: &GatewayState,
    user: Option<crate::middleware::SessionUser>,
    params: SearchParams,
) -> GatewayResult<Json<Vec<RecipeResponse>>> {
    let selector = CategorySelector::parse(params.category_select.as_deref());
    let current_user = user.as_ref().map(|u| u.username.as_str());

    let recipes = state
        .recipe_service()
        .search(&selector, params.ingredient_search.as_deref(), current_user)
        .await?;

    Ok(Json(recipes.into_iter().map(RecipeResponse::from).collect()))
}

#[utoipa::path(
    get,
    path = "/my_recipes",
    tag = "Recipes",
    responses(
        (status = 200, description = "Recipes owned by the caller", body = Vec<RecipeResponse>),
        (status = 403, description = "Not signed in", body = ErrorResponse)
    )
)]
pub async fn my_recipes(
    State(state): State<GatewayState>,
    RequireUser(user): RequireUser,
) -> GatewayResult<Json<Vec<RecipeResponse>>> {
    let recipes = state.recipe_service().list_owned(&user.username).await?;
    Ok(Json(recipes.into_iter().map(RecipeResponse::from).collect()))
}

#[utoipa::path(
    get,
    path = "/view-recipe/{recipe_id}",
    tag = "Recipes",
    params(
        ("recipe_id" = String, Path, description = "Recipe public ID")
    ),
    responses(
        (status = 200, description = "Recipe details", body = RecipeResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    )
)]
pub async fn view_recipe(
    Path(recipe_id): Path<String>,
    State(state): State<GatewayState>,
) -> GatewayResult<Json<RecipeResponse>> {
    let recipe = state.recipe_service().get(&recipe_id).await?;
    Ok(Json(RecipeResponse::from(recipe)))
}

#[utoipa::path(
    get,
    path = "/create-recipe",
    tag = "Recipes",
    responses(
        (status = 200, description = "Context for the create form", body = CreateRecipeContext),
        (status = 403, description = "Not signed in", body = ErrorResponse)
    )
)]
pub async fn create_recipe_form(
    RequireUser(_user): RequireUser,
) -> GatewayResult<Json<CreateRecipeContext>> {
    Ok(Json(CreateRecipeContext {
        categories: FoodCategory::labels(),
    }))
}

#[utoipa::path(
    post,
    path = "/create-recipe",
    tag = "Recipes",
    request_body = RecipePayload,
    responses(
        (status = 201, description = "Recipe created and stamped with its owner", body = RecipeResponse),
        (status = 400, description = "Unknown food category", body = ErrorResponse),
        (status = 403, description = "Not signed in", body = ErrorResponse)
    )
)]
pub async fn create_recipe(
    State(state): State<GatewayState>,
    RequireUser(user): RequireUser,
    Json(payload): Json<RecipePayload>,
) -> GatewayResult<(StatusCode, Json<RecipeResponse>)> {
    let draft = payload.into_draft()?;

    let recipe = state
        .recipe_service()
        .create(&user.username, draft)
        .await?;

    Ok((StatusCode::CREATED, Json(RecipeResponse::from(recipe))))
}

#[utoipa::path(
    get,
    path = "/edit_recipe/{recipe_id}",
    tag = "Recipes",
    params(
        ("recipe_id" = String, Path, description = "Recipe public ID")
    ),
    responses(
        (status = 200, description = "Recipe to pre-fill the edit form", body = RecipeResponse),
        (status = 403, description = "Not signed in or not the owner", body = ErrorResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    )
)]
pub async fn edit_recipe_form(
    Path(recipe_id): Path<String>,
    State(state): State<GatewayState>,
    RequireUser(user): RequireUser,
) -> GatewayResult<Json<RecipeResponse>> {
    let recipe = state
        .recipe_service()
        .get_for_edit(&user.username, &recipe_id)
        .await?;
    Ok(Json(RecipeResponse::from(recipe)))
}

#[utoipa::path(
    post,
    path = "/edit_recipe/{recipe_id}",
    tag = "Recipes",
    params(
        ("recipe_id" = String, Path, description = "Recipe public ID")
    ),
    request_body = RecipePayload,
    responses(
        (status = 200, description = "Recipe replaced and re-stamped", body = RecipeResponse),
        (status = 400, description = "Unknown food category", body = ErrorResponse),
        (status = 403, description = "Not signed in or not the owner", body = ErrorResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    )
)]
pub async fn edit_recipe(
    Path(recipe_id): Path<String>,
    State(state): State<GatewayState>,
    RequireUser(user): RequireUser,
    Json(payload): Json<RecipePayload>,
) -> GatewayResult<Json<RecipeResponse>> {
    let draft = payload.into_draft()?;

    let recipe = state
        .recipe_service()
        .edit(&user.username, &recipe_id, draft)
        .await?;

    Ok(Json(RecipeResponse::from(recipe)))
}

#[utoipa::path(
    get,
    path = "/delete_recipe/{recipe_id}",
    tag = "Recipes",
    params(
        ("recipe_id" = String, Path, description = "Recipe public ID")
    ),
    responses(
        (status = 200, description = "Recipe deleted", body = MessageResponse),
        (status = 403, description = "Not signed in or not the owner", body = ErrorResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    )
)]
pub async fn delete_recipe(
    Path(recipe_id): Path<String>,
    State(state): State<GatewayState>,
    RequireUser(user): RequireUser,
) -> GatewayResult<Json<MessageResponse>> {
    state
        .recipe_service()
        .delete(&user.username, &recipe_id)
        .await?;

    Ok(Json(MessageResponse {
        message: "Recipe deleted".to_string(),
    }))
}
