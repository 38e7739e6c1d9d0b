//! # Tastebook Gateway Crate
//!
//! This crate provides the HTTP layer for Tastebook, routing requests to the
//! authentication and recipe services.
//!
//! ## Architecture
//!
//! - **REST**: the application's HTTP surface, with OpenAPI documentation
//! - **State**: shared application state carrying the services
//! - **Middleware**: session resolution, logging, CORS

pub mod error;
pub mod middleware;
pub mod rest;
pub mod state;
pub mod util;

// Re-export main types for convenience
pub use error::{GatewayError, GatewayResult};
pub use state::GatewayState;

use axum::{http::Method, middleware as axum_middleware, Router};
use tower_http::cors::{Any, CorsLayer};

/// Create the main application router with all routes
pub fn create_router(state: GatewayState) -> Router {
    let router = Router::new()
        // REST routes
        .merge(rest::create_rest_routes())
        // Session resolution
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::session_middleware,
        ))
        // CORS middleware
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::POST])
                .allow_headers(Any),
        )
        // Logging middleware
        .layer(axum_middleware::from_fn(middleware::logging_middleware))
        .with_state(state);

    // Add Swagger UI if in debug mode
    #[cfg(debug_assertions)]
    let router = {
        use utoipa::OpenApi;
        use utoipa_swagger_ui::SwaggerUi;

        #[derive(OpenApi)]
        #[openapi(
            paths(
                rest::auth::register_form,
                rest::auth::register,
                rest::auth::login_form,
                rest::auth::login,
                rest::auth::logout,
                rest::auth::delete_account,
                rest::recipes::home,
                rest::recipes::browse_recipes,
                rest::recipes::search_recipe_get,
                rest::recipes::search_recipe_post,
                rest::recipes::my_recipes,
                rest::recipes::view_recipe,
                rest::recipes::create_recipe_form,
                rest::recipes::create_recipe,
                rest::recipes::edit_recipe_form,
                rest::recipes::edit_recipe,
                rest::recipes::delete_recipe,
            ),
            components(
                schemas(
                    rest::auth::CredentialsPayload,
                    rest::auth::SessionResponse,
                    rest::auth::UserResponse,
                    rest::auth::MessageResponse,
                    rest::auth::ErrorResponse,
                    rest::recipes::RecipeResponse,
                    rest::recipes::RecipePayload,
                    rest::recipes::SearchParams,
                    rest::recipes::CreateRecipeContext,
                    rest::recipes::MessageResponse,
                    rest::recipes::ErrorResponse,
                )
            ),
            tags(
                (name = "Auth", description = "Registration, login and sessions"),
                (name = "Recipes", description = "Recipe collection and search"),
            )
        )]
        struct ApiDoc;

        router.merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
    };

    router
}
