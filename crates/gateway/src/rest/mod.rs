//! REST API endpoints for the gateway

pub mod auth;
pub mod recipes;

use crate::state::GatewayState;
use axum::Router;

/// Create all REST API routes
pub fn create_rest_routes() -> Router<GatewayState> {
    Router::new()
        // Authentication routes
        .merge(auth::create_auth_routes())
        // Recipe routes
        .merge(recipes::create_recipe_routes())
}
