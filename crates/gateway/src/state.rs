//! Shared application state for the gateway

use std::sync::Arc;

use sqlx::SqlitePool;
use tastebook_auth::Authenticator;
use tastebook_config::{AuthConfig, DatabaseConfig};
use tastebook_database::RecipeRepository;
use tastebook_recipes::RecipeService;

use crate::error::{GatewayError, GatewayResult};

/// Shared application state containing all services
#[derive(Clone)]
pub struct GatewayState {
    /// Database connection pool
    pub pool: SqlitePool,
    /// Authentication and session handling
    pub authenticator: Authenticator,
    /// Recipe collection service
    pub recipe_service: Arc<RecipeService<RecipeRepository>>,
}

impl GatewayState {
    /// Create a new gateway state with all services initialized
    pub fn new(pool: SqlitePool, auth_config: AuthConfig) -> Self {
        let authenticator = Authenticator::new(pool.clone(), auth_config);
        let recipe_service = Arc::new(RecipeService::new(pool.clone()));

        Self {
            pool,
            authenticator,
            recipe_service,
        }
    }

    /// Create gateway state from database configuration
    pub async fn from_config(
        database: &DatabaseConfig,
        auth_config: AuthConfig,
    ) -> GatewayResult<Self> {
        let pool = tastebook_database::initialize_database(database)
            .await
            .map_err(|e| {
                GatewayError::DatabaseError(format!("Failed to initialize database: {}", e))
            })?;

        Ok(Self::new(pool, auth_config))
    }

    /// Get an authenticator reference
    pub fn authenticator(&self) -> &Authenticator {
        &self.authenticator
    }

    /// Get a recipe service reference
    pub fn recipe_service(&self) -> &RecipeService<RecipeRepository> {
        &self.recipe_service
    }
}
