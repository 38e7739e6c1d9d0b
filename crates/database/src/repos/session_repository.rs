//! Session repository for database operations.

use crate::entities::AuthSession;
use crate::types::{SessionError, SessionResult};
use chrono::Utc;
use sqlx::{Row, SqlitePool};

/// Repository for session database operations
#[derive(Clone)]
pub struct SessionRepository {
    pool: SqlitePool,
}

impl SessionRepository {
    /// Create a new session repository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Persist a new session row
    pub async fn create(
        &self,
        username: &str,
        token: &str,
        expires_at: &str,
    ) -> SessionResult<AuthSession> {
        let now = Utc::now().to_rfc3339();

        let result = sqlx::query(
            "INSERT INTO sessions (username, token, created_at, expires_at) VALUES (?, ?, ?, ?)",
        )
        .bind(username)
        .bind(token)
        .bind(&now)
        .bind(expires_at)
        .execute(&self.pool)
        .await
        .map_err(|e| SessionError::DatabaseError(e.to_string()))?;

        Ok(AuthSession {
            id: result.last_insert_rowid(),
            username: username.to_string(),
            token: token.to_string(),
            created_at: now,
            expires_at: expires_at.to_string(),
        })
    }

    /// Find a session by its token
    pub async fn find_by_token(&self, token: &str) -> SessionResult<Option<AuthSession>> {
        let row = sqlx::query(
            "SELECT id, username, token, created_at, expires_at FROM sessions WHERE token = ?",
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| SessionError::DatabaseError(e.to_string()))?;

        if let Some(row) = row {
            Ok(Some(AuthSession {
                id: row.get("id"),
                username: row.get("username"),
                token: row.get("token"),
                created_at: row.get("created_at"),
                expires_at: row.get("expires_at"),
            }))
        } else {
            Ok(None)
        }
    }

    /// Delete a session by token; returns whether a row was removed
    pub async fn delete_by_token(&self, token: &str) -> SessionResult<bool> {
        let result = sqlx::query("DELETE FROM sessions WHERE token = ?")
            .bind(token)
            .execute(&self.pool)
            .await
            .map_err(|e| SessionError::DatabaseError(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete every session belonging to a username
    pub async fn delete_for_username(&self, username: &str) -> SessionResult<u64> {
        let result = sqlx::query("DELETE FROM sessions WHERE username = ?")
            .bind(username)
            .execute(&self.pool)
            .await
            .map_err(|e| SessionError::DatabaseError(e.to_string()))?;

        Ok(result.rows_affected())
    }
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

    #[tokio::test]
    async fn test_session_round_trip() {
        let (pool, _temp_dir) = create_test_pool().await;
        let repo = SessionRepository::new(pool);

        let expires = Utc::now().to_rfc3339();
        let created = repo.create("alice", "token-123", &expires).await.unwrap();
        assert_eq!(created.username, "alice");

        let found = repo.find_by_token("token-123").await.unwrap().unwrap();
        assert_eq!(found.username, "alice");
        assert_eq!(found.expires_at, expires);

        assert!(repo.find_by_token("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_by_token() {
        let (pool, _temp_dir) = create_test_pool().await;
        let repo = SessionRepository::new(pool);

        let expires = Utc::now().to_rfc3339();
        repo.create("alice", "token-123", &expires).await.unwrap();

        assert!(repo.delete_by_token("token-123").await.unwrap());
        assert!(!repo.delete_by_token("token-123").await.unwrap());
    }

    #[tokio::test]
    async fn test_delete_for_username_clears_all_sessions() {
        let (pool, _temp_dir) = create_test_pool().await;
        let repo = SessionRepository::new(pool);

        let expires = Utc::now().to_rfc3339();
        repo.create("alice", "token-1", &expires).await.unwrap();
        repo.create("alice", "token-2", &expires).await.unwrap();
        repo.create("bob", "token-3", &expires).await.unwrap();

        assert_eq!(repo.delete_for_username("alice").await.unwrap(), 2);
        assert!(repo.find_by_token("token-1").await.unwrap().is_none());
        assert!(repo.find_by_token("token-3").await.unwrap().is_some());
    }
}
