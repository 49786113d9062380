//! # User Repository
//!
//! Database operations for user accounts.
//!
//! This repository stores and looks up records; everything password-related
//! (hashing, verification, the uniqueness-then-insert flow) lives in
//! [`crate::auth`], which is built on top of it.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use carlog_core::User;

/// Repository for user account database operations.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

const USER_COLUMNS: &str = "id, email, password_hash";

impl UserRepository {
    /// Creates a new UserRepository.
    pub fn new(pool: SqlitePool) -> Self {
        UserRepository { pool }
    }

    /// Inserts a new user.
    ///
    /// ## Returns
    /// * `Err(DbError::UniqueViolation)` - email (or id) already exists
    pub async fn add(&self, user: &User) -> DbResult<()> {
        debug!(id = %user.id, email = %user.email, "Inserting user");

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO users (id, email, password_hash)
            VALUES (?1, ?2, ?3)
            "#,
        )
        .bind(&user.id)
        .bind(&user.email)
        .bind(&user.password_hash)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(())
    }

    /// Deletes a user by id; no-op when absent.
    ///
    /// The user's cars are NOT touched: cars.user_id carries no FK (the
    /// flagged schema gap), so orphaned cars simply stop appearing in any
    /// list_for_user result.
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting user");

        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM users WHERE id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }

    /// Gets a user by id.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Gets a user by email (the login identifier).
    pub async fn find_by_email(&self, email: &str) -> DbResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = ?1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Counts users (for diagnostics and the seed tool).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    fn sample_user(id: &str, email: &str) -> User {
        User {
            id: id.to_string(),
            email: email.to_string(),
            password_hash: "$argon2id$fake$hash".to_string(),
        }
    }

    #[tokio::test]
    async fn test_add_then_find_by_email() {
        let db = test_db().await;
        let user = sample_user("u1", "ana@example.com");

        db.users().add(&user).await.unwrap();

        let loaded = db
            .users()
            .find_by_email("ana@example.com")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(loaded, user);

        assert!(db
            .users()
            .find_by_email("luis@example.com")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_duplicate_email_is_unique_violation() {
        let db = test_db().await;

        db.users().add(&sample_user("u1", "ana@example.com")).await.unwrap();
        let err = db
            .users()
            .add(&sample_user("u2", "ana@example.com"))
            .await
            .unwrap_err();

        assert!(err.is_unique_violation());
        assert_eq!(db.users().count().await.unwrap(), 1);
    }
}
