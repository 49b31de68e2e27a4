use sqlx::SqlitePool;

use super::models::{User, UserCredentials};

#[derive(Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<UserCredentials>, sqlx::Error> {
        sqlx::query_as::<_, UserCredentials>(
            "SELECT id, email, password_hash FROM users WHERE email = ?",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>("SELECT id, email FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    /// Insert a new account. A duplicate email surfaces as the driver's
    /// unique-violation error.
    pub async fn create(&self, email: &str, password_hash: &str) -> Result<User, sqlx::Error> {
        let result = sqlx::query("INSERT INTO users (email, password_hash) VALUES (?, ?)")
            .bind(email)
            .bind(password_hash)
            .execute(&self.pool)
            .await?;

        self.find_by_id(result.last_insert_rowid())
            .await?
            .ok_or(sqlx::Error::RowNotFound)
    }
}
