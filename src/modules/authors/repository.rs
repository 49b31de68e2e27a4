use sqlx::SqlitePool;

use super::models::{Author, NewAuthor};

/// SQL access for the `authors` table.
#[derive(Clone)]
pub struct AuthorRepository {
    pool: SqlitePool,
}

impl AuthorRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn find_all(&self) -> Result<Vec<Author>, sqlx::Error> {
        sqlx::query_as::<_, Author>(
            "SELECT id, name, biography, nationality FROM authors ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Author>, sqlx::Error> {
        sqlx::query_as::<_, Author>(
            "SELECT id, name, biography, nationality FROM authors WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    pub async fn create(&self, author: &NewAuthor) -> Result<Author, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO authors (name, biography, nationality) VALUES (?, ?, ?)",
        )
        .bind(&author.name)
        .bind(&author.biography)
        .bind(&author.nationality)
        .execute(&self.pool)
        .await?;

        self.find_by_id(result.last_insert_rowid())
            .await?
            .ok_or(sqlx::Error::RowNotFound)
    }

    pub async fn update(&self, id: i64, author: &NewAuthor) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE authors SET name = ?, biography = ?, nationality = ? WHERE id = ?",
        )
        .bind(&author.name)
        .bind(&author.biography)
        .bind(&author.nationality)
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    /// Books that mention this author by name are left untouched.
    pub async fn delete(&self, id: i64) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM authors WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
