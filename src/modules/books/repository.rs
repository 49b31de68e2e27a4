use sqlx::SqlitePool;

use super::models::{Book, NewBook};

/// SQL access for the `books` table.
#[derive(Clone)]
pub struct BookRepository {
    pool: SqlitePool,
}

impl BookRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn find_all(&self) -> Result<Vec<Book>, sqlx::Error> {
        sqlx::query_as::<_, Book>(
            "SELECT id, title, author, category, year, publisher, pages FROM books ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Book>, sqlx::Error> {
        sqlx::query_as::<_, Book>(
            "SELECT id, title, author, category, year, publisher, pages FROM books WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    /// Case-sensitive literal substring match on the category.
    pub async fn find_by_category(&self, fragment: &str) -> Result<Vec<Book>, sqlx::Error> {
        sqlx::query_as::<_, Book>(
            r#"
            SELECT id, title, author, category, year, publisher, pages
            FROM books
            WHERE instr(category, ?) > 0
            ORDER BY id
            "#,
        )
        .bind(fragment)
        .fetch_all(&self.pool)
        .await
    }

    /// Insert and return the stored row as read back from the table.
    pub async fn create(&self, book: &NewBook) -> Result<Book, sqlx::Error> {
        let result = sqlx::query(
            r#"
            INSERT INTO books (title, author, category, year, publisher, pages)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&book.title)
        .bind(&book.author)
        .bind(&book.category)
        .bind(book.year)
        .bind(&book.publisher)
        .bind(book.pages)
        .execute(&self.pool)
        .await?;

        // Not atomic with the insert: a concurrent delete surfaces as RowNotFound.
        self.find_by_id(result.last_insert_rowid())
            .await?
            .ok_or(sqlx::Error::RowNotFound)
    }

    /// Replace every mutable field. Returns the number of rows changed.
    pub async fn update(&self, id: i64, book: &NewBook) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE books
            SET title = ?, author = ?, category = ?, year = ?, publisher = ?, pages = ?
            WHERE id = ?
            "#,
        )
        .bind(&book.title)
        .bind(&book.author)
        .bind(&book.category)
        .bind(book.year)
        .bind(&book.publisher)
        .bind(book.pages)
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    pub async fn delete(&self, id: i64) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM books WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
