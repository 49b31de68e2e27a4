//! SQLite pool factory and schema bootstrap.

use std::str::FromStr;
use std::time::Duration;

use anyhow::Context;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

use bookstore_kernel::{settings::DatabaseSettings, TableSchema};

/// Open the process-wide connection pool.
///
/// An in-memory URL is pinned to a single long-lived connection, since every
/// new SQLite memory connection would otherwise see its own empty database.
pub async fn connect(settings: &DatabaseSettings) -> anyhow::Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(&settings.url)
        .with_context(|| format!("invalid database url '{}'", settings.url))?
        .foreign_keys(true);

    let in_memory = settings.url.contains(":memory:") || settings.url.contains("mode=memory");

    let pool_options = if in_memory {
        SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new()
            .max_connections(settings.max_connections.max(1))
            .acquire_timeout(Duration::from_secs(10))
    };

    let pool = pool_options
        .connect_with(options)
        .await
        .with_context(|| format!("failed to open database '{}'", settings.url))?;

    tracing::info!(target: "bookstore-db", url = %settings.url, "database connected");
    Ok(pool)
}

/// Create every table that does not exist yet, strictly in the given order.
///
/// Each statement must be acknowledged before the next one is sent; the first
/// failure aborts the whole bootstrap.
pub async fn bootstrap_schema(
    pool: &SqlitePool,
    tables: &[(String, TableSchema)],
) -> anyhow::Result<()> {
    for (module, schema) in tables {
        sqlx::query(schema.ddl)
            .execute(pool)
            .await
            .with_context(|| {
                format!(
                    "failed to create table '{}' for module '{}'",
                    schema.table, module
                )
            })?;

        tracing::info!(target: "bookstore-db", module = %module, table = schema.table, "table verified");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(table: &'static str, ddl: &'static str) -> (String, TableSchema) {
        ("test".to_string(), TableSchema { table, ddl })
    }

    #[tokio::test]
    async fn bootstrap_is_idempotent() {
        let pool = connect(&DatabaseSettings::in_memory()).await.unwrap();
        let tables = vec![table(
            "things",
            "CREATE TABLE IF NOT EXISTS things (id INTEGER PRIMARY KEY AUTOINCREMENT)",
        )];

        bootstrap_schema(&pool, &tables).await.unwrap();
        bootstrap_schema(&pool, &tables).await.unwrap();

        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'things'")
                .fetch_one(&pool)
                .await
                .unwrap();
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn bootstrap_stops_at_first_failure() {
        let pool = connect(&DatabaseSettings::in_memory()).await.unwrap();
        let tables = vec![
            table("first", "CREATE TABLE IF NOT EXISTS first (id INTEGER PRIMARY KEY)"),
            table("broken", "CREATE TABLE oops ("),
            table("third", "CREATE TABLE IF NOT EXISTS third (id INTEGER PRIMARY KEY)"),
        ];

        let err = bootstrap_schema(&pool, &tables).await.unwrap_err();
        assert!(err.to_string().contains("broken"));

        let names: Vec<(String,)> =
            sqlx::query_as("SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name")
                .fetch_all(&pool)
                .await
                .unwrap();
        let names: Vec<_> = names.into_iter().map(|(name,)| name).collect();
        assert!(names.contains(&"first".to_string()));
        assert!(!names.contains(&"third".to_string()));
    }

    #[tokio::test]
    async fn in_memory_pool_keeps_its_data() {
        let pool = connect(&DatabaseSettings::in_memory()).await.unwrap();
        sqlx::query("CREATE TABLE kept (v TEXT)").execute(&pool).await.unwrap();
        sqlx::query("INSERT INTO kept (v) VALUES ('x')").execute(&pool).await.unwrap();

        let (v,): (String,) = sqlx::query_as("SELECT v FROM kept").fetch_one(&pool).await.unwrap();
        assert_eq!(v, "x");
    }
}
