use async_trait::async_trait;
use axum::Router;
use sqlx::SqlitePool;

/// Context provided to modules during initialization
pub struct InitCtx<'a> {
    pub settings: &'a crate::settings::Settings,
    pub db: &'a SqlitePool,
}

/// Table definition contributed by a module.
///
/// `ddl` must be idempotent (`CREATE TABLE IF NOT EXISTS ...`); there is no
/// migration history, the statement simply runs on every start.
#[derive(Debug, Clone)]
pub struct TableSchema {
    pub table: &'static str,
    pub ddl: &'static str,
}

/// Core module trait that all bookstore modules must implement
#[async_trait]
pub trait Module: Sync + Send {
    /// Unique name for this module
    fn name(&self) -> &'static str;

    /// Initialize the module with the provided context
    /// Called during application startup before the schema bootstrap
    async fn init(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        Ok(())
    }

    /// Return the Axum router for this module's routes, state already applied.
    /// Routes will be mounted under `{api_prefix}/{module_name}`
    fn routes(&self) -> Router {
        Router::new()
    }

    /// Return an OpenAPI fragment (`paths`, `components`) for this module as JSON
    /// Will be merged with the other modules into one document
    fn openapi(&self) -> Option<serde_json::Value> {
        None
    }

    /// Tables owned by this module, created in the order returned
    fn schema(&self) -> Vec<TableSchema> {
        vec![]
    }

    /// Called after the schema bootstrap, before the listener is bound
    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        Ok(())
    }

    /// Stop the module and clean up resources
    /// Called during application shutdown
    async fn stop(&self) -> anyhow::Result<()> {
        Ok(())
    }
}
