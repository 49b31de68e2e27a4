//! Bookstore application library
//!
//! Wires the catalog and auth modules onto the kernel, owns the startup
//! sequence and exposes the assembled router for the binaries and tests.

pub mod modules;
pub mod utils;

use anyhow::Context;
use axum::Router;
use sqlx::SqlitePool;

use bookstore_kernel::{settings::Settings, InitCtx, ModuleRegistry};

/// A fully bootstrapped application: store open, tables present, modules
/// started.
pub struct Application {
    settings: Settings,
    pool: SqlitePool,
    registry: ModuleRegistry,
}

impl Application {
    /// Open the store, register and initialize modules, create tables, then
    /// start modules. Any failure aborts startup.
    pub async fn bootstrap(settings: Settings) -> anyhow::Result<Self> {
        let pool = bookstore_db::connect(&settings.database).await?;

        let mut registry = ModuleRegistry::new();
        modules::register_all(&mut registry, &pool, &settings);

        let ctx = InitCtx {
            settings: &settings,
            db: &pool,
        };
        registry.init_modules(&ctx).await?;

        bookstore_db::bootstrap_schema(&pool, &registry.collect_schema())
            .await
            .context("schema bootstrap failed")?;

        registry.start_modules(&ctx).await?;

        tracing::info!(
            env = ?settings.environment,
            modules = registry.module_count(),
            "bookstore bootstrap complete"
        );

        Ok(Self {
            settings,
            pool,
            registry,
        })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub fn registry(&self) -> &ModuleRegistry {
        &self.registry
    }

    /// The full HTTP surface, layers included.
    pub fn router(&self) -> Router {
        bookstore_http::build_router(&self.registry, &self.settings)
    }

    /// Serve until a shutdown signal, then stop modules and close the store.
    pub async fn serve(self) -> anyhow::Result<()> {
        let served = bookstore_http::start_server(&self.registry, &self.settings).await;
        self.shutdown().await?;
        served
    }

    pub async fn shutdown(self) -> anyhow::Result<()> {
        self.registry.stop_modules().await?;
        self.pool.close().await;
        tracing::info!("bookstore stopped");
        Ok(())
    }
}

/// Bootstrap and serve.
pub async fn run(settings: Settings) -> anyhow::Result<()> {
    Application::bootstrap(settings).await?.serve().await
}

/// Create the tables and exit.
pub async fn init_database(settings: &Settings) -> anyhow::Result<()> {
    let pool = bookstore_db::connect(&settings.database).await?;

    let mut registry = ModuleRegistry::new();
    modules::register_all(&mut registry, &pool, settings);
    bookstore_db::bootstrap_schema(&pool, &registry.collect_schema())
        .await
        .context("schema bootstrap failed")?;

    pool.close().await;
    Ok(())
}

/// The merged OpenAPI document. No database connection is opened.
pub fn openapi_document(settings: &Settings) -> anyhow::Result<serde_json::Value> {
    let pool = SqlitePool::connect_lazy(&settings.database.url)
        .with_context(|| format!("invalid database url '{}'", settings.database.url))?;

    let mut registry = ModuleRegistry::new();
    modules::register_all(&mut registry, &pool, settings);

    Ok(bookstore_http::openapi::merged_document(
        &registry,
        &settings.server.api_prefix,
    ))
}
