pub mod auth;
pub mod authors;
pub mod books;

use bookstore_kernel::{settings::Settings, ModuleRegistry};
use sqlx::SqlitePool;

/// Register every bookstore module. Order matters: it is the order tables are
/// created in and the order modules are started.
pub fn register_all(registry: &mut ModuleRegistry, pool: &SqlitePool, settings: &Settings) {
    registry.register(books::create_module(pool.clone()));
    registry.register(authors::create_module(pool.clone()));
    registry.register(auth::create_module(pool.clone(), &settings.auth));
}
