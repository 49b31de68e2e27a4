pub mod models;
pub mod repository;
pub mod routes;

use async_trait::async_trait;
use bookstore_kernel::{InitCtx, Module, TableSchema};
use axum::Router;
use serde_json::json;
use sqlx::SqlitePool;

use repository::AuthorRepository;

pub(crate) const AUTHORS_TABLE: TableSchema = TableSchema {
    table: "authors",
    ddl: r#"
        CREATE TABLE IF NOT EXISTS authors (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            name        TEXT NOT NULL,
            biography   TEXT,
            nationality TEXT
        )
    "#,
};

/// Authors module. Independent of books: there is no foreign key between them.
pub struct AuthorsModule {
    repository: AuthorRepository,
}

impl AuthorsModule {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            repository: AuthorRepository::new(pool),
        }
    }
}

#[async_trait]
impl Module for AuthorsModule {
    fn name(&self) -> &'static str {
        "authors"
    }

    async fn init(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "authors module initialized");
        Ok(())
    }

    fn routes(&self) -> Router {
        routes::router(self.repository.clone())
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        Some(json!({
            "paths": {
                "/": {
                    "get": {
                        "summary": "List authors",
                        "tags": ["Authors"],
                        "responses": { "200": { "description": "List of authors" } }
                    },
                    "post": {
                        "summary": "Create an author (login required)",
                        "tags": ["Authors"],
                        "responses": {
                            "201": { "description": "Created author" },
                            "400": { "description": "Missing name" },
                            "401": { "description": "Not logged in" }
                        }
                    }
                },
                "/{id}": {
                    "get": {
                        "summary": "Get an author",
                        "tags": ["Authors"],
                        "responses": {
                            "200": { "description": "The author" },
                            "404": { "description": "Author not found" }
                        }
                    },
                    "put": {
                        "summary": "Replace an author (login required)",
                        "tags": ["Authors"],
                        "responses": {
                            "200": { "description": "Updated author" },
                            "400": { "description": "Missing name" },
                            "401": { "description": "Not logged in" },
                            "404": { "description": "Author not found" }
                        }
                    },
                    "delete": {
                        "summary": "Delete an author (login required)",
                        "tags": ["Authors"],
                        "responses": {
                            "200": { "description": "Deleted" },
                            "401": { "description": "Not logged in" },
                            "404": { "description": "Author not found" }
                        }
                    }
                }
            },
            "components": {
                "schemas": {
                    "Author": {
                        "type": "object",
                        "properties": {
                            "id": { "type": "integer" },
                            "name": { "type": "string" },
                            "biography": { "type": "string", "nullable": true },
                            "nationality": { "type": "string", "nullable": true }
                        },
                        "required": ["id", "name"]
                    }
                }
            }
        }))
    }

    fn schema(&self) -> Vec<TableSchema> {
        vec![AUTHORS_TABLE]
    }
}

/// Create a new instance of the authors module
pub fn create_module(pool: SqlitePool) -> std::sync::Arc<dyn Module> {
    std::sync::Arc::new(AuthorsModule::new(pool))
}
