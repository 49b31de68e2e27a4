pub mod models;
pub mod repository;
pub mod routes;

use async_trait::async_trait;
use bookstore_kernel::{InitCtx, Module, TableSchema};
use axum::Router;
use serde_json::json;
use sqlx::SqlitePool;

use repository::BookRepository;

pub(crate) const BOOKS_TABLE: TableSchema = TableSchema {
    table: "books",
    ddl: r#"
        CREATE TABLE IF NOT EXISTS books (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            title     TEXT    NOT NULL,
            author    TEXT    NOT NULL,
            category  TEXT    NOT NULL,
            year      INTEGER NOT NULL,
            publisher TEXT,
            pages     INTEGER CHECK (pages > 0)
        )
    "#,
};

/// Books module: the catalog itself
pub struct BooksModule {
    repository: BookRepository,
}

impl BooksModule {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            repository: BookRepository::new(pool),
        }
    }
}

#[async_trait]
impl Module for BooksModule {
    fn name(&self) -> &'static str {
        "books"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            "books module initialized"
        );
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
                        "summary": "List books, optionally filtered by category substring",
                        "tags": ["Books"],
                        "parameters": [{
                            "name": "category",
                            "in": "query",
                            "required": false,
                            "schema": { "type": "string" }
                        }],
                        "responses": {
                            "200": {
                                "description": "List of books",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "type": "array",
                                            "items": { "$ref": "#/components/schemas/Book" }
                                        }
                                    }
                                }
                            }
                        }
                    },
                    "post": {
                        "summary": "Create a book (login required)",
                        "tags": ["Books"],
                        "requestBody": {
                            "content": {
                                "application/json": {
                                    "schema": { "$ref": "#/components/schemas/BookInput" }
                                }
                            }
                        },
                        "responses": {
                            "201": { "description": "Created book" },
                            "400": { "description": "Missing required fields" },
                            "401": { "description": "Not logged in" }
                        }
                    }
                },
                "/{id}": {
                    "get": {
                        "summary": "Get a book",
                        "tags": ["Books"],
                        "responses": {
                            "200": { "description": "The book" },
                            "404": { "description": "Book not found" }
                        }
                    },
                    "put": {
                        "summary": "Replace a book (login required)",
                        "tags": ["Books"],
                        "responses": {
                            "200": { "description": "Updated book" },
                            "400": { "description": "Missing required fields" },
                            "401": { "description": "Not logged in" },
                            "404": { "description": "Book not found" }
                        }
                    },
                    "delete": {
                        "summary": "Delete a book (login required)",
                        "tags": ["Books"],
                        "responses": {
                            "200": { "description": "Deleted" },
                            "401": { "description": "Not logged in" },
                            "404": { "description": "Book not found" }
                        }
                    }
                }
            },
            "components": {
                "schemas": {
                    "Book": {
                        "type": "object",
                        "properties": {
                            "id": { "type": "integer" },
                            "title": { "type": "string" },
                            "author": { "type": "string" },
                            "category": { "type": "string" },
                            "year": { "type": "integer" },
                            "publisher": { "type": "string", "nullable": true },
                            "pages": { "type": "integer", "minimum": 1, "nullable": true }
                        },
                        "required": ["id", "title", "author", "category", "year"]
                    },
                    "BookInput": {
                        "type": "object",
                        "properties": {
                            "title": { "type": "string" },
                            "author": { "type": "string" },
                            "category": { "type": "string" },
                            "year": { "type": "integer" },
                            "publisher": { "type": "string" },
                            "pages": { "type": "integer", "minimum": 1 }
                        },
                        "required": ["title", "author", "category", "year"]
                    }
                }
            }
        }))
    }

    fn schema(&self) -> Vec<TableSchema> {
        vec![BOOKS_TABLE]
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "books module stopped");
        Ok(())
    }
}

/// Create a new instance of the books module
pub fn create_module(pool: SqlitePool) -> std::sync::Arc<dyn Module> {
    std::sync::Arc::new(BooksModule::new(pool))
}
