pub mod models;
pub mod password;
pub mod repository;
pub mod routes;

use async_trait::async_trait;
use axum::Router;
use bookstore_kernel::{settings::AuthSettings, InitCtx, Module, TableSchema};
use serde_json::json;
use sqlx::SqlitePool;

use repository::UserRepository;

pub(crate) const USERS_TABLE: TableSchema = TableSchema {
    table: "users",
    ddl: r#"
        CREATE TABLE IF NOT EXISTS users (
            id            INTEGER PRIMARY KEY AUTOINCREMENT,
            email         TEXT NOT NULL UNIQUE,
            password_hash TEXT NOT NULL
        )
    "#,
};

/// Shared handler state for the auth routes.
#[derive(Clone)]
pub struct AuthState {
    pub users: UserRepository,
    pub bcrypt_cost: u32,
    pub session_ttl: time::Duration,
}

/// Accounts and the login session lifecycle
pub struct AuthModule {
    state: AuthState,
}

impl AuthModule {
    pub fn new(pool: SqlitePool, settings: &AuthSettings) -> Self {
        Self {
            state: AuthState {
                users: UserRepository::new(pool),
                bcrypt_cost: settings.bcrypt_cost,
                session_ttl: time::Duration::seconds(settings.session_ttl_secs),
            },
        }
    }
}

#[async_trait]
impl Module for AuthModule {
    fn name(&self) -> &'static str {
        "auth"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            bcrypt_cost = self.state.bcrypt_cost,
            session_ttl_secs = ctx.settings.auth.session_ttl_secs,
            "auth module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        routes::router(self.state.clone())
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        let credentials = json!({
            "required": true,
            "content": {
                "application/json": {
                    "schema": { "$ref": "#/components/schemas/Credentials" }
                }
            }
        });

        Some(json!({
            "paths": {
                "/register": {
                    "post": {
                        "summary": "Register and log in",
                        "tags": ["Auth"],
                        "requestBody": credentials,
                        "responses": {
                            "201": { "description": "Registered; session cookie set" },
                            "400": { "description": "Missing email or password" },
                            "409": { "description": "Email already registered" }
                        }
                    }
                },
                "/login": {
                    "post": {
                        "summary": "Log in",
                        "tags": ["Auth"],
                        "requestBody": credentials,
                        "responses": {
                            "200": { "description": "Logged in; session cookie set" },
                            "400": { "description": "Missing email or password" },
                            "401": { "description": "Invalid email or password" }
                        }
                    }
                },
                "/logout": {
                    "post": {
                        "summary": "Log out (login required)",
                        "tags": ["Auth"],
                        "responses": {
                            "200": { "description": "Session destroyed" },
                            "401": { "description": "Not logged in" }
                        }
                    }
                },
                "/check": {
                    "get": {
                        "summary": "Report whether the caller is logged in",
                        "tags": ["Auth"],
                        "responses": { "200": { "description": "{ loggedIn, userId? }" } }
                    }
                }
            },
            "components": {
                "schemas": {
                    "Credentials": {
                        "type": "object",
                        "properties": {
                            "email": { "type": "string" },
                            "password": { "type": "string" }
                        },
                        "required": ["email", "password"]
                    }
                }
            }
        }))
    }

    fn schema(&self) -> Vec<TableSchema> {
        vec![USERS_TABLE]
    }
}

pub fn create_module(pool: SqlitePool, settings: &AuthSettings) -> std::sync::Arc<dyn Module> {
    std::sync::Arc::new(AuthModule::new(pool, settings))
}
