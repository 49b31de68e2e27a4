//! HTTP server facade for the bookstore API: router assembly, error envelope,
//! sessions and graceful shutdown.

use anyhow::Context;
use axum::{routing::get, Router};

use bookstore_kernel::{settings::Settings, ModuleRegistry};

pub mod error;
pub mod openapi;
pub mod router;

pub use error::AppError;
use router::RouterBuilder;

/// Start the HTTP server and serve until a shutdown signal arrives
pub async fn start_server(registry: &ModuleRegistry, settings: &Settings) -> anyhow::Result<()> {
    let address = format!("{}:{}", settings.server.host, settings.server.port);
    tracing::info!("starting HTTP server on {}", address);

    let app = build_router(registry, settings);

    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind to {}", address))?;

    tracing::info!("HTTP server listening on http://{}", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    tracing::info!("HTTP server stopped");
    Ok(())
}

/// Build the main HTTP router with all module routes mounted
pub fn build_router(registry: &ModuleRegistry, settings: &Settings) -> Router {
    let api_prefix = settings.server.api_prefix.as_str();
    let mut router_builder = RouterBuilder::new().route("/healthz", get(health_check));

    for module in registry.modules() {
        let module_name = module.name();
        tracing::info!(
            module = module_name,
            "mounting module routes under {}/{}",
            api_prefix,
            module_name
        );
        router_builder = router_builder.mount_module(api_prefix, module_name, module.routes());
    }

    router_builder
        .with_openapi(registry, api_prefix)
        .with_fallback()
        .with_sessions(&settings.auth)
        .with_panic_handler()
        .with_timeout(settings.server.request_timeout_ms)
        .with_tracing()
        .with_cors()
        .with_request_id()
        .build()
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "ok"
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("shutdown signal received");
}
