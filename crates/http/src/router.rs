//! Router builder for the bookstore HTTP server
//!
//! Routes must be added before the middleware: `Router::layer` only wraps the
//! routes that already exist when it is called.

use axum::{extract::Request, http::HeaderValue, routing::get, Router};
use std::time::Duration;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any, CorsLayer},
    request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};
use uuid::Uuid;

use bookstore_kernel::{settings::AuthSettings, ModuleRegistry};

use crate::error::{panic_response, route_not_found};
use crate::openapi;

/// Builder for constructing the main HTTP router
pub struct RouterBuilder {
    router: Router,
}

impl RouterBuilder {
    /// Create a new router builder
    pub fn new() -> Self {
        Self {
            router: Router::new(),
        }
    }

    /// Add a route to the router
    pub fn route(mut self, path: &str, route: axum::routing::MethodRouter) -> Self {
        self.router = self.router.route(path, route);
        self
    }

    /// Mount a module's router under `{api_prefix}/{module_name}`
    pub fn mount_module(
        mut self,
        api_prefix: &str,
        module_name: &str,
        module_router: Router,
    ) -> Self {
        let api_path = format!("{}/{}", api_prefix.trim_end_matches('/'), module_name);
        self.router = self.router.nest(&api_path, module_router);
        self
    }

    /// Answer unmatched routes, and known paths hit with an unsupported
    /// method, with the JSON not-found body. Must run after every route is added.
    pub fn with_fallback(mut self) -> Self {
        self.router = self
            .router
            .method_not_allowed_fallback(route_not_found)
            .fallback(route_not_found);
        self
    }

    /// Serve the merged OpenAPI document at `/docs/openapi.json`
    pub fn with_openapi(mut self, registry: &ModuleRegistry, api_prefix: &str) -> Self {
        let document = openapi::merged_document(registry, api_prefix);
        self.router = self.router.route(
            "/docs/openapi.json",
            get(move || async move { axum::Json(document) }),
        );
        self
    }

    /// Add the cookie-backed session layer with an in-memory store
    pub fn with_sessions(mut self, settings: &AuthSettings) -> Self {
        let layer = SessionManagerLayer::new(MemoryStore::default())
            .with_name(settings.cookie_name.clone())
            .with_secure(settings.cookie_secure)
            .with_http_only(true)
            .with_expiry(Expiry::OnInactivity(time::Duration::seconds(
                settings.session_ttl_secs,
            )));
        self.router = self.router.layer(layer);
        self
    }

    /// Turn handler panics into the standard 500 body
    pub fn with_panic_handler(mut self) -> Self {
        self.router = self.router.layer(CatchPanicLayer::custom(panic_response));
        self
    }

    /// Add tracing middleware
    pub fn with_tracing(mut self) -> Self {
        self.router = self.router.layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().include_headers(false))
                .on_request(DefaultOnRequest::new().level(tracing::Level::INFO))
                .on_response(DefaultOnResponse::new().level(tracing::Level::INFO)),
        );
        self
    }

    /// Add CORS middleware
    pub fn with_cors(mut self) -> Self {
        self.router = self.router.layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );
        self
    }

    /// Add request ID middleware; the id is echoed back on the response
    pub fn with_request_id(mut self) -> Self {
        self.router = self
            .router
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7));
        self
    }

    /// Add timeout middleware
    pub fn with_timeout(mut self, timeout_ms: u64) -> Self {
        self.router = self
            .router
            .layer(TimeoutLayer::new(Duration::from_millis(timeout_ms)));
        self
    }

    /// Build the final router
    pub fn build(self) -> Router {
        self.router
    }
}

impl Default for RouterBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Request ID generator for tracing
#[derive(Clone, Copy)]
struct MakeRequestUuidV7;

impl MakeRequestId for MakeRequestUuidV7 {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        let request_id = Uuid::now_v7()
            .to_string()
            .parse::<HeaderValue>()
            .ok()?;
        Some(RequestId::new(request_id))
    }
}
