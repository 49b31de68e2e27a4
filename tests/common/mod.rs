#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use bookstore_app::Application;
use bookstore_kernel::settings::{DatabaseSettings, Settings};

pub struct TestApp {
    pub app: Application,
    router: Router,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub cookie: Option<String>,
    pub body: Value,
}

impl TestApp {
    /// A fully bootstrapped app on a private in-memory database.
    pub async fn spawn() -> Self {
        let mut settings = Settings::default();
        settings.database = DatabaseSettings::in_memory();
        settings.auth.bcrypt_cost = 4;

        let app = Application::bootstrap(settings).await.unwrap();
        let router = app.router();
        Self { app, router }
    }

    pub async fn request(
        &self,
        method: &str,
        uri: &str,
        body: Option<Value>,
        cookie: Option<&str>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();

        let status = response.status();
        let cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|value| value.to_str().ok())
            .and_then(|raw| raw.split(';').next())
            .map(str::to_string);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };

        TestResponse {
            status,
            cookie,
            body,
        }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.request("GET", uri, None, None).await
    }

    /// Register an account and return its session cookie.
    pub async fn register(&self, email: &str, password: &str) -> String {
        let response = self
            .request(
                "POST",
                "/api/auth/register",
                Some(serde_json::json!({ "email": email, "password": password })),
                None,
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
        response.cookie.expect("session cookie on register")
    }
}
