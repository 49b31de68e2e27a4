mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::TestApp;

fn credentials(email: &str, password: &str) -> Option<serde_json::Value> {
    Some(json!({ "email": email, "password": password }))
}

#[tokio::test]
async fn register_returns_user_summary_and_logs_in() {
    let app = TestApp::spawn().await;

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            credentials("ana@example.com", "s3cret"),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["user"]["email"], "ana@example.com");
    assert!(response.body["user"]["id"].is_i64());
    assert!(response.body["user"].get("password_hash").is_none());
    assert!(response.body["message"].is_string());

    let cookie = response.cookie.unwrap();
    assert!(cookie.starts_with("bookstore.sid="));

    let check = app
        .request("GET", "/api/auth/check", None, Some(&cookie))
        .await;
    assert_eq!(check.status, StatusCode::OK);
    assert_eq!(check.body["loggedIn"], true);
    assert_eq!(check.body["userId"], response.body["user"]["id"]);
}

#[tokio::test]
async fn duplicate_registration_conflicts() {
    let app = TestApp::spawn().await;

    let first = app
        .request(
            "POST",
            "/api/auth/register",
            credentials("ana@example.com", "s3cret"),
            None,
        )
        .await;
    assert_eq!(first.status, StatusCode::CREATED);

    let second = app
        .request(
            "POST",
            "/api/auth/register",
            credentials("ana@example.com", "other"),
            None,
        )
        .await;
    assert_eq!(second.status, StatusCode::CONFLICT);
    assert_eq!(second.body["error"]["code"], "conflict");
}

#[tokio::test]
async fn missing_credentials_are_bad_requests() {
    let app = TestApp::spawn().await;

    for path in ["/api/auth/register", "/api/auth/login"] {
        let response = app
            .request("POST", path, Some(json!({ "email": "ana@example.com" })), None)
            .await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST, "{path}");
    }
}

#[tokio::test]
async fn login_failures_share_one_message() {
    let app = TestApp::spawn().await;
    app.register("ana@example.com", "s3cret").await;

    let wrong_password = app
        .request(
            "POST",
            "/api/auth/login",
            credentials("ana@example.com", "nope"),
            None,
        )
        .await;
    assert_eq!(wrong_password.status, StatusCode::UNAUTHORIZED);

    let unknown_email = app
        .request(
            "POST",
            "/api/auth/login",
            credentials("who@example.com", "s3cret"),
            None,
        )
        .await;
    assert_eq!(unknown_email.status, StatusCode::UNAUTHORIZED);

    assert_eq!(
        wrong_password.body["error"]["message"],
        unknown_email.body["error"]["message"]
    );
}

#[tokio::test]
async fn login_then_logout_ends_the_session() {
    let app = TestApp::spawn().await;
    app.register("ana@example.com", "s3cret").await;

    let login = app
        .request(
            "POST",
            "/api/auth/login",
            credentials("ana@example.com", "s3cret"),
            None,
        )
        .await;
    assert_eq!(login.status, StatusCode::OK);
    assert_eq!(login.body["user"]["email"], "ana@example.com");
    let cookie = login.cookie.unwrap();

    let write = app
        .request(
            "POST",
            "/api/authors",
            Some(json!({ "name": "Rachel de Queiroz" })),
            Some(&cookie),
        )
        .await;
    assert_eq!(write.status, StatusCode::CREATED);

    let logout = app
        .request("POST", "/api/auth/logout", None, Some(&cookie))
        .await;
    assert_eq!(logout.status, StatusCode::OK);
    assert!(logout.body["message"].is_string());

    let check = app
        .request("GET", "/api/auth/check", None, Some(&cookie))
        .await;
    assert_eq!(check.body, json!({ "loggedIn": false }));

    let write = app
        .request(
            "POST",
            "/api/authors",
            Some(json!({ "name": "Too Late" })),
            Some(&cookie),
        )
        .await;
    assert_eq!(write.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn logout_and_check_without_a_session() {
    let app = TestApp::spawn().await;

    let logout = app.request("POST", "/api/auth/logout", None, None).await;
    assert_eq!(logout.status, StatusCode::UNAUTHORIZED);

    let check = app.get("/api/auth/check").await;
    assert_eq!(check.status, StatusCode::OK);
    assert_eq!(check.body, json!({ "loggedIn": false }));
    assert!(check.cookie.is_none());
}
