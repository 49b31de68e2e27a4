mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::TestApp;

#[tokio::test]
async fn author_lifecycle_with_session() {
    let app = TestApp::spawn().await;
    let cookie = app.register("editor@example.com", "s3cret").await;

    let created = app
        .request(
            "POST",
            "/api/authors",
            Some(json!({ "nome": "Cecilia Meireles", "nacionalidade": "Brasileira" })),
            Some(&cookie),
        )
        .await;
    assert_eq!(created.status, StatusCode::CREATED);
    let id = created.body["id"].as_i64().unwrap();
    assert_eq!(created.body["name"], "Cecilia Meireles");
    assert_eq!(created.body["biography"], json!(null));
    assert_eq!(created.body["nationality"], "Brasileira");

    let listed = app.get("/api/authors").await;
    assert_eq!(listed.body.as_array().unwrap().len(), 1);

    let updated = app
        .request(
            "PUT",
            &format!("/api/authors/{id}"),
            Some(json!({ "name": "Cecilia", "biography": "Poet" })),
            Some(&cookie),
        )
        .await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.body["biography"], "Poet");
    assert_eq!(updated.body["nationality"], json!(null));

    let fetched = app.get(&format!("/api/authors/{id}")).await;
    assert_eq!(fetched.body, updated.body);

    let deleted = app
        .request("DELETE", &format!("/api/authors/{id}"), None, Some(&cookie))
        .await;
    assert_eq!(deleted.status, StatusCode::OK);

    let gone = app.get(&format!("/api/authors/{id}")).await;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn name_is_required() {
    let app = TestApp::spawn().await;
    let cookie = app.register("editor@example.com", "s3cret").await;

    let response = app
        .request(
            "POST",
            "/api/authors",
            Some(json!({ "biography": "No name given" })),
            Some(&cookie),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.body["error"]["details"].to_string().contains("name"));
}

#[tokio::test]
async fn writes_require_a_session_and_missing_ids_are_not_found() {
    let app = TestApp::spawn().await;

    let response = app
        .request("POST", "/api/authors", Some(json!({ "name": "Anon" })), None)
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(app.get("/api/authors").await.body, json!([]));

    let cookie = app.register("editor@example.com", "s3cret").await;
    let response = app
        .request(
            "PUT",
            "/api/authors/42",
            Some(json!({ "name": "Nobody" })),
            Some(&cookie),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    let response = app
        .request("DELETE", "/api/authors/42", None, Some(&cookie))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn deleting_an_author_leaves_books_alone() {
    let app = TestApp::spawn().await;
    let cookie = app.register("editor@example.com", "s3cret").await;

    let author = app
        .request(
            "POST",
            "/api/authors",
            Some(json!({ "name": "Jorge Amado" })),
            Some(&cookie),
        )
        .await;
    app.request(
        "POST",
        "/api/books",
        Some(json!({
            "title": "Capitaes da Areia",
            "author": "Jorge Amado",
            "category": "Romance",
            "year": 1937
        })),
        Some(&cookie),
    )
    .await;

    let id = author.body["id"].as_i64().unwrap();
    let deleted = app
        .request("DELETE", &format!("/api/authors/{id}"), None, Some(&cookie))
        .await;
    assert_eq!(deleted.status, StatusCode::OK);

    let books = app.get("/api/books").await;
    assert_eq!(books.body.as_array().unwrap().len(), 1);
    assert_eq!(books.body[0]["author"], "Jorge Amado");
}
