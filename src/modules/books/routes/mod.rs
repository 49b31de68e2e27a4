use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    middleware,
    routing::{get, post, put},
    Extension, Json, Router,
};

use bookstore_authz::{require_session, CurrentUser};
use bookstore_http::AppError;

use super::models::{Book, BookPayload, BookQuery};
use super::repository::BookRepository;
use crate::utils::{record_id, Message};

/// Reads are public; writes sit behind the session gate.
pub fn router(repository: BookRepository) -> Router {
    let public = Router::new()
        .route("/", get(list_books))
        .route("/{id}", get(get_book));

    let protected = Router::new()
        .route("/", post(create_book))
        .route("/{id}", put(update_book).delete(delete_book))
        .route_layer(middleware::from_fn(require_session));

    public.merge(protected).with_state(repository)
}

async fn list_books(
    State(repository): State<BookRepository>,
    query: Result<Query<BookQuery>, QueryRejection>,
) -> Result<Json<Vec<Book>>, AppError> {
    let Query(query) = query?;
    let books = match query.category.as_deref() {
        Some(category) if !category.is_empty() => repository.find_by_category(category).await?,
        _ => repository.find_all().await?,
    };
    Ok(Json(books))
}

async fn get_book(
    State(repository): State<BookRepository>,
    Path(id): Path<String>,
) -> Result<Json<Book>, AppError> {
    let id = record_id(&id, "book")?;
    repository
        .find_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::not_found("book not found"))
}

async fn create_book(
    State(repository): State<BookRepository>,
    Extension(user): Extension<CurrentUser>,
    payload: Result<Json<BookPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<Book>), AppError> {
    let Json(payload) = payload?;
    let book = payload.validate()?;

    let created = repository.create(&book).await?;
    tracing::info!(book_id = created.id, user_id = user.id, "book created");

    Ok((StatusCode::CREATED, Json(created)))
}

async fn update_book(
    State(repository): State<BookRepository>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
    payload: Result<Json<BookPayload>, JsonRejection>,
) -> Result<Json<Book>, AppError> {
    let Json(payload) = payload?;
    let book = payload.validate()?;
    let id = record_id(&id, "book")?;

    if repository.update(id, &book).await? == 0 {
        return Err(AppError::not_found("book not found"));
    }
    tracing::info!(book_id = id, user_id = user.id, "book updated");

    Ok(Json(Book::from_new(id, book)))
}

async fn delete_book(
    State(repository): State<BookRepository>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> Result<Json<Message>, AppError> {
    let id = record_id(&id, "book")?;

    if repository.delete(id).await? == 0 {
        return Err(AppError::not_found("book not found"));
    }
    tracing::info!(book_id = id, user_id = user.id, "book deleted");

    Ok(Json(Message::new("book deleted")))
}
