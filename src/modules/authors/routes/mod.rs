use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    middleware,
    routing::{get, post, put},
    Extension, Json, Router,
};

use bookstore_authz::{require_session, CurrentUser};
use bookstore_http::AppError;

use super::models::{Author, AuthorPayload};
use super::repository::AuthorRepository;
use crate::utils::{record_id, Message};

pub fn router(repository: AuthorRepository) -> Router {
    let public = Router::new()
        .route("/", get(list_authors))
        .route("/{id}", get(get_author));

    let protected = Router::new()
        .route("/", post(create_author))
        .route("/{id}", put(update_author).delete(delete_author))
        .route_layer(middleware::from_fn(require_session));

    public.merge(protected).with_state(repository)
}

async fn list_authors(
    State(repository): State<AuthorRepository>,
) -> Result<Json<Vec<Author>>, AppError> {
    Ok(Json(repository.find_all().await?))
}

async fn get_author(
    State(repository): State<AuthorRepository>,
    Path(id): Path<String>,
) -> Result<Json<Author>, AppError> {
    let id = record_id(&id, "author")?;
    repository
        .find_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::not_found("author not found"))
}

async fn create_author(
    State(repository): State<AuthorRepository>,
    Extension(user): Extension<CurrentUser>,
    payload: Result<Json<AuthorPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<Author>), AppError> {
    let Json(payload) = payload?;
    let author = payload.validate()?;

    let created = repository.create(&author).await?;
    tracing::info!(author_id = created.id, user_id = user.id, "author created");

    Ok((StatusCode::CREATED, Json(created)))
}

async fn update_author(
    State(repository): State<AuthorRepository>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
    payload: Result<Json<AuthorPayload>, JsonRejection>,
) -> Result<Json<Author>, AppError> {
    let Json(payload) = payload?;
    let author = payload.validate()?;
    let id = record_id(&id, "author")?;

    if repository.update(id, &author).await? == 0 {
        return Err(AppError::not_found("author not found"));
    }
    tracing::info!(author_id = id, user_id = user.id, "author updated");

    Ok(Json(Author::from_new(id, author)))
}

async fn delete_author(
    State(repository): State<AuthorRepository>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> Result<Json<Message>, AppError> {
    let id = record_id(&id, "author")?;

    if repository.delete(id).await? == 0 {
        return Err(AppError::not_found("author not found"));
    }
    tracing::info!(author_id = id, user_id = user.id, "author deleted");

    Ok(Json(Message::new("author deleted")))
}
