use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    middleware,
    routing::{get, post},
    Extension, Json, Router,
};

use bookstore_authz::{require_session, AuthSession, CurrentUser};
use bookstore_http::AppError;

use super::models::{AuthResponse, CheckResponse, CredentialsPayload};
use super::password::{hash_password, verify_password};
use super::AuthState;
use crate::utils::Message;

const INVALID_CREDENTIALS: &str = "invalid email or password";
const EMAIL_TAKEN: &str = "email already registered";

pub fn router(state: AuthState) -> Router {
    let public = Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/check", get(check));

    let protected = Router::new()
        .route("/logout", post(logout))
        .route_layer(middleware::from_fn(require_session));

    public.merge(protected).with_state(state)
}

async fn register(
    State(state): State<AuthState>,
    auth: AuthSession,
    payload: Result<Json<CredentialsPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<AuthResponse>), AppError> {
    let Json(payload) = payload?;
    let credentials = payload.validate()?;

    if state.users.find_by_email(&credentials.email).await?.is_some() {
        tracing::info!(email = %credentials.email, "registration rejected: email taken");
        return Err(AppError::conflict(EMAIL_TAKEN));
    }

    let password_hash = hash_password(credentials.password, state.bcrypt_cost).await?;

    let user = match state.users.create(&credentials.email, &password_hash).await {
        Ok(user) => user,
        Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
            return Err(AppError::conflict(EMAIL_TAKEN));
        }
        Err(e) => return Err(e.into()),
    };

    auth.establish(&CurrentUser::from(&user), state.session_ttl)
        .await?;
    tracing::info!(user_id = user.id, "user registered");

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            message: "user registered and logged in".to_string(),
            user,
        }),
    ))
}

async fn login(
    State(state): State<AuthState>,
    auth: AuthSession,
    payload: Result<Json<CredentialsPayload>, JsonRejection>,
) -> Result<Json<AuthResponse>, AppError> {
    let Json(payload) = payload?;
    let credentials = payload.validate()?;

    let Some(stored) = state.users.find_by_email(&credentials.email).await? else {
        tracing::info!("login rejected: unknown email");
        return Err(AppError::unauthorized(INVALID_CREDENTIALS));
    };

    if !verify_password(credentials.password, stored.password_hash.clone()).await? {
        tracing::info!(user_id = stored.id, "login rejected: wrong password");
        return Err(AppError::unauthorized(INVALID_CREDENTIALS));
    }

    let user = stored.user();
    auth.establish(&CurrentUser::from(&user), state.session_ttl)
        .await?;
    tracing::info!(user_id = user.id, "user logged in");

    Ok(Json(AuthResponse {
        message: "login successful".to_string(),
        user,
    }))
}

async fn logout(
    auth: AuthSession,
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<Message>, AppError> {
    auth.destroy().await?;
    tracing::info!(user_id = user.id, "user logged out");

    Ok(Json(Message::new("logout successful")))
}

async fn check(auth: AuthSession) -> Result<Json<CheckResponse>, AppError> {
    let user = auth.current_user().await?;
    Ok(Json(CheckResponse {
        logged_in: user.is_some(),
        user_id: user.map(|user| user.id),
    }))
}
