//! Session-backed authentication state and the gate for protected routes.
//!
//! The session layer itself is installed by `bookstore-http`; this crate only
//! reads and writes the authenticated user through it.

use axum::{
    extract::{FromRequestParts, Request},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};
use tower_sessions::{Expiry, Session};

use bookstore_http::AppError;

const CURRENT_USER_KEY: &str = "user";

/// The user bound to a live session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: i64,
    pub email: String,
}

/// Handle on the caller's session, extracted per request.
pub struct AuthSession {
    session: Session,
}

impl AuthSession {
    pub fn new(session: Session) -> Self {
        Self { session }
    }

    /// The authenticated user, if any. Never mutates the session.
    pub async fn current_user(&self) -> Result<Option<CurrentUser>, AppError> {
        Ok(self.session.get::<CurrentUser>(CURRENT_USER_KEY).await?)
    }

    /// Bind `user` to a fresh session id that expires `ttl` from now.
    pub async fn establish(&self, user: &CurrentUser, ttl: Duration) -> Result<(), AppError> {
        self.session.cycle_id().await?;
        self.session.insert(CURRENT_USER_KEY, user).await?;
        self.session
            .set_expiry(Some(Expiry::AtDateTime(OffsetDateTime::now_utc() + ttl)));

        tracing::info!(user_id = user.id, "session established");
        Ok(())
    }

    /// Remove the session from the store; the manager clears the cookie.
    pub async fn destroy(&self) -> Result<(), AppError> {
        self.session.flush().await?;
        Ok(())
    }
}

impl<S> FromRequestParts<S> for AuthSession
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let session = Session::from_request_parts(parts, state)
            .await
            .map_err(|(_, message)| AppError::Internal(anyhow::anyhow!(message)))?;
        Ok(Self::new(session))
    }
}

/// Route gate: lets the request through only when it carries a live session
/// bound to a user. The user is placed in the request extensions.
pub async fn require_session(
    auth: AuthSession,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    match auth.current_user().await? {
        Some(user) => {
            request.extensions_mut().insert(user);
            Ok(next.run(request).await)
        }
        None => {
            tracing::debug!(path = %request.uri().path(), "rejected unauthenticated request");
            Err(AppError::unauthorized(
                "authentication required; please log in",
            ))
        }
    }
}
