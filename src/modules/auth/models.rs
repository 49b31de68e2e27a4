use serde::{Deserialize, Serialize};

use bookstore_authz::CurrentUser;
use bookstore_http::AppError;

use crate::utils::Required;

/// Public view of an account. The password hash never leaves the repository
/// except through [`UserCredentials`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub email: String,
}

impl From<&User> for CurrentUser {
    fn from(user: &User) -> Self {
        CurrentUser {
            id: user.id,
            email: user.email.clone(),
        }
    }
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserCredentials {
    pub id: i64,
    pub email: String,
    pub password_hash: String,
}

impl UserCredentials {
    pub fn user(&self) -> User {
        User {
            id: self.id,
            email: self.email.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CredentialsPayload {
    pub email: Option<String>,
    #[serde(alias = "senha")]
    pub password: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl CredentialsPayload {
    pub fn validate(self) -> Result<Credentials, AppError> {
        let mut required = Required::new();
        let credentials = Credentials {
            email: required.text("email", self.email),
            password: required.text("password", self.password),
        };
        required.finish(credentials)
    }
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub message: String,
    pub user: User,
}

#[derive(Debug, Serialize)]
pub struct CheckResponse {
    #[serde(rename = "loggedIn")]
    pub logged_in: bool,
    #[serde(rename = "userId", skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn credentials_require_both_fields() {
        let err = CredentialsPayload {
            email: Some("a@b.c".to_string()),
            password: Some(String::new()),
        }
        .validate()
        .unwrap_err();
        assert_eq!(err.status(), axum::http::StatusCode::BAD_REQUEST);

        let ok = CredentialsPayload {
            email: Some("a@b.c".to_string()),
            password: Some("secret".to_string()),
        }
        .validate()
        .unwrap();
        assert_eq!(ok.email, "a@b.c");
    }

    #[test]
    fn check_response_omits_user_id_when_anonymous() {
        let anonymous = serde_json::to_value(CheckResponse {
            logged_in: false,
            user_id: None,
        })
        .unwrap();
        assert_eq!(anonymous, json!({ "loggedIn": false }));

        let known = serde_json::to_value(CheckResponse {
            logged_in: true,
            user_id: Some(7),
        })
        .unwrap();
        assert_eq!(known, json!({ "loggedIn": true, "userId": 7 }));
    }
}
