use serde::{Deserialize, Serialize};

use bookstore_http::AppError;

use crate::utils::Required;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Author {
    pub id: i64,
    pub name: String,
    pub biography: Option<String>,
    pub nationality: Option<String>,
}

impl Author {
    pub fn from_new(id: i64, author: NewAuthor) -> Self {
        Self {
            id,
            name: author.name,
            biography: author.biography,
            nationality: author.nationality,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAuthor {
    pub name: String,
    pub biography: Option<String>,
    pub nationality: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthorPayload {
    #[serde(alias = "nome")]
    pub name: Option<String>,
    #[serde(alias = "biografia")]
    pub biography: Option<String>,
    #[serde(alias = "nacionalidade")]
    pub nationality: Option<String>,
}

impl AuthorPayload {
    pub fn validate(self) -> Result<NewAuthor, AppError> {
        let mut required = Required::new();
        let author = NewAuthor {
            name: required.text("name", self.name),
            biography: self.biography,
            nationality: self.nationality,
        };
        required.finish(author)
    }
}
