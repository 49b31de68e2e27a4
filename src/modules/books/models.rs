use serde::{Deserialize, Serialize};

use bookstore_http::AppError;

use crate::utils::Required;

/// A catalog entry. `author` is free text, not a reference to an author row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub category: String,
    pub year: i64,
    pub publisher: Option<String>,
    /// Positive when present; the table enforces it.
    pub pages: Option<i64>,
}

impl Book {
    pub fn from_new(id: i64, book: NewBook) -> Self {
        Self {
            id,
            title: book.title,
            author: book.author,
            category: book.category,
            year: book.year,
            publisher: book.publisher,
            pages: book.pages,
        }
    }
}

/// Validated field set for create and full-replace update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub category: String,
    pub year: i64,
    pub publisher: Option<String>,
    pub pages: Option<i64>,
}

/// Request body as sent by clients; Portuguese field names are accepted too.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookPayload {
    #[serde(alias = "titulo")]
    pub title: Option<String>,
    #[serde(alias = "autor")]
    pub author: Option<String>,
    #[serde(alias = "categoria")]
    pub category: Option<String>,
    #[serde(alias = "ano")]
    pub year: Option<i64>,
    #[serde(alias = "editora")]
    pub publisher: Option<String>,
    #[serde(alias = "paginas")]
    pub pages: Option<i64>,
}

impl BookPayload {
    pub fn validate(self) -> Result<NewBook, AppError> {
        let mut required = Required::new();
        let book = NewBook {
            title: required.text("title", self.title),
            author: required.text("author", self.author),
            category: required.text("category", self.category),
            year: required.number("year", self.year),
            publisher: self.publisher,
            pages: self.pages,
        };
        required.finish(book)
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct BookQuery {
    #[serde(alias = "categoria")]
    pub category: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn portuguese_payload_is_accepted() {
        let payload: BookPayload = serde_json::from_value(serde_json::json!({
            "titulo": "X",
            "autor": "Y",
            "categoria": "Z",
            "ano": 2020,
            "paginas": 100
        }))
        .unwrap();

        let book = payload.validate().unwrap();
        assert_eq!(book.title, "X");
        assert_eq!(book.year, 2020);
        assert_eq!(book.pages, Some(100));
        assert_eq!(book.publisher, None);
    }

    #[test]
    fn missing_year_is_rejected() {
        let payload = BookPayload {
            title: Some("X".into()),
            author: Some("Y".into()),
            category: Some("Z".into()),
            ..Default::default()
        };
        assert!(matches!(payload.validate(), Err(AppError::Validation { .. })));
    }
}
