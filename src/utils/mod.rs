//! Request-shaping helpers shared by the catalog modules.

use bookstore_http::AppError;
use serde::Serialize;

/// Confirmation body for operations that return no record.
#[derive(Debug, Serialize)]
pub struct Message {
    pub message: String,
}

impl Message {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Collects required fields that are absent or blank while a payload is
/// being unpacked, then reports all of them at once.
#[derive(Debug, Default)]
pub struct Required {
    missing: Vec<&'static str>,
}

impl Required {
    pub fn new() -> Self {
        Self::default()
    }

    /// A required string; empty counts as missing.
    pub fn text(&mut self, field: &'static str, value: Option<String>) -> String {
        match value {
            Some(value) if !value.is_empty() => value,
            _ => {
                self.missing.push(field);
                String::new()
            }
        }
    }

    /// A required integer; zero counts as missing.
    pub fn number(&mut self, field: &'static str, value: Option<i64>) -> i64 {
        match value {
            Some(value) if value != 0 => value,
            _ => {
                self.missing.push(field);
                0
            }
        }
    }

    pub fn finish<T>(self, value: T) -> Result<T, AppError> {
        if self.missing.is_empty() {
            Ok(value)
        } else {
            Err(AppError::missing_fields(&self.missing))
        }
    }
}

/// Parse a record id from the path. Anything that is not an integer can
/// never name a row, so it is reported as not found.
pub fn record_id(raw: &str, entity: &str) -> Result<i64, AppError> {
    raw.parse()
        .map_err(|_| AppError::not_found(format!("{entity} not found")))
}
